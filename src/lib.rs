//! A procedurally tessellated sphere rendered through a programmable GL
//! pipeline, with its surface color mutated every ten seconds from a
//! background timer.
//!
//! The crate is split along the ownership boundaries of the problem:
//! [`mesh`] builds geometry with no GPU dependency, [`shader`] owns the
//! compile/link lifecycle, [`sphere`] owns the uploaded buffers and the
//! cross-thread color slot, [`renderer`] ties them into the
//! setup/resize/frame protocol a windowing host drives, and
//! [`color_updater`] is the timer-side producer.

pub mod color_updater;
pub mod error;
pub mod math;
pub mod mesh;
pub mod renderer;
pub mod shader;
pub mod sphere;

pub use color_updater::ColorUpdater;
pub use error::{RenderError, ShaderStage};
pub use mesh::SphereMesh;
pub use renderer::SphereRenderer;
pub use shader::ShaderProgram;
pub use sphere::{ColorCell, SphereDrawable};
