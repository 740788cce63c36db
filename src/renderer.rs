//! Render-loop orchestration: one-time setup, viewport resizes, and the
//! per-frame draw, driven by a host that owns the window and GL context.

use glow::HasContext;
use log::{info, warn};

use crate::color_updater::ColorUpdater;
use crate::error::RenderError;
use crate::math::{mat4x4_frustum, mat4x4_identity, mat4x4_look_at, mat4x4_mul, Mat4x4};
use crate::mesh::SphereMesh;
use crate::shader::{ShaderProgram, SPHERE_FRAGMENT_SHADER, SPHERE_VERTEX_SHADER};
use crate::sphere::SphereDrawable;

pub const SPHERE_RADIUS: f32 = 1.0;
pub const SPHERE_STACKS: u32 = 40;
pub const SPHERE_SLICES: u32 = 40;

const EYE: [f32; 3] = [0.0, 0.0, -3.0];
const TARGET: [f32; 3] = [0.0, 0.0, 0.0];
const UP: [f32; 3] = [0.0, 1.0, 0.0];
const NEAR: f32 = 3.0;
const FAR: f32 = 7.0;

/// GL-owned state that only exists between `setup` and `teardown`.
struct Scene {
    program: ShaderProgram,
    sphere: SphereDrawable,
    updater: ColorUpdater,
}

enum State {
    Uninitialized,
    Ready(Scene),
    TornDown,
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::Uninitialized => "uninitialized",
            State::Ready(_) => "ready",
            State::TornDown => "torn down",
        }
    }
}

/// The render session. The host calls `setup` exactly once per GL-context
/// lifetime, `resize` whenever the surface changes, and `frame` for every
/// redraw; calls in any other order are rejected with
/// [`RenderError::Lifecycle`]. All methods must run on the GL-context thread.
pub struct SphereRenderer {
    state: State,
    projection: Mat4x4,
    view: Mat4x4,
}

impl SphereRenderer {
    pub fn new() -> Self {
        Self {
            state: State::Uninitialized,
            projection: mat4x4_identity(),
            view: mat4x4_identity(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    /// One-time GL setup: compile and link the program, tessellate and
    /// upload the sphere, start the color timer. Any failure is fatal to the
    /// session; no partially initialized scene is kept.
    pub fn setup(&mut self, gl: &glow::Context) -> Result<(), RenderError> {
        if !matches!(self.state, State::Uninitialized) {
            return Err(RenderError::Lifecycle {
                op: "setup",
                phase: self.state.name(),
            });
        }

        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.enable(glow::DEPTH_TEST);
        }

        let program = ShaderProgram::build(gl, SPHERE_VERTEX_SHADER, SPHERE_FRAGMENT_SHADER)?;
        let mesh = match SphereMesh::generate(SPHERE_RADIUS, SPHERE_STACKS, SPHERE_SLICES) {
            Ok(mesh) => mesh,
            Err(err) => {
                program.destroy(gl);
                return Err(err);
            }
        };
        let sphere = match SphereDrawable::new(gl, &program, &mesh) {
            Ok(sphere) => sphere,
            Err(err) => {
                program.destroy(gl);
                return Err(err);
            }
        };

        let updater = ColorUpdater::start(sphere.color_cell());

        info!(
            "sphere renderer ready: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );
        self.state = State::Ready(Scene { program, sphere, updater });
        Ok(())
    }

    /// Recompute the projection for a new surface size. A zero height would
    /// degenerate the aspect ratio, so it leaves the projection untouched.
    pub fn resize(&mut self, gl: &glow::Context, width: u32, height: u32) -> Result<(), RenderError> {
        if !matches!(self.state, State::Ready(_)) {
            return Err(RenderError::Lifecycle {
                op: "resize",
                phase: self.state.name(),
            });
        }

        let Some(projection) = projection_for(width, height) else {
            warn!("ignoring resize to {width}x0");
            return Ok(());
        };

        unsafe {
            gl.viewport(0, 0, width as i32, height as i32);
        }
        self.projection = projection;
        Ok(())
    }

    /// Draw one frame: clear, rebuild the fixed camera, submit the sphere.
    pub fn frame(&mut self, gl: &glow::Context) -> Result<(), RenderError> {
        let State::Ready(scene) = &self.state else {
            return Err(RenderError::Lifecycle {
                op: "frame",
                phase: self.state.name(),
            });
        };

        unsafe {
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.view = mat4x4_look_at(EYE, TARGET, UP);
        let mvp = mat4x4_mul(self.projection, self.view);
        scene.sphere.draw(gl, &scene.program, &mvp);
        Ok(())
    }

    /// Release the GL resources and stop the color timer. Safe to call more
    /// than once; every call leaves the renderer torn down.
    pub fn teardown(&mut self, gl: &glow::Context) {
        if let State::Ready(scene) = std::mem::replace(&mut self.state, State::TornDown) {
            let Scene { program, sphere, mut updater } = scene;
            updater.stop();
            sphere.destroy(gl);
            program.destroy(gl);
            info!("sphere renderer torn down");
        }
    }
}

/// Symmetric frustum for the surface's aspect ratio, or `None` when the
/// height is zero and the previous projection should be kept.
fn projection_for(width: u32, height: u32) -> Option<Mat4x4> {
    if height == 0 {
        return None;
    }
    let aspect = width as f32 / height as f32;
    Some(mat4x4_frustum(-aspect, aspect, -1.0, 1.0, NEAR, FAR))
}

impl Default for SphereRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninitialized() {
        let renderer = SphereRenderer::new();
        assert!(!renderer.is_ready());
        assert_eq!(renderer.state.name(), "uninitialized");
    }

    #[test]
    fn projection_starts_as_identity() {
        let renderer = SphereRenderer::new();
        assert_eq!(renderer.projection, mat4x4_identity());
    }

    #[test]
    fn state_names_cover_all_phases() {
        assert_eq!(State::Uninitialized.name(), "uninitialized");
        assert_eq!(State::TornDown.name(), "torn down");
    }

    #[test]
    fn zero_height_keeps_the_previous_projection() {
        assert!(projection_for(800, 0).is_none());
    }

    #[test]
    fn projection_uses_the_surface_aspect_ratio() {
        let m = projection_for(800, 600).unwrap();
        let aspect = 800.0 / 600.0;
        assert_eq!(m, mat4x4_frustum(-aspect, aspect, -1.0, 1.0, NEAR, FAR));
    }
}
