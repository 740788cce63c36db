//! Procedural sphere tessellation.
//!
//! A classic stack/slice (latitude/longitude) grid: `stacks + 1` rings of
//! `slices + 1` samples each, so the poles are duplicated per seam sample and
//! the `theta = 0` meridian appears twice. That redundancy keeps the index
//! arithmetic trivial and is harmless for a position-only mesh.

use std::f32::consts::PI;

use crate::error::RenderError;

/// Position components per vertex (x, y, z).
pub const FLOATS_PER_VERTEX: usize = 3;

#[derive(Clone, Debug)]
pub struct SphereMesh {
    vertices: Vec<f32>,
    indices: Vec<u16>,
}

impl SphereMesh {
    /// Tessellate a sphere of the given radius.
    ///
    /// Vertices are laid out row-major by stack then slice. Indices describe
    /// a triangle list, two counter-clockwise triangles per grid quad.
    pub fn generate(radius: f32, stacks: u32, slices: u32) -> Result<Self, RenderError> {
        if !(radius > 0.0) {
            return Err(RenderError::DegenerateMesh {
                reason: format!("radius must be positive, got {radius}"),
            });
        }
        if stacks < 1 || slices < 1 {
            return Err(RenderError::DegenerateMesh {
                reason: format!("need at least 1 stack and 1 slice, got {stacks}x{slices}"),
            });
        }

        let vertex_count = (stacks as usize + 1) * (slices as usize + 1);
        // The element buffer is 16-bit, same as the draw call's index type.
        if vertex_count > usize::from(u16::MAX) + 1 {
            return Err(RenderError::DegenerateMesh {
                reason: format!(
                    "{vertex_count} vertices exceed the 16-bit index range"
                ),
            });
        }

        let mut vertices = Vec::with_capacity(vertex_count * FLOATS_PER_VERTEX);
        for i in 0..=stacks {
            let phi = i as f32 * PI / stacks as f32;
            for j in 0..=slices {
                let theta = j as f32 * 2.0 * PI / slices as f32;
                vertices.push(radius * phi.sin() * theta.cos());
                vertices.push(radius * phi.sin() * theta.sin());
                vertices.push(radius * phi.cos());
            }
        }

        let mut indices = Vec::with_capacity(stacks as usize * slices as usize * 6);
        for i in 0..stacks {
            for j in 0..slices {
                let a = (i * (slices + 1) + j) as u16;
                let b = ((i + 1) * (slices + 1) + j) as u16;
                indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }

        Ok(Self { vertices, indices })
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}
