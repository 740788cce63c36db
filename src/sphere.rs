//! The sphere drawable: uploaded geometry, shared color state, and the
//! per-frame draw protocol.

use std::sync::{Arc, Mutex};

use glow::HasContext;

use crate::error::RenderError;
use crate::math::{mat4x4_transpose, Mat4x4};
use crate::mesh::{SphereMesh, FLOATS_PER_VERTEX};
use crate::shader::ShaderProgram;

/// Olive green, the color the sphere shows until the first timer update.
pub const DEFAULT_COLOR: [f32; 4] = [0.63671875, 0.76953125, 0.22265625, 1.0];

/// Shared RGBA slot between the color-updater thread and the render thread.
///
/// `set` replaces all four components under one lock acquisition and `get`
/// copies them under the same lock, so a reader observes either the previous
/// color or the complete new one, never a mix.
#[derive(Debug)]
pub struct ColorCell {
    rgba: Mutex<[f32; 4]>,
}

impl ColorCell {
    pub fn new(rgba: [f32; 4]) -> Self {
        Self { rgba: Mutex::new(rgba) }
    }

    pub fn set(&self, r: f32, g: f32, b: f32, a: f32) {
        *self.rgba.lock().unwrap() = [r, g, b, a];
    }

    pub fn get(&self) -> [f32; 4] {
        *self.rgba.lock().unwrap()
    }
}

/// GPU-side sphere: vertex and element buffers plus the attribute and
/// uniform locations resolved once after program link.
///
/// All methods except `set_color` must run on the thread that owns the GL
/// context. `ColorCell` is the only state shared across threads.
pub struct SphereDrawable {
    vbo: glow::Buffer,
    ebo: glow::Buffer,
    index_count: i32,
    position_attrib: u32,
    color_attrib: u32,
    mvp_uniform: glow::UniformLocation,
    color: Arc<ColorCell>,
}

impl SphereDrawable {
    pub fn new(
        gl: &glow::Context,
        program: &ShaderProgram,
        mesh: &SphereMesh,
    ) -> Result<Self, RenderError> {
        let position_attrib = program.attrib_location(gl, "a_Position")?;
        let color_attrib = program.attrib_location(gl, "a_Color")?;
        let mvp_uniform = program.uniform_location(gl, "u_MVPMatrix")?;

        unsafe {
            let vbo = gl.create_buffer().map_err(RenderError::Gl)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(mesh.vertices()),
                glow::STATIC_DRAW,
            );

            let ebo = match gl.create_buffer() {
                Ok(ebo) => ebo,
                Err(msg) => {
                    gl.delete_buffer(vbo);
                    return Err(RenderError::Gl(msg));
                }
            };
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(mesh.indices()),
                glow::STATIC_DRAW,
            );

            Ok(Self {
                vbo,
                ebo,
                index_count: mesh.index_count() as i32,
                position_attrib,
                color_attrib,
                mvp_uniform,
                color: Arc::new(ColorCell::new(DEFAULT_COLOR)),
            })
        }
    }

    /// Handle to the color slot, for the updater thread.
    pub fn color_cell(&self) -> Arc<ColorCell> {
        Arc::clone(&self.color)
    }

    /// Overwrite the sphere color. Callable from any thread.
    pub fn set_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.color.set(r, g, b, a);
    }

    /// Snapshot of the color the next draw will bind.
    pub fn current_color(&self) -> [f32; 4] {
        self.color.get()
    }

    /// Submit the sphere with the given model-view-projection transform.
    /// GL-context thread only.
    pub fn draw(&self, gl: &glow::Context, program: &ShaderProgram, mvp: &Mat4x4) {
        let [r, g, b, a] = self.color.get();

        unsafe {
            program.bind(gl);

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            gl.enable_vertex_attrib_array(self.position_attrib);
            gl.vertex_attrib_pointer_f32(
                self.position_attrib,
                FLOATS_PER_VERTEX as i32,
                glow::FLOAT,
                false,
                (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as i32,
                0,
            );

            // The whole sphere is one color: keep the a_Color array disabled
            // and bind the current color as a constant vertex attribute.
            gl.disable_vertex_attrib_array(self.color_attrib);
            gl.vertex_attrib_4_f32(self.color_attrib, r, g, b, a);

            // GLES 2.0 rejects transposed uploads, so convert to
            // column-major on the CPU.
            gl.uniform_matrix_4_f32_slice(
                Some(&self.mvp_uniform),
                false,
                &mat4x4_transpose(*mvp),
            );

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.ebo));
            gl.draw_elements(glow::TRIANGLES, self.index_count, glow::UNSIGNED_SHORT, 0);

            gl.disable_vertex_attrib_array(self.position_attrib);
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_buffer(self.vbo);
            gl.delete_buffer(self.ebo);
        }
    }
}
