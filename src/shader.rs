//! Shader compilation and program linking.

use glow::HasContext;
use log::error;

use crate::error::{RenderError, ShaderStage};

/// Vertex stage of the sphere pipeline. The `a_Position`/`a_Color`/
/// `u_MVPMatrix` names are the binding contract with [`crate::sphere`];
/// renaming one side without the other is a fatal `UnknownBinding`.
pub const SPHERE_VERTEX_SHADER: &str = r#"
uniform mat4 u_MVPMatrix;
attribute vec4 a_Position;
attribute vec4 a_Color;

varying vec4 v_Color;

void main() {
    v_Color = a_Color;
    gl_Position = u_MVPMatrix * a_Position;
}
"#;

pub const SPHERE_FRAGMENT_SHADER: &str = r#"
precision mediump float;

varying vec4 v_Color;

void main() {
    gl_FragColor = v_Color;
}
"#;

/// A linked GL program. The handle is valid from construction until
/// [`ShaderProgram::destroy`]; a failed compile or link never produces one.
pub struct ShaderProgram {
    program: glow::Program,
}

impl ShaderProgram {
    pub fn build(
        gl: &glow::Context,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, RenderError> {
        let vs = compile_stage(gl, ShaderStage::Vertex, vertex_src)?;
        let fs = match compile_stage(gl, ShaderStage::Fragment, fragment_src) {
            Ok(fs) => fs,
            Err(err) => {
                unsafe { gl.delete_shader(vs) };
                return Err(err);
            }
        };

        unsafe {
            let program = match gl.create_program() {
                Ok(program) => program,
                Err(msg) => {
                    gl.delete_shader(vs);
                    gl.delete_shader(fs);
                    return Err(RenderError::Gl(msg));
                }
            };
            gl.attach_shader(program, vs);
            gl.attach_shader(program, fs);
            gl.link_program(program);

            // Stage objects are not needed once the program is linked.
            gl.detach_shader(program, vs);
            gl.detach_shader(program, fs);
            gl.delete_shader(vs);
            gl.delete_shader(fs);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                error!("shader program failed to link: {log}");
                return Err(RenderError::ShaderLink { log });
            }

            Ok(Self { program })
        }
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe { gl.use_program(Some(self.program)) };
    }

    /// Location of a vertex attribute declared by the linked program.
    pub fn attrib_location(&self, gl: &glow::Context, name: &str) -> Result<u32, RenderError> {
        unsafe { gl.get_attrib_location(self.program, name) }.ok_or_else(|| {
            RenderError::UnknownBinding { name: name.to_owned() }
        })
    }

    /// Location of a uniform declared by the linked program.
    pub fn uniform_location(
        &self,
        gl: &glow::Context,
        name: &str,
    ) -> Result<glow::UniformLocation, RenderError> {
        unsafe { gl.get_uniform_location(self.program, name) }.ok_or_else(|| {
            RenderError::UnknownBinding { name: name.to_owned() }
        })
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.use_program(None);
            gl.delete_program(self.program);
        }
    }
}

fn compile_stage(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, RenderError> {
    let kind = match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    };

    unsafe {
        let shader = gl.create_shader(kind).map_err(RenderError::Gl)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            error!("{stage} shader failed to compile: {log}");
            return Err(RenderError::ShaderCompile { stage, log });
        }
        Ok(shader)
    }
}
