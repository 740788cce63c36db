use std::fmt;

use thiserror::Error;

/// The two programmable stages of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Everything that can go wrong while setting up or driving the renderer.
///
/// Shader and mesh errors are only possible during one-time setup; they are
/// fatal to the render session and must be surfaced to the host rather than
/// retried. `UnknownBinding` is a contract violation between the GLSL sources
/// and the lookup calls, not a recoverable runtime condition.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("failed to link shader program: {log}")]
    ShaderLink { log: String },

    #[error("no attribute or uniform named {name:?} in the linked program")]
    UnknownBinding { name: String },

    #[error("degenerate mesh parameters: {reason}")]
    DegenerateMesh { reason: String },

    #[error("{op}() called while the renderer is {phase}")]
    Lifecycle { op: &'static str, phase: &'static str },

    #[error("GL resource allocation failed: {0}")]
    Gl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_compile_message_names_the_stage() {
        let err = RenderError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "0:3: syntax error".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to compile fragment shader: 0:3: syntax error"
        );
    }

    #[test]
    fn lifecycle_message_names_op_and_phase() {
        let err = RenderError::Lifecycle {
            op: "frame",
            phase: "uninitialized",
        };
        assert_eq!(err.to_string(), "frame() called while the renderer is uninitialized");
    }
}
