//! Error types.
//!
//! Construction failures abort object creation: no partially built resource
//! is ever returned. Binding-order misuse outside transform feedback is a
//! caller contract and is not detected here.

use std::fmt;

use thiserror::Error;

use crate::device::{BufferTarget, ProgramHandle};
use crate::feedback::FeedbackState;

/// Kind of GPU object an allocation was requested for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResourceKind {
    Buffer,
    VertexArray,
    TransformFeedback,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::Buffer => "buffer",
            ResourceKind::VertexArray => "vertex array",
            ResourceKind::TransformFeedback => "transform feedback",
        })
    }
}

/// Errors raised by resource construction and state transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// The device returned no handle for an allocation.
    #[error("failed to allocate {kind}{}", target_suffix(.target))]
    ResourceCreation {
        kind: ResourceKind,
        target: Option<BufferTarget>,
    },

    /// A declared vertex attribute is not an active input of the program.
    #[error("attribute \"{attribute}\" not found in {program}")]
    AttributeNotFound {
        attribute: String,
        program: ProgramHandle,
    },

    /// A uniform block name does not resolve in the program.
    #[error("uniform block \"{block}\" not found in {program}")]
    UniformBlockNotFound {
        block: String,
        program: ProgramHandle,
    },

    /// A declared attribute has a component count outside 1..=4.
    #[error("attribute \"{attribute}\" has {size} components (expected 1..=4)")]
    InvalidComponentCount { attribute: String, size: u8 },

    /// Name lookup on a built attribute table found nothing.
    #[error("attribute \"{attribute}\" is not declared on this vertex buffer")]
    UnknownAttribute { attribute: String },

    /// A transform feedback transition was requested from the wrong state.
    ///
    /// `state` is the session's own state, or `Capturing` when a capture
    /// running in another session blocks the transition.
    #[error("cannot {op} transform feedback while {state}")]
    InvalidFeedbackState {
        op: &'static str,
        state: FeedbackState,
    },

    /// A source range reaches past the end of the supplied data.
    #[error("source range {offset}..{offset}+{length} exceeds {available} bytes of data")]
    RangeOutOfBounds {
        offset: usize,
        length: usize,
        available: usize,
    },
}

fn target_suffix(target: &Option<BufferTarget>) -> String {
    target.map(|t| format!(" for {t}")).unwrap_or_default()
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ResourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_error_names_the_target() {
        let err = ResourceError::ResourceCreation {
            kind: ResourceKind::Buffer,
            target: Some(BufferTarget::Uniform),
        };
        assert_eq!(err.to_string(), "failed to allocate buffer for UNIFORM_BUFFER");

        let err = ResourceError::ResourceCreation {
            kind: ResourceKind::VertexArray,
            target: None,
        };
        assert_eq!(err.to_string(), "failed to allocate vertex array");
    }

    #[test]
    fn attribute_error_names_attribute_and_program() {
        let err = ResourceError::AttributeNotFound {
            attribute: "a_normal".into(),
            program: ProgramHandle::from_raw(4).unwrap(),
        };
        assert_eq!(err.to_string(), "attribute \"a_normal\" not found in program #4");
    }
}
