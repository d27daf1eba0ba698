//! GPU call surface and process-wide device state.
//!
//! This module is responsible for:
//! - the [`GlApi`] trait every resource issues its calls through
//! - the handle and enum vocabulary of the binding-point model
//! - [`DeviceContext`], the shared context handle held by all resources
//! - [`soft::SoftDevice`], an in-memory implementation for tests and headless runs

mod api;
mod context;
pub mod soft;
mod types;

pub use api::GlApi;
pub use context::DeviceContext;
pub use types::{
    BufferHandle, BufferTarget, BufferUsage, FeedbackHandle, FeedbackPrimitive, IndexedTarget,
    ProgramHandle, ScalarType, VertexArrayHandle,
};
