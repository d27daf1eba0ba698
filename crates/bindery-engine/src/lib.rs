//! Bindery engine crate.
//!
//! Owned resource objects over a binding-point GPU API: buffers, vertex
//! attribute layouts, vertex arrays and transform feedback sessions, with
//! explicit rules about which global binding point each call touches.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`device`] | `GlApi` call surface, handles and enums, `DeviceContext`, `SoftDevice` |
//! | [`program`] | `ProgramInterface` name resolution, `ProgramLayout`, `SoftProgram` |
//! | [`data`] | `TypedData` upload payloads |
//! | [`buffer`] | `Buffer`, `BufferObject`, typed buffer wrappers, attribute tables |
//! | [`vertex_array`] | `VertexArray` |
//! | [`feedback`] | `TransformFeedback`, `FeedbackOutput`, `bind_feedback_outputs` |
//! | [`error`] | `ResourceError`, `Result` |
//! | [`logging`] | `init_logging`, `LoggingConfig` |
//!
//! Everything is single-threaded: the context is `!Send`, and correctness of a
//! sequence of calls depends on the order the caller issues them in.
//!
//! # Quick start
//!
//! ```rust
//! use bindery_engine::buffer::{AttributeDesc, VertexBuffer};
//! use bindery_engine::data::TypedData;
//! use bindery_engine::device::soft::SoftDevice;
//! use bindery_engine::device::{BufferUsage, DeviceContext};
//! use bindery_engine::program::ProgramLayout;
//! use bindery_engine::vertex_array::VertexArray;
//!
//! let device = SoftDevice::new();
//! let ctx = DeviceContext::new(device.clone());
//! let program = device
//!     .create_program(ProgramLayout::new().attribute("a_position", 0))
//!     .unwrap();
//!
//! let vbo = VertexBuffer::new(
//!     &ctx,
//!     &program,
//!     TypedData::F32(&[-0.5, -0.5, 0.5, -0.5, 0.0, 0.5]),
//!     &[AttributeDesc::new("a_position", 2)],
//!     BufferUsage::StaticDraw,
//! )?;
//! let vao = VertexArray::new(&ctx, &[&vbo], None)?;
//!
//! vao.bind();
//! assert!(device.vertex_attrib(0).enabled);
//! # Ok::<(), bindery_engine::ResourceError>(())
//! ```

pub mod buffer;
pub mod data;
pub mod device;
pub mod error;
pub mod feedback;
pub mod logging;
pub mod program;
pub mod vertex_array;

pub use buffer::BufferObject;
pub use error::{ResourceError, Result};
