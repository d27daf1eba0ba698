use super::{Buffer, BufferObject};
use crate::data::TypedData;
use crate::device::{BufferTarget, BufferUsage, DeviceContext};
use crate::error::Result;

/// Plain buffer meant as a transform feedback destination.
///
/// Vertex, index and uniform buffers can be captured into as well; this type
/// is for outputs that are not otherwise used for rendering.
#[derive(Debug)]
pub struct FeedbackBuffer {
    buffer: Buffer,
}

impl FeedbackBuffer {
    /// Output buffer bound at `Array` with `StaticCopy` usage.
    pub fn new(ctx: &DeviceContext, data: TypedData<'_>) -> Result<Self> {
        Self::with_target(ctx, data, BufferTarget::Array, BufferUsage::StaticCopy)
    }

    /// Output buffer of `byte_len` zero bytes.
    pub fn zeroed(ctx: &DeviceContext, byte_len: usize) -> Result<Self> {
        Self::new(ctx, TypedData::U8(&vec![0; byte_len]))
    }

    /// Allocates with an explicit target and usage, binds, and uploads `data`.
    pub fn with_target(
        ctx: &DeviceContext,
        data: TypedData<'_>,
        target: BufferTarget,
        usage: BufferUsage,
    ) -> Result<Self> {
        let buffer = Buffer::new(ctx, target, usage)?;
        buffer.upload(data);
        Ok(Self { buffer })
    }
}

impl BufferObject for FeedbackBuffer {
    fn buffer(&self) -> &Buffer {
        &self.buffer
    }
}
