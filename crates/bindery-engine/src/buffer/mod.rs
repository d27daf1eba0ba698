//! Buffer resources.
//!
//! [`Buffer`] owns one GPU allocation with a fixed target and usage hint.
//! The specialised kinds wrap a `Buffer` and add their own state:
//!
//! | Type | Target | Extra state |
//! |------|--------|-------------|
//! | [`VertexBuffer`] | `Array` | resolved [`AttributeTable`] |
//! | [`IndexBuffer`] | `ElementArray` | index type and count |
//! | [`UniformBuffer`] | `Uniform` | block index, binding point, padded scratch |
//! | [`FeedbackBuffer`] | any (default `Array`) | none |
//!
//! All of them implement [`BufferObject`], the shared bind/upload capability.

mod attributes;
mod index;
mod output;
mod uniform;
mod vertex;

use std::cell::Cell;

pub use attributes::{AttributeDesc, AttributePointer, AttributeTable};
pub use index::IndexBuffer;
pub use output::FeedbackBuffer;
pub use uniform::{padded_len, UniformBuffer, UNIFORM_ALIGNMENT};
pub use vertex::VertexBuffer;

use crate::data::TypedData;
use crate::device::{BufferHandle, BufferTarget, BufferUsage, DeviceContext};
use crate::error::{ResourceError, ResourceKind, Result};

/// Bind and upload capability shared by every buffer kind.
///
/// Each method documents the binding point it mutates. Binding is global
/// state: the last bind at a target wins, whichever object issued it.
pub trait BufferObject {
    /// The underlying allocation.
    fn buffer(&self) -> &Buffer;

    /// Binds at the buffer's target.
    fn bind(&self) {
        self.buffer().bind();
    }

    /// Binds null at the buffer's target. Idempotent.
    fn unbind(&self) {
        self.buffer().unbind();
    }

    /// Replaces the whole store with `data`.
    ///
    /// Binds the buffer at its target first.
    fn upload(&self, data: TypedData<'_>) {
        self.buffer().upload(data);
    }

    /// Overwrites `len` bytes (default: the rest of `data`) at `dst_offset`,
    /// taken from `data` starting at byte `src_offset`.
    ///
    /// Binds the buffer at its target first. The destination range must lie
    /// within the current store; that is checked by the device, not here.
    fn upload_range(
        &self,
        data: TypedData<'_>,
        dst_offset: usize,
        src_offset: usize,
        len: Option<usize>,
    ) -> Result<()> {
        self.buffer().upload_range(data, dst_offset, src_offset, len)
    }

    fn handle(&self) -> BufferHandle {
        self.buffer().handle()
    }
}

/// A single GPU buffer allocation.
///
/// The handle is allocated eagerly and released on drop. Target and usage
/// never change after construction.
#[derive(Debug)]
pub struct Buffer {
    ctx: DeviceContext,
    handle: BufferHandle,
    target: BufferTarget,
    usage: BufferUsage,

    /// Size of the store established by the last full upload.
    byte_len: Cell<usize>,
}

impl Buffer {
    /// Allocates a buffer for `target`.
    ///
    /// Fails with [`ResourceError::ResourceCreation`] if the device returns no
    /// handle. Binding points are not touched.
    pub fn new(ctx: &DeviceContext, target: BufferTarget, usage: BufferUsage) -> Result<Self> {
        let handle = ctx
            .api()
            .create_buffer()
            .ok_or(ResourceError::ResourceCreation {
                kind: ResourceKind::Buffer,
                target: Some(target),
            })?;
        log::debug!("allocated {handle} ({target}, {usage:?})");

        Ok(Self {
            ctx: ctx.clone(),
            handle,
            target,
            usage,
            byte_len: Cell::new(0),
        })
    }

    #[inline]
    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    #[inline]
    pub fn target(&self) -> BufferTarget {
        self.target
    }

    #[inline]
    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    /// Store size in bytes as of the last full upload.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.byte_len.get()
    }

    #[inline]
    pub fn context(&self) -> &DeviceContext {
        &self.ctx
    }

    /// Binds at this buffer's target, replacing the previous occupant.
    pub fn bind(&self) {
        self.ctx.api().bind_buffer(self.target, Some(self.handle));
    }

    /// Binds null at this buffer's target.
    pub fn unbind(&self) {
        self.ctx.api().bind_buffer(self.target, None);
    }

    pub fn upload(&self, data: TypedData<'_>) {
        self.upload_bytes(data.as_bytes());
    }

    pub fn upload_range(
        &self,
        data: TypedData<'_>,
        dst_offset: usize,
        src_offset: usize,
        len: Option<usize>,
    ) -> Result<()> {
        let src = source_range(data.as_bytes(), src_offset, len)?;
        self.bind();
        self.sub_data(dst_offset, src);
        Ok(())
    }

    /// Reads the store back when the device supports it.
    pub fn read_back(&self) -> Option<Vec<u8>> {
        self.ctx.api().read_buffer(self.handle)
    }

    /// Binds, then respecifies the store from `bytes`.
    pub(crate) fn upload_bytes(&self, bytes: &[u8]) {
        self.bind();
        self.ctx.api().buffer_data(self.target, bytes, self.usage);
        self.byte_len.set(bytes.len());
    }

    /// Writes into the buffer currently bound at this target. Callers bind.
    pub(crate) fn sub_data(&self, dst_offset: usize, bytes: &[u8]) {
        self.ctx.api().buffer_sub_data(self.target, dst_offset, bytes);
    }
}

impl BufferObject for Buffer {
    fn buffer(&self) -> &Buffer {
        self
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        self.ctx.api().delete_buffer(self.handle);
        log::debug!("released {}", self.handle);
    }
}

fn source_range(bytes: &[u8], offset: usize, len: Option<usize>) -> Result<&[u8]> {
    let available = bytes.len();
    let length = len.unwrap_or_else(|| available.saturating_sub(offset));
    offset
        .checked_add(length)
        .filter(|end| *end <= available)
        .map(|end| &bytes[offset..end])
        .ok_or(ResourceError::RangeOutOfBounds {
            offset,
            length,
            available,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::soft::SoftDevice;

    fn setup() -> (SoftDevice, DeviceContext) {
        let device = SoftDevice::new();
        let ctx = DeviceContext::new(device.clone());
        (device, ctx)
    }

    #[test]
    fn source_range_defaults_to_the_remainder() {
        let bytes = [1u8, 2, 3, 4, 5];
        assert_eq!(source_range(&bytes, 0, None).unwrap(), &bytes[..]);
        assert_eq!(source_range(&bytes, 3, None).unwrap(), &[4u8, 5][..]);
        assert_eq!(source_range(&bytes, 1, Some(2)).unwrap(), &[2u8, 3][..]);
    }

    #[test]
    fn source_range_past_the_end_fails() {
        let bytes = [0u8; 4];
        assert_eq!(
            source_range(&bytes, 2, Some(3)),
            Err(ResourceError::RangeOutOfBounds {
                offset: 2,
                length: 3,
                available: 4
            })
        );
        assert!(source_range(&bytes, usize::MAX, Some(2)).is_err());
    }

    #[test]
    fn bind_and_unbind_drive_the_target_slot() {
        let (device, ctx) = setup();
        let buffer = Buffer::new(&ctx, BufferTarget::CopyRead, BufferUsage::StreamRead).unwrap();

        buffer.bind();
        assert_eq!(device.bound_buffer(BufferTarget::CopyRead), Some(buffer.handle()));

        buffer.unbind();
        buffer.unbind();
        assert_eq!(device.bound_buffer(BufferTarget::CopyRead), None);
        assert!(device.take_errors().is_empty());
    }

    #[test]
    fn upload_range_writes_a_window_of_the_source() {
        let (device, ctx) = setup();
        let buffer = Buffer::new(&ctx, BufferTarget::Array, BufferUsage::DynamicDraw).unwrap();
        buffer.upload(TypedData::U8(&[0; 6]));

        buffer
            .upload_range(TypedData::U8(&[9, 8, 7, 6]), 2, 1, Some(2))
            .unwrap();
        assert_eq!(device.contents(buffer.handle()).unwrap(), vec![0, 0, 8, 7, 0, 0]);
        assert_eq!(buffer.byte_len(), 6);
    }

    #[test]
    fn drop_releases_the_handle() {
        let (device, ctx) = setup();
        {
            let _buffer = Buffer::new(&ctx, BufferTarget::Array, BufferUsage::StaticDraw).unwrap();
            assert_eq!(device.live_buffers(), 1);
        }
        assert_eq!(device.live_buffers(), 0);
    }
}
