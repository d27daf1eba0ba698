use std::cell::Cell;

use super::{Buffer, BufferObject};
use crate::data::TypedData;
use crate::device::{BufferTarget, BufferUsage, DeviceContext, ScalarType};
use crate::error::Result;

/// Vertex indices bound at `ElementArray`.
///
/// The `ElementArray` slot belongs to the bound vertex array: binding or
/// uploading an index buffer while a vertex array is bound attaches it to
/// that vertex array.
#[derive(Debug)]
pub struct IndexBuffer {
    buffer: Buffer,
    index_type: Cell<ScalarType>,
    count: Cell<usize>,
}

impl IndexBuffer {
    /// Allocates, binds and uploads `data`, leaving the buffer bound.
    pub fn new(ctx: &DeviceContext, data: TypedData<'_>, usage: BufferUsage) -> Result<Self> {
        let buffer = Buffer::new(ctx, BufferTarget::ElementArray, usage)?;
        let ibo = Self {
            buffer,
            index_type: Cell::new(data.scalar_type()),
            count: Cell::new(data.len()),
        };
        ibo.upload(data);
        Ok(ibo)
    }

    /// Component type of the last upload (what a draw call passes as index type).
    pub fn index_type(&self) -> ScalarType {
        self.index_type.get()
    }

    /// Number of indices in the last full upload.
    pub fn count(&self) -> usize {
        self.count.get()
    }
}

impl BufferObject for IndexBuffer {
    fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn upload(&self, data: TypedData<'_>) {
        if !matches!(
            data.scalar_type(),
            ScalarType::UnsignedByte | ScalarType::UnsignedShort | ScalarType::UnsignedInt
        ) {
            log::warn!(
                "{}: index data of type {} is not drawable",
                self.buffer.handle(),
                data.scalar_type()
            );
        }
        self.buffer.upload(data);
        self.index_type.set(data.scalar_type());
        self.count.set(data.len());
    }
}
