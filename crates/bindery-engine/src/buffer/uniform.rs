use std::cell::RefCell;

use super::{Buffer, BufferObject};
use crate::data::TypedData;
use crate::device::{BufferTarget, BufferUsage, DeviceContext, IndexedTarget, ProgramHandle};
use crate::error::{ResourceError, Result};
use crate::program::ProgramInterface;

/// Size multiple every full uniform upload is padded to.
///
/// Some devices reject or corrupt uniform stores that are not a multiple of
/// 16 bytes.
pub const UNIFORM_ALIGNMENT: usize = 16;

/// Rounds `len` up to the next multiple of `align` (a power of two).
#[inline]
pub const fn padded_len(len: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    (len + align - 1) & !(align - 1)
}

/// Storage for one uniform block of a program.
///
/// Full uploads go through an internal scratch buffer padded with zeros to
/// [`UNIFORM_ALIGNMENT`]; the raw input never reaches the device directly.
/// The scratch allocation is kept and reused across uploads.
#[derive(Debug)]
pub struct UniformBuffer {
    buffer: Buffer,
    program: ProgramHandle,
    block_index: u32,
    binding: u32,
    scratch: RefCell<Vec<u8>>,
}

impl UniformBuffer {
    /// Creates storage for `block_name`, bound at the slot equal to its block index.
    pub fn new(
        ctx: &DeviceContext,
        program: &dyn ProgramInterface,
        block_name: &str,
        data: TypedData<'_>,
        usage: BufferUsage,
    ) -> Result<Self> {
        Self::with_binding(ctx, program, block_name, data, None, usage)
    }

    /// Creates storage for `block_name` and assigns the block to `binding`
    /// (default: the block index).
    ///
    /// Resolves the block before allocating, so a missing block leaks nothing.
    /// Leaves the buffer bound at `Uniform` and at the indexed slot `binding`.
    pub fn with_binding(
        ctx: &DeviceContext,
        program: &dyn ProgramInterface,
        block_name: &str,
        data: TypedData<'_>,
        binding: Option<u32>,
        usage: BufferUsage,
    ) -> Result<Self> {
        let block_index = program.uniform_block_index(block_name).ok_or_else(|| {
            ResourceError::UniformBlockNotFound {
                block: block_name.to_string(),
                program: program.handle(),
            }
        })?;
        let binding = binding.unwrap_or(block_index);

        let ubo = Self {
            buffer: Buffer::new(ctx, BufferTarget::Uniform, usage)?,
            program: program.handle(),
            block_index,
            binding,
            scratch: RefCell::new(Vec::new()),
        };

        ubo.bind();
        ubo.upload(data);
        ctx.api()
            .uniform_block_binding(ubo.program, block_index, binding);
        log::debug!(
            "uniform block \"{block_name}\" (index {block_index}) of {} -> slot {binding}",
            ubo.program
        );
        Ok(ubo)
    }

    pub fn block_index(&self) -> u32 {
        self.block_index
    }

    /// Indexed uniform slot this buffer binds to.
    pub fn binding(&self) -> u32 {
        self.binding
    }

    /// Program the block index was resolved against.
    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    /// Capacity of the retained scratch buffer.
    pub fn scratch_capacity(&self) -> usize {
        self.scratch.borrow().capacity()
    }
}

impl BufferObject for UniformBuffer {
    fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Binds at `Uniform` and at the indexed slot [`binding`](Self::binding).
    fn bind(&self) {
        self.buffer.bind();
        self.buffer.context().api().bind_buffer_base(
            IndexedTarget::Uniform,
            self.binding,
            Some(self.buffer.handle()),
        );
    }

    /// Clears the indexed slot, then the generic `Uniform` slot.
    fn unbind(&self) {
        self.buffer
            .context()
            .api()
            .bind_buffer_base(IndexedTarget::Uniform, self.binding, None);
        self.buffer.unbind();
    }

    /// Pads `data` to [`UNIFORM_ALIGNMENT`] in the scratch buffer and uploads that.
    ///
    /// Binds at `Uniform` only; the indexed slot keeps referring to this buffer.
    fn upload(&self, data: TypedData<'_>) {
        let bytes = data.as_bytes();
        let mut scratch = self.scratch.borrow_mut();
        scratch.clear();
        scratch.extend_from_slice(bytes);
        scratch.resize(padded_len(bytes.len(), UNIFORM_ALIGNMENT), 0);
        self.buffer.upload_bytes(&scratch);
    }
}
