use super::attributes::{AttributeDesc, AttributePointer, AttributeTable};
use super::{Buffer, BufferObject};
use crate::data::TypedData;
use crate::device::{BufferTarget, BufferUsage, DeviceContext, GlApi};
use crate::error::Result;
use crate::program::ProgramInterface;

/// Vertex data bound at `Array`, with its attribute layout.
///
/// Outside a vertex array, attribute pointer state is only meaningful for the
/// buffer bound when it was specified, so [`bind`](BufferObject::bind) always
/// re-issues the enable, pointer and divisor calls for every attribute.
/// A [`VertexArray`](crate::vertex_array::VertexArray) captures those calls
/// once and replays them with a single bind.
#[derive(Debug)]
pub struct VertexBuffer {
    buffer: Buffer,
    attributes: AttributeTable,
}

impl VertexBuffer {
    /// Resolves `attributes` against `program`, then allocates, binds, uploads
    /// `data` and applies every attribute pointer.
    ///
    /// Attribute resolution happens before allocation: a missing attribute
    /// fails with [`AttributeNotFound`](crate::ResourceError::AttributeNotFound)
    /// without a buffer ever existing.
    pub fn new(
        ctx: &DeviceContext,
        program: &dyn ProgramInterface,
        data: TypedData<'_>,
        attributes: &[AttributeDesc],
        usage: BufferUsage,
    ) -> Result<Self> {
        let attributes = AttributeTable::resolve(program, attributes)?;
        let buffer = Buffer::new(ctx, BufferTarget::Array, usage)?;

        buffer.upload(data);
        for ptr in &attributes {
            ptr.apply(ctx.api());
        }

        log::debug!(
            "{}: {} attribute(s) resolved against {}",
            buffer.handle(),
            attributes.len(),
            attributes.program()
        );
        Ok(Self { buffer, attributes })
    }

    pub fn attributes(&self) -> &AttributeTable {
        &self.attributes
    }

    pub fn find_attribute(&self, name: &str) -> Result<&AttributePointer> {
        self.attributes.find(name)
    }

    /// Enables and specifies the named attributes.
    ///
    /// Binds this buffer at `Array`. All names are looked up before any call
    /// is issued.
    pub fn enable_attributes(&self, names: &[&str]) -> Result<()> {
        let ptrs = self.lookup(names)?;
        self.buffer.bind();
        for ptr in ptrs {
            ptr.apply(self.api());
        }
        Ok(())
    }

    /// Disables the named attribute arrays.
    pub fn disable_attributes(&self, names: &[&str]) -> Result<()> {
        let ptrs = self.lookup(names)?;
        for ptr in ptrs {
            self.api().disable_vertex_attrib_array(ptr.location);
        }
        Ok(())
    }

    /// Enables and specifies every attribute. Binds this buffer at `Array`.
    pub fn enable_all_attributes(&self) {
        self.buffer.bind();
        for ptr in &self.attributes {
            ptr.apply(self.api());
        }
    }

    pub fn disable_all_attributes(&self) {
        for ptr in &self.attributes {
            self.api().disable_vertex_attrib_array(ptr.location);
        }
    }

    /// Writes `data` into the slots of one attribute.
    ///
    /// Element `i` (one group of `size` components) lands at byte
    /// `offset + i * stride`; other bytes of the store are left untouched.
    /// Binds this buffer at `Array`.
    pub fn upload_attribute(&self, name: &str, data: TypedData<'_>) -> Result<()> {
        let ptr = *self.attributes.find(name)?;
        if data.scalar_type() != ptr.ty {
            log::warn!(
                "attribute \"{name}\" is {} but {} data was supplied",
                ptr.ty,
                data.scalar_type()
            );
        }

        let chunks = data.as_bytes().chunks_exact(ptr.element_size());
        if !chunks.remainder().is_empty() {
            log::warn!(
                "attribute \"{name}\": ignoring {} trailing byte(s) of a partial element",
                chunks.remainder().len()
            );
        }

        self.buffer.bind();
        let stride = ptr.element_stride();
        for (i, element) in chunks.enumerate() {
            self.buffer.sub_data(ptr.offset as usize + i * stride, element);
        }
        Ok(())
    }

    fn lookup(&self, names: &[&str]) -> Result<Vec<AttributePointer>> {
        names
            .iter()
            .map(|name| self.attributes.find(name).copied())
            .collect()
    }

    fn api(&self) -> &dyn GlApi {
        self.buffer.context().api()
    }
}

impl BufferObject for VertexBuffer {
    fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Binds at `Array` and re-applies every attribute pointer.
    fn bind(&self) {
        self.enable_all_attributes();
    }
}
