//! Vertex array objects.

use crate::buffer::{BufferObject, IndexBuffer, VertexBuffer};
use crate::device::{BufferHandle, BufferTarget, DeviceContext, VertexArrayHandle};
use crate::error::{ResourceError, ResourceKind, Result};

/// Captured vertex input state: attribute pointers of a set of vertex buffers
/// plus an optional index buffer, restored by a single [`bind`](Self::bind).
///
/// The vertex array references its buffers but does not own them; keep them
/// alive for as long as the vertex array is drawn from.
#[derive(Debug)]
pub struct VertexArray {
    ctx: DeviceContext,
    handle: VertexArrayHandle,
    vertex_buffers: Vec<BufferHandle>,
    index_buffer: Option<BufferHandle>,
}

impl VertexArray {
    /// Allocates a vertex array and records the given buffers into it.
    ///
    /// Each vertex buffer is bound in order (re-issuing its attribute pointers
    /// into the new vertex array), then the index buffer if any. On return no
    /// vertex array is bound and the `ElementArray` slot is null, whether or not
    /// an index buffer was supplied, so no index buffer bound here can leak
    /// into a vertex array constructed later without one.
    ///
    /// Mutates: the vertex array binding, `Array`, `ElementArray`.
    pub fn new(
        ctx: &DeviceContext,
        vertex_buffers: &[&VertexBuffer],
        index_buffer: Option<&IndexBuffer>,
    ) -> Result<Self> {
        let api = ctx.api();
        let handle = api
            .create_vertex_array()
            .ok_or(ResourceError::ResourceCreation {
                kind: ResourceKind::VertexArray,
                target: None,
            })?;

        api.bind_vertex_array(Some(handle));
        for vbo in vertex_buffers {
            vbo.bind();
        }
        if let Some(ibo) = index_buffer {
            ibo.bind();
        }
        api.bind_vertex_array(None);
        api.bind_buffer(BufferTarget::ElementArray, None);

        let vao = Self {
            ctx: ctx.clone(),
            handle,
            vertex_buffers: vertex_buffers.iter().map(|vbo| vbo.handle()).collect(),
            index_buffer: index_buffer.map(|ibo| ibo.handle()),
        };
        log::debug!(
            "{handle}: {} vertex buffer(s), index buffer: {:?}",
            vao.vertex_buffers.len(),
            vao.index_buffer.map(BufferHandle::raw)
        );
        Ok(vao)
    }

    /// Restores the captured attribute pointers and index buffer association.
    pub fn bind(&self) {
        self.ctx.api().bind_vertex_array(Some(self.handle));
    }

    /// Binds no vertex array. Binding another vertex array has the same effect
    /// on this one, so calling this is optional.
    pub fn unbind(&self) {
        self.ctx.api().bind_vertex_array(None);
    }

    #[inline]
    pub fn handle(&self) -> VertexArrayHandle {
        self.handle
    }

    /// Vertex buffers recorded at construction, in order.
    pub fn vertex_buffers(&self) -> &[BufferHandle] {
        &self.vertex_buffers
    }

    pub fn index_buffer(&self) -> Option<BufferHandle> {
        self.index_buffer
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        self.ctx.api().delete_vertex_array(self.handle);
        log::debug!("released {}", self.handle);
    }
}
