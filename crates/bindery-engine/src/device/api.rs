use super::types::{
    BufferHandle, BufferTarget, BufferUsage, FeedbackHandle, FeedbackPrimitive, IndexedTarget,
    ProgramHandle, ScalarType, VertexArrayHandle,
};

/// The GPU call surface consumed by every resource.
///
/// Methods map one-to-one onto driver calls of a binding-point API and take
/// `&self`: implementations own their interior state the same way a driver
/// context does. Calls are immediate and never block; misuse is reported by
/// the implementation, not by this trait.
///
/// Binding points touched by each call:
/// - `bind_buffer`, `buffer_data`, `buffer_sub_data`: the generic slot of `target`
///   (`ElementArray` lives in the bound vertex array)
/// - `bind_buffer_base` / `bind_buffer_range`: the indexed slot and the generic slot
/// - `vertex_attrib_*`: attribute state of the bound vertex array, sourcing from
///   the buffer bound at `Array`
/// - transform feedback calls: the bound transform feedback object
pub trait GlApi {
    // ── buffers ───────────────────────────────────────────────────────────

    /// Allocates a buffer name. Returns `None` when the driver has none to give.
    fn create_buffer(&self) -> Option<BufferHandle>;
    fn delete_buffer(&self, buffer: BufferHandle);
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferHandle>);
    fn bind_buffer_base(&self, target: IndexedTarget, index: u32, buffer: Option<BufferHandle>);
    fn bind_buffer_range(
        &self,
        target: IndexedTarget,
        index: u32,
        buffer: BufferHandle,
        offset: usize,
        size: usize,
    );

    /// (Re)specifies the store of the buffer bound at `target`.
    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage);

    /// Overwrites part of the store of the buffer bound at `target`.
    fn buffer_sub_data(&self, target: BufferTarget, dst_offset: usize, data: &[u8]);

    /// Copies the store of `buffer` back to the host.
    ///
    /// Not every device can read buffers back; the default reports `None`.
    fn read_buffer(&self, buffer: BufferHandle) -> Option<Vec<u8>> {
        let _ = buffer;
        None
    }

    // ── vertex attributes ─────────────────────────────────────────────────

    fn enable_vertex_attrib_array(&self, location: u32);
    fn disable_vertex_attrib_array(&self, location: u32);
    fn vertex_attrib_pointer(
        &self,
        location: u32,
        size: u8,
        ty: ScalarType,
        normalized: bool,
        stride: u32,
        offset: u32,
    );
    fn vertex_attrib_divisor(&self, location: u32, divisor: u32);

    // ── vertex arrays ─────────────────────────────────────────────────────

    fn create_vertex_array(&self) -> Option<VertexArrayHandle>;
    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle);
    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayHandle>);

    // ── transform feedback ────────────────────────────────────────────────

    fn create_transform_feedback(&self) -> Option<FeedbackHandle>;
    fn delete_transform_feedback(&self, feedback: FeedbackHandle);
    fn bind_transform_feedback(&self, feedback: Option<FeedbackHandle>);
    fn begin_transform_feedback(&self, primitive: FeedbackPrimitive);
    fn end_transform_feedback(&self);

    // ── programs & context ────────────────────────────────────────────────

    fn use_program(&self, program: Option<ProgramHandle>);
    fn uniform_block_binding(&self, program: ProgramHandle, block_index: u32, binding: u32);
    fn viewport(&self, x: i32, y: i32, width: u32, height: u32);
}
