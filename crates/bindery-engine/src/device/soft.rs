//! In-memory reference device.
//!
//! [`SoftDevice`] implements [`GlApi`] without a GPU. It models every binding
//! point the resources touch, keeps buffer stores in host memory, and records
//! vertex-array and transform-feedback object state the way a driver does:
//!
//! - the `ElementArray` slot and all vertex attribute state belong to the bound
//!   vertex array (or to the default one when none is bound)
//! - indexed transform feedback slots belong to the bound feedback object
//! - indexed uniform slots and the other generic slots are context-global
//!
//! Misuse does not panic. It is recorded as a [`SoftError`] and the offending
//! call is ignored, mirroring the driver error flag.
//!
//! The device is a cheap clonable handle; keep one clone for inspection after
//! moving another into a [`DeviceContext`](super::DeviceContext).

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use super::api::GlApi;
use super::types::{
    BufferHandle, BufferTarget, BufferUsage, FeedbackHandle, FeedbackPrimitive, IndexedTarget,
    ProgramHandle, ScalarType, VertexArrayHandle,
};
use crate::program::{ProgramLayout, SoftProgram};

/// Category of a recorded device error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SoftErrorKind {
    InvalidValue,
    InvalidOperation,
}

/// A driver-level error recorded by [`SoftDevice`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SoftError {
    pub kind: SoftErrorKind,
    pub message: String,
}

impl fmt::Display for SoftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Vertex attribute state held by a vertex array.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribState {
    pub enabled: bool,
    /// Buffer bound at `Array` when the pointer was specified.
    pub buffer: Option<BufferHandle>,
    pub size: u8,
    pub ty: ScalarType,
    pub normalized: bool,
    pub stride: u32,
    pub offset: u32,
    pub divisor: u32,
}

impl Default for VertexAttribState {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer: None,
            size: 4,
            ty: ScalarType::Float,
            normalized: false,
            stride: 0,
            offset: 0,
            divisor: 0,
        }
    }
}

/// Contents of an indexed binding slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct IndexedBinding {
    pub buffer: BufferHandle,
    pub offset: usize,
    /// `None` when the whole buffer is bound (`bind_buffer_base`).
    pub size: Option<usize>,
}

#[derive(Debug, Default)]
struct SoftBuffer {
    data: Vec<u8>,
    usage: Option<BufferUsage>,
}

#[derive(Debug, Default)]
struct ArrayState {
    element_buffer: Option<BufferHandle>,
    attribs: BTreeMap<u32, VertexAttribState>,
}

#[derive(Debug, Default)]
struct FeedbackObject {
    outputs: BTreeMap<u32, IndexedBinding>,
    active: Option<FeedbackPrimitive>,
    /// Bytes written into each output slot since the last begin.
    cursors: BTreeMap<u32, usize>,
}

#[derive(Debug, Default)]
struct SoftState {
    next_name: u32,
    fail_allocations: bool,

    buffers: HashMap<BufferHandle, SoftBuffer>,
    /// Generic slots, except `ElementArray` which lives in the vertex array.
    bindings: HashMap<BufferTarget, BufferHandle>,
    uniform_slots: BTreeMap<u32, IndexedBinding>,

    default_array: ArrayState,
    arrays: HashMap<VertexArrayHandle, ArrayState>,
    bound_array: Option<VertexArrayHandle>,

    default_feedback: FeedbackObject,
    feedbacks: HashMap<FeedbackHandle, FeedbackObject>,
    bound_feedback: Option<FeedbackHandle>,

    program: Option<ProgramHandle>,
    block_bindings: HashMap<(ProgramHandle, u32), u32>,
    viewport: Option<(i32, i32, u32, u32)>,

    calls: Vec<String>,
    errors: Vec<SoftError>,
}

impl SoftState {
    fn alloc_name(&mut self) -> Option<u32> {
        if self.fail_allocations {
            return None;
        }
        self.next_name += 1;
        Some(self.next_name)
    }

    fn record(&mut self, call: String) {
        log::trace!("gl: {call}");
        self.calls.push(call);
    }

    fn error(&mut self, kind: SoftErrorKind, message: impl Into<String>) {
        let message = message.into();
        log::warn!("soft device error ({kind:?}): {message}");
        self.errors.push(SoftError { kind, message });
    }

    fn array(&self) -> &ArrayState {
        self.bound_array
            .and_then(|h| self.arrays.get(&h))
            .unwrap_or(&self.default_array)
    }

    fn array_mut(&mut self) -> &mut ArrayState {
        let Self {
            bound_array,
            arrays,
            default_array,
            ..
        } = self;
        match bound_array.and_then(|h| arrays.get_mut(&h)) {
            Some(array) => array,
            None => default_array,
        }
    }

    fn feedback(&self) -> &FeedbackObject {
        self.bound_feedback
            .and_then(|h| self.feedbacks.get(&h))
            .unwrap_or(&self.default_feedback)
    }

    fn feedback_mut(&mut self) -> &mut FeedbackObject {
        let Self {
            bound_feedback,
            feedbacks,
            default_feedback,
            ..
        } = self;
        match bound_feedback.and_then(|h| feedbacks.get_mut(&h)) {
            Some(feedback) => feedback,
            None => default_feedback,
        }
    }

    fn bound(&self, target: BufferTarget) -> Option<BufferHandle> {
        match target {
            BufferTarget::ElementArray => self.array().element_buffer,
            other => self.bindings.get(&other).copied(),
        }
    }

    fn set_bound(&mut self, target: BufferTarget, buffer: Option<BufferHandle>) {
        match (target, buffer) {
            (BufferTarget::ElementArray, b) => self.array_mut().element_buffer = b,
            (t, Some(b)) => {
                self.bindings.insert(t, b);
            }
            (t, None) => {
                self.bindings.remove(&t);
            }
        }
    }

    fn bound_store(&mut self, target: BufferTarget) -> Option<&mut SoftBuffer> {
        let Some(handle) = self.bound(target) else {
            self.error(
                SoftErrorKind::InvalidOperation,
                format!("no buffer bound to {target}"),
            );
            return None;
        };
        self.buffers.get_mut(&handle)
    }

    fn check_buffer(&mut self, buffer: Option<BufferHandle>, call: &str) -> bool {
        match buffer {
            Some(h) if !self.buffers.contains_key(&h) => {
                self.error(
                    SoftErrorKind::InvalidOperation,
                    format!("{call}: {h} does not exist"),
                );
                false
            }
            _ => true,
        }
    }

    fn bind_indexed(&mut self, target: IndexedTarget, index: u32, binding: Option<IndexedBinding>) {
        if target == IndexedTarget::TransformFeedback && self.feedback().active.is_some() {
            self.error(
                SoftErrorKind::InvalidOperation,
                "feedback output slots cannot change while capturing",
            );
            return;
        }

        let slots = match target {
            IndexedTarget::Uniform => &mut self.uniform_slots,
            IndexedTarget::TransformFeedback => &mut self.feedback_mut().outputs,
        };
        match binding {
            Some(b) => {
                slots.insert(index, b);
            }
            None => {
                slots.remove(&index);
            }
        }
        self.set_bound(target.buffer_target(), binding.map(|b| b.buffer));
    }
}

/// Formats an optional name the way the driver sees it (0 = null).
fn raw(name: Option<u32>) -> u32 {
    name.unwrap_or(0)
}

/// In-memory [`GlApi`] implementation with inspection helpers.
#[derive(Clone, Default)]
pub struct SoftDevice {
    state: Rc<RefCell<SoftState>>,
}

impl SoftDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent object allocation fail (returns no name).
    pub fn set_fail_allocations(&self, fail: bool) {
        self.state.borrow_mut().fail_allocations = fail;
    }

    /// Allocates a program name and pairs it with a static reflection table.
    pub fn create_program(&self, layout: ProgramLayout) -> Option<SoftProgram> {
        let mut s = self.state.borrow_mut();
        let handle = s.alloc_name().and_then(ProgramHandle::from_raw)?;
        s.record(format!("create_program() -> {}", handle.raw()));
        Some(SoftProgram::new(handle, layout))
    }

    // ── binding points ────────────────────────────────────────────────────

    /// Buffer currently bound at `target`.
    pub fn bound_buffer(&self, target: BufferTarget) -> Option<BufferHandle> {
        self.state.borrow().bound(target)
    }

    /// Contents of an indexed slot. Feedback slots are read from the bound
    /// transform feedback object.
    pub fn indexed_binding(&self, target: IndexedTarget, index: u32) -> Option<IndexedBinding> {
        let s = self.state.borrow();
        match target {
            IndexedTarget::Uniform => s.uniform_slots.get(&index).copied(),
            IndexedTarget::TransformFeedback => s.feedback().outputs.get(&index).copied(),
        }
    }

    pub fn bound_vertex_array(&self) -> Option<VertexArrayHandle> {
        self.state.borrow().bound_array
    }

    /// Attribute state at `location` in the bound vertex array.
    pub fn vertex_attrib(&self, location: u32) -> VertexAttribState {
        self.state
            .borrow()
            .array()
            .attribs
            .get(&location)
            .copied()
            .unwrap_or_default()
    }

    pub fn bound_feedback(&self) -> Option<FeedbackHandle> {
        self.state.borrow().bound_feedback
    }

    /// Primitive of the capture in progress on the bound feedback object.
    pub fn feedback_active(&self) -> Option<FeedbackPrimitive> {
        self.state.borrow().feedback().active
    }

    pub fn current_program(&self) -> Option<ProgramHandle> {
        self.state.borrow().program
    }

    /// Binding point assigned to a program's uniform block.
    pub fn block_binding(&self, program: ProgramHandle, block_index: u32) -> Option<u32> {
        self.state
            .borrow()
            .block_bindings
            .get(&(program, block_index))
            .copied()
    }

    pub fn viewport_rect(&self) -> Option<(i32, i32, u32, u32)> {
        self.state.borrow().viewport
    }

    // ── storage ───────────────────────────────────────────────────────────

    /// Current store of `buffer`, or `None` if it does not exist.
    pub fn contents(&self, buffer: BufferHandle) -> Option<Vec<u8>> {
        self.state
            .borrow()
            .buffers
            .get(&buffer)
            .map(|b| b.data.clone())
    }

    /// Usage hint of the last full upload into `buffer`.
    pub fn usage(&self, buffer: BufferHandle) -> Option<BufferUsage> {
        self.state
            .borrow()
            .buffers
            .get(&buffer)
            .and_then(|b| b.usage)
    }

    pub fn live_buffers(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    pub fn live_vertex_arrays(&self) -> usize {
        self.state.borrow().arrays.len()
    }

    pub fn live_feedbacks(&self) -> usize {
        self.state.borrow().feedbacks.len()
    }

    /// Simulates vertex-stage output: appends `data` to output slot `index` of
    /// the bound feedback object while a capture is active.
    ///
    /// Returns the number of bytes written, clipped to the bound range.
    pub fn emit_feedback(&self, index: u32, data: &[u8]) -> usize {
        let mut s = self.state.borrow_mut();
        if s.feedback().active.is_none() {
            s.error(SoftErrorKind::InvalidOperation, "no capture in progress");
            return 0;
        }
        let Some(binding) = s.feedback().outputs.get(&index).copied() else {
            s.error(
                SoftErrorKind::InvalidOperation,
                format!("feedback output slot {index} is unbound"),
            );
            return 0;
        };

        let cursor = s.feedback().cursors.get(&index).copied().unwrap_or(0);
        let Some(store) = s.buffers.get_mut(&binding.buffer) else {
            return 0;
        };
        let limit = binding
            .size
            .unwrap_or_else(|| store.data.len().saturating_sub(binding.offset));
        let start = binding.offset + cursor;
        let n = data
            .len()
            .min(limit.saturating_sub(cursor))
            .min(store.data.len().saturating_sub(start));
        if n == 0 {
            return 0;
        }
        store.data[start..start + n].copy_from_slice(&data[..n]);

        s.feedback_mut().cursors.insert(index, cursor + n);
        n
    }

    // ── diagnostics ───────────────────────────────────────────────────────

    /// Calls issued so far, formatted as `name(args)`.
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    /// Number of recorded calls whose name is `name`.
    pub fn count_calls(&self, name: &str) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| c.split('(').next() == Some(name))
            .count()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Drains the recorded device errors.
    pub fn take_errors(&self) -> Vec<SoftError> {
        std::mem::take(&mut self.state.borrow_mut().errors)
    }
}

impl fmt::Debug for SoftDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.state.borrow();
        f.debug_struct("SoftDevice")
            .field("buffers", &s.buffers.len())
            .field("vertex_arrays", &s.arrays.len())
            .field("feedbacks", &s.feedbacks.len())
            .field("errors", &s.errors.len())
            .finish()
    }
}

impl GlApi for SoftDevice {
    fn create_buffer(&self) -> Option<BufferHandle> {
        let mut s = self.state.borrow_mut();
        let handle = s.alloc_name().and_then(BufferHandle::from_raw);
        if let Some(h) = handle {
            s.buffers.insert(h, SoftBuffer::default());
        }
        s.record(format!("create_buffer() -> {}", raw(handle.map(BufferHandle::raw))));
        handle
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        let mut s = self.state.borrow_mut();
        s.record(format!("delete_buffer({})", buffer.raw()));
        if s.buffers.remove(&buffer).is_none() {
            return;
        }
        s.bindings.retain(|_, b| *b != buffer);
        s.uniform_slots.retain(|_, b| b.buffer != buffer);
        let array = s.array_mut();
        if array.element_buffer == Some(buffer) {
            array.element_buffer = None;
        }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferHandle>) {
        let mut s = self.state.borrow_mut();
        s.record(format!("bind_buffer({target}, {})", raw(buffer.map(BufferHandle::raw))));
        if s.check_buffer(buffer, "bind_buffer") {
            s.set_bound(target, buffer);
        }
    }

    fn bind_buffer_base(&self, target: IndexedTarget, index: u32, buffer: Option<BufferHandle>) {
        let mut s = self.state.borrow_mut();
        s.record(format!(
            "bind_buffer_base({target}, {index}, {})",
            raw(buffer.map(BufferHandle::raw))
        ));
        if s.check_buffer(buffer, "bind_buffer_base") {
            let binding = buffer.map(|buffer| IndexedBinding {
                buffer,
                offset: 0,
                size: None,
            });
            s.bind_indexed(target, index, binding);
        }
    }

    fn bind_buffer_range(
        &self,
        target: IndexedTarget,
        index: u32,
        buffer: BufferHandle,
        offset: usize,
        size: usize,
    ) {
        let mut s = self.state.borrow_mut();
        s.record(format!(
            "bind_buffer_range({target}, {index}, {}, {offset}, {size})",
            buffer.raw()
        ));
        if size == 0 {
            s.error(SoftErrorKind::InvalidValue, "bind_buffer_range: zero size");
            return;
        }
        if s.check_buffer(Some(buffer), "bind_buffer_range") {
            let binding = IndexedBinding {
                buffer,
                offset,
                size: Some(size),
            };
            s.bind_indexed(target, index, Some(binding));
        }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        let mut s = self.state.borrow_mut();
        s.record(format!("buffer_data({target}, {} bytes, {usage:?})", data.len()));
        if let Some(store) = s.bound_store(target) {
            store.data = data.to_vec();
            store.usage = Some(usage);
        }
    }

    fn buffer_sub_data(&self, target: BufferTarget, dst_offset: usize, data: &[u8]) {
        let mut s = self.state.borrow_mut();
        s.record(format!(
            "buffer_sub_data({target}, {dst_offset}, {} bytes)",
            data.len()
        ));
        let Some(store) = s.bound_store(target) else { return };
        let end = dst_offset.checked_add(data.len());
        match end {
            Some(end) if end <= store.data.len() => {
                store.data[dst_offset..end].copy_from_slice(data);
            }
            _ => {
                let (len, available) = (data.len(), store.data.len());
                s.error(
                    SoftErrorKind::InvalidValue,
                    format!("sub-data of {len} bytes at {dst_offset} overruns {available} bytes"),
                );
            }
        }
    }

    fn read_buffer(&self, buffer: BufferHandle) -> Option<Vec<u8>> {
        self.contents(buffer)
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        let mut s = self.state.borrow_mut();
        s.record(format!("enable_vertex_attrib_array({location})"));
        s.array_mut().attribs.entry(location).or_default().enabled = true;
    }

    fn disable_vertex_attrib_array(&self, location: u32) {
        let mut s = self.state.borrow_mut();
        s.record(format!("disable_vertex_attrib_array({location})"));
        s.array_mut().attribs.entry(location).or_default().enabled = false;
    }

    fn vertex_attrib_pointer(
        &self,
        location: u32,
        size: u8,
        ty: ScalarType,
        normalized: bool,
        stride: u32,
        offset: u32,
    ) {
        let mut s = self.state.borrow_mut();
        s.record(format!(
            "vertex_attrib_pointer({location}, {size}, {ty}, {normalized}, {stride}, {offset})"
        ));
        if !(1..=4).contains(&size) {
            s.error(
                SoftErrorKind::InvalidValue,
                format!("vertex_attrib_pointer: size {size} is outside 1..=4"),
            );
            return;
        }
        let Some(buffer) = s.bound(BufferTarget::Array) else {
            s.error(
                SoftErrorKind::InvalidOperation,
                "vertex_attrib_pointer: no buffer bound to ARRAY_BUFFER",
            );
            return;
        };
        let attrib = s.array_mut().attribs.entry(location).or_default();
        attrib.buffer = Some(buffer);
        attrib.size = size;
        attrib.ty = ty;
        attrib.normalized = normalized;
        attrib.stride = stride;
        attrib.offset = offset;
    }

    fn vertex_attrib_divisor(&self, location: u32, divisor: u32) {
        let mut s = self.state.borrow_mut();
        s.record(format!("vertex_attrib_divisor({location}, {divisor})"));
        s.array_mut().attribs.entry(location).or_default().divisor = divisor;
    }

    fn create_vertex_array(&self) -> Option<VertexArrayHandle> {
        let mut s = self.state.borrow_mut();
        let handle = s.alloc_name().and_then(VertexArrayHandle::from_raw);
        if let Some(h) = handle {
            s.arrays.insert(h, ArrayState::default());
        }
        s.record(format!(
            "create_vertex_array() -> {}",
            raw(handle.map(VertexArrayHandle::raw))
        ));
        handle
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle) {
        let mut s = self.state.borrow_mut();
        s.record(format!("delete_vertex_array({})", vertex_array.raw()));
        s.arrays.remove(&vertex_array);
        if s.bound_array == Some(vertex_array) {
            s.bound_array = None;
        }
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayHandle>) {
        let mut s = self.state.borrow_mut();
        s.record(format!(
            "bind_vertex_array({})",
            raw(vertex_array.map(VertexArrayHandle::raw))
        ));
        match vertex_array {
            Some(h) if !s.arrays.contains_key(&h) => {
                s.error(
                    SoftErrorKind::InvalidOperation,
                    format!("bind_vertex_array: {h} does not exist"),
                );
            }
            other => s.bound_array = other,
        }
    }

    fn create_transform_feedback(&self) -> Option<FeedbackHandle> {
        let mut s = self.state.borrow_mut();
        let handle = s.alloc_name().and_then(FeedbackHandle::from_raw);
        if let Some(h) = handle {
            s.feedbacks.insert(h, FeedbackObject::default());
        }
        s.record(format!(
            "create_transform_feedback() -> {}",
            raw(handle.map(FeedbackHandle::raw))
        ));
        handle
    }

    fn delete_transform_feedback(&self, feedback: FeedbackHandle) {
        let mut s = self.state.borrow_mut();
        s.record(format!("delete_transform_feedback({})", feedback.raw()));
        if s.feedbacks.get(&feedback).is_some_and(|f| f.active.is_some()) {
            s.error(
                SoftErrorKind::InvalidOperation,
                format!("delete_transform_feedback: {feedback} is capturing"),
            );
            return;
        }
        s.feedbacks.remove(&feedback);
        if s.bound_feedback == Some(feedback) {
            s.bound_feedback = None;
        }
    }

    fn bind_transform_feedback(&self, feedback: Option<FeedbackHandle>) {
        let mut s = self.state.borrow_mut();
        s.record(format!(
            "bind_transform_feedback({})",
            raw(feedback.map(FeedbackHandle::raw))
        ));
        if s.feedback().active.is_some() && s.bound_feedback != feedback {
            s.error(
                SoftErrorKind::InvalidOperation,
                "bind_transform_feedback: a capture is in progress",
            );
            return;
        }
        match feedback {
            Some(h) if !s.feedbacks.contains_key(&h) => {
                s.error(
                    SoftErrorKind::InvalidOperation,
                    format!("bind_transform_feedback: {h} does not exist"),
                );
            }
            other => s.bound_feedback = other,
        }
    }

    fn begin_transform_feedback(&self, primitive: FeedbackPrimitive) {
        let mut s = self.state.borrow_mut();
        s.record(format!("begin_transform_feedback({primitive:?})"));
        if s.feedback().active.is_some() {
            s.error(
                SoftErrorKind::InvalidOperation,
                "begin_transform_feedback: already capturing",
            );
            return;
        }
        let feedback = s.feedback_mut();
        feedback.active = Some(primitive);
        feedback.cursors.clear();
    }

    fn end_transform_feedback(&self) {
        let mut s = self.state.borrow_mut();
        s.record("end_transform_feedback()".to_string());
        if s.feedback().active.is_none() {
            s.error(
                SoftErrorKind::InvalidOperation,
                "end_transform_feedback: no capture in progress",
            );
            return;
        }
        s.feedback_mut().active = None;
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        let mut s = self.state.borrow_mut();
        s.record(format!("use_program({})", raw(program.map(ProgramHandle::raw))));
        s.program = program;
    }

    fn uniform_block_binding(&self, program: ProgramHandle, block_index: u32, binding: u32) {
        let mut s = self.state.borrow_mut();
        s.record(format!(
            "uniform_block_binding({}, {block_index}, {binding})",
            program.raw()
        ));
        s.block_bindings.insert((program, block_index), binding);
    }

    fn viewport(&self, x: i32, y: i32, width: u32, height: u32) {
        let mut s = self.state.borrow_mut();
        s.record(format!("viewport({x}, {y}, {width}, {height})"));
        s.viewport = Some((x, y, width, height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with(dev: &SoftDevice, target: BufferTarget, bytes: &[u8]) -> BufferHandle {
        let h = dev.create_buffer().unwrap();
        dev.bind_buffer(target, Some(h));
        dev.buffer_data(target, bytes, BufferUsage::StaticDraw);
        h
    }

    #[test]
    fn element_slot_follows_the_bound_vertex_array() {
        let dev = SoftDevice::new();
        let ibo = buffer_with(&dev, BufferTarget::ElementArray, &[0, 1, 2]);
        let vao = dev.create_vertex_array().unwrap();

        dev.bind_vertex_array(Some(vao));
        assert_eq!(dev.bound_buffer(BufferTarget::ElementArray), None);

        dev.bind_vertex_array(None);
        assert_eq!(dev.bound_buffer(BufferTarget::ElementArray), Some(ibo));
    }

    #[test]
    fn sub_data_past_the_store_is_rejected() {
        let dev = SoftDevice::new();
        let h = buffer_with(&dev, BufferTarget::Array, &[0; 8]);

        dev.buffer_sub_data(BufferTarget::Array, 6, &[1, 2, 3]);
        let errors = dev.take_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, SoftErrorKind::InvalidValue);
        assert_eq!(dev.contents(h).unwrap(), vec![0; 8]);
    }

    #[test]
    fn pointer_without_array_buffer_is_an_error() {
        let dev = SoftDevice::new();
        dev.vertex_attrib_pointer(0, 2, ScalarType::Float, false, 0, 0);
        assert_eq!(dev.take_errors()[0].kind, SoftErrorKind::InvalidOperation);
    }

    #[test]
    fn deleting_a_bound_buffer_clears_its_slots() {
        let dev = SoftDevice::new();
        let h = buffer_with(&dev, BufferTarget::Uniform, &[0; 16]);
        dev.bind_buffer_base(IndexedTarget::Uniform, 2, Some(h));

        dev.delete_buffer(h);
        assert_eq!(dev.bound_buffer(BufferTarget::Uniform), None);
        assert_eq!(dev.indexed_binding(IndexedTarget::Uniform, 2), None);
        assert_eq!(dev.live_buffers(), 0);
    }

    #[test]
    fn emitted_feedback_appends_within_the_bound_range() {
        let dev = SoftDevice::new();
        let out = buffer_with(&dev, BufferTarget::Array, &[0; 8]);
        let tf = dev.create_transform_feedback().unwrap();
        dev.bind_transform_feedback(Some(tf));
        dev.bind_buffer_range(IndexedTarget::TransformFeedback, 0, out, 2, 4);

        dev.begin_transform_feedback(FeedbackPrimitive::Points);
        assert_eq!(dev.emit_feedback(0, &[1, 2]), 2);
        assert_eq!(dev.emit_feedback(0, &[3, 4, 5]), 2);
        dev.end_transform_feedback();

        assert_eq!(dev.contents(out).unwrap(), vec![0, 0, 1, 2, 3, 4, 0, 0]);
        assert!(dev.take_errors().is_empty());
    }

    #[test]
    fn failed_allocation_yields_no_name() {
        let dev = SoftDevice::new();
        dev.set_fail_allocations(true);
        assert!(dev.create_buffer().is_none());
        assert!(dev.create_vertex_array().is_none());
        assert!(dev.create_transform_feedback().is_none());
        assert_eq!(dev.live_buffers(), 0);
    }
}
