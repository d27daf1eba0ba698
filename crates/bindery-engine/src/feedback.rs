//! Transform feedback sessions.
//!
//! A session owns a transform feedback object and a fixed list of output
//! ranges. The Nth range receives the Nth varying declared when the capture
//! program was linked; a mismatch between the two counts is the caller's
//! responsibility and is not detected here.
//!
//! State machine:
//!
//! ```text
//! Unbound --bind--> Bound --begin--> Capturing --end--> Bound --unbind--> Unbound
//! ```

use std::cell::Cell;
use std::fmt;

use crate::buffer::BufferObject;
use crate::device::{
    BufferHandle, DeviceContext, FeedbackHandle, FeedbackPrimitive, IndexedTarget,
};
use crate::error::{ResourceError, ResourceKind, Result};

/// Where a session stands in its bind/capture cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FeedbackState {
    Unbound,
    Bound,
    Capturing,
}

impl fmt::Display for FeedbackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FeedbackState::Unbound => "unbound",
            FeedbackState::Bound => "bound",
            FeedbackState::Capturing => "capturing",
        })
    }
}

/// A byte range of a buffer that receives one captured varying.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FeedbackOutput {
    pub buffer: BufferHandle,
    pub offset: usize,
    pub size: usize,
}

impl FeedbackOutput {
    pub fn new(buffer: &dyn BufferObject, offset: usize, size: usize) -> Self {
        Self {
            buffer: buffer.handle(),
            offset,
            size,
        }
    }

    /// The whole store of `buffer` as of its last full upload.
    pub fn whole(buffer: &dyn BufferObject) -> Self {
        Self::new(buffer, 0, buffer.buffer().byte_len())
    }
}

/// Binds `outputs` to consecutive indexed feedback slots starting at
/// `start_index`.
///
/// The slots belong to whichever transform feedback object is bound; this
/// helper is not tied to a session.
pub fn bind_feedback_outputs(ctx: &DeviceContext, outputs: &[FeedbackOutput], start_index: u32) {
    let api = ctx.api();
    for (slot, out) in (start_index..).zip(outputs) {
        api.bind_buffer_range(
            IndexedTarget::TransformFeedback,
            slot,
            out.buffer,
            out.offset,
            out.size,
        );
    }
}

/// A transform feedback object with its output bindings.
///
/// The tracked [`FeedbackState`] reflects this session's own transitions.
/// Binding another feedback object directly through the device is not
/// observed. While one session captures, every other session on the same
/// context refuses to be created, bound, unbound or begun.
#[derive(Debug)]
pub struct TransformFeedback {
    ctx: DeviceContext,
    handle: FeedbackHandle,
    outputs: Vec<FeedbackOutput>,
    state: Cell<FeedbackState>,
    primitive: Cell<Option<FeedbackPrimitive>>,
}

impl TransformFeedback {
    /// Allocates a feedback object, binds it, and binds `outputs[i]` to
    /// feedback slot `i`. The session starts in [`FeedbackState::Bound`].
    ///
    /// Fails with [`ResourceError::InvalidFeedbackState`] while another
    /// session on `ctx` is capturing, before anything is allocated.
    pub fn new(ctx: &DeviceContext, outputs: &[FeedbackOutput]) -> Result<Self> {
        if ctx.capturing_feedback().is_some() {
            return Err(ResourceError::InvalidFeedbackState {
                op: "create",
                state: FeedbackState::Capturing,
            });
        }
        let handle = ctx
            .api()
            .create_transform_feedback()
            .ok_or(ResourceError::ResourceCreation {
                kind: ResourceKind::TransformFeedback,
                target: None,
            })?;

        let session = Self {
            ctx: ctx.clone(),
            handle,
            outputs: outputs.to_vec(),
            state: Cell::new(FeedbackState::Unbound),
            primitive: Cell::new(None),
        };
        session.bind()?;
        bind_feedback_outputs(ctx, &session.outputs, 0);

        log::debug!("{handle}: {} output binding(s)", outputs.len());
        Ok(session)
    }

    /// Binds the feedback object. Leaves this session's own capture untouched.
    pub fn bind(&self) -> Result<()> {
        self.expect_no_foreign_capture("bind")?;
        self.ctx.api().bind_transform_feedback(Some(self.handle));
        if self.state.get() == FeedbackState::Unbound {
            self.state.set(FeedbackState::Bound);
        }
        Ok(())
    }

    /// Binds the default feedback object. Not allowed while any session on
    /// this context is capturing.
    pub fn unbind(&self) -> Result<()> {
        self.expect_not_capturing("unbind")?;
        self.expect_no_foreign_capture("unbind")?;
        self.ctx.api().bind_transform_feedback(None);
        self.state.set(FeedbackState::Unbound);
        Ok(())
    }

    /// Starts capturing `primitive`s. Only valid in [`FeedbackState::Bound`].
    ///
    /// Rebinds this feedback object first, so the capture always lands in this
    /// session's outputs even if another object was bound since.
    pub fn begin(&self, primitive: FeedbackPrimitive) -> Result<()> {
        let state = self.state.get();
        if state != FeedbackState::Bound {
            return Err(ResourceError::InvalidFeedbackState { op: "begin", state });
        }
        self.expect_no_foreign_capture("begin")?;

        let api = self.ctx.api();
        api.bind_transform_feedback(Some(self.handle));
        api.begin_transform_feedback(primitive);
        self.ctx.set_capturing_feedback(Some(self.handle));
        self.state.set(FeedbackState::Capturing);
        self.primitive.set(Some(primitive));
        Ok(())
    }

    /// Closes the capture region. Only valid in [`FeedbackState::Capturing`].
    pub fn end(&self) -> Result<()> {
        let state = self.state.get();
        if state != FeedbackState::Capturing {
            return Err(ResourceError::InvalidFeedbackState { op: "end", state });
        }
        self.ctx.api().end_transform_feedback();
        self.ctx.set_capturing_feedback(None);
        self.state.set(FeedbackState::Bound);
        self.primitive.set(None);
        Ok(())
    }

    #[inline]
    pub fn state(&self) -> FeedbackState {
        self.state.get()
    }

    /// Primitive of the capture in progress.
    #[inline]
    pub fn primitive(&self) -> Option<FeedbackPrimitive> {
        self.primitive.get()
    }

    #[inline]
    pub fn handle(&self) -> FeedbackHandle {
        self.handle
    }

    pub fn outputs(&self) -> &[FeedbackOutput] {
        &self.outputs
    }

    fn expect_not_capturing(&self, op: &'static str) -> Result<()> {
        match self.state.get() {
            FeedbackState::Capturing => Err(ResourceError::InvalidFeedbackState {
                op,
                state: FeedbackState::Capturing,
            }),
            _ => Ok(()),
        }
    }

    fn expect_no_foreign_capture(&self, op: &'static str) -> Result<()> {
        match self.ctx.capturing_feedback() {
            Some(other) if other != self.handle => Err(ResourceError::InvalidFeedbackState {
                op,
                state: FeedbackState::Capturing,
            }),
            _ => Ok(()),
        }
    }
}

impl Drop for TransformFeedback {
    fn drop(&mut self) {
        if self.state.get() == FeedbackState::Capturing {
            log::warn!("{} dropped while capturing; ending capture", self.handle);
            self.ctx.api().end_transform_feedback();
            self.ctx.set_capturing_feedback(None);
        }
        self.ctx.api().delete_transform_feedback(self.handle);
        log::debug!("released {}", self.handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::FeedbackBuffer;
    use crate::device::soft::SoftDevice;

    fn setup() -> (SoftDevice, DeviceContext) {
        let device = SoftDevice::new();
        let ctx = DeviceContext::new(device.clone());
        (device, ctx)
    }

    #[test]
    fn starts_bound() {
        let (device, ctx) = setup();
        let tf = TransformFeedback::new(&ctx, &[]).unwrap();
        assert_eq!(tf.state(), FeedbackState::Bound);
        assert_eq!(device.bound_feedback(), Some(tf.handle()));
    }

    #[test]
    fn begin_requires_bound() {
        let (_device, ctx) = setup();
        let tf = TransformFeedback::new(&ctx, &[]).unwrap();
        tf.unbind().unwrap();

        assert_eq!(
            tf.begin(FeedbackPrimitive::Points),
            Err(ResourceError::InvalidFeedbackState {
                op: "begin",
                state: FeedbackState::Unbound
            })
        );
    }

    #[test]
    fn nested_begin_is_rejected() {
        let (device, ctx) = setup();
        let tf = TransformFeedback::new(&ctx, &[]).unwrap();
        tf.begin(FeedbackPrimitive::Lines).unwrap();

        assert!(tf.begin(FeedbackPrimitive::Lines).is_err());
        assert_eq!(tf.primitive(), Some(FeedbackPrimitive::Lines));
        assert_eq!(device.count_calls("begin_transform_feedback"), 1);
    }

    #[test]
    fn unbind_while_capturing_is_rejected() {
        let (device, ctx) = setup();
        let tf = TransformFeedback::new(&ctx, &[]).unwrap();
        tf.begin(FeedbackPrimitive::Points).unwrap();

        assert!(tf.unbind().is_err());
        assert_eq!(tf.state(), FeedbackState::Capturing);
        assert_eq!(device.bound_feedback(), Some(tf.handle()));
    }

    #[test]
    fn outputs_bind_from_start_index() {
        let (device, ctx) = setup();
        let a = FeedbackBuffer::zeroed(&ctx, 32).unwrap();
        let b = FeedbackBuffer::zeroed(&ctx, 32).unwrap();

        bind_feedback_outputs(
            &ctx,
            &[FeedbackOutput::new(&a, 0, 16), FeedbackOutput::whole(&b)],
            2,
        );

        let slot2 = device.indexed_binding(IndexedTarget::TransformFeedback, 2).unwrap();
        let slot3 = device.indexed_binding(IndexedTarget::TransformFeedback, 3).unwrap();
        assert_eq!((slot2.buffer, slot2.size), (a.handle(), Some(16)));
        assert_eq!((slot3.buffer, slot3.size), (b.handle(), Some(32)));
        assert!(device.indexed_binding(IndexedTarget::TransformFeedback, 0).is_none());
    }

    #[test]
    fn begin_rebinds_its_own_object() {
        let (device, ctx) = setup();
        let first = TransformFeedback::new(&ctx, &[]).unwrap();
        let second = TransformFeedback::new(&ctx, &[]).unwrap();
        assert_eq!(device.bound_feedback(), Some(second.handle()));

        first.begin(FeedbackPrimitive::Points).unwrap();
        assert_eq!(device.bound_feedback(), Some(first.handle()));
        assert_eq!(ctx.capturing_feedback(), Some(first.handle()));

        first.end().unwrap();
        assert_eq!(ctx.capturing_feedback(), None);
        assert!(device.take_errors().is_empty());
    }

    #[test]
    fn other_sessions_wait_for_a_running_capture() {
        let (device, ctx) = setup();
        let first = TransformFeedback::new(&ctx, &[]).unwrap();
        let second = TransformFeedback::new(&ctx, &[]).unwrap();
        first.begin(FeedbackPrimitive::Triangles).unwrap();
        device.clear_calls();

        let blocked = ResourceError::InvalidFeedbackState {
            op: "bind",
            state: FeedbackState::Capturing,
        };
        assert_eq!(second.bind(), Err(blocked));
        assert!(second.begin(FeedbackPrimitive::Points).is_err());
        assert!(second.unbind().is_err());
        assert!(matches!(
            TransformFeedback::new(&ctx, &[]),
            Err(ResourceError::InvalidFeedbackState { op: "create", .. })
        ));
        assert!(device.calls().is_empty());
        assert_eq!(device.live_feedbacks(), 2);

        first.end().unwrap();
        second.begin(FeedbackPrimitive::Points).unwrap();
        assert_eq!(device.bound_feedback(), Some(second.handle()));
        second.end().unwrap();
        assert!(device.take_errors().is_empty());
    }

    #[test]
    fn drop_while_capturing_ends_the_capture() {
        let (device, ctx) = setup();
        {
            let tf = TransformFeedback::new(&ctx, &[]).unwrap();
            tf.begin(FeedbackPrimitive::Triangles).unwrap();
        }
        assert_eq!(device.live_feedbacks(), 0);
        assert_eq!(ctx.capturing_feedback(), None);
        assert!(device.take_errors().is_empty());
    }
}
