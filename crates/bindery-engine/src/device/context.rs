use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::api::GlApi;
use super::types::{FeedbackHandle, ProgramHandle};

/// Shared handle to the active GPU context.
///
/// Every resource keeps a clone so it can release its GPU object on drop.
/// The context is `!Send`: binding points are global mutable
/// state of a single command stream, and all calls must come from one thread.
#[derive(Clone)]
pub struct DeviceContext {
    inner: Rc<ContextInner>,
}

struct ContextInner {
    api: Box<dyn GlApi>,

    /// Program most recently passed to [`DeviceContext::use_program`].
    active_program: Cell<Option<ProgramHandle>>,

    /// Feedback object with a capture in progress, if any.
    capturing: Cell<Option<FeedbackHandle>>,
}

impl DeviceContext {
    /// Wraps a device call surface.
    pub fn new(api: impl GlApi + 'static) -> Self {
        log::debug!("device context created");
        Self {
            inner: Rc::new(ContextInner {
                api: Box::new(api),
                active_program: Cell::new(None),
                capturing: Cell::new(None),
            }),
        }
    }

    /// Returns the underlying call surface.
    #[inline]
    pub fn api(&self) -> &dyn GlApi {
        self.inner.api.as_ref()
    }

    /// Makes `program` current (or clears the current program).
    ///
    /// Resources resolve names against the program passed to their constructor,
    /// so changing the active program never affects resources built earlier.
    pub fn use_program(&self, program: Option<ProgramHandle>) {
        self.inner.api.use_program(program);
        self.inner.active_program.set(program);
    }

    /// Returns the program most recently made current through this context.
    #[inline]
    pub fn active_program(&self) -> Option<ProgramHandle> {
        self.inner.active_program.get()
    }

    /// Sets the viewport rectangle in physical pixels.
    pub fn set_viewport(&self, x: i32, y: i32, width: u32, height: u32) {
        self.inner.api.viewport(x, y, width, height);
    }

    /// Feedback object whose capture is in progress on this context.
    #[inline]
    pub fn capturing_feedback(&self) -> Option<FeedbackHandle> {
        self.inner.capturing.get()
    }

    pub(crate) fn set_capturing_feedback(&self, feedback: Option<FeedbackHandle>) {
        self.inner.capturing.set(feedback);
    }
}

impl fmt::Debug for DeviceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceContext")
            .field("active_program", &self.inner.active_program.get())
            .field("capturing", &self.inner.capturing.get())
            .finish_non_exhaustive()
    }
}
