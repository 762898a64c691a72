//! Caller callbacks for a polling run.

use std::fmt;

use crate::remote::PollResult;

type ProgressFn<'a> = Box<dyn FnMut(&PollResult) + Send + 'a>;
type ErrorFn<'a> = Box<dyn FnOnce(&str) + Send + 'a>;

/// Progress and error callbacks, both optional.
///
/// Callbacks run inline on the polling task; a slow callback delays the
/// next attempt.
#[derive(Default)]
pub struct PollHooks<'a> {
    on_progress: Option<ProgressFn<'a>>,
    on_error: Option<ErrorFn<'a>>,
}

impl<'a> PollHooks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with every result, in attempt order, including the final one.
    pub fn on_progress(mut self, f: impl FnMut(&PollResult) + Send + 'a) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Called once with the last error message when the consecutive-error
    /// limit aborts the run.
    pub fn on_error(mut self, f: impl FnOnce(&str) + Send + 'a) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub(crate) fn progress(&mut self, result: &PollResult) {
        if let Some(f) = self.on_progress.as_mut() {
            f(result);
        }
    }

    pub(crate) fn error(&mut self, message: &str) {
        if let Some(f) = self.on_error.take() {
            f(message);
        }
    }
}

impl fmt::Debug for PollHooks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollHooks")
            .field("on_progress", &self.on_progress.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
