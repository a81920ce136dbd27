//! In-process refresh host for headless runs and tests.

use crate::scheduler::{RefreshHost, RefreshToken, RenderLoop};

/// A refresh host driven by explicit calls instead of a display.
///
/// Requests queue until [`ManualRefreshHost::take_due`] or
/// [`ManualRefreshHost::refresh`] delivers them. While hidden, nothing is
/// delivered and requests stay queued, which pauses any loop attached to it.
#[derive(Debug)]
pub struct ManualRefreshHost {
    next_token: u64,
    queued: Vec<RefreshToken>,
    visible: bool,
}

impl ManualRefreshHost {
    pub fn new() -> Self {
        Self {
            next_token: 1,
            queued: Vec::new(),
            visible: true,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Requests waiting for the next refresh.
    pub fn pending_count(&self) -> usize {
        self.queued.len()
    }

    /// Drain every queued request for this refresh. Empty while hidden.
    ///
    /// Callers that share the host between several loops route each token
    /// themselves; [`ManualRefreshHost::refresh`] serves one loop at a time.
    pub fn take_due(&mut self) -> Vec<RefreshToken> {
        if !self.visible {
            return Vec::new();
        }
        std::mem::take(&mut self.queued)
    }

    /// Deliver one refresh at `timestamp` seconds to `render_loop`. Returns
    /// how many update invocations ran.
    ///
    /// Only the token `render_loop` is waiting on leaves the queue. Requests
    /// made by other loops on this host stay queued for their own refresh.
    pub fn refresh<S>(&mut self, render_loop: &mut RenderLoop<S>, timestamp: f64) -> usize {
        if !self.visible {
            return 0;
        }
        let Some(token) = render_loop.pending_token() else {
            return 0;
        };
        let Some(index) = self.queued.iter().position(|t| *t == token) else {
            return 0;
        };
        self.queued.remove(index);
        usize::from(render_loop.on_refresh(self, token, timestamp))
    }
}

impl Default for ManualRefreshHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshHost for ManualRefreshHost {
    fn request_refresh(&mut self) -> RefreshToken {
        let token = RefreshToken(self.next_token);
        self.next_token += 1;
        self.queued.push(token);
        token
    }

    fn cancel_refresh(&mut self, token: RefreshToken) {
        self.queued.retain(|t| *t != token);
    }
}
