//! Self re-arming render loop driven by host refresh callbacks.
//!
//! The loop never runs on a timer. Each invocation requests exactly one more
//! refresh from the host, so it follows the display cadence and stops getting
//! called while the host is hidden. Cancellation is synchronous: once
//! [`RenderLoop::cancel`] or [`CancelHandle::cancel`] returns, the update
//! callback is never invoked again.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, warn};

/// Default clamp for a single frame's delta. Longer gaps (a hidden tab, a
/// debugger pause) advance motion by this much instead of jumping.
pub const MAX_FRAME_TIME: f32 = 0.25;

/// Identifies one outstanding refresh request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RefreshToken(pub u64);

/// The host's per-refresh registration primitive.
pub trait RefreshHost {
    /// Ask to be called back on the next display refresh.
    fn request_refresh(&mut self) -> RefreshToken;
    /// Withdraw a request. Unknown or already delivered tokens are ignored.
    fn cancel_refresh(&mut self, token: RefreshToken);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Cancelled,
}

/// Cancels a [`RenderLoop`] without access to the host.
///
/// Cheap to clone. Cancelling twice, or after the loop is dropped, is a no-op.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    state: Rc<Cell<LoopState>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        if self.state.get() != LoopState::Cancelled {
            self.state.set(LoopState::Cancelled);
            debug!("render loop cancelled through handle");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.get() == LoopState::Cancelled
    }

    pub fn state(&self) -> LoopState {
        self.state.get()
    }
}

type UpdateFn<S> = Box<dyn FnMut(&mut S, f32)>;

/// A render loop that owns its per-frame state `S` and passes it, together
/// with the elapsed seconds since the previous frame, to the update callback.
///
/// `Idle -> Running -> Cancelled`. At most one refresh request is outstanding
/// at any time.
pub struct RenderLoop<S> {
    state: S,
    update: UpdateFn<S>,
    lifecycle: Rc<Cell<LoopState>>,
    pending: Option<RefreshToken>,
    last_timestamp: Option<f64>,
    max_frame_time: f32,
    frame_count: u64,
    elapsed: f64,
}

impl<S> RenderLoop<S> {
    pub fn new(state: S, update: impl FnMut(&mut S, f32) + 'static) -> Self {
        Self {
            state,
            update: Box::new(update),
            lifecycle: Rc::new(Cell::new(LoopState::Idle)),
            pending: None,
            last_timestamp: None,
            max_frame_time: MAX_FRAME_TIME,
            frame_count: 0,
            elapsed: 0.0,
        }
    }

    /// Override the per-frame delta clamp (seconds).
    pub fn with_max_frame_time(mut self, seconds: f32) -> Self {
        self.max_frame_time = seconds.max(0.0);
        self
    }

    /// Transition `Idle -> Running` and request the first refresh.
    ///
    /// Starting a running or cancelled loop does nothing and returns the
    /// existing handle.
    pub fn start<H: RefreshHost + ?Sized>(&mut self, host: &mut H) -> CancelHandle {
        if self.lifecycle.get() == LoopState::Idle {
            self.lifecycle.set(LoopState::Running);
            self.pending = Some(host.request_refresh());
            debug!("render loop started");
        }
        self.handle()
    }

    pub fn handle(&self) -> CancelHandle {
        CancelHandle {
            state: Rc::clone(&self.lifecycle),
        }
    }

    /// Host callback for a delivered refresh. `timestamp` is in seconds on
    /// any monotonic clock.
    ///
    /// Returns `true` if the update callback ran. Tokens other than the single
    /// outstanding one are ignored, as is any delivery after cancellation.
    pub fn on_refresh<H: RefreshHost + ?Sized>(
        &mut self,
        host: &mut H,
        token: RefreshToken,
        timestamp: f64,
    ) -> bool {
        if self.pending != Some(token) {
            debug!(?token, "ignoring stale refresh");
            return false;
        }
        self.pending = None;

        if self.lifecycle.get() != LoopState::Running {
            debug!("refresh delivered after cancel, dropping it");
            return false;
        }

        let mut delta = match self.last_timestamp {
            Some(previous) => (timestamp - previous).max(0.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp);

        if delta > self.max_frame_time {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                delta * 1000.0,
                self.max_frame_time * 1000.0
            );
            delta = self.max_frame_time;
        }

        (self.update)(&mut self.state, delta);
        self.frame_count += 1;
        self.elapsed += delta as f64;

        // The update may have cancelled through a captured handle.
        if self.lifecycle.get() == LoopState::Running {
            self.pending = Some(host.request_refresh());
        }
        true
    }

    /// Cancel the loop and withdraw any outstanding request from the host.
    /// Idempotent.
    pub fn cancel<H: RefreshHost + ?Sized>(&mut self, host: &mut H) {
        if self.lifecycle.get() != LoopState::Cancelled {
            self.lifecycle.set(LoopState::Cancelled);
            debug!(frames = self.frame_count, "render loop cancelled");
        }
        if let Some(token) = self.pending.take() {
            host.cancel_refresh(token);
        }
    }

    pub fn loop_state(&self) -> LoopState {
        self.lifecycle.get()
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle.get() == LoopState::Running
    }

    /// Whether a refresh request is outstanding.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The outstanding request, if any.
    pub fn pending_token(&self) -> Option<RefreshToken> {
        self.pending
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Number of update invocations so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Sum of the (clamped) deltas passed to the update callback.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

impl<S> Drop for RenderLoop<S> {
    fn drop(&mut self) {
        self.lifecycle.set(LoopState::Cancelled);
    }
}
