//! Per-frame motion for the universe view.
//!
//! Rotating groups accumulate angle from elapsed real time, so their relative
//! speeds hold under any frame rate. The [`RenderLoop`] re-arms itself once
//! per host refresh and owns the motion state it updates.

pub mod drift;
pub mod host;
pub mod rotation;
pub mod scheduler;

pub use drift::Drift;
pub use host::ManualRefreshHost;
pub use rotation::{RotationState, SpinningGroup, update};
pub use scheduler::{CancelHandle, LoopState, RefreshHost, RefreshToken, RenderLoop};
