//! Animation scheduler (tween engine)
//!
//! ## Atoms
//! - `easing` - Pure easing curves (power, expo, back)
//! - `timing` - Progress and interpolation helpers
//! - `property` - Views, targets and the values the renderer reads
//!
//! ## Molecules
//! - `tween` - Tween specs and live tween state
//! - `timer` - One-shot grace timers
//! - `scheduler` - Overlap-cancelling tween scheduler

pub mod easing;
pub mod property;
pub mod scheduler;
pub mod timer;
pub mod timing;
pub mod tween;

pub use easing::{EasingType, EasingTypeExt};
pub use property::{Property, TargetId, ViewId};
pub use scheduler::Scheduler;
pub use timer::{TimerHandle, Timers};
pub use tween::{PropertyDelta, TweenHandle, TweenSpec, TweenState};
