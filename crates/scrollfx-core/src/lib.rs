pub mod accordion;
pub mod animation;
pub mod config;
pub mod error;
pub mod hover;
pub mod runtime;
pub mod scroll;
pub mod sections;
pub mod viewport;

pub use accordion::{AccordionManager, ItemPhase, NavigationRequest};
pub use animation::{
    EasingType, EasingTypeExt, Property, Scheduler, TargetId, TweenHandle, TweenSpec, TweenState,
    ViewId,
};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use hover::{HoverIntent, HoverPhase};
pub use runtime::{FrameReport, Runtime};
pub use scroll::{derive_transform, BindingHandle, PinnedStack, ScrollRange};
pub use viewport::{Bounds, ScrollState, StaticLayout, Threshold};
