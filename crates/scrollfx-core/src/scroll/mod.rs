//! Scroll progress mapper
//!
//! - `progress` - Scroll ranges, bindings and derived transforms
//! - `stack` - Pinned stack scaling driven by a binding's progress

pub mod progress;
pub mod stack;

pub use progress::{
    derive_transform, validate_range, BindingHandle, NamedOffset, ScrollBinding, ScrollBindings,
    ScrollRange,
};
pub use stack::{PinnedStack, StackItem};
