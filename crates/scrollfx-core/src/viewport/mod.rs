//! Viewport trigger registry
//!
//! - `geometry` - Scroll state, element bounds and the layout traits
//! - `threshold` - `"top 85%"` style visibility thresholds
//! - `registry` - One-shot trigger registrations

pub mod geometry;
pub mod registry;
pub mod threshold;

pub use geometry::{Bounds, ContentMeasure, Edge, ElementGeometry, ScrollState, StaticLayout};
pub use registry::{OnEnter, TriggerHandle, TriggerRegistry};
pub use threshold::Threshold;
