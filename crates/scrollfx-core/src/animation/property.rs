//! Animated properties and the targets that own them
//!
//! Targets are registered per view under a stable key (`"services.title"`,
//! `"card.3"`). Retiring a view retires its targets and drops their values,
//! after which every operation naming them is a no-op.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of an owning view (a mounted UI node)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewId(Uuid);

impl ViewId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to an animatable element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

/// A property the rendering layer reads every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Opacity,
    Scale,
    /// Horizontal translation in pixels
    X,
    /// Vertical translation in pixels
    Y,
    /// Width in pixels
    Width,
    /// Height in pixels
    Height,
    /// Width as a percentage of the parent
    WidthPercent,
}

impl Property {
    pub const ALL: [Property; 7] = [
        Property::Opacity,
        Property::Scale,
        Property::X,
        Property::Y,
        Property::Width,
        Property::Height,
        Property::WidthPercent,
    ];

    /// Value of a property nothing has written yet
    pub fn resting_value(self) -> f64 {
        match self {
            Property::Opacity | Property::Scale => 1.0,
            Property::WidthPercent => 100.0,
            Property::X | Property::Y | Property::Width | Property::Height => 0.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Property::Opacity => "opacity",
            Property::Scale => "scale",
            Property::X => "x",
            Property::Y => "y",
            Property::Width => "width",
            Property::Height => "height",
            Property::WidthPercent => "width_percent",
        }
    }
}

#[derive(Debug)]
struct TargetEntry {
    view: ViewId,
    key: String,
    values: HashMap<Property, f64>,
}

/// Keyed registry of live targets and their current property values
#[derive(Debug, Default)]
pub struct Targets {
    next_id: u64,
    entries: HashMap<TargetId, TargetEntry>,
    by_key: HashMap<(ViewId, String), TargetId>,
    /// Views torn down; keys resolved under them stay inert
    retired: HashSet<ViewId>,
}

impl Targets {
    /// Get or create the target registered under `key` for `view`
    ///
    /// A retired view gets an id that is never live.
    pub fn resolve(&mut self, view: ViewId, key: &str) -> TargetId {
        if let Some(id) = self.by_key.get(&(view, key.to_string())) {
            return *id;
        }
        self.next_id += 1;
        let id = TargetId(self.next_id);
        if self.retired.contains(&view) {
            return id;
        }
        self.entries.insert(
            id,
            TargetEntry {
                view,
                key: key.to_string(),
                values: HashMap::new(),
            },
        );
        self.by_key.insert((view, key.to_string()), id);
        id
    }

    #[inline]
    pub fn is_live(&self, target: TargetId) -> bool {
        self.entries.contains_key(&target)
    }

    pub fn owner(&self, target: TargetId) -> Option<ViewId> {
        self.entries.get(&target).map(|entry| entry.view)
    }

    pub fn key(&self, target: TargetId) -> Option<&str> {
        self.entries.get(&target).map(|entry| entry.key.as_str())
    }

    /// Current value, or `None` for a retired target
    pub fn value(&self, target: TargetId, property: Property) -> Option<f64> {
        self.entries
            .get(&target)
            .map(|entry| entry.values.get(&property).copied().unwrap_or(property.resting_value()))
    }

    /// Write a value; returns false for a retired target
    pub fn set(&mut self, target: TargetId, property: Property, value: f64) -> bool {
        match self.entries.get_mut(&target) {
            Some(entry) => {
                entry.values.insert(property, value);
                true
            }
            None => false,
        }
    }

    /// Targets owned by `view`
    pub fn owned_by(&self, view: ViewId) -> Vec<TargetId> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.view == view)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Drop every target of `view`; returns how many were retired
    pub fn retire_view(&mut self, view: ViewId) -> usize {
        self.retired.insert(view);
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.view != view);
        self.by_key.retain(|(owner, _), _| *owner != view);
        before - self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_stable_per_view() {
        let mut targets = Targets::default();
        let view = ViewId::new();
        let other = ViewId::new();

        let a = targets.resolve(view, "card.0");
        assert_eq!(targets.resolve(view, "card.0"), a);
        assert_ne!(targets.resolve(view, "card.1"), a);
        assert_ne!(targets.resolve(other, "card.0"), a);
        assert_eq!(targets.key(a), Some("card.0"));
        assert_eq!(targets.owner(a), Some(view));
    }

    #[test]
    fn test_unwritten_values_rest() {
        let mut targets = Targets::default();
        let t = targets.resolve(ViewId::new(), "title");
        assert_eq!(targets.value(t, Property::Opacity), Some(1.0));
        assert_eq!(targets.value(t, Property::Y), Some(0.0));
        assert!(targets.set(t, Property::Y, 100.0));
        assert_eq!(targets.value(t, Property::Y), Some(100.0));
    }

    #[test]
    fn test_retire_view_drops_targets() {
        let mut targets = Targets::default();
        let view = ViewId::new();
        let keep = ViewId::new();
        let t = targets.resolve(view, "title");
        let k = targets.resolve(keep, "title");

        assert_eq!(targets.retire_view(view), 1);
        assert!(!targets.is_live(t));
        assert!(targets.is_live(k));
        assert_eq!(targets.value(t, Property::Opacity), None);
        assert!(!targets.set(t, Property::Opacity, 0.5));

        // Re-resolving after retirement yields an inert id, never the old one
        let late = targets.resolve(view, "title");
        assert_ne!(late, t);
        assert!(!targets.is_live(late));
        assert!(!targets.set(late, Property::Opacity, 0.5));
        assert_eq!(targets.value(late, Property::Opacity), None);
    }
}
