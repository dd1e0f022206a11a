//! Scroll progress bindings
//!
//! A binding maps the scroll offset inside a range to a progress value in
//! [0, 1]. Ranges are either absolute offsets or named like
//! `"start start"` / `"end end"` (container edge meets viewport edge) and are
//! resolved against the container's bounds on every notification.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::animation::timing::map_range;
use crate::animation::{TargetId, ViewId};
use crate::viewport::{Bounds, Edge, ElementGeometry, ScrollState};

/// A container edge meeting a viewport edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedOffset {
    pub container: Edge,
    pub viewport: Edge,
}

impl NamedOffset {
    /// Scroll offset at which the two edges meet
    #[inline]
    pub fn resolve(&self, container: Bounds, viewport_height: f64) -> f64 {
        container.edge(self.container) - viewport_height * self.viewport.fraction()
    }
}

impl FromStr for NamedOffset {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::Error::Config(format!("invalid scroll offset: {}", s));
        let mut words = s.split_whitespace();
        let container = words.next().and_then(Edge::parse).ok_or_else(invalid)?;
        let viewport = words.next().and_then(Edge::parse).ok_or_else(invalid)?;
        if words.next().is_some() {
            return Err(invalid());
        }
        Ok(Self { container, viewport })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollRange {
    Absolute { start: f64, end: f64 },
    Named { start: NamedOffset, end: NamedOffset },
}

impl ScrollRange {
    pub fn absolute(start: f64, end: f64) -> Self {
        ScrollRange::Absolute { start, end }
    }

    /// `ScrollRange::named("start start", "end end")`
    pub fn named(start: &str, end: &str) -> crate::Result<Self> {
        Ok(ScrollRange::Named {
            start: start.parse()?,
            end: end.parse()?,
        })
    }

    /// Concrete offsets; named ranges need the container's bounds
    #[inline]
    pub fn resolve(&self, container: Option<Bounds>, viewport_height: f64) -> Option<(f64, f64)> {
        match *self {
            ScrollRange::Absolute { start, end } => Some((start, end)),
            ScrollRange::Named { start, end } => {
                let bounds = container?;
                Some((
                    start.resolve(bounds, viewport_height),
                    end.resolve(bounds, viewport_height),
                ))
            }
        }
    }
}

/// Validate resolved offsets
pub fn validate_range(start: f64, end: f64) -> crate::Result<()> {
    if end > start {
        Ok(())
    } else {
        Err(crate::Error::InvalidRange { start, end })
    }
}

/// Linear map of `progress` from `input` onto `output`, clamped
///
/// Stateless; recomputed per frame.
#[inline]
pub fn derive_transform(progress: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    map_range(progress, input, output)
}

/// Progress within a scroll range
#[derive(Debug, Clone)]
pub struct ScrollBinding {
    container: Option<TargetId>,
    range: ScrollRange,
    progress: f64,
    /// Range currently resolves to an empty span; progress held at 0
    degraded: bool,
    /// Invalid range already logged
    reported: bool,
}

impl ScrollBinding {
    pub fn new(container: Option<TargetId>, range: ScrollRange) -> Self {
        let mut binding = Self {
            container,
            range,
            progress: 0.0,
            degraded: false,
            reported: false,
        };
        if let ScrollRange::Absolute { start, end } = range {
            binding.check(start, end);
        }
        binding
    }

    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn range(&self) -> ScrollRange {
        self.range
    }

    /// Recompute progress for a scroll notification
    ///
    /// Pure arithmetic; no allocation.
    pub fn update(&mut self, state: ScrollState, geometry: &dyn ElementGeometry) -> f64 {
        let container = self.container.and_then(|c| geometry.bounds(c));
        let Some((start, end)) = self.range.resolve(container, state.viewport_height) else {
            return self.progress;
        };
        if !self.check(start, end) {
            return self.progress;
        }
        self.progress = ((state.scroll_top - start) / (end - start)).clamp(0.0, 1.0);
        self.progress
    }

    // Holds progress at 0 while the range is empty; logs the first time only
    fn check(&mut self, start: f64, end: f64) -> bool {
        match validate_range(start, end) {
            Ok(()) => {
                self.degraded = false;
                true
            }
            Err(e) => {
                if !self.reported {
                    warn!(error = %e, "Scroll range is empty, progress held at 0");
                    self.reported = true;
                }
                self.degraded = true;
                self.progress = 0.0;
                false
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingHandle(u64);

impl fmt::Display for BindingHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "binding#{}", self.0)
    }
}

/// All live bindings, keyed by handle
#[derive(Debug, Default)]
pub struct ScrollBindings {
    next_id: u64,
    bindings: BTreeMap<BindingHandle, (ViewId, ScrollBinding)>,
}

impl ScrollBindings {
    pub fn bind(&mut self, view: ViewId, binding: ScrollBinding) -> BindingHandle {
        self.next_id += 1;
        let handle = BindingHandle(self.next_id);
        self.bindings.insert(handle, (view, binding));
        handle
    }

    pub fn unbind(&mut self, handle: BindingHandle) -> bool {
        self.bindings.remove(&handle).is_some()
    }

    pub fn unbind_view(&mut self, view: ViewId) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|_, (owner, _)| *owner != view);
        before - self.bindings.len()
    }

    pub fn progress(&self, handle: BindingHandle) -> Option<f64> {
        self.bindings.get(&handle).map(|(_, b)| b.progress())
    }

    pub fn get(&self, handle: BindingHandle) -> Option<&ScrollBinding> {
        self.bindings.get(&handle).map(|(_, b)| b)
    }

    /// Recompute every binding
    pub fn update_all(&mut self, state: ScrollState, geometry: &dyn ElementGeometry) {
        for (_, binding) in self.bindings.values_mut() {
            binding.update(state, geometry);
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Scheduler;
    use crate::viewport::StaticLayout;

    #[test]
    fn test_absolute_progress_clamps() {
        let layout = StaticLayout::new();
        let mut binding = ScrollBinding::new(None, ScrollRange::absolute(0.0, 1000.0));
        let seq: Vec<f64> = [0.0, 500.0, 1000.0, 1500.0]
            .iter()
            .map(|top| binding.update(ScrollState::new(*top, 800.0), &layout))
            .collect();
        assert_eq!(seq, vec![0.0, 0.5, 1.0, 1.0]);
        assert_eq!(binding.update(ScrollState::new(-200.0, 800.0), &layout), 0.0);
    }

    #[test]
    fn test_named_range_start_start_end_end() {
        let mut scheduler = Scheduler::default();
        let container = scheduler.target(ViewId::new(), "portfolio");
        let mut layout = StaticLayout::new();
        // 3000px tall container at y=2000 in an 1000px viewport: range [2000, 4000]
        layout.place(container, Bounds::new(2000.0, 3000.0));

        let range = ScrollRange::named("start start", "end end").unwrap();
        let mut binding = ScrollBinding::new(Some(container), range);
        assert_eq!(binding.update(ScrollState::new(1000.0, 1000.0), &layout), 0.0);
        assert_eq!(binding.update(ScrollState::new(3000.0, 1000.0), &layout), 0.5);
        assert_eq!(binding.update(ScrollState::new(4000.0, 1000.0), &layout), 1.0);
    }

    #[test]
    fn test_invalid_range_degrades_to_zero() {
        let layout = StaticLayout::new();
        let mut binding = ScrollBinding::new(None, ScrollRange::absolute(500.0, 500.0));
        assert!(binding.is_degraded());
        assert_eq!(binding.update(ScrollState::new(10_000.0, 800.0), &layout), 0.0);
    }

    #[test]
    fn test_named_range_degrades_when_container_too_short() {
        let mut scheduler = Scheduler::default();
        let container = scheduler.target(ViewId::new(), "short");
        let mut layout = StaticLayout::new();
        // Shorter than the viewport: "end end" resolves before "start start"
        layout.place(container, Bounds::new(100.0, 200.0));
        let range = ScrollRange::named("start start", "end end").unwrap();
        let mut binding = ScrollBinding::new(Some(container), range);
        assert!(!binding.is_degraded());
        assert_eq!(binding.update(ScrollState::new(150.0, 800.0), &layout), 0.0);
        assert!(binding.is_degraded());
    }

    #[test]
    fn test_named_range_recovers_after_resize() {
        let mut scheduler = Scheduler::default();
        let container = scheduler.target(ViewId::new(), "short");
        let mut layout = StaticLayout::new();
        layout.place(container, Bounds::new(100.0, 200.0));
        let range = ScrollRange::named("start start", "end end").unwrap();
        let mut binding = ScrollBinding::new(Some(container), range);

        // 800px viewport: empty range
        assert_eq!(binding.update(ScrollState::new(150.0, 800.0), &layout), 0.0);
        assert!(binding.is_degraded());

        // 100px viewport: range [100, 200]
        assert_eq!(binding.update(ScrollState::new(150.0, 100.0), &layout), 0.5);
        assert!(!binding.is_degraded());

        // Shrinking the container again holds progress at 0
        layout.place(container, Bounds::new(100.0, 50.0));
        assert_eq!(binding.update(ScrollState::new(150.0, 100.0), &layout), 0.0);
        assert!(binding.is_degraded());
    }

    #[test]
    fn test_invalid_absolute_range_stays_degraded() {
        let layout = StaticLayout::new();
        let mut binding = ScrollBinding::new(None, ScrollRange::absolute(900.0, 100.0));
        for top in [0.0, 500.0, 2000.0] {
            assert_eq!(binding.update(ScrollState::new(top, 800.0), &layout), 0.0);
            assert!(binding.is_degraded());
        }
    }

    #[test]
    fn test_derive_transform() {
        assert_eq!(derive_transform(0.0, (0.0, 1.0), (1.0, 0.8)), 1.0);
        assert_eq!(derive_transform(1.0, (0.0, 1.0), (1.0, 0.8)), 0.8);
        assert_eq!(derive_transform(0.25, (0.5, 1.0), (1.0, 0.8)), 1.0);
        assert!((derive_transform(0.75, (0.5, 1.0), (1.0, 0.8)) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_parse_named_offset() {
        assert!("start start".parse::<NamedOffset>().is_ok());
        assert!("start".parse::<NamedOffset>().is_err());
        assert!("middle end".parse::<NamedOffset>().is_err());
    }
}
