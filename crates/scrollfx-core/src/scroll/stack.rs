//! Pinned, progressively scaled stack
//!
//! N items share a pinned region. Item `i` recedes over the sub-range
//! `[i/N, 1]` of the container's progress, scaling from 1.0 down to its
//! floor. Earlier items get lower floors so later ones overtake them.

use crate::config::StackConfig;

use super::progress::derive_transform;

/// Scale and pin position of one stack item at some progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackItem {
    pub index: usize,
    pub scale: f64,
    /// Distance from the viewport top at which the item is pinned, in px
    pub sticky_top: f64,
}

#[derive(Debug, Clone)]
pub struct PinnedStack {
    count: usize,
    config: StackConfig,
}

impl PinnedStack {
    pub fn new(count: usize, config: StackConfig) -> Self {
        Self { count, config }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `max(min_scale, 1 - (N - i - 1) * step)`
    pub fn target_floor(&self, index: usize) -> f64 {
        let above = self.count.saturating_sub(index + 1) as f64;
        (1.0 - above * self.config.scale_step).max(self.config.min_scale)
    }

    /// Progress sub-range over which item `index` recedes
    #[inline]
    pub fn item_range(&self, index: usize) -> (f64, f64) {
        if self.count == 0 {
            return (0.0, 1.0);
        }
        (index as f64 / self.count as f64, 1.0)
    }

    /// Scale of item `index` at container progress `progress`
    #[inline]
    pub fn scale_at(&self, index: usize, progress: f64) -> f64 {
        derive_transform(
            progress,
            self.item_range(index),
            (1.0, self.target_floor(index)),
        )
    }

    pub fn sticky_offset(&self, index: usize) -> f64 {
        self.config.sticky_base_px + index as f64 * self.config.sticky_step_px
    }

    pub fn item(&self, index: usize, progress: f64) -> StackItem {
        StackItem {
            index,
            scale: self.scale_at(index, progress),
            sticky_top: self.sticky_offset(index),
        }
    }

    /// Every item at `progress`, front of the stack last
    pub fn items(&self, progress: f64) -> impl Iterator<Item = StackItem> + '_ {
        (0..self.count).map(move |i| self.item(i, progress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(n: usize) -> PinnedStack {
        PinnedStack::new(n, StackConfig::default())
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_floors_for_three_items() {
        let s = stack(3);
        assert!(approx(s.target_floor(0), 0.8));
        assert!(approx(s.target_floor(1), 0.9));
        assert!(approx(s.target_floor(2), 1.0));
    }

    #[test]
    fn test_floor_never_below_minimum() {
        let s = stack(12);
        assert_eq!(s.target_floor(0), 0.5);
        assert!(s.items(1.0).all(|item| item.scale >= 0.5));
    }

    #[test]
    fn test_scale_follows_sub_range() {
        let s = stack(2);
        // Item 1 starts receding at progress 0.5, but its floor is 1.0
        assert_eq!(s.scale_at(1, 0.75), 1.0);
        // Item 0 recedes over the full range to 0.9
        assert_eq!(s.scale_at(0, 0.0), 1.0);
        assert!(approx(s.scale_at(0, 0.5), 0.95));
        assert!(approx(s.scale_at(0, 1.0), 0.9));
    }

    #[test]
    fn test_sticky_offsets() {
        let s = stack(3);
        let tops: Vec<f64> = s.items(0.0).map(|item| item.sticky_top).collect();
        assert_eq!(tops, vec![250.0, 270.0, 290.0]);
    }

    #[test]
    fn test_empty_stack() {
        let s = stack(0);
        assert!(s.is_empty());
        assert_eq!(s.items(0.5).count(), 0);
    }
}
