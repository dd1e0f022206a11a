//! Layout inputs supplied by the viewport/scroll source

use std::collections::HashMap;

use crate::animation::TargetId;

/// Scroll position and viewport size, in document pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    pub scroll_top: f64,
    pub viewport_height: f64,
}

impl ScrollState {
    pub fn new(scroll_top: f64, viewport_height: f64) -> Self {
        Self {
            scroll_top,
            viewport_height,
        }
    }
}

/// Vertical extent of an element in document coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Document position of `edge`
    #[inline]
    pub fn edge(&self, edge: Edge) -> f64 {
        self.top + self.height * edge.fraction()
    }
}

/// Named position along an element or the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    Center,
    End,
}

impl Edge {
    #[inline]
    pub fn fraction(self) -> f64 {
        match self {
            Edge::Start => 0.0,
            Edge::Center => 0.5,
            Edge::End => 1.0,
        }
    }

    /// Accepts both `top`/`bottom` and `start`/`end` spellings
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "top" | "start" => Some(Edge::Start),
            "center" => Some(Edge::Center),
            "bottom" | "end" => Some(Edge::End),
            _ => None,
        }
    }
}

/// Where elements are laid out, answered by the rendering layer
pub trait ElementGeometry {
    /// Bounds of `target`, `None` while it is not laid out
    fn bounds(&self, target: TargetId) -> Option<Bounds>;
}

/// Natural content size, answered by the rendering layer
pub trait ContentMeasure {
    /// Natural height of `content`, `None` while it cannot be measured
    fn natural_height(&self, content: TargetId) -> Option<f64>;
}

/// Keyed layout snapshot
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    bounds: HashMap<TargetId, Bounds>,
    natural_heights: HashMap<TargetId, f64>,
}

impl StaticLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&mut self, target: TargetId, bounds: Bounds) {
        self.bounds.insert(target, bounds);
    }

    pub fn set_natural_height(&mut self, content: TargetId, height: f64) {
        self.natural_heights.insert(content, height);
    }

    pub fn remove(&mut self, target: TargetId) {
        self.bounds.remove(&target);
        self.natural_heights.remove(&target);
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
}

impl ElementGeometry for StaticLayout {
    fn bounds(&self, target: TargetId) -> Option<Bounds> {
        self.bounds.get(&target).copied()
    }
}

impl ContentMeasure for StaticLayout {
    fn natural_height(&self, content: TargetId) -> Option<f64> {
        self.natural_heights.get(&content).copied()
    }
}
