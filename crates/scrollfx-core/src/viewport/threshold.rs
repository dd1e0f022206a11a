//! Visibility thresholds written as `"<element edge> <viewport position>"`
//!
//! `"top 85%"` is crossed once the element's top edge is at or above 85% of
//! the viewport height, measured from the viewport top.

use std::fmt;
use std::str::FromStr;

use super::geometry::{Bounds, Edge, ScrollState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub element_edge: Edge,
    /// Fraction of the viewport height from its top
    pub viewport_fraction: f64,
}

impl Threshold {
    /// Top edge crossing `fraction` of the viewport
    pub fn fraction(fraction: f64) -> Self {
        Self {
            element_edge: Edge::Start,
            viewport_fraction: fraction.clamp(0.0, 1.0),
        }
    }

    /// Scroll offset at which this threshold is crossed for `bounds`
    #[inline]
    pub fn crossing_offset(&self, bounds: Bounds, viewport_height: f64) -> f64 {
        bounds.edge(self.element_edge) - self.viewport_fraction * viewport_height
    }

    /// True once `state` has scrolled to or past the crossing
    #[inline]
    pub fn is_crossed(&self, bounds: Bounds, state: ScrollState) -> bool {
        state.scroll_top >= self.crossing_offset(bounds, state.viewport_height)
    }
}

impl FromStr for Threshold {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::Error::InvalidThreshold(s.to_string());
        let mut words = s.split_whitespace();
        let element = words.next().ok_or_else(invalid)?;
        let viewport = words.next().ok_or_else(invalid)?;
        if words.next().is_some() {
            return Err(invalid());
        }

        let element_edge = Edge::parse(element).ok_or_else(invalid)?;
        let viewport_fraction = match viewport.strip_suffix('%') {
            Some(percent) => {
                let value: f64 = percent.parse().map_err(|_| invalid())?;
                if !(0.0..=100.0).contains(&value) {
                    return Err(invalid());
                }
                value / 100.0
            }
            None => Edge::parse(viewport).ok_or_else(invalid)?.fraction(),
        };

        Ok(Self {
            element_edge,
            viewport_fraction,
        })
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge = match self.element_edge {
            Edge::Start => "top",
            Edge::Center => "center",
            Edge::End => "bottom",
        };
        write!(f, "{} {}%", edge, self.viewport_fraction * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let t: Threshold = "top 85%".parse().unwrap();
        assert_eq!(t.element_edge, Edge::Start);
        assert!((t.viewport_fraction - 0.85).abs() < 1e-12);

        let t: Threshold = "center center".parse().unwrap();
        assert_eq!(t.element_edge, Edge::Center);
        assert_eq!(t.viewport_fraction, 0.5);

        assert!("top".parse::<Threshold>().is_err());
        assert!("top 120%".parse::<Threshold>().is_err());
        assert!("side 50%".parse::<Threshold>().is_err());
        assert!("top 50% extra".parse::<Threshold>().is_err());
    }

    #[test]
    fn test_crossing() {
        // Element at y=1000, viewport 800 tall: "top 75%" crossed at 1000 - 600 = 400
        let t = Threshold::fraction(0.75);
        let bounds = Bounds::new(1000.0, 200.0);
        assert_eq!(t.crossing_offset(bounds, 800.0), 400.0);
        assert!(!t.is_crossed(bounds, ScrollState::new(399.0, 800.0)));
        assert!(t.is_crossed(bounds, ScrollState::new(400.0, 800.0)));
        // Scrolled well past still counts
        assert!(t.is_crossed(bounds, ScrollState::new(5000.0, 800.0)));
    }
}
