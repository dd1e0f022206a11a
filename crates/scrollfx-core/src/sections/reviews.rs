//! Reviews section: revealed title, staggered cards with highlight sweeps and
//! a hover lift on each card.

use tracing::debug;

use crate::animation::{EasingType, Property, TargetId, TweenHandle, TweenSpec, ViewId};
use crate::runtime::Runtime;
use crate::viewport::{Threshold, TriggerHandle};

use super::content::Review;
use super::presets::{REVIEWS_TITLE, REVIEW_CARD, REVIEW_HIGHLIGHT};

/// Card rise on hover, in px
pub const CARD_LIFT: f64 = -12.0;
const CARD_LIFT_MS: u64 = 400;
const CARD_LIFT_EASING: EasingType = EasingType::PowerOut(2);

#[derive(Debug)]
pub struct ReviewsSection {
    view: ViewId,
    title: TargetId,
    cards: Vec<TargetId>,
    highlights: Vec<TargetId>,
    reveals: Vec<TriggerHandle>,
}

impl ReviewsSection {
    pub fn mount(rt: &mut Runtime, reviews: &[Review], default_threshold: Threshold) -> Self {
        let view = rt.mount_view();
        let scheduler = rt.scheduler_mut();
        let title = scheduler.target(view, "reviews.title");
        let cards: Vec<TargetId> = (0..reviews.len())
            .map(|i| scheduler.target(view, &format!("reviews.card.{}", i)))
            .collect();
        let highlights: Vec<TargetId> = (0..reviews.len())
            .map(|i| scheduler.target(view, &format!("reviews.highlight.{}", i)))
            .collect();

        let mut reveals = Vec::with_capacity(1 + cards.len() * 2);
        reveals.extend(REVIEWS_TITLE.register(rt, view, title, 0, default_threshold));
        for (i, card) in cards.iter().enumerate() {
            reveals.extend(REVIEW_CARD.register(rt, view, *card, i, default_threshold));
        }
        for (i, highlight) in highlights.iter().enumerate() {
            reveals.extend(REVIEW_HIGHLIGHT.register(rt, view, *highlight, i, default_threshold));
        }

        debug!(%view, cards = cards.len(), "Reviews section mounted");
        Self {
            view,
            title,
            cards,
            highlights,
            reveals,
        }
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn title(&self) -> TargetId {
        self.title
    }

    pub fn cards(&self) -> &[TargetId] {
        &self.cards
    }

    pub fn highlights(&self) -> &[TargetId] {
        &self.highlights
    }

    pub fn pending_reveals(&self, rt: &Runtime) -> usize {
        self.reveals
            .iter()
            .filter(|h| rt.is_trigger_registered(**h))
            .count()
    }

    /// Lift card `index`, dropping whatever was animating it
    pub fn card_enter(&mut self, rt: &mut Runtime, index: usize) -> Option<TweenHandle> {
        self.lift(rt, index, CARD_LIFT)
    }

    pub fn card_leave(&mut self, rt: &mut Runtime, index: usize) -> Option<TweenHandle> {
        self.lift(rt, index, 0.0)
    }

    fn lift(&mut self, rt: &mut Runtime, index: usize, y: f64) -> Option<TweenHandle> {
        let card = *self.cards.get(index)?;
        let scheduler = rt.scheduler_mut();
        scheduler.cancel_all_for(card);
        scheduler.start(
            card,
            TweenSpec::millis(CARD_LIFT_MS, CARD_LIFT_EASING).to(Property::Y, y),
        )
    }

    pub fn unmount(&mut self, rt: &mut Runtime) -> bool {
        self.reveals.clear();
        rt.teardown(self.view)
    }
}
