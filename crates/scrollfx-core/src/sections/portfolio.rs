//! Portfolio section: a pinned stack of project pairs whose scales follow the
//! container's scroll progress from `"start start"` to `"end end"`.

use tracing::{debug, warn};

use crate::animation::{Property, TargetId, ViewId};
use crate::config::StackConfig;
use crate::runtime::Runtime;
use crate::scroll::{BindingHandle, PinnedStack, ScrollRange, StackItem};

#[derive(Debug)]
pub struct PortfolioSection {
    view: ViewId,
    container: TargetId,
    items: Vec<TargetId>,
    stack: PinnedStack,
    binding: Option<BindingHandle>,
}

impl PortfolioSection {
    pub fn mount(rt: &mut Runtime, count: usize, config: StackConfig) -> Self {
        let view = rt.mount_view();
        let scheduler = rt.scheduler_mut();
        let container = scheduler.target(view, "portfolio.container");
        let items: Vec<TargetId> = (0..count)
            .map(|i| scheduler.target(view, &format!("portfolio.item.{}", i)))
            .collect();

        let binding = match ScrollRange::named("start start", "end end") {
            Ok(range) => rt.bind_scroll(view, Some(container), range),
            Err(e) => {
                warn!(error = %e, "Portfolio scroll range rejected");
                None
            }
        };

        let section = Self {
            view,
            container,
            items,
            stack: PinnedStack::new(count, config),
            binding,
        };
        section.apply(rt);
        debug!(%view, items = count, "Portfolio section mounted");
        section
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn container(&self) -> TargetId {
        self.container
    }

    pub fn items(&self) -> &[TargetId] {
        &self.items
    }

    pub fn stack(&self) -> &PinnedStack {
        &self.stack
    }

    pub fn binding(&self) -> Option<BindingHandle> {
        self.binding
    }

    /// Container progress, `None` once unmounted
    pub fn progress(&self, rt: &Runtime) -> Option<f64> {
        self.binding.and_then(|b| rt.progress(b))
    }

    /// Stack layout at the current progress
    pub fn layout(&self, rt: &Runtime) -> Vec<StackItem> {
        let progress = self.progress(rt).unwrap_or(0.0);
        self.stack.items(progress).collect()
    }

    /// Write each item's scale for the current progress
    pub fn apply(&self, rt: &mut Runtime) {
        let Some(progress) = self.progress(rt) else {
            return;
        };
        let scheduler = rt.scheduler_mut();
        for (i, item) in self.items.iter().enumerate() {
            scheduler.set(*item, Property::Scale, self.stack.scale_at(i, progress));
        }
    }

    pub fn unmount(&mut self, rt: &mut Runtime) -> bool {
        self.binding = None;
        rt.teardown(self.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{Bounds, ScrollState, StaticLayout};

    #[test]
    fn test_scales_follow_container_progress() {
        let mut rt = Runtime::default();
        let portfolio = PortfolioSection::mount(&mut rt, 3, StackConfig::default());
        let mut layout = StaticLayout::new();
        // Container 3 viewports tall at y=1000: progress spans [1000, 2600]
        layout.place(portfolio.container(), Bounds::new(1000.0, 2400.0));

        rt.on_scroll(ScrollState::new(1000.0, 800.0), &layout);
        portfolio.apply(&mut rt);
        let first = portfolio.items()[0];
        assert_eq!(rt.scheduler().value(first, Property::Scale), Some(1.0));

        rt.on_scroll(ScrollState::new(2600.0, 800.0), &layout);
        portfolio.apply(&mut rt);
        let scales: Vec<f64> = portfolio
            .items()
            .iter()
            .filter_map(|item| rt.scheduler().value(*item, Property::Scale))
            .collect();
        assert!((scales[0] - 0.8).abs() < 1e-9);
        assert!((scales[1] - 0.9).abs() < 1e-9);
        assert_eq!(scales[2], 1.0);
    }
}
