use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use scrollfx_core::animation::Property;
use scrollfx_core::viewport::ElementGeometry;
use scrollfx_core::StaticLayout;

use super::{place, scale_width};
use crate::app::App;
use crate::theme::GruvboxMaterial;

/// Share of the viewport a pinned card occupies
const CARD_FRACTION: f64 = 0.6;

/// Portfolio cards pinned at their sticky offsets, shrinking as later
/// cards slide over them
pub struct StackWidget;

impl StackWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, layout: &StaticLayout) {
        let page = &app.page;
        let portfolio = &page.portfolio;
        let Some(container) = layout.bounds(portfolio.container()) else {
            return;
        };
        let scroll = page.scroll_top();
        let card_height = page.viewport_height() * CARD_FRACTION;
        let stack = portfolio.stack();

        let items = portfolio.items().iter().zip(&page.content().projects);
        for (i, (item, pair)) in items.enumerate() {
            let Some(bounds) = layout.bounds(*item) else {
                continue;
            };
            // Sticky: follow the document until the offset is reached, then
            // hold until the container scrolls away
            let natural = bounds.top - scroll;
            let release = container.bottom() - scroll - card_height;
            let top = natural.max(stack.sticky_offset(i)).min(release) + scroll;

            let Some((rect, _)) = place(area, top, card_height, scroll) else {
                continue;
            };
            let scale = app
                .runtime
                .scheduler()
                .value(*item, Property::Scale)
                .unwrap_or(1.0);
            let rect = scale_width(rect, scale);

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GruvboxMaterial::PURPLE))
                .title(Span::styled(
                    format!(" {:02} ", i + 1),
                    Style::default().fg(GruvboxMaterial::GREY2),
                ))
                .style(Style::default().bg(GruvboxMaterial::BG1));
            let lines = [&pair.left, &pair.right]
                .into_iter()
                .flat_map(|project| {
                    [
                        Line::from(vec![
                            Span::styled(
                                project.title.clone(),
                                Style::default()
                                    .fg(GruvboxMaterial::FG0)
                                    .add_modifier(Modifier::BOLD),
                            ),
                            Span::styled(
                                format!("  {}", project.year),
                                Style::default().fg(GruvboxMaterial::GREY1),
                            ),
                        ]),
                        Line::from(Span::styled(
                            project.subtitle.clone(),
                            Style::default().fg(GruvboxMaterial::BLUE),
                        )),
                        Line::default(),
                    ]
                })
                .collect::<Vec<_>>();

            frame.render_widget(Clear, rect);
            frame.render_widget(Paragraph::new(lines).block(block), rect);
        }
    }
}
