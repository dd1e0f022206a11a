use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use scrollfx_core::animation::{Property, TargetId};
use scrollfx_core::viewport::ElementGeometry;
use scrollfx_core::StaticLayout;

use super::{place, scale_width};
use crate::app::App;
use crate::theme::{fade, GruvboxMaterial};

/// The scrolled document: services and reviews
pub struct PageWidget;

/// Animated values the renderer reads for one element
struct Look {
    y: f64,
    opacity: f64,
    scale: f64,
}

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, layout: &StaticLayout) {
        let page = &app.page;
        let scroll = page.scroll_top();
        let services = &page.services;
        let content = page.content();

        Self::element(
            frame,
            area,
            app,
            layout,
            services.title(),
            vec![("Our Services".to_string(), Self::heading())],
        );
        Self::element(
            frame,
            area,
            app,
            layout,
            services.subtitle(),
            vec![(
                "Everything a growing business needs online".to_string(),
                Style::default().fg(GruvboxMaterial::GREY2),
            )],
        );

        let accordion = services.accordion();
        for (i, (row, service)) in services.rows().iter().zip(&content.services).enumerate() {
            let focused = app.focus == Some(i);
            let marker = if focused { "▶" } else { " " };
            let name_style = if focused {
                Style::default()
                    .fg(GruvboxMaterial::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(GruvboxMaterial::FG0)
            };
            Self::element(
                frame,
                area,
                app,
                layout,
                *row,
                vec![
                    (format!("{} {:02}  {}", marker, i + 1, service.name), name_style),
                    (
                        format!("      {}", service.description),
                        Style::default().fg(GruvboxMaterial::GREY1),
                    ),
                ],
            );

            if let Some(content) = accordion.content(i) {
                let lines = service
                    .subservices
                    .iter()
                    .map(|sub| {
                        (
                            format!("        › {}", sub),
                            Style::default().fg(GruvboxMaterial::YELLOW),
                        )
                    })
                    .collect();
                Self::element(frame, area, app, layout, content, lines);
            }
        }

        let reviews = &page.reviews;
        Self::element(
            frame,
            area,
            app,
            layout,
            reviews.title(),
            vec![("What Our Clients Say".to_string(), Self::heading())],
        );

        let cards = reviews.cards().iter().zip(reviews.highlights());
        for (i, ((card, highlight), review)) in cards.zip(&content.reviews).enumerate() {
            let Some(bounds) = layout.bounds(*card) else {
                continue;
            };
            let look = Self::look(app, *card);
            let Some((rect, _)) = place(area, bounds.top + look.y, bounds.height, scroll) else {
                continue;
            };
            let rect = scale_width(rect, look.scale);
            let border = if app.card_focus == Some(i) {
                GruvboxMaterial::ORANGE
            } else {
                GruvboxMaterial::GREY0
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(fade(border, look.opacity)))
                .title(Span::styled(
                    format!(" {} · {} ", review.name, review.position),
                    Style::default().fg(fade(GruvboxMaterial::AQUA, look.opacity)),
                ));
            let quote = Paragraph::new(format!("“{}”", review.quote))
                .style(Style::default().fg(fade(GruvboxMaterial::FG0, look.opacity)))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(quote, rect);

            // Highlight bar rides with the card lift
            let Some(hb) = layout.bounds(*highlight) else {
                continue;
            };
            let percent = app
                .runtime
                .scheduler()
                .value(*highlight, Property::WidthPercent)
                .unwrap_or(100.0);
            if let Some((bar_rect, skipped)) = place(area, hb.top + look.y, hb.height, scroll) {
                let text_width = review.highlight.chars().count();
                let bar = "━".repeat((text_width as f64 * percent / 100.0).round() as usize);
                let lines = vec![
                    Line::from(Span::styled(
                        format!("  {}", review.highlight),
                        Style::default()
                            .fg(fade(GruvboxMaterial::YELLOW, look.opacity))
                            .add_modifier(Modifier::ITALIC),
                    )),
                    Line::from(Span::styled(
                        format!("  {}", bar),
                        Style::default().fg(fade(GruvboxMaterial::ORANGE, look.opacity)),
                    )),
                ];
                let inner = Rect::new(
                    bar_rect.x + 1,
                    bar_rect.y,
                    bar_rect.width.saturating_sub(2),
                    bar_rect.height,
                );
                frame.render_widget(Paragraph::new(lines).scroll((skipped, 0)), inner);
            }
        }
    }

    fn heading() -> Style {
        Style::default()
            .fg(GruvboxMaterial::FG0)
            .add_modifier(Modifier::BOLD)
    }

    fn look(app: &App, target: TargetId) -> Look {
        let s = app.runtime.scheduler();
        Look {
            y: s.value(target, Property::Y).unwrap_or(0.0),
            opacity: s.value(target, Property::Opacity).unwrap_or(1.0),
            scale: s.value(target, Property::Scale).unwrap_or(1.0),
        }
    }

    /// Render text lines at `target`'s animated position
    fn element(
        frame: &mut Frame,
        area: Rect,
        app: &App,
        layout: &StaticLayout,
        target: TargetId,
        lines: Vec<(String, Style)>,
    ) {
        let Some(bounds) = layout.bounds(target) else {
            return;
        };
        let look = Self::look(app, target);
        let Some((rect, skipped)) = place(area, bounds.top + look.y, bounds.height, app.page.scroll_top())
        else {
            return;
        };
        let lines: Vec<Line> = lines
            .into_iter()
            .map(|(text, style)| {
                let fg = style.fg.unwrap_or(GruvboxMaterial::FG0);
                Line::from(Span::styled(text, style.fg(fade(fg, look.opacity))))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).scroll((skipped, 0)), rect);
    }
}
