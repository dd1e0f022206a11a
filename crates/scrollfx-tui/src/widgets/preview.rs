use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use scrollfx_core::animation::Property;
use scrollfx_core::viewport::ElementGeometry;
use scrollfx_core::StaticLayout;

use crate::app::{App, PX_PER_COL, PX_PER_ROW};
use crate::theme::{fade, GruvboxMaterial};

/// Below this opacity the preview is not drawn
const VISIBLE_OPACITY: f64 = 0.02;

/// Floating preview that morphs between service rows
pub struct PreviewWidget;

impl PreviewWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, layout: &StaticLayout) {
        let services = &app.page.services;
        let hover = services.hover();
        let Some(index) = hover.content_index() else {
            return;
        };
        let Some(service) = app.page.content().services.get(index) else {
            return;
        };

        let s = app.runtime.scheduler();
        let preview = hover.preview();
        let opacity = s.value(preview, Property::Opacity).unwrap_or(0.0);
        if opacity < VISIBLE_OPACITY {
            return;
        }
        let scale = s.value(preview, Property::Scale).unwrap_or(1.0);
        let width = s.value(preview, Property::Width).unwrap_or(0.0) * scale;
        let height = s.value(preview, Property::Height).unwrap_or(0.0) * scale;
        let cols = ((width / PX_PER_COL).round() as u16).min(area.width.saturating_sub(2));
        let rows = ((height / PX_PER_ROW).round() as u16).min(area.height);
        if cols < 3 || rows < 3 {
            return;
        }

        // Anchor beside the hovered row, kept inside the area
        let anchor = services
            .rows()
            .get(index)
            .and_then(|row| layout.bounds(*row))
            .map(|b| ((b.top - app.page.scroll_top()) / PX_PER_ROW).round() as i64)
            .unwrap_or(0);
        let max_y = i64::from(area.height.saturating_sub(rows));
        let y = area.y + anchor.clamp(0, max_y) as u16;
        let x = area.x + area.width.saturating_sub(cols + 2);
        let rect = Rect::new(x, y, cols, rows);

        let border = if hover.is_on_preview() {
            GruvboxMaterial::ORANGE
        } else {
            GruvboxMaterial::ACCENT
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(fade(border, opacity)))
            .title(Span::styled(
                format!(" {} ", service.name),
                Style::default()
                    .fg(fade(GruvboxMaterial::FG0, opacity))
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(GruvboxMaterial::BG1));

        let mut lines = vec![
            Line::from(Span::styled(
                service.description.clone(),
                Style::default().fg(fade(GruvboxMaterial::GREY2, opacity)),
            )),
            Line::default(),
        ];
        lines.extend(service.subservices.iter().map(|sub| {
            Line::from(Span::styled(
                format!("• {}", sub),
                Style::default().fg(fade(GruvboxMaterial::YELLOW, opacity)),
            ))
        }));

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
            rect,
        );
    }
}
