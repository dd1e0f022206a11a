use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use scrollfx_core::HoverPhase;

use crate::app::App;
use crate::theme::GruvboxMaterial;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let page = &app.page;
        let rt = &app.runtime;

        let hover_str = match page.services.hover().phase() {
            HoverPhase::Idle => "idle".to_string(),
            HoverPhase::Showing(i) => format!("preview #{}", i + 1),
            HoverPhase::PendingHide { index, .. } => format!("hiding #{}", index + 1),
        };
        let open_str = match page.services.accordion().expanded_index() {
            Some(i) => format!("#{}", i + 1),
            None => "-".to_string(),
        };
        let stack = page.portfolio.progress(rt).unwrap_or(0.0) * 100.0;

        let status_text = if let Some(msg) = &app.status_message {
            msg.clone()
        } else {
            format!(
                " {:>5.0}/{:.0}px | {} | open {} | stack {:>3.0}% | tweens {} timers {}",
                page.scroll_top(),
                page.max_scroll(rt),
                hover_str,
                open_str,
                stack,
                rt.scheduler().active_count(),
                rt.pending_timers(),
            )
        };

        let help_hint = " q:quit j/k:scroll tab:hover enter:expand p:preview o:open c:card ";
        let padding_len = area.width.saturating_sub(
            status_text.chars().count() as u16 + help_hint.len() as u16,
        ) as usize;

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default()
                    .fg(GruvboxMaterial::FG0)
                    .bg(GruvboxMaterial::BG2),
            ),
            Span::styled(
                " ".repeat(padding_len),
                Style::default().bg(GruvboxMaterial::BG2),
            ),
            Span::styled(
                help_hint,
                Style::default()
                    .fg(GruvboxMaterial::GREY2)
                    .bg(GruvboxMaterial::BG2),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
