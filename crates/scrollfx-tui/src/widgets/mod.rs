mod page;
mod preview;
mod stack;
mod status_bar;

pub use page::PageWidget;
pub use preview::PreviewWidget;
pub use stack::StackWidget;
pub use status_bar::StatusBarWidget;

use ratatui::layout::Rect;

use crate::app::PX_PER_ROW;

/// Project a document span onto `area`
///
/// Returns the visible rows and how many rows are clipped above the top.
pub(crate) fn place(area: Rect, top_px: f64, height_px: f64, scroll_top: f64) -> Option<(Rect, u16)> {
    let top = ((top_px - scroll_top) / PX_PER_ROW).round() as i64;
    let height = (height_px / PX_PER_ROW).ceil() as i64;
    let start = top.max(0);
    let end = (top + height).min(i64::from(area.height));
    if end <= start {
        return None;
    }
    let rect = Rect::new(area.x, area.y + start as u16, area.width, (end - start) as u16);
    Some((rect, (start - top) as u16))
}

/// Shrink `rect` horizontally around its centre
pub(crate) fn scale_width(rect: Rect, scale: f64) -> Rect {
    let width = (f64::from(rect.width) * scale.clamp(0.0, 1.0)).round() as u16;
    let x = rect.x + (rect.width - width) / 2;
    Rect::new(x, rect.y, width, rect.height)
}
