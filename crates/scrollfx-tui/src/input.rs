use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG,             // First 'g' press, waiting for second 'g'
    FocusNext,            // Tab: hover the next service row
    FocusPrev,            // Shift+Tab: hover the previous service row
    Blur,                 // Esc: pointer leaves the rows
    TogglePreviewPointer, // 'p': move pointer onto / off the preview
    ToggleAccordion,      // Enter/Space: expand or collapse the hovered row
    Open,                 // 'o': follow the hovered row's link
    NextCard,             // 'c': hover the next review card
    ClearStatus,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::ScrollUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => {
            Action::ScrollHalfPageDown
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => {
            Action::ScrollHalfPageUp
        }
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            if app.pending_g {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Action::JumpToBottom,
        (KeyCode::Home, _) => Action::JumpToTop,

        (KeyCode::Tab, _) => Action::FocusNext,
        (KeyCode::BackTab, _) => Action::FocusPrev,
        (KeyCode::Esc, _) => {
            if app.status_message.is_some() && app.focus.is_none() {
                Action::ClearStatus
            } else {
                Action::Blur
            }
        }
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::TogglePreviewPointer,
        (KeyCode::Enter, _) | (KeyCode::Char(' '), _) => Action::ToggleAccordion,
        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::Open,
        (KeyCode::Char('c'), KeyModifiers::NONE) => Action::NextCard,

        _ => Action::None,
    }
}

/// Wheel events scroll the page; everything else is ignored
pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::ScrollDown,
        MouseEventKind::ScrollUp => Action::ScrollUp,
        _ => Action::None,
    }
}
