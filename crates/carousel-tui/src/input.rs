use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Next,
    Previous,
    GoTo(usize),
    TogglePause,
    Click(u16, u16),
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Right, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => Action::Next,
        (KeyCode::Left, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => Action::Previous,

        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => Action::GoTo(0),
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
            Action::GoTo(app.slides.len().saturating_sub(1))
        }
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::GoTo(c as usize - '1' as usize)
        }

        (KeyCode::Char('p'), KeyModifiers::NONE) | (KeyCode::Char(' '), _) => Action::TogglePause,

        _ => Action::None,
    }
}

/// Handle a mouse event; only left clicks matter
pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::Click(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => Action::Next,
        MouseEventKind::ScrollUp => Action::Previous,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_app;
    use crossterm::event::KeyEventState;

    fn app() -> App {
        test_app(&["a.png", "b.png", "c.png"])
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_keys() {
        let app = app();
        assert_eq!(handle_key_event(key(KeyCode::Right), &app), Action::Next);
        assert_eq!(handle_key_event(key(KeyCode::Char('h')), &app), Action::Previous);
        assert_eq!(handle_key_event(key(KeyCode::Char('3')), &app), Action::GoTo(2));
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::GoTo(0));
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT), &app),
            Action::GoTo(2)
        );
    }

    #[test]
    fn test_pause_keys() {
        let app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('p')), &app), Action::TogglePause);
        assert_eq!(handle_key_event(key(KeyCode::Char(' ')), &app), Action::TogglePause);
    }

    #[test]
    fn test_quit_keys() {
        let app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::Quit);
        let ctrl_c = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(ctrl_c, &app), Action::Quit);
    }

    #[test]
    fn test_mouse_click() {
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(handle_mouse_event(click), Action::Click(4, 7));
    }
}
