//! Keyboard handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the dashboard to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop polling and leave
    Quit,
    /// Fetch now instead of waiting for the next tick
    ManualRefresh,
    NoOp,
}

/// Map a key event to an [`Action`]
pub fn on_key(key: &KeyEvent) -> Action {
    // Only presses count; some terminals also report release and repeat.
    if key.kind != KeyEventKind::Press {
        return Action::NoOp;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('r') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Action::ManualRefresh
        }
        _ => Action::NoOp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(on_key(&press(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(on_key(&press(KeyCode::Esc)), Action::Quit);
        assert_eq!(
            on_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn test_refresh_key() {
        assert_eq!(on_key(&press(KeyCode::Char('r'))), Action::ManualRefresh);
        assert_eq!(
            on_key(&KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Action::NoOp
        );
    }

    #[test]
    fn test_other_keys_are_noop() {
        for code in [KeyCode::Char('c'), KeyCode::Char('Q'), KeyCode::Enter, KeyCode::Up] {
            assert_eq!(on_key(&press(code)), Action::NoOp, "{code:?}");
        }
    }

    #[test]
    fn test_key_release_is_noop() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(on_key(&release), Action::NoOp);
    }
}
