//! Key handling for the workshop screen.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use teacraft::workshop::{CraftStep, WorkshopInput};

/// What the main loop should do with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Workshop(WorkshopInput),
    Quit,
    None,
}

pub fn map_key(key: KeyEvent) -> AppAction {
    if key.kind == KeyEventKind::Release {
        return AppAction::None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return AppAction::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => AppAction::Quit,
        KeyCode::Tab | KeyCode::Right => AppAction::Workshop(WorkshopInput::NextStep),
        KeyCode::BackTab | KeyCode::Left => AppAction::Workshop(WorkshopInput::PrevStep),
        KeyCode::Char(' ') | KeyCode::Enter => AppAction::Workshop(WorkshopInput::Toggle),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
            AppAction::Workshop(WorkshopInput::Increase)
        }
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => {
            AppAction::Workshop(WorkshopInput::Decrease)
        }
        KeyCode::Char(c @ '1'..='3') => {
            let index = c as usize - '1' as usize;
            match CraftStep::from_index(index) {
                Some(step) => AppAction::Workshop(WorkshopInput::SelectStep(step)),
                None => AppAction::None,
            }
        }
        _ => AppAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> AppAction {
        map_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_number_keys_select_steps() {
        assert_eq!(
            press(KeyCode::Char('2')),
            AppAction::Workshop(WorkshopInput::SelectStep(CraftStep::Grinding))
        );
        assert_eq!(press(KeyCode::Char('4')), AppAction::None);
    }

    #[test]
    fn test_space_toggles_and_q_quits() {
        assert_eq!(
            press(KeyCode::Char(' ')),
            AppAction::Workshop(WorkshopInput::Toggle)
        );
        assert_eq!(press(KeyCode::Char('q')), AppAction::Quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            AppAction::Quit
        );
    }
}
