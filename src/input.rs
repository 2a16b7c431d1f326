use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Turn(Direction),
    Quit,
}

/// Maps a key press to a game command. Unbound keys give `None`.
pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }

    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Turn(Right)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Start),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_steer() {
        for (keys, dir) in [
            ([KeyCode::Up, KeyCode::Char('w')], Up),
            ([KeyCode::Down, KeyCode::Char('s')], Down),
            ([KeyCode::Left, KeyCode::Char('a')], Left),
            ([KeyCode::Right, KeyCode::Char('d')], Right),
        ] {
            for key in keys {
                assert_eq!(command_for(&press(key)), Some(Command::Turn(dir)));
            }
        }
    }

    #[test]
    fn start_and_quit() {
        assert_eq!(command_for(&press(KeyCode::Enter)), Some(Command::Start));
        assert_eq!(command_for(&press(KeyCode::Char(' '))), Some(Command::Start));
        assert_eq!(command_for(&press(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(command_for(&press(KeyCode::Esc)), Some(Command::Quit));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(is_ctrl_c(&ctrl_c));
        assert_eq!(command_for(&ctrl_c), Some(Command::Quit));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(command_for(&press(KeyCode::Char('x'))), None);
        assert_eq!(command_for(&press(KeyCode::Char('c'))), None);
        assert_eq!(command_for(&press(KeyCode::Tab)), None);
    }

    #[test]
    fn releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(command_for(&release), None);
    }
}
