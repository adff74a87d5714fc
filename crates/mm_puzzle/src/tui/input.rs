//! Keyboard mapping from key codes to session events.

use crossterm::event::KeyCode;
use tracing::{debug, instrument};

use crate::{Event, Level, Screen, Session};

/// What a key press asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Move the menu cursor to this index.
    Move(usize),
    /// Apply an event to the session.
    Dispatch(Event),
    /// Leave the application.
    Quit,
    /// Nothing to do.
    Ignore,
}

/// Home menu entries, in display order.
pub const HOME_MENU: [Event; 2] = [Event::PlayNow, Event::PlayWithFriend];

/// Results menu entries, in display order.
pub const RESULTS_MENU: [Event; 2] = [Event::NewChallenge, Event::GoHome];

/// Columns in the level tile grid.
pub const LEVEL_COLUMNS: usize = 2;

/// Number of selectable entries on the current screen.
pub fn menu_len(session: &Session) -> usize {
    match session.screen() {
        Screen::Home => HOME_MENU.len(),
        Screen::LevelSelect => Level::all().len(),
        Screen::BluetoothDiscovery => session.devices().len(),
        Screen::Lobby => 0,
        Screen::Playing => session
            .current_puzzle()
            .map(|p| p.options().len())
            .unwrap_or(0),
        Screen::Results => RESULTS_MENU.len(),
    }
}

/// Maps a key press to an outcome given the session and menu cursor.
#[instrument(skip(session), fields(screen = %session.screen()))]
pub fn map_key(session: &Session, cursor: usize, code: KeyCode) -> KeyOutcome {
    if let KeyCode::Char('q') | KeyCode::Char('Q') = code {
        return KeyOutcome::Quit;
    }

    // Modal layers first, mirroring the reducer's own gating.
    if session.loading() {
        return KeyOutcome::Ignore;
    }
    if session.notice().is_some() {
        return match code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                KeyOutcome::Dispatch(Event::DismissNotice)
            }
            _ => KeyOutcome::Ignore,
        };
    }
    if session.prompt().is_some() {
        return match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                KeyOutcome::Dispatch(Event::ConfirmExit(true))
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                KeyOutcome::Dispatch(Event::ConfirmExit(false))
            }
            _ => KeyOutcome::Ignore,
        };
    }

    let len = menu_len(session);
    match code {
        KeyCode::Esc | KeyCode::Backspace => KeyOutcome::Dispatch(Event::Back),
        KeyCode::Up => step(cursor, len, -(row_stride(session) as isize)),
        KeyCode::Down => step(cursor, len, row_stride(session) as isize),
        KeyCode::Left => step(cursor, len, -1),
        KeyCode::Right => step(cursor, len, 1),
        KeyCode::Char('h') if session.screen() == Screen::Playing => {
            KeyOutcome::Dispatch(Event::ToggleHint)
        }
        KeyCode::Char('m') if session.screen() == Screen::Playing => {
            KeyOutcome::Dispatch(Event::GoHome)
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            if index < len {
                select(session, index)
            } else {
                KeyOutcome::Ignore
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => select(session, cursor),
        other => {
            debug!(key = ?other, "Unmapped key");
            KeyOutcome::Ignore
        }
    }
}

/// Vertical arrows jump a whole row on the level grid.
fn row_stride(session: &Session) -> usize {
    if session.screen() == Screen::LevelSelect {
        LEVEL_COLUMNS
    } else {
        1
    }
}

fn step(cursor: usize, len: usize, delta: isize) -> KeyOutcome {
    if len == 0 {
        return KeyOutcome::Ignore;
    }
    let len = len as isize;
    let next = (cursor as isize + delta).rem_euclid(len);
    KeyOutcome::Move(next as usize)
}

/// Activates menu entry `index` on the current screen.
fn select(session: &Session, index: usize) -> KeyOutcome {
    let event = match session.screen() {
        Screen::Home => HOME_MENU.get(index).cloned(),
        Screen::LevelSelect => Level::all().get(index).copied().map(Event::SelectLevel),
        Screen::Playing => session
            .current_puzzle()
            .and_then(|p| p.options().get(index))
            .map(|option| Event::Answer(option.clone())),
        Screen::Results => RESULTS_MENU.get(index).cloned(),
        // Discovery entries are decorative.
        Screen::BluetoothDiscovery | Screen::Lobby => None,
    };
    event.map(KeyOutcome::Dispatch).unwrap_or(KeyOutcome::Ignore)
}
