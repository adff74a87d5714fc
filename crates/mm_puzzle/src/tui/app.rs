//! Application state for the terminal frontend.

use crossterm::event::KeyCode;
use tracing::{debug, instrument};

use super::input::{KeyOutcome, map_key, menu_len};
use crate::{GameController, Screen, Session};

/// Terminal app: the controller plus the menu cursor.
#[derive(Debug)]
pub struct App {
    controller: GameController,
    cursor: usize,
    cursor_screen: Screen,
    cursor_index: usize,
    quit: bool,
}

impl App {
    /// Creates a new application around `controller`.
    #[instrument(skip(controller))]
    pub fn new(controller: GameController) -> Self {
        let cursor_screen = controller.session().screen();
        Self {
            controller,
            cursor: 0,
            cursor_screen,
            cursor_index: 0,
            quit: false,
        }
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        self.controller.session()
    }

    /// Highlighted menu entry.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, code: KeyCode) {
        match map_key(self.controller.session(), self.cursor, code) {
            KeyOutcome::Move(cursor) => self.cursor = cursor,
            KeyOutcome::Dispatch(event) => {
                self.controller.dispatch(event);
                self.sync_cursor();
            }
            KeyOutcome::Quit => {
                debug!("Quit requested");
                self.quit = true;
            }
            KeyOutcome::Ignore => {}
        }
    }

    /// Applies background events (provider results, timers).
    pub fn tick(&mut self) {
        if self.controller.drain() > 0 {
            self.sync_cursor();
        }
    }

    /// Resets the cursor whenever the screen or the puzzle changes.
    fn sync_cursor(&mut self) {
        let session = self.controller.session();
        if session.screen() != self.cursor_screen || session.index() != self.cursor_index {
            self.cursor_screen = session.screen();
            self.cursor_index = session.index();
            self.cursor = 0;
        }
        let len = menu_len(session);
        if len > 0 && self.cursor >= len {
            self.cursor = len - 1;
        }
    }
}
