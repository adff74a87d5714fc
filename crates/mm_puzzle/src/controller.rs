//! Game controller - drives the session reducer on tokio.
//!
//! The controller owns the current [`Session`]. It applies events one at a
//! time and runs the side effects each transition asks for. Provider calls
//! and timers run as spawned tasks that post their outcome back onto the
//! controller's channel as ordinary [`Event`]s, so the session is only ever
//! touched from the task that owns the controller.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::{Effect, Event, PuzzleProvider, Session, Timing};

/// Controller that drives the session state machine.
pub struct GameController {
    session: Session,
    provider: Arc<dyn PuzzleProvider>,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    timer: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("session", &self.session)
            .field("timer_armed", &self.timer.is_some())
            .finish_non_exhaustive()
    }
}

impl GameController {
    /// Creates a controller with a fresh session.
    #[instrument(skip(provider))]
    pub fn new(provider: Arc<dyn PuzzleProvider>, timing: Timing) -> Self {
        info!("Creating GameController");
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            session: Session::new(timing),
            provider,
            events_tx,
            events_rx,
            timer: None,
        }
    }

    /// Returns the current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Applies `event` and runs the resulting effects.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self), fields(screen = %self.session.screen()))]
    pub fn dispatch(&mut self, event: Event) {
        let before = self.session.clone();
        self.session = before.clone().apply(event);
        for effect in Effect::between(&before, &self.session) {
            self.run_effect(effect);
        }
    }

    /// Applies every background event that has already arrived.
    ///
    /// Returns how many were applied.
    #[instrument(skip(self))]
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.dispatch(event);
            applied += 1;
        }
        if applied > 0 {
            debug!(applied, "Drained background events");
        }
        applied
    }

    /// Waits for the next background event (provider result or timer) and
    /// applies it.
    #[instrument(skip(self))]
    pub async fn process_next(&mut self) {
        // The controller holds a sender itself, so the channel never closes.
        if let Some(event) = self.events_rx.recv().await {
            self.dispatch(event);
        }
    }

    #[instrument(skip(self))]
    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::LoadPuzzles => {
                let provider = Arc::clone(&self.provider);
                let tx = self.events_tx.clone();
                info!("Spawning puzzle load");
                tokio::spawn(async move {
                    let event = match provider.generate_puzzles().await {
                        Ok(puzzles) => Event::PuzzlesLoaded(puzzles),
                        Err(e) => Event::LoadFailed {
                            reason: e.to_string(),
                        },
                    };
                    if tx.send(event).is_err() {
                        warn!("Controller dropped before puzzle load finished");
                    }
                });
            }
            Effect::ScheduleTimer { token, delay } => {
                self.cancel_timer();
                let tx = self.events_tx.clone();
                debug!(token, ?delay, "Arming timer");
                self.timer = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    // A closed channel just means nobody cares any more.
                    let _ = tx.send(Event::TimerFired(token));
                }));
            }
            Effect::CancelTimer => self.cancel_timer(),
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }
}

impl Drop for GameController {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
