//! Game session state and the pure transition reducer.
//!
//! [`Session`] is an immutable value. Every user action, provider result and
//! timer completion is an [`Event`]; [`Session::apply`] maps the pair to the
//! next session. Side effects are never performed here: a driver compares
//! the session before and after a transition with [`Effect::between`] and
//! runs what it returns.
//!
//! Deferred follow-ups (clearing feedback, advancing, the out-of-lives exit)
//! live in a single [`Pending`] slot tagged with a token. Any manual
//! navigation empties the slot, so a timer that fires late carries a token
//! nobody is waiting for and is dropped.

use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::{Device, HERO_ID, Level, Player, Puzzle, Screen, text};

/// Lives granted at the start of every level attempt.
pub const STARTING_LIVES: u8 = 3;

/// Kind of answer feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    /// The answer was correct.
    Success,
    /// The answer was wrong.
    Error,
}

/// Transient message shown after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    kind: FeedbackKind,
    message: &'static str,
}

impl Feedback {
    /// Feedback for a correct answer.
    pub fn success() -> Self {
        Self {
            kind: FeedbackKind::Success,
            message: text::FEEDBACK_SUCCESS,
        }
    }

    /// Feedback for a wrong answer.
    pub fn error() -> Self {
        Self {
            kind: FeedbackKind::Error,
            message: text::FEEDBACK_RETRY,
        }
    }

    /// Returns the feedback kind.
    pub fn kind(&self) -> FeedbackKind {
        self.kind
    }

    /// Returns the message text.
    pub fn message(&self) -> &'static str {
        self.message
    }
}

/// One-way blocking notification. Must be dismissed before anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The puzzle provider failed.
    LoadFailed,
    /// The last life was lost.
    OutOfAttempts,
}

impl Notice {
    /// Returns the notification text.
    pub fn message(self) -> &'static str {
        match self {
            Self::LoadFailed => text::LOAD_FAILED,
            Self::OutOfAttempts => text::OUT_OF_ATTEMPTS,
        }
    }
}

/// Yes/no question awaiting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// "Do you want to exit the challenge?"
    ExitChallenge,
}

impl Prompt {
    /// Returns the question text.
    pub fn message(self) -> &'static str {
        match self {
            Self::ExitChallenge => text::CONFIRM_EXIT,
        }
    }
}

/// What a deferred continuation does when its timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Clear feedback and stay on the current puzzle.
    ClearFeedback,
    /// Clear feedback, then move to the next puzzle or to the results.
    Advance,
    /// Clear feedback, raise the out-of-attempts notice, go to level select.
    ExhaustLives,
}

/// The single deferred continuation a session may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending {
    token: u64,
    action: PendingAction,
    delay: Duration,
}

impl Pending {
    /// Token a timer must present to run this continuation.
    pub fn token(&self) -> u64 {
        self.token
    }

    /// What runs when the timer fires.
    pub fn action(&self) -> PendingAction {
        self.action
    }

    /// How long to wait before firing.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Display delays for answer feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Delay after a correct answer.
    pub success_delay: Duration,
    /// Delay after a wrong answer.
    pub failure_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            success_delay: Duration::from_millis(1200),
            failure_delay: Duration::from_millis(1000),
        }
    }
}

/// Inputs to the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Home: "play now".
    PlayNow,
    /// Home: "play with friend".
    PlayWithFriend,
    /// Level select: a tile was chosen.
    SelectLevel(Level),
    /// The provider returned a batch.
    PuzzlesLoaded(Vec<Puzzle>),
    /// The provider failed.
    LoadFailed {
        /// Diagnostic text, logged only.
        reason: String,
    },
    /// Playing: an option was picked.
    Answer(String),
    /// Playing: the hint button.
    ToggleHint,
    /// Back navigation.
    Back,
    /// Answer to the exit-challenge prompt.
    ConfirmExit(bool),
    /// Explicit "home" action from playing or results.
    GoHome,
    /// Results: "new challenge".
    NewChallenge,
    /// A deferred timer completed.
    TimerFired(u64),
    /// The blocking notice was acknowledged.
    DismissNotice,
}

/// Side effect a driver must run after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Call the puzzle provider and feed back its result.
    LoadPuzzles,
    /// Fire [`Event::TimerFired`] with `token` after `delay`.
    ScheduleTimer {
        /// Token of the pending continuation.
        token: u64,
        /// Wait before firing.
        delay: Duration,
    },
    /// Abort any outstanding timer.
    CancelTimer,
}

impl Effect {
    /// Derives the effects implied by going from `before` to `after`.
    #[instrument(skip_all)]
    pub fn between(before: &Session, after: &Session) -> Vec<Effect> {
        let mut effects = Vec::new();

        if !before.loading && after.loading {
            effects.push(Effect::LoadPuzzles);
        }

        let before_token = before.pending.map(|p| p.token);
        match after.pending {
            Some(p) if before_token != Some(p.token) => {
                effects.push(Effect::ScheduleTimer {
                    token: p.token,
                    delay: p.delay,
                });
            }
            None if before_token.is_some() => effects.push(Effect::CancelTimer),
            _ => {}
        }

        debug!(?effects, "Derived effects");
        effects
    }
}

/// State of one play-through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    screen: Screen,
    players: Vec<Player>,
    devices: Vec<Device>,
    puzzles: Vec<Puzzle>,
    index: usize,
    lives: u8,
    feedback: Option<Feedback>,
    hint_visible: bool,
    loading: bool,
    level: Option<Level>,
    notice: Option<Notice>,
    prompt: Option<Prompt>,
    pending: Option<Pending>,
    next_token: u64,
    timing: Timing,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Timing::default())
    }
}

impl Session {
    /// Creates a session on the home screen with the seed player.
    #[instrument]
    pub fn new(timing: Timing) -> Self {
        info!("Creating session");
        Self {
            screen: Screen::Home,
            players: vec![Player::hero()],
            devices: Device::discovered(),
            puzzles: Vec::new(),
            index: 0,
            lives: STARTING_LIVES,
            feedback: None,
            hint_visible: false,
            loading: false,
            level: None,
            notice: None,
            prompt: None,
            pending: None,
            next_token: 0,
            timing,
        }
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Players in the session.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Devices on the discovery screen.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Puzzles of the current attempt.
    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    /// Index of the current puzzle.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Remaining lives.
    pub fn lives(&self) -> u8 {
        self.lives
    }

    /// Active feedback, if any.
    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    /// Whether the hint is shown.
    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    /// Whether a provider call is outstanding.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The last level tile chosen.
    pub fn level(&self) -> Option<Level> {
        self.level
    }

    /// Blocking notice, if any.
    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// Open prompt, if any.
    pub fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    /// Deferred continuation, if any.
    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    /// Feedback delays.
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// The puzzle being played, if the index is valid.
    pub fn current_puzzle(&self) -> Option<&Puzzle> {
        self.puzzles.get(self.index)
    }

    /// The local player.
    pub fn hero(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == HERO_ID)
    }

    /// The local player's score.
    pub fn score(&self) -> u32 {
        self.hero().map(|p| *p.score()).unwrap_or(0)
    }

    /// Applies `event` and returns the next session.
    #[instrument(skip(self), fields(screen = %self.screen, loading = self.loading))]
    pub fn apply(self, event: Event) -> Self {
        debug!(?event, "Applying event");

        // The loading overlay blocks everything but the provider result.
        if self.loading {
            return match event {
                Event::PuzzlesLoaded(puzzles) => self.finish_load(puzzles),
                Event::LoadFailed { reason } => self.fail_load(&reason),
                other => {
                    debug!(event = ?other, "Ignoring event while loading");
                    self
                }
            };
        }

        if self.notice.is_some() {
            return match event {
                Event::DismissNotice => {
                    debug!("Notice dismissed");
                    Self {
                        notice: None,
                        ..self
                    }
                }
                other => {
                    debug!(event = ?other, "Ignoring event while notice is up");
                    self
                }
            };
        }

        if self.prompt.is_some() {
            return match event {
                Event::ConfirmExit(confirmed) => self.resolve_prompt(confirmed),
                Event::TimerFired(token) => self.fire(token),
                other => {
                    debug!(event = ?other, "Ignoring event while prompt is open");
                    self
                }
            };
        }

        match (self.screen, event) {
            (Screen::Home, Event::PlayNow) => self.navigate(Screen::LevelSelect),
            (Screen::Home, Event::PlayWithFriend) => self.navigate(Screen::BluetoothDiscovery),
            (Screen::LevelSelect, Event::SelectLevel(level)) => self.start_load(level),
            (Screen::Playing, Event::Answer(option)) => self.answer(&option),
            (Screen::Playing, Event::ToggleHint) => Self {
                hint_visible: !self.hint_visible,
                ..self
            },
            (_, Event::Back) => self.back(),
            (Screen::Playing | Screen::Results, Event::GoHome) => self.navigate(Screen::Home),
            (Screen::Results, Event::NewChallenge) => self.navigate(Screen::LevelSelect),
            (_, Event::TimerFired(token)) => self.fire(token),
            (screen, other) => {
                debug!(%screen, event = ?other, "Event has no effect here");
                self
            }
        }
    }

    /// Moves to `screen`, dropping any pending continuation and feedback.
    #[instrument(skip(self), fields(from = %self.screen))]
    fn navigate(self, screen: Screen) -> Self {
        info!(to = %screen, "Navigating");
        Self {
            screen,
            pending: None,
            feedback: None,
            ..self
        }
    }

    #[instrument(skip(self), fields(screen = %self.screen))]
    fn back(self) -> Self {
        match self.screen {
            Screen::Home => self,
            Screen::Playing => {
                debug!("Asking for exit confirmation");
                Self {
                    prompt: Some(Prompt::ExitChallenge),
                    ..self
                }
            }
            _ => self.navigate(Screen::Home),
        }
    }

    #[instrument(skip(self))]
    fn resolve_prompt(self, confirmed: bool) -> Self {
        let closed = Self {
            prompt: None,
            ..self
        };
        if confirmed && closed.screen == Screen::Playing {
            closed.navigate(Screen::LevelSelect)
        } else {
            debug!("Exit declined");
            closed
        }
    }

    #[instrument(skip(self))]
    fn start_load(self, level: Level) -> Self {
        info!(%level, "Loading puzzles");
        Self {
            loading: true,
            level: Some(level),
            ..self
        }
    }

    #[instrument(skip(self, puzzles), fields(count = puzzles.len()))]
    fn finish_load(self, puzzles: Vec<Puzzle>) -> Self {
        if puzzles.is_empty() {
            return self.fail_load("provider returned no puzzles");
        }
        for puzzle in puzzles.iter().filter(|p| !p.answer_listed()) {
            warn!(puzzle_id = %puzzle.id(), "Answer is not among the options");
        }
        info!("Puzzles loaded, starting level");
        Self {
            screen: Screen::Playing,
            puzzles,
            index: 0,
            lives: STARTING_LIVES,
            hint_visible: false,
            feedback: None,
            loading: false,
            pending: None,
            prompt: None,
            ..self
        }
    }

    #[instrument(skip(self))]
    fn fail_load(self, reason: &str) -> Self {
        warn!(reason, "Puzzle load failed");
        Self {
            loading: false,
            notice: Some(Notice::LoadFailed),
            ..self
        }
    }

    #[instrument(skip(self), fields(index = self.index, lives = self.lives))]
    fn answer(self, option: &str) -> Self {
        if self.pending.is_some() {
            debug!("Answer ignored while feedback is showing");
            return self;
        }
        let Some(puzzle) = self.current_puzzle() else {
            warn!("No current puzzle to answer");
            return self;
        };

        if puzzle.is_correct(option) {
            let points = *puzzle.points();
            info!(points, "Correct answer");
            let players = self
                .players
                .into_iter()
                .map(|p| if p.id() == HERO_ID { p.awarded(points) } else { p })
                .collect();
            let delay = self.timing.success_delay;
            Self {
                players,
                feedback: Some(Feedback::success()),
                ..self
            }
            .schedule(PendingAction::Advance, delay)
        } else {
            // The last-life check looks at lives before the decrement.
            let before = self.lives;
            let action = if before <= 1 {
                PendingAction::ExhaustLives
            } else {
                PendingAction::ClearFeedback
            };
            info!(lives_before = before, ?action, "Wrong answer");
            let delay = self.timing.failure_delay;
            Self {
                lives: before.saturating_sub(1),
                feedback: Some(Feedback::error()),
                ..self
            }
            .schedule(action, delay)
        }
    }

    fn schedule(self, action: PendingAction, delay: Duration) -> Self {
        let token = self.next_token;
        debug!(token, ?action, ?delay, "Scheduling continuation");
        Self {
            pending: Some(Pending {
                token,
                action,
                delay,
            }),
            next_token: token + 1,
            ..self
        }
    }

    #[instrument(skip(self))]
    fn fire(self, token: u64) -> Self {
        let Some(pending) = self.pending.filter(|p| p.token == token) else {
            debug!("Stale timer ignored");
            return self;
        };

        let cleared = Self {
            pending: None,
            feedback: None,
            ..self
        };
        match pending.action {
            PendingAction::ClearFeedback => cleared,
            PendingAction::Advance if cleared.index + 1 < cleared.puzzles.len() => {
                debug!(next = cleared.index + 1, "Advancing to next puzzle");
                Self {
                    index: cleared.index + 1,
                    hint_visible: false,
                    ..cleared
                }
            }
            PendingAction::Advance => {
                info!(score = cleared.score(), "Level complete");
                Self {
                    screen: Screen::Results,
                    prompt: None,
                    ..cleared
                }
            }
            PendingAction::ExhaustLives => {
                info!("Out of attempts");
                Self {
                    screen: Screen::LevelSelect,
                    notice: Some(Notice::OutOfAttempts),
                    prompt: None,
                    ..cleared
                }
            }
        }
    }
}
