//! Tests for the tokio game controller: provider calls and feedback timers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use mm_puzzle::{
    Event, GameController, GenerationError, Level, Notice, Puzzle, PuzzleProvider, Screen,
    StaticPuzzleProvider, Timing,
};

/// Provider that always fails.
struct FailingProvider;

#[async_trait]
impl PuzzleProvider for FailingProvider {
    async fn generate_puzzles(&self) -> Result<Vec<Puzzle>, GenerationError> {
        Err(GenerationError::new("service unavailable"))
    }
}

/// Provider counting how often it is asked for a batch.
struct CountingProvider {
    calls: AtomicUsize,
    inner: StaticPuzzleProvider,
}

#[async_trait]
impl PuzzleProvider for CountingProvider {
    async fn generate_puzzles(&self) -> Result<Vec<Puzzle>, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.generate_puzzles().await
    }
}

fn sample_controller() -> GameController {
    GameController::new(Arc::new(StaticPuzzleProvider::sample()), Timing::default())
}

/// Walks home -> level select -> level and waits for the batch.
async fn start_level(controller: &mut GameController) {
    controller.dispatch(Event::PlayNow);
    controller.dispatch(Event::SelectLevel(Level::NumbersIsland));
    assert!(controller.session().loading());
    controller.process_next().await;
}

fn answer_of(controller: &GameController) -> String {
    controller
        .session()
        .current_puzzle()
        .expect("No current puzzle")
        .answer()
        .clone()
}

fn wrong_option_of(controller: &GameController) -> String {
    let puzzle = controller
        .session()
        .current_puzzle()
        .expect("No current puzzle");
    puzzle
        .options()
        .iter()
        .find(|o| *o != puzzle.answer())
        .expect("No wrong option")
        .clone()
}

#[tokio::test(start_paused = true)]
async fn test_level_loads_from_provider() {
    let mut controller = sample_controller();
    start_level(&mut controller).await;

    let session = controller.session();
    assert_eq!(session.screen(), Screen::Playing);
    assert!(!session.loading());
    assert_eq!(session.puzzles().len(), 3);
    assert_eq!(session.index(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_provider_failure_raises_notice() {
    let mut controller = GameController::new(Arc::new(FailingProvider), Timing::default());
    start_level(&mut controller).await;

    let session = controller.session();
    assert_eq!(session.screen(), Screen::LevelSelect);
    assert!(!session.loading());
    assert_eq!(session.notice(), Some(Notice::LoadFailed));

    controller.dispatch(Event::DismissNotice);
    assert!(controller.session().notice().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_correct_answer_advances_after_delay() {
    let mut controller = sample_controller();
    start_level(&mut controller).await;

    let answer = answer_of(&controller);
    controller.dispatch(Event::Answer(answer));
    assert_eq!(controller.session().score(), 10);
    assert!(controller.session().feedback().is_some());

    controller.process_next().await;
    assert_eq!(controller.session().index(), 1);
    assert!(controller.session().feedback().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_feedback_stays_until_delay_elapses() {
    let mut controller = sample_controller();
    start_level(&mut controller).await;

    let wrong = wrong_option_of(&controller);
    controller.dispatch(Event::Answer(wrong));

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(controller.drain(), 0);
    assert!(controller.session().feedback().is_some());

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(controller.drain(), 1);
    assert!(controller.session().feedback().is_none());
    assert_eq!(controller.session().lives(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_full_level_reaches_results() {
    let mut controller = sample_controller();
    start_level(&mut controller).await;

    for _ in 0..3 {
        let answer = answer_of(&controller);
        controller.dispatch(Event::Answer(answer));
        controller.process_next().await;
    }

    assert_eq!(controller.session().screen(), Screen::Results);
    assert_eq!(controller.session().score(), 60);
}

#[tokio::test(start_paused = true)]
async fn test_running_out_of_lives() {
    let mut controller = sample_controller();
    start_level(&mut controller).await;

    for _ in 0..3 {
        let wrong = wrong_option_of(&controller);
        controller.dispatch(Event::Answer(wrong));
        controller.process_next().await;
    }

    let session = controller.session();
    assert_eq!(session.screen(), Screen::LevelSelect);
    assert_eq!(session.notice(), Some(Notice::OutOfAttempts));
    assert_eq!(session.lives(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_exit_cancels_outstanding_timer() {
    let mut controller = sample_controller();
    start_level(&mut controller).await;

    let answer = answer_of(&controller);
    controller.dispatch(Event::Answer(answer));
    let token = controller
        .session()
        .pending()
        .expect("No pending continuation")
        .token();

    controller.dispatch(Event::Back);
    controller.dispatch(Event::ConfirmExit(true));
    assert_eq!(controller.session().screen(), Screen::LevelSelect);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(controller.drain(), 0);
    assert_eq!(controller.session().screen(), Screen::LevelSelect);

    // A timer that slipped through anyway is still ignored.
    let before = controller.session().clone();
    controller.dispatch(Event::TimerFired(token));
    assert_eq!(controller.session(), &before);
}

#[tokio::test(start_paused = true)]
async fn test_every_level_calls_provider_once() {
    let provider = Arc::new(CountingProvider {
        calls: AtomicUsize::new(0),
        inner: StaticPuzzleProvider::sample(),
    });
    let mut controller = GameController::new(provider.clone(), Timing::default());
    start_level(&mut controller).await;
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

    controller.dispatch(Event::Back);
    controller.dispatch(Event::ConfirmExit(true));
    controller.dispatch(Event::SelectLevel(Level::GeniusChallenge));
    controller.process_next().await;

    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    assert_eq!(controller.session().level(), Some(Level::GeniusChallenge));
    assert_eq!(controller.session().screen(), Screen::Playing);
}

#[tokio::test(start_paused = true)]
async fn test_custom_timing_is_honoured() {
    let timing = Timing {
        success_delay: Duration::from_millis(50),
        failure_delay: Duration::from_millis(20),
    };
    let mut controller = GameController::new(Arc::new(StaticPuzzleProvider::sample()), timing);
    start_level(&mut controller).await;

    let answer = answer_of(&controller);
    controller.dispatch(Event::Answer(answer));
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(controller.drain(), 1);
    assert_eq!(controller.session().index(), 1);
}
