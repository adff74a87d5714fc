//! Tests for keyboard mapping in the terminal frontend.

use crossterm::event::KeyCode;
use mm_puzzle::tui::{KeyOutcome, map_key, menu_len};
use mm_puzzle::{Event, Level, Puzzle, PuzzleKind, Session};

fn playing() -> Session {
    let puzzle = Puzzle::new(
        "p1".to_string(),
        PuzzleKind::Text,
        "question".to_string(),
        None,
        vec!["a".to_string(), "b".to_string(), "c".to_string()],
        "b".to_string(),
        "hint".to_string(),
        10,
    );
    Session::default()
        .apply(Event::PlayNow)
        .apply(Event::SelectLevel(Level::NumbersIsland))
        .apply(Event::PuzzlesLoaded(vec![puzzle]))
}

#[test]
fn test_quit_works_everywhere() {
    assert_eq!(
        map_key(&Session::default(), 0, KeyCode::Char('q')),
        KeyOutcome::Quit
    );
    assert_eq!(map_key(&playing(), 0, KeyCode::Char('q')), KeyOutcome::Quit);
}

#[test]
fn test_home_menu_selection() {
    let session = Session::default();
    assert_eq!(
        map_key(&session, 0, KeyCode::Enter),
        KeyOutcome::Dispatch(Event::PlayNow)
    );
    assert_eq!(
        map_key(&session, 0, KeyCode::Char('2')),
        KeyOutcome::Dispatch(Event::PlayWithFriend)
    );
    assert_eq!(map_key(&session, 0, KeyCode::Char('3')), KeyOutcome::Ignore);
}

#[test]
fn test_cursor_wraps() {
    let session = Session::default();
    assert_eq!(map_key(&session, 1, KeyCode::Down), KeyOutcome::Move(0));
    assert_eq!(map_key(&session, 0, KeyCode::Up), KeyOutcome::Move(1));
}

#[test]
fn test_level_grid_moves_by_row() {
    let session = Session::default().apply(Event::PlayNow);
    assert_eq!(menu_len(&session), 6);
    assert_eq!(map_key(&session, 0, KeyCode::Down), KeyOutcome::Move(2));
    assert_eq!(map_key(&session, 0, KeyCode::Right), KeyOutcome::Move(1));
    assert_eq!(map_key(&session, 1, KeyCode::Up), KeyOutcome::Move(5));
    assert_eq!(
        map_key(&session, 3, KeyCode::Enter),
        KeyOutcome::Dispatch(Event::SelectLevel(Level::all()[3]))
    );
}

#[test]
fn test_playing_keys() {
    let session = playing();
    assert_eq!(
        map_key(&session, 1, KeyCode::Enter),
        KeyOutcome::Dispatch(Event::Answer("b".to_string()))
    );
    assert_eq!(
        map_key(&session, 0, KeyCode::Char('3')),
        KeyOutcome::Dispatch(Event::Answer("c".to_string()))
    );
    assert_eq!(
        map_key(&session, 0, KeyCode::Char('h')),
        KeyOutcome::Dispatch(Event::ToggleHint)
    );
    assert_eq!(
        map_key(&session, 0, KeyCode::Char('m')),
        KeyOutcome::Dispatch(Event::GoHome)
    );
    assert_eq!(
        map_key(&session, 0, KeyCode::Esc),
        KeyOutcome::Dispatch(Event::Back)
    );
}

#[test]
fn test_prompt_keys() {
    let session = playing().apply(Event::Back);
    assert_eq!(
        map_key(&session, 0, KeyCode::Char('y')),
        KeyOutcome::Dispatch(Event::ConfirmExit(true))
    );
    assert_eq!(
        map_key(&session, 0, KeyCode::Esc),
        KeyOutcome::Dispatch(Event::ConfirmExit(false))
    );
    assert_eq!(map_key(&session, 0, KeyCode::Char('h')), KeyOutcome::Ignore);
}

#[test]
fn test_loading_ignores_keys() {
    let session = Session::default()
        .apply(Event::PlayNow)
        .apply(Event::SelectLevel(Level::LogicCave));
    assert_eq!(map_key(&session, 0, KeyCode::Enter), KeyOutcome::Ignore);
    assert_eq!(map_key(&session, 0, KeyCode::Esc), KeyOutcome::Ignore);
}

#[test]
fn test_notice_dismissed_by_enter() {
    let session = Session::default()
        .apply(Event::PlayNow)
        .apply(Event::SelectLevel(Level::LogicCave))
        .apply(Event::LoadFailed {
            reason: "offline".to_string(),
        });
    assert_eq!(
        map_key(&session, 0, KeyCode::Enter),
        KeyOutcome::Dispatch(Event::DismissNotice)
    );
    assert_eq!(map_key(&session, 0, KeyCode::Down), KeyOutcome::Ignore);
}

#[test]
fn test_discovery_entries_are_decorative() {
    let session = Session::default().apply(Event::PlayWithFriend);
    assert_eq!(menu_len(&session), 2);
    assert_eq!(map_key(&session, 0, KeyCode::Enter), KeyOutcome::Ignore);
    assert_eq!(
        map_key(&session, 0, KeyCode::Backspace),
        KeyOutcome::Dispatch(Event::Back)
    );
}
