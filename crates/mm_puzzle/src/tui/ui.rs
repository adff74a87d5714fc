//! Stateless UI rendering for every screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::App;
use super::input::LEVEL_COLUMNS;
use crate::{FeedbackKind, Level, STARTING_LIVES, Screen, Session, text};

/// Renders the whole frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let session = app.session();
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(3), // Help
        ])
        .split(area);

    draw_header(frame, chunks[0], session);

    match session.screen() {
        Screen::Home => draw_home(frame, chunks[1], app.cursor()),
        Screen::LevelSelect => draw_level_select(frame, chunks[1], app.cursor()),
        Screen::BluetoothDiscovery => draw_discovery(frame, chunks[1], session),
        Screen::Lobby => draw_placeholder(frame, chunks[1]),
        Screen::Playing => draw_playing(frame, chunks[1], session, app.cursor()),
        Screen::Results => draw_results(frame, chunks[1], session, app.cursor()),
    }

    draw_help(frame, chunks[2], session);

    // Overlays, lowest first.
    if let Some(feedback) = session.feedback().filter(|_| session.screen() == Screen::Playing) {
        let color = match feedback.kind() {
            FeedbackKind::Success => Color::Green,
            FeedbackKind::Error => Color::Red,
        };
        draw_popup(frame, area, feedback.message(), "", color);
    }
    if let Some(prompt) = session.prompt() {
        draw_popup(frame, area, prompt.message(), "y / n", Color::Blue);
    }
    if let Some(notice) = session.notice() {
        draw_popup(frame, area, notice.message(), "Enter", Color::Magenta);
    }
    if session.loading() {
        draw_popup(frame, area, text::LOADING, text::LOADING_WAIT, Color::Yellow);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, session: &Session) {
    let mut spans = Vec::new();
    if session.screen().has_back() {
        spans.push(Span::styled("‹ Esc  ", Style::default().fg(Color::Gray)));
    }
    spans.push(Span::styled(
        " M ",
        Style::default().fg(Color::Blue).bg(Color::White).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(
        " M ",
        Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw("   "));

    if session.screen() == Screen::Playing {
        let hearts: String = (0..STARTING_LIVES)
            .map(|i| if i < session.lives() { '♥' } else { '♡' })
            .collect();
        spans.push(Span::styled(hearts, Style::default().fg(Color::Red)));
        spans.push(Span::raw("   "));
    }
    spans.push(Span::styled(
        format!("★ {}", session.score()),
        Style::default().fg(Color::Yellow),
    ));

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Centered text inside a plain border.
fn panel(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::bordered())
}

fn menu_line(label: String, selected: bool) -> Line<'static> {
    let style = if selected {
        Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let marker = if selected { "> " } else { "  " };
    Line::from(Span::styled(format!("{}{}", marker, label), style))
}

fn draw_home(frame: &mut Frame, area: Rect, cursor: usize) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            text::TITLE,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(text::TAGLINE, Style::default().fg(Color::Yellow))),
        Line::from(""),
    ];
    lines.push(menu_line(format!("▶ {}", text::PLAY_NOW), cursor == 0));
    lines.push(menu_line(format!("ᛒ {}", text::PLAY_WITH_FRIEND), cursor == 1));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(text::CREDIT, Style::default().fg(Color::DarkGray))));

    frame.render_widget(panel(lines), area);
}

fn draw_level_select(frame: &mut Frame, area: Rect, cursor: usize) {
    let mut lines = vec![
        Line::from(Span::styled(
            text::CHOOSE_ISLAND,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let levels = Level::all();
    for (row, pair) in levels.chunks(LEVEL_COLUMNS).enumerate() {
        let spans: Vec<Span> = pair
            .iter()
            .enumerate()
            .map(|(col, level)| {
                let index = row * LEVEL_COLUMNS + col;
                let style = if index == cursor {
                    Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Span::styled(format!("  {} {}  ", level.icon(), level.label()), style)
            })
            .collect();
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    frame.render_widget(panel(lines), area);
}

fn draw_discovery(frame: &mut Frame, area: Rect, session: &Session) {
    let mut lines = vec![
        Line::from(Span::styled(
            text::SEARCHING,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(text::ASK_FRIEND, Style::default().fg(Color::Gray))),
        Line::from(""),
    ];
    for device in session.devices() {
        lines.push(Line::from(vec![
            Span::styled(format!("👥 {}  ", device.name()), Style::default().fg(Color::White)),
            Span::styled(device.status().label(), Style::default().fg(Color::Green)),
        ]));
    }

    frame.render_widget(panel(lines), area);
}

fn draw_placeholder(frame: &mut Frame, area: Rect) {
    frame.render_widget(panel(vec![Line::from("…")]), area);
}

fn draw_playing(frame: &mut Frame, area: Rect, session: &Session, cursor: usize) {
    let Some(puzzle) = session.current_puzzle() else {
        draw_placeholder(frame, area);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", session.index() + 1),
                Style::default().fg(Color::White).bg(Color::Green),
            ),
            Span::styled(
                format!(" {} {}   ", text::OF, session.puzzles().len()),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(puzzle.kind().to_string(), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            puzzle.question().clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if let Some(glyphs) = puzzle.visual_data() {
        let mut row = glyphs.join("  ");
        if puzzle.shows_blank() {
            row.push_str("  ؟");
        }
        lines.push(Line::from(Span::styled(row, Style::default().fg(Color::Cyan))));
        lines.push(Line::from(""));
    }

    for (i, option) in puzzle.options().iter().enumerate() {
        lines.push(menu_line(format!("{}. {}", i + 1, option), i == cursor));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("[h] {}   [m] {}", text::HINT, text::HOME),
        Style::default().fg(Color::Gray),
    )));

    if session.hint_visible() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("💡 {}", puzzle.hint()),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )));
    }

    frame.render_widget(panel(lines).wrap(Wrap { trim: true }), area);
}

fn draw_results(frame: &mut Frame, area: Rect, session: &Session, cursor: usize) {
    let lines = vec![
        Line::from(Span::styled("🏆", Style::default().fg(Color::Yellow))),
        Line::from(Span::styled(
            text::RESULTS_TITLE,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(text::RESULTS_SUBTITLE, Style::default().fg(Color::Yellow))),
        Line::from(""),
        Line::from(vec![
            Span::raw(format!("{} ", text::NEW_BALANCE)),
            Span::styled(
                session.score().to_string(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        menu_line(format!("↻ {}", text::NEW_CHALLENGE), cursor == 0),
        menu_line(text::RETURN_HOME.to_string(), cursor == 1),
    ];

    frame.render_widget(panel(lines), area);
}

fn draw_help(frame: &mut Frame, area: Rect, session: &Session) {
    let help = match session.screen() {
        Screen::Playing => "↑↓: Choose | Enter: Answer | h: Hint | m: Home | Esc: Back | q: Quit",
        Screen::LevelSelect => "Arrows: Move | Enter: Start | Esc: Back | q: Quit",
        Screen::Home => "↑↓: Navigate | Enter: Select | q: Quit",
        _ => "↑↓: Navigate | Enter: Select | Esc: Back | q: Quit",
    };
    let paragraph = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_popup(frame: &mut Frame, area: Rect, message: &str, footer: &str, color: Color) {
    let popup = center_rect(area, 50, 7);
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
    ];
    if !footer.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            footer.to_string(),
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
