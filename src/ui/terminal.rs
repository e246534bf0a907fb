use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::analysis::ProfilePipeline;
use crate::error::{FetchFailure, Result};
use crate::ui::app::{ActiveView, AppState, Command, Event, KeyInput, Model};
use crate::ui::views;

const TICK_RATE: Duration = Duration::from_millis(100);
const ACCENT: Color = Color::Cyan;
const MUTED: Color = Color::DarkGray;
/// Below this width the tabs show only their key markers.
const COMPACT_WIDTH: u16 = 72;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Runs the interactive session until the user quits. The terminal is
/// restored even when the loop fails.
pub async fn run(pipeline: Arc<ProfilePipeline>, username: Option<String>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, pipeline, username).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn event_loop(
    terminal: &mut Term,
    pipeline: Arc<ProfilePipeline>,
    username: Option<String>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let mut input = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_RATE);

    let (mut model, mut command) = Model::new(username);

    loop {
        match command.take() {
            Some(Command::Quit) => return Ok(()),
            Some(Command::Fetch {
                generation,
                username,
            }) => spawn_fetch(pipeline.clone(), tx.clone(), generation, username),
            None => {}
        }

        terminal.draw(|frame| draw(frame, &model))?;

        let event = tokio::select! {
            term_event = input.next() => match term_event {
                Some(Ok(term_event)) => match translate(term_event) {
                    Some(event) => event,
                    None => continue,
                },
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(()),
            },
            Some(event) = rx.recv() => event,
            _ = ticker.tick() => Event::Tick,
        };

        (model, command) = model.update(event);
    }
}

/// One fetch per call; the outcome comes back as exactly one event. A
/// task still running when the session ends is simply never observed.
fn spawn_fetch(
    pipeline: Arc<ProfilePipeline>,
    tx: mpsc::UnboundedSender<Event>,
    generation: u64,
    username: String,
) {
    tokio::spawn(async move {
        let event = match pipeline.analyze_user(&username).await {
            Ok(profile) => Event::FetchSucceeded {
                generation,
                profile: Box::new(profile),
            },
            Err(e) => {
                tracing::warn!("Fetch #{} for {} failed: {}", generation, username, e);
                Event::FetchFailed {
                    generation,
                    error: FetchFailure::from(e),
                }
            }
        };
        let _ = tx.send(event);
    });
}

fn translate(event: TermEvent) -> Option<Event> {
    match event {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(map_key(key))),
        TermEvent::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> KeyInput {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyInput::Interrupt,
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => KeyInput::Other,
        KeyCode::Char(c) => KeyInput::Char(c),
        KeyCode::Backspace => KeyInput::Backspace,
        KeyCode::Enter => KeyInput::Enter,
        KeyCode::Left => KeyInput::Left,
        KeyCode::Right => KeyInput::Right,
        _ => KeyInput::Other,
    }
}

fn draw(frame: &mut Frame, model: &Model) {
    let area = frame.area();
    match model.state() {
        AppState::Input => draw_input(frame, area, model),
        AppState::Loading => draw_loading(frame, area, model),
        AppState::Error => draw_error(frame, area, model),
        AppState::ProfileView => draw_profile(frame, area, model),
    }
}

fn title_lines(title: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(MUTED),
        )),
        Line::default(),
    ]
}

fn draw_input(frame: &mut Frame, area: Rect, model: &Model) {
    let mut lines = title_lines("GitHub Profiler");
    let body = views::input_screen(model.username());
    let mut body_lines = body.lines();
    if let Some(prompt) = body_lines.next() {
        lines.push(Line::from(prompt.to_string()));
    }
    for line in body_lines {
        let style = if line.starts_with('>') {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };
        lines.push(Line::from(Span::styled(line.to_string(), style)));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_loading(frame: &mut Frame, area: Rect, model: &Model) {
    let text = views::loading_screen(model.username(), model.spinner_frame());
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::Magenta),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_error(frame: &mut Frame, area: Rect, model: &Model) {
    let message = model
        .error()
        .map(|e| e.message.clone())
        .unwrap_or_else(|| "Unknown error".to_string());
    let text = views::error_screen(&message);

    let lines: Vec<Line> = text
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let style = if i == 0 {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED)
            };
            Line::from(Span::styled(line.to_string(), style))
        })
        .collect();

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_profile(frame: &mut Frame, area: Rect, model: &Model) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    let mut header = title_lines("GitHub Profile Analysis");
    header.pop();
    if let Some(profile) = model.profile() {
        header.push(Line::from(views::display_name(profile)));
    }
    frame.render_widget(Paragraph::new(Text::from(header)), chunks[0]);

    let (width, _) = model.size();
    let compact = width > 0 && width < COMPACT_WIDTH;
    let titles: Vec<Line> = ActiveView::ALL
        .iter()
        .map(|view| Line::from(tab_title(*view, compact)))
        .collect();
    let tabs = Tabs::new(titles)
        .select(model.active_view().index())
        .style(Style::default().fg(MUTED))
        .highlight_style(Style::default().bg(ACCENT).fg(Color::Black))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(tabs, chunks[1]);

    let body = views::render_view(model.active_view(), model.profile());
    let content = Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(model.active_view().title()),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(content, chunks[2]);

    let footer = Paragraph::new(Span::styled(views::footer(), Style::default().fg(MUTED)));
    frame.render_widget(footer, chunks[3]);
}

fn tab_title(view: ActiveView, compact: bool) -> String {
    if compact {
        view.icon().to_string()
    } else {
        format!("{} {}", view.icon(), view.title())
    }
}
