mod help;
pub(crate) mod state;

use crate::cli::Cli;
use crate::model::{AppEvent, Mode, SubmitRequest, Verdict};
use crate::orchestrator::{self, UiCommand};
use crate::{normalize, validate};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Terminal,
};
use state::{UiState, FEATURE_LABELS, FEATURE_PLACEHOLDERS, TAB_TITLES};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(args: Cli) -> Result<()> {
    // Unbounded channels avoid backpressure between the UI thread and the
    // controller.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    let cfg = crate::cli::build_config(&args);

    // TUI runs in a dedicated thread to keep all blocking I/O out of the
    // Tokio runtime.
    let ui_handle = std::thread::spawn(move || run_threaded(event_rx, cmd_tx));

    let res = orchestrator::run_controller(&cfg, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread. UiState is owned here only; no
/// cross-thread mutation.
fn run_threaded(
    mut event_rx: UnboundedReceiver<AppEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut state = UiState::default();

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        // Drain events without blocking to keep the UI responsive.
        while let Ok(ev) = event_rx.try_recv() {
            state.apply_event(ev);
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match (k.modifiers, k.code) {
                    (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('r')) => {
                        state.reset();
                        // An in-flight resolution must not overwrite the
                        // freshly reset view.
                        let _ = cmd_tx.send(UiCommand::Invalidate);
                    }
                    (_, KeyCode::Tab) => {
                        if state.select_tab(state.tab + 1) {
                            let _ = cmd_tx.send(UiCommand::Invalidate);
                        }
                    }
                    (_, KeyCode::BackTab) => {
                        if state.select_tab(state.tab + TAB_TITLES.len() - 1) {
                            let _ = cmd_tx.send(UiCommand::Invalidate);
                        }
                    }
                    (_, KeyCode::Enter) => {
                        submit(&mut state, &cmd_tx);
                    }
                    (_, KeyCode::Up) => {
                        if state.tab == 1 && !state.is_loading() {
                            state.focus_prev();
                        }
                    }
                    (_, KeyCode::Down) => {
                        if state.tab == 1 && !state.is_loading() {
                            state.focus_next();
                        }
                    }
                    (_, KeyCode::Backspace) => {
                        if state.tab < 2 && !state.is_loading() {
                            state.backspace();
                        }
                    }
                    (_, KeyCode::Char('q')) if state.tab == 2 => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    (_, KeyCode::Char(c)) => {
                        // Inputs are frozen while a request is in flight,
                        // same as the disabled form fields.
                        if state.tab < 2 && !state.is_loading() {
                            state.type_char(c);
                        }
                    }
                    _ => {}
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

/// Validate the active tab's input and hand a request to the controller.
/// Validation failures become the error banner without any network call.
fn submit(state: &mut UiState, cmd_tx: &UnboundedSender<UiCommand>) {
    if state.tab > 1 || state.is_loading() {
        return;
    }
    let request = match state.mode {
        Mode::ByHandle => validate::validate_handle(&state.username).map(SubmitRequest::Handle),
        Mode::ByFeatures => {
            validate::validate_feature_set(&state.features).map(SubmitRequest::Features)
        }
    };
    match request {
        Ok(req) => {
            let token = state.begin_submission();
            let _ = cmd_tx.send(UiCommand::Submit {
                request: req,
                token,
            });
        }
        Err(e) => state.fail_validation(e.to_string()),
    }
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let tabs = Tabs::new(TAB_TITLES.iter().map(|t| Line::from(*t)).collect::<Vec<_>>())
        .select(state.tab)
        .block(Block::default().borders(Borders::ALL).title("authcheck"))
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        0 => draw_handle_tab(chunks[1], f, state),
        1 => draw_features_tab(chunks[1], f, state),
        _ => help::draw_help(chunks[1], f),
    }
}

fn input_style(loading: bool) -> Style {
    if loading {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}

fn draw_handle_tab(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(5),
            ]
            .as_ref(),
        )
        .split(area);

    let content = if state.username.is_empty() {
        Line::from(vec![
            Span::styled("@ ", Style::default().fg(Color::Gray)),
            Span::styled("e.g., sadinsawarangani", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![
            Span::styled("@ ", Style::default().fg(Color::Gray)),
            Span::styled(state.username.clone(), input_style(state.is_loading())),
        ])
    };
    let input = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Instagram Username")
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(input, main[0]);

    draw_results(main[1], f, state);
    draw_status(main[2], f, state);
}

fn draw_features_tab(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(5),
            ]
            .as_ref(),
        )
        .split(area);

    // First four fields as a 2x2 grid, the fifth full width (same layout
    // as the original form).
    let row0 = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(main[0]);
    let row1 = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(main[1]);
    let slots = [row0[0], row0[1], row1[0], row1[1], main[2]];

    for (idx, slot) in slots.iter().enumerate() {
        let focused = state.focus == idx;
        let value = state.feature_field(idx);
        let content = if value.is_empty() {
            Line::from(Span::styled(
                FEATURE_PLACEHOLDERS[idx],
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(Span::styled(
                value.to_string(),
                input_style(state.is_loading()),
            ))
        };
        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        let field = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .title(FEATURE_LABELS[idx])
                .border_style(border),
        );
        f.render_widget(field, *slot);
    }

    draw_results(main[3], f, state);
    draw_status(main[4], f, state);
}

/// Error banner, verdict banner and (handle mode only) the derived
/// metrics grid. Exactly one of error/result is shown at a time.
fn draw_results(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    if let Some(message) = state.error() {
        let banner = Paragraph::new(Line::from(vec![
            Span::styled("! ", Style::default().fg(Color::Red)),
            Span::styled(message.to_string(), Style::default().fg(Color::Red)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Error")
                .border_style(Style::default().fg(Color::Red)),
        );
        f.render_widget(banner, area);
        return;
    }

    let Some(verdict) = state.verdict() else {
        let hint = if state.is_loading() {
            "Analyzing..."
        } else {
            "Press Enter to analyze."
        };
        let p = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )))
        .block(Block::default().borders(Borders::ALL).title("Analysis Results"));
        f.render_widget(p, area);
        return;
    };

    let grid = state.grid_features();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(if grid.is_some() { 4 } else { 0 }),
                Constraint::Min(4),
            ]
            .as_ref(),
        )
        .split(area);

    if let Some(features) = grid {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(
                [
                    Constraint::Percentage(25),
                    Constraint::Percentage(25),
                    Constraint::Percentage(25),
                    Constraint::Percentage(25),
                ]
                .as_ref(),
            )
            .split(rows[0]);
        for ((label, value), cell) in normalize::metric_rows(features).into_iter().zip(cells.iter())
        {
            let p = Paragraph::new(vec![
                Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
                Line::from(Span::styled(
                    value,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
            ])
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(p, *cell);
        }
    }

    let color = match verdict {
        Verdict::Real => Color::Green,
        Verdict::Fake => Color::Red,
    };
    let banner = Paragraph::new(vec![
        Line::from(Span::styled(
            normalize::verdict_headline(verdict),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            normalize::verdict_detail(verdict),
            Style::default().fg(color),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Analysis Results")
            .border_style(Style::default().fg(color)),
    );
    f.render_widget(banner, rows[1]);
}

fn draw_status(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let mut lines = vec![Line::from(vec![
        Span::styled("Mode: ", Style::default().fg(Color::Gray)),
        Span::raw(match state.mode {
            Mode::ByHandle => "By Username",
            Mode::ByFeatures => "By Features",
        }),
        Span::raw("   "),
        Span::styled("Analyzing: ", Style::default().fg(Color::Gray)),
        Span::styled(
            if state.is_loading() { "YES" } else { "no" },
            if state.is_loading() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            },
        ),
    ])];

    if !state.info.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Info: ", Style::default().fg(Color::Gray)),
            Span::raw(state.info.clone()),
        ]));
    }

    lines.push(Line::from(
        "Keys: enter analyze | Ctrl-R reset | tab switch | up/down field | Ctrl-C quit",
    ));

    let status =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, area);
}
