pub mod complete;
pub mod screen;
pub mod settings;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::App;
use rondo::engine::{Phase, TimerEngine};
use rondo::util;

const HORIZONTAL_MARGIN: u16 = 4;
const VERTICAL_MARGIN: u16 = 1;

pub fn draw(app: &mut App, f: &mut Frame) {
    screen::current_screen(&app.state).render(app, f);
    if app.show_help {
        render_help(app, f);
    }
}

pub(crate) fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Work => Color::Green,
        Phase::Rest => Color::Cyan,
        Phase::SetRest => Color::Blue,
        Phase::Countdown => Color::Yellow,
        Phase::Done => Color::Magenta,
        Phase::Idle | Phase::Paused => Color::Gray,
    }
}

fn phase_label(engine: &TimerEngine) -> &'static str {
    match engine.phase() {
        Phase::Idle => "READY",
        Phase::Countdown => "GET READY",
        Phase::Work => "WORK",
        Phase::Rest => "REST",
        Phase::SetRest => "SET REST",
        Phase::Paused => "PAUSED",
        Phase::Done => "DONE",
    }
}

/// Pad a multi-line block left so the whole block sits centered without
/// per-line centering tearing the art apart.
fn centered_lines(text: &str, area_width: u16) -> Vec<Line<'static>> {
    let block_width = text.lines().map(|l| l.width()).max().unwrap_or(0);
    let pad = (area_width as usize).saturating_sub(block_width) / 2;
    text.lines()
        .map(|l| Line::from(format!("{}{}", " ".repeat(pad), l)))
        .collect()
}

/// Centered overlay rect, sized as a percentage of the parent.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub(crate) fn render_home(app: &mut App, f: &mut Frame) {
    let area = f.area();
    let banner_height = app.banner.lines().count() as u16 + 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(banner_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let banner = Paragraph::new(centered_lines(&app.banner, chunks[0].width))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(banner, chunks[0]);

    let items: Vec<ListItem> = app
        .catalog
        .programs()
        .iter()
        .map(|p| {
            let cfg = app.configs.config_for(p);
            let title = Line::from(Span::styled(
                format!("{} {}  {}", p.icon, p.name, p.subtitle),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            let stats = Line::from(Span::styled(
                format!(
                    "   {}s work · {}s rest · {} rounds · {} sets · ~{}m",
                    cfg.work_secs,
                    cfg.rest_secs,
                    cfg.rounds,
                    cfg.sets,
                    util::estimate_total_secs(&cfg) / 60
                ),
                Style::default().add_modifier(Modifier::DIM),
            ));
            ListItem::new(vec![title, stats, Line::from("")])
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");
    let mut state = ListState::default();
    state.select(Some(app.selected));
    f.render_stateful_widget(list, chunks[1], &mut state);

    let hints = Paragraph::new(Span::styled(
        "(↑/↓) select  (enter) start  (?) help  (q)uit",
        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
    ))
    .alignment(Alignment::Center);
    f.render_widget(hints, chunks[2]);
}

pub(crate) fn render_timer(app: &mut App, f: &mut Frame) {
    let Some(engine) = app.engine.as_ref() else {
        return;
    };
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // badge
            Constraint::Min(1),    // spacer
            Constraint::Length(1), // clock / countdown
            Constraint::Length(1),
            Constraint::Length(3), // gauge
            Constraint::Length(1), // round/set/progress
            Constraint::Min(1),    // spacer
            Constraint::Length(1), // hints
        ])
        .split(area);

    let program = engine.program();
    let title = Paragraph::new(Span::styled(
        format!("{} {}", program.icon, program.name),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let color = phase_color(engine.visible_phase());
    let badge = Paragraph::new(Span::styled(
        phase_label(engine),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(badge, chunks[1]);

    if engine.phase() == Phase::Countdown {
        let countdown = Paragraph::new(Span::styled(
            engine.countdown().to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        f.render_widget(countdown, chunks[3]);
    } else {
        let clock = Paragraph::new(Span::styled(
            util::format_clock(engine.remaining()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        f.render_widget(clock, chunks[3]);
    }

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .ratio(engine.phase_progress().clamp(0.0, 1.0))
        .label(util::format_clock(engine.remaining()));
    f.render_widget(gauge, chunks[5]);

    let cfg = engine.config();
    let progress = Paragraph::new(Span::styled(
        format!(
            "Round {}/{}   Set {}/{}   {}%",
            engine.round(),
            cfg.rounds,
            engine.set(),
            cfg.sets,
            util::progress_percent(engine.round(), engine.set(), cfg)
        ),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(progress, chunks[6]);

    let hints = Paragraph::new(Span::styled(
        "(space) start/pause  (r)eset  (s)ettings  (esc) programs",
        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
    ))
    .alignment(Alignment::Center);
    f.render_widget(hints, chunks[8]);
}

fn render_help(app: &App, f: &mut Frame) {
    let area = centered_rect(50, 70, f.area());
    f.render_widget(Clear, area);
    let help = Paragraph::new(app.help.as_str())
        .block(Block::default().borders(Borders::ALL).title("help"))
        .wrap(Wrap { trim: false });
    f.render_widget(help, area);
}
