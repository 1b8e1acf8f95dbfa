use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::App;
use rondo::util;

const SPARK_COLORS: [Color; 7] = [
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::LightYellow,
];

pub fn render_complete(app: &mut App, f: &mut Frame) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(4)
        .vertical_margin(2)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1), // headline
            Constraint::Length(1), // subtitle
            Constraint::Length(1),
            Constraint::Length(1), // stats
            Constraint::Length(1), // finished at
            Constraint::Min(1),
            Constraint::Length(1), // hints
        ])
        .split(area);

    let headline = Paragraph::new(Span::styled(
        "WORKOUT COMPLETE",
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(headline, chunks[1]);

    if let Some(engine) = app.engine.as_ref() {
        let subtitle = Paragraph::new(Span::styled(
            format!("{} {} finished", engine.program().icon, engine.program().name),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        f.render_widget(subtitle, chunks[2]);
    }

    if let Some(summary) = app.summary {
        let stats = Paragraph::new(Span::styled(
            format!(
                "{} total   {} rounds   {} sets   {}m work",
                util::format_clock(summary.elapsed_secs),
                summary.total_rounds,
                summary.sets,
                summary.work_secs / 60
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        f.render_widget(stats, chunks[4]);
    }

    if let Some(finished_at) = app.finished_at {
        let clock = Paragraph::new(Span::styled(
            format!("finished at {}", finished_at.format("%H:%M")),
            Style::default().add_modifier(Modifier::DIM),
        ))
        .alignment(Alignment::Center);
        f.render_widget(clock, chunks[5]);
    }

    let hints = Paragraph::new(Span::styled(
        "(r)estart  (enter) programs",
        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
    ))
    .alignment(Alignment::Center);
    f.render_widget(hints, chunks[7]);

    render_sparks(app, f);
}

/// Confetti drawn straight into the buffer over whatever is beneath it.
fn render_sparks(app: &App, f: &mut Frame) {
    let area = f.area();
    let buf = f.buffer_mut();

    for spark in &app.celebration.sparks {
        let (x, y) = (spark.x as i32, spark.y as i32);
        if x < 0 || y < 0 || x as u16 >= area.width || y as u16 >= area.height {
            continue;
        }
        let color = SPARK_COLORS[spark.color_index % SPARK_COLORS.len()];
        let style = if spark.fade() > 0.5 {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color).add_modifier(Modifier::DIM)
        };
        if let Some(cell) = buf.cell_mut((area.x + x as u16, area.y + y as u16)) {
            cell.set_symbol(&spark.glyph.to_string());
            cell.set_style(style);
        }
    }
}
