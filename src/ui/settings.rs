use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::App;
use rondo::config::SettingField;

pub fn render_settings(app: &mut App, f: &mut Frame) {
    let (Some(engine), Some(editor)) = (app.engine.as_ref(), app.editor.as_ref()) else {
        return;
    };
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(6)
        .vertical_margin(2)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(SettingField::ALL.len() as u16 + 2),
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(area);

    let title = Paragraph::new(Span::styled(
        format!("{} settings", engine.program().name),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let rows: Vec<Line> = SettingField::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = i == editor.selected_index();
            let marker = if selected { "▸ " } else { "  " };
            let value = format!("◂ {}{} ▸", field.get(&editor.draft), field.unit());
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(
                format!("{}{:<12} {:>10}", marker, field.to_string(), value),
                style,
            ))
        })
        .collect();

    let fields = Paragraph::new(rows)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(fields, chunks[1]);

    let hints = Paragraph::new(Span::styled(
        "(↑/↓) field  (←/→) adjust  (enter) save  (esc) cancel",
        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
    ))
    .alignment(Alignment::Center);
    f.render_widget(hints, chunks[3]);
}
