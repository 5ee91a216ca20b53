pub mod ascii_scaler;
pub mod cell_buffer;
pub mod game_common;
pub mod grinding_scene;
pub mod pressing_scene;
pub mod steaming_scene;

use game_common::{render_station_closed, verdict_color};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use teacraft::workshop::{CraftStep, Workshop};

/// Draw the whole workshop: timeline on top, selected station below, and a
/// one-line footer.
pub fn draw_workshop(frame: &mut Frame, workshop: &Workshop, anim_ms: u64) {
    let size = frame.size();

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Timeline
            Constraint::Min(0),    // Station
            Constraint::Length(1), // Footer
        ])
        .split(size);

    draw_timeline(frame, v_chunks[0], workshop);

    let area = v_chunks[1];
    match workshop.selected() {
        CraftStep::Steaming => match workshop.steaming() {
            Some(station) => steaming_scene::render_steaming_scene(frame, area, station, anim_ms),
            None => render_station_closed(frame, area, CraftStep::Steaming.name()),
        },
        CraftStep::Grinding => match workshop.grinding() {
            Some(station) => grinding_scene::render_grinding_scene(frame, area, station),
            None => render_station_closed(frame, area, CraftStep::Grinding.name()),
        },
        CraftStep::Pressing => match workshop.pressing() {
            Some(station) => pressing_scene::render_pressing_scene(frame, area, station),
            None => render_station_closed(frame, area, CraftStep::Pressing.name()),
        },
    }

    draw_footer(frame, v_chunks[2], workshop);
}

/// The tea-making timeline. Running stations are marked so a run left going
/// on another step stays visible.
fn draw_timeline(frame: &mut Frame, area: Rect, workshop: &Workshop) {
    let titles: Vec<Line> = CraftStep::ALL
        .iter()
        .map(|&step| {
            let marker = if workshop.is_running(step) { " *" } else { "" };
            let style = if workshop.has_station(step) {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(
                format!("{}. {}{}", step.index() + 1, step.name(), marker),
                style,
            ))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Tea Workshop "),
        )
        .select(workshop.selected().index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("→");
    frame.render_widget(tabs, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, workshop: &Workshop) {
    let mut spans = vec![Span::styled(
        " [1-3] Step  [Tab] Next  [Q] Quit",
        Style::default().fg(Color::DarkGray),
    )];
    if let Some((step, verdict)) = workshop.last_verdict() {
        spans.push(Span::styled("   Last: ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            format!("{} - {}", step.name(), verdict.name()),
            Style::default().fg(verdict_color(verdict)),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
