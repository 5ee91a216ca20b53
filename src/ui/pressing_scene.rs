//! Pressing station rendering: the press plate, the leaf stack under it and
//! the pressure gauge.

use super::cell_buffer::CellBuffer;
use super::game_common::{
    create_station_layout, info_line, render_info_panel_frame, render_status_bar,
    render_too_small, verdict_color,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use teacraft::process::RunPhase;
use teacraft::workshop::pressing::{
    press_view, PressView, PressingStation, LEAF_HEIGHT_FULL, PRESS_TRAVEL,
};

const MIN_WIDTH: u16 = 50;
const MIN_HEIGHT: u16 = 16;

const PRESS_WIDTH: i32 = 20;

pub fn render_pressing_scene(frame: &mut Frame, area: Rect, station: &PressingStation) {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area, "Pressing", MIN_WIDTH, MIN_HEIGHT);
        return;
    }

    let view = press_view(station);
    let layout = create_station_layout(frame, area, " Pressing ", Color::Magenta, 10, 24);

    render_press(frame, layout.content, &view);
    render_status_bar_content(frame, layout.status_bar, station, &view);
    render_info_panel(frame, layout.info_panel, station, &view);
}

fn gauge_color(gauge: f64) -> Color {
    if gauge > 80.0 {
        Color::Red
    } else if gauge > 40.0 {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn render_press(frame: &mut Frame, area: Rect, view: &PressView) {
    let mut buffer = CellBuffer::new(area.width, area.height);
    let w = buffer.width() as i32;
    let h = buffer.height() as i32;
    let x = (w - PRESS_WIDTH) / 2;
    let base = h - 1;

    // The leaf stack, at full height, fills the space between base and the
    // resting plate.
    let stack_rows = (h - 4).max(2) as f64;
    let row_per_unit = stack_rows / (LEAF_HEIGHT_FULL + PRESS_TRAVEL);

    let bed = "▀".repeat(PRESS_WIDTH as usize + 4);
    buffer.put_str(x - 2, base, &bed, Color::Rgb(120, 90, 50));

    let leaf_rows = (view.leaf_height * row_per_unit).round() as i32;
    if view.cake_visible {
        let cake = format!("({})", "▒".repeat(PRESS_WIDTH as usize - 8));
        buffer.put_str(x + 3, base - 1, &cake, Color::Rgb(110, 80, 40));
        buffer.put_str(x + 5, base - 2, "tea cake", Color::Yellow);
    } else {
        for r in 0..leaf_rows {
            let ch = if r % 2 == 0 { '▓' } else { '▒' };
            let layer = ch.to_string().repeat(PRESS_WIDTH as usize - 2);
            buffer.put_str(x + 1, base - 1 - r, &layer, Color::Rgb(70, 130, 50));
        }
    }

    // Plate rests on the stack top, then travels down while pressing.
    let rest_y = base - 1 - (LEAF_HEIGHT_FULL * row_per_unit).round() as i32 - 1;
    let plate_y = rest_y + (view.plate_offset * row_per_unit).round() as i32;
    let plate_y = plate_y.min(base - 1 - leaf_rows);
    for y in 0..plate_y {
        buffer.put(x + PRESS_WIDTH / 2, y, '║', Color::DarkGray);
    }
    buffer.put_str(x, plate_y, &"█".repeat(PRESS_WIDTH as usize), Color::Gray);

    buffer.render(frame, area);
}

fn render_status_bar_content(
    frame: &mut Frame,
    area: Rect,
    station: &PressingStation,
    view: &PressView,
) {
    let (color, controls): (Color, &[(&str, &str)]) = match station.driver.phase() {
        RunPhase::Idle => (Color::Magenta, &[("[Space]", "Press"), ("[Tab]", "Next step")]),
        RunPhase::Running => (Color::White, &[("[Space]", "Stop"), ("[Tab]", "Next step")]),
        RunPhase::Finished { verdict, .. } => (
            verdict_color(verdict),
            &[("[Space]", "Press again"), ("[Tab]", "Next step")],
        ),
    };
    render_status_bar(frame, area, view.status, color, controls);
}

fn render_info_panel(frame: &mut Frame, area: Rect, station: &PressingStation, view: &PressView) {
    if area.width < 2 {
        return;
    }

    let inner = render_info_panel_frame(frame, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let verdict = station.driver.verdict();
    let lines = vec![
        info_line(
            "Stage:  ",
            format!("{:.0}%", station.progress()),
            Color::White,
        ),
        info_line(
            "Result: ",
            verdict.map(|v| v.name()).unwrap_or("-").to_string(),
            verdict.map(verdict_color).unwrap_or(Color::DarkGray),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Magenta))
        .label(format!("{:.0}%", station.progress()))
        .ratio((station.progress() / 100.0).clamp(0.0, 1.0));
    frame.render_widget(progress, chunks[1]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Pressure"))
        .gauge_style(Style::default().fg(gauge_color(view.gauge)))
        .label(format!("{:.0}%", view.gauge))
        .ratio((view.gauge / 100.0).clamp(0.0, 1.0));
    frame.render_widget(gauge, chunks[2]);
}
