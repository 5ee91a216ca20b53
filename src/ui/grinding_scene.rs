//! Grinding station rendering.
//!
//! The particle field lives on a fixed logical canvas; it is mapped onto the
//! content area here, with the leaf pile and the wobbling grindstone drawn
//! underneath the dust.

use super::ascii_scaler::{apply_density_shading, fit_size, scale_sprite};
use super::cell_buffer::CellBuffer;
use super::game_common::{
    create_station_layout, info_line, render_info_panel_frame, render_status_bar,
    render_too_small, verdict_color,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use teacraft::process::RunPhase;
use teacraft::workshop::grinding::{
    status_text, stone_offset, GrindingStation, Particle, PressureLevel,
};

const MIN_WIDTH: u16 = 50;
const MIN_HEIGHT: u16 = 16;

pub fn render_grinding_scene(frame: &mut Frame, area: Rect, station: &GrindingStation) {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area, "Grinding", MIN_WIDTH, MIN_HEIGHT);
        return;
    }

    let layout = create_station_layout(frame, area, " Grinding ", Color::Green, 10, 24);

    render_mill(frame, layout.content, station);
    render_status_bar_content(frame, layout.status_bar, station);
    render_info_panel(frame, layout.info_panel, station);
}

pub fn pressure_color(level: PressureLevel) -> Color {
    match level {
        PressureLevel::Light => Color::LightGreen,
        PressureLevel::Medium => Color::Yellow,
        PressureLevel::Heavy => Color::Red,
    }
}

/// Dust glyph and shade for a particle.
fn particle_cell(particle: &Particle) -> (char, Color) {
    let ch = if particle.size > 5.0 {
        '●'
    } else if particle.size > 3.0 {
        '•'
    } else {
        '·'
    };
    let level = (80.0 + particle.opacity.clamp(0.0, 1.0) * 120.0) as u8;
    (ch, Color::Rgb(level / 2, level, level / 3))
}

fn render_mill(frame: &mut Frame, area: Rect, station: &GrindingStation) {
    let mut buffer = CellBuffer::new(area.width, area.height);
    let (canvas_w, canvas_h) = station.field.size();
    let x_scale = buffer.width() as f64 / canvas_w;
    let y_scale = buffer.height() as f64 / canvas_h;
    let cx = buffer.width() as i32 / 2;
    let cy = buffer.height() as i32 / 2;

    if let Some(assets) = &station.assets {
        // Leaf pile shrinks with the leaves that are left.
        let remaining = station.leaves_remaining() / 100.0;
        let (lw, lh) = fit_size(&assets.leaves, buffer.width(), buffer.height());
        let leaves = apply_density_shading(scale_sprite(&assets.leaves, lw, lh), remaining);
        let (lx, ly) = (cx - lw as i32 / 2, cy - lh as i32 / 2);
        buffer.blit_lines(lx, ly, &leaves, Color::Rgb(70, 140, 50));

        let (dx, dy) = stone_offset(station);
        let (sw, sh) = fit_size(&assets.stone, buffer.width(), buffer.height());
        let stone = scale_sprite(&assets.stone, sw, sh);
        let sx = cx - sw as i32 / 2 + (dx * x_scale).round() as i32;
        let sy = cy - sh as i32 / 2 + (dy * y_scale).round() as i32;
        buffer.blit_lines(sx, sy, &stone, Color::Gray);
    }

    for particle in station.field.particles() {
        let (ch, color) = particle_cell(particle);
        let x = (particle.x * x_scale).floor() as i32;
        let y = (particle.y * y_scale).floor() as i32;
        buffer.put(x, y, ch, color);
    }

    buffer.render(frame, area);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, station: &GrindingStation) {
    let (color, controls): (Color, &[(&str, &str)]) = match station.driver.phase() {
        RunPhase::Idle => (
            Color::Green,
            &[("[Space]", "Grind"), ("[+/-]", "Pressure"), ("[Tab]", "Next step")],
        ),
        RunPhase::Running => (
            Color::White,
            &[("[Space]", "Stop"), ("[+/-]", "Pressure"), ("[Tab]", "Next step")],
        ),
        RunPhase::Finished { verdict, .. } => (
            verdict_color(verdict),
            &[("[Space]", "Grind again"), ("[+/-]", "Pressure"), ("[Tab]", "Next step")],
        ),
    };
    render_status_bar(frame, area, status_text(station), color, controls);
}

fn render_info_panel(frame: &mut Frame, area: Rect, station: &GrindingStation) {
    if area.width < 2 {
        return;
    }

    let inner = render_info_panel_frame(frame, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let mut lines: Vec<Line> = vec![
        info_line(
            "Pressure: ",
            station.pressure.name().to_string(),
            pressure_color(station.pressure),
        ),
        info_line(
            "Dust:     ",
            format!("{}", station.field.len()),
            Color::White,
        ),
    ];
    if let Some(verdict) = station.driver.verdict() {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            verdict.name(),
            Style::default()
                .fg(verdict_color(verdict))
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Green))
        .label(format!("{:.1}%", station.progress()))
        .ratio((station.progress() / 100.0).clamp(0.0, 1.0));
    frame.render_widget(progress, chunks[1]);

    let leaves = station.leaves_remaining();
    let leaves_gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Leaves"))
        .gauge_style(Style::default().fg(Color::LightGreen))
        .label(format!("{:.1}%", leaves))
        .ratio((leaves / 100.0).clamp(0.0, 1.0));
    frame.render_widget(leaves_gauge, chunks[2]);
}
