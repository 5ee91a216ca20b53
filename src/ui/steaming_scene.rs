//! Steaming station rendering: steamer basket over a five-flame fire,
//! steam wisps rising with the heat, and the moisture/progress readouts.

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
use teacraft::workshop::steaming::{
    leaf_rgb, status_text, steam_visuals, HeatLevel, MoistureBand, SteamingStation,
    IDEAL_HEAT_HIGH, IDEAL_HEAT_LOW,
};

const MIN_WIDTH: u16 = 50;
const MIN_HEIGHT: u16 = 16;

const BASKET_WIDTH: i32 = 22;
const BASKET_HEIGHT: i32 = 4;
const BASKET_COLOR: Color = Color::Rgb(160, 120, 60);

pub fn render_steaming_scene(
    frame: &mut Frame,
    area: Rect,
    station: &SteamingStation,
    anim_ms: u64,
) {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area, "Steaming", MIN_WIDTH, MIN_HEIGHT);
        return;
    }

    let layout = create_station_layout(frame, area, " Steaming ", Color::LightCyan, 10, 24);

    render_steamer(frame, layout.content, station, anim_ms);
    render_status_bar_content(frame, layout.status_bar, station);
    render_info_panel(frame, layout.info_panel, station);
}

pub fn heat_color(level: HeatLevel) -> Color {
    match level {
        HeatLevel::Gentle => Color::LightBlue,
        HeatLevel::Moderate => Color::Yellow,
        HeatLevel::Fierce => Color::Red,
    }
}

pub fn moisture_color(band: MoistureBand) -> Color {
    match band {
        MoistureBand::Ample => Color::Blue,
        MoistureBand::Adequate => Color::Green,
        MoistureBand::Low => Color::Rgb(255, 165, 0),
        MoistureBand::Critical => Color::Red,
    }
}

fn render_steamer(frame: &mut Frame, area: Rect, station: &SteamingStation, anim_ms: u64) {
    let mut buffer = CellBuffer::new(area.width, area.height);
    let visuals = steam_visuals(station.heat());
    let running = station.driver.is_running();

    let w = buffer.width() as i32;
    let h = buffer.height() as i32;
    let basket_x = (w - BASKET_WIDTH) / 2;
    let fire_base = h - 1;
    let basket_y = fire_base - 6 - BASKET_HEIGHT;

    // -- Fire --
    let flame_color = heat_color(visuals.heat_level);
    for (k, flame) in visuals.flames.iter().enumerate() {
        let period_ms = (flame.flicker_s * 1000.0) as u64;
        let flicker = if period_ms > 0 && (anim_ms % period_ms) < period_ms / 2 {
            0
        } else {
            1
        };
        // Flame heights are 20-60 units; one row per ten.
        let rows = (flame.height / 10.0).round() as i32 - flicker;
        let x = basket_x + 3 + k as i32 * 4;
        for r in 0..rows.max(1) {
            let ch = if r == rows - 1 { '^' } else { '▲' };
            let color = if r == 0 { Color::Red } else { flame_color };
            buffer.put(x, fire_base - r, ch, color);
        }
    }
    let grate = "▀".repeat(BASKET_WIDTH as usize);
    buffer.put_str(basket_x, fire_base, &grate, Color::DarkGray);

    // -- Basket with leaves --
    let (r, g, b) = leaf_rgb(station.progress());
    let rim = "═".repeat(BASKET_WIDTH as usize - 2);
    buffer.put_str(basket_x, basket_y, &format!("╔{}╗", rim), BASKET_COLOR);
    for row in 1..BASKET_HEIGHT {
        buffer.put(basket_x, basket_y + row, '║', BASKET_COLOR);
        buffer.put(basket_x + BASKET_WIDTH - 1, basket_y + row, '║', BASKET_COLOR);
        for col in 1..BASKET_WIDTH - 1 {
            let ch = if (col + row) % 3 == 0 { '❦' } else { '▓' };
            buffer.put(basket_x + col, basket_y + row, ch, Color::Rgb(r, g, b));
        }
    }
    buffer.put_str(
        basket_x,
        basket_y + BASKET_HEIGHT,
        &format!("╚{}╝", rim),
        BASKET_COLOR,
    );

    // -- Steam --
    if running {
        let period_ms = (visuals.particle_duration_s * 1000.0).max(1.0) as u64;
        let rise = basket_y.max(1);
        for i in 0..visuals.particle_count as u64 {
            let stagger = i * period_ms / visuals.particle_count.max(1) as u64;
            let phase = (anim_ms + stagger) % period_ms;
            let t = phase as f64 / period_ms as f64;
            let x = basket_x + 1 + ((i * 7 + 3) % (BASKET_WIDTH as u64 - 2)) as i32;
            let drift = ((t * 6.0 + i as f64).sin() * 1.5).round() as i32;
            let y = basket_y - 1 - (t * rise as f64) as i32;
            let ch = if t < 0.3 {
                '≈'
            } else if t < 0.7 {
                '~'
            } else {
                '·'
            };
            let color = if t < 0.5 { Color::White } else { Color::Gray };
            buffer.put(x + drift, y, ch, color);
        }
    }

    buffer.render(frame, area);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, station: &SteamingStation) {
    let (color, controls): (Color, &[(&str, &str)]) = match station.driver.phase() {
        RunPhase::Idle => (
            Color::LightCyan,
            &[("[Space]", "Steam"), ("[+/-]", "Heat"), ("[Tab]", "Next step")],
        ),
        RunPhase::Running => (
            Color::White,
            &[("[Space]", "Stop"), ("[+/-]", "Heat"), ("[Tab]", "Next step")],
        ),
        RunPhase::Finished { verdict, .. } => (
            verdict_color(verdict),
            &[("[Space]", "Steam again"), ("[+/-]", "Heat"), ("[Tab]", "Next step")],
        ),
    };
    render_status_bar(frame, area, status_text(station), color, controls);
}

fn render_info_panel(frame: &mut Frame, area: Rect, station: &SteamingStation) {
    if area.width < 2 {
        return;
    }

    let inner = render_info_panel_frame(frame, area);
    let visuals = steam_visuals(station.heat());
    let moisture = station.moisture();

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
            "Heat:     ",
            format!("{:.0}", station.heat()),
            heat_color(visuals.heat_level),
        ),
        info_line(
            "Fire:     ",
            visuals.heat_level.name().to_string(),
            heat_color(visuals.heat_level),
        ),
        info_line(
            "Ideal:    ",
            format!("{:.0}-{:.0}", IDEAL_HEAT_LOW, IDEAL_HEAT_HIGH),
            Color::Green,
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
        .gauge_style(Style::default().fg(Color::LightCyan))
        .label(format!("{:.1}%", station.progress()))
        .ratio((station.progress() / 100.0).clamp(0.0, 1.0));
    frame.render_widget(progress, chunks[1]);

    let moisture_gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Moisture"))
        .gauge_style(
            Style::default().fg(moisture_color(MoistureBand::from_moisture(moisture))),
        )
        .label(format!("{:.1}%", moisture))
        .ratio((moisture / 100.0).clamp(0.0, 1.0));
    frame.render_widget(moisture_gauge, chunks[2]);
}
