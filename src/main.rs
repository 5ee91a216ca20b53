mod input;
mod ui;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::{map_key, AppAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use teacraft::build_info;
use teacraft::config::{WorkshopConfig, CONFIG_FILE};
use teacraft::utils::logging::init_file_logging;
use teacraft::utils::persistence::data_path;
use teacraft::workshop::Workshop;
use tracing::info;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "init-config" => {
                let path = data_path(CONFIG_FILE)?;
                if path.exists() {
                    println!("Config already exists at {}", path.display());
                } else {
                    WorkshopConfig::default().save()?;
                    println!("Wrote default config to {}", path.display());
                }
                std::process::exit(0);
            }
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Teacraft - Terminal Tea Workshop\n");
                println!("Usage: teacraft [command]\n");
                println!("Commands:");
                println!("  init-config  Write the default config to ~/.teacraft/config.json");
                println!("  --version    Show version information");
                println!("  --help       Show this help message");
                println!("\nLogs go to ~/.teacraft/teacraft.log (filter with RUST_LOG).");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'teacraft --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let config = WorkshopConfig::load();
    let log_path = init_file_logging(&config.log_filter)?;
    info!(
        version = %build_info::version_line(),
        log = %log_path.display(),
        "teacraft starting"
    );

    let mut rng = rand::thread_rng();
    let mut workshop = Workshop::new(&config, &mut rng);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_workshop(&mut terminal, &mut workshop, &config, &mut rng);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some((step, verdict)) = workshop.last_verdict() {
        println!("Last result: {} - {}", step.name(), verdict.name());
    }
    info!("teacraft closed");
    result
}

fn run_workshop<R: rand::Rng>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    workshop: &mut Workshop,
    config: &WorkshopConfig,
    rng: &mut R,
) -> io::Result<()> {
    let started = Instant::now();
    let mut last_advance = Instant::now();
    let frame = Duration::from_millis(config.frame_ms.max(1));

    loop {
        let anim_ms = started.elapsed().as_millis() as u64;
        terminal.draw(|f| ui::draw_workshop(f, workshop, anim_ms))?;

        if event::poll(frame)? {
            if let Event::Key(key_event) = event::read()? {
                match map_key(key_event) {
                    AppAction::Quit => return Ok(()),
                    AppAction::Workshop(input) => {
                        workshop.handle_input(input, rng);
                    }
                    AppAction::None => {}
                }
            }
        }

        // Whole milliseconds only; the remainder carries into the next frame.
        let dt_ms = last_advance.elapsed().as_millis() as u64;
        if dt_ms > 0 {
            last_advance += Duration::from_millis(dt_ms);
            workshop.advance(dt_ms, rng);
        }
    }
}
