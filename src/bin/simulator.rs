//! Teacraft Headless Process Simulator
//!
//! Sweeps control values for each station without any UI and prints the
//! verdict each setting produces. Uses the same station tick functions as
//! the terminal workshop.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --station NAME  steaming, grinding or pressing (default: all)
//!   --step N        Heat step for the steaming sweep (default: 10)
//!   --seed N        RNG seed (default: 42)
//!   --verbose       Print every run as it finishes
//!   --quiet         Only the per-station summary

use rand::Rng;
use teacraft::simulator::{run_simulation, SimConfig};
use teacraft::utils::logging::init_stderr_logging;
use teacraft::workshop::CraftStep;

struct CliConfig {
    sim: SimConfig,
    quiet: bool,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> T {
    match value.and_then(|v| v.parse().ok()) {
        Some(v) => v,
        None => {
            eprintln!("{flag} requires a value");
            print_usage();
            std::process::exit(1);
        }
    }
}

fn parse_station(name: &str) -> Option<CraftStep> {
    CraftStep::ALL
        .into_iter()
        .find(|step| step.name().eq_ignore_ascii_case(name))
}

fn parse_args() -> CliConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = CliConfig {
        sim: SimConfig::default(),
        quiet: false,
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--station" => {
                i += 1;
                let name: String = parse_value("--station", args.get(i));
                match parse_station(&name) {
                    Some(step) => config.sim.stations = vec![step],
                    None => {
                        eprintln!("Unknown station: {name}");
                        print_usage();
                        std::process::exit(1);
                    }
                }
            }
            "--step" => {
                i += 1;
                config.sim.heat_step = parse_value("--step", args.get(i));
            }
            "--seed" => {
                i += 1;
                config.sim.seed = parse_value("--seed", args.get(i));
            }
            "--random-seed" => config.sim.seed = rand::thread_rng().gen(),
            "--verbose" => config.sim.verbosity = 2,
            "--quiet" => {
                config.quiet = true;
                config.sim.verbosity = 0;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    config
}

fn print_usage() {
    eprintln!(
        "Teacraft Headless Process Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --station NAME  steaming, grinding or pressing (default: all)\n\
         \x20 --step N        Heat step for the steaming sweep (default: 10)\n\
         \x20 --seed N        RNG seed (default: 42)\n\
         \x20 --random-seed   Pick a random seed\n\
         \x20 --verbose       Print every run as it finishes\n\
         \x20 --quiet         Only the per-station summary\n\
         \x20 --help, -h      Show this help"
    );
}

fn main() {
    let config = parse_args();
    init_stderr_logging(if config.sim.verbosity >= 2 { "debug" } else { "warn" });

    if !config.quiet {
        let names: Vec<&str> = config.sim.stations.iter().map(|s| s.name()).collect();
        eprintln!(
            "Teacraft Simulator: stations={} heat step={} seed={}",
            names.join(","),
            config.sim.heat_step,
            config.sim.seed,
        );
    }

    let report = run_simulation(&config.sim);

    if !config.quiet {
        print!("{}", report.to_table());
        println!();
    }
    for line in report.summary_lines() {
        println!("{line}");
    }
    if report.unfinished > 0 {
        println!("{} run(s) did not finish", report.unfinished);
    }
}
