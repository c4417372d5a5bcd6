use std::io::{self, IsTerminal};
use std::process::ExitCode;

use gridlife::config::{ParsedArgs, Seed, SimConfig};
use gridlife::error::Error;
use gridlife::grid::Grid;
use gridlife::input;
use gridlife::render::ConsoleRenderer;
use gridlife::runner::{self, Controls, RunSettings};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("gridlife - configurable 2-D cellular automaton");
    log::info!("Usage: gridlife w=<cols> h=<rows> g=<generations> s=<delay ms> n=<topology 1-5> p=<pattern|rnd>");
    log::info!("Controls:");
    log::info!("  Enter  - Pause / Resume");
    log::info!("  q      - Quit");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        log::warn!("No arguments given, please pass values for w, h, g, s, n and p");
    }
    let parsed = SimConfig::from_args(&args);
    report(&parsed);

    match run(parsed.config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Log rejected tokens and the settings that fell back to defaults.
fn report(parsed: &ParsedArgs) {
    for warning in &parsed.warnings {
        log::warn!("{warning}");
    }
    if !parsed.defaulted.is_empty() {
        log::warn!("Default values:");
        for setting in &parsed.defaulted {
            log::warn!("  - {setting} = {}", parsed.config.describe(*setting));
        }
    }
}

fn run(config: SimConfig) -> Result<(), Error> {
    let rows = config.height as usize;
    let cols = config.width as usize;

    let mut grid = Grid::new(rows, cols)?;
    let pattern = config.seed.resolve(rows, cols, &mut rand::thread_rng());
    if config.seed == Seed::Random {
        log::info!("Randomized population = {pattern}");
    }
    grid.apply(&pattern)?;

    log::info!(
        "Grid {cols}x{rows}, neighborhood {}, {} generations, {} ms delay",
        config.topology,
        if config.generations == 0 {
            "unlimited".to_string()
        } else {
            config.generations.to_string()
        },
        config.delay_ms
    );

    let controls = Controls::new();
    let _input = input::spawn_input_thread(controls.clone());

    let stdout = io::stdout();
    let clear = stdout.is_terminal();
    let mut renderer = ConsoleRenderer::new(stdout.lock()).with_clear_screen(clear);

    let settings = RunSettings {
        topology: config.topology,
        generations: config.generations,
        delay: config.delay(),
    };
    let summary = runner::run(&mut grid, &settings, &controls, &mut renderer)?;

    log::info!(
        "Finished after {} generations, final population {}",
        summary.generations,
        summary.population
    );
    Ok(())
}
