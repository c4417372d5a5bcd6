use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::Error;
use crate::grid::Grid;
use crate::topology::Topology;

/// Longest sleep between checks of the pause flag and stop signal.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shared pause flag and stop signal.
///
/// Clones share the same flags, so one copy can live on an input thread while
/// the stepping loop polls another.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    paused: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::Relaxed);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::Relaxed);
    }

    /// Flip the pause flag. Returns `true` if the simulation is now paused.
    pub fn toggle_pause(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::Relaxed)
    }

    /// Ask the loop to exit at its next wait boundary.
    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    pub fn is_stopped(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }
}

/// Receives the grid after every committed generation.
pub trait Renderer {
    fn render(&mut self, generation: u64, grid: &Grid) -> io::Result<()>;
}

/// Loop parameters.
#[derive(Debug, Clone, Copy)]
pub struct RunSettings {
    pub topology: Topology,
    /// Generations to run; 0 runs until stopped.
    pub generations: u64,
    pub delay: Duration,
}

/// Outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Generations actually stepped.
    pub generations: u64,
    /// Population after the last generation.
    pub population: usize,
    /// Whether the run ended on the stop signal rather than the generation limit.
    pub stopped: bool,
}

/// Step `grid` until the generation limit is reached or `controls` is stopped.
///
/// Generation 0 is rendered before the first step. The renderer is only ever
/// called between steps, never while one is in progress.
pub fn run(
    grid: &mut Grid,
    settings: &RunSettings,
    controls: &Controls,
    renderer: &mut dyn Renderer,
) -> Result<RunSummary, Error> {
    let mut generation = 0u64;
    renderer.render(generation, grid)?;
    wait_for_next_generation(settings.delay, controls);

    while settings.generations == 0 || generation < settings.generations {
        if controls.is_stopped() {
            break;
        }
        if controls.is_paused() {
            thread::sleep(POLL_INTERVAL);
            continue;
        }

        grid.step(settings.topology.id());
        generation += 1;
        log::debug!("Generation {generation}: population {}", grid.population());
        renderer.render(generation, grid)?;

        wait_for_next_generation(settings.delay, controls);
    }

    let stopped = controls.is_stopped();
    if stopped {
        log::info!("Simulation stopped after {generation} generations");
    }
    Ok(RunSummary {
        generations: generation,
        population: grid.population(),
        stopped,
    })
}

/// Sleep for `delay` in slices of at most [`POLL_INTERVAL`], returning early on stop.
fn wait_for_next_generation(delay: Duration, controls: &Controls) {
    let deadline = Instant::now() + delay;
    loop {
        if controls.is_stopped() {
            return;
        }
        let now = Instant::now();
        if now >= deadline {
            return;
        }
        thread::sleep((deadline - now).min(POLL_INTERVAL));
    }
}
