use std::io::{self, BufRead};
use std::thread;

use crate::runner::Controls;

/// A line typed on stdin while the simulation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Quit,
    Unknown,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        if line.chars().all(|c| c == ' ') {
            // bare Enter or space
            return Command::TogglePause;
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "p" | "pause" => Command::TogglePause,
            "q" | "quit" | "exit" => Command::Quit,
            _ => Command::Unknown,
        }
    }
}

/// Apply one command. Returns `false` once input should no longer be read.
pub fn apply(command: Command, controls: &Controls) -> bool {
    match command {
        Command::TogglePause => {
            let paused = controls.toggle_pause();
            log::info!("Simulation {}", if paused { "paused" } else { "resumed" });
            true
        }
        Command::Quit => {
            log::info!("Stop requested");
            controls.stop();
            false
        }
        Command::Unknown => {
            log::warn!("Unknown command (Enter = pause/resume, q = quit)");
            true
        }
    }
}

/// Read commands from `reader` until EOF, a read error, or quit.
pub fn read_commands<R: BufRead>(reader: R, controls: &Controls) {
    for line in reader.lines().map_while(Result::ok) {
        let line = line.trim_end_matches('\r');
        if !apply(Command::parse(line), controls) {
            return;
        }
    }
}

/// Spawn a background thread that drives `controls` from stdin.
///
/// The thread is detached; it ends on EOF or quit, or with the process.
pub fn spawn_input_thread(controls: Controls) -> thread::JoinHandle<()> {
    thread::spawn(move || read_commands(io::stdin().lock(), &controls))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse(""), Command::TogglePause);
        assert_eq!(Command::parse(" "), Command::TogglePause);
        assert_eq!(Command::parse("p"), Command::TogglePause);
        assert_eq!(Command::parse(" Pause "), Command::TogglePause);
        assert_eq!(Command::parse("q"), Command::Quit);
        assert_eq!(Command::parse("QUIT"), Command::Quit);
        assert_eq!(Command::parse("exit"), Command::Quit);
        assert_eq!(Command::parse("jump"), Command::Unknown);
    }

    #[test]
    fn enter_toggles_pause() {
        let controls = Controls::new();
        read_commands(Cursor::new("\n"), &controls);
        assert!(controls.is_paused());
        read_commands(Cursor::new("\n\n"), &controls);
        assert!(controls.is_paused());
        read_commands(Cursor::new("p\r\n"), &controls);
        assert!(!controls.is_paused());
    }

    #[test]
    fn quit_stops_and_ignores_the_rest() {
        let controls = Controls::new();
        read_commands(Cursor::new("x\nq\np\n"), &controls);
        assert!(controls.is_stopped());
        assert!(!controls.is_paused());
    }

    #[test]
    fn eof_leaves_controls_untouched() {
        let controls = Controls::new();
        read_commands(Cursor::new(""), &controls);
        assert!(!controls.is_stopped());
        assert!(!controls.is_paused());
    }
}
