//! Cosmetic progress spinner.
//!
//! Polls the liveness of the single in-flight backend subprocess at a fixed
//! interval until it exits. Purely a UI affordance; the dispatcher does not
//! depend on it for ordering or correctness.

use crate::error::{Result, WareError};
use crate::ui;
use colored::Colorize;
use std::io::{self, Write};
use std::process::{Command, Output, Stdio};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct Spinner {
    message: String,
    current_frame: usize,
    active: bool,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            current_frame: 0,
            active: !ui::is_quiet(),
        }
    }

    pub fn tick(&mut self) {
        if !self.active {
            return;
        }
        let frame = FRAMES[self.current_frame % FRAMES.len()];
        self.current_frame += 1;
        print!("\r{} {}...", frame.cyan().bold(), self.message);
        io::stdout().flush().unwrap_or(());
    }

    pub fn clear(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        print!("\r{:width$}\r", "", width = self.message.len() + 8);
        io::stdout().flush().unwrap_or(());
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if self.active {
            self.clear();
        }
    }
}

/// Run a command with captured output while a spinner shows liveness.
/// Quiet mode skips the drawing entirely and just waits.
///
/// The pipes are drained on a separate thread; waiting on the child without
/// reading would stall it once its output exceeds the pipe buffer.
pub fn capture_with_spinner(program: &str, args: &[&str], message: &str) -> Result<Output> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| WareError::SystemCommandFailed {
            command: format!("{} {}", program, args.join(" ")),
            reason: e.to_string(),
        })?;

    let reader = std::thread::spawn(move || child.wait_with_output());

    let mut spinner = Spinner::new(message);
    while !reader.is_finished() {
        spinner.tick();
        std::thread::sleep(POLL_INTERVAL);
    }
    spinner.clear();

    let output = reader
        .join()
        .map_err(|_| WareError::Other("subprocess reader thread panicked".to_string()))??;
    Ok(output)
}
