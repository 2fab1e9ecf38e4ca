//! Progress reporting for debate rounds and evaluation

use arena_application::DebateProgressNotifier;
use arena_domain::Model;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

/// Streams the opponent's reply as it arrives.
///
/// Chunks are written and flushed one by one so the reply appears as the
/// model produces it.
struct StreamWriter {
    out: Mutex<Box<dyn Write + Send>>,
}

impl StreamWriter {
    fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn write(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = out.write_all(text.as_bytes());
            let _ = out.flush();
        }
    }

    fn stream_start(&self, round: usize, model: &Model) {
        self.write(&format!(
            "\n{} {}\n",
            format!("AI · round {}", round).yellow().bold(),
            format!("({})", model).dimmed()
        ));
    }

    fn stream_end(&self, success: bool) {
        if success {
            self.write("\n\n");
        } else {
            self.write(&format!("\n{}\n\n", "x reply interrupted".red()));
        }
    }
}

/// Reports progress with a live opponent stream and a judge spinner
pub struct ProgressReporter {
    stream: StreamWriter,
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    /// Stream the opponent's reply into `out` instead of stdout.
    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            stream: StreamWriter::new(out),
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    #[cfg(test)]
    fn is_spinning(&self) -> bool {
        self.spinner
            .lock()
            .map(|spinner| spinner.is_some())
            .unwrap_or(false)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateProgressNotifier for ProgressReporter {
    fn on_opponent_stream_start(&self, round: usize, model: &Model) {
        self.stream.stream_start(round, model);
    }

    fn on_opponent_chunk(&self, chunk: &str) {
        self.stream.write(chunk);
    }

    fn on_opponent_stream_end(&self, success: bool) {
        self.stream.stream_end(success);
    }

    fn on_evaluation_start(&self, model: &Model, attempt: usize) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        let spinner = slot.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.set_prefix("Judging");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        if attempt == 1 {
            spinner.set_message(format!("{} is scoring the debate...", model));
        } else {
            spinner.set_message(format!("{} is scoring the debate (attempt {})...", model, attempt));
        }
    }

    fn on_verdict_rejected(&self, attempt: usize, reason: &str) {
        let Ok(slot) = self.spinner.lock() else {
            return;
        };
        if let Some(spinner) = slot.as_ref() {
            spinner.println(format!(
                "  {} attempt {} did not follow the scoring format: {}",
                "!".yellow(),
                attempt,
                reason
            ));
        }
    }

    fn on_evaluation_end(&self, success: bool) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        if let Some(spinner) = slot.take() {
            if success {
                spinner.finish_with_message(format!("{}", "verdict ready".green()));
            } else {
                spinner.abandon_with_message(format!("{}", "evaluation failed".red()));
            }
        }
    }
}

/// Simple text-based progress (no spinner)
pub struct SimpleProgress {
    stream: StreamWriter,
}

impl SimpleProgress {
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            stream: StreamWriter::new(out),
        }
    }
}

impl Default for SimpleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateProgressNotifier for SimpleProgress {
    fn on_opponent_stream_start(&self, round: usize, model: &Model) {
        self.stream.stream_start(round, model);
    }

    fn on_opponent_chunk(&self, chunk: &str) {
        self.stream.write(chunk);
    }

    fn on_opponent_stream_end(&self, success: bool) {
        self.stream.stream_end(success);
    }

    fn on_evaluation_start(&self, model: &Model, attempt: usize) {
        self.stream.write(&format!(
            "{} {} ({}, attempt {})\n",
            "->".cyan(),
            "Judging".bold(),
            model,
            attempt
        ));
    }

    fn on_verdict_rejected(&self, attempt: usize, reason: &str) {
        self.stream.write(&format!(
            "  {} attempt {} rejected: {}\n",
            "!".yellow(),
            attempt,
            reason
        ));
    }

    fn on_evaluation_end(&self, success: bool) {
        if success {
            self.stream.write(&format!("  {} verdict ready\n", "v".green()));
        } else {
            self.stream.write(&format!("  {} evaluation failed\n", "x".red()));
        }
    }
}
