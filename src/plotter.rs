//! Read/plot loop
//!
//! Alternates between two states forever: blocked on the next line, then
//! redrawing and pausing after a telemetry line was accepted.
//!
//! - Every line is echoed to the output as received
//! - Lines without the prefix are otherwise ignored
//! - Telemetry lines are parsed, pushed into the window and rendered

use crate::error::PlotError;
use crate::render::Render;
use crate::serial::LineReader;
use crate::telemetry::record::DEFAULT_PREFIX;
use crate::telemetry::{PrefixFilter, RollingWindow, Sample};
use log::{debug, info};
use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Pause after each redraw so the display can catch up, in milliseconds
pub const DEFAULT_PAUSE_MS: u64 = 500;

pub const DEFAULT_PAUSE: Duration = Duration::from_millis(DEFAULT_PAUSE_MS);

/// Settings for the plot loop
#[derive(Debug, Clone)]
pub struct PlotSettings {
    /// Literal prefix of telemetry lines
    pub prefix: String,
    /// Pause after each redraw
    pub pause: Duration,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            pause: DEFAULT_PAUSE,
        }
    }
}

/// Outcome of processing one line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Line did not carry the prefix; only echoed
    Echoed,
    /// Line was parsed and the chart redrawn
    Plotted(Sample),
    /// Read was cut short by a signal; nothing was echoed or parsed
    Interrupted,
}

/// Drives a line stream into the rolling window and a renderer
pub struct Plotter<S, O, R> {
    reader: LineReader<S>,
    out: O,
    renderer: R,
    filter: PrefixFilter,
    window: RollingWindow,
    pause: Duration,
    line_count: usize,
}

impl<S: Read, O: Write, R: Render> Plotter<S, O, R> {
    pub fn new(stream: S, out: O, renderer: R, settings: PlotSettings) -> Self {
        Self {
            reader: LineReader::new(stream),
            out,
            renderer,
            filter: PrefixFilter::new(&settings.prefix),
            window: RollingWindow::default(),
            pause: settings.pause,
            line_count: 0,
        }
    }

    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    /// Read one line and act on it
    pub fn step(&mut self) -> Result<Step, PlotError> {
        let Some(line) = self.reader.read_line()? else {
            return Ok(Step::Interrupted);
        };
        if !line.is_empty() {
            self.line_count += 1;
        }

        self.out
            .write_all(line.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(PlotError::Echo)?;

        let Some(fields) = self.filter.strip(&line) else {
            return Ok(Step::Echoed);
        };

        // Parse before touching the window so a bad record leaves it intact
        let sample = Sample::parse(fields)?;
        self.window.push(sample);
        debug!(
            "Sample {} -> {} in window",
            sample.index,
            self.window.len()
        );

        self.renderer.draw(&self.window)?;
        if !self.pause.is_zero() {
            thread::sleep(self.pause);
        }

        Ok(Step::Plotted(sample))
    }

    /// Process lines until `stop` is raised or an error escapes
    pub fn run(&mut self, stop: &AtomicBool) -> Result<(), PlotError> {
        info!(
            "Plotting lines starting with {:?} (Ctrl+C to stop)",
            self.filter.prefix()
        );

        while !stop.load(Ordering::SeqCst) {
            self.step()?;
        }

        info!(
            "Stopped after {} lines, {} samples on screen",
            self.line_count,
            self.window().len()
        );
        Ok(())
    }
}
