//! Live chart pinned to the top of the terminal
//!
//! The chart owns the top rows of the screen. A scroll region below it keeps
//! the echoed serial lines and log output scrolling underneath without
//! overwriting the plot.

use super::canvas::PanelText;
use super::{Quantity, Render};
use crate::error::RenderError;
use crate::telemetry::RollingWindow;
use chrono::Local;
use colored::{Color, Colorize};
use std::io::{self, Write};

/// Grid rows per panel
pub const PLOT_ROWS: usize = 10;

/// Default plot width in columns, excluding the y-axis gutter
pub const DEFAULT_WIDTH: u16 = 72;

const PANELS: [(Quantity, Color); 2] = [
    (Quantity::Temperature, Color::Red),
    (Quantity::Humidity, Color::Blue),
];

/// Two stacked panels drawn with ANSI cursor control
pub struct TerminalChart<W: Write> {
    out: W,
    width: usize,
    source: String,
    active: bool,
}

impl<W: Write> TerminalChart<W> {
    /// `source` describes the stream being plotted, shown in the header
    pub fn new(out: W, width: usize, source: impl Into<String>) -> Self {
        Self {
            out,
            width,
            source: source.into(),
            active: false,
        }
    }

    /// Screen rows taken by a frame: header, two panels, blank separator
    pub fn reserved_rows() -> usize {
        1 + PANELS.len() * (PLOT_ROWS + 3) + 1
    }

    // Clear the screen and confine scrolling to the rows under the chart
    fn begin(&mut self) -> io::Result<()> {
        let top = Self::reserved_rows() + 1;
        write!(self.out, "\x1b[2J\x1b[{top}r\x1b[{top};1H")?;
        self.active = true;
        Ok(())
    }

    fn frame(&self, window: &RollingWindow) -> Vec<String> {
        let mut lines = Vec::with_capacity(Self::reserved_rows());

        let latest = window
            .latest()
            .map(|s| format!("#{} {:.1} °C {:.1}%", s.index, s.temperature, s.humidity))
            .unwrap_or_default();
        lines.push(format!(
            "{} {}  {} {}/{}  {} {}  {} {}",
            "sensor-plot".cyan().bold(),
            self.source.white(),
            "samples".dimmed(),
            window.len(),
            window.capacity(),
            "last".dimmed(),
            latest,
            "updated".dimmed(),
            Local::now().format("%H:%M:%S"),
        ));

        for (quantity, color) in PANELS {
            let panel = PanelText::render(
                quantity,
                window.indices(),
                quantity.values(window),
                quantity.mean(window),
                self.width,
                PLOT_ROWS,
            );

            lines.push(panel.heading(self.width).bold().to_string());
            for (gutter, plot) in &panel.rows {
                lines.push(format!("{}{}", gutter.dimmed(), plot.color(color)));
            }
            lines.push(panel.axis.dimmed().to_string());
            lines.push(panel.ticks.dimmed().to_string());
        }

        lines.push(String::new());
        lines
    }
}

impl<W: Write> Render for TerminalChart<W> {
    fn draw(&mut self, window: &RollingWindow) -> Result<(), RenderError> {
        if !self.active {
            self.begin()?;
        }

        let lines = self.frame(window);

        // Save cursor, paint the reserved rows, restore
        write!(self.out, "\x1b7")?;
        for (i, line) in lines.iter().enumerate() {
            write!(self.out, "\x1b[{};1H\x1b[2K{}", i + 1, line)?;
        }
        write!(self.out, "\x1b8")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for TerminalChart<W> {
    fn drop(&mut self) {
        if self.active {
            // Reset the scroll region and leave the cursor at the bottom
            let _ = write!(self.out, "\x1b[r\x1b[999;1H\n");
            let _ = self.out.flush();
        }
    }
}
