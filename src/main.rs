//! Sensor Plot
//!
//! Live plot of temperature/humidity telemetry streamed over a serial port
//! by the SHT4x sensor firmware.
//!
//! Every line from the device is echoed to the terminal. Lines starting with
//! the filter prefix (`**` by default) are parsed as
//! `<iteration> <temperature> <humidity>` and the last 40 samples are drawn
//! as two stacked charts, each with the mean of the visible values.
//!
//! # Usage
//!
//! ```bash
//! # List available serial ports
//! sensor-plot -l
//!
//! # Plot from the first detected port at 115200 baud
//! sensor-plot
//!
//! # Plot from a specific port, baud rate and prefix
//! sensor-plot -p /dev/ttyACM0 -b 921600 -f "SHT"
//!
//! # Plot into a Rerun viewer (requires --features rerun)
//! sensor-plot --backend rerun
//! ```

mod error;
mod interrupt;
mod plotter;
mod render;
mod serial;
mod telemetry;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, IsTerminal};
use std::time::Duration;

use plotter::{PlotSettings, Plotter, DEFAULT_PAUSE_MS};
use render::terminal::DEFAULT_WIDTH;
use render::{Render, TerminalChart};
use serial::port::{DEFAULT_BAUD, READ_TIMEOUT};
use serial::{PortConfig, SerialConnection};
use telemetry::record::DEFAULT_PREFIX;

#[cfg(feature = "rerun")]
use render::rerun_viz::RerunChart;

/// Sensor Plot
///
/// Live plot of temperature/humidity telemetry from a serial port
#[derive(Parser, Debug)]
#[command(name = "sensor-plot")]
#[command(author = "Prasanna Gautam")]
#[command(version = "0.1.0")]
#[command(about = "Live plot of temperature/humidity telemetry from a serial port")]
struct Cli {
    /// Baud rate
    #[arg(short, long, default_value_t = DEFAULT_BAUD)]
    baud: u32,

    /// Only plot lines starting with this prefix
    #[arg(short = 'f', long = "filter", default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Serial port path (default: first detected port)
    #[arg(short, long)]
    port: Option<String>,

    /// List available serial ports and exit
    #[arg(short, long)]
    list: bool,

    /// Plot width in columns
    #[arg(long, default_value_t = DEFAULT_WIDTH, value_parser = clap::value_parser!(u16).range(20..=400))]
    width: u16,

    /// Pause after each redraw, in milliseconds
    #[arg(long, default_value_t = DEFAULT_PAUSE_MS)]
    pause_ms: u64,

    /// Where to draw the charts
    #[arg(long, value_enum, default_value_t = Backend::Terminal)]
    backend: Backend,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Charts pinned above the scrolling serial output
    Terminal,
    /// Spawned Rerun viewer
    #[cfg(feature = "rerun")]
    Rerun,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if cli.list {
        serial::port::print_ports()?;
        return Ok(());
    }

    let port_path = serial::port::select_port(cli.port)?;
    let config = PortConfig::new(&port_path)
        .with_baud_rate(cli.baud)
        .with_timeout(READ_TIMEOUT);
    let connection = SerialConnection::open(config)?;

    interrupt::install().context("Failed to set Ctrl+C handler")?;

    let renderer: Box<dyn Render> = match cli.backend {
        Backend::Terminal => {
            if !io::stdout().is_terminal() {
                log::warn!("stdout is not a terminal, chart control sequences are written as-is");
            }
            let source = format!(
                "{} @ {} baud",
                connection.config().port_path,
                connection.config().baud_rate
            );
            Box::new(TerminalChart::new(io::stdout(), usize::from(cli.width), source))
        }
        #[cfg(feature = "rerun")]
        Backend::Rerun => Box::new(RerunChart::spawn("sensor-plot")?),
    };

    let settings = PlotSettings {
        prefix: cli.prefix,
        pause: Duration::from_millis(cli.pause_ms),
    };

    let mut plotter = Plotter::new(connection, io::stdout(), renderer, settings);
    plotter
        .run(interrupt::flag())
        .with_context(|| format!("Plotting from {} stopped", port_path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["sensor-plot"]).unwrap();

        assert_eq!(cli.baud, 115200);
        assert_eq!(cli.prefix, "**");
        assert_eq!(cli.port, None);
        assert_eq!(cli.width, 72);
        assert_eq!(cli.pause_ms, 500);
        assert_eq!(
            Duration::from_millis(cli.pause_ms),
            plotter::DEFAULT_PAUSE
        );
        assert_eq!(cli.backend, Backend::Terminal);
        assert!(!cli.list);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli =
            Cli::try_parse_from(["sensor-plot", "-b", "9600", "-f", "SHT", "-p", "/dev/ttyACM0"])
                .unwrap();

        assert_eq!(cli.baud, 9600);
        assert_eq!(cli.prefix, "SHT");
        assert_eq!(cli.port.as_deref(), Some("/dev/ttyACM0"));
    }

    #[test]
    fn test_cli_rejects_narrow_width() {
        assert!(Cli::try_parse_from(["sensor-plot", "--width", "5"]).is_err());
    }
}
