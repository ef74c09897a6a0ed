//! Error types for the telemetry pipeline.
//!
//! Nothing in the pipeline recovers from these. They propagate out of the
//! read/render loop and terminate the process.

use std::io;
use std::num::ParseFloatError;

use thiserror::Error;

/// Top-level failure of a plotting run
#[derive(Debug, Error)]
pub enum PlotError {
    /// No port was given and the system reported none
    #[error("no serial ports detected (use -p to specify one)")]
    NoDeviceFound,

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// Echoing a raw line to stdout failed
    #[error("failed to echo line to stdout")]
    Echo(#[source] io::Error),
}

/// Serial device open/read failures
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("failed to enumerate serial ports")]
    Enumerate(#[source] serialport::Error),

    #[error("failed to open serial port {path}")]
    Open {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("failed to read from serial port")]
    Read(#[source] io::Error),

    #[error("serial stream closed")]
    Closed,
}

/// A telemetry line matched the prefix but could not be turned into a sample
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid number {token:?} in record {line:?}")]
    InvalidNumber {
        token: String,
        line: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("record {line:?} has {found} fields, expected at least {expected}")]
    MissingFields {
        found: usize,
        expected: usize,
        line: String,
    },
}

/// Plot backend failures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write chart")]
    Io(#[from] io::Error),

    #[cfg(feature = "rerun")]
    #[error("plot backend error: {0}")]
    Backend(String),
}
