//! Serial port access for the telemetry plotter
//!
//! This module provides functionality for:
//! - Listing available serial ports and picking one
//! - Opening a connection with a fixed read timeout
//! - Reading newline-delimited records from the stream

pub mod port;
pub mod reader;

pub use port::{PortConfig, SerialConnection};
pub use reader::LineReader;
