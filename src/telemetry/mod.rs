//! Telemetry records and the rolling window they are plotted from
//!
//! The sensor firmware prints lines such as `** 12 22.81 48.30`: a fixed
//! prefix, then the iteration counter, temperature in °C and relative
//! humidity in %.

pub mod record;
pub mod window;

pub use record::{PrefixFilter, Sample};
pub use window::RollingWindow;
