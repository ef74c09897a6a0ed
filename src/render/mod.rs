//! Chart rendering for the rolling window
//!
//! Every backend redraws the whole visible window on each call: two panels,
//! temperature and humidity against the iteration index, each with the mean
//! of the visible values in its legend.

pub mod canvas;
pub mod terminal;

#[cfg(feature = "rerun")]
pub mod rerun_viz;

use crate::error::RenderError;
use crate::telemetry::RollingWindow;

pub use terminal::TerminalChart;

/// A plot surface that can redraw the current window
pub trait Render {
    fn draw(&mut self, window: &RollingWindow) -> Result<(), RenderError>;
}

impl<R: Render + ?Sized> Render for Box<R> {
    fn draw(&mut self, window: &RollingWindow) -> Result<(), RenderError> {
        (**self).draw(window)
    }
}

/// The two plotted series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Temperature,
    Humidity,
}

impl Quantity {
    pub const X_LABEL: &'static str = "Iteration";

    pub fn axis_label(self) -> &'static str {
        match self {
            Quantity::Temperature => "Temperature (°C)",
            Quantity::Humidity => "Relative Humidity",
        }
    }

    /// Legend text for the mean of the visible values
    pub fn legend(self, mean: f64) -> String {
        match self {
            Quantity::Temperature => format!("mean = {:.1} °C", mean),
            Quantity::Humidity => format!("mean = {:.1}%", mean),
        }
    }

    pub fn values(self, window: &RollingWindow) -> &[f64] {
        match self {
            Quantity::Temperature => window.temperatures(),
            Quantity::Humidity => window.humidities(),
        }
    }

    pub fn mean(self, window: &RollingWindow) -> Option<f64> {
        match self {
            Quantity::Temperature => window.mean_temperature(),
            Quantity::Humidity => window.mean_humidity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::Sample;

    #[test]
    fn test_legend_format() {
        assert_eq!(Quantity::Temperature.legend(22.456), "mean = 22.5 °C");
        assert_eq!(Quantity::Humidity.legend(55.0), "mean = 55.0%");
    }

    #[test]
    fn test_quantity_selects_series() {
        let mut window = RollingWindow::default();
        window.push(Sample {
            index: 1.0,
            temperature: 22.5,
            humidity: 55.0,
        });

        assert_eq!(Quantity::Temperature.values(&window), &[22.5]);
        assert_eq!(Quantity::Humidity.values(&window), &[55.0]);
        assert_eq!(Quantity::Humidity.mean(&window), Some(55.0));
    }
}
