//! Rolling window of the most recent samples
//!
//! Stored as three parallel sequences so each series can be handed to the
//! renderer as a slice without copying.

use super::Sample;

/// Number of samples kept on screen
pub const WINDOW_CAPACITY: usize = 40;

/// Most recent samples, oldest first
#[derive(Debug, Clone)]
pub struct RollingWindow {
    capacity: usize,
    index: Vec<f64>,
    temperature: Vec<f64>,
    humidity: Vec<f64>,
}

impl Default for RollingWindow {
    fn default() -> Self {
        Self::with_capacity(WINDOW_CAPACITY)
    }
}

impl RollingWindow {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            index: Vec::with_capacity(capacity + 1),
            temperature: Vec::with_capacity(capacity + 1),
            humidity: Vec::with_capacity(capacity + 1),
        }
    }

    /// Append a sample, evicting the oldest ones beyond capacity
    pub fn push(&mut self, sample: Sample) {
        self.index.push(sample.index);
        self.temperature.push(sample.temperature);
        self.humidity.push(sample.humidity);

        let excess = self.index.len().saturating_sub(self.capacity);
        if excess > 0 {
            self.index.drain(..excess);
            self.temperature.drain(..excess);
            self.humidity.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn indices(&self) -> &[f64] {
        &self.index
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperature
    }

    pub fn humidities(&self) -> &[f64] {
        &self.humidity
    }

    /// Newest sample, if any
    pub fn latest(&self) -> Option<Sample> {
        let last = self.len().checked_sub(1)?;
        Some(Sample {
            index: self.index[last],
            temperature: self.temperature[last],
            humidity: self.humidity[last],
        })
    }

    /// Mean temperature over the visible samples
    pub fn mean_temperature(&self) -> Option<f64> {
        mean(&self.temperature)
    }

    /// Mean relative humidity over the visible samples
    pub fn mean_humidity(&self) -> Option<f64> {
        mean(&self.humidity)
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
