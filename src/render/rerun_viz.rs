#![cfg(feature = "rerun")]

use super::{Quantity, Render};
use crate::error::RenderError;
use crate::telemetry::RollingWindow;
use log::info;
use rerun::{AsComponents, LineStrips2D, Points2D, RecordingStream, RecordingStreamBuilder};

/// Timeline the frames are logged against
const TIMELINE: &str = "iteration";

/// Plots into a spawned Rerun viewer.
///
/// Each frame replaces the whole window: the visible samples are logged as
/// one line strip plus markers per quantity, so the 2D view shows the same
/// 40 samples as the terminal chart. Scrubbing the `iteration` timeline
/// replays earlier windows.
pub struct RerunChart {
    rec: RecordingStream,
}

impl RerunChart {
    pub fn spawn(app_id: &str) -> Result<Self, RenderError> {
        let rec = RecordingStreamBuilder::new(app_id)
            .spawn()
            .map_err(|err| RenderError::Backend(format!("Rerun init failed: {err}")))?;

        info!("Rerun viewer spawned");
        Ok(Self { rec })
    }

    fn log(&self, path: String, entity: &impl AsComponents) -> Result<(), RenderError> {
        self.rec
            .log(path, entity)
            .map_err(|err| RenderError::Backend(err.to_string()))
    }
}

/// Finite (iteration, value) pairs in viewer coordinates
fn window_points(xs: &[f64], ys: &[f64]) -> Vec<[f32; 2]> {
    xs.iter()
        .zip(ys)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| [x as f32, y as f32])
        .collect()
}

impl Render for RerunChart {
    fn draw(&mut self, window: &RollingWindow) -> Result<(), RenderError> {
        let Some(latest) = window.latest() else {
            return Ok(());
        };
        self.rec.set_time_sequence(TIMELINE, latest.index as i64);

        for (quantity, name) in [
            (Quantity::Temperature, "temperature"),
            (Quantity::Humidity, "humidity"),
        ] {
            let points = window_points(window.indices(), quantity.values(window));
            let legend = quantity
                .mean(window)
                .map(|mean| quantity.legend(mean))
                .unwrap_or_default();

            self.log(
                format!("{name}/trace"),
                &LineStrips2D::new([points.clone()])
                    .with_labels([format!("{} {}", quantity.axis_label(), legend)]),
            )?;
            self.log(format!("{name}/samples"), &Points2D::new(points))?;
        }
        Ok(())
    }
}
