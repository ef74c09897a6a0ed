//! Character-cell line plot
//!
//! Scales a series onto a fixed grid of cells and joins consecutive points.
//! Output is plain text; coloring is left to the caller.

use super::Quantity;

pub const MARKER: char = 'o';
pub const TRACE: char = '·';

/// Width of the y-axis gutter: `{:>8.2}` plus a space and the axis glyph
pub const GUTTER: usize = 10;

/// Extent of a series over its finite values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest and largest finite value
    pub lo: f64,
    pub hi: f64,
    // Scaling range, widened when the series is flat
    min: f64,
    max: f64,
}

impl Bounds {
    pub fn of(values: &[f64]) -> Option<Self> {
        let mut finite = values.iter().copied().filter(|v| v.is_finite());
        let first = finite.next()?;
        let (lo, hi) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

        let (min, max) = if hi - lo > f64::EPSILON {
            (lo, hi)
        } else {
            (lo - 0.5, hi + 0.5)
        };
        Some(Self { lo, hi, min, max })
    }

    /// Cell position of `v` on an axis `cells` wide, 0 at `min`
    pub fn scale(&self, v: f64, cells: usize) -> usize {
        let last = cells.saturating_sub(1) as f64;
        let t = (v - self.min) / (self.max - self.min);
        (t * last).round().clamp(0.0, last) as usize
    }
}

/// Grid of cells, row 0 at the top
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    /// Plot `ys` against `xs`. Points with a non-finite coordinate are
    /// skipped. Returns the x and y extents, or `None` when nothing is
    /// plottable.
    pub fn plot(&mut self, xs: &[f64], ys: &[f64]) -> Option<(Bounds, Bounds)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }

        let finite: Vec<(f64, f64)> = xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| (x, y))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();
        let x_bounds = Bounds::of(&finite.iter().map(|p| p.0).collect::<Vec<_>>())?;
        let y_bounds = Bounds::of(&finite.iter().map(|p| p.1).collect::<Vec<_>>())?;

        let points: Vec<(usize, usize)> = finite
            .iter()
            .map(|&(x, y)| {
                let col = x_bounds.scale(x, self.width);
                let row = self.height - 1 - y_bounds.scale(y, self.height);
                (col, row)
            })
            .collect();

        for pair in points.windows(2) {
            self.line(pair[0], pair[1]);
        }
        for &(col, row) in &points {
            self.set(col, row, MARKER);
        }

        Some((x_bounds, y_bounds))
    }

    #[cfg(test)]
    pub fn get(&self, col: usize, row: usize) -> char {
        self.cells[row * self.width + col]
    }

    pub fn row(&self, row: usize) -> String {
        self.cells[row * self.width..(row + 1) * self.width]
            .iter()
            .collect()
    }

    fn set(&mut self, col: usize, row: usize, c: char) {
        if col < self.width && row < self.height {
            self.cells[row * self.width + col] = c;
        }
    }

    // Bresenham between two cells, endpoints included
    fn line(&mut self, from: (usize, usize), to: (usize, usize)) {
        let (mut x, mut y) = (from.0 as isize, from.1 as isize);
        let (x1, y1) = (to.0 as isize, to.1 as isize);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set(x as usize, y as usize, TRACE);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// Plain-text lines of one chart panel
#[derive(Debug, Clone)]
pub struct PanelText {
    /// Y-axis label
    pub title: String,
    /// Mean of the visible values, empty when there is none
    pub legend: String,
    /// Gutter and plot area of each grid row, top first
    pub rows: Vec<(String, String)>,
    /// X axis line
    pub axis: String,
    /// X extents with the x label between them
    pub ticks: String,
}

impl PanelText {
    pub fn render(
        quantity: Quantity,
        xs: &[f64],
        ys: &[f64],
        mean: Option<f64>,
        width: usize,
        height: usize,
    ) -> Self {
        let mut canvas = Canvas::new(width, height);
        let extents = canvas.plot(xs, ys);

        let rows = (0..height)
            .map(|row| {
                let gutter = match extents {
                    Some((_, y)) if row == 0 => format!("{:>8.2} ┤", y.hi),
                    Some((_, y)) if row == height - 1 => format!("{:>8.2} ┤", y.lo),
                    _ => format!("{:>9}│", ""),
                };
                (gutter, canvas.row(row))
            })
            .collect();

        let ticks = match extents {
            Some((x, _)) => tick_line(&x.lo.to_string(), &x.hi.to_string(), width),
            None => tick_line("", "", width),
        };

        Self {
            title: quantity.axis_label().to_string(),
            legend: mean.map(|m| quantity.legend(m)).unwrap_or_default(),
            rows,
            axis: format!("{:>9}└{}", "", "─".repeat(width)),
            ticks: format!("{:>w$}{}", "", ticks, w = GUTTER),
        }
    }

    /// Title line with the legend pushed to the right edge
    pub fn heading(&self, width: usize) -> String {
        if self.legend.is_empty() {
            return self.title.clone();
        }
        let used = self.title.chars().count() + self.legend.chars().count() + 2;
        let pad = (GUTTER + width).saturating_sub(used).max(2);
        format!("{}{:pad$}{} {}", self.title, "", MARKER, self.legend, pad = pad)
    }
}

fn tick_line(left: &str, right: &str, width: usize) -> String {
    let mut cells = vec![' '; width];
    let mut put = |start: usize, text: &str| {
        for (i, c) in text.chars().enumerate() {
            if let Some(cell) = cells.get_mut(start + i) {
                *cell = c;
            }
        }
    };

    let label = Quantity::X_LABEL;
    put(width.saturating_sub(label.len()) / 2, label);
    put(0, left);
    put(width.saturating_sub(right.chars().count()), right);
    cells.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_skip_non_finite() {
        let b = Bounds::of(&[f64::NAN, 3.0, f64::INFINITY, -1.0]).unwrap();
        assert_eq!((b.lo, b.hi), (-1.0, 3.0));
        assert!(Bounds::of(&[f64::NAN]).is_none());
        assert!(Bounds::of(&[]).is_none());
    }

    #[test]
    fn test_flat_series_is_centered() {
        let b = Bounds::of(&[5.0, 5.0]).unwrap();
        assert_eq!(b.scale(5.0, 11), 5);
    }

    #[test]
    fn test_plot_corners() {
        let mut canvas = Canvas::new(10, 5);
        canvas.plot(&[0.0, 1.0], &[0.0, 1.0]).unwrap();

        // Lowest value at the bottom left, highest at the top right
        assert_eq!(canvas.get(0, 4), MARKER);
        assert_eq!(canvas.get(9, 0), MARKER);
        assert_eq!(canvas.get(5, 2), TRACE);
        assert_eq!(canvas.get(0, 0), ' ');
    }

    #[test]
    fn test_plot_nothing_finite() {
        let mut canvas = Canvas::new(4, 2);
        assert!(canvas.plot(&[1.0], &[f64::NAN]).is_none());
        assert_eq!(canvas.row(0), "    ");
    }

    #[test]
    fn test_panel_layout() {
        let panel = PanelText::render(
            Quantity::Temperature,
            &[1.0, 2.0, 3.0],
            &[20.0, 22.0, 21.0],
            Some(21.0),
            30,
            6,
        );

        assert_eq!(panel.rows.len(), 6);
        assert_eq!(panel.rows[0].0, "   22.00 ┤");
        assert_eq!(panel.rows[5].0, "   20.00 ┤");
        assert_eq!(panel.rows[2].0, "         │");
        assert!(panel.rows.iter().all(|(g, p)| g.chars().count() == GUTTER
            && p.chars().count() == 30));

        let heading = panel.heading(30);
        assert!(heading.starts_with("Temperature (°C)"));
        assert!(heading.ends_with("o mean = 21.0 °C"));
        assert_eq!(heading.chars().count(), GUTTER + 30);

        let ticks = &panel.ticks;
        assert!(ticks.trim_start().starts_with('1'));
        assert!(ticks.ends_with('3'));
        assert!(ticks.contains("Iteration"));
    }

    #[test]
    fn test_empty_panel_has_no_legend() {
        let panel = PanelText::render(Quantity::Humidity, &[], &[], None, 20, 3);

        assert_eq!(panel.legend, "");
        assert_eq!(panel.heading(20), "Relative Humidity");
        assert_eq!(panel.rows[0].0, "         │");
    }
}
