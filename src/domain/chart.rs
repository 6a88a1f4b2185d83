// Chart descriptions handed to the host for rendering.
//
// The calculators never draw anything themselves; they describe a bar chart or a
// set of line series and let whichever front end is attached decide how to show it.

/// One bar of a bar chart
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// Sampled `(x, y)` curve
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    /// Sample `f` at every point of `grid`
    pub fn sample(label: impl Into<String>, grid: &[f64], f: impl Fn(f64) -> f64) -> Self {
        Self {
            label: label.into(),
            x: grid.to_vec(),
            y: grid.iter().map(|&q| f(q)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Point with the smallest `y`, if any
    pub fn min_point(&self) -> Option<(f64, f64)> {
        self.x
            .iter()
            .copied()
            .zip(self.y.iter().copied())
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Vertical reference line at `x`
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub label: String,
    pub x: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

/// Description of a single chart
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
    pub series: Vec<Series>,
    pub markers: Vec<Marker>,
}

impl Chart {
    pub fn bar(title: impl Into<String>) -> Self {
        Self::empty(ChartKind::Bar, title.into())
    }

    pub fn line(title: impl Into<String>) -> Self {
        Self::empty(ChartKind::Line, title.into())
    }

    fn empty(kind: ChartKind, title: String) -> Self {
        Self {
            kind,
            title,
            x_label: String::new(),
            y_label: String::new(),
            bars: Vec::new(),
            series: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn with_axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn with_bar(mut self, label: impl Into<String>, value: f64) -> Self {
        self.bars.push(Bar {
            label: label.into(),
            value,
        });
        self
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_marker(mut self, label: impl Into<String>, x: f64) -> Self {
        self.markers.push(Marker {
            label: label.into(),
            x,
        });
        self
    }
}

/// `n` evenly spaced samples over `[start, end]`, both ends included
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() {
        let grid = linspace(1.0, 2.0, 5);
        assert_eq!(grid, vec![1.0, 1.25, 1.5, 1.75, 2.0]);
        assert_eq!(linspace(0.0, 447.2, 100).len(), 100);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn series_min_point_finds_lowest_sample() {
        let grid = linspace(-2.0, 2.0, 41);
        let s = Series::sample("parabola", &grid, |x| (x - 0.5) * (x - 0.5));
        let (x, y) = s.min_point().unwrap();
        assert!((x - 0.5).abs() < 1e-9);
        assert!(y.abs() < 1e-12);
    }

    #[test]
    fn builder_collects_parts() {
        let chart = Chart::line("Total Cost vs Order Quantity")
            .with_axes("Order Quantity", "Total Cost")
            .with_marker("EOQ", 10.0);
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.x_label, "Order Quantity");
        assert_eq!(chart.markers.len(), 1);
        assert!(chart.bars.is_empty());
    }
}
