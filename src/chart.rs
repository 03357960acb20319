use serde::Serialize;

use crate::data::model::Column;

// ---------------------------------------------------------------------------
// Figure – a renderer-independent chart description
// ---------------------------------------------------------------------------

/// One histogram bar covering `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// What a plot area should show.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Figure {
    /// Nothing selected, or nothing to plot.
    #[default]
    Empty,
    Histogram {
        title: String,
        x_label: String,
        y_label: String,
        bins: Vec<Bin>,
    },
    Scatter {
        title: String,
        x_label: String,
        y_label: String,
        points: Vec<[f64; 2]>,
    },
}

impl Figure {
    /// Frequency distribution of a numeric column.
    /// Returns [`Figure::Empty`] for non-numeric columns.
    pub fn histogram(column: &Column, max_bins: usize) -> Figure {
        let Some(values) = column.numeric_values() else {
            return Figure::Empty;
        };
        let values: Vec<f64> = values.into_iter().flatten().collect();

        Figure::Histogram {
            title: format!("Distribution of {}", column.name),
            x_label: column.name.clone(),
            y_label: "count".to_string(),
            bins: histogram_bins(&values, column.is_integral(), max_bins),
        }
    }

    /// Row-wise `(x, y)` pairs; rows missing either value are skipped.
    pub fn scatter(x: &Column, y: &Column) -> Figure {
        let (Some(xs), Some(ys)) = (x.numeric_values(), y.numeric_values()) else {
            return Figure::Empty;
        };

        let points = xs
            .into_iter()
            .zip(ys)
            .filter_map(|pair| match pair {
                (Some(xi), Some(yi)) if xi.is_finite() && yi.is_finite() => Some([xi, yi]),
                _ => None,
            })
            .collect();

        Figure::Scatter {
            title: format!("{} vs {}", x.name, y.name),
            x_label: x.name.clone(),
            y_label: y.name.clone(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Figure::Empty)
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Figure::Empty => None,
            Figure::Histogram { title, .. } | Figure::Scatter { title, .. } => Some(title),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ---------------------------------------------------------------------------
// Binning
// ---------------------------------------------------------------------------

/// Bin `values` into equal-width bins with a rounded width.
///
/// The bin count starts from Sturges' rule and is capped at `max_bins`.
/// Integer data never gets bins narrower than 1. Non-finite values are
/// ignored.
pub fn histogram_bins(values: &[f64], integral: bool, max_bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max - min < f64::EPSILON * max.abs().max(1.0) {
        return vec![Bin {
            start: min - 0.5,
            end: min + 0.5,
            count: finite.len(),
        }];
    }

    let target = ((finite.len() as f64).log2().ceil() as usize + 1).clamp(1, max_bins.max(1));
    let mut width = nice_ceil((max - min) / target as f64);
    if integral {
        width = width.max(1.0);
    }

    let start = (min / width).floor() * width;
    let n_bins = ((max - start) / width).floor() as usize + 1;

    let mut counts = vec![0usize; n_bins];
    for v in &finite {
        let idx = ((v - start) / width).floor().max(0.0) as usize;
        counts[idx.min(n_bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            start: start + i as f64 * width,
            end: start + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Smallest of 1, 2, 2.5, 5 (× 10^k) that is at least `x`.
fn nice_ceil(x: f64) -> f64 {
    let magnitude = 10f64.powf(x.log10().floor());
    let fraction = x / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 2.5 {
        2.5
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}
