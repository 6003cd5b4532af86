//! Numeric building blocks shared by the analyses.
//!
//! Everything here is total: undefined statistics come back as `None`
//! instead of NaN so callers choose the substitute explicitly.

use serde::Serialize;

/// Arithmetic mean, `None` for an empty slice.
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n − 1 denominator), `None` below two values.
#[allow(clippy::cast_precision_loss)]
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Sorts a copy of `values` ascending.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Quantile with linear interpolation between closest ranks.
///
/// `q` is in `[0, 1]`; `sorted_values` must be ascending and non-empty.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn quantile_sorted(sorted_values: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted_values.is_empty());
    debug_assert!(sorted_values.is_sorted_by(|a, b| a <= b));
    let position = q.clamp(0.0, 1.0) * (sorted_values.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * fraction
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(quantile_sorted(&sorted(values), 0.5))
}

/// Pearson correlation coefficient.
///
/// `None` with fewer than two pairs or when either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let moments = Moments::of(xs, ys)?;
    if moments.sxx == 0.0 || moments.syy == 0.0 {
        return None;
    }
    Some((moments.sxy / (moments.sxx * moments.syy).sqrt()).clamp(-1.0, 1.0))
}

/// Ordinary least-squares fit of `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r: f64,
    pub mean_x: f64,
    pub mean_y: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits a line through `(xs, ys)`. `None` only for empty input.
///
/// Zero variance in `x` yields a flat line through the mean of `y` with
/// `r = 0`; zero variance in `y` yields `r = 0`.
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
    if xs.is_empty() || xs.len() != ys.len() {
        return None;
    }
    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;
    let Some(moments) = Moments::of(xs, ys) else {
        return Some(LinearFit {
            slope: 0.0,
            intercept: mean_y,
            r: 0.0,
            mean_x,
            mean_y,
        });
    };
    if moments.sxx == 0.0 {
        return Some(LinearFit {
            slope: 0.0,
            intercept: mean_y,
            r: 0.0,
            mean_x,
            mean_y,
        });
    }
    let slope = moments.sxy / moments.sxx;
    let r = if moments.syy == 0.0 {
        0.0
    } else {
        (moments.sxy / (moments.sxx * moments.syy).sqrt()).clamp(-1.0, 1.0)
    };
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
        r,
        mean_x,
        mean_y,
    })
}

/// Centered second moments of a paired sample.
struct Moments {
    sxx: f64,
    syy: f64,
    sxy: f64,
}

impl Moments {
    fn of(xs: &[f64], ys: &[f64]) -> Option<Self> {
        if xs.len() != ys.len() || xs.len() < 2 {
            return None;
        }
        let mean_x = mean(xs)?;
        let mean_y = mean(ys)?;
        let mut moments = Self {
            sxx: 0.0,
            syy: 0.0,
            sxy: 0.0,
        };
        for (x, y) in xs.iter().zip(ys) {
            let dx = x - mean_x;
            let dy = y - mean_y;
            moments.sxx += dx * dx;
            moments.syy += dy * dy;
            moments.sxy += dx * dy;
        }
        Some(moments)
    }
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `part / whole * 100`, or 0 when `whole` is zero.
pub fn percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 { 0.0 } else { part / whole * 100.0 }
}

/// `numerator / denominator`, or 0 when the denominator is zero.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Equal-width bin edges over `[min, max]`.
///
/// A degenerate range is widened by 0.5 on each side so every value still
/// lands in a bin.
#[allow(clippy::cast_precision_loss)]
pub fn equal_width_edges(min: f64, max: f64, bins: usize) -> Vec<f64> {
    let (low, high) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (high - low) / bins as f64;
    (0..=bins)
        .map(|i| if i == bins { high } else { low + width * i as f64 })
        .collect()
}

/// Index of the bin containing `value`, treating every bin as half-open
/// except the last, which is closed. `None` outside the edges.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn bin_index(edges: &[f64], value: f64) -> Option<usize> {
    let bins = edges.len().checked_sub(1)?;
    if bins == 0 {
        return None;
    }
    let low = edges[0];
    let high = edges[bins];
    if !(low..=high).contains(&value) {
        return None;
    }
    let mut idx = (((value - low) / (high - low)) * bins as f64).floor() as usize;
    idx = idx.min(bins - 1);
    if idx > 0 && value < edges[idx] {
        idx -= 1;
    } else if idx + 1 < bins && value >= edges[idx + 1] {
        idx += 1;
    }
    Some(idx)
}

/// A one-dimensional equal-width histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// `bins + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bins `values` over their own range. Empty input gives no bins.
    pub fn equal_width(values: &[f64], bins: usize) -> Self {
        let Some((min, max)) = min_max(values) else {
            return Self {
                edges: Vec::new(),
                counts: Vec::new(),
            };
        };
        if bins == 0 {
            return Self {
                edges: Vec::new(),
                counts: Vec::new(),
            };
        }
        let edges = equal_width_edges(min, max, bins);
        let mut counts = vec![0u64; bins];
        for value in values {
            if let Some(idx) = bin_index(&edges, *value) {
                counts[idx] += 1;
            }
        }
        Self { edges, counts }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// A two-dimensional equal-width histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram2d {
    pub x_edges: Vec<f64>,
    pub y_edges: Vec<f64>,
    /// `counts[x_bin][y_bin]`.
    pub counts: Vec<Vec<u64>>,
}

impl Histogram2d {
    pub fn equal_width(points: &[(f64, f64)], x_bins: usize, y_bins: usize) -> Option<Self> {
        if x_bins == 0 || y_bins == 0 {
            return None;
        }
        let xs: Vec<f64> = points.iter().map(|(x, _)| *x).collect();
        let ys: Vec<f64> = points.iter().map(|(_, y)| *y).collect();
        let (x_min, x_max) = min_max(&xs)?;
        let (y_min, y_max) = min_max(&ys)?;
        let x_edges = equal_width_edges(x_min, x_max, x_bins);
        let y_edges = equal_width_edges(y_min, y_max, y_bins);
        let mut counts = vec![vec![0u64; y_bins]; x_bins];
        for (x, y) in points {
            if let (Some(xi), Some(yi)) = (bin_index(&x_edges, *x), bin_index(&y_edges, *y)) {
                counts[xi][yi] += 1;
            }
        }
        Some(Self {
            x_edges,
            y_edges,
            counts,
        })
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn mean_and_std() {
        assert_eq!(mean(&[]), None);
        assert!(close(mean(&[1.0, 2.0, 3.0]).unwrap(), 2.0));
        assert_eq!(sample_std(&[4.0]), None);
        assert!(close(sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap(), 2.138_089_935_299_395));
        assert!(close(sample_std(&[10.0, 10.0, 10.0]).unwrap(), 0.0));
    }

    #[test]
    fn quantiles_interpolate_linearly() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!(close(quantile_sorted(&values, 0.25), 1.75));
        assert!(close(quantile_sorted(&values, 0.5), 2.5));
        assert!(close(quantile_sorted(&values, 0.75), 3.25));
        assert_eq!(median(&[5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn pearson_guards_degenerate_input() {
        assert_eq!(pearson(&[1.0], &[2.0]), None);
        assert_eq!(pearson(&[1.0, 1.0], &[2.0, 3.0]), None);
        assert!(close(pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap(), 1.0));
        assert!(close(pearson(&[1.0, 2.0, 3.0], &[6.0, 4.0, 2.0]).unwrap(), -1.0));
    }

    #[test]
    fn linear_fit_recovers_line_and_guards_flat_x() {
        let fit = linear_fit(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
        assert!(close(fit.slope, 2.0));
        assert!(close(fit.intercept, 1.0));
        assert!(close(fit.r, 1.0));

        let flat = linear_fit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 6.0]).unwrap();
        assert_eq!(flat.slope, 0.0);
        assert!(close(flat.intercept, 3.0));
        assert_eq!(flat.r, 0.0);

        let single = linear_fit(&[4.0], &[9.0]).unwrap();
        assert!(close(single.predict(4.0), 9.0));
    }

    #[test]
    fn histogram_closes_last_bin() {
        let hist = Histogram::equal_width(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        assert_eq!(hist.edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(hist.counts, vec![1, 1, 1, 2]);
        assert_eq!(hist.total(), 5);
    }

    #[test]
    fn histogram_widens_degenerate_range() {
        let hist = Histogram::equal_width(&[7.0, 7.0], 2);
        assert_eq!(hist.edges, vec![6.5, 7.0, 7.5]);
        assert_eq!(hist.counts, vec![0, 2]);
        assert!(Histogram::equal_width(&[], 30).counts.is_empty());
    }

    #[test]
    fn histogram_2d_counts_every_point() {
        let points = [(1.0, 1.0), (2.0, 2.0), (2.0, 1.0), (1.5, 1.5)];
        let grid = Histogram2d::equal_width(&points, 2, 2).unwrap();
        assert_eq!(grid.total(), 4);
        assert_eq!(grid.counts[1][1], 2);
        assert_eq!(grid.counts[0][0], 1);
        assert_eq!(grid.counts[1][0], 1);
    }

    #[test]
    fn guarded_ratios() {
        assert_eq!(percent(3.0, 0.0), 0.0);
        assert!(close(percent(1.0, 4.0), 25.0));
        assert_eq!(ratio_or_zero(5.0, 0.0), 0.0);
        assert!(close(round_to(66.666, 1), 66.7));
        assert!(close(round_to(0.456, 2), 0.46));
    }
}
