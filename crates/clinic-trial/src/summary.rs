//! Cross-replication summary statistics.

use clinic_model::RunSummary;
use serde::Serialize;

/// Two-sided 95% Student-t critical values for 1..=30 degrees of freedom.
const T_CRIT_95: [f64; 30] = [
    12.706, 4.303, 3.182, 2.776, 2.571, 2.447, 2.365, 2.306, 2.262, 2.228,
    2.201, 2.179, 2.160, 2.145, 2.131, 2.120, 2.110, 2.101, 2.093, 2.086,
    2.080, 2.074, 2.069, 2.064, 2.060, 2.056, 2.052, 2.048, 2.045, 2.042,
];

/// Large-sample (normal) critical value.
const Z_95: f64 = 1.960;

fn t_critical(df: usize) -> f64 {
    match df {
        0 => f64::NAN,
        d if d <= T_CRIT_95.len() => T_CRIT_95[d - 1],
        // Between 30 and ~120 df the t value drifts from 2.042 to 1.980.
        d if d <= 60 => 2.000,
        d if d <= 120 => 1.980,
        _ => Z_95,
    }
}

/// Summary of one run-level metric across replications.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallRow {
    pub metric:      String,
    /// Replications with a non-NaN value.
    pub count:       usize,
    pub mean:        f64,
    /// Sample standard deviation (n − 1).
    pub std_dev:     f64,
    pub lower_95_ci: f64,
    pub upper_95_ci: f64,
    pub min:         f64,
    pub max:         f64,
}

impl OverallRow {
    /// Summarise `values`, ignoring NaNs.  Spread and interval are NaN with
    /// fewer than two values.
    pub fn from_values(metric: &str, values: &[f64]) -> Self {
        let xs: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let n = xs.len();

        let mean = if n == 0 { f64::NAN } else { xs.iter().sum::<f64>() / n as f64 };
        let std_dev = if n < 2 {
            f64::NAN
        } else {
            let ss: f64 = xs.iter().map(|x| (x - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        };
        let half_width = t_critical(n.saturating_sub(1)) * std_dev / (n as f64).sqrt();

        Self {
            metric:      metric.to_owned(),
            count:       n,
            mean,
            std_dev,
            lower_95_ci: mean - half_width,
            upper_95_ci: mean + half_width,
            min:         xs.iter().copied().reduce(f64::min).unwrap_or(f64::NAN),
            max:         xs.iter().copied().reduce(f64::max).unwrap_or(f64::NAN),
        }
    }
}

/// One [`OverallRow`] per metric in [`RunSummary::metrics`], in that order.
pub fn summarise_runs(runs: &[RunSummary]) -> Vec<OverallRow> {
    let Some(first) = runs.first() else {
        return Vec::new();
    };
    first
        .metrics()
        .iter()
        .enumerate()
        .map(|(i, (name, _))| {
            let values: Vec<f64> = runs.iter().map(|r| r.metrics()[i].1).collect();
            OverallRow::from_values(name, &values)
        })
        .collect()
}
