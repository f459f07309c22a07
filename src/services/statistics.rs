use crate::models::{DataPoint, TrendDirection, TrendResult};

/// Minimum number of observations before a trend is estimated.
const MIN_TREND_POINTS: usize = 3;

/// Strength below which a move is reported as sideways.
const SIDEWAYS_STRENGTH: f64 = 10.0;

/// Multiplier turning a percent move into the 0-100 strength/momentum scale.
const PERCENT_TO_SCORE: f64 = 10.0;

/// Pearson correlation coefficient between two equal-length samples.
///
/// Returns 0.0 for empty input, mismatched lengths, or when either sample has
/// zero variance. NaN in the input propagates to the result.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.is_empty() || x.len() != y.len() {
        return 0.0;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (cov, var_x, var_y) = x
        .iter()
        .zip(y.iter())
        .fold((0.0, 0.0, 0.0), |(c, vx, vy), (xi, yi)| {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            (c + dx * dy, vx + dx * dx, vy + dy * dy)
        });

    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }

    cov / (var_x * var_y).sqrt()
}

/// Percent change from `previous` to `current`.
///
/// A zero `previous` yields an infinite (or NaN for 0 -> 0) result on purpose:
/// callers surface it rather than guard it.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    (current - previous) / previous * 100.0
}

/// Population mean and standard deviation.
pub fn mean_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Share of `history` at or below `value`, as a 0-100 percentile rank.
pub fn percentile_rank(value: f64, history: &[f64]) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    let at_or_below = history.iter().filter(|&&v| v <= value).count();
    at_or_below as f64 / history.len() as f64 * 100.0
}

/// Estimate trend, momentum and volatility for a most-recent-first series.
pub fn determine_trend(points: &[DataPoint]) -> TrendResult {
    if points.len() < MIN_TREND_POINTS {
        return TrendResult::flat();
    }

    // Chronological order from here on
    let values: Vec<f64> = points.iter().rev().map(|p| p.value).collect();
    let oldest = values[0];
    let newest = values[values.len() - 1];

    let net_change = if oldest == 0.0 {
        0.0
    } else {
        (newest - oldest) / oldest.abs() * 100.0
    };
    let strength = (net_change.abs() * PERCENT_TO_SCORE).min(100.0);

    let direction = if strength < SIDEWAYS_STRENGTH {
        TrendDirection::Sideways
    } else if net_change > 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };

    let period_changes: Vec<f64> = values
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0].abs() * 100.0)
        .collect();

    let momentum = period_changes
        .last()
        .map(|c| (c * PERCENT_TO_SCORE).clamp(-100.0, 100.0))
        .unwrap_or(0.0);

    let (_, volatility) = mean_std_dev(&period_changes);

    let duration = match direction {
        TrendDirection::Sideways => 0,
        TrendDirection::Up => count_recent_run(&values, |delta| delta > 0.0),
        TrendDirection::Down => count_recent_run(&values, |delta| delta < 0.0),
    };

    TrendResult {
        direction,
        strength,
        momentum,
        duration,
        volatility,
    }
}

/// Number of consecutive latest periods whose change satisfies `moving`.
fn count_recent_run(chronological: &[f64], moving: impl Fn(f64) -> bool) -> usize {
    chronological
        .windows(2)
        .rev()
        .take_while(|w| moving(w[1] - w[0]))
        .count()
}
