// src/analysis/decompose.rs
use crate::error::AnalysisError;

/// Additive decomposition of a series into trend, seasonal and residual
/// components. Entries where the centered moving average is undefined
/// (the first and last half-period) are NaN in `trend` and `residual`.
#[derive(Debug, Clone)]
pub struct Decomposition {
    pub observed: Vec<f64>,
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
    pub period: usize,
}

/// Classical additive decomposition: centered moving-average trend,
/// per-phase mean seasonal component (centered to sum to zero), residual
/// as what remains. Requires at least two full periods of data.
pub fn seasonal_decompose(series: &[f64], period: usize) -> Result<Decomposition, AnalysisError> {
    let n = series.len();
    let min = 2 * period;
    if period < 2 || n < min {
        return Err(AnalysisError::SeriesTooShort { len: n, min });
    }
    if series.iter().any(|x| !x.is_finite()) {
        return Err(AnalysisError::MissingValues);
    }

    let trend = moving_average_trend(series, period);
    let seasonal = additive_seasonal(series, &trend, period);

    let residual = series
        .iter()
        .zip(trend.iter().zip(seasonal.iter()))
        .map(|(x, (t, s))| x - t - s)
        .collect();

    Ok(Decomposition {
        observed: series.to_vec(),
        trend,
        seasonal,
        residual,
        period,
    })
}

/// Centered moving average. Even periods use a 2xm average (half weight on
/// the two endpoints) so the window stays centered.
fn moving_average_trend(series: &[f64], period: usize) -> Vec<f64> {
    let n = series.len();
    let half = period / 2;
    let mut trend = vec![f64::NAN; n];

    if period % 2 == 1 {
        for i in half..n - half {
            let sum: f64 = series[i - half..=i + half].iter().sum();
            trend[i] = sum / period as f64;
        }
    } else {
        for i in half..n - half {
            let window = &series[i - half..=i + half];
            let mut sum = (window[0] + window[period]) / 2.0;
            sum += window[1..period].iter().sum::<f64>();
            trend[i] = sum / period as f64;
        }
    }

    trend
}

fn additive_seasonal(series: &[f64], trend: &[f64], period: usize) -> Vec<f64> {
    let n = series.len();
    let mut phase_sums = vec![0.0; period];
    let mut phase_counts = vec![0usize; period];

    for i in 0..n {
        if trend[i].is_nan() {
            continue;
        }
        phase_sums[i % period] += series[i] - trend[i];
        phase_counts[i % period] += 1;
    }

    let mut phase_means: Vec<f64> = phase_sums
        .iter()
        .zip(&phase_counts)
        .map(|(sum, &count)| if count > 0 { sum / count as f64 } else { 0.0 })
        .collect();

    // Center so the seasonal component sums to zero over one period.
    let grand_mean = phase_means.iter().sum::<f64>() / period as f64;
    for m in &mut phase_means {
        *m -= grand_mean;
    }

    (0..n).map(|i| phase_means[i % period]).collect()
}
