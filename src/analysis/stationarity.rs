// src/analysis/stationarity.rs
use crate::analysis::is_significant;
use crate::error::AnalysisError;

/// Result of the augmented Dickey-Fuller test.
#[derive(Debug, Clone, Copy)]
pub struct AdfResult {
    pub statistic: f64,
    pub p_value: f64,
}

impl AdfResult {
    /// The null hypothesis is a unit root, so small p means stationary.
    pub fn is_stationary(&self) -> bool {
        is_significant(self.p_value)
    }
}

// Asymptotic quantiles of the Dickey-Fuller tau distribution for the
// constant-only regression (Fuller 1976, tau_mu, n -> inf).
const TAU_QUANTILES: &[(f64, f64)] = &[
    (-3.43, 0.01),
    (-3.12, 0.025),
    (-2.86, 0.05),
    (-2.57, 0.10),
    (-1.57, 0.50),
    (-0.44, 0.90),
    (-0.07, 0.95),
    (0.60, 0.99),
];

/// Dickey-Fuller unit-root test with intercept: OLS of
/// dy_t = alpha + beta * y_{t-1}, t-statistic of beta, p-value
/// interpolated from the tau distribution table.
pub fn adf_test(series: &[f64]) -> Result<AdfResult, AnalysisError> {
    let n = series.len();
    if n < 4 {
        return Err(AnalysisError::SeriesTooShort { len: n, min: 4 });
    }

    let m = n - 1;
    let mut dy = Vec::with_capacity(m);
    let mut y_lag = Vec::with_capacity(m);
    for t in 1..n {
        dy.push(series[t] - series[t - 1]);
        y_lag.push(series[t - 1]);
    }

    let m_f = m as f64;
    let mean_y = y_lag.iter().sum::<f64>() / m_f;
    let mean_dy = dy.iter().sum::<f64>() / m_f;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for i in 0..m {
        let x = y_lag[i] - mean_y;
        sxx += x * x;
        sxy += x * (dy[i] - mean_dy);
    }
    if sxx <= 0.0 {
        // Constant series: no regressor variance, no test.
        return Err(AnalysisError::NonFiniteStatistic);
    }

    let beta = sxy / sxx;
    let alpha = mean_dy - beta * mean_y;

    let mut rss = 0.0;
    for i in 0..m {
        let e = dy[i] - (alpha + beta * y_lag[i]);
        rss += e * e;
    }

    let dof = m as f64 - 2.0;
    let sigma2 = rss / dof;
    let se_beta = (sigma2 / sxx).sqrt();
    if !se_beta.is_finite() || se_beta <= 0.0 {
        return Err(AnalysisError::NonFiniteStatistic);
    }

    let statistic = beta / se_beta;
    if !statistic.is_finite() {
        return Err(AnalysisError::NonFiniteStatistic);
    }

    Ok(AdfResult {
        statistic,
        p_value: tau_p_value(statistic),
    })
}

/// Linear interpolation over the tau quantile table, clamped at the ends.
fn tau_p_value(statistic: f64) -> f64 {
    let first = TAU_QUANTILES[0];
    if statistic <= first.0 {
        return first.1;
    }
    for pair in TAU_QUANTILES.windows(2) {
        let (lo_stat, lo_p) = pair[0];
        let (hi_stat, hi_p) = pair[1];
        if statistic <= hi_stat {
            let w = (statistic - lo_stat) / (hi_stat - lo_stat);
            return lo_p + w * (hi_p - lo_p);
        }
    }
    TAU_QUANTILES[TAU_QUANTILES.len() - 1].1
}
