// src/analysis/arima.rs
use log::debug;

use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArimaOrder {
    pub p: usize,
    pub d: usize,
    pub q: usize,
}

/// A fitted ARIMA model over a single series. Coefficients are estimated
/// on the differenced series: AR terms by Yule-Walker, MA terms by a
/// moments approximation, intercept as the differenced-series mean.
#[derive(Debug, Clone)]
pub struct ArimaModel {
    pub order: ArimaOrder,
    pub ar: Vec<f64>,
    pub ma: Vec<f64>,
    pub intercept: f64,
    pub sigma2: f64,
    history: Vec<f64>,
    differenced: Vec<f64>,
    residuals: Vec<f64>,
}

impl ArimaModel {
    pub fn fit(series: &[f64], order: ArimaOrder) -> Result<ArimaModel, AnalysisError> {
        if series.iter().any(|x| !x.is_finite()) {
            return Err(AnalysisError::MissingValues);
        }

        let min = order.d + order.p.max(order.q) + 3;
        if series.len() < min {
            return Err(AnalysisError::SeriesTooShort {
                len: series.len(),
                min,
            });
        }

        let mut differenced = series.to_vec();
        for _ in 0..order.d {
            differenced = difference(&differenced);
        }

        let ar = estimate_ar(&differenced, order.p);
        let ma = estimate_ma(&differenced, order.q);
        let intercept = mean(&differenced);
        let residuals = compute_residuals(&differenced, &ar, &ma, intercept);
        let sigma2 = if residuals.is_empty() {
            0.0
        } else {
            residuals.iter().map(|r| r * r).sum::<f64>() / residuals.len() as f64
        };

        debug!(
            "fitted ARIMA({},{},{}): ar={:?} ma={:?} intercept={:.6} sigma2={:.6}",
            order.p, order.d, order.q, ar, ma, intercept, sigma2
        );

        Ok(ArimaModel {
            order,
            ar,
            ma,
            intercept,
            sigma2,
            history: series.to_vec(),
            differenced,
            residuals,
        })
    }

    /// Forecast `steps` values on the original (undifferenced) scale.
    /// Future shocks are taken as zero, and forecasts recurse on their
    /// own predictions.
    pub fn forecast(&self, steps: usize) -> Vec<f64> {
        if steps == 0 {
            return Vec::new();
        }

        let n = self.differenced.len();
        let mut extended = self.differenced.clone();
        let mut shocks = self.residuals.clone();

        for step in 0..steps {
            let t = n + step;
            let mut value = self.intercept;
            for (i, &phi) in self.ar.iter().enumerate() {
                if t > i {
                    value += phi * (extended[t - i - 1] - self.intercept);
                }
            }
            for (i, &theta) in self.ma.iter().enumerate() {
                if t > i && t - i - 1 < shocks.len() {
                    value += theta * shocks[t - i - 1];
                }
            }
            extended.push(value);
            shocks.push(0.0);
        }

        self.undifference(&extended[n..])
    }

    /// Integrate differenced forecasts back to the level of the history.
    fn undifference(&self, forecasts: &[f64]) -> Vec<f64> {
        let mut result = forecasts.to_vec();

        // Rebuild the ladder of partially-differenced series so each
        // integration step starts from the right last value.
        let mut levels = vec![self.history.clone()];
        for _ in 1..=self.order.d {
            let prev = levels.last().map(|l| difference(l)).unwrap_or_default();
            levels.push(prev);
        }

        for level in levels.iter().rev().skip(1) {
            let mut cumsum = level.last().copied().unwrap_or(0.0);
            for value in &mut result {
                cumsum += *value;
                *value = cumsum;
            }
        }

        result
    }
}

fn difference(series: &[f64]) -> Vec<f64> {
    series.windows(2).map(|w| w[1] - w[0]).collect()
}

fn mean(series: &[f64]) -> f64 {
    if series.is_empty() {
        0.0
    } else {
        series.iter().sum::<f64>() / series.len() as f64
    }
}

fn autocovariance(series: &[f64], lag: usize) -> f64 {
    let n = series.len();
    let mu = mean(series);
    let mut sum = 0.0;
    for t in lag..n {
        sum += (series[t] - mu) * (series[t - lag] - mu);
    }
    sum / n as f64
}

/// Yule-Walker estimates. For p = 1 this is the lag-1 autocorrelation,
/// clamped inside the stationarity region; higher lags fall back to
/// damped autocorrelations.
fn estimate_ar(series: &[f64], p: usize) -> Vec<f64> {
    if p == 0 {
        return Vec::new();
    }
    let gamma0 = autocovariance(series, 0);
    if gamma0 <= 0.0 {
        return vec![0.0; p];
    }

    (0..p)
        .map(|i| {
            let rho = autocovariance(series, i + 1) / gamma0;
            let damped = rho * 0.5f64.powi(i as i32);
            damped.clamp(-0.99, 0.99)
        })
        .collect()
}

/// Moments approximation for MA terms from the sample autocorrelations,
/// kept inside the invertibility region.
fn estimate_ma(series: &[f64], q: usize) -> Vec<f64> {
    if q == 0 {
        return Vec::new();
    }
    let gamma0 = autocovariance(series, 0);
    if gamma0 <= 0.0 {
        return vec![0.0; q];
    }

    (0..q)
        .map(|i| {
            let rho = autocovariance(series, i + 1) / gamma0;
            (rho * 0.5f64.powi(i as i32)).clamp(-0.5, 0.5)
        })
        .collect()
}

fn compute_residuals(series: &[f64], ar: &[f64], ma: &[f64], intercept: f64) -> Vec<f64> {
    let n = series.len();
    let mut residuals = vec![0.0; n];
    let start = ar.len().max(ma.len());

    for t in start..n {
        let mut prediction = intercept;
        for (i, &phi) in ar.iter().enumerate() {
            prediction += phi * (series[t - i - 1] - intercept);
        }
        for (i, &theta) in ma.iter().enumerate() {
            prediction += theta * residuals[t - i - 1];
        }
        residuals[t] = series[t] - prediction;
    }

    residuals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ARIMA_ORDER;

    fn sample_series() -> Vec<f64> {
        (0..48)
            .map(|i| 100.0 + 2.0 * i as f64 + ((i * 17) % 9) as f64 * 0.8)
            .collect()
    }

    #[test]
    fn forecast_has_requested_length() {
        let model = ArimaModel::fit(&sample_series(), ARIMA_ORDER).unwrap();
        for steps in [5, 12, 60] {
            assert_eq!(model.forecast(steps).len(), steps);
        }
        assert!(model.forecast(0).is_empty());
    }

    #[test]
    fn fit_is_deterministic() {
        let series = sample_series();
        let a = ArimaModel::fit(&series, ARIMA_ORDER).unwrap();
        let b = ArimaModel::fit(&series, ARIMA_ORDER).unwrap();
        assert_eq!(a.ar, b.ar);
        assert_eq!(a.ma, b.ma);
        assert_eq!(a.forecast(12), b.forecast(12));
    }

    #[test]
    fn constant_series_forecasts_flat() {
        let series = vec![42.0; 30];
        let model = ArimaModel::fit(&series, ARIMA_ORDER).unwrap();
        for value in model.forecast(10) {
            assert!((value - 42.0).abs() < 1e-9);
        }
    }

    #[test]
    fn trending_series_keeps_trending() {
        let series: Vec<f64> = (0..40).map(|i| 10.0 + 3.0 * i as f64).collect();
        let model = ArimaModel::fit(&series, ARIMA_ORDER).unwrap();
        let forecast = model.forecast(5);
        let last = *series.last().unwrap();
        // First differences are a constant 3, so forecasts keep climbing.
        assert!(forecast[0] > last);
        assert!(forecast[4] > forecast[0]);
    }

    #[test]
    fn short_series_is_rejected() {
        let series = vec![1.0, 2.0, 3.0];
        assert!(matches!(
            ArimaModel::fit(&series, ARIMA_ORDER),
            Err(AnalysisError::SeriesTooShort { .. })
        ));
    }

    #[test]
    fn nan_input_is_rejected() {
        let mut series = sample_series();
        series[3] = f64::NAN;
        assert!(matches!(
            ArimaModel::fit(&series, ARIMA_ORDER),
            Err(AnalysisError::MissingValues)
        ));
    }
}
