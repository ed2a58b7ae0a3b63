// src/analysis/hypothesis.rs
use statrs::distribution::{ChiSquared, ContinuousCDF, StudentsT};

use crate::analysis::is_significant;
use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy)]
pub struct TTestResult {
    pub statistic: f64,
    pub p_value: f64,
    pub df: f64,
}

impl TTestResult {
    pub fn is_significant(&self) -> bool {
        is_significant(self.p_value)
    }
}

/// Independent two-sample Student's t-test with pooled variance.
/// Non-finite values are dropped per sample before testing.
pub fn t_test(name_a: &str, a: &[f64], name_b: &str, b: &[f64]) -> Result<TTestResult, AnalysisError> {
    let xs: Vec<f64> = a.iter().copied().filter(|x| x.is_finite()).collect();
    let ys: Vec<f64> = b.iter().copied().filter(|x| x.is_finite()).collect();

    for (name, sample) in [(name_a, &xs), (name_b, &ys)] {
        if sample.len() < 2 {
            return Err(AnalysisError::SampleTooSmall {
                name: name.to_string(),
                len: sample.len(),
            });
        }
    }

    let n1 = xs.len() as f64;
    let n2 = ys.len() as f64;
    let mean1 = xs.iter().sum::<f64>() / n1;
    let mean2 = ys.iter().sum::<f64>() / n2;
    let var1 = xs.iter().map(|x| (x - mean1).powi(2)).sum::<f64>() / (n1 - 1.0);
    let var2 = ys.iter().map(|y| (y - mean2).powi(2)).sum::<f64>() / (n2 - 1.0);

    let df = n1 + n2 - 2.0;
    let pooled_var = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / df;
    let se = (pooled_var * (1.0 / n1 + 1.0 / n2)).sqrt();

    let statistic = (mean1 - mean2) / se;
    if !statistic.is_finite() {
        return Err(AnalysisError::NonFiniteStatistic);
    }

    let t_dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| AnalysisError::Distribution(e.to_string()))?;
    let p_value = 2.0 * (1.0 - t_dist.cdf(statistic.abs()));

    Ok(TTestResult {
        statistic,
        p_value,
        df,
    })
}

/// The chi-square screen needs at least two text columns to choose from.
pub fn check_categorical_columns(names: &[String]) -> Result<(), AnalysisError> {
    if names.len() < 2 {
        Err(AnalysisError::InsufficientCategoricalColumns)
    } else {
        Ok(())
    }
}

/// Cross-tabulated counts of two categorical variables. Levels are sorted
/// so the table layout is deterministic.
#[derive(Debug, Clone)]
pub struct ContingencyTable {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub counts: Vec<Vec<f64>>,
}

/// Build a contingency table from two aligned text columns. Pairs with an
/// empty cell on either side are skipped, mirroring how missing values
/// drop out of a cross-tabulation.
pub fn contingency_table(a: &[String], b: &[String]) -> Result<ContingencyTable, AnalysisError> {
    let pairs: Vec<(&String, &String)> = a
        .iter()
        .zip(b.iter())
        .filter(|(x, y)| !x.is_empty() && !y.is_empty())
        .collect();

    let mut row_labels: Vec<String> = pairs.iter().map(|(x, _)| (*x).clone()).collect();
    let mut col_labels: Vec<String> = pairs.iter().map(|(_, y)| (*y).clone()).collect();
    row_labels.sort();
    row_labels.dedup();
    col_labels.sort();
    col_labels.dedup();

    if row_labels.len() < 2 || col_labels.len() < 2 {
        return Err(AnalysisError::DegenerateTable);
    }

    let mut counts = vec![vec![0.0; col_labels.len()]; row_labels.len()];
    for (x, y) in pairs {
        let i = row_labels.iter().position(|l| l == x).unwrap_or_default();
        let j = col_labels.iter().position(|l| l == y).unwrap_or_default();
        counts[i][j] += 1.0;
    }

    Ok(ContingencyTable {
        row_labels,
        col_labels,
        counts,
    })
}

#[derive(Debug, Clone, Copy)]
pub struct ChiSquareResult {
    pub statistic: f64,
    pub p_value: f64,
    pub dof: usize,
}

impl ChiSquareResult {
    pub fn is_significant(&self) -> bool {
        is_significant(self.p_value)
    }
}

/// Chi-square test of independence on a contingency table. Expected
/// counts are row_total * col_total / grand_total.
pub fn chi_square_test(table: &ContingencyTable) -> Result<ChiSquareResult, AnalysisError> {
    let rows = table.counts.len();
    let cols = table.counts.first().map(|r| r.len()).unwrap_or(0);
    if rows < 2 || cols < 2 {
        return Err(AnalysisError::DegenerateTable);
    }

    let mut row_totals = vec![0.0; rows];
    let mut col_totals = vec![0.0; cols];
    let mut total = 0.0;
    for i in 0..rows {
        for j in 0..cols {
            let v = table.counts[i][j];
            row_totals[i] += v;
            col_totals[j] += v;
            total += v;
        }
    }
    if total <= 0.0 {
        return Err(AnalysisError::DegenerateTable);
    }

    let mut statistic = 0.0;
    for i in 0..rows {
        for j in 0..cols {
            let expected = row_totals[i] * col_totals[j] / total;
            if expected <= 0.0 {
                continue;
            }
            let d = table.counts[i][j] - expected;
            statistic += d * d / expected;
        }
    }
    if !statistic.is_finite() {
        return Err(AnalysisError::NonFiniteStatistic);
    }

    let dof = (rows - 1) * (cols - 1);
    let dist = ChiSquared::new(dof as f64)
        .map_err(|e| AnalysisError::Distribution(e.to_string()))?;
    let p_value = (1.0 - dist.cdf(statistic)).clamp(0.0, 1.0);

    Ok(ChiSquareResult {
        statistic,
        p_value,
        dof,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn t_test_matches_hand_computation() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 3.0, 4.0, 5.0];
        let r = t_test("a", &a, "b", &b).unwrap();
        // Pooled variance 5/3, se = sqrt(5/6), t = -1/se.
        assert!((r.statistic - (-1.095445)).abs() < 1e-5, "t {}", r.statistic);
        assert_eq!(r.df, 6.0);
        assert!((r.p_value - 0.315).abs() < 0.005, "p {}", r.p_value);
        assert!(!r.is_significant());
    }

    #[test]
    fn t_test_on_identical_samples_is_null() {
        let a = [1.0, 2.0, 3.0];
        let r = t_test("a", &a, "b", &a).unwrap();
        assert_eq!(r.statistic, 0.0);
        assert!((r.p_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn t_test_filters_non_finite_values() {
        let a = [1.0, f64::NAN, 2.0, 3.0, 4.0];
        let b = [2.0, 3.0, 4.0, 5.0, f64::INFINITY];
        let r = t_test("a", &a, "b", &b).unwrap();
        let clean = t_test("a", &[1.0, 2.0, 3.0, 4.0], "b", &[2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(r.statistic, clean.statistic);
    }

    #[test]
    fn t_test_rejects_tiny_samples() {
        let err = t_test("a", &[1.0], "b", &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::SampleTooSmall { ref name, len: 1 } if name == "a"));
    }

    #[test]
    fn fewer_than_two_categorical_columns_is_an_input_error() {
        assert!(check_categorical_columns(&labels(&["Region", "Outcome"])).is_ok());
        for names in [vec![], labels(&["Region"])] {
            assert!(matches!(
                check_categorical_columns(&names),
                Err(AnalysisError::InsufficientCategoricalColumns)
            ));
        }
    }

    #[test]
    fn crosstab_counts_sorted_levels() {
        let region = labels(&["North", "South", "North", "South", "North"]);
        let outcome = labels(&["Win", "Win", "Loss", "Loss", "Win"]);
        let t = contingency_table(&region, &outcome).unwrap();
        assert_eq!(t.row_labels, labels(&["North", "South"]));
        assert_eq!(t.col_labels, labels(&["Loss", "Win"]));
        assert_eq!(t.counts, vec![vec![1.0, 2.0], vec![1.0, 1.0]]);
    }

    #[test]
    fn crosstab_skips_pairs_with_missing_cells() {
        let a = labels(&["x", "", "x", "y"]);
        let b = labels(&["u", "v", "", "v"]);
        let t = contingency_table(&a, &b).unwrap();
        let total: f64 = t.counts.iter().flatten().sum();
        assert_eq!(total, 2.0);
    }

    #[test]
    fn single_level_column_is_degenerate() {
        let a = labels(&["x", "x", "x"]);
        let b = labels(&["u", "v", "u"]);
        assert!(matches!(
            contingency_table(&a, &b),
            Err(AnalysisError::DegenerateTable)
        ));
    }

    #[test]
    fn chi_square_matches_closed_form_2x2() {
        // Counts [[10, 5], [3, 12]]: expected row/col totals give
        // statistic = 12.25/6.5 * 2 + 12.25/8.5 * 2.
        let table = ContingencyTable {
            row_labels: labels(&["a", "b"]),
            col_labels: labels(&["u", "v"]),
            counts: vec![vec![10.0, 5.0], vec![3.0, 12.0]],
        };
        let r = chi_square_test(&table).unwrap();
        assert!((r.statistic - 6.651584).abs() < 1e-5, "chi2 {}", r.statistic);
        assert_eq!(r.dof, 1);
        assert!((r.p_value - 0.0099).abs() < 1e-3, "p {}", r.p_value);
        assert!(r.is_significant());
    }

    #[test]
    fn independent_table_is_not_significant() {
        let table = ContingencyTable {
            row_labels: labels(&["a", "b"]),
            col_labels: labels(&["u", "v"]),
            counts: vec![vec![10.0, 10.0], vec![10.0, 10.0]],
        };
        let r = chi_square_test(&table).unwrap();
        assert_eq!(r.statistic, 0.0);
        assert!(!r.is_significant());
    }
}
