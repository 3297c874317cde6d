//! Hypothesis tests used by the association tester
//!
//! Each test returns `Err(SkipReason)` for inputs it cannot say anything
//! about, so callers can skip the column and keep going.

use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, StudentsT};

/// Slack allowed when clamping p-values that drift just outside [0, 1]
const P_TOLERANCE: f64 = 1e-12;

/// Why a column was not tested
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("need at least 2 non-empty groups, found {found}")]
    TooFewGroups { found: usize },

    #[error("no within-group degrees of freedom")]
    NoWithinGroupFreedom,

    #[error("all values are identical")]
    ConstantValues,

    #[error("contingency table is {rows}x{classes}; need at least 2 rows and exactly 2 target classes")]
    ContingencyShape { rows: usize, classes: usize },

    #[error("one side of the target partition has no values")]
    EmptyGroup,

    #[error("need at least 2 values per group, found {smallest}")]
    TooFewObservations { smallest: usize },

    #[error("test statistic is not finite")]
    NonFiniteStatistic,

    #[error("invalid distribution parameters: {message}")]
    Distribution { message: String },
}

impl SkipReason {
    fn distribution(err: impl std::fmt::Display) -> Self {
        SkipReason::Distribution {
            message: err.to_string(),
        }
    }
}

/// Statistic, degrees of freedom and p-value of a test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestStatistic {
    pub statistic: f64,
    pub df: f64,
    pub p_value: f64,
}

/// One-way ANOVA across groups of observations.
///
/// Groups must be non-empty; the caller drops empty ones first.
pub fn one_way_anova(groups: &[Vec<f64>]) -> Result<TestStatistic, SkipReason> {
    let k = groups.len();
    if k < 2 {
        return Err(SkipReason::TooFewGroups { found: k });
    }

    let total_n: usize = groups.iter().map(Vec::len).sum();
    if total_n <= k {
        return Err(SkipReason::NoWithinGroupFreedom);
    }

    let grand_mean = groups.iter().flatten().sum::<f64>() / total_n as f64;
    let group_means: Vec<f64> = groups
        .iter()
        .map(|g| g.iter().sum::<f64>() / g.len() as f64)
        .collect();

    let ss_between: f64 = groups
        .iter()
        .zip(&group_means)
        .map(|(g, &m)| g.len() as f64 * (m - grand_mean).powi(2))
        .sum();
    let ss_within: f64 = groups
        .iter()
        .zip(&group_means)
        .map(|(g, &m)| g.iter().map(|&x| (x - m).powi(2)).sum::<f64>())
        .sum();

    // Infinite inputs or overflowing squares
    if !ss_between.is_finite() || !ss_within.is_finite() {
        return Err(SkipReason::NonFiniteStatistic);
    }

    if ss_between + ss_within == 0.0 {
        return Err(SkipReason::ConstantValues);
    }

    let df_between = (k - 1) as f64;
    let df_within = (total_n - k) as f64;

    // Perfect separation: every group is constant but the means differ
    if ss_within == 0.0 {
        return Ok(TestStatistic {
            statistic: f64::INFINITY,
            df: df_between,
            p_value: 0.0,
        });
    }

    let f = (ss_between / df_between) / (ss_within / df_within);
    if !f.is_finite() {
        return Err(SkipReason::NonFiniteStatistic);
    }
    let dist = FisherSnedecor::new(df_between, df_within)
        .map_err(SkipReason::distribution)?;

    Ok(TestStatistic {
        statistic: f,
        df: df_between,
        p_value: checked_p_value(dist.sf(f))?,
    })
}

/// Chi-square test of independence on an `r x c` table of counts.
///
/// Applies Yates' continuity correction when the table has one degree of
/// freedom. Every row and column total must be positive.
pub fn chi_square_independence(table: &[Vec<f64>]) -> Result<TestStatistic, SkipReason> {
    let rows = table.len();
    let cols = table.first().map_or(0, Vec::len);
    if rows < 2 || cols < 2 || table.iter().any(|r| r.len() != cols) {
        return Err(SkipReason::ContingencyShape { rows, classes: cols });
    }

    let row_sums: Vec<f64> = table.iter().map(|r| r.iter().sum()).collect();
    let col_sums: Vec<f64> = (0..cols)
        .map(|j| table.iter().map(|r| r[j]).sum())
        .collect();
    let total: f64 = row_sums.iter().sum();

    if row_sums.iter().chain(&col_sums).any(|&s| s <= 0.0) {
        return Err(SkipReason::ContingencyShape { rows, classes: cols });
    }

    let dof = ((rows - 1) * (cols - 1)) as f64;
    let yates = rows == 2 && cols == 2;

    let mut statistic = 0.0;
    for (i, row) in table.iter().enumerate() {
        for (j, &observed) in row.iter().enumerate() {
            let expected = row_sums[i] * col_sums[j] / total;
            let mut diff = (observed - expected).abs();
            if yates {
                diff -= diff.min(0.5);
            }
            statistic += diff * diff / expected;
        }
    }

    let dist = ChiSquared::new(dof).map_err(SkipReason::distribution)?;

    Ok(TestStatistic {
        statistic,
        df: dof,
        p_value: checked_p_value(dist.sf(statistic))?,
    })
}

/// Welch's two-sample t-test (unequal variances), two-sided.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<TestStatistic, SkipReason> {
    if a.is_empty() || b.is_empty() {
        return Err(SkipReason::EmptyGroup);
    }
    let smallest = a.len().min(b.len());
    if smallest < 2 {
        return Err(SkipReason::TooFewObservations { smallest });
    }

    let (mean_a, var_a) = mean_and_variance(a);
    let (mean_b, var_b) = mean_and_variance(b);
    let na = a.len() as f64;
    let nb = b.len() as f64;

    let va = var_a / na;
    let vb = var_b / nb;
    let se_sq = va + vb;

    if se_sq == 0.0 {
        if mean_a == mean_b {
            return Err(SkipReason::ConstantValues);
        }
        // Both groups constant at different levels
        return Ok(TestStatistic {
            statistic: (mean_a - mean_b).signum() * f64::INFINITY,
            df: 1.0,
            p_value: 0.0,
        });
    }

    let t = (mean_a - mean_b) / se_sq.sqrt();
    let df = se_sq.powi(2) / (va * va / (na - 1.0) + vb * vb / (nb - 1.0));
    if !t.is_finite() || !df.is_finite() {
        return Err(SkipReason::NonFiniteStatistic);
    }

    let dist = StudentsT::new(0.0, 1.0, df).map_err(SkipReason::distribution)?;

    Ok(TestStatistic {
        statistic: t,
        df,
        p_value: checked_p_value(2.0 * dist.sf(t.abs()))?,
    })
}

/// Sample mean and variance (ddof = 1). Expects at least two values.
fn mean_and_variance(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var)
}

/// Reject NaN and clamp rounding noise into [0, 1].
fn checked_p_value(p: f64) -> Result<f64, SkipReason> {
    if !p.is_finite() || p < -P_TOLERANCE || p > 1.0 + P_TOLERANCE {
        return Err(SkipReason::NonFiniteStatistic);
    }
    Ok(p.clamp(0.0, 1.0))
}
