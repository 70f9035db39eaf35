//! Nonparametric comparison of two groups of terminal values.
//!
//! Three tests are reported side by side: the signed-rank test (paired by
//! repetition id), the rank-sum test and the U-test. No accept/reject
//! decision is taken here; callers interpret the raw statistics.
//!
//! Degenerate inputs (all paired differences zero, an empty group, zero
//! rank variance) are not errors: the result carries `p_value = 1.0` and
//! `degenerate = true`.

use super::align::align;
use super::dist::{normal_sf, normal_two_sided};
use super::loader::load_many;
use super::stats::{average_ranks, tie_term};
use crate::error::{Result, SweepError};
use crate::model::RunKey;
use crate::storage::Repository;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{info, warn};

/// Largest number of non-zero differences for the exact signed-rank null.
pub const SIGNED_RANK_EXACT_MAX: usize = 50;

/// Largest group size (both groups) for the exact U null distribution.
pub const U_TEST_EXACT_MAX: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    SignedRank,
    RankSum,
    UTest,
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignedRank => write!(f, "signed-rank"),
            Self::RankSum => write!(f, "rank-sum"),
            Self::UTest => write!(f, "u-test"),
        }
    }
}

/// How the p-value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Exact,
    Asymptotic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestResult {
    pub kind: TestKind,
    pub statistic: f64,
    pub p_value: f64,
    pub method: Method,
    pub degenerate: bool,
}

impl TestResult {
    const fn degenerate(kind: TestKind, statistic: f64) -> Self {
        Self {
            kind,
            statistic,
            p_value: 1.0,
            method: Method::Exact,
            degenerate: true,
        }
    }
}

/// All tests run on one pair of groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Only present for paired comparisons.
    pub signed_rank: Option<TestResult>,
    pub rank_sum: TestResult,
    pub u_test: TestResult,
}

impl ComparisonReport {
    pub fn tests(&self) -> impl Iterator<Item = &TestResult> {
        self.signed_rank
            .iter()
            .chain([&self.rank_sum, &self.u_test])
    }
}

/// Run every applicable test on two terminal-value vectors.
///
/// # Errors
///
/// Returns `InvalidInput` if `paired` is set and the groups differ in length.
pub fn compare(a: &[f64], b: &[f64], paired: bool) -> Result<ComparisonReport> {
    let signed_rank = if paired {
        Some(signed_rank(a, b)?)
    } else {
        None
    };
    Ok(ComparisonReport {
        signed_rank,
        rank_sum: rank_sum(a, b),
        u_test: mann_whitney_u(a, b),
    })
}

/// Wilcoxon signed-rank test on index-paired samples.
///
/// Zero differences are discarded before ranking. The statistic is the
/// smaller of the positive and negative rank sums.
///
/// # Errors
///
/// Returns `InvalidInput` if the samples differ in length.
pub fn signed_rank(a: &[f64], b: &[f64]) -> Result<TestResult> {
    if a.len() != b.len() {
        return Err(SweepError::invalid_input(format!(
            "signed-rank test needs paired samples, got {} and {} values",
            a.len(),
            b.len()
        )));
    }

    let diffs: Vec<f64> = a
        .iter()
        .zip(b)
        .map(|(x, y)| x - y)
        .filter(|d| *d != 0.0)
        .collect();
    let n = diffs.len();
    if n == 0 {
        return Ok(TestResult::degenerate(TestKind::SignedRank, 0.0));
    }

    let magnitudes: Vec<f64> = diffs.iter().map(|d| d.abs()).collect();
    let (ranks, ties) = average_ranks(&magnitudes);
    let r_plus: f64 = diffs
        .iter()
        .zip(&ranks)
        .filter(|(d, _)| **d > 0.0)
        .map(|(_, r)| r)
        .sum();
    let r_minus: f64 = diffs
        .iter()
        .zip(&ranks)
        .filter(|(d, _)| **d < 0.0)
        .map(|(_, r)| r)
        .sum();
    let statistic = r_plus.min(r_minus);
    let has_ties = ties.iter().any(|&t| t > 1);

    if n <= SIGNED_RANK_EXACT_MAX && !has_ties {
        let counts = signed_rank_null_counts(n);
        let total: f64 = counts.iter().sum();
        // statistic is a whole number without ties
        let k = statistic as usize;
        let cdf: f64 = counts[..=k].iter().sum::<f64>() / total;
        return Ok(TestResult {
            kind: TestKind::SignedRank,
            statistic,
            p_value: (2.0 * cdf).min(1.0),
            method: Method::Exact,
            degenerate: false,
        });
    }

    let nf = n as f64;
    let mean = nf * (nf + 1.0) / 4.0;
    let variance = nf * (nf + 1.0) * (2.0 * nf + 1.0) / 24.0 - tie_term(&ties) / 48.0;
    if variance <= 0.0 {
        return Ok(TestResult::degenerate(TestKind::SignedRank, statistic));
    }
    let z = (statistic - mean) / variance.sqrt();
    Ok(TestResult {
        kind: TestKind::SignedRank,
        statistic,
        p_value: normal_two_sided(z),
        method: Method::Asymptotic,
        degenerate: false,
    })
}

/// Number of subsets of `1..=n` summing to each total `0..=n(n+1)/2`.
fn signed_rank_null_counts(n: usize) -> Vec<f64> {
    let max = n * (n + 1) / 2;
    let mut counts = vec![0.0; max + 1];
    counts[0] = 1.0;
    for rank in 1..=n {
        for total in (rank..=max).rev() {
            counts[total] += counts[total - rank];
        }
    }
    counts
}

/// Wilcoxon rank-sum test: z statistic of group A's rank sum.
#[must_use]
pub fn rank_sum(a: &[f64], b: &[f64]) -> TestResult {
    let (n1, n2) = (a.len(), b.len());
    if n1 == 0 || n2 == 0 {
        return TestResult::degenerate(TestKind::RankSum, 0.0);
    }

    let pooled: Vec<f64> = a.iter().chain(b).copied().collect();
    let (ranks, _) = average_ranks(&pooled);
    let s: f64 = ranks[..n1].iter().sum();

    let (n1, n2) = (n1 as f64, n2 as f64);
    let expected = n1 * (n1 + n2 + 1.0) / 2.0;
    let z = (s - expected) / (n1 * n2 * (n1 + n2 + 1.0) / 12.0).sqrt();
    TestResult {
        kind: TestKind::RankSum,
        statistic: z,
        p_value: normal_two_sided(z),
        method: Method::Asymptotic,
        degenerate: false,
    }
}

/// Mann-Whitney U test, two-sided. The statistic is U of group A.
#[must_use]
pub fn mann_whitney_u(a: &[f64], b: &[f64]) -> TestResult {
    let (n1, n2) = (a.len(), b.len());
    if n1 == 0 || n2 == 0 {
        return TestResult::degenerate(TestKind::UTest, 0.0);
    }

    let pooled: Vec<f64> = a.iter().chain(b).copied().collect();
    let (ranks, ties) = average_ranks(&pooled);
    let r1: f64 = ranks[..n1].iter().sum();
    let (n1f, n2f) = (n1 as f64, n2 as f64);
    let u1 = r1 - n1f * (n1f + 1.0) / 2.0;
    let u2 = n1f * n2f - u1;
    let u_max = u1.max(u2);
    let has_ties = ties.iter().any(|&t| t > 1);

    if n1 <= U_TEST_EXACT_MAX && n2 <= U_TEST_EXACT_MAX && !has_ties {
        let counts = u_null_counts(n1, n2);
        let total: f64 = counts.iter().sum();
        let k = u_max as usize;
        let sf: f64 = counts[k..].iter().sum::<f64>() / total;
        return TestResult {
            kind: TestKind::UTest,
            statistic: u1,
            p_value: (2.0 * sf).min(1.0),
            method: Method::Exact,
            degenerate: false,
        };
    }

    let n = n1f + n2f;
    let mean = n1f * n2f / 2.0;
    let variance = n1f * n2f / 12.0 * ((n + 1.0) - tie_term(&ties) / (n * (n - 1.0)));
    if variance <= 0.0 {
        return TestResult::degenerate(TestKind::UTest, u1);
    }
    let z = (u_max - mean - 0.5) / variance.sqrt();
    TestResult {
        kind: TestKind::UTest,
        statistic: u1,
        p_value: (2.0 * normal_sf(z)).min(1.0),
        method: Method::Asymptotic,
        degenerate: false,
    }
}

/// Null distribution counts of U for group sizes `m`, `n`: the coefficients
/// of the Gaussian binomial `[m + n choose m]_q`.
fn u_null_counts(m: usize, n: usize) -> Vec<f64> {
    let mut coeffs = vec![0.0; m * n + m + n + 1];
    coeffs[0] = 1.0;
    for i in 1..=m {
        // multiply by (1 - q^(n + i))
        let shift = n + i;
        for k in (shift..coeffs.len()).rev() {
            coeffs[k] -= coeffs[k - shift];
        }
        // divide by (1 - q^i)
        for k in i..coeffs.len() {
            coeffs[k] += coeffs[k - i];
        }
    }
    coeffs.truncate(m * n + 1);
    coeffs
}

/// One side of a comparison, enumerated from its own storage location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonGroup {
    pub label: String,
    pub key: RunKey,
}

impl ComparisonGroup {
    #[must_use]
    pub fn new(label: impl Into<String>, key: RunKey) -> Self {
        Self {
            label: label.into(),
            key,
        }
    }
}

/// Terminal values of one group as fed to the tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSample {
    pub group: ComparisonGroup,
    pub repetition_ids: Vec<u32>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupComparison {
    pub a: GroupSample,
    pub b: GroupSample,
    pub report: ComparisonReport,
}

/// Load both groups, take their terminal column at `cap` and compare.
///
/// Paired comparisons match repetitions by id.
///
/// # Errors
///
/// Fails if either group cannot be loaded, or if a paired comparison finds
/// groups with different repetition ids.
pub fn compare_groups<R: Repository + ?Sized>(
    repo: &R,
    a: &ComparisonGroup,
    b: &ComparisonGroup,
    cap: usize,
    paired: bool,
) -> Result<GroupComparison> {
    if a.key == b.key {
        warn!(key = %a.key, "Both comparison groups resolve to the same run");
    }

    let sets = load_many(repo, &[a.key.clone(), b.key.clone()])?;
    let terminal_a: BTreeMap<u32, f64> = align(&sets[0], cap).terminal_values().into_iter().collect();
    let terminal_b: BTreeMap<u32, f64> = align(&sets[1], cap).terminal_values().into_iter().collect();

    if paired && !terminal_a.keys().eq(terminal_b.keys()) {
        return Err(SweepError::invalid_input(format!(
            "cannot pair '{}' ({} terminal values) with '{}' ({} terminal values): repetition ids differ",
            a.key,
            terminal_a.len(),
            b.key,
            terminal_b.len()
        )));
    }

    let sample_a = GroupSample {
        group: a.clone(),
        repetition_ids: terminal_a.keys().copied().collect(),
        values: terminal_a.values().copied().collect(),
    };
    let sample_b = GroupSample {
        group: b.clone(),
        repetition_ids: terminal_b.keys().copied().collect(),
        values: terminal_b.values().copied().collect(),
    };

    let report = compare(&sample_a.values, &sample_b.values, paired)?;
    info!(
        a = %a.key,
        b = %b.key,
        n_a = sample_a.values.len(),
        n_b = sample_b.values.len(),
        paired,
        "Compared groups"
    );

    Ok(GroupComparison {
        a: sample_a,
        b: sample_b,
        report,
    })
}
