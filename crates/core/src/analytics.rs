//! Derived analytics over cash-call records.
//!
//! Pure, side-effect-free aggregation over an in-memory record set. Every
//! figure is recomputed from scratch on each call; nothing here touches the
//! database. All arithmetic is exact decimal arithmetic.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::lifecycle::types::CashCallStatus;

/// The slice of a cash call the aggregation needs.
#[derive(Debug, Clone)]
pub struct CashCallSnapshot {
    /// Requested amount.
    pub amount_requested: Decimal,
    /// Current workflow status.
    pub status: CashCallStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Approval timestamp, when the call reached `Approved`.
    pub approved_at: Option<DateTime<Utc>>,
}

/// Aggregate figures over a set of cash calls.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AnalyticsSummary {
    /// Number of records aggregated.
    pub total_count: usize,
    /// Sum of `amount_requested` over all records.
    pub total_amount: Decimal,
    /// Sum over records with status approved or paid.
    pub approved_amount: Decimal,
    /// Sum over rejected records.
    pub rejected_amount: Decimal,
    /// Sum over records under review.
    pub pending_amount: Decimal,
    /// Approved-or-paid share of all records, in whole percent.
    pub approval_rate: Decimal,
    /// Mean requested amount, rounded to a whole unit.
    pub avg_amount: Decimal,
    /// Records failing the two-standard-deviation outlier test.
    pub anomaly_count: usize,
    /// Mean approval latency in whole days, over records carrying
    /// `approved_at`.
    pub avg_approval_days: i64,
}

impl AnalyticsSummary {
    /// An all-zero summary for an empty record set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_count: 0,
            total_amount: Decimal::ZERO,
            approved_amount: Decimal::ZERO,
            rejected_amount: Decimal::ZERO,
            pending_amount: Decimal::ZERO,
            approval_rate: Decimal::ZERO,
            avg_amount: Decimal::ZERO,
            anomaly_count: 0,
            avg_approval_days: 0,
        }
    }

    /// Computes the full aggregate over `calls`.
    ///
    /// Rates and averages are 0 for an empty input, never a division error.
    #[must_use]
    pub fn compute(calls: &[CashCallSnapshot]) -> Self {
        if calls.is_empty() {
            return Self::empty();
        }

        let count = Decimal::from(calls.len());
        let mut total_amount = Decimal::ZERO;
        let mut approved_amount = Decimal::ZERO;
        let mut rejected_amount = Decimal::ZERO;
        let mut pending_amount = Decimal::ZERO;
        let mut approved_count: usize = 0;

        for call in calls {
            total_amount += call.amount_requested;
            match call.status {
                CashCallStatus::Approved | CashCallStatus::Paid => {
                    approved_amount += call.amount_requested;
                    approved_count += 1;
                }
                CashCallStatus::Rejected => rejected_amount += call.amount_requested,
                CashCallStatus::UnderReview => pending_amount += call.amount_requested,
                CashCallStatus::Draft => {}
            }
        }

        let approval_rate = (Decimal::from(approved_count) / count * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let avg_amount =
            (total_amount / count).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        Self {
            total_count: calls.len(),
            total_amount,
            approved_amount,
            rejected_amount,
            pending_amount,
            approval_rate,
            avg_amount,
            anomaly_count: count_anomalies(calls),
            avg_approval_days: avg_approval_days(calls),
        }
    }
}

/// Counts records whose amount is more than two standard deviations away
/// from the mean of the remaining records' amounts.
///
/// The test is leave-one-out: each record is measured against the
/// distribution of the others, so a single extreme value cannot mask itself
/// by inflating the deviation it is compared against. The comparison is done
/// on squared values (`dev² > 4·variance`), which is equivalent to
/// `|dev| > 2σ` and keeps the arithmetic exact.
fn count_anomalies(calls: &[CashCallSnapshot]) -> usize {
    if calls.len() < 2 {
        return 0;
    }

    let total: Decimal = calls.iter().map(|c| c.amount_requested).sum();
    let rest_count = Decimal::from(calls.len() - 1);

    calls
        .iter()
        .enumerate()
        .filter(|(i, call)| {
            let rest_mean = (total - call.amount_requested) / rest_count;
            let rest_variance: Decimal = calls
                .iter()
                .enumerate()
                .filter(|(j, _)| j != i)
                .map(|(_, other)| {
                    let dev = other.amount_requested - rest_mean;
                    dev * dev
                })
                .sum::<Decimal>()
                / rest_count;

            let dev = call.amount_requested - rest_mean;
            dev * dev > Decimal::from(4) * rest_variance
        })
        .count()
}

/// Mean approval latency in whole days over records carrying `approved_at`;
/// 0 when none do.
fn avg_approval_days(calls: &[CashCallSnapshot]) -> i64 {
    let latencies: Vec<i64> = calls
        .iter()
        .filter_map(|c| {
            c.approved_at
                .map(|approved| (approved - c.created_at).num_seconds())
        })
        .collect();

    if latencies.is_empty() {
        return 0;
    }

    let total_secs: i64 = latencies.iter().sum();
    let count = i64::try_from(latencies.len()).unwrap_or(i64::MAX);
    total_secs / count / 86_400
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn call(amount: Decimal, status: CashCallStatus) -> CashCallSnapshot {
        CashCallSnapshot {
            amount_requested: amount,
            status,
            created_at: Utc::now(),
            approved_at: None,
        }
    }

    #[test]
    fn test_empty_input_is_all_zeros() {
        let summary = AnalyticsSummary::compute(&[]);
        assert_eq!(summary, AnalyticsSummary::empty());
        assert_eq!(summary.approval_rate, Decimal::ZERO);
        assert_eq!(summary.avg_amount, Decimal::ZERO);
    }

    #[test]
    fn test_totals_by_status() {
        let calls = vec![
            call(dec!(100), CashCallStatus::Approved),
            call(dec!(200), CashCallStatus::Paid),
            call(dec!(50), CashCallStatus::Rejected),
            call(dec!(25), CashCallStatus::UnderReview),
            call(dec!(10), CashCallStatus::Draft),
        ];
        let summary = AnalyticsSummary::compute(&calls);
        assert_eq!(summary.total_count, 5);
        assert_eq!(summary.total_amount, dec!(385));
        assert_eq!(summary.approved_amount, dec!(300));
        assert_eq!(summary.rejected_amount, dec!(50));
        assert_eq!(summary.pending_amount, dec!(25));
        // 2 of 5 approved-or-paid = 40%
        assert_eq!(summary.approval_rate, dec!(40));
        assert_eq!(summary.avg_amount, dec!(77));
    }

    #[test]
    fn test_approval_rate_rounds_half_away_from_zero() {
        // 1 of 8 = 12.5% -> 13
        let mut calls = vec![call(dec!(10), CashCallStatus::Approved)];
        for _ in 0..7 {
            calls.push(call(dec!(10), CashCallStatus::Draft));
        }
        let summary = AnalyticsSummary::compute(&calls);
        assert_eq!(summary.approval_rate, dec!(13));
    }

    #[test]
    fn test_zero_variance_has_no_anomalies() {
        for n in 1..=6 {
            let calls: Vec<_> = (0..n)
                .map(|_| call(dec!(500), CashCallStatus::UnderReview))
                .collect();
            let summary = AnalyticsSummary::compute(&calls);
            assert_eq!(summary.anomaly_count, 0, "n = {n}");
        }
    }

    #[test]
    fn test_single_outlier_is_flagged() {
        let calls = vec![
            call(dec!(100), CashCallStatus::UnderReview),
            call(dec!(100), CashCallStatus::UnderReview),
            call(dec!(10000), CashCallStatus::UnderReview),
        ];
        let summary = AnalyticsSummary::compute(&calls);
        assert_eq!(summary.anomaly_count, 1);
    }

    #[test]
    fn test_tight_cluster_has_no_anomalies() {
        let calls = vec![
            call(dec!(95), CashCallStatus::Draft),
            call(dec!(100), CashCallStatus::Draft),
            call(dec!(105), CashCallStatus::Draft),
            call(dec!(98), CashCallStatus::Draft),
            call(dec!(102), CashCallStatus::Draft),
        ];
        let summary = AnalyticsSummary::compute(&calls);
        assert_eq!(summary.anomaly_count, 0);
    }

    #[test]
    fn test_avg_approval_days() {
        let created = Utc::now();
        let mut a = call(dec!(100), CashCallStatus::Approved);
        a.created_at = created;
        a.approved_at = Some(created + Duration::days(2));
        let mut b = call(dec!(100), CashCallStatus::Paid);
        b.created_at = created;
        b.approved_at = Some(created + Duration::days(4));
        // No approved_at; must not contribute.
        let c = call(dec!(100), CashCallStatus::UnderReview);

        let summary = AnalyticsSummary::compute(&[a, b, c]);
        assert_eq!(summary.avg_approval_days, 3);
    }

    #[test]
    fn test_avg_approval_days_zero_without_approvals() {
        let calls = vec![call(dec!(100), CashCallStatus::UnderReview)];
        assert_eq!(AnalyticsSummary::compute(&calls).avg_approval_days, 0);
    }
}
