// Read-only dashboard rollups over the job collection and the ledger.
//
// Pure functions of (jobs, records, optional date range). Amounts are grouped
// per currency and never cross-converted. "Outstanding" is the remaining
// balance of a Delivered job, counted only while it is positive.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::application::date_range::RangeBounds;
use crate::core::job::{Currency, Job, JobStatus};
use crate::core::payment_record::PaymentRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyStats {
    pub total_amount: f64,
    pub paid_amount: f64,
    pub pending_amount: f64,
    pub ongoing_amount: f64,
    pub outstanding_amount: f64,
    pub paid_count: u32,
    pub pending_count: u32,
    pub ongoing_count: u32,
    pub outstanding_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub by_currency: BTreeMap<Currency, CurrencyStats>,
    pub total_jobs: u32,
    pub delivered_count: u32,
    pub paid_count: u32,
    pub outstanding_count: u32,
}

/// Sum of record amounts keyed by job id, over the whole record collection.
pub fn paid_totals_by_job(records: &[PaymentRecord]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for record in records {
        *totals.entry(record.job_id.clone()).or_default() += record.amount;
    }
    totals
}

/// Roll up the dashboard summary. Jobs outside `range` (by creation time,
/// inclusive) are skipped; records of skipped or deleted jobs contribute
/// nothing beyond their paid totals entry, so orphans are harmless.
pub fn summarize(jobs: &[Job], records: &[PaymentRecord], range: Option<RangeBounds>) -> Summary {
    let totals = paid_totals_by_job(records);
    let mut summary = Summary::default();

    for job in jobs {
        if let Some(bounds) = range {
            if !bounds.contains(job.timestamp) {
                continue;
            }
        }
        summary.total_jobs += 1;
        let stats = summary.by_currency.entry(job.currency).or_default();
        stats.total_amount += job.amount;

        match job.status {
            JobStatus::Paid => {
                stats.paid_amount += job.amount;
                stats.paid_count += 1;
                summary.paid_count += 1;
            }
            JobStatus::Pending => {
                stats.pending_amount += job.amount;
                stats.pending_count += 1;
            }
            JobStatus::Ongoing => {
                stats.ongoing_amount += job.amount;
                stats.ongoing_count += 1;
            }
            JobStatus::Delivered => {
                let paid = totals.get(&job.id).copied().unwrap_or(0.0);
                let remaining = (job.amount - paid).max(0.0);
                stats.outstanding_amount += remaining;
                if remaining > 0.0 {
                    stats.outstanding_count += 1;
                    summary.outstanding_count += 1;
                }
            }
        }
        if job.is_delivered {
            summary.delivered_count += 1;
        }
    }
    summary
}

#[cfg(test)]
mod reports_tests {
    use super::*;
    use crate::test_support::fixtures::JobBuilder;
    use rstest::rstest;

    const T0: i64 = 1_700_000_000_000;

    fn record(job_id: &str, amount: f64) -> PaymentRecord {
        PaymentRecord {
            id: format!("rec-{job_id}-{amount}"),
            job_id: job_id.to_string(),
            amount,
            paid_at: T0,
            note: String::new(),
            user_id: None,
        }
    }

    #[rstest]
    fn it_should_group_amounts_per_currency() {
        let jobs = vec![
            JobBuilder::new().id("a").amount(1000.0).currency(Currency::BDT).build(),
            JobBuilder::new().id("b").amount(50.0).currency(Currency::USD).build(),
            JobBuilder::new()
                .id("c")
                .amount(200.0)
                .currency(Currency::BDT)
                .status(JobStatus::Ongoing)
                .build(),
        ];
        let summary = summarize(&jobs, &[], None);

        let bdt = &summary.by_currency[&Currency::BDT];
        assert_eq!(bdt.total_amount, 1200.0);
        assert_eq!(bdt.pending_amount, 1000.0);
        assert_eq!(bdt.ongoing_amount, 200.0);
        let usd = &summary.by_currency[&Currency::USD];
        assert_eq!(usd.total_amount, 50.0);
        assert_eq!(summary.total_jobs, 3);
    }

    #[rstest]
    fn it_should_count_outstanding_only_for_delivered_jobs_with_a_balance() {
        let jobs = vec![
            JobBuilder::new().id("a").amount(1000.0).status(JobStatus::Delivered).build(),
            JobBuilder::new().id("b").amount(500.0).status(JobStatus::Delivered).build(),
            JobBuilder::new().id("c").amount(700.0).status(JobStatus::Pending).build(),
        ];
        let records = vec![record("a", 400.0), record("b", 500.0)];
        let summary = summarize(&jobs, &records, None);

        let bdt = &summary.by_currency[&Currency::BDT];
        assert_eq!(bdt.outstanding_amount, 600.0);
        assert_eq!(bdt.outstanding_count, 1);
        assert_eq!(summary.outstanding_count, 1);
    }

    #[rstest]
    fn it_should_count_delivered_from_the_derived_flag() {
        let jobs = vec![
            JobBuilder::new().id("a").status(JobStatus::Delivered).build(),
            JobBuilder::new().id("b").status(JobStatus::Paid).build(),
            JobBuilder::new().id("c").status(JobStatus::Ongoing).build(),
        ];
        let summary = summarize(&jobs, &[], None);
        assert_eq!(summary.delivered_count, 2);
        assert_eq!(summary.paid_count, 1);
    }

    #[rstest]
    fn it_should_filter_jobs_by_creation_time() {
        let jobs = vec![
            JobBuilder::new().id("old").timestamp(T0 - 1).build(),
            JobBuilder::new().id("in").timestamp(T0).build(),
            JobBuilder::new().id("edge").timestamp(T0 + 100).build(),
        ];
        let bounds = RangeBounds { start_ms: T0, end_ms: T0 + 100 };
        let summary = summarize(&jobs, &[], Some(bounds));
        assert_eq!(summary.total_jobs, 2);
    }

    #[rstest]
    fn it_should_ignore_orphaned_records() {
        let jobs = vec![
            JobBuilder::new().id("a").amount(1000.0).status(JobStatus::Delivered).build(),
        ];
        let records = vec![record("a", 100.0), record("deleted-job", 999.0)];
        let summary = summarize(&jobs, &records, None);
        assert_eq!(summary.by_currency[&Currency::BDT].outstanding_amount, 900.0);
    }

    #[rstest]
    fn it_should_never_report_negative_outstanding() {
        // Ledger ahead of the job status: fully paid but still Delivered.
        let jobs = vec![
            JobBuilder::new().id("a").amount(500.0).status(JobStatus::Delivered).build(),
        ];
        let records = vec![record("a", 500.0)];
        let summary = summarize(&jobs, &records, None);
        let bdt = &summary.by_currency[&Currency::BDT];
        assert_eq!(bdt.outstanding_amount, 0.0);
        assert_eq!(bdt.outstanding_count, 0);
    }

    #[rstest]
    fn it_should_sum_paid_totals_per_job() {
        let records = vec![record("a", 100.0), record("a", 250.0), record("b", 40.0)];
        let totals = paid_totals_by_job(&records);
        assert_eq!(totals["a"], 350.0);
        assert_eq!(totals["b"], 40.0);
    }
}
