//! Read-only analytics over the grievance collection.
//!
//! Everything here recomputes from a full scan on demand. Expected volumes
//! are modest, so correctness wins over recompute cost: no incremental
//! counters, no cached state, and results reflect a best-effort snapshot
//! under concurrent writes.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use redress_core::AppResult;
use redress_domain::{Actor, Capability, Grievance, Role};

use crate::grievance_ports::GrievanceRepository;
use crate::grievance_service;

/// Dashboard counters, evaluated against the wall clock at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// All grievances in scope.
    pub total: u64,
    /// Grievances not yet resolved or closed.
    pub pending: u64,
    /// Grievances resolved or closed.
    pub resolved: u64,
    /// Pending grievances past their SLA deadline.
    pub overdue: u64,
}

/// Per-month submission and resolution counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTrend {
    /// Short month label, e.g. `Mar 2026`.
    pub label: String,
    /// Grievances created in the month.
    pub submitted: u64,
    /// Grievances resolved in the month.
    pub resolved: u64,
}

/// Full analytics roll-up for the administrator dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    /// Total grievances ever submitted.
    pub total_grievances: u64,
    /// Mean hours from submission to resolution; 0 when nothing resolved.
    pub avg_resolution_time_hours: f64,
    /// Share of SLA-covered resolutions that met the deadline, rounded to
    /// the nearest whole percent; 0 when nothing qualifies.
    pub sla_compliance_percent: u32,
    /// Frequency counts by category; absent categories are omitted.
    pub category_breakdown: BTreeMap<String, u64>,
    /// Frequency counts by priority; absent priorities are omitted.
    pub priority_distribution: BTreeMap<String, u64>,
    /// Frequency counts by status; absent statuses are omitted.
    pub status_distribution: BTreeMap<String, u64>,
    /// Trailing six calendar months, current month inclusive, oldest first.
    pub monthly_trends: Vec<MonthlyTrend>,
}

/// Application service for dashboard counters and the analytics report.
#[derive(Clone)]
pub struct AnalyticsService {
    grievances: Arc<dyn GrievanceRepository>,
}

impl AnalyticsService {
    /// Creates the analytics service from the grievance repository.
    #[must_use]
    pub fn new(grievances: Arc<dyn GrievanceRepository>) -> Self {
        Self { grievances }
    }

    /// Returns dashboard counters scoped to the caller.
    ///
    /// Students see their own submissions; every other role sees the whole
    /// collection. Overdue is evaluated against the current wall clock, so
    /// the result is not stable across calls.
    pub async fn dashboard_stats(&self, actor: &Actor) -> AppResult<DashboardStats> {
        let grievances = if actor.role() == Role::Student {
            self.grievances.list_by_owner(actor.user_id()).await?
        } else {
            self.grievances.list_all().await?
        };

        Ok(compute_dashboard(&grievances, Utc::now()))
    }

    /// Returns the full analytics report. Administrator capability.
    pub async fn analytics(&self, actor: &Actor) -> AppResult<AnalyticsReport> {
        grievance_service::require(actor, Capability::ViewAnalytics)?;

        let grievances = self.grievances.list_all().await?;
        Ok(compute_report(&grievances, Utc::now()))
    }
}

fn compute_dashboard(grievances: &[Grievance], now: DateTime<Utc>) -> DashboardStats {
    let total = grievances.len() as u64;
    let pending = grievances.iter().filter(|g| g.is_pending()).count() as u64;
    let overdue = grievances.iter().filter(|g| g.is_overdue(now)).count() as u64;

    DashboardStats {
        total,
        pending,
        resolved: total - pending,
        overdue,
    }
}

fn compute_report(grievances: &[Grievance], now: DateTime<Utc>) -> AnalyticsReport {
    let mut category_breakdown = BTreeMap::new();
    let mut priority_distribution = BTreeMap::new();
    let mut status_distribution = BTreeMap::new();

    for grievance in grievances {
        *category_breakdown
            .entry(grievance.category().as_str().to_owned())
            .or_insert(0) += 1;
        *priority_distribution
            .entry(grievance.priority().as_str().to_owned())
            .or_insert(0) += 1;
        *status_distribution
            .entry(grievance.status().as_str().to_owned())
            .or_insert(0) += 1;
    }

    let resolution_hours: Vec<f64> = grievances
        .iter()
        .filter_map(|g| g.resolved_at().map(|resolved| resolved - g.created_at()))
        .map(|elapsed| elapsed.num_seconds() as f64 / 3600.0)
        .collect();
    let avg_resolution_time_hours = if resolution_hours.is_empty() {
        0.0
    } else {
        resolution_hours.iter().sum::<f64>() / resolution_hours.len() as f64
    };

    let sla_covered: Vec<(DateTime<Utc>, DateTime<Utc>)> = grievances
        .iter()
        .filter_map(|g| match (g.resolved_at(), g.sla_deadline()) {
            (Some(resolved), Some(deadline)) => Some((resolved, deadline)),
            _ => None,
        })
        .collect();
    let sla_compliance_percent = if sla_covered.is_empty() {
        0
    } else {
        let compliant = sla_covered
            .iter()
            .filter(|(resolved, deadline)| resolved <= deadline)
            .count();
        ((compliant as f64 / sla_covered.len() as f64) * 100.0).round() as u32
    };

    AnalyticsReport {
        total_grievances: grievances.len() as u64,
        avg_resolution_time_hours,
        sla_compliance_percent,
        category_breakdown,
        priority_distribution,
        status_distribution,
        monthly_trends: compute_monthly_trends(grievances, now),
    }
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Months counted from year zero, for calendar-month arithmetic.
fn month_index(timestamp: DateTime<Utc>) -> i64 {
    i64::from(timestamp.year()) * 12 + i64::from(timestamp.month0())
}

fn compute_monthly_trends(grievances: &[Grievance], now: DateTime<Utc>) -> Vec<MonthlyTrend> {
    let current = month_index(now);

    (0..6)
        .rev()
        .map(|months_back| {
            let index = current - months_back;
            let year = index.div_euclid(12);
            let month0 = index.rem_euclid(12) as usize;

            let submitted = grievances
                .iter()
                .filter(|g| month_index(g.created_at()) == index)
                .count() as u64;
            let resolved = grievances
                .iter()
                .filter(|g| g.resolved_at().is_some_and(|at| month_index(at) == index))
                .count() as u64;

            MonthlyTrend {
                label: format!("{} {year}", MONTH_LABELS[month0]),
                submitted,
                resolved,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use redress_domain::{Category, Grievance, Status, TrackingId, UserId};

    use super::{compute_dashboard, compute_monthly_trends, compute_report};

    fn at(year: i32, month: u32, day: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 10, 0, 0)
            .single()
            .unwrap_or_else(|| unreachable!())
    }

    fn submitted(category: Category, created_at: chrono::DateTime<Utc>) -> Grievance {
        Grievance::submit(
            TrackingId::generate().unwrap_or_else(|_| unreachable!()),
            Some(UserId::new()),
            false,
            false,
            category,
            "title",
            "description",
            created_at,
        )
        .unwrap_or_else(|_| unreachable!())
    }

    fn resolved_after(
        category: Category,
        created_at: chrono::DateTime<Utc>,
        hours: i64,
    ) -> Grievance {
        let mut grievance = submitted(category, created_at);
        grievance.apply_status(Status::Resolved, created_at + Duration::hours(hours));
        grievance
    }

    #[test]
    fn empty_collection_yields_all_zero_stats() {
        let stats = compute_dashboard(&[], at(2026, 8, 1));
        assert_eq!(stats.total, 0);
        assert_eq!(stats.pending, 0);
        assert_eq!(stats.resolved, 0);
        assert_eq!(stats.overdue, 0);
    }

    #[test]
    fn overdue_counts_pending_past_deadline_only() {
        let t0 = at(2026, 8, 1);
        let mut in_progress = submitted(Category::Urgent, t0);
        in_progress.apply_status(Status::InProgress, t0);

        let resolved_late = resolved_after(Category::Urgent, t0, 300);
        let fresh = submitted(Category::Administrative, t0);

        let now = t0 + Duration::hours(48);
        let stats = compute_dashboard(&[in_progress, resolved_late, fresh], now);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.resolved, 1);
        // The in-progress urgent one blew its 24h deadline; the resolved
        // one no longer counts, and the administrative one has 120h.
        assert_eq!(stats.overdue, 1);
    }

    #[test]
    fn average_resolution_of_10h_and_20h_is_15() {
        let t0 = at(2026, 6, 5);
        let grievances = vec![
            resolved_after(Category::Academic, t0, 10),
            resolved_after(Category::Academic, t0, 20),
            submitted(Category::Infrastructure, t0),
        ];

        let report = compute_report(&grievances, t0 + Duration::days(1));
        assert_eq!(report.total_grievances, 3);
        assert!((report.avg_resolution_time_hours - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn compliance_is_the_rounded_share_of_on_time_resolutions() {
        let t0 = at(2026, 6, 5);
        let grievances = vec![
            // Urgent resolves in 10h against a 24h deadline: compliant.
            resolved_after(Category::Urgent, t0, 10),
            // Urgent resolves in 30h against a 24h deadline: late.
            resolved_after(Category::Urgent, t0, 30),
            resolved_after(Category::Urgent, t0, 12),
        ];

        let report = compute_report(&grievances, t0 + Duration::days(3));
        assert_eq!(report.sla_compliance_percent, 67);
    }

    #[test]
    fn compliance_is_zero_when_nothing_qualifies() {
        let t0 = at(2026, 6, 5);
        let report = compute_report(&[submitted(Category::Academic, t0)], t0);
        assert_eq!(report.sla_compliance_percent, 0);
        assert!(report.avg_resolution_time_hours.abs() < f64::EPSILON);
    }

    #[test]
    fn breakdowns_omit_absent_keys() {
        let t0 = at(2026, 6, 5);
        let report = compute_report(&[submitted(Category::Academic, t0)], t0);

        assert_eq!(report.category_breakdown.get("academic"), Some(&1));
        assert_eq!(report.category_breakdown.get("urgent"), None);
        assert_eq!(report.priority_distribution.get("high"), Some(&1));
        assert_eq!(report.status_distribution.get("submitted"), Some(&1));
        assert_eq!(report.status_distribution.get("resolved"), None);
    }

    #[test]
    fn trends_cover_six_months_oldest_first_across_a_year_boundary() {
        let now = at(2026, 2, 10);
        let grievances = vec![
            submitted(Category::Academic, at(2025, 9, 3)),
            submitted(Category::Academic, at(2026, 2, 1)),
            resolved_after(Category::Urgent, at(2025, 12, 20), 8),
            // Outside the trailing window entirely.
            submitted(Category::Infrastructure, at(2025, 1, 1)),
        ];

        let trends = compute_monthly_trends(&grievances, now);
        let labels: Vec<&str> = trends.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Sep 2025", "Oct 2025", "Nov 2025", "Dec 2025", "Jan 2026", "Feb 2026"
            ]
        );

        assert_eq!(trends[0].submitted, 1);
        assert_eq!(trends[3].submitted, 1);
        assert_eq!(trends[3].resolved, 1);
        assert_eq!(trends[5].submitted, 1);
        let total_submitted: u64 = trends.iter().map(|t| t.submitted).sum();
        assert_eq!(total_submitted, 3);
    }
}
