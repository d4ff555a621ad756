use crate::domain::repository::ReportRepository;
use crate::domain::types::{ClassRoster, FinancialSummary, GenderCount};
use crate::error::SchoolServiceError;

// ── ClassAnalytics ───────────────────────────────────────────────────────────

pub struct ClassAnalyticsUseCase<R: ReportRepository> {
    pub reports: R,
}

impl<R: ReportRepository> ClassAnalyticsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<ClassRoster>, SchoolServiceError> {
        self.reports.class_rosters().await
    }
}

// ── GenderCount ──────────────────────────────────────────────────────────────

pub struct GenderCountUseCase<R: ReportRepository> {
    pub reports: R,
}

impl<R: ReportRepository> GenderCountUseCase<R> {
    pub async fn execute(&self) -> Result<GenderCount, SchoolServiceError> {
        let genders = self.reports.student_genders().await?;
        let mut count = GenderCount::default();
        for gender in &genders {
            count.record(gender);
        }
        Ok(count)
    }
}

// ── FinancialSummary ─────────────────────────────────────────────────────────

pub struct FinancialSummaryUseCase<R: ReportRepository> {
    pub reports: R,
}

impl<R: ReportRepository> FinancialSummaryUseCase<R> {
    pub async fn execute(&self) -> Result<FinancialSummary, SchoolServiceError> {
        let fees = self.reports.student_fees().await?;
        let salaries = self.reports.teacher_salaries().await?;
        Ok(FinancialSummary {
            total_fees_paid: fees.iter().fold(0i64, |acc, f| acc.saturating_add(*f)),
            total_salaries: salaries.iter().fold(0i64, |acc, s| acc.saturating_add(*s)),
            student_count: fees.len() as u64,
            teacher_count: salaries.len() as u64,
        })
    }
}
