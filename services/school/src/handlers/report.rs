use axum::{Json, extract::State};
use serde::Serialize;

use campus_auth_types::token::Session;

use crate::domain::types::{ClassRoster, FinancialSummary, GenderCount};
use crate::error::SchoolServiceError;
use crate::state::AppState;
use crate::usecase::auth::ensure_admin;
use crate::usecase::report::{
    ClassAnalyticsUseCase, FinancialSummaryUseCase, GenderCountUseCase,
};

// ── GET /api/admin/class-analytics ───────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassAnalyticsResponse {
    pub class_name: String,
    pub teacher_name: String,
    pub year: i32,
    pub max_students: i32,
    pub current_students: i32,
    pub available_slots: i32,
    /// Enrolled user names, oldest enrollment first.
    pub students: Vec<String>,
}

impl From<ClassRoster> for ClassAnalyticsResponse {
    fn from(roster: ClassRoster) -> Self {
        Self {
            available_slots: roster.class.available_slots(),
            class_name: roster.class.class_name,
            teacher_name: roster.class.teacher_name,
            year: roster.class.year,
            max_students: roster.class.max_students,
            current_students: roster.class.current_students,
            students: roster.students,
        }
    }
}

pub async fn class_analytics(
    session: Session,
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassAnalyticsResponse>>, SchoolServiceError> {
    ensure_admin(&session)?;
    let usecase = ClassAnalyticsUseCase {
        reports: state.report_repo(),
    };
    let rosters = usecase.execute().await?;
    Ok(Json(
        rosters
            .into_iter()
            .map(ClassAnalyticsResponse::from)
            .collect(),
    ))
}

// ── GET /api/admin/gender-count ──────────────────────────────────────────────

#[derive(Serialize)]
pub struct GenderCountResponse {
    pub male: u64,
    pub female: u64,
    pub other: u64,
}

impl From<GenderCount> for GenderCountResponse {
    fn from(count: GenderCount) -> Self {
        Self {
            male: count.male,
            female: count.female,
            other: count.other,
        }
    }
}

pub async fn gender_count(
    session: Session,
    State(state): State<AppState>,
) -> Result<Json<GenderCountResponse>, SchoolServiceError> {
    ensure_admin(&session)?;
    let usecase = GenderCountUseCase {
        reports: state.report_repo(),
    };
    Ok(Json(usecase.execute().await?.into()))
}

// ── GET /api/admin/financial-data ────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDataResponse {
    pub total_fees_paid: i64,
    pub total_salaries: i64,
    pub student_count: u64,
    pub teacher_count: u64,
}

impl From<FinancialSummary> for FinancialDataResponse {
    fn from(summary: FinancialSummary) -> Self {
        Self {
            total_fees_paid: summary.total_fees_paid,
            total_salaries: summary.total_salaries,
            student_count: summary.student_count,
            teacher_count: summary.teacher_count,
        }
    }
}

pub async fn financial_data(
    session: Session,
    State(state): State<AppState>,
) -> Result<Json<FinancialDataResponse>, SchoolServiceError> {
    ensure_admin(&session)?;
    let usecase = FinancialSummaryUseCase {
        reports: state.report_repo(),
    };
    Ok(Json(usecase.execute().await?.into()))
}
