use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_auth_types::token::Session;

use crate::domain::types::{Class, ClassChanges};
use crate::error::SchoolServiceError;
use crate::handlers::account::{DeletedResponse, SearchResponse};
use crate::handlers::{SearchQuery, json_body};
use crate::state::AppState;
use crate::usecase::auth::ensure_admin;
use crate::usecase::class::{
    AssignClassUseCase, CreateClassInput, CreateClassUseCase, DeleteClassUseCase,
    UpdateClassUseCase,
};
use crate::usecase::search::SearchClassesUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassResponse {
    pub class_name: String,
    pub teacher_name: String,
    pub year: i32,
    pub students_fees: i64,
    pub max_students: i32,
    pub current_students: i32,
    pub available_slots: i32,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Class> for ClassResponse {
    fn from(class: Class) -> Self {
        Self {
            available_slots: class.available_slots(),
            class_name: class.class_name,
            teacher_name: class.teacher_name,
            year: class.year,
            students_fees: class.students_fees,
            max_students: class.max_students,
            current_students: class.current_students,
            created_at: class.created_at,
            updated_at: class.updated_at,
        }
    }
}

// ── POST /api/admin/create-class ─────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub class_name: String,
    pub teacher_name: String,
    pub year: i32,
    pub students_fees: i64,
    pub max_students: Option<i32>,
}

pub async fn create_class(
    session: Session,
    State(state): State<AppState>,
    body: Result<Json<CreateClassRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ClassResponse>), SchoolServiceError> {
    ensure_admin(&session)?;
    let body = json_body(body)?;
    let usecase = CreateClassUseCase {
        classes: state.class_repo(),
    };
    let class = usecase
        .execute(CreateClassInput {
            class_name: body.class_name,
            teacher_name: body.teacher_name,
            year: body.year,
            students_fees: body.students_fees,
            max_students: body.max_students,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(class.into())))
}

// ── PUT /api/admin/update-class ──────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    pub class_name: String,
    pub teacher_name: Option<String>,
    pub year: Option<i32>,
    pub students_fees: Option<i64>,
    pub max_students: Option<i32>,
}

pub async fn update_class(
    session: Session,
    State(state): State<AppState>,
    body: Result<Json<UpdateClassRequest>, JsonRejection>,
) -> Result<Json<ClassResponse>, SchoolServiceError> {
    ensure_admin(&session)?;
    let body = json_body(body)?;
    let usecase = UpdateClassUseCase {
        classes: state.class_repo(),
    };
    let class = usecase
        .execute(
            &body.class_name,
            ClassChanges {
                teacher_name: body.teacher_name,
                year: body.year,
                students_fees: body.students_fees,
                max_students: body.max_students,
            },
        )
        .await?;
    Ok(Json(class.into()))
}

// ── DELETE /api/admin/delete-class/{class_name} ──────────────────────────────

pub async fn delete_class(
    session: Session,
    State(state): State<AppState>,
    Path(class_name): Path<String>,
) -> Result<Json<DeletedResponse>, SchoolServiceError> {
    ensure_admin(&session)?;
    let usecase = DeleteClassUseCase {
        classes: state.class_repo(),
    };
    let deleted = usecase.execute(&class_name).await?;
    Ok(Json(DeletedResponse { deleted }))
}

// ── GET /api/admin/search-class ──────────────────────────────────────────────

pub async fn search_classes(
    _session: Session,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse<ClassResponse>>, SchoolServiceError> {
    let page = query.page_request()?;
    let usecase = SearchClassesUseCase {
        classes: state.class_repo(),
    };
    let output = usecase.execute(query.filter, page).await?;
    Ok(Json(SearchResponse {
        items: output.items.into_iter().map(ClassResponse::from).collect(),
        page: output.page.page,
        limit: output.page.limit,
    }))
}

// ── PUT /api/admin/assign-class ──────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignClassRequest {
    pub teacher_user_name: String,
    pub class_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignClassResponse {
    pub teacher_user_name: String,
    pub class_name: String,
}

pub async fn assign_class(
    session: Session,
    State(state): State<AppState>,
    body: Result<Json<AssignClassRequest>, JsonRejection>,
) -> Result<Json<AssignClassResponse>, SchoolServiceError> {
    ensure_admin(&session)?;
    let body = json_body(body)?;
    let usecase = AssignClassUseCase {
        classes: state.class_repo(),
    };
    let class_name = usecase
        .execute(&body.teacher_user_name, &body.class_name)
        .await?;
    Ok(Json(AssignClassResponse {
        teacher_user_name: body.teacher_user_name.trim().to_owned(),
        class_name,
    }))
}
