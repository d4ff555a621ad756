use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use campus_auth_types::token::Session;
use campus_domain::role::Role;

use crate::domain::types::{Account, AccountDetails};
use crate::error::SchoolServiceError;
use crate::handlers::{SearchQuery, json_body};
use crate::state::AppState;
use crate::usecase::auth::{
    DeleteAccountUseCase, SessionOutput, SigninInput, SigninUseCase, SignupInput, SignupUseCase,
    UpdateAccountInput, UpdateAccountUseCase, ensure_can_manage,
};
use crate::usecase::search::SearchAccountsUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    /// Seconds since the UNIX epoch.
    pub expires_at: u64,
    pub role: Role,
    pub user_name: String,
}

impl From<SessionOutput> for SessionResponse {
    fn from(output: SessionOutput) -> Self {
        Self {
            token: output.token,
            expires_at: output.expires_at,
            role: output.role,
            user_name: output.user_name,
        }
    }
}

/// Public view of an account. Password hashes never leave the service.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub user_name: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub contact_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees_paid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        let role = account.role();
        let mut response = Self {
            user_name: account.profile.user_name,
            role,
            first_name: account.profile.first_name,
            last_name: account.profile.last_name,
            gender: account.profile.gender,
            contact_number: account.profile.contact_number,
            date_of_birth: None,
            salary: None,
            assigned_class: None,
            fees_paid: None,
            class_name: None,
            created_at: account.created_at,
            updated_at: account.updated_at,
        };
        match account.details {
            AccountDetails::Admin => {}
            AccountDetails::Teacher {
                date_of_birth,
                salary,
                assigned_class,
            } => {
                response.date_of_birth = Some(date_of_birth);
                response.salary = Some(salary);
                response.assigned_class = assigned_class;
            }
            AccountDetails::Student {
                date_of_birth,
                fees_paid,
                class_name,
                ..
            } => {
                response.date_of_birth = Some(date_of_birth);
                response.fees_paid = Some(fees_paid);
                response.class_name = Some(class_name);
            }
        }
        response
    }
}

#[derive(Serialize)]
pub struct SearchResponse<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
}

// ── POST /api/{namespace}/signup ─────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub user_name: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub contact_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub salary: Option<i64>,
    pub fees_paid: Option<i64>,
    pub class_name: Option<String>,
}

pub async fn signup(
    Extension(role): Extension<Role>,
    State(state): State<AppState>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SessionResponse>), SchoolServiceError> {
    let body = json_body(body)?;
    let usecase = SignupUseCase {
        accounts: state.account_repo(),
        enrollment: state.enrollment_repo(),
        jwt_secret: state.jwt_secret(),
    };
    let output = usecase
        .execute(
            role,
            SignupInput {
                user_name: body.user_name,
                password: body.password,
                first_name: body.first_name,
                last_name: body.last_name,
                gender: body.gender,
                contact_number: body.contact_number,
                date_of_birth: body.date_of_birth,
                salary: body.salary,
                fees_paid: body.fees_paid,
                class_name: body.class_name,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(output.into())))
}

// ── POST /api/{namespace}/signin ─────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    pub user_name: String,
    pub password: String,
}

pub async fn signin(
    Extension(role): Extension<Role>,
    State(state): State<AppState>,
    body: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, SchoolServiceError> {
    let body = json_body(body)?;
    let usecase = SigninUseCase {
        accounts: state.account_repo(),
        jwt_secret: state.jwt_secret(),
    };
    let output = usecase
        .execute(
            role,
            SigninInput {
                user_name: body.user_name,
                password: body.password,
            },
        )
        .await?;
    Ok(Json(output.into()))
}

// ── PUT /api/{namespace}/update-details ──────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDetailsRequest {
    /// Account to update; defaults to the caller.
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub contact_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub salary: Option<i64>,
    pub fees_paid: Option<i64>,
}

pub async fn update_details(
    session: Session,
    Extension(role): Extension<Role>,
    State(state): State<AppState>,
    body: Result<Json<UpdateDetailsRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, SchoolServiceError> {
    let body = json_body(body)?;
    let target = body
        .user_name
        .as_deref()
        .map(str::trim)
        .unwrap_or(&session.user_name)
        .to_owned();
    ensure_can_manage(&session, role, &target)?;

    let usecase = UpdateAccountUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase
        .execute(
            role,
            &target,
            UpdateAccountInput {
                password: body.password,
                first_name: body.first_name,
                last_name: body.last_name,
                gender: body.gender,
                contact_number: body.contact_number,
                date_of_birth: body.date_of_birth,
                salary: body.salary,
                fees_paid: body.fees_paid,
            },
        )
        .await?;
    Ok(Json(account.into()))
}

// ── GET /api/{namespace}/search-{role} ───────────────────────────────────────

pub async fn search_accounts(
    _session: Session,
    Extension(role): Extension<Role>,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse<AccountResponse>>, SchoolServiceError> {
    search(role, &state, query).await
}

/// `/api/admin/search-teacher` and `/api/admin/search-student` reuse the
/// account search with a fixed role.
pub async fn search_teachers(
    _session: Session,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse<AccountResponse>>, SchoolServiceError> {
    search(Role::Teacher, &state, query).await
}

pub async fn search_students(
    _session: Session,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse<AccountResponse>>, SchoolServiceError> {
    search(Role::Student, &state, query).await
}

async fn search(
    role: Role,
    state: &AppState,
    query: SearchQuery,
) -> Result<Json<SearchResponse<AccountResponse>>, SchoolServiceError> {
    let page = query.page_request()?;
    let usecase = SearchAccountsUseCase {
        accounts: state.account_repo(),
    };
    let output = usecase.execute(role, query.filter, page).await?;
    Ok(Json(SearchResponse {
        items: output.items.into_iter().map(AccountResponse::from).collect(),
        page: output.page.page,
        limit: output.page.limit,
    }))
}

// ── DELETE /api/{namespace}/delete-{role}/{user_name} ────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub deleted: String,
}

pub async fn delete_account(
    session: Session,
    Extension(role): Extension<Role>,
    State(state): State<AppState>,
    Path(user_name): Path<String>,
) -> Result<Json<DeletedResponse>, SchoolServiceError> {
    ensure_can_manage(&session, role, &user_name)?;
    let usecase = DeleteAccountUseCase {
        accounts: state.account_repo(),
    };
    usecase.execute(role, &user_name).await?;
    Ok(Json(DeletedResponse { deleted: user_name }))
}
