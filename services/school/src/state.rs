use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use campus_auth_types::bearer::SessionSecret;

use crate::infra::db::{
    DbAccountRepository, DbClassRepository, DbEnrollmentRepository, DbReportRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub session_secret: SessionSecret,
}

impl FromRef<AppState> for SessionSecret {
    fn from_ref(state: &AppState) -> Self {
        state.session_secret.clone()
    }
}

impl AppState {
    pub fn jwt_secret(&self) -> String {
        self.session_secret.as_str().to_owned()
    }

    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn enrollment_repo(&self) -> DbEnrollmentRepository {
        DbEnrollmentRepository {
            db: self.db.clone(),
        }
    }

    pub fn class_repo(&self) -> DbClassRepository {
        DbClassRepository {
            db: self.db.clone(),
        }
    }

    pub fn report_repo(&self) -> DbReportRepository {
        DbReportRepository {
            db: self.db.clone(),
        }
    }
}
