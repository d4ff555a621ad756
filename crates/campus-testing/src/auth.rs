//! Mock session helpers for integration tests.
//!
//! `MockSession` signs a real session token with [`TEST_JWT_SECRET`], so tests
//! exercise the same bearer extractor production requests go through.

use campus_auth_types::token::issue_session_token;
use campus_domain::role::Role;

/// Secret shared by test routers and `MockSession`.
pub const TEST_JWT_SECRET: &str = "campus-test-jwt-secret";

/// Configurable identity attached to test requests.
pub struct MockSession {
    pub user_name: String,
    pub role: Role,
}

impl MockSession {
    pub fn new(user_name: impl Into<String>, role: Role) -> Self {
        Self {
            user_name: user_name.into(),
            role,
        }
    }

    pub fn admin() -> Self {
        Self::new("principal@school.test", Role::Admin)
    }

    /// Signed bearer token for this identity.
    pub fn token(&self) -> String {
        issue_session_token(&self.user_name, self.role, TEST_JWT_SECRET)
            .unwrap()
            .token
    }
}
