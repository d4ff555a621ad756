//! Account role types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three kinds of account the school knows about.
///
/// Wire format: lowercase string (`"admin"`, `"teacher"`, `"student"`), used both in
/// JSON bodies and in the `role` claim of session tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }

    /// URL namespace the role's routes are mounted under.
    pub fn namespace(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teachers",
            Self::Student => "students",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
