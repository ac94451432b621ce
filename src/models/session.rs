use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Role of the acting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Office,
    Crew,
}

impl Role {
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "office" => Ok(Role::Office),
            "crew" => Ok(Role::Crew),
            other => Err(AppError::InvalidRole(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Office => "office",
            Role::Crew => "crew",
        }
    }
}

/// Who is acting. Passed explicitly into every core entry point that
/// writes or filters by user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub role: Role,
}

impl Session {
    pub fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn office(user_id: i64) -> Self {
        Self::new(user_id, Role::Office)
    }

    pub fn crew(user_id: i64) -> Self {
        Self::new(user_id, Role::Crew)
    }

    pub fn is_office(&self) -> bool {
        self.role == Role::Office
    }

    /// Fails with `Forbidden(operation)` unless the session has the office role.
    pub fn require_office(&self, operation: &'static str) -> AppResult<()> {
        if self.is_office() {
            Ok(())
        } else {
            Err(AppError::Forbidden(operation))
        }
    }
}
