use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A stored account. The password is only ever held as a bcrypt hash.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    /// Free-form role chosen during onboarding, e.g. "Admin" or "User".
    pub role: Option<String>,
    pub industry: Option<String>,
    pub onboarding_complete: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to create a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial update of a user. An outer `None` leaves the stored value
/// untouched; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub role: Option<Option<String>>,
    pub industry: Option<Option<String>>,
    pub onboarding_complete: Option<bool>,
}

impl User {
    /// Builds a fresh record for `new`, not yet onboarded.
    pub fn new(new: NewUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            role: None,
            industry: None,
            onboarding_complete: false,
            created_at: Utc::now(),
        }
    }

    /// Applies the fields present in `update`.
    pub fn apply(&mut self, update: UserUpdate) {
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(industry) = update.industry {
            self.industry = industry;
        }
        if let Some(done) = update.onboarding_complete {
            self.onboarding_complete = done;
        }
    }
}

/// Public view of a user returned by `GET /api/auth/profile`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
    pub industry: Option<String>,
    pub onboarding_complete: bool,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            industry: user.industry,
            onboarding_complete: user.onboarding_complete,
        }
    }
}

/// Payload of `POST /api/users/onboarding`.
///
/// Both answers are stored exactly as sent; `null` or a missing key clears
/// an earlier answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OnboardingRequest {
    #[validate(length(max = 50))]
    pub role: Option<String>,
    #[validate(length(max = 100))]
    pub industry: Option<String>,
}

impl From<OnboardingRequest> for UserUpdate {
    fn from(request: OnboardingRequest) -> Self {
        Self {
            role: Some(request.role),
            industry: Some(request.industry),
            onboarding_complete: Some(true),
        }
    }
}

/// `{success, message}` acknowledgement used by mutating endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Acknowledgement {
    pub success: bool,
    pub message: String,
}

impl Acknowledgement {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
