use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// DB row struct. The password hash never leaves the process.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub hashed_password: String,
    pub premium_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_premium(&self, now: DateTime<Utc>) -> bool {
        self.premium_expires_at.map_or(false, |until| now < until)
    }
}

/// Opaque long-lived token row. Usability is decided here, not in SQL, so
/// the rule stays in one place.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// A refresh token mints new identity tokens iff it is unrevoked and
    /// unexpired. Both `revoked` and `expired` are terminal.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && now < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_premium: bool,
}

impl UserResponse {
    pub fn from_user(user: &User, now: DateTime<Utc>) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
            is_premium: user.is_premium(now),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(expires_in: Duration, revoked: bool) -> RefreshToken {
        let now = Utc::now();
        RefreshToken {
            token: "deadbeef".into(),
            user_id: Uuid::new_v4(),
            created_at: now,
            expires_at: now + expires_in,
            revoked_at: revoked.then_some(now),
        }
    }

    #[test]
    fn active_token_is_usable() {
        assert!(record(Duration::days(60), false).is_usable(Utc::now()));
    }

    #[test]
    fn revoked_token_is_unusable_even_if_unexpired() {
        assert!(!record(Duration::days(60), true).is_usable(Utc::now()));
    }

    #[test]
    fn expired_token_is_unusable_even_if_unrevoked() {
        assert!(!record(Duration::days(-1), false).is_usable(Utc::now()));
    }

    #[test]
    fn premium_flag_tracks_expiry() {
        let now = Utc::now();
        let mut user = User {
            id: Uuid::new_v4(),
            email: "a@b.c".into(),
            hashed_password: String::new(),
            premium_expires_at: None,
            created_at: now,
            updated_at: now,
        };
        assert!(!user.is_premium(now));
        user.premium_expires_at = Some(now + Duration::days(30));
        assert!(user.is_premium(now));
        user.premium_expires_at = Some(now - Duration::days(1));
        assert!(!user.is_premium(now));
    }
}
