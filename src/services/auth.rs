use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::error::ApiError;
use crate::models::auth::Claims;
use crate::models::user::{LoginResponse, RefreshResponse, User, UserResponse};

pub const TOKEN_ISSUER: &str = "wren";
pub const ACCESS_TOKEN_TTL: Duration = Duration::seconds(3600);
pub const REFRESH_TOKEN_TTL: Duration = Duration::days(60);
const BCRYPT_COST: u32 = 10;

pub struct AuthService;

impl AuthService {
    /// Salted one-way hash. Two calls on the same input yield different
    /// digests; only catastrophic entropy failure errors out.
    pub fn hash_password(password: &str) -> Result<String, ApiError> {
        Ok(bcrypt::hash(password, BCRYPT_COST)?)
    }

    /// Constant-time check. A bad hash and a wrong password are the same
    /// `false` — callers get no hint why verification failed.
    pub fn verify_password(hashed: &str, password: &str) -> bool {
        bcrypt::verify(password, hashed).unwrap_or(false)
    }

    pub fn make_access_token(
        user_id: Uuid,
        secret: &str,
        expires_in: Duration,
    ) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = Claims {
            iss: TOKEN_ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + expires_in).timestamp() as usize,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("token signing failed: {e}")))
    }

    /// Fails closed: bad signature, past expiry (no leeway) and a subject
    /// that is not a UUID all come back as the same `Unauthorized`.
    pub fn validate_access_token(token: &str, secret: &str) -> Result<Uuid, ApiError> {
        let key = DecodingKey::from_secret(secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let data = decode::<Claims>(token, &key, &validation).map_err(|_| ApiError::Unauthorized)?;
        data.claims.sub.parse().map_err(|_| ApiError::Unauthorized)
    }

    /// 256 bits from the OS CSPRNG, hex-encoded. No collision handling —
    /// the entropy makes collisions a non-event.
    pub fn make_refresh_token() -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Verify credentials and issue an identity token plus a persisted
    /// refresh token. An unknown email and a wrong password both map to the
    /// same `Unauthorized` so responses cannot be used for enumeration.
    pub async fn login(
        pool: &PgPool,
        email: &str,
        password: &str,
        jwt_secret: &str,
    ) -> Result<LoginResponse, ApiError> {
        let user = db::users::get_by_email(pool, email)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        if !Self::verify_password(&user.hashed_password, password) {
            return Err(ApiError::Unauthorized);
        }

        // Both tokens are minted before anything is written, so a signing
        // failure leaves no stray rows behind.
        let token = Self::make_access_token(user.id, jwt_secret, ACCESS_TOKEN_TTL)?;
        let refresh_token = Self::make_refresh_token();
        let record =
            db::refresh_tokens::insert(pool, &refresh_token, user.id, Utc::now() + REFRESH_TOKEN_TTL)
                .await?;

        tracing::info!(user_id = %user.id, "login succeeded");
        Ok(LoginResponse {
            user: UserResponse::from_user(&user, Utc::now()),
            token,
            refresh_token: record.token,
        })
    }

    /// Exchange a usable refresh token for a fresh identity token. The
    /// refresh token itself is not rotated.
    pub async fn refresh(
        pool: &PgPool,
        refresh_token: &str,
        jwt_secret: &str,
    ) -> Result<RefreshResponse, ApiError> {
        let record = db::refresh_tokens::get(pool, refresh_token)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        if !record.is_usable(Utc::now()) {
            return Err(ApiError::Unauthorized);
        }

        let token = Self::make_access_token(record.user_id, jwt_secret, ACCESS_TOKEN_TTL)?;
        Ok(RefreshResponse { token })
    }

    /// Mark a refresh token revoked. Unknown and already-revoked tokens are
    /// both `Unauthorized`; a revocation is never undone.
    pub async fn revoke(pool: &PgPool, refresh_token: &str) -> Result<(), ApiError> {
        if !db::refresh_tokens::revoke(pool, refresh_token).await? {
            return Err(ApiError::Unauthorized);
        }
        Ok(())
    }

    /// Replace a user's email and password. The new password is hashed
    /// before the update statement runs — a hashing failure mutates nothing.
    pub async fn update_credentials(
        pool: &PgPool,
        user_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<User, ApiError> {
        let hashed = Self::hash_password(password)?;
        db::users::update_credentials(pool, user_id, email, &hashed)
            .await?
            .ok_or(ApiError::NotFound("could not find user to update"))
    }
}

/// Ownership gate: the acting identity must match the resource's recorded
/// owner. Callers fetch the resource first so Forbidden stays
/// distinguishable from NotFound.
pub fn assert_owner(subject: Uuid, resource_owner: Uuid) -> Result<(), ApiError> {
    if subject == resource_owner {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn different_passwords_hash_to_different_digests() {
        let h1 = AuthService::hash_password("pass1").unwrap();
        let h2 = AuthService::hash_password("pass2").unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn same_password_hashes_differently_but_both_verify() {
        let h1 = AuthService::hash_password("supersecret").unwrap();
        let h2 = AuthService::hash_password("supersecret").unwrap();
        assert_ne!(h1, h2, "salt must vary per call");
        assert!(AuthService::verify_password(&h1, "supersecret"));
        assert!(AuthService::verify_password(&h2, "supersecret"));
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let h = AuthService::hash_password("supersecret").unwrap();
        assert!(!AuthService::verify_password(&h, "not-it"));
    }

    #[test]
    fn make_and_validate_access_token() {
        let user_id = Uuid::new_v4();
        let token =
            AuthService::make_access_token(user_id, "supersecretkey", Duration::minutes(5)).unwrap();
        let parsed = AuthService::validate_access_token(&token, "supersecretkey").unwrap();
        assert_eq!(parsed, user_id);
    }

    #[test]
    fn expired_access_token_is_rejected() {
        let token =
            AuthService::make_access_token(Uuid::new_v4(), "supersecretkey", Duration::minutes(-5))
                .unwrap();
        let err = AuthService::validate_access_token(&token, "supersecretkey").unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token =
            AuthService::make_access_token(Uuid::new_v4(), "secret-a", Duration::minutes(5)).unwrap();
        let err = AuthService::validate_access_token(&token, "secret-b").unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn non_uuid_subject_is_rejected() {
        let now = Utc::now();
        let claims = Claims {
            iss: TOKEN_ISSUER.to_string(),
            sub: "not-a-uuid".to_string(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::minutes(5)).timestamp() as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"supersecretkey"),
        )
        .unwrap();
        let err = AuthService::validate_access_token(&token, "supersecretkey").unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn refresh_tokens_are_unique_and_hex() {
        let t1 = AuthService::make_refresh_token();
        let t2 = AuthService::make_refresh_token();
        assert_ne!(t1, t2);
        assert_eq!(t1.len(), 64);
        assert!(t1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn owner_passes_gate_stranger_does_not() {
        let owner = Uuid::new_v4();
        assert!(assert_owner(owner, owner).is_ok());
        let err = assert_owner(Uuid::new_v4(), owner).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }
}
