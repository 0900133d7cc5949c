use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::error::ApiError;
use crate::models::auth::AuthenticatedUser;
use crate::services::auth::AuthService;

/// The two Authorization schemes accepted anywhere in the API. Each carries
/// its own prefix; the parsing contract is otherwise identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    Bearer,
    ApiKey,
}

impl AuthScheme {
    fn prefix(self) -> &'static str {
        match self {
            AuthScheme::Bearer => "Bearer ",
            AuthScheme::ApiKey => "ApiKey ",
        }
    }
}

/// Pull the credential for `scheme` out of the Authorization header.
/// Absent header, wrong prefix and empty remainder are all `Unauthorized`.
pub fn extract_credential(headers: &HeaderMap, scheme: AuthScheme) -> Result<String, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;
    let credential = value
        .strip_prefix(scheme.prefix())
        .ok_or(ApiError::Unauthorized)?;
    if credential.is_empty() {
        return Err(ApiError::Unauthorized);
    }
    Ok(credential.to_string())
}

/// Extension type to carry the signing secret through request extensions.
#[derive(Clone)]
pub struct JwtSecret(pub String);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_credential(&parts.headers, AuthScheme::Bearer)?;

        let secret = parts
            .extensions
            .get::<JwtSecret>()
            .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("JWT secret not configured")))?;

        let user_id = AuthService::validate_access_token(&token, &secret.0)?;
        Ok(AuthenticatedUser { user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(v) = value {
            headers.insert(header::AUTHORIZATION, HeaderValue::from_str(v).unwrap());
        }
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        let headers = headers_with(Some("Bearer abc123"));
        assert_eq!(
            extract_credential(&headers, AuthScheme::Bearer).unwrap(),
            "abc123"
        );
    }

    #[test]
    fn api_key_is_extracted() {
        let headers = headers_with(Some("ApiKey s3cr3t"));
        assert_eq!(
            extract_credential(&headers, AuthScheme::ApiKey).unwrap(),
            "s3cr3t"
        );
    }

    #[test]
    fn missing_header_is_rejected() {
        let headers = headers_with(None);
        assert!(extract_credential(&headers, AuthScheme::Bearer).is_err());
    }

    #[test]
    fn wrong_prefix_is_rejected() {
        let headers = headers_with(Some("ApiKey abc123"));
        assert!(extract_credential(&headers, AuthScheme::Bearer).is_err());
        let headers = headers_with(Some("Bearer abc123"));
        assert!(extract_credential(&headers, AuthScheme::ApiKey).is_err());
    }

    #[test]
    fn empty_remainder_is_rejected() {
        let headers = headers_with(Some("Bearer "));
        assert!(extract_credential(&headers, AuthScheme::Bearer).is_err());
    }

    #[test]
    fn prefix_match_is_exact() {
        let headers = headers_with(Some("bearer abc123"));
        assert!(extract_credential(&headers, AuthScheme::Bearer).is_err());
    }
}
