use base64::Engine as _;
use chrono::{DateTime, Utc};

use crate::error::AuthError;

/// Tokens expiring within this window are treated as expired.
pub const EXPIRY_BUFFER_SECS: i64 = 60;

/// Decode JWT `exp` claim without signature validation.
///
/// Only used for local expiry checks; the auth API stays the authority on
/// whether a token is valid.
///
/// # Errors
///
/// Returns `AuthError::Other` if the JWT format is invalid or the `exp` claim
/// is missing or cannot be parsed.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::Other("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::Other(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::Other(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::Other("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0).ok_or_else(|| AuthError::Other("invalid exp timestamp".into()))
}

/// True when `jwt` carries an `exp` that is past or inside the buffer.
///
/// Tokens whose expiry cannot be decoded are not considered stale here.
#[must_use]
pub fn is_stale(jwt: &str) -> bool {
    decode_expiry(jwt).is_ok_and(|exp| {
        exp <= Utc::now() + chrono::TimeDelta::seconds(EXPIRY_BUFFER_SECS)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_jwt_with_exp(exp: i64) -> String {
        let header = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#);
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(format!(r#"{{"sub":"user-1","exp":{exp}}}"#));
        let signature = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode("fake_sig");
        format!("{header}.{payload}.{signature}")
    }

    #[test]
    fn decode_expiry_valid_jwt() {
        let future_exp = Utc::now().timestamp() + 3600;
        let dt = decode_expiry(&make_jwt_with_exp(future_exp)).unwrap();
        assert_eq!(dt.timestamp(), future_exp);
    }

    #[test]
    fn decode_expiry_invalid_format() {
        let err = decode_expiry("not-a-jwt").unwrap_err();
        assert!(err.to_string().contains("invalid JWT format"));
    }

    #[test]
    fn decode_expiry_bad_base64() {
        let err = decode_expiry("header.!!!invalid!!!.signature").unwrap_err();
        assert!(err.to_string().contains("base64 decode failed"));
    }

    #[test]
    fn stale_inside_buffer() {
        let soon = Utc::now().timestamp() + EXPIRY_BUFFER_SECS / 2;
        assert!(is_stale(&make_jwt_with_exp(soon)));
        let later = Utc::now().timestamp() + 3600;
        assert!(!is_stale(&make_jwt_with_exp(later)));
    }

    #[test]
    fn opaque_tokens_are_not_stale() {
        assert!(!is_stale("opaque-token"));
    }
}
