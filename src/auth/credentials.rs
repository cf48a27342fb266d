//! Credential extraction
//!
//! Clients present the shared password as the password half of an HTTP
//! Basic `Authorization` header. The user name is ignored.

use axum::http::{HeaderMap, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Returns the Basic-auth password, or `None` when the header is absent or
/// malformed.
pub fn basic_auth_password(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (_user, password) = decoded.split_once(':')?;
    Some(password.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_password_and_ignores_user() {
        let encoded = STANDARD.encode("anyone:secret");
        let headers = headers_with(&format!("Basic {encoded}"));
        assert_eq!(basic_auth_password(&headers).as_deref(), Some("secret"));
    }

    #[test]
    fn keeps_colons_inside_the_password() {
        let encoded = STANDARD.encode("u:a:b");
        let headers = headers_with(&format!("basic {encoded}"));
        assert_eq!(basic_auth_password(&headers).as_deref(), Some("a:b"));
    }

    #[test]
    fn empty_password_is_still_a_credential() {
        let encoded = STANDARD.encode("user:");
        let headers = headers_with(&format!("Basic {encoded}"));
        assert_eq!(basic_auth_password(&headers).as_deref(), Some(""));
    }

    #[test]
    fn malformed_headers_yield_nothing() {
        assert_eq!(basic_auth_password(&HeaderMap::new()), None);
        assert_eq!(basic_auth_password(&headers_with("Bearer abc")), None);
        assert_eq!(basic_auth_password(&headers_with("Basic !!!")), None);
        let no_colon = STANDARD.encode("nocolon");
        assert_eq!(
            basic_auth_password(&headers_with(&format!("Basic {no_colon}"))),
            None
        );
    }
}
