use serde::{Deserialize, Serialize};

/// An opaque bearer credential as presented by a caller.
///
/// The token is never interpreted locally; the identity subsystem resolves it
/// (or rejects it) on every request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parse an `Authorization` header value into a bearer token.
///
/// Accepts `Bearer <token>`. Returns `None` for a different scheme or an
/// empty token.
pub fn parse_bearer(header: &str) -> Option<BearerToken> {
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }

    Some(BearerToken(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_header() {
        let token = parse_bearer("Bearer abc123").expect("token");
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let token = parse_bearer("Bearer   abc123  ").expect("token");
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn rejects_other_schemes() {
        assert_eq!(parse_bearer("Basic abc123"), None);
        assert_eq!(parse_bearer("abc123"), None);
    }

    #[test]
    fn rejects_empty_token() {
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("Bearer    "), None);
    }
}
