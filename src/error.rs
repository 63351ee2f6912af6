//! Errors raised while looking up a Pokémon.
//!
//! An unknown name (404) is kept apart from transport problems so the status
//! strip can tell the user which one happened.

use std::fmt;

#[derive(Debug)]
pub enum QueryError {
    /// The catalog answered 404 for this name.
    NotFound(String),

    /// Connection failure, or a non-success status other than 404.
    Network(String),

    /// The body was not the JSON shape we expect.
    Decode(String),

    /// Sprite bytes (or a bundled asset) could not be decoded.
    Image(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::NotFound(name) => write!(f, "no Pokémon named '{name}'"),
            QueryError::Network(msg) => write!(f, "network failure: {msg}"),
            QueryError::Decode(msg) => write!(f, "unexpected response: {msg}"),
            QueryError::Image(msg) => write!(f, "could not decode image: {msg}"),
        }
    }
}

impl std::error::Error for QueryError {}

impl QueryError {
    /// Short, user-facing summary for the status strip. The full `Display`
    /// text (transport detail, URLs) goes to the log instead.
    pub fn headline(&self) -> String {
        match self {
            QueryError::NotFound(name) => format!("no Pokémon named '{name}'"),
            QueryError::Network(_) => "network failure, could not reach the catalog".to_string(),
            QueryError::Decode(_) => "unexpected response from the catalog".to_string(),
            QueryError::Image(_) => "sprite image could not be decoded".to_string(),
        }
    }
}

impl From<reqwest::Error> for QueryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            QueryError::Decode(e.to_string())
        } else {
            QueryError::Network(e.to_string())
        }
    }
}

impl From<image::ImageError> for QueryError {
    fn from(e: image::ImageError) -> Self {
        QueryError::Image(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_term() {
        let e = QueryError::NotFound("missingno".into());
        assert_eq!(e.to_string(), "no Pokémon named 'missingno'");
    }

    #[test]
    fn display_prefixes_each_kind() {
        assert!(QueryError::Network("refused".into())
            .to_string()
            .starts_with("network failure"));
        assert!(QueryError::Decode("eof".into())
            .to_string()
            .starts_with("unexpected response"));
        assert!(QueryError::Image("bad png".into())
            .to_string()
            .starts_with("could not decode image"));
    }

    #[test]
    fn headline_drops_transport_detail() {
        let e = QueryError::Network(
            "error sending request for url (http://127.0.0.1:9/api/v2/pokemon/x)".into(),
        );
        assert!(!e.headline().contains("http://"));
        assert!(e.headline().starts_with("network failure"));
        // 44-cell strip, two rows
        for e in [
            QueryError::Network("x".repeat(200)),
            QueryError::Decode("x".repeat(200)),
            QueryError::Image("x".repeat(200)),
        ] {
            assert!(e.headline().chars().count() <= 44, "{}", e.headline());
        }
    }

    #[test]
    fn headline_keeps_the_unknown_name() {
        let e = QueryError::NotFound("missingno".into());
        assert_eq!(e.headline(), e.to_string());
    }
}
