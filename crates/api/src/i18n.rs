//! Locale negotiation for user-facing messages.

use axum::extract::FromRequestParts;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::convert::Infallible;

/// Languages with translated user-facing messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Pick the first supported language in an `Accept-Language` header,
    /// honouring `q` weights. Falls back to English.
    pub fn negotiate(headers: &HeaderMap) -> Self {
        let Some(raw) = headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()) else {
            return Self::default();
        };

        let mut ranges: Vec<(&str, f32)> = raw
            .split(',')
            .filter_map(|part| {
                let mut pieces = part.trim().split(';');
                let tag = pieces.next()?.trim();
                let q = pieces
                    .find_map(|p| p.trim().strip_prefix("q="))
                    .and_then(|q| q.parse().ok())
                    .unwrap_or(1.0);
                (!tag.is_empty()).then_some((tag, q))
            })
            .collect();
        // Stable sort keeps header order among equal weights.
        ranges.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranges
            .into_iter()
            .filter(|(_, q)| *q > 0.0)
            .find_map(|(tag, _)| Self::from_tag(tag))
            .unwrap_or_default()
    }

    fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split('-').next()?.to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// Message shown when an AI flow fails for any reason.
    pub fn ai_unavailable(self) -> &'static str {
        match self {
            Self::En => "We couldn't generate a response right now. Please try again in a moment.",
            Self::Es => {
                "No pudimos generar una respuesta en este momento. Inténtalo de nuevo en unos instantes."
            }
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Locale {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::negotiate(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, value.parse().unwrap());
        headers
    }

    #[test]
    fn missing_header_is_english() {
        assert_eq!(Locale::negotiate(&HeaderMap::new()), Locale::En);
    }

    #[test]
    fn regional_spanish() {
        assert_eq!(Locale::negotiate(&with("es-MX,es;q=0.9")), Locale::Es);
    }

    #[test]
    fn weights_are_honoured() {
        assert_eq!(Locale::negotiate(&with("en;q=0.4, es;q=0.8")), Locale::Es);
        assert_eq!(Locale::negotiate(&with("fr, en;q=0.5, es;q=0.3")), Locale::En);
    }

    #[test]
    fn unsupported_only_falls_back() {
        assert_eq!(Locale::negotiate(&with("de-DE, fr")), Locale::En);
    }
}
