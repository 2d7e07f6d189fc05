//! Composed requests, ready to be posted.
//!
//! Composition resolves the endpoint, validates caller preconditions and
//! merges the parameter layers. It performs no I/O, so every caller
//! misuse is reported before the transport is touched.

use crate::endpoint::{Operation, SentimentType, SourceKind};
use crate::error::{AlchemyError, Result};
use crate::params::{CommonParameters, ContentSource, FormMap, FormParams, UrlFallback, compose_form};
use std::fmt;

/// A fully composed AlchemyLanguage call.
#[derive(Clone, PartialEq, Eq)]
pub struct AlchemyRequest {
    /// The operation being called.
    pub operation: Operation,
    /// Kind of content the call carries.
    pub kind: SourceKind,
    /// Call path below the service base URL.
    pub path: String,
    /// URL-encoded form body.
    pub form: FormMap,
    source_preview: String,
}

impl AlchemyRequest {
    /// Compose a request for `operation` against `source`.
    pub fn compose<P: FormParams + ?Sized>(
        operation: Operation,
        common: &CommonParameters,
        params: &P,
        source: &ContentSource,
        fallback: &UrlFallback,
    ) -> Result<Self> {
        let kind = source.kind();
        let path = operation.path(kind)?;
        let form = compose_form(common, params, Some(source), fallback);

        if operation == Operation::Sentiment(SentimentType::Targeted)
            && form.get("targets").is_none_or(String::is_empty)
        {
            return Err(AlchemyError::MissingTargets);
        }

        Ok(Self {
            operation,
            kind,
            path,
            form,
            source_preview: source.display_value(),
        })
    }

    /// Full URL of the call below `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }

    /// Truncated content for log lines.
    pub fn display_source(&self) -> &str {
        &self.source_preview
    }
}

impl fmt::Debug for AlchemyRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form: Vec<(&str, &str)> = self
            .form
            .iter()
            .map(|(k, v)| {
                let shown = match k.as_str() {
                    "apikey" => "<redacted>",
                    "html" | "text" => "<content>",
                    _ => v.as_str(),
                };
                (k.as_str(), shown)
            })
            .collect();

        f.debug_struct("AlchemyRequest")
            .field("operation", &self.operation)
            .field("kind", &self.kind)
            .field("path", &self.path)
            .field("form", &form)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::TextType;
    use crate::params::{LanguageParams, SentimentParams, TextParams};

    fn common() -> CommonParameters {
        CommonParameters::new("key")
    }

    #[test]
    fn test_compose_language() {
        let request = AlchemyRequest::compose(
            Operation::Language,
            &common(),
            &LanguageParams::default(),
            &ContentSource::text("Bonjour le monde"),
            &UrlFallback::None,
        )
        .unwrap();

        assert_eq!(request.path, "/text/TextGetLanguage");
        assert_eq!(request.kind, SourceKind::Text);
        assert_eq!(request.form["text"], "Bonjour le monde");
        assert_eq!(
            request.url("https://gateway-a.watsonplatform.net/calls/"),
            "https://gateway-a.watsonplatform.net/calls/text/TextGetLanguage"
        );
    }

    #[test]
    fn test_targeted_sentiment_requires_targets() {
        let source = ContentSource::text("I love Paris");
        let targeted = Operation::Sentiment(SentimentType::Targeted);

        let err = AlchemyRequest::compose(
            targeted,
            &common(),
            &SentimentParams::default(),
            &source,
            &UrlFallback::None,
        )
        .unwrap_err();
        assert!(matches!(err, AlchemyError::MissingTargets));

        let err = AlchemyRequest::compose(
            targeted,
            &common(),
            &SentimentParams::targeted(""),
            &source,
            &UrlFallback::None,
        )
        .unwrap_err();
        assert!(err.is_caller_misuse());

        let request = AlchemyRequest::compose(
            targeted,
            &common(),
            &SentimentParams::targeted("Paris"),
            &source,
            &UrlFallback::None,
        )
        .unwrap();
        assert_eq!(request.form["targets"], "Paris");
        assert_eq!(request.path, "/text/TextGetTargetedSentiment");
    }

    #[test]
    fn test_normal_sentiment_ignores_missing_targets() {
        let request = AlchemyRequest::compose(
            Operation::Sentiment(SentimentType::Normal),
            &common(),
            &SentimentParams::default(),
            &ContentSource::url("http://example.com"),
            &UrlFallback::None,
        )
        .unwrap();

        assert!(!request.form.contains_key("targets"));
    }

    #[test]
    fn test_unsupported_source_is_rejected() {
        let err = AlchemyRequest::compose(
            Operation::Text(TextType::Raw),
            &common(),
            &TextParams::default(),
            &ContentSource::text("plain"),
            &UrlFallback::None,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            AlchemyError::UnsupportedSource {
                operation: "raw_text",
                kind: SourceKind::Text
            }
        ));
    }

    #[test]
    fn test_detection_placeholder_with_html() {
        let request = AlchemyRequest::compose(
            Operation::Feeds,
            &common(),
            &(),
            &ContentSource::html("<html></html>"),
            &UrlFallback::Placeholder("test".to_string()),
        )
        .unwrap();

        assert_eq!(request.form["html"], "<html></html>");
        assert_eq!(request.form["url"], "test");
        assert_eq!(request.path, "/html/HTMLGetFeedLinks");
    }

    #[test]
    fn test_debug_redacts_key() {
        let request = AlchemyRequest::compose(
            Operation::Language,
            &CommonParameters::new("do-not-print"),
            &LanguageParams::default(),
            &ContentSource::text("hello"),
            &UrlFallback::None,
        )
        .unwrap();

        let debug = format!("{request:?}");
        assert!(!debug.contains("do-not-print"));
        assert!(debug.contains("TextGetLanguage"));
    }
}
