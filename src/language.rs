//! The AlchemyLanguage service client.
//!
//! Each operation composes a request (endpoint, merged form), posts it
//! through the [`Transport`], and decodes the body into the operation's
//! response model. Calls are independent: the client holds only the
//! read-only configuration and can be cloned and used concurrently.

use crate::client::{HttpTransport, Transport};
use crate::config::Config;
use crate::endpoint::{Operation, SentimentType, TextType};
use crate::error::{AlchemyError, Result};
use crate::models::{
    self, ConceptResponse, DocumentAuthors, DocumentText, DocumentTitle, Entities, ExtractedText,
    Feeds, Keywords, Language, Microformats, SAORelations, SentimentResponse, Taxonomies,
};
use crate::params::{
    CommonParameters, ConceptsParams, ContentSource, EntitiesParams, FormParams, KeywordsParams,
    LanguageParams, RelationsParams, SentimentParams, TaxonomyParams, TextParams, UrlFallback,
};
use crate::request::AlchemyRequest;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Client for the AlchemyLanguage API.
#[derive(Debug)]
pub struct AlchemyLanguage<T = HttpTransport> {
    config: Arc<Config>,
    common: CommonParameters,
    transport: Arc<T>,
}

impl<T> Clone for AlchemyLanguage<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            common: self.common.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl AlchemyLanguage<HttpTransport> {
    /// Create a client that talks to the service over HTTP.
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> AlchemyLanguage<T> {
    /// Create a client on top of a custom transport.
    pub fn with_transport(config: Config, transport: T) -> Result<Self> {
        config.validate()?;
        let common = CommonParameters::new(config.api_key.clone());

        Ok(Self {
            config: Arc::new(config),
            common,
            transport: Arc::new(transport),
        })
    }

    /// The client configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Compose the request for `operation` without sending it.
    pub fn compose<P: FormParams + ?Sized>(
        &self,
        operation: Operation,
        params: &P,
        source: &ContentSource,
    ) -> Result<AlchemyRequest> {
        let fallback = match operation {
            Operation::Microformats | Operation::Feeds => self
                .config
                .detection_url_placeholder
                .clone()
                .map_or(UrlFallback::None, UrlFallback::Placeholder),
            _ => UrlFallback::None,
        };

        AlchemyRequest::compose(operation, &self.common, params, source, &fallback)
    }

    /// Post a composed request and return the raw body.
    async fn send(&self, request: &AlchemyRequest) -> Result<String> {
        let url = request.url(&self.config.base_url);
        let start = Instant::now();

        debug!(
            operation = request.operation.name(),
            kind = %request.kind,
            path = %request.path,
            source = request.display_source(),
            "Dispatching request"
        );

        let result = self.transport.post(&url, &request.form).await;

        match &result {
            Ok(_) => debug!(
                operation = request.operation.name(),
                latency_ms = start.elapsed().as_millis() as u64,
                "Request completed"
            ),
            Err(e) => debug!(
                operation = request.operation.name(),
                error = %e,
                "Request failed"
            ),
        }

        result
    }

    /// Post a composed request and decode the response into `M`.
    ///
    /// Transport errors are returned as-is and nothing is decoded.
    pub async fn dispatch<M: DeserializeOwned>(&self, request: &AlchemyRequest) -> Result<M> {
        let body = self.send(request).await?;
        models::decode(request.operation, &body)
    }

    async fn run<M, P>(&self, operation: Operation, params: &P, source: &ContentSource) -> Result<M>
    where
        M: DeserializeOwned,
        P: FormParams + ?Sized,
    {
        let request = self.compose(operation, params, source)?;
        self.dispatch(&request).await
    }

    /// Extract a ranked list of named entities.
    pub async fn get_entities(
        &self,
        source: &ContentSource,
        params: EntitiesParams,
    ) -> Result<Entities> {
        self.run(Operation::Entities, &params, source).await
    }

    /// Analyze document sentiment, or sentiment towards `params.targets`.
    ///
    /// Targeted calls without targets fail with
    /// [`AlchemyError::MissingTargets`] before anything is sent. The
    /// response must carry `docSentiment` for document calls and
    /// `results` for targeted ones.
    pub async fn get_sentiment(
        &self,
        source: &ContentSource,
        sentiment_type: SentimentType,
        params: SentimentParams,
    ) -> Result<SentimentResponse> {
        let operation = Operation::Sentiment(sentiment_type);
        let response: SentimentResponse = self.run(operation, &params, source).await?;

        let missing = match sentiment_type {
            SentimentType::Normal if response.doc_sentiment.is_none() => Some("docSentiment"),
            SentimentType::Targeted if response.results.is_none() => Some("results"),
            _ => None,
        };
        if let Some(field) = missing {
            return Err(missing_field(operation, field));
        }

        Ok(response)
    }

    /// Extract ranked keywords.
    pub async fn get_ranked_keywords(
        &self,
        source: &ContentSource,
        params: KeywordsParams,
    ) -> Result<Keywords> {
        self.run(Operation::Keywords, &params, source).await
    }

    /// Tag concepts.
    pub async fn get_ranked_concepts(
        &self,
        source: &ContentSource,
        params: ConceptsParams,
    ) -> Result<ConceptResponse> {
        self.run(Operation::Concepts, &params, source).await
    }

    /// Extract subject-action-object relations.
    pub async fn get_relations(
        &self,
        source: &ContentSource,
        params: RelationsParams,
    ) -> Result<SAORelations> {
        self.run(Operation::Relations, &params, source).await
    }

    /// Classify into the service taxonomy.
    pub async fn get_ranked_taxonomy(
        &self,
        source: &ContentSource,
        params: TaxonomyParams,
    ) -> Result<Taxonomies> {
        self.run(Operation::Taxonomy, &params, source).await
    }

    /// Extract the authors of an HTML page or URL.
    pub async fn get_authors(&self, source: &ContentSource) -> Result<DocumentAuthors> {
        self.run(Operation::Authors, &(), source).await
    }

    /// Detect the language of the content.
    pub async fn get_language(
        &self,
        source: &ContentSource,
        params: LanguageParams,
    ) -> Result<Language> {
        self.run(Operation::Language, &params, source).await
    }

    /// Extract the text, raw text or title of an HTML page or URL.
    ///
    /// Both views are decoded from the same response; the one matching
    /// `text_type` must be present.
    pub async fn get_text(
        &self,
        source: &ContentSource,
        text_type: TextType,
        params: TextParams,
    ) -> Result<ExtractedText> {
        let operation = Operation::Text(text_type);
        let request = self.compose(operation, &params, source)?;
        let body = self.send(&request).await?;

        let text: DocumentText = models::decode(operation, &body)?;
        let title: DocumentTitle = models::decode(operation, &body)?;

        let missing = match text_type {
            TextType::Title if title.title.is_none() => Some("title"),
            TextType::Normal | TextType::Raw if text.text.is_none() => Some("text"),
            _ => None,
        };
        if let Some(field) = missing {
            return Err(missing_field(operation, field));
        }

        Ok(ExtractedText { text, title })
    }

    /// Parse microformats from an HTML page or URL.
    pub async fn get_microformat_data(&self, source: &ContentSource) -> Result<Microformats> {
        self.run(Operation::Microformats, &(), source).await
    }

    /// Detect RSS/ATOM feed links on an HTML page or URL.
    pub async fn get_feed_links(&self, source: &ContentSource) -> Result<Feeds> {
        self.run(Operation::Feeds, &(), source).await
    }
}

fn missing_field(operation: Operation, field: &'static str) -> AlchemyError {
    AlchemyError::Decode {
        operation: operation.name(),
        source: serde::de::Error::missing_field(field),
    }
}

/// Await `operation` and hand its outcome to `handler`.
///
/// The handler is `FnOnce` and receives exactly one result or error.
pub async fn complete<M, F, H>(operation: F, handler: H)
where
    F: Future<Output = Result<M>>,
    H: FnOnce(Result<M>),
{
    handler(operation.await);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FormMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Transport that records calls and replies with a canned outcome.
    #[derive(Debug)]
    struct FakeTransport {
        calls: Mutex<Vec<(String, FormMap)>>,
        reply: fn() -> Result<String>,
    }

    impl FakeTransport {
        fn replying(reply: fn() -> Result<String>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply,
            }
        }

        fn calls(&self) -> Vec<(String, FormMap)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Transport for FakeTransport {
        async fn post(&self, url: &str, form: &FormMap) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), form.clone()));
            (self.reply)()
        }
    }

    fn client(reply: fn() -> Result<String>) -> AlchemyLanguage<FakeTransport> {
        let config = Config::new("test-key").with_base_url("http://alchemy.test/calls");
        AlchemyLanguage::with_transport(config, FakeTransport::replying(reply)).unwrap()
    }

    fn language_body() -> Result<String> {
        Ok(r#"{"status": "OK", "language": "french", "iso-639-1": "fr"}"#.to_string())
    }

    fn unreachable_body() -> Result<String> {
        Err(AlchemyError::EndpointError {
            status: 503,
            body: "unavailable".to_string(),
        })
    }

    #[tokio::test]
    async fn test_language_end_to_end() {
        let client = client(language_body);
        let source = ContentSource::text("Bonjour le monde");

        let language = client
            .get_language(&source, LanguageParams::default())
            .await
            .unwrap();
        assert_eq!(language.code(), Some("fr"));

        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "http://alchemy.test/calls/text/TextGetLanguage");

        let expected: FormMap = [
            ("apikey", "test-key"),
            ("outputMode", "json"),
            ("sourceText", "cleaned_or_raw"),
            ("text", "Bonjour le monde"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(calls[0].1, expected);
    }

    #[tokio::test]
    async fn test_targeted_sentiment_without_targets_sends_nothing() {
        let client = client(language_body);
        let err = client
            .get_sentiment(
                &ContentSource::text("I love Paris"),
                SentimentType::Targeted,
                SentimentParams::default(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AlchemyError::MissingTargets));
        assert!(client.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_source_sends_nothing() {
        let client = client(language_body);
        let err = client
            .get_authors(&ContentSource::text("no page here"))
            .await
            .unwrap_err();

        assert!(err.is_caller_misuse());
        assert!(client.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_is_returned_untouched() {
        let client = client(unreachable_body);
        let err = client
            .get_ranked_keywords(&ContentSource::url("http://a.test"), KeywordsParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AlchemyError::EndpointError { status: 503, .. }));
        assert_eq!(client.transport().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_detection_placeholder() {
        fn feeds_body() -> Result<String> {
            Ok(r#"{"status": "OK", "feeds": [{"feed": "http://a.test/rss"}]}"#.to_string())
        }

        let client = client(feeds_body);
        let feeds = client
            .get_feed_links(&ContentSource::html("<link rel=alternate>"))
            .await
            .unwrap();
        assert_eq!(feeds.feeds[0].feed, "http://a.test/rss");

        let calls = client.transport().calls();
        assert_eq!(calls[0].0, "http://alchemy.test/calls/html/HTMLGetFeedLinks");
        assert_eq!(calls[0].1["url"], "test");
    }

    #[tokio::test]
    async fn test_detection_placeholder_can_be_disabled() {
        fn microformats_body() -> Result<String> {
            Ok(r#"{"status": "OK", "microformats": []}"#.to_string())
        }

        let mut config = Config::new("k");
        config.detection_url_placeholder = None;
        let client =
            AlchemyLanguage::with_transport(config, FakeTransport::replying(microformats_body))
                .unwrap();

        client
            .get_microformat_data(&ContentSource::html("<div class=vcard></div>"))
            .await
            .unwrap();
        assert!(!client.transport().calls()[0].1.contains_key("url"));
    }

    #[tokio::test]
    async fn test_get_text_title() {
        fn title_body() -> Result<String> {
            Ok(r#"{"status": "OK", "url": "http://a.test", "title": "Hello"}"#.to_string())
        }

        let client = client(title_body);
        let source = ContentSource::url("http://a.test");

        let extracted = client
            .get_text(&source, TextType::Title, TextParams::default())
            .await
            .unwrap();
        assert_eq!(extracted.title.title.as_deref(), Some("Hello"));
        assert_eq!(extracted.text.text, None);
        assert_eq!(
            client.transport().calls()[0].0,
            "http://alchemy.test/calls/url/URLGetTitle"
        );

        // A title body does not satisfy a text call.
        let err = client
            .get_text(&source, TextType::Normal, TextParams::default())
            .await
            .unwrap_err();
        assert!(err.is_decode());
    }

    fn bare_ok_body() -> Result<String> {
        Ok(r#"{"status": "OK", "language": "english"}"#.to_string())
    }

    #[tokio::test]
    async fn test_document_sentiment_requires_doc_sentiment() {
        let client = client(bare_ok_body);
        let err = client
            .get_sentiment(
                &ContentSource::text("I love Paris"),
                SentimentType::Normal,
                SentimentParams::default(),
            )
            .await
            .unwrap_err();

        assert!(err.is_decode());
        assert!(err.to_string().contains("docSentiment"));
    }

    #[tokio::test]
    async fn test_targeted_sentiment_requires_results() {
        let client = client(bare_ok_body);
        let err = client
            .get_sentiment(
                &ContentSource::text("I love Paris"),
                SentimentType::Targeted,
                SentimentParams::targeted("Paris"),
            )
            .await
            .unwrap_err();

        assert!(err.is_decode());
        assert!(err.to_string().contains("results"));
        assert_eq!(
            client.transport().calls()[0].0,
            "http://alchemy.test/calls/text/TextGetTargetedSentiment"
        );
    }

    #[tokio::test]
    async fn test_document_sentiment_decodes() {
        fn sentiment_body() -> Result<String> {
            Ok(r#"{"status": "OK", "docSentiment": {"type": "positive", "score": "0.5"}}"#
                .to_string())
        }

        let response = client(sentiment_body)
            .get_sentiment(
                &ContentSource::html("<p>I love Paris</p>"),
                SentimentType::Normal,
                SentimentParams::default(),
            )
            .await
            .unwrap();

        let doc = response.doc_sentiment.unwrap();
        assert_eq!(doc.sentiment_type, "positive");
        assert_eq!(doc.score, Some(0.5));
    }

    #[tokio::test]
    async fn test_complete_calls_handler_once() {
        let working = client(language_body);
        let source = ContentSource::text("Bonjour");
        let calls = AtomicUsize::new(0);

        complete(
            working.get_language(&source, LanguageParams::default()),
            |result| {
                calls.fetch_add(1, Ordering::SeqCst);
                assert!(result.is_ok());
            },
        )
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let failing = client(unreachable_body);
        complete(
            failing.get_language(&source, LanguageParams::default()),
            |result| {
                calls.fetch_add(1, Ordering::SeqCst);
                assert!(result.unwrap_err().is_transport());
            },
        )
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = AlchemyLanguage::with_transport(
            Config::new(""),
            FakeTransport::replying(language_body),
        );
        assert!(result.unwrap_err().is_caller_misuse());
    }
}
