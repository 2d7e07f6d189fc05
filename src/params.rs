//! Content sources, per-operation parameters and the parameter merger.
//!
//! A request form is built from three layers: the common parameters
//! (API key and output mode), the operation's parameter set, and the
//! content source. Later layers overwrite same-named keys from earlier
//! ones. Every value is rendered as a string because the form is sent
//! URL-encoded.

use crate::endpoint::SourceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Flat, ordered form sent as the POST body.
pub type FormMap = BTreeMap<String, String>;

/// Output mode requested from the service. Responses are always JSON.
pub const OUTPUT_MODE_JSON: &str = "json";

/// Placeholder `url` the detection calls send when the caller gives none.
pub const DEFAULT_URL_PLACEHOLDER: &str = "test";

/// The content an analysis call runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    /// An HTML document.
    Html(String),
    /// A public URL the service fetches.
    Url(String),
    /// Plain text.
    Text(String),
}

impl ContentSource {
    /// HTML content.
    pub fn html(html: impl Into<String>) -> Self {
        Self::Html(html.into())
    }

    /// URL content.
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    /// Plain text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// The kind of this source, which selects the endpoint.
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Html(_) => SourceKind::Html,
            Self::Url(_) => SourceKind::Url,
            Self::Text(_) => SourceKind::Text,
        }
    }

    /// Form key carrying the content.
    pub fn form_key(&self) -> &'static str {
        self.kind().segment()
    }

    /// The content itself.
    pub fn value(&self) -> &str {
        match self {
            Self::Html(v) | Self::Url(v) | Self::Text(v) => v,
        }
    }

    /// Short rendering for log lines.
    pub fn display_value(&self) -> String {
        let value = self.value();
        match value.char_indices().nth(50) {
            Some((idx, _)) => format!("{}...", &value[..idx]),
            None => value.to_string(),
        }
    }
}

/// Which part of a page the service analyzes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceText {
    /// Cleaned text, falling back to raw text.
    #[default]
    CleanedOrRaw,
    /// Page text with ads and navigation removed.
    Cleaned,
    /// All page text.
    Raw,
    /// Visual constraints query given in `cquery`.
    Cquery,
    /// XPath query given in `xpath`.
    Xpath,
    /// XPath query, falling back to raw text.
    XpathOrRaw,
    /// Cleaned text plus the XPath query results.
    CleanedAndXpath,
}

impl SourceText {
    /// Wire value of this setting.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CleanedOrRaw => "cleaned_or_raw",
            Self::Cleaned => "cleaned",
            Self::Raw => "raw",
            Self::Cquery => "cquery",
            Self::Xpath => "xpath",
            Self::XpathOrRaw => "xpath_or_raw",
            Self::CleanedAndXpath => "cleaned_and_xpath",
        }
    }
}

/// Keyword extraction strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordExtractMode {
    /// Standard extraction.
    #[default]
    Normal,
    /// Fewer, higher-quality keywords.
    Strict,
}

impl KeywordExtractMode {
    /// Wire value of this setting.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Strict => "strict",
        }
    }
}

/// A parameter set that renders itself as form fields.
pub trait FormParams {
    /// The `(key, value)` pairs to send, in declaration order.
    fn form_fields(&self) -> Vec<(&'static str, String)>;
}

/// Operations without parameters of their own.
impl FormParams for () {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Accumulates form fields; unset or empty optional strings are skipped.
#[derive(Default)]
struct Fields(Vec<(&'static str, String)>);

impl Fields {
    fn flag(mut self, key: &'static str, on: bool) -> Self {
        self.0.push((key, if on { "1" } else { "0" }.to_string()));
        self
    }

    fn value(mut self, key: &'static str, value: impl ToString) -> Self {
        self.0.push((key, value.to_string()));
        self
    }

    fn optional(mut self, key: &'static str, value: Option<&String>) -> Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.0.push((key, v.clone()));
        }
        self
    }

    fn finish(self) -> Vec<(&'static str, String)> {
        self.0
    }
}

/// By-value setters for a parameter set.
///
/// Plain fields take their own type; `strings` fields take anything
/// convertible to `String` and store it as `Some`.
macro_rules! setters {
    ($ty:ident { $($field:ident: $arg:ty),* $(,)? } strings { $($opt:ident),* $(,)? }) => {
        impl $ty {
            $(
                #[doc = concat!("Set `", stringify!($field), "`.")]
                #[must_use]
                pub fn $field(mut self, value: $arg) -> Self {
                    self.$field = value;
                    self
                }
            )*
            $(
                #[doc = concat!("Set `", stringify!($opt), "`.")]
                #[must_use]
                pub fn $opt(mut self, value: impl Into<String>) -> Self {
                    self.$opt = Some(value.into());
                    self
                }
            )*
        }
    };
}

/// Parameters for entity extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitiesParams {
    /// Link entities to their disambiguated forms.
    pub disambiguate: bool,
    /// Include linked data links for disambiguated entities.
    pub linked_data: bool,
    /// Resolve coreferences such as "he" or "it".
    pub coreference: bool,
    /// Extract quotations attributed to entities.
    pub quotations: bool,
    /// Analyze sentiment for each entity.
    pub sentiment: bool,
    /// Which part of the page to analyze.
    pub source_text: SourceText,
    /// Include the analyzed text in the response.
    pub show_source_text: bool,
    /// Visual constraints query.
    pub cquery: Option<String>,
    /// XPath query.
    pub xpath: Option<String>,
    /// Maximum number of entities returned.
    pub max_retrieve: u32,
    /// Base URL for resolving relative links in HTML input.
    pub base_url: Option<String>,
    /// Include knowledge graph type hierarchies.
    pub knowledge_graph: bool,
    /// Extract structured entities such as e-mail addresses and quantities.
    pub structured_entities: bool,
}

impl Default for EntitiesParams {
    fn default() -> Self {
        Self {
            disambiguate: true,
            linked_data: true,
            coreference: true,
            quotations: false,
            sentiment: false,
            source_text: SourceText::default(),
            show_source_text: false,
            cquery: None,
            xpath: None,
            max_retrieve: 50,
            base_url: None,
            knowledge_graph: false,
            structured_entities: true,
        }
    }
}

impl FormParams for EntitiesParams {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        Fields::default()
            .flag("disambiguate", self.disambiguate)
            .flag("linkedData", self.linked_data)
            .flag("coreference", self.coreference)
            .flag("quotations", self.quotations)
            .flag("sentiment", self.sentiment)
            .value("sourceText", self.source_text.as_str())
            .flag("showSourceText", self.show_source_text)
            .optional("cquery", self.cquery.as_ref())
            .optional("xpath", self.xpath.as_ref())
            .value("maxRetrieve", self.max_retrieve)
            .optional("baseUrl", self.base_url.as_ref())
            .flag("knowledgeGraph", self.knowledge_graph)
            .flag("structuredEntities", self.structured_entities)
            .finish()
    }
}

setters!(EntitiesParams {
    disambiguate: bool,
    linked_data: bool,
    coreference: bool,
    quotations: bool,
    sentiment: bool,
    source_text: SourceText,
    show_source_text: bool,
    max_retrieve: u32,
    knowledge_graph: bool,
    structured_entities: bool,
} strings { cquery, xpath, base_url });

/// Parameters for document and targeted sentiment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentParams {
    /// Sentiment flag forwarded as-is to the service.
    pub sentiment: bool,
    /// Include the analyzed text in the response.
    pub show_source_text: bool,
    /// Which part of the page to analyze.
    pub source_text: SourceText,
    /// Visual constraints query.
    pub cquery: Option<String>,
    /// XPath query.
    pub xpath: Option<String>,
    /// `|`-separated target phrases. Required for targeted sentiment.
    pub targets: Option<String>,
}

impl SentimentParams {
    /// Parameters for a targeted sentiment call on `targets`.
    pub fn targeted(targets: impl Into<String>) -> Self {
        Self::default().targets(targets)
    }

    /// Whether at least one target phrase is present.
    pub fn has_targets(&self) -> bool {
        self.targets.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl FormParams for SentimentParams {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        Fields::default()
            .flag("sentiment", self.sentiment)
            .flag("showSourceText", self.show_source_text)
            .value("sourceText", self.source_text.as_str())
            .optional("cquery", self.cquery.as_ref())
            .optional("xpath", self.xpath.as_ref())
            .optional("targets", self.targets.as_ref())
            .finish()
    }
}

setters!(SentimentParams {
    sentiment: bool,
    show_source_text: bool,
    source_text: SourceText,
} strings { cquery, xpath, targets });

/// Parameters for keyword extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordsParams {
    /// Analyze sentiment for each keyword.
    pub sentiment: bool,
    /// Which part of the page to analyze.
    pub source_text: SourceText,
    /// Include the analyzed text in the response.
    pub show_source_text: bool,
    /// Visual constraints query.
    pub cquery: Option<String>,
    /// XPath query.
    pub xpath: Option<String>,
    /// Maximum number of keywords returned.
    pub max_retrieve: u32,
    /// Base URL for resolving relative links in HTML input.
    pub base_url: Option<String>,
    /// Include knowledge graph type hierarchies.
    pub knowledge_graph: bool,
    /// Extraction strategy.
    pub keyword_extract_mode: KeywordExtractMode,
}

impl Default for KeywordsParams {
    fn default() -> Self {
        Self {
            sentiment: false,
            source_text: SourceText::default(),
            show_source_text: false,
            cquery: None,
            xpath: None,
            max_retrieve: 50,
            base_url: None,
            knowledge_graph: false,
            keyword_extract_mode: KeywordExtractMode::default(),
        }
    }
}

impl FormParams for KeywordsParams {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        Fields::default()
            .flag("sentiment", self.sentiment)
            .value("sourceText", self.source_text.as_str())
            .flag("showSourceText", self.show_source_text)
            .optional("cquery", self.cquery.as_ref())
            .optional("xpath", self.xpath.as_ref())
            .value("maxRetrieve", self.max_retrieve)
            .optional("baseUrl", self.base_url.as_ref())
            .flag("knowledgeGraph", self.knowledge_graph)
            .value("keywordExtractMode", self.keyword_extract_mode.as_str())
            .finish()
    }
}

setters!(KeywordsParams {
    sentiment: bool,
    source_text: SourceText,
    show_source_text: bool,
    max_retrieve: u32,
    knowledge_graph: bool,
    keyword_extract_mode: KeywordExtractMode,
} strings { cquery, xpath, base_url });

/// Parameters for concept tagging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConceptsParams {
    /// Include linked data links for each concept.
    pub linked_data: bool,
    /// Which part of the page to analyze.
    pub source_text: SourceText,
    /// Include the analyzed text in the response.
    pub show_source_text: bool,
    /// Visual constraints query.
    pub cquery: Option<String>,
    /// XPath query.
    pub xpath: Option<String>,
    /// Maximum number of concepts returned.
    pub max_retrieve: u32,
    /// Base URL for resolving relative links in HTML input.
    pub base_url: Option<String>,
    /// Include knowledge graph type hierarchies.
    pub knowledge_graph: bool,
}

impl Default for ConceptsParams {
    fn default() -> Self {
        Self {
            linked_data: true,
            source_text: SourceText::default(),
            show_source_text: false,
            cquery: None,
            xpath: None,
            max_retrieve: 50,
            base_url: None,
            knowledge_graph: false,
        }
    }
}

impl FormParams for ConceptsParams {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        Fields::default()
            .flag("linkedData", self.linked_data)
            .value("sourceText", self.source_text.as_str())
            .flag("showSourceText", self.show_source_text)
            .optional("cquery", self.cquery.as_ref())
            .optional("xpath", self.xpath.as_ref())
            .value("maxRetrieve", self.max_retrieve)
            .optional("baseUrl", self.base_url.as_ref())
            .flag("knowledgeGraph", self.knowledge_graph)
            .finish()
    }
}

setters!(ConceptsParams {
    linked_data: bool,
    source_text: SourceText,
    show_source_text: bool,
    max_retrieve: u32,
    knowledge_graph: bool,
} strings { cquery, xpath, base_url });

/// Parameters for relation extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationsParams {
    /// Extract entities from relation components.
    pub entities: bool,
    /// Extract keywords from relation components.
    pub keywords: bool,
    /// Only return relations that contain an entity.
    pub require_entities: bool,
    /// Exclude entity text from sentiment analysis.
    pub sentiment_exclude_entities: bool,
    /// Link entities to their disambiguated forms.
    pub disambiguate: bool,
    /// Include linked data links for disambiguated entities.
    pub linked_data: bool,
    /// Resolve coreferences such as "he" or "it".
    pub coreference: bool,
    /// Analyze sentiment for each relation.
    pub sentiment: bool,
    /// Which part of the page to analyze.
    pub source_text: SourceText,
    /// Include the analyzed text in the response.
    pub show_source_text: bool,
    /// Visual constraints query.
    pub cquery: Option<String>,
    /// XPath query.
    pub xpath: Option<String>,
    /// Maximum number of relations returned.
    pub max_retrieve: u32,
    /// Base URL for resolving relative links in HTML input.
    pub base_url: Option<String>,
}

impl Default for RelationsParams {
    fn default() -> Self {
        Self {
            entities: false,
            keywords: false,
            require_entities: false,
            sentiment_exclude_entities: true,
            disambiguate: true,
            linked_data: true,
            coreference: true,
            sentiment: true,
            source_text: SourceText::default(),
            show_source_text: false,
            cquery: None,
            xpath: None,
            max_retrieve: 50,
            base_url: None,
        }
    }
}

impl FormParams for RelationsParams {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        Fields::default()
            .flag("entities", self.entities)
            .flag("keywords", self.keywords)
            .flag("requireEntities", self.require_entities)
            .flag("sentimentExcludeEntities", self.sentiment_exclude_entities)
            .flag("disambiguate", self.disambiguate)
            .flag("linkedData", self.linked_data)
            .flag("coreference", self.coreference)
            .flag("sentiment", self.sentiment)
            .value("sourceText", self.source_text.as_str())
            .flag("showSourceText", self.show_source_text)
            .optional("cquery", self.cquery.as_ref())
            .optional("xpath", self.xpath.as_ref())
            .value("maxRetrieve", self.max_retrieve)
            .optional("baseUrl", self.base_url.as_ref())
            .finish()
    }
}

setters!(RelationsParams {
    entities: bool,
    keywords: bool,
    require_entities: bool,
    sentiment_exclude_entities: bool,
    disambiguate: bool,
    linked_data: bool,
    coreference: bool,
    sentiment: bool,
    source_text: SourceText,
    show_source_text: bool,
    max_retrieve: u32,
} strings { cquery, xpath, base_url });

/// Parameters for taxonomy classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyParams {
    /// Which part of the page to analyze.
    pub source_text: SourceText,
    /// Visual constraints query.
    pub cquery: Option<String>,
    /// XPath query.
    pub xpath: Option<String>,
    /// Base URL for resolving relative links in HTML input.
    pub base_url: Option<String>,
}

impl FormParams for TaxonomyParams {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        Fields::default()
            .value("sourceText", self.source_text.as_str())
            .optional("cquery", self.cquery.as_ref())
            .optional("xpath", self.xpath.as_ref())
            .optional("baseUrl", self.base_url.as_ref())
            .finish()
    }
}

setters!(TaxonomyParams {
    source_text: SourceText,
} strings { cquery, xpath, base_url });

/// Parameters for language detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageParams {
    /// Which part of the page to analyze.
    pub source_text: SourceText,
    /// Visual constraints query.
    pub cquery: Option<String>,
    /// XPath query.
    pub xpath: Option<String>,
}

impl FormParams for LanguageParams {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        Fields::default()
            .value("sourceText", self.source_text.as_str())
            .optional("cquery", self.cquery.as_ref())
            .optional("xpath", self.xpath.as_ref())
            .finish()
    }
}

setters!(LanguageParams {
    source_text: SourceText,
} strings { cquery, xpath });

/// Parameters for text extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextParams {
    /// Use page metadata such as titles and descriptions.
    pub use_metadata: bool,
    /// Keep hyperlinks in the extracted text.
    pub extract_links: bool,
    /// Which part of the page to analyze.
    pub source_text: SourceText,
    /// Visual constraints query.
    pub cquery: Option<String>,
    /// XPath query.
    pub xpath: Option<String>,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            use_metadata: true,
            extract_links: false,
            source_text: SourceText::default(),
            cquery: None,
            xpath: None,
        }
    }
}

impl FormParams for TextParams {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        Fields::default()
            .flag("useMetadata", self.use_metadata)
            .flag("extractLinks", self.extract_links)
            .value("sourceText", self.source_text.as_str())
            .optional("cquery", self.cquery.as_ref())
            .optional("xpath", self.xpath.as_ref())
            .finish()
    }
}

setters!(TextParams {
    use_metadata: bool,
    extract_links: bool,
    source_text: SourceText,
} strings { cquery, xpath });

/// Parameters sent with every call.
#[derive(Clone, PartialEq, Eq)]
pub struct CommonParameters {
    api_key: String,
}

impl CommonParameters {
    /// Common parameters for `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    fn form_fields(&self) -> [(&'static str, &str); 2] {
        [("apikey", self.api_key.as_str()), ("outputMode", OUTPUT_MODE_JSON)]
    }
}

impl fmt::Debug for CommonParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommonParameters")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// What to send as `url` when the merged form has none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UrlFallback {
    /// Leave `url` out.
    #[default]
    None,
    /// Send this placeholder value.
    Placeholder(String),
}

/// Merge the parameter layers into one form.
///
/// Layers are applied in order: common parameters, operation parameters,
/// the content source key, then the `url` fallback if no `url` is set.
pub fn compose_form<P: FormParams + ?Sized>(
    common: &CommonParameters,
    params: &P,
    source: Option<&ContentSource>,
    fallback: &UrlFallback,
) -> FormMap {
    let mut form = FormMap::new();

    for (key, value) in common.form_fields() {
        form.insert(key.to_string(), value.to_string());
    }

    for (key, value) in params.form_fields() {
        form.insert(key.to_string(), value);
    }

    if let Some(source) = source {
        form.insert(source.form_key().to_string(), source.value().to_string());
    }

    if let UrlFallback::Placeholder(placeholder) = fallback {
        form.entry("url".to_string())
            .or_insert_with(|| placeholder.clone());
    }

    form
}
