//! # AlchemyLanguage
//!
//! Async client for the AlchemyLanguage text analysis API.
//!
//! Every operation takes a [`ContentSource`] (HTML, a URL, or plain text)
//! plus an optional parameter set with documented defaults, posts a
//! URL-encoded form to the operation's endpoint, and decodes the JSON
//! response into a typed model.
//!
//! ## Operations
//!
//! - **Entity extraction**: [`AlchemyLanguage::get_entities`]
//! - **Sentiment analysis**: [`AlchemyLanguage::get_sentiment`], document or targeted
//! - **Keyword extraction**: [`AlchemyLanguage::get_ranked_keywords`]
//! - **Concept tagging**: [`AlchemyLanguage::get_ranked_concepts`]
//! - **Relation extraction**: [`AlchemyLanguage::get_relations`]
//! - **Taxonomy classification**: [`AlchemyLanguage::get_ranked_taxonomy`]
//! - **Author extraction**: [`AlchemyLanguage::get_authors`]
//! - **Language detection**: [`AlchemyLanguage::get_language`]
//! - **Text extraction**: [`AlchemyLanguage::get_text`]
//! - **Microformats parsing**: [`AlchemyLanguage::get_microformat_data`]
//! - **Feed detection**: [`AlchemyLanguage::get_feed_links`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use alchemy_language::{AlchemyLanguage, Config, ContentSource, LanguageParams};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AlchemyLanguage::new(Config::new("your-api-key"))?;
//!
//!     let language = client
//!         .get_language(&ContentSource::text("Bonjour le monde"), LanguageParams::default())
//!         .await?;
//!
//!     println!("{} ({:?})", language.language, language.code());
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! The client is configured via:
//! - [`Config::new`] in code
//! - Environment variables (`ALCHEMY_API_KEY`, `ALCHEMY_BASE_URL`)
//! - JSON configuration files
//!
//! See [`Config`] for all available options.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod language;
pub mod models;
pub mod params;
pub mod request;

// Re-exports for convenience
pub use client::{HttpTransport, Transport};
pub use config::{Args, Command, Config, Credentials, RequestConfig};
pub use endpoint::{Operation, SentimentType, SourceKind, TextType};
pub use error::{AlchemyError, Result};
pub use language::{AlchemyLanguage, complete};
pub use models::{
    ConceptResponse, DocumentAuthors, DocumentText, DocumentTitle, Entities, ExtractedText, Feeds,
    Keywords, Language, Microformats, SAORelations, SentimentResponse, Taxonomies,
};
pub use params::{
    CommonParameters, ConceptsParams, ContentSource, EntitiesParams, FormMap, FormParams,
    KeywordExtractMode, KeywordsParams, LanguageParams, RelationsParams, SentimentParams,
    SourceText, TaxonomyParams, TextParams, UrlFallback, compose_form,
};
pub use request::AlchemyRequest;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
