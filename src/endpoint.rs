//! Endpoint resolution for AlchemyLanguage calls.
//!
//! Every operation maps a content source kind to a fixed call path below
//! the service base URL, e.g. `/text/TextGetLanguage`. Resolution is a
//! pure function; unsupported combinations are rejected before any
//! request is built.

use crate::error::{AlchemyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of content a call is made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Raw HTML supplied by the caller.
    Html,
    /// A URL the service fetches itself.
    Url,
    /// Plain text.
    Text,
}

impl SourceKind {
    /// All source kinds, in path order.
    pub const ALL: [SourceKind; 3] = [SourceKind::Html, SourceKind::Url, SourceKind::Text];

    /// Path segment for this kind (`html`, `url` or `text`).
    pub fn segment(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Url => "url",
            Self::Text => "text",
        }
    }

    /// Prefix the service puts in front of each call name.
    fn call_prefix(self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Url => "URL",
            Self::Text => "Text",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// Sentiment call flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SentimentType {
    /// Document-level sentiment.
    #[default]
    Normal,
    /// Sentiment towards the phrases given in `targets`.
    Targeted,
}

/// Text extraction call flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextType {
    /// Cleaned page text with navigation and ads removed.
    #[default]
    Normal,
    /// All page text, markup stripped.
    Raw,
    /// Page title only.
    Title,
}

/// One AlchemyLanguage analysis capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Named entity extraction.
    Entities,
    /// Document or targeted sentiment.
    Sentiment(SentimentType),
    /// Ranked keyword extraction.
    Keywords,
    /// Concept tagging.
    Concepts,
    /// Subject-action-object relation extraction.
    Relations,
    /// Taxonomy classification.
    Taxonomy,
    /// Author extraction.
    Authors,
    /// Language detection.
    Language,
    /// Text, raw text or title extraction.
    Text(TextType),
    /// Microformats parsing.
    Microformats,
    /// RSS/ATOM feed link detection.
    Feeds,
}

impl Operation {
    /// Stable label used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Entities => "entities",
            Self::Sentiment(SentimentType::Normal) => "sentiment",
            Self::Sentiment(SentimentType::Targeted) => "targeted_sentiment",
            Self::Keywords => "keywords",
            Self::Concepts => "concepts",
            Self::Relations => "relations",
            Self::Taxonomy => "taxonomy",
            Self::Authors => "authors",
            Self::Language => "language",
            Self::Text(TextType::Normal) => "text",
            Self::Text(TextType::Raw) => "raw_text",
            Self::Text(TextType::Title) => "title",
            Self::Microformats => "microformats",
            Self::Feeds => "feeds",
        }
    }

    /// Call name shared by all source kinds of this operation.
    fn call_name(self) -> &'static str {
        match self {
            Self::Entities => "GetRankedNamedEntities",
            Self::Sentiment(SentimentType::Normal) => "GetTextSentiment",
            Self::Sentiment(SentimentType::Targeted) => "GetTargetedSentiment",
            Self::Keywords => "GetRankedKeywords",
            Self::Concepts => "GetRankedConcepts",
            Self::Relations => "GetRelations",
            Self::Taxonomy => "GetRankedTaxonomy",
            Self::Authors => "GetAuthors",
            Self::Language => "GetLanguage",
            Self::Text(TextType::Normal) => "GetText",
            Self::Text(TextType::Raw) => "GetRawText",
            Self::Text(TextType::Title) => "GetTitle",
            Self::Microformats => "GetMicroformatData",
            Self::Feeds => "GetFeedLinks",
        }
    }

    /// Whether the service offers this operation for `kind`.
    pub fn supports(self, kind: SourceKind) -> bool {
        match kind {
            SourceKind::Html | SourceKind::Url => true,
            SourceKind::Text => !matches!(
                self,
                Self::Authors | Self::Text(_) | Self::Microformats | Self::Feeds
            ),
        }
    }

    /// Resolve the call path for `kind`, e.g. `/url/URLGetRankedKeywords`.
    pub fn path(self, kind: SourceKind) -> Result<String> {
        if !self.supports(kind) {
            return Err(AlchemyError::UnsupportedSource {
                operation: self.name(),
                kind,
            });
        }

        Ok(format!(
            "/{}/{}{}",
            kind.segment(),
            kind.call_prefix(),
            self.call_name()
        ))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
