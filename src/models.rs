//! Response models for AlchemyLanguage calls.
//!
//! The service encodes most numbers as JSON strings (`"relevance": "0.93"`),
//! so numeric fields accept either form. Anything that does not parse is a
//! decode error; nothing is coerced to a default.

use crate::endpoint::Operation;
use crate::error::{AlchemyError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Decode a raw response body for `operation`.
///
/// A body carrying `"status": "ERROR"` is reported as
/// [`AlchemyError::Service`]; any other body must match `T` exactly.
pub fn decode<T: DeserializeOwned>(operation: Operation, body: &str) -> Result<T> {
    let decode_err = |source| AlchemyError::Decode {
        operation: operation.name(),
        source,
    };

    let value: Value = serde_json::from_str(body).map_err(decode_err)?;

    if value.get("status").and_then(Value::as_str) == Some("ERROR") {
        let status_info = value
            .get("statusInfo")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        warn!(operation = operation.name(), status_info = %status_info, "Service reported an error");
        return Err(AlchemyError::Service {
            operation: operation.name(),
            status_info,
        });
    }

    serde_json::from_value(value).map_err(decode_err)
}

/// Numbers the service may send either as JSON numbers or as strings.
mod lenient {
    use serde::de::{self, Deserializer};
    use serde::Deserialize;
    use std::fmt::Display;
    use std::str::FromStr;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString<T> {
        Number(T),
        String(String),
    }

    pub fn number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr + Deserialize<'de>,
        T::Err: Display,
    {
        match Option::<NumberOrString<T>>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrString::Number(n)) => Ok(Some(n)),
            Some(NumberOrString::String(s)) => s.trim().parse().map(Some).map_err(de::Error::custom),
        }
    }

    pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Int(u8),
            String(String),
        }

        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Bool(b)) => Ok(Some(b)),
            Some(Raw::Int(0)) => Ok(Some(false)),
            Some(Raw::Int(1)) => Ok(Some(true)),
            Some(Raw::String(s)) => match s.as_str() {
                "0" | "false" | "no" => Ok(Some(false)),
                "1" | "true" | "yes" => Ok(Some(true)),
                other => Err(de::Error::custom(format!("invalid flag '{other}'"))),
            },
            Some(Raw::Int(n)) => Err(de::Error::custom(format!("invalid flag '{n}'"))),
        }
    }
}

/// Status fields the service attaches to every response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// `OK` for successful calls.
    pub status: String,
    /// Terms of use notice.
    #[serde(default)]
    pub usage: Option<String>,
    /// URL the content was fetched from, if any.
    #[serde(default)]
    pub url: Option<String>,
    /// Detected document language.
    #[serde(default)]
    pub language: Option<String>,
    /// Number of API transactions the call consumed.
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_transactions: Option<u32>,
}

/// Sentiment polarity and strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// `positive`, `negative` or `neutral`.
    #[serde(rename = "type")]
    pub sentiment_type: String,
    /// Strength, from -1.0 to 1.0. Absent for neutral sentiment.
    #[serde(default, deserialize_with = "lenient::number")]
    pub score: Option<f64>,
    /// Whether both positive and negative sentiment were found.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub mixed: Option<bool>,
}

/// Knowledge graph placement of an entity, keyword or concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeGraph {
    /// Slash-separated type hierarchy, e.g. `/people/politicians`.
    pub type_hierarchy: String,
}

/// Linked data resources for a disambiguated entity or concept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct LinkedData {
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub geo: Option<String>,
    #[serde(default)]
    pub dbpedia: Option<String>,
    #[serde(default)]
    pub freebase: Option<String>,
    #[serde(default)]
    pub yago: Option<String>,
    #[serde(default)]
    pub opencyc: Option<String>,
    #[serde(default)]
    pub umbel: Option<String>,
    #[serde(default)]
    pub cia_factbook: Option<String>,
    #[serde(default)]
    pub census: Option<String>,
    #[serde(default)]
    pub geonames: Option<String>,
    #[serde(default)]
    pub music_brainz: Option<String>,
    #[serde(default)]
    pub crunchbase: Option<String>,
}

/// Disambiguation details for an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disambiguated {
    /// Canonical entity name.
    #[serde(default)]
    pub name: Option<String>,
    /// Entity subtypes, e.g. `Politician`.
    #[serde(default)]
    pub sub_type: Vec<String>,
    /// Linked data resources.
    #[serde(flatten)]
    pub links: LinkedData,
}

/// A quotation attributed to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    /// The quoted text.
    pub quotation: String,
}

/// A named entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Entity type, e.g. `Person` or `City`.
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Relevance, from 0.0 to 1.0.
    #[serde(default, deserialize_with = "lenient::number")]
    pub relevance: Option<f64>,
    /// Number of mentions.
    #[serde(default, deserialize_with = "lenient::number")]
    pub count: Option<u32>,
    /// Entity text as it appears in the document.
    pub text: String,
    /// Knowledge graph placement.
    #[serde(default)]
    pub knowledge_graph: Option<KnowledgeGraph>,
    /// Disambiguation details.
    #[serde(default)]
    pub disambiguated: Option<Disambiguated>,
    /// Quotations attributed to the entity.
    #[serde(default)]
    pub quotations: Vec<Quotation>,
    /// Sentiment towards the entity.
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
}

/// Result of entity extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    /// Response status.
    #[serde(flatten)]
    pub envelope: Envelope,
    /// Analyzed text, when `showSourceText` was set.
    #[serde(default)]
    pub text: Option<String>,
    /// Extracted entities, most relevant first.
    pub entities: Vec<Entity>,
}

/// Sentiment towards one target phrase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetedSentiment {
    /// The target phrase.
    pub text: String,
    /// Sentiment towards it.
    pub sentiment: Sentiment,
}

/// Result of sentiment analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResponse {
    /// Response status.
    #[serde(flatten)]
    pub envelope: Envelope,
    /// Analyzed text, when `showSourceText` was set.
    #[serde(default)]
    pub text: Option<String>,
    /// Document-level sentiment.
    #[serde(default)]
    pub doc_sentiment: Option<Sentiment>,
    /// Per-target sentiment for targeted calls.
    #[serde(default)]
    pub results: Option<Vec<TargetedSentiment>>,
}

/// A ranked keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
    /// Keyword text.
    pub text: String,
    /// Relevance, from 0.0 to 1.0.
    #[serde(default, deserialize_with = "lenient::number")]
    pub relevance: Option<f64>,
    /// Knowledge graph placement.
    #[serde(default)]
    pub knowledge_graph: Option<KnowledgeGraph>,
    /// Sentiment towards the keyword.
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
}

/// Result of keyword extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keywords {
    /// Response status.
    #[serde(flatten)]
    pub envelope: Envelope,
    /// Analyzed text, when `showSourceText` was set.
    #[serde(default)]
    pub text: Option<String>,
    /// Extracted keywords, most relevant first.
    pub keywords: Vec<Keyword>,
}

/// A tagged concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    /// Concept name.
    pub text: String,
    /// Relevance, from 0.0 to 1.0.
    #[serde(default, deserialize_with = "lenient::number")]
    pub relevance: Option<f64>,
    /// Knowledge graph placement.
    #[serde(default)]
    pub knowledge_graph: Option<KnowledgeGraph>,
    /// Linked data resources.
    #[serde(flatten)]
    pub links: LinkedData,
}

/// Result of concept tagging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptResponse {
    /// Response status.
    #[serde(flatten)]
    pub envelope: Envelope,
    /// Analyzed text, when `showSourceText` was set.
    #[serde(default)]
    pub text: Option<String>,
    /// Tagged concepts, most relevant first.
    pub concepts: Vec<Concept>,
}

/// An entity found inside a relation component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationEntity {
    /// Entity text.
    pub text: String,
    /// Entity type.
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Disambiguation details.
    #[serde(default)]
    pub disambiguated: Option<Disambiguated>,
}

/// Subject of a relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationSubject {
    /// Subject text.
    pub text: String,
    /// Sentiment of the subject.
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    /// Entities in the subject.
    #[serde(default)]
    pub entities: Vec<RelationEntity>,
    /// Keywords in the subject.
    #[serde(default)]
    pub keywords: Vec<Keyword>,
}

/// The verb of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verb {
    /// Verb text.
    pub text: String,
    /// `past`, `present` or `future`.
    #[serde(default)]
    pub tense: Option<String>,
    /// Whether the verb is negated.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub negated: Option<bool>,
}

/// Action of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationAction {
    /// Action text.
    pub text: String,
    /// Lemmatized action text.
    #[serde(default)]
    pub lemmatized: Option<String>,
    /// The main verb.
    #[serde(default)]
    pub verb: Option<Verb>,
}

/// Object of a relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationObject {
    /// Object text.
    pub text: String,
    /// Sentiment of the object.
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    /// Sentiment the subject expresses towards the object.
    #[serde(default)]
    pub sentiment_from_subject: Option<Sentiment>,
    /// Entities in the object.
    #[serde(default)]
    pub entities: Vec<RelationEntity>,
    /// Keywords in the object.
    #[serde(default)]
    pub keywords: Vec<Keyword>,
}

/// Location of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationLocation {
    /// Location text.
    pub text: String,
    /// Entities in the location.
    #[serde(default)]
    pub entities: Vec<RelationEntity>,
}

/// Normalized time expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct DecodedTime {
    #[serde(rename = "type")]
    pub time_type: String,
    pub value: String,
}

/// Time of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationTemporal {
    /// Time expression as written.
    pub text: String,
    /// Normalized form.
    #[serde(default)]
    pub decoded: Option<DecodedTime>,
}

/// A subject-action-object relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SAORelation {
    /// Sentence the relation was found in.
    pub sentence: String,
    #[allow(missing_docs)]
    #[serde(default)]
    pub subject: Option<RelationSubject>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub action: Option<RelationAction>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub object: Option<RelationObject>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub location: Option<RelationLocation>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub temporal: Option<RelationTemporal>,
}

/// Result of relation extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SAORelations {
    /// Response status.
    #[serde(flatten)]
    pub envelope: Envelope,
    /// Analyzed text, when `showSourceText` was set.
    #[serde(default)]
    pub text: Option<String>,
    /// Extracted relations.
    pub relations: Vec<SAORelation>,
}

/// A taxonomy category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Category path, e.g. `/art and entertainment/music`.
    pub label: String,
    /// Confidence score, from 0.0 to 1.0.
    #[serde(default, deserialize_with = "lenient::number")]
    pub score: Option<f64>,
    /// `no` when the service is unsure of the category.
    #[serde(default)]
    pub confident: Option<String>,
}

/// Result of taxonomy classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomies {
    /// Response status.
    #[serde(flatten)]
    pub envelope: Envelope,
    /// Analyzed text, when requested.
    #[serde(default)]
    pub text: Option<String>,
    /// Categories, most likely first.
    pub taxonomy: Vec<Taxonomy>,
}

/// Result of language detection.
///
/// Does not flatten [`Envelope`]: `language` is required here, while the
/// envelope treats it as optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    /// Response status.
    pub status: String,
    /// Terms of use notice.
    #[serde(default)]
    pub usage: Option<String>,
    /// URL the content was fetched from, if any.
    #[serde(default)]
    pub url: Option<String>,
    /// Detected language name, e.g. `french`.
    pub language: String,
    /// ISO 639-1 code, e.g. `fr`.
    #[serde(rename = "iso-639-1", default)]
    pub iso_639_1: Option<String>,
    /// ISO 639-2 code.
    #[serde(rename = "iso-639-2", default)]
    pub iso_639_2: Option<String>,
    /// ISO 639-3 code.
    #[serde(rename = "iso-639-3", default)]
    pub iso_639_3: Option<String>,
    /// Ethnologue reference URL.
    #[serde(default)]
    pub ethnologue: Option<String>,
    /// Estimated number of native speakers.
    #[serde(rename = "native-speakers", default)]
    pub native_speakers: Option<String>,
    /// Wikipedia article URL.
    #[serde(default)]
    pub wikipedia: Option<String>,
}

impl Language {
    /// The shortest ISO 639 code available.
    pub fn code(&self) -> Option<&str> {
        self.iso_639_1
            .as_deref()
            .or(self.iso_639_2.as_deref())
            .or(self.iso_639_3.as_deref())
    }
}

/// Extracted page text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentText {
    /// Response status.
    #[serde(flatten)]
    pub envelope: Envelope,
    /// The extracted text. Absent for title calls.
    #[serde(default)]
    pub text: Option<String>,
}

/// Extracted page title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTitle {
    /// Response status.
    #[serde(flatten)]
    pub envelope: Envelope,
    /// The extracted title. Absent for text calls.
    #[serde(default)]
    pub title: Option<String>,
}

/// Text and title views of one text extraction response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedText {
    #[allow(missing_docs)]
    pub text: DocumentText,
    #[allow(missing_docs)]
    pub title: DocumentTitle,
}

/// Authors found on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authors {
    /// `no` when the service is unsure.
    #[serde(default)]
    pub confident: Option<String>,
    /// Author names.
    #[serde(default)]
    pub names: Vec<String>,
}

/// Result of author extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAuthors {
    /// Response status.
    #[serde(flatten)]
    pub envelope: Envelope,
    #[allow(missing_docs)]
    pub authors: Authors,
}

/// One microformat field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Microformat {
    pub field: String,
    pub data: String,
}

/// Result of microformats parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Microformats {
    /// Response status.
    #[serde(flatten)]
    pub envelope: Envelope,
    #[allow(missing_docs)]
    pub microformats: Vec<Microformat>,
}

/// A detected RSS or ATOM feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    /// Feed URL.
    pub feed: String,
}

/// Result of feed detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feeds {
    /// Response status.
    #[serde(flatten)]
    pub envelope: Envelope,
    #[allow(missing_docs)]
    pub feeds: Vec<Feed>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::SentimentType;

    #[test]
    fn test_decode_language() {
        let body = r#"{
            "status": "OK",
            "usage": "By accessing AlchemyAPI or using information generated by AlchemyAPI, you are agreeing to be bound by the AlchemyAPI Terms of Use",
            "url": "",
            "language": "french",
            "iso-639-1": "fr",
            "iso-639-2": "fre",
            "iso-639-3": "fra",
            "ethnologue": "http://www.ethnologue.com/show_language.asp?code=fra",
            "native-speakers": "77 million",
            "wikipedia": "http://en.wikipedia.org/wiki/French_language"
        }"#;

        let language: Language = decode(Operation::Language, body).unwrap();
        assert_eq!(language.language, "french");
        assert_eq!(language.code(), Some("fr"));
        assert_eq!(language.native_speakers.as_deref(), Some("77 million"));
    }

    #[test]
    fn test_decode_entities_with_string_numbers() {
        let body = r#"{
            "status": "OK",
            "language": "english",
            "totalTransactions": "2",
            "entities": [{
                "type": "Person",
                "relevance": "0.911",
                "count": "3",
                "text": "Barack Obama",
                "knowledgeGraph": {"typeHierarchy": "/people/politicians/barack obama"},
                "disambiguated": {
                    "name": "Barack Obama",
                    "subType": ["Politician", "President"],
                    "dbpedia": "http://dbpedia.org/resource/Barack_Obama",
                    "ciaFactbook": "http://example.test/cia"
                },
                "quotations": [{"quotation": "Yes we can"}],
                "sentiment": {"type": "positive", "score": "0.42", "mixed": "1"}
            }]
        }"#;

        let entities: Entities = decode(Operation::Entities, body).unwrap();
        assert_eq!(entities.envelope.total_transactions, Some(2));
        assert_eq!(entities.envelope.language.as_deref(), Some("english"));

        let entity = &entities.entities[0];
        assert_eq!(entity.entity_type, "Person");
        assert_eq!(entity.relevance, Some(0.911));
        assert_eq!(entity.count, Some(3));
        assert_eq!(entity.quotations[0].quotation, "Yes we can");

        let disambiguated = entity.disambiguated.as_ref().unwrap();
        assert_eq!(disambiguated.sub_type.len(), 2);
        assert_eq!(
            disambiguated.links.cia_factbook.as_deref(),
            Some("http://example.test/cia")
        );

        let sentiment = entity.sentiment.as_ref().unwrap();
        assert_eq!(sentiment.score, Some(0.42));
        assert_eq!(sentiment.mixed, Some(true));
    }

    #[test]
    fn test_decode_targeted_sentiment() {
        let body = r#"{
            "status": "OK",
            "results": [
                {"text": "Paris", "sentiment": {"type": "positive", "score": 0.7}},
                {"text": "London", "sentiment": {"type": "neutral"}}
            ]
        }"#;

        let response: SentimentResponse =
            decode(Operation::Sentiment(SentimentType::Targeted), body).unwrap();
        let results = response.results.unwrap();
        assert!(response.doc_sentiment.is_none());
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].sentiment.score, None);
    }

    #[test]
    fn test_decode_relations() {
        let body = r#"{
            "status": "OK",
            "relations": [{
                "sentence": "Bob ate the cake yesterday.",
                "subject": {"text": "Bob", "entities": [{"type": "Person", "text": "Bob"}]},
                "action": {"text": "ate", "lemmatized": "eat",
                           "verb": {"text": "eat", "tense": "past", "negated": "0"}},
                "object": {"text": "the cake"},
                "temporal": {"text": "yesterday", "decoded": {"type": "date", "value": "20151101T000000"}}
            }]
        }"#;

        let relations: SAORelations = decode(Operation::Relations, body).unwrap();
        let relation = &relations.relations[0];
        let verb = relation.action.as_ref().unwrap().verb.as_ref().unwrap();
        assert_eq!(verb.negated, Some(false));
        assert_eq!(relation.subject.as_ref().unwrap().entities[0].entity_type, "Person");
        assert_eq!(
            relation.temporal.as_ref().unwrap().decoded.as_ref().unwrap().time_type,
            "date"
        );
    }

    #[test]
    fn test_service_error_status() {
        let body = r#"{"status": "ERROR", "statusInfo": "invalid-api-key"}"#;
        let err = decode::<Language>(Operation::Language, body).unwrap_err();

        match err {
            AlchemyError::Service {
                operation,
                status_info,
            } => {
                assert_eq!(operation, "language");
                assert_eq!(status_info, "invalid-api-key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_schema_mismatch_is_decode_error() {
        // `taxonomy` must be a list.
        let body = r#"{"status": "OK", "taxonomy": "arts"}"#;
        let err = decode::<Taxonomies>(Operation::Taxonomy, body).unwrap_err();
        assert!(err.is_decode());

        let err = decode::<Feeds>(Operation::Feeds, "not json").unwrap_err();
        assert!(err.is_decode());

        let body = r#"{"status": "OK", "keywords": [{"text": "x", "relevance": "high"}]}"#;
        let err = decode::<Keywords>(Operation::Keywords, body).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_missing_required_field_is_decode_error() {
        let body = r#"{"status": "OK"}"#;
        let err = decode::<Microformats>(Operation::Microformats, body).unwrap_err();
        assert!(err.is_decode());
    }
}
