//! Citation records returned alongside a generated answer.
//!
//! These mirror the `citations[].retrievedReferences[]` shape of the
//! RetrieveAndGenerate response. Every field is optional: the service omits
//! whatever does not apply to a given data source, so extraction code must
//! treat each nested level as possibly absent.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Metadata key under which Bedrock knowledge bases store the source document URI.
pub const SOURCE_URI_METADATA_KEY: &str = "x-amz-bedrock-kb-source-uri";

/// Deserialize a list that the service may send as `null`; `null` reads as empty.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One retrieved-reference cluster pointing back to source documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationGroup {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub retrieved_references: Vec<RetrievedReference>,
}

/// A single source document chunk cited by the answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievedReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ReferenceContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ReferenceLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Where a cited chunk came from. At most one sub-location is normally set,
/// matching `type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceLocation {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_location: Option<UrlLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confluence_location: Option<UrlLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_point_location: Option<UrlLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salesforce_location: Option<UrlLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_location: Option<UriLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UriLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl RetrievedReference {
    /// Convenience constructor for a web-located chunk.
    pub fn web(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            content: Some(ReferenceContent {
                text: Some(text.into()),
            }),
            location: Some(ReferenceLocation {
                location_type: Some("WEB".to_string()),
                web_location: Some(UrlLocation {
                    url: Some(url.into()),
                }),
                ..Default::default()
            }),
            metadata: None,
        }
    }

    /// The chunk's text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.content.as_ref()?.text.as_deref()
    }

    /// A string-valued metadata entry, if present.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.as_ref()?.get(key)?.as_str()
    }
}

/// Outcome of a knowledge-base query: the answer plus formatted reference lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    pub answer_text: String,
    /// Markdown reference lines (`- [excerpt...](url)`), possibly empty.
    pub references: Vec<String>,
}
