//! Citation extraction and markdown formatting.
//!
//! A retrieved reference can carry its source URL in several places
//! depending on the data source type. [`UrlSource::PRIORITY`] lists the
//! places we look, in order; the first one yielding a usable value wins.
//!
//! Reference lines look like `- [<excerpt>...](<url>)`, where the excerpt is
//! the first line of the chunk text truncated to [`EXCERPT_MAX_CHARS`].

use std::collections::HashSet;

use humboldt_types::citation::{CitationGroup, RetrievedReference, SOURCE_URI_METADATA_KEY};
use humboldt_types::config::CitationConfig;
use humboldt_types::error::CitationError;
use tracing::debug;

/// Maximum number of characters kept from a chunk's first line.
pub const EXCERPT_MAX_CHARS: usize = 80;

/// A place inside a [`RetrievedReference`] that may hold the source URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    /// `location.webLocation.url` (web crawler data sources).
    WebLocation,
    /// `location.confluenceLocation.url`.
    ConfluenceLocation,
    /// `location.sharePointLocation.url`.
    SharePointLocation,
    /// `location.salesforceLocation.url`.
    SalesforceLocation,
    /// `metadata["x-amz-bedrock-kb-source-uri"]`.
    MetadataSourceUri,
    /// `location.s3Location.uri`; normally `s3://` and rejected by the HTTP filter.
    S3Location,
}

impl UrlSource {
    /// Extraction order.
    pub const PRIORITY: [UrlSource; 6] = [
        UrlSource::WebLocation,
        UrlSource::ConfluenceLocation,
        UrlSource::SharePointLocation,
        UrlSource::SalesforceLocation,
        UrlSource::MetadataSourceUri,
        UrlSource::S3Location,
    ];

    /// Read this source's URL from a reference. Blank values count as absent.
    pub fn extract<'a>(&self, reference: &'a RetrievedReference) -> Option<&'a str> {
        let location = reference.location.as_ref();
        let raw = match self {
            UrlSource::WebLocation => location?.web_location.as_ref()?.url.as_deref(),
            UrlSource::ConfluenceLocation => {
                location?.confluence_location.as_ref()?.url.as_deref()
            }
            UrlSource::SharePointLocation => {
                location?.share_point_location.as_ref()?.url.as_deref()
            }
            UrlSource::SalesforceLocation => {
                location?.salesforce_location.as_ref()?.url.as_deref()
            }
            UrlSource::MetadataSourceUri => reference.metadata_str(SOURCE_URI_METADATA_KEY),
            UrlSource::S3Location => location?.s3_location.as_ref()?.uri.as_deref(),
        }?;
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// First URL found by walking [`UrlSource::PRIORITY`].
pub fn resolve_url(reference: &RetrievedReference) -> Option<(UrlSource, &str)> {
    UrlSource::PRIORITY
        .iter()
        .find_map(|source| source.extract(reference).map(|url| (*source, url)))
}

/// Whether `url` parses as an absolute `http`/`https` URL with a host.
pub fn is_http_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}

/// Short excerpt of a chunk: first line of the trimmed text, trimmed again
/// and cut to [`EXCERPT_MAX_CHARS`] characters.
pub fn excerpt(text: &str) -> String {
    text.trim()
        .split('\n')
        .next()
        .unwrap_or_default()
        .trim()
        .chars()
        .take(EXCERPT_MAX_CHARS)
        .collect()
}

/// A citation that passed URL resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCitation {
    pub url: String,
    pub excerpt: String,
    pub source: UrlSource,
}

impl ResolvedCitation {
    /// Render as `- [<excerpt>...](<url>)`; an empty excerpt leaves `[...]`.
    pub fn to_markdown(&self) -> String {
        format!("- [{}...]({})", self.excerpt, self.url)
    }
}

/// Resolve a reference's URL and excerpt, reporting why it was rejected.
///
/// With `require_http`, sources holding a non-HTTP value are passed over and
/// the walk continues with the next source.
pub fn resolve_reference(
    reference: &RetrievedReference,
    require_http: bool,
) -> Result<ResolvedCitation, CitationError> {
    let accepted = UrlSource::PRIORITY.iter().find_map(|source| {
        source
            .extract(reference)
            .filter(|url| !require_http || is_http_url(url))
            .map(|url| (*source, url))
    });
    let (source, url) = match accepted {
        Some(found) => found,
        None => {
            return Err(match resolve_url(reference) {
                Some((_, rejected)) => CitationError::NonHttpUrl(rejected.to_string()),
                None => CitationError::NoResolvableUrl,
            });
        }
    };
    Ok(ResolvedCitation {
        url: url.to_string(),
        excerpt: excerpt(reference.text().unwrap_or_default()),
        source,
    })
}

/// Format a single reference as a markdown line, or `None` if no URL resolves.
///
/// No scheme check is applied here; see [`collect_references`] for the
/// filtered variant used on live responses.
pub fn format_reference(reference: &RetrievedReference) -> Option<String> {
    resolve_reference(reference, false)
        .ok()
        .map(|citation| citation.to_markdown())
}

/// Format every usable reference across all citation groups.
///
/// Iterates all references of every group (not just the first), applies the
/// HTTP filter from `config`, and drops repeated URLs keeping the first
/// occurrence. Rejected references are logged at debug level.
pub fn collect_references(groups: &[CitationGroup], config: &CitationConfig) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut lines = Vec::new();

    for (group_index, group) in groups.iter().enumerate() {
        for reference in &group.retrieved_references {
            match resolve_reference(reference, config.require_http_urls) {
                Ok(citation) => {
                    if seen.insert(citation.url.clone()) {
                        lines.push(citation.to_markdown());
                    }
                }
                Err(reason) => {
                    debug!(group = group_index, %reason, "Skipping citation");
                }
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use humboldt_types::citation::{ReferenceContent, ReferenceLocation, UriLocation, UrlLocation};
    use std::collections::HashMap;

    fn with_metadata_uri(uri: &str, text: &str) -> RetrievedReference {
        let mut metadata = HashMap::new();
        metadata.insert(
            SOURCE_URI_METADATA_KEY.to_string(),
            serde_json::Value::String(uri.to_string()),
        );
        RetrievedReference {
            content: Some(ReferenceContent {
                text: Some(text.to_string()),
            }),
            location: None,
            metadata: Some(metadata),
        }
    }

    fn with_s3(uri: &str) -> RetrievedReference {
        RetrievedReference {
            content: Some(ReferenceContent {
                text: Some("Board policy".to_string()),
            }),
            location: Some(ReferenceLocation {
                location_type: Some("S3".to_string()),
                s3_location: Some(UriLocation {
                    uri: Some(uri.to_string()),
                }),
                ..Default::default()
            }),
            metadata: None,
        }
    }

    #[test]
    fn test_format_reference_first_line_only() {
        let reference = RetrievedReference::web("https://x.edu/doc", "Line one\nLine two");
        assert_eq!(
            format_reference(&reference).as_deref(),
            Some("- [Line one...](https://x.edu/doc)")
        );
    }

    #[test]
    fn test_format_reference_without_url_is_none() {
        let reference = RetrievedReference {
            content: Some(ReferenceContent {
                text: Some("orphan chunk".to_string()),
            }),
            location: Some(ReferenceLocation::default()),
            metadata: Some(HashMap::new()),
        };
        assert_eq!(format_reference(&reference), None);
        assert_eq!(
            resolve_reference(&reference, false),
            Err(CitationError::NoResolvableUrl)
        );
    }

    #[test]
    fn test_excerpt_truncates_to_80_chars() {
        let long = "a".repeat(200);
        let reference = RetrievedReference::web("https://x.edu/long", long);
        let line = format_reference(&reference).unwrap();
        assert_eq!(line, format!("- [{}...](https://x.edu/long)", "a".repeat(80)));
    }

    #[test]
    fn test_excerpt_counts_chars_not_bytes() {
        let text = "é".repeat(100);
        assert_eq!(excerpt(&text).chars().count(), EXCERPT_MAX_CHARS);
    }

    #[test]
    fn test_excerpt_trims_leading_blank_lines() {
        assert_eq!(excerpt("\n\n   Funding guide  \nsecond"), "Funding guide");
    }

    #[test]
    fn test_web_location_beats_metadata() {
        let mut reference = RetrievedReference::web("https://web.edu/a", "text");
        let mut metadata = HashMap::new();
        metadata.insert(
            SOURCE_URI_METADATA_KEY.to_string(),
            serde_json::Value::String("https://meta.edu/b".to_string()),
        );
        reference.metadata = Some(metadata);

        let (source, url) = resolve_url(&reference).unwrap();
        assert_eq!(source, UrlSource::WebLocation);
        assert_eq!(url, "https://web.edu/a");
    }

    #[test]
    fn test_metadata_fallback_when_web_url_blank() {
        let mut reference = with_metadata_uri("https://meta.edu/b", "Minutes of March");
        reference.location = Some(ReferenceLocation {
            web_location: Some(UrlLocation {
                url: Some("   ".to_string()),
            }),
            ..Default::default()
        });

        let (source, url) = resolve_url(&reference).unwrap();
        assert_eq!(source, UrlSource::MetadataSourceUri);
        assert_eq!(url, "https://meta.edu/b");
    }

    #[test]
    fn test_http_filter_rejects_s3_uris() {
        let reference = with_s3("s3://research-docs/policy.pdf");
        assert_eq!(
            resolve_reference(&reference, true),
            Err(CitationError::NonHttpUrl(
                "s3://research-docs/policy.pdf".to_string()
            ))
        );
        // Without the filter the raw URI is used.
        assert_eq!(
            format_reference(&reference).as_deref(),
            Some("- [Board policy...](s3://research-docs/policy.pdf)")
        );
    }

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("https://x.edu/doc"));
        assert!(is_http_url("http://x.edu"));
        assert!(!is_http_url("s3://bucket/key"));
        assert!(!is_http_url("x.edu/doc"));
        assert!(!is_http_url("https://"));
    }

    #[test]
    fn test_empty_excerpt_keeps_bare_ellipsis_label() {
        let reference = with_metadata_uri("https://x.edu/doc", "   ");
        assert_eq!(
            format_reference(&reference).as_deref(),
            Some("- [...](https://x.edu/doc)")
        );
        assert_eq!(
            format_reference(&RetrievedReference::web("https://x.edu/doc", "")).as_deref(),
            Some("- [...](https://x.edu/doc)")
        );
    }

    #[test]
    fn test_http_filter_falls_through_to_next_source() {
        let mut reference = with_metadata_uri("https://x.edu/policy", "Travel policy");
        reference.location = Some(ReferenceLocation {
            web_location: Some(UrlLocation {
                url: Some("ftp://mirror/policy".to_string()),
            }),
            ..Default::default()
        });

        let citation = resolve_reference(&reference, true).unwrap();
        assert_eq!(citation.source, UrlSource::MetadataSourceUri);
        assert_eq!(citation.url, "https://x.edu/policy");

        let config = CitationConfig::default();
        let lines = collect_references(
            &[CitationGroup {
                retrieved_references: vec![reference.clone()],
            }],
            &config,
        );
        assert_eq!(lines, vec!["- [Travel policy...](https://x.edu/policy)"]);

        // Unfiltered, the highest-priority value still wins.
        assert_eq!(
            resolve_reference(&reference, false).unwrap().url,
            "ftp://mirror/policy"
        );
    }

    #[test]
    fn test_collect_iterates_all_references_and_dedupes() {
        let groups = vec![
            CitationGroup {
                retrieved_references: vec![
                    RetrievedReference::web("https://x.edu/a", "A"),
                    RetrievedReference::web("https://x.edu/b", "B"),
                ],
            },
            CitationGroup {
                retrieved_references: vec![
                    RetrievedReference::web("https://x.edu/a", "A again"),
                    with_s3("s3://bucket/c.pdf"),
                    RetrievedReference::default(),
                ],
            },
            CitationGroup::default(),
        ];

        let lines = collect_references(&groups, &CitationConfig::default());
        assert_eq!(
            lines,
            vec![
                "- [A...](https://x.edu/a)".to_string(),
                "- [B...](https://x.edu/b)".to_string(),
            ]
        );

        let unfiltered = collect_references(
            &groups,
            &CitationConfig {
                require_http_urls: false,
            },
        );
        assert_eq!(unfiltered.len(), 3);
        assert_eq!(unfiltered[2], "- [Board policy...](s3://bucket/c.pdf)");
    }
}
