//! Citation extraction from grounding metadata.

use grocywise_core::{GroundingSource, SearchAffordance};
use grocywise_gemini::GroundingMetadata;

/// Title used for a cited page the service did not name.
pub const FALLBACK_SOURCE_TITLE: &str = "Search Reference";

/// Sources and the optional search-suggestion widget for one response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grounding {
    pub sources: Vec<GroundingSource>,
    pub search_affordance: Option<SearchAffordance>,
}

/// Pull cited web sources and the rendered search affordance out of the
/// service's grounding metadata.
///
/// Chunks without a web URI are skipped; order is preserved and duplicates
/// are kept. Missing metadata yields an empty [`Grounding`].
#[must_use]
pub fn extract_grounding(metadata: Option<&GroundingMetadata>) -> Grounding {
    let Some(metadata) = metadata else {
        return Grounding::default();
    };

    let sources = metadata
        .grounding_chunks
        .iter()
        .flatten()
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| {
            let uri = web.uri.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
            let title = web
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(FALLBACK_SOURCE_TITLE);
            Some(GroundingSource {
                title: title.to_string(),
                uri: uri.to_string(),
            })
        })
        .collect();

    let search_affordance = metadata
        .search_entry_point
        .as_ref()
        .and_then(|entry| entry.rendered_content.clone())
        .filter(|markup| !markup.trim().is_empty())
        .map(SearchAffordance::new);

    Grounding {
        sources,
        search_affordance,
    }
}
