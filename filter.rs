use crate::models::{FilterState, Photo};
use crate::normalize::normalize;
use crate::taxonomy::{TagIndex, OTHER_TAB_ID, TIPO_GROUP_ID};

/// Narrows a catalog snapshot to the photos matching `state`.
///
/// Stages run in sequence, each over the survivors of the previous
/// one: active tab, then facet selections, then free-text search.
/// Within a facet the selected tags combine with OR; non-empty facets
/// compose with AND. Catalog order is preserved and nothing is
/// fabricated or duplicated, so the result is always a subset of
/// `photos` and re-filtering is idempotent.
pub fn filter<'a>(photos: &'a [Photo], state: &FilterState, index: &TagIndex) -> Vec<&'a Photo> {
    let mut kept: Vec<&Photo> = photos.iter().collect();

    match state.active_tab.as_deref() {
        None => {}
        Some(OTHER_TAB_ID) => {
            let other = index.other_tag_ids();
            kept.retain(|photo| photo.tags.iter().any(|t| other.contains(t)));
        }
        Some(tab_id) => {
            kept.retain(|photo| photo.has_tag(tab_id));
        }
    }

    for (group_id, selected) in state.facets.active_groups() {
        // "tipo" is tab-driven; a stray entry for it must not
        // double-filter.
        if group_id == TIPO_GROUP_ID {
            continue;
        }
        kept.retain(|photo| photo.tags.iter().any(|t| selected.contains(t)));
    }

    let query = normalize(state.search_query.trim());
    if !query.is_empty() {
        kept.retain(|photo| {
            if normalize(&photo.text).contains(&query) {
                return true;
            }
            // Orphan tags have no taxonomy name and never match.
            photo.tags.iter().any(|t| {
                index
                    .normalized_name_of(t)
                    .map_or(false, |name| name.contains(&query))
            })
        });
    }

    kept
}
