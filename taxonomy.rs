use crate::models::{Tag, TagGroup};
use crate::normalize::normalize;
use std::collections::{HashMap, HashSet};

/// Group whose tags drive the single-select primary tabs.
pub const TIPO_GROUP_ID: &str = "tipo";

/// Synthetic tab id bucketing "tipo" tags beyond the primary three.
pub const OTHER_TAB_ID: &str = "other";

/// Reserved group id for tag ids referenced by photos but absent from
/// the current taxonomy.
pub const UNKNOWN_GROUP_ID: &str = "unknown";

/// Positional convention over externally curated data: the first
/// three "tipo" tags become tabs. Arbitrary but load-bearing.
pub const PRIMARY_TAB_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSpec {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTag {
    pub name: String,
    pub group_id: String,
}

/// Lookup structures flattened from the grouped taxonomy. Built once
/// per taxonomy snapshot and rebuilt whenever the snapshot changes
/// (e.g. on a language switch).
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    groups: Vec<TagGroup>,
    group_pos: HashMap<String, usize>,
    /// tag id -> (display name, normalized name, owning group id)
    tag_lookup: HashMap<String, (String, String, String)>,
    other_ids: HashSet<String>,
    tabs: Vec<TabSpec>,
}

impl TagIndex {
    pub fn build(groups: Vec<TagGroup>) -> Self {
        let mut group_pos = HashMap::new();
        let mut tag_lookup = HashMap::new();
        for (pos, group) in groups.iter().enumerate() {
            if group_pos.insert(group.id.clone(), pos).is_some() {
                log::warn!("Duplicate tag group id '{}'; keeping the last one", group.id);
            }
            for tag in &group.tags {
                tag_lookup.insert(
                    tag.id.clone(),
                    (tag.name.clone(), normalize(&tag.name), group.id.clone()),
                );
            }
        }

        let tipo_tags: &[Tag] = group_pos
            .get(TIPO_GROUP_ID)
            .map(|&pos| groups[pos].tags.as_slice())
            .unwrap_or_default();
        let mut tabs: Vec<TabSpec> = tipo_tags
            .iter()
            .take(PRIMARY_TAB_COUNT)
            .map(|tag| TabSpec {
                id: tag.id.clone(),
                label: tag.name.clone(),
            })
            .collect();
        let other_ids: HashSet<String> = tipo_tags
            .iter()
            .skip(PRIMARY_TAB_COUNT)
            .map(|tag| tag.id.clone())
            .collect();
        if !other_ids.is_empty() {
            tabs.push(TabSpec {
                id: OTHER_TAB_ID.to_string(),
                label: OTHER_TAB_ID.to_string(),
            });
        }

        Self {
            groups,
            group_pos,
            tag_lookup,
            other_ids,
            tabs,
        }
    }

    pub fn tags_of(&self, group_id: &str) -> &[Tag] {
        self.group_pos
            .get(group_id)
            .map(|&pos| self.groups[pos].tags.as_slice())
            .unwrap_or_default()
    }

    /// Display name of a group; unknown ids fall back to the raw id.
    pub fn group_name<'a>(&'a self, group_id: &'a str) -> &'a str {
        self.group_pos
            .get(group_id)
            .map(|&pos| self.groups[pos].name.as_str())
            .unwrap_or(group_id)
    }

    /// Facet groups in curated order, "tipo" excluded (it is the tab
    /// dimension, not a facet).
    pub fn facet_groups(&self) -> impl Iterator<Item = &TagGroup> {
        self.groups.iter().filter(|g| g.id != TIPO_GROUP_ID)
    }

    /// Primary classification tabs: the first three "tipo" tags, plus
    /// the synthetic other tab when further tags exist.
    pub fn primary_tabs(&self) -> &[TabSpec] {
        &self.tabs
    }

    /// Ids of "tipo" tags folded into the synthetic other tab.
    pub fn other_tag_ids(&self) -> &HashSet<String> {
        &self.other_ids
    }

    /// Cross-group lookup tolerating stale references: ids not found
    /// in any group come back with the raw id as display name under
    /// the reserved unknown group.
    pub fn resolve_tag(&self, tag_id: &str) -> ResolvedTag {
        match self.tag_lookup.get(tag_id) {
            Some((name, _, group_id)) => ResolvedTag {
                name: name.clone(),
                group_id: group_id.clone(),
            },
            None => ResolvedTag {
                name: tag_id.to_string(),
                group_id: UNKNOWN_GROUP_ID.to_string(),
            },
        }
    }

    /// Pre-normalized tag name for text search. Orphan tags have no
    /// taxonomy name and are not searchable by name.
    pub fn normalized_name_of(&self, tag_id: &str) -> Option<&str> {
        self.tag_lookup
            .get(tag_id)
            .map(|(_, normalized, _)| normalized.as_str())
    }
}
