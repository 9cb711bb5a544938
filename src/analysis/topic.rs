//! Nearest-heading topic lookup.

use std::collections::BTreeMap;

use crate::model::{HeadingEntry, NO_TOPIC};

/// Page number to topic heading text, holding only H1/H2 entries.
pub type TopicMap = BTreeMap<u32, String>;

/// Build the topic map from an outline.
///
/// When a page carries several H1/H2 headings the last one in outline order
/// wins.
pub fn topic_map(outline: &[HeadingEntry]) -> TopicMap {
    let mut map = TopicMap::new();
    for entry in outline.iter().filter(|e| e.level.is_topic()) {
        map.insert(entry.page, entry.text.clone());
    }
    map
}

/// Topic for a page: the heading of the nearest page at or before `page`
/// that has one, or [`NO_TOPIC`].
pub fn topic_for_page(page: u32, heading_by_page: &TopicMap) -> &str {
    if page == 0 {
        return NO_TOPIC;
    }
    heading_by_page
        .range(1..=page)
        .next_back()
        .map(|(_, text)| text.as_str())
        .unwrap_or(NO_TOPIC)
}
