//! Client-side tag grouping for the browse screen.
//!
//! Turns a flat item list plus the known-tag vocabulary into colored, iconed
//! groups sorted by size. Derived data only; recomputed on every change and
//! never persisted.

use crate::models::ContentItem;

/// Synthetic bucket for items carrying no tags.
pub const UNTAGGED: &str = "untagged";

/// Palette indexed by the char-code sum of the tag name. Two tags may share
/// a color; accepted.
const PALETTE: &[&str] = &[
    "#E74C3C", "#3498DB", "#2ECC71", "#9B59B6", "#F39C12", "#1ABC9C", "#E67E22", "#34495E",
];

/// Category → icon names (ionicon-style, as the mobile clients use).
const ICON_TABLE: &[(&str, &str)] = &[
    ("technology", "laptop-outline"),
    ("science", "flask-outline"),
    ("business", "briefcase-outline"),
    ("finance", "cash-outline"),
    ("health", "fitness-outline"),
    ("education", "school-outline"),
    ("entertainment", "film-outline"),
    ("sports", "trophy-outline"),
    ("travel", "airplane-outline"),
    ("food", "restaurant-outline"),
    ("music", "musical-notes-outline"),
    ("news", "newspaper-outline"),
    ("art", "color-palette-outline"),
    ("untagged", "pricetag-outline"),
];

const DEFAULT_ICON: &str = "bookmark-outline";

/// A group of items sharing one tag.
#[derive(Debug, Clone)]
pub struct TagGroup {
    pub tag: String,
    pub items: Vec<ContentItem>,
    pub color: &'static str,
    pub icon: &'static str,
}

/// Deterministic color for a tag name.
pub fn tag_color(tag: &str) -> &'static str {
    let sum: usize = tag.chars().map(|c| c as usize).sum();
    PALETTE[sum % PALETTE.len()]
}

/// Icon for a tag: exact case-insensitive category match, then substring
/// match in either direction, then the default.
pub fn tag_icon(tag: &str) -> &'static str {
    let needle = tag.to_lowercase();
    for (category, icon) in ICON_TABLE {
        if *category == needle {
            return icon;
        }
    }
    for (category, icon) in ICON_TABLE {
        if category.contains(&needle) || needle.contains(category) {
            return icon;
        }
    }
    DEFAULT_ICON
}

/// Group items by tag.
///
/// An item with N tags lands in all N groups (intentional fan-out); items
/// with no tags land in the synthetic `untagged` bucket. Groups are sorted
/// by item count descending with first-encountered order breaking ties.
/// Empty `items` or an empty known-tag vocabulary yields no groups.
pub fn group_by_tag(items: &[ContentItem], tags: &[String]) -> Vec<TagGroup> {
    if items.is_empty() || tags.is_empty() {
        return Vec::new();
    }

    // Buckets in first-encountered order. Linear scans are fine at the item
    // counts a session holds.
    let mut buckets: Vec<(String, Vec<ContentItem>)> = Vec::new();

    let push = |tag: &str, item: &ContentItem, buckets: &mut Vec<(String, Vec<ContentItem>)>| {
        if let Some((_, bucket)) = buckets.iter_mut().find(|(name, _)| name == tag) {
            bucket.push(item.clone());
        } else {
            buckets.push((tag.to_string(), vec![item.clone()]));
        }
    };

    for item in items {
        if item.tags.is_empty() {
            push(UNTAGGED, item, &mut buckets);
        } else {
            for tag in &item.tags {
                push(tag, item, &mut buckets);
            }
        }
    }

    let mut groups: Vec<TagGroup> = buckets
        .into_iter()
        .map(|(tag, items)| {
            let color = tag_color(&tag);
            let icon = tag_icon(&tag);
            TagGroup {
                tag,
                items,
                color,
                icon,
            }
        })
        .collect();

    // Stable sort keeps first-encountered order for equal counts.
    groups.sort_by(|a, b| b.items.len().cmp(&a.items.len()));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, tags: &[&str]) -> ContentItem {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("item {id}"),
            "tags": tags,
        }))
        .unwrap()
    }

    #[test]
    fn test_descending_groups_with_untagged_bucket() {
        let items = vec![
            item("1", &["ai", "tech"]),
            item("2", &["tech"]),
            item("3", &[]),
        ];
        let tags = vec!["ai".to_string(), "tech".to_string()];

        let groups = group_by_tag(&items, &tags);
        let names: Vec<&str> = groups.iter().map(|g| g.tag.as_str()).collect();
        assert_eq!(names, vec!["tech", "ai", UNTAGGED]);
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[1].items.len(), 1);
        assert_eq!(groups[2].items.len(), 1);
    }

    #[test]
    fn test_fan_out_count_invariant() {
        let items = vec![
            item("1", &["a", "b", "c"]),
            item("2", &["a"]),
            item("3", &[]),
            item("4", &["b", "c"]),
        ];
        let tags = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let groups = group_by_tag(&items, &tags);
        let grouped: usize = groups.iter().map(|g| g.items.len()).sum();
        let expected: usize = items.iter().map(|i| i.tags.len().max(1)).sum();
        assert_eq!(grouped, expected);

        for pair in groups.windows(2) {
            assert!(pair[0].items.len() >= pair[1].items.len());
        }
    }

    #[test]
    fn test_tie_break_keeps_first_encountered_order() {
        let items = vec![item("1", &["zeta"]), item("2", &["alpha"])];
        let tags = vec!["alpha".to_string(), "zeta".to_string()];

        let groups = group_by_tag(&items, &tags);
        let names: Vec<&str> = groups.iter().map(|g| g.tag.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_empty_inputs_yield_no_groups() {
        assert!(group_by_tag(&[], &["a".to_string()]).is_empty());
        assert!(group_by_tag(&[item("1", &["a"])], &[]).is_empty());
    }

    #[test]
    fn test_color_and_icon_are_pure() {
        assert_eq!(tag_color("rust"), tag_color("rust"));
        assert_eq!(tag_icon("rust"), tag_icon("rust"));
    }

    #[test]
    fn test_icon_lookup_tiers() {
        assert_eq!(tag_icon("Technology"), "laptop-outline");
        // substring in either direction
        assert_eq!(tag_icon("tech"), "laptop-outline");
        assert_eq!(tag_icon("music production"), "musical-notes-outline");
        assert_eq!(tag_icon("zzz"), DEFAULT_ICON);
    }
}
