//! Locating the part of a gloss that belongs to a grammatical tag.
//!
//! A marker owns the text from itself up to the next marker, so in
//! `"V. to run N. running"` the `V.` segment is `"V. to run"`. The
//! presentation layer decides how to mark the segment up.

use crate::filter::GrammarSelection;
use crate::models::{Entry, TAG_PATTERN};
use std::ops::Range;

/// The span of a gloss owned by one tag marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSegment<'a> {
    gloss: &'a str,
    range: Range<usize>,
}

impl<'a> TagSegment<'a> {
    /// The segment itself, starting with the marker.
    pub fn text(&self) -> &'a str {
        &self.gloss[self.range.clone()]
    }

    /// Gloss text preceding the segment.
    pub fn before(&self) -> &'a str {
        &self.gloss[..self.range.start]
    }

    /// Gloss text following the segment.
    pub fn after(&self) -> &'a str {
        &self.gloss[self.range.end..]
    }

    /// The full gloss the segment was taken from.
    pub fn gloss(&self) -> &'a str {
        self.gloss
    }

    /// Byte range of the segment within the gloss.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }
}

/// Extracts the segment of `gloss` owned by the first occurrence of `tag`.
///
/// Returns `None` when the gloss carries no such marker. Trailing whitespace
/// before the next marker is left out of the segment.
pub fn extract_tag_segment<'a>(gloss: &'a str, tag: &str) -> Option<TagSegment<'a>> {
    let mut markers = TAG_PATTERN.find_iter(gloss);
    let start = markers.find(|m| m.as_str() == tag)?.start();
    let next = markers.next().map_or(gloss.len(), |m| m.start());
    let end = start + gloss[start..next].trim_end().len();
    Some(TagSegment {
        gloss,
        range: start..end,
    })
}

/// Picks the marker to highlight in `entry` for the active grammar selection.
///
/// For a group this is the first of the entry's tags that belongs to the
/// group, even though every member counts when filtering.
pub fn highlight_target<'e>(entry: &'e Entry, selection: &GrammarSelection) -> Option<&'e str> {
    match selection {
        GrammarSelection::All => None,
        GrammarSelection::Tag(tag) => Some(*tag),
        GrammarSelection::Group(group) => entry
            .tags
            .iter()
            .find(|t| group.tags.iter().any(|g| *g == t.as_str()))
            .map(String::as_str),
    }
}

/// Highlight segment of `entry`'s meaning for the active grammar selection.
pub fn highlight<'e>(entry: &'e Entry, selection: &GrammarSelection) -> Option<TagSegment<'e>> {
    let tag = highlight_target(entry, selection)?;
    extract_tag_segment(&entry.meaning, tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables;

    #[test]
    fn test_segment_extends_to_end_without_following_tag() {
        let seg = extract_tag_segment("V. to greet someone", "V.").unwrap();
        assert_eq!(seg.text(), "V. to greet someone");
        assert_eq!(seg.before(), "");
        assert_eq!(seg.after(), "");
    }

    #[test]
    fn test_segment_stops_before_next_tag() {
        let gloss = "to see: V. to run N. running ADV. fast";
        let seg = extract_tag_segment(gloss, "N.").unwrap();
        assert_eq!(seg.text(), "N. running");
        assert_eq!(seg.before(), "to see: V. to run ");
        assert_eq!(seg.after(), " ADV. fast");
        assert!(seg.range().end < gloss.find("ADV.").unwrap());
        assert_eq!(format!("{}{}{}", seg.before(), seg.text(), seg.after()), gloss);
    }

    #[test]
    fn test_absent_tag_yields_nothing() {
        assert!(extract_tag_segment("N. car", "V.").is_none());
        assert!(extract_tag_segment("plain text", "N.").is_none());
        // "V.O." is two markers, never one.
        assert!(extract_tag_segment("V.O. to eat", "V.O.").is_none());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let seg = extract_tag_segment("N. mail V. to post N. letter", "N.").unwrap();
        assert_eq!(seg.text(), "N. mail");
        assert_eq!(seg.range(), 0..7);
    }

    #[test]
    fn test_group_target_follows_entry_tag_order() {
        // CONS. is listed first in the group, but CONJ. comes first in the entry.
        let entry = Entry::new("再", "zài", "ADV. again CONJ. and CONS. then", "Habits");
        let conj = GrammarSelection::Group(tables::group("Conjunctions").unwrap());
        assert_eq!(highlight_target(&entry, &conj), Some("CONJ."));
        assert_eq!(highlight(&entry, &conj).unwrap().text(), "CONJ. and");

        let verbs = GrammarSelection::Group(tables::group("Verbs").unwrap());
        assert_eq!(highlight_target(&entry, &verbs), None);
        assert_eq!(highlight_target(&entry, &GrammarSelection::All), None);
    }

    #[test]
    fn test_tag_target_is_the_selected_tag() {
        let entry = Entry::new("你好", "nǐ hǎo", "V. to greet someone", "Greetings");
        let selection = GrammarSelection::Tag("V.");
        assert_eq!(
            highlight(&entry, &selection).map(|s| s.text()),
            Some("V. to greet someone")
        );
        assert!(highlight(&entry, &GrammarSelection::Tag("N.")).is_none());
    }
}
