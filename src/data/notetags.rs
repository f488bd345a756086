//! Note-tag mini-language for weapon and skill annotations.
//!
//! Definition records carry a free-text `notes` block. At database load time
//! each line is scanned, case-insensitively, for range directives:
//!
//! - `<Weapon Range: N>` - sets min range to 0 and max range to N
//! - `<Weapon Min Range: N>` - sets min range to N
//! - `<Weapon Max Range: N>` - sets max range to N
//!
//! Directives are independent and combine; the last matching line for a
//! field wins. Any directive also marks the record with the `WeaponRange`
//! selection tag. Lines that don't match, and directives whose payload is
//! not a non-negative integer, are ignored.

/// Inclusive row-distance bounds for a ranged weapon.
///
/// An absent bound means "unbounded on that side". The defaults (0 and
/// `u32::MAX`) are applied when the bound is read, not when it is parsed, so
/// a record keeps the distinction between "declared 0" and "never declared".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeBounds {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl RangeBounds {
    /// Whether the record declared any range directive at all.
    pub fn is_declared(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Minimum row this weapon can reach, defaulting to 0.
    pub fn effective_min(&self) -> u32 {
        self.min.unwrap_or(0)
    }

    /// Maximum row this weapon can reach, defaulting to unbounded.
    pub fn effective_max(&self) -> u32 {
        self.max.unwrap_or(u32::MAX)
    }

    /// Whether a target row falls within the bounds, inclusive on both ends.
    pub fn contains(&self, row: u32) -> bool {
        row >= self.effective_min() && row <= self.effective_max()
    }
}

/// Marker that a custom selection rule must be consulted for this record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTag {
    /// Targeting consults the user's equipped weapon range.
    WeaponRange,
}

/// Everything the note-tag pass derives from one `notes` block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedNotes {
    pub range: RangeBounds,
    pub tags: Vec<SelectionTag>,
}

impl ParsedNotes {
    fn mark_ranged(&mut self) {
        if !self.tags.contains(&SelectionTag::WeaponRange) {
            self.tags.push(SelectionTag::WeaponRange);
        }
    }
}

/// Scan a notes block for range directives.
pub fn parse_notes(notes: &str) -> ParsedNotes {
    let mut parsed = ParsedNotes::default();

    for line in notes.lines() {
        // Longer tags first: "weapon range" is a prefix of neither
        if let Some(value) = directive_value(line, "weapon min range") {
            parsed.range.min = Some(value);
            parsed.mark_ranged();
        } else if let Some(value) = directive_value(line, "weapon max range") {
            parsed.range.max = Some(value);
            parsed.mark_ranged();
        } else if let Some(value) = directive_value(line, "weapon range") {
            parsed.range.min = Some(0);
            parsed.range.max = Some(value);
            parsed.mark_ranged();
        }
    }

    parsed
}

/// Extract the integer payload of a `<tag: N>` directive, if the line is one.
fn directive_value(line: &str, tag: &str) -> Option<u32> {
    let lower = line.trim().to_ascii_lowercase();
    let body = lower.strip_prefix('<')?;
    let rest = body.trim_start().strip_prefix(tag)?;
    let rest = rest.trim_start().strip_prefix(':')?;
    let end = rest.find('>')?;
    rest[..end].trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_directive_sets_zero_to_max() {
        let parsed = parse_notes("<Weapon Range: 3>");
        assert_eq!(parsed.range.min, Some(0));
        assert_eq!(parsed.range.max, Some(3));
        assert_eq!(parsed.tags, vec![SelectionTag::WeaponRange]);
    }

    #[test]
    fn min_and_max_directives_combine() {
        let parsed = parse_notes("<Weapon Min Range: 2>\n<Weapon Max Range: 4>");
        assert_eq!(parsed.range.min, Some(2));
        assert_eq!(parsed.range.max, Some(4));
    }

    #[test]
    fn last_matching_line_per_field_wins() {
        let parsed = parse_notes(
            "<Weapon Max Range: 5>\n<Weapon Min Range: 1>\n<Weapon Max Range: 2>",
        );
        assert_eq!(parsed.range.min, Some(1));
        assert_eq!(parsed.range.max, Some(2));

        // The overall directive resets both fields when it comes last
        let parsed = parse_notes("<Weapon Min Range: 3>\n<Weapon Range: 6>");
        assert_eq!(parsed.range.min, Some(0));
        assert_eq!(parsed.range.max, Some(6));
    }

    #[test]
    fn directives_are_case_insensitive() {
        let parsed = parse_notes("<WEAPON RANGE: 2>");
        assert_eq!(parsed.range.max, Some(2));

        let parsed = parse_notes("<weapon min range: 1>");
        assert_eq!(parsed.range.min, Some(1));
    }

    #[test]
    fn unparsed_lines_are_ignored() {
        let parsed = parse_notes("A sturdy oak bow.\n<Weapon Rangefinder: 3>\n<Price: 50>");
        assert_eq!(parsed.range, RangeBounds::default());
        assert!(parsed.tags.is_empty());
    }

    #[test]
    fn malformed_payload_leaves_bound_undeclared() {
        let parsed = parse_notes("<Weapon Min Range: far>\n<Weapon Max Range: -1>");
        assert_eq!(parsed.range, RangeBounds::default());
        assert!(!parsed.range.is_declared());
    }

    #[test]
    fn tag_is_marked_once() {
        let parsed = parse_notes("<Weapon Min Range: 1>\n<Weapon Max Range: 3>");
        assert_eq!(parsed.tags.len(), 1);
    }

    #[test]
    fn undeclared_bounds_default_at_read_time() {
        let bounds = RangeBounds { min: None, max: Some(3) };
        assert_eq!(bounds.effective_min(), 0);
        assert!(bounds.contains(0));
        assert!(bounds.contains(3));
        assert!(!bounds.contains(4));

        let bounds = RangeBounds { min: Some(2), max: None };
        assert_eq!(bounds.effective_max(), u32::MAX);
        assert!(!bounds.contains(1));
        assert!(bounds.contains(u32::MAX));
    }

    #[test]
    fn bounds_are_inclusive_on_both_ends() {
        let bounds = RangeBounds { min: Some(2), max: Some(4) };
        assert!(!bounds.contains(1));
        assert!(bounds.contains(2));
        assert!(bounds.contains(3));
        assert!(bounds.contains(4));
        assert!(!bounds.contains(5));
    }
}
