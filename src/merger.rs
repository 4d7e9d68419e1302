/*!
 * Substitution of translated units back into document text.
 *
 * Keys are applied in descending character-length order so a shorter key
 * that is a substring of a longer key can never corrupt the longer match.
 * This ordering is a correctness requirement, not an optimization.
 */

use log::debug;

use crate::dispatcher::UnitMap;

/// Applies a completed unit map to document text
pub struct Merger;

impl Merger {
    /// Replace every occurrence of every mapped unit with its translation.
    ///
    /// Keys are processed longest first; equal-length keys keep their
    /// first-seen order (stable sort). Replacement is exact literal
    /// substring substitution, never regex, so translated text is never
    /// reinterpreted as a pattern. A key whose text no longer occurs
    /// (consumed by an earlier, longer key) is silently skipped.
    ///
    /// Output is a pure function of `text` and `map`.
    pub fn merge(text: &str, map: &UnitMap) -> String {
        let mut keys: Vec<(&str, &str)> = map.iter().collect();
        // Stable sort keeps first-seen order for equal-length keys
        keys.sort_by(|(a, _), (b, _)| b.chars().count().cmp(&a.chars().count()));

        let mut content = text.to_string();
        for (unit, translation) in keys {
            if content.contains(unit) {
                debug!("Replace: \"{}\" -> \"{}\"", unit, translation);
                content = content.replace(unit, translation);
            }
        }
        content
    }
}
