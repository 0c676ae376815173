use std::collections::{BTreeMap, BTreeSet};

use crate::annotation::grammar::TokenPatterns;
use crate::data::color::Rgb;

/// Map the user's selected tokens to the concrete token -> color payload
/// expected by job submission.
///
/// Group tokens expand to one concrete token per residue letter, all sharing
/// the group's color; single tokens map directly. Selected entries that are
/// neither (stray text, unparseable group masses) contribute nothing. Result
/// keys are therefore always concrete single-residue tokens. On a key
/// collision the later entry wins.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use scvcore::annotation::grammar::TokenPatterns;
/// use scvcore::annotation::resolve::resolve_colors;
///
/// let patterns = TokenPatterns::new();
/// let selected: BTreeSet<String> = ["(ST)[80]".to_string()].into_iter().collect();
/// let resolved = resolve_colors(&patterns, &selected, |_| [10, 20, 30]);
/// assert_eq!(resolved["S[80]"], [10, 20, 30]);
/// assert_eq!(resolved["T[80]"], [10, 20, 30]);
/// ```
pub fn resolve_colors<F>(
    patterns: &TokenPatterns,
    selected: &BTreeSet<String>,
    color_of: F,
) -> BTreeMap<String, Rgb>
where
    F: Fn(&str) -> Rgb,
{
    let mut resolved = BTreeMap::new();
    for entry in selected {
        if let Some(expanded) = patterns.expand_group(entry) {
            let color = color_of(entry);
            for token in expanded {
                resolved.insert(token, color);
            }
        } else if patterns.is_single(entry) {
            resolved.insert(entry.clone(), color_of(entry));
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(entries: &[&str]) -> BTreeSet<String> {
        entries.iter().map(|entry| entry.to_string()).collect()
    }

    #[test]
    fn test_group_token_expands_with_shared_color() {
        let patterns = TokenPatterns::new();
        let resolved = resolve_colors(&patterns, &selection(&["(ST)[80]"]), |_| [10, 20, 30]);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved["S[80]"], [10, 20, 30]);
        assert_eq!(resolved["T[80]"], [10, 20, 30]);
    }

    #[test]
    fn test_single_token_maps_directly() {
        let patterns = TokenPatterns::new();
        let resolved = resolve_colors(&patterns, &selection(&["N[115]"]), |_| [0, 255, 8]);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved["N[115]"], [0, 255, 8]);
    }

    #[test]
    fn test_expansion_count_matches_residue_count() {
        let patterns = TokenPatterns::new();
        let resolved = resolve_colors(&patterns, &selection(&["(ARNDC)[42]"]), |_| [1, 2, 3]);
        assert_eq!(resolved.len(), 5);
        assert!(resolved.values().all(|color| *color == [1, 2, 3]));
    }

    #[test]
    fn test_colors_come_from_the_selected_entry() {
        let patterns = TokenPatterns::new();
        let resolved = resolve_colors(
            &patterns,
            &selection(&["(ST)[80]", "N[115]"]),
            |token| if token == "N[115]" { [9, 9, 9] } else { [7, 7, 7] },
        );
        assert_eq!(resolved["S[80]"], [7, 7, 7]);
        assert_eq!(resolved["T[80]"], [7, 7, 7]);
        assert_eq!(resolved["N[115]"], [9, 9, 9]);
    }

    #[test]
    fn test_later_entry_wins_on_collision() {
        let patterns = TokenPatterns::new();
        // BTreeSet iterates "(ST)[80]" before "S[80]"
        let resolved = resolve_colors(
            &patterns,
            &selection(&["(ST)[80]", "S[80]"]),
            |token| if token == "S[80]" { [1, 1, 1] } else { [2, 2, 2] },
        );
        assert_eq!(resolved["S[80]"], [1, 1, 1]);
        assert_eq!(resolved["T[80]"], [2, 2, 2]);
    }

    #[test]
    fn test_group_labels_are_skipped() {
        let patterns = TokenPatterns::new();
        let resolved = resolve_colors(&patterns, &selection(&["group1", "N[115]"]), |_| [5, 5, 5]);
        assert_eq!(resolved.len(), 1);
        assert!(resolved.contains_key("N[115]"));
    }

    #[test]
    fn test_malformed_group_entries_are_skipped() {
        let patterns = TokenPatterns::new();
        let huge_mass = format!("(ST)[{}]", "9".repeat(400));
        let resolved = resolve_colors(
            &patterns,
            &selection(&["(ST)[80", huge_mass.as_str()]),
            |_| [5, 5, 5],
        );
        assert!(resolved.is_empty());
    }
}
