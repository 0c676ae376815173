use std::collections::{BTreeMap, BTreeSet};

use crate::annotation::grammar::{PtmToken, TokenPatterns};

/// Group key for peptide lines that appear outside any labeled block.
pub const UNLABELED_GROUP: &str = "unlabeled";

/// Result of scanning raw PSM input: peptide lines partitioned by group
/// label, plus every single-residue modification token seen anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub groups: BTreeMap<String, Vec<String>>,
    pub tokens: BTreeSet<PtmToken>,
}

/// Partition raw multi-line PSM input into labeled peptide groups and
/// collect the set of modification tokens.
///
/// A `{...}[label]` block stores its interior lines under the label
/// (last write wins on a repeated label); every other line lands in the
/// `unlabeled` bucket, which is always present. Only single-residue tokens
/// are collected; block labels and group tokens never enter the token set.
///
/// # Example
///
/// ```
/// use scvcore::annotation::extract::extract;
/// use scvcore::annotation::grammar::{PtmToken, TokenPatterns};
///
/// let patterns = TokenPatterns::new();
/// let extraction = extract(&patterns, "AB[100]C\nDE");
/// assert_eq!(extraction.groups["unlabeled"], vec!["AB[100]C", "DE"]);
/// assert!(extraction.tokens.contains(&PtmToken::Single("B[100]".to_string())));
/// ```
pub fn extract(patterns: &TokenPatterns, raw_text: &str) -> Extraction {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    groups.insert(UNLABELED_GROUP.to_string(), Vec::new());
    let mut tokens = BTreeSet::new();

    for caps in patterns.block.captures_iter(raw_text) {
        if let (Some(interior), Some(label)) = (caps.get(1), caps.get(2)) {
            let lines: Vec<String> = interior
                .as_str()
                .split('\n')
                .map(|line| line.trim_end_matches('\r').to_string())
                .collect();
            for line in &lines {
                collect_single_tokens(patterns, line, &mut tokens);
            }
            groups.insert(label.as_str().to_string(), lines);
        } else if let Some(line) = caps.get(3) {
            collect_single_tokens(patterns, line.as_str(), &mut tokens);
            groups
                .entry(UNLABELED_GROUP.to_string())
                .or_default()
                .push(line.as_str().to_string());
        }
    }

    Extraction { groups, tokens }
}

fn collect_single_tokens(
    patterns: &TokenPatterns,
    line: &str,
    tokens: &mut BTreeSet<PtmToken>,
) {
    for m in patterns.single.find_iter(line) {
        tokens.insert(PtmToken::Single(m.as_str().to_string()));
    }
}
