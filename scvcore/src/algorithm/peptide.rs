use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use regex::Captures;

use crate::annotation::extract::UNLABELED_GROUP;
use crate::annotation::grammar::TokenPatterns;
use crate::data::color::Rgb;

/// Remove every bracketed modification from a PSM line, keeping the residue
/// letter that carried it.
///
/// # Arguments
///
/// * `patterns` - the compiled annotation patterns
/// * `psm` - a PSM line, possibly containing modification tokens
///
/// # Returns
///
/// * `String` - the bare peptide sequence
///
/// # Example
///
/// ```
/// use scvcore::annotation::grammar::TokenPatterns;
/// use scvcore::algorithm::peptide::strip_annotations;
///
/// let patterns = TokenPatterns::new();
/// assert_eq!(
///     strip_annotations(&patterns, "GNYGWQAGN[115]HSAFWGMTLDEGIR"),
///     "GNYGWQAGNHSAFWGMTLDEGIR"
/// );
/// ```
pub fn strip_annotations(patterns: &TokenPatterns, psm: &str) -> String {
    patterns
        .single
        .replace_all(psm, |caps: &Captures| caps[0][0..1].to_string())
        .to_string()
}

/// Parallel batch variant of [`strip_annotations`] over a dedicated thread
/// pool.
pub fn strip_annotations_par(
    patterns: &TokenPatterns,
    psms: &[String],
    num_threads: usize,
) -> Vec<String> {
    let thread_pool = ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .unwrap();
    thread_pool.install(|| {
        psms.par_iter()
            .map(|psm| strip_annotations(patterns, psm))
            .collect()
    })
}

/// Merge every labeled group whose label has no annotation entry into the
/// unlabeled bucket. A group partition is only meaningful when a group
/// annotation refers to it; anything else still counts toward coverage.
/// With no annotations at all the grouping is left untouched.
pub fn regroup_unknown_labels(
    groups: &mut BTreeMap<String, Vec<String>>,
    annotations: &BTreeMap<String, Rgb>,
) {
    if annotations.is_empty() {
        return;
    }
    let unknown: Vec<String> = groups
        .keys()
        .filter(|label| label.as_str() != UNLABELED_GROUP && !annotations.contains_key(*label))
        .cloned()
        .collect();
    let mut displaced = Vec::new();
    for label in unknown {
        if let Some(psms) = groups.remove(&label) {
            displaced.extend(psms);
        }
    }
    groups
        .entry(UNLABELED_GROUP.to_string())
        .or_default()
        .extend(displaced);
}

/// The distinct non-empty PSM lines across all groups.
pub fn unique_psms(groups: &BTreeMap<String, Vec<String>>) -> BTreeSet<String> {
    groups
        .values()
        .flatten()
        .filter(|psm| !psm.is_empty())
        .cloned()
        .collect()
}

/// Map each PSM to its group label. Unlabeled PSMs are absent; on a PSM
/// occurring in more than one group the later label wins.
pub fn psm_group_map(groups: &BTreeMap<String, Vec<String>>) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for (label, psms) in groups {
        if label == UNLABELED_GROUP {
            continue;
        }
        for psm in psms {
            map.insert(psm.clone(), label.clone());
        }
    }
    map
}

/// Group PSM lines by their bare peptide sequence. Several PSMs (differing
/// only in their annotations) can share one peptide.
pub fn peptide_psm_map(
    patterns: &TokenPatterns,
    psms: &BTreeSet<String>,
) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for psm in psms {
        map.entry(strip_annotations(patterns, psm))
            .or_default()
            .push(psm.clone());
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_annotations() {
        let patterns = TokenPatterns::new();
        assert_eq!(
            strip_annotations(&patterns, "C[143]TCHEGGHWECDQEPCLVDPDMIK"),
            "CTCHEGGHWECDQEPCLVDPDMIK"
        );
        assert_eq!(
            strip_annotations(&patterns, "C[143]TN[115]R"),
            "CTNR"
        );
        assert_eq!(strip_annotations(&patterns, "EQNEASPTPR"), "EQNEASPTPR");
        assert_eq!(strip_annotations(&patterns, "AB[100C"), "AB[100C");
    }

    #[test]
    fn test_strip_annotations_par_matches_serial() {
        let patterns = TokenPatterns::new();
        let psms = vec![
            "GRADECALPYLGATCYCDLFCN[115]R".to_string(),
            "EQNEASPTPR".to_string(),
            "C[143]TN[115]R".to_string(),
        ];
        let parallel = strip_annotations_par(&patterns, &psms, 2);
        let serial: Vec<String> = psms
            .iter()
            .map(|psm| strip_annotations(&patterns, psm))
            .collect();
        assert_eq!(parallel, serial);
    }

    #[test]
    fn test_regroup_unknown_labels() {
        let mut groups: BTreeMap<String, Vec<String>> = [
            ("group1".to_string(), vec!["AAA".to_string()]),
            ("typo".to_string(), vec!["BBB".to_string(), "CCC".to_string()]),
            ("unlabeled".to_string(), vec!["DDD".to_string()]),
        ]
        .into_iter()
        .collect();
        let annotations: BTreeMap<String, Rgb> =
            [("group1".to_string(), [1, 2, 3])].into_iter().collect();

        regroup_unknown_labels(&mut groups, &annotations);
        assert_eq!(groups["group1"], vec!["AAA"]);
        assert!(!groups.contains_key("typo"));
        assert_eq!(groups["unlabeled"], vec!["DDD", "BBB", "CCC"]);
    }

    #[test]
    fn test_regroup_without_annotations_is_a_noop() {
        let mut groups: BTreeMap<String, Vec<String>> = [
            ("group1".to_string(), vec!["AAA".to_string()]),
        ]
        .into_iter()
        .collect();
        regroup_unknown_labels(&mut groups, &BTreeMap::new());
        assert!(groups.contains_key("group1"));
    }

    #[test]
    fn test_unique_psms_skips_empty_lines() {
        let groups: BTreeMap<String, Vec<String>> = [
            (
                "unlabeled".to_string(),
                vec!["AAA".to_string(), String::new(), "AAA".to_string()],
            ),
        ]
        .into_iter()
        .collect();
        let psms = unique_psms(&groups);
        assert_eq!(psms.len(), 1);
        assert!(psms.contains("AAA"));
    }

    #[test]
    fn test_psm_group_map_skips_unlabeled() {
        let groups: BTreeMap<String, Vec<String>> = [
            ("group1".to_string(), vec!["AAA".to_string()]),
            ("unlabeled".to_string(), vec!["BBB".to_string()]),
        ]
        .into_iter()
        .collect();
        let map = psm_group_map(&groups);
        assert_eq!(map.get("AAA"), Some(&"group1".to_string()));
        assert!(!map.contains_key("BBB"));
    }

    #[test]
    fn test_peptide_psm_map_accumulates_shared_peptides() {
        let patterns = TokenPatterns::new();
        let psms: BTreeSet<String> = [
            "CTNR".to_string(),
            "C[143]TNR".to_string(),
            "EQNEASPTPR".to_string(),
        ]
        .into_iter()
        .collect();
        let map = peptide_psm_map(&patterns, &psms);
        assert_eq!(map["CTNR"].len(), 2);
        assert_eq!(map["EQNEASPTPR"], vec!["EQNEASPTPR"]);
    }
}
