use std::collections::{BTreeMap, BTreeSet};

use pyo3::prelude::*;

use scvcore::annotation::extract::extract;
use scvcore::annotation::grammar::{PtmToken, TokenPatterns};
use scvcore::annotation::reconcile::{AnnotationSink, TokenRegistry};
use scvcore::annotation::resolve::resolve_colors;
use scvcore::algorithm::peptide::{strip_annotations, strip_annotations_par};

#[derive(Default)]
struct CollectingSink {
    added: Vec<String>,
    removed: Vec<String>,
}

impl AnnotationSink for CollectingSink {
    fn on_token_added(&mut self, token: &PtmToken) {
        self.added.push(token.as_str().to_string());
    }
    fn on_token_removed(&mut self, token: &PtmToken) {
        self.removed.push(token.as_str().to_string());
    }
}

#[pyclass]
pub struct PyTokenRegistry {
    inner: TokenRegistry,
    patterns: TokenPatterns,
}

#[pymethods]
impl PyTokenRegistry {
    #[new]
    pub fn new() -> Self {
        PyTokenRegistry {
            inner: TokenRegistry::new(),
            patterns: TokenPatterns::new(),
        }
    }

    /// Re-parse the PSM input and return the (added, removed) token lists.
    pub fn reconcile_text(&mut self, text: &str) -> (Vec<String>, Vec<String>) {
        let extraction = extract(&self.patterns, text);
        let mut sink = CollectingSink::default();
        self.inner.reconcile(&extraction.tokens, &mut sink);
        (sink.added, sink.removed)
    }

    #[getter]
    pub fn tokens(&self) -> Vec<String> {
        self.inner
            .tokens()
            .iter()
            .map(|token| token.as_str().to_string())
            .collect()
    }

    pub fn contains(&self, token: &str) -> bool {
        PtmToken::parse(&self.patterns, token)
            .map(|token| self.inner.contains(&token))
            .unwrap_or(false)
    }
}

#[pyfunction]
pub fn extract_annotations(text: &str) -> (BTreeMap<String, Vec<String>>, Vec<String>) {
    let patterns = TokenPatterns::new();
    let extraction = extract(&patterns, text);
    let tokens = extraction
        .tokens
        .iter()
        .map(|token| token.as_str().to_string())
        .collect();
    (extraction.groups, tokens)
}

#[pyfunction]
pub fn resolve_annotation_colors(
    selected: Vec<String>,
    colors: BTreeMap<String, [u8; 3]>,
) -> BTreeMap<String, [u8; 3]> {
    let patterns = TokenPatterns::new();
    let selected: BTreeSet<String> = selected.into_iter().collect();
    resolve_colors(&patterns, &selected, |token| {
        colors.get(token).copied().unwrap_or([255, 0, 0])
    })
}

#[pyfunction]
pub fn strip_psm_annotations(psm: &str) -> String {
    let patterns = TokenPatterns::new();
    strip_annotations(&patterns, psm)
}

#[pyfunction]
pub fn strip_psm_annotations_par(psms: Vec<String>, num_threads: usize) -> Vec<String> {
    let patterns = TokenPatterns::new();
    strip_annotations_par(&patterns, &psms, num_threads)
}

#[pyfunction]
pub fn annotation_card_id(token: &str) -> Option<String> {
    let patterns = TokenPatterns::new();
    PtmToken::parse(&patterns, token).map(|token| token.card_id())
}

#[pyfunction]
pub fn residue_names() -> BTreeMap<String, String> {
    scvcore::chemistry::residues::residue_names()
        .into_iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect()
}
