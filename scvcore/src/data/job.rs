use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::chemistry::residues::CANONICAL_RESIDUES;
use crate::data::color::Rgb;
use crate::error::ScvError;

/// Species with a bundled reference proteome.
pub const KNOWN_SPECIES: [&str; 3] = ["human", "mouse", "rat"];

/// A submitted visualization job: grouped PSM lines, the concrete-token
/// color annotations, the viewer background color (packed RGB) and the
/// target species.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub psms: BTreeMap<String, Vec<String>>,
    pub ptm_annotations: BTreeMap<String, Rgb>,
    pub background_color: u32,
    pub species: String,
}

impl Job {
    pub fn new(
        psms: BTreeMap<String, Vec<String>>,
        ptm_annotations: BTreeMap<String, Rgb>,
        background_color: u32,
        species: String,
    ) -> Job {
        Job {
            psms,
            ptm_annotations,
            background_color,
            species,
        }
    }

    /// Check the payload against the submission rules. Every peptide line
    /// must be a run of canonical residue letters and bracketed numeric
    /// annotations; keys must be ASCII; the background color must fit in
    /// 24 bits; the species must be known or empty.
    pub fn validate(&self) -> Result<(), ScvError> {
        if self.psms.is_empty() {
            return Err(ScvError::InvalidJob(
                "PSMs must contain at least one group.".to_string(),
            ));
        }
        let sequence = Regex::new(&format!(
            r"^(?:[{}]|\[\d+(?:\.\d+)?\])*$",
            CANONICAL_RESIDUES
        ))
        .unwrap();
        for (group, peptides) in &self.psms {
            if !group.is_ascii() {
                return Err(ScvError::InvalidJob("PSM keys must be ASCII.".to_string()));
            }
            for peptide in peptides {
                if !sequence.is_match(peptide) {
                    return Err(ScvError::InvalidJob(
                        "PSM values must be lists of valid peptide sequences.".to_string(),
                    ));
                }
            }
        }
        for key in self.ptm_annotations.keys() {
            if !key.is_ascii() {
                return Err(ScvError::InvalidJob(
                    "PTM annotation keys must be ASCII.".to_string(),
                ));
            }
        }
        if self.background_color > 16777215 {
            return Err(ScvError::InvalidJob(
                "Background color must be less than 16777215.".to_string(),
            ));
        }
        if !self.species.is_empty() && !KNOWN_SPECIES.contains(&self.species.as_str()) {
            return Err(ScvError::InvalidJob(
                "Species must be human, mouse, or rat.".to_string(),
            ));
        }
        Ok(())
    }
}
