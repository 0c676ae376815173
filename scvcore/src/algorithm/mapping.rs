use std::collections::BTreeMap;

use aho_corasick::AhoCorasick;
use itertools::Itertools;

use crate::data::color::Rgb;
use crate::data::fasta::ProteinEntry;

/// All protein sequences joined with `|` separators, plus the `[start, end)`
/// span of each protein inside the joined line.
pub struct ProteomeLine {
    pub line: String,
    pub spans: Vec<(usize, usize)>,
}

pub fn proteome_line(table: &[ProteinEntry]) -> ProteomeLine {
    let line = table.iter().map(|entry| entry.sequence.as_str()).join("|");
    let mut spans = Vec::with_capacity(table.len());
    let mut cursor = 0usize;
    for entry in table {
        let start = cursor;
        let end = start + entry.sequence.len();
        spans.push((start, end));
        cursor = end + 1;
    }
    ProteomeLine { line, spans }
}

/// Observation counts over the whole proteome line, plus one count line per
/// annotation key.
pub struct MappingOutcome {
    pub counts: Vec<u32>,
    pub ptm_lines: BTreeMap<String, Vec<u32>>,
}

/// Match every bare peptide against the proteome line and accumulate
/// observation counts.
///
/// Each match (overlapping included) adds the number of PSMs behind the
/// peptide to every position of its span. When annotations are present, a
/// PSM belonging to an annotated group marks its whole span on that group's
/// line, and every literal occurrence of an annotation token inside the PSM
/// marks its residue position, shifted back by the characters that earlier
/// occurrences of the token occupy in the annotated form.
pub fn map_observations(
    line: &ProteomeLine,
    peptide_psms: &BTreeMap<String, Vec<String>>,
    psm_groups: &BTreeMap<String, String>,
    annotations: &BTreeMap<String, Rgb>,
) -> MappingOutcome {
    let mut counts = vec![0u32; line.line.len()];
    let mut ptm_lines: BTreeMap<String, Vec<u32>> = annotations
        .keys()
        .filter(|key| !key.is_empty())
        .map(|key| (key.clone(), vec![0u32; line.line.len()]))
        .collect();

    let peptides: Vec<&String> = peptide_psms.keys().collect();
    let automaton = AhoCorasick::new(&peptides).unwrap();

    for mat in automaton.find_overlapping_iter(&line.line) {
        let peptide = peptides[mat.pattern().as_usize()].as_str();
        let psms = &peptide_psms[peptide];
        for position in mat.start()..mat.end() {
            counts[position] += psms.len() as u32;
        }
        if ptm_lines.is_empty() {
            continue;
        }
        for psm in psms {
            if let Some(label) = psm_groups.get(psm) {
                if let Some(group_line) = ptm_lines.get_mut(label) {
                    for position in mat.start()..mat.end() {
                        group_line[position] += 1;
                    }
                }
            }
            for (token, token_line) in ptm_lines.iter_mut() {
                let occurrences: Vec<usize> =
                    psm.match_indices(token.as_str()).map(|(idx, _)| idx).collect();
                for (i, idx) in occurrences.iter().enumerate() {
                    let adjusted = idx - i * (token.len() - 1);
                    let position = mat.start() + adjusted;
                    if position < token_line.len() {
                        token_line[position] += 1;
                    }
                }
            }
        }
    }

    MappingOutcome { counts, ptm_lines }
}
