use std::collections::{BTreeMap, BinaryHeap};
use std::time::Instant;

use log::info;
use ordered_float::OrderedFloat;

use crate::algorithm::{mapping, peptide};
use crate::annotation::grammar::TokenPatterns;
use crate::data::coverage::ProteinCoverage;
use crate::data::fasta::ProteinEntry;
use crate::data::job::Job;

/// Fraction of positions with at least one observation.
///
/// # Example
///
/// ```
/// use scvcore::algorithm::coverage::coverage_fraction;
///
/// assert_eq!(coverage_fraction(&[0, 2, 1, 0]), 0.5);
/// assert_eq!(coverage_fraction(&[]), 0.0);
/// ```
pub fn coverage_fraction(counts: &[u32]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    let observed = counts.iter().filter(|&&count| count > 0).count();
    observed as f64 / counts.len() as f64
}

/// Run a job's PSMs against a protein table and assemble the per-protein
/// coverage records, ranked by coverage descending. Proteins without a
/// single observation are left out.
pub fn coverage_report(
    patterns: &TokenPatterns,
    job: &Job,
    table: &[ProteinEntry],
) -> Vec<ProteinCoverage> {
    let start_time = Instant::now();

    let mut groups = job.psms.clone();
    peptide::regroup_unknown_labels(&mut groups, &job.ptm_annotations);
    let psm_groups = peptide::psm_group_map(&groups);
    let psms = peptide::unique_psms(&groups);
    let peptide_psms = peptide::peptide_psm_map(patterns, &psms);

    let line = mapping::proteome_line(table);
    let outcome = mapping::map_observations(&line, &peptide_psms, &psm_groups, &job.ptm_annotations);

    let mut ranked = BinaryHeap::new();
    for (index, &(start, end)) in line.spans.iter().enumerate() {
        let coverage = coverage_fraction(&outcome.counts[start..end]);
        if coverage != 0.0 {
            ranked.push((OrderedFloat(coverage), index));
        }
    }

    let mut report = Vec::with_capacity(ranked.len());
    while let Some((coverage, index)) = ranked.pop() {
        let entry = &table[index];
        let (start, end) = line.spans[index];
        let mut ptms = BTreeMap::new();
        for (token, token_line) in &outcome.ptm_lines {
            let indices: Vec<usize> = token_line[start..end]
                .iter()
                .enumerate()
                .filter(|(_, &count)| count > 0)
                .map(|(position, _)| position)
                .collect();
            if !indices.is_empty() {
                ptms.insert(token.clone(), indices);
            }
        }
        report.push(ProteinCoverage {
            protein_id: entry.accession.clone(),
            description: entry.description.clone(),
            gene: entry.gene.clone(),
            coverage: coverage.into_inner(),
            sequence: entry.sequence.clone(),
            sequence_coverage: outcome.counts[start..end].to_vec(),
            ptms,
        });
    }

    info!(
        "coverage mapping of {} peptides over {} proteins finished in {:.2?}, {} covered",
        peptide_psms.len(),
        table.len(),
        start_time.elapsed(),
        report.len()
    );

    report
}
