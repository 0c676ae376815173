use numpy::{IntoPyArray, PyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use scvcore::algorithm::coverage::coverage_report;
use scvcore::algorithm::peptide;
use scvcore::algorithm::mapping::{map_observations, proteome_line};
use scvcore::annotation::grammar::TokenPatterns;
use scvcore::data::fasta::parse_fasta;
use scvcore::data::job::Job;

fn parse_job(job_json: &str) -> PyResult<Job> {
    let job: Job =
        serde_json::from_str(job_json).map_err(|e| PyValueError::new_err(e.to_string()))?;
    job.validate()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(job)
}

/// Full pipeline: validated job JSON + FASTA text in, ranked coverage
/// report JSON out.
#[pyfunction]
pub fn coverage_report_json(job_json: &str, fasta_text: &str) -> PyResult<String> {
    let job = parse_job(job_json)?;
    let table = parse_fasta(fasta_text).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let patterns = TokenPatterns::new();
    let report = coverage_report(&patterns, &job, &table);
    serde_json::to_string(&report).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Observation counts over the concatenated proteome line.
#[pyfunction]
pub fn observation_counts(
    py: Python,
    job_json: &str,
    fasta_text: &str,
) -> PyResult<Py<PyArray1<u32>>> {
    let job = parse_job(job_json)?;
    let table = parse_fasta(fasta_text).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let patterns = TokenPatterns::new();

    let mut groups = job.psms.clone();
    peptide::regroup_unknown_labels(&mut groups, &job.ptm_annotations);
    let psm_groups = peptide::psm_group_map(&groups);
    let psms = peptide::unique_psms(&groups);
    let peptide_psms = peptide::peptide_psm_map(&patterns, &psms);

    let line = proteome_line(&table);
    let outcome = map_observations(&line, &peptide_psms, &psm_groups, &job.ptm_annotations);
    Ok(outcome.counts.into_pyarray(py).to_owned())
}
