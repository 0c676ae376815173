mod py_annotation;
mod py_coverage;

use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::py_annotation::PyTokenRegistry;

#[pymodule]
fn scvpy_connector(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyTokenRegistry>()?;
    m.add_function(wrap_pyfunction!(py_annotation::extract_annotations, m)?)?;
    m.add_function(wrap_pyfunction!(py_annotation::resolve_annotation_colors, m)?)?;
    m.add_function(wrap_pyfunction!(py_annotation::strip_psm_annotations, m)?)?;
    m.add_function(wrap_pyfunction!(py_annotation::strip_psm_annotations_par, m)?)?;
    m.add_function(wrap_pyfunction!(py_annotation::annotation_card_id, m)?)?;
    m.add_function(wrap_pyfunction!(py_annotation::residue_names, m)?)?;
    m.add_function(wrap_pyfunction!(py_coverage::coverage_report_json, m)?)?;
    m.add_function(wrap_pyfunction!(py_coverage::observation_counts, m)?)?;
    Ok(())
}
