use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-protein coverage result handed to the viewer: how often each residue
/// position was observed and where each selected annotation sits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinCoverage {
    pub protein_id: String,
    pub description: String,
    pub gene: String,
    /// fraction of positions with at least one observation, in [0, 1]
    pub coverage: f64,
    pub sequence: String,
    /// observation count per residue position
    pub sequence_coverage: Vec<u32>,
    /// annotation key -> residue positions (0-based, relative to sequence)
    pub ptms: BTreeMap<String, Vec<usize>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let record = ProteinCoverage {
            protein_id: "P00001".to_string(),
            description: "Demo protein".to_string(),
            gene: "Dem1".to_string(),
            coverage: 0.5,
            sequence: "PEPTIDE".to_string(),
            sequence_coverage: vec![1, 1, 0, 0, 0, 1, 1],
            ptms: [("N[115]".to_string(), vec![2usize])].into_iter().collect(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: ProteinCoverage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert!(json.contains("\"sequence_coverage\""));
        assert!(json.contains("\"ptms\""));
    }
}
