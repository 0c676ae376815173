use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScvError;

/// One entry of a reference proteome, read from a UniProt-style FASTA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinEntry {
    pub accession: String,
    pub description: String,
    pub gene: String,
    pub sequence: String,
}

/// Parse UniProt-style FASTA text into an ordered protein table.
///
/// The accession is the field between the first two `|` of the header, the
/// description runs from the accession block to ` OS=`, and the gene comes
/// from the `GN=` field (`N/A` when absent).
///
/// # Example
///
/// ```
/// use scvcore::data::fasta::parse_fasta;
///
/// let table = parse_fasta(">sp|P00001|DEMO_MOUSE Demo protein OS=Mus musculus GN=Dem1\nPEPTIDE\nSEQ").unwrap();
/// assert_eq!(table[0].accession, "P00001");
/// assert_eq!(table[0].description, "Demo protein");
/// assert_eq!(table[0].gene, "Dem1");
/// assert_eq!(table[0].sequence, "PEPTIDESEQ");
/// ```
pub fn parse_fasta(text: &str) -> Result<Vec<ProteinEntry>, ScvError> {
    let mut entries = Vec::new();
    for record in text.split('>').filter(|record| !record.trim().is_empty()) {
        let mut lines = record.lines();
        let header = lines
            .next()
            .ok_or_else(|| ScvError::MalformedFasta(record.to_string()))?;
        let accession = header
            .split('|')
            .nth(1)
            .ok_or_else(|| ScvError::MalformedFasta(header.to_string()))?
            .to_string();
        let gene = header
            .split("GN=")
            .nth(1)
            .and_then(|rest| rest.split(' ').next())
            .unwrap_or("N/A")
            .to_string();
        let description = header
            .split_once(' ')
            .map(|(_, rest)| rest.split(" OS=").next().unwrap_or(rest).to_string())
            .unwrap_or_default();
        let sequence: String = lines.collect();
        entries.push(ProteinEntry {
            accession,
            description,
            gene,
            sequence,
        });
    }
    Ok(entries)
}

/// Read and parse a FASTA file.
pub fn read_fasta(path: &Path) -> Result<Vec<ProteinEntry>, ScvError> {
    let text = std::fs::read_to_string(path)?;
    parse_fasta(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FASTA: &str = concat!(
        ">sp|P11111|AAAA_MOUSE First protein OS=Mus musculus OX=10090 GN=Aaa1 PE=1 SV=2\n",
        "MKTAYIAKQR\n",
        "QISFVKSHFS\n",
        ">tr|Q22222|BBBB_MOUSE Second protein OS=Mus musculus OX=10090 PE=4 SV=1\n",
        "GELARQLNSS\n",
    );

    #[test]
    fn test_parse_two_entries() {
        let table = parse_fasta(FASTA).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].accession, "P11111");
        assert_eq!(table[0].description, "First protein");
        assert_eq!(table[0].gene, "Aaa1");
        assert_eq!(table[0].sequence, "MKTAYIAKQRQISFVKSHFS");
    }

    #[test]
    fn test_missing_gene_field() {
        let table = parse_fasta(FASTA).unwrap();
        assert_eq!(table[1].gene, "N/A");
        assert_eq!(table[1].description, "Second protein");
    }

    #[test]
    fn test_order_is_preserved() {
        let table = parse_fasta(FASTA).unwrap();
        assert_eq!(table[0].accession, "P11111");
        assert_eq!(table[1].accession, "Q22222");
    }

    #[test]
    fn test_header_without_pipes_is_an_error() {
        assert!(parse_fasta(">headeronly\nSEQ").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_fasta("").unwrap().is_empty());
    }
}
