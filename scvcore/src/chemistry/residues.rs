use std::collections::HashMap;

/// The twenty canonical amino acid one-letter codes accepted in peptide
/// sequence lines.
pub const CANONICAL_RESIDUES: &str = "ARNDCQEGHILKMFPSTWYV";

/// Amino Acid Names
///
/// # Arguments
///
/// None
///
/// # Returns
///
/// * `HashMap<char, &'static str>` - a map of one-letter codes to amino acid names
///
/// # Example
///
/// ```
/// use scvcore::chemistry::residues::residue_names;
///
/// let names = residue_names();
/// assert_eq!(names.get(&'K'), Some(&"Lysine"));
/// ```
pub fn residue_names() -> HashMap<char, &'static str> {
    let mut map = HashMap::new();
    map.insert('A', "Alanine");
    map.insert('R', "Arginine");
    map.insert('N', "Asparagine");
    map.insert('D', "Aspartic Acid");
    map.insert('C', "Cysteine");
    map.insert('Q', "Glutamine");
    map.insert('E', "Glutamic Acid");
    map.insert('G', "Glycine");
    map.insert('H', "Histidine");
    map.insert('I', "Isoleucine");
    map.insert('L', "Leucine");
    map.insert('K', "Lysine");
    map.insert('M', "Methionine");
    map.insert('F', "Phenylalanine");
    map.insert('P', "Proline");
    map.insert('S', "Serine");
    map.insert('T', "Threonine");
    map.insert('W', "Tryptophan");
    map.insert('Y', "Tyrosine");
    map.insert('V', "Valine");
    map
}
