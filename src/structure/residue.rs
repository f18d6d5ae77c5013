//! Residue-name tables used by the selection queries.

/// Whether a residue is one of the 20 standard amino acids (plus `UNK`).
pub fn is_standard_amino_acid(residue_name: &str) -> bool {
    matches!(
        residue_name.trim().to_uppercase().as_str(),
        "ALA" | "ARG" | "ASN" | "ASP" | "CYS" | "GLN" | "GLU" | "GLY" | "HIS"
            | "ILE" | "LEU" | "LYS" | "MET" | "PHE" | "PRO" | "SER" | "THR"
            | "TRP" | "TYR" | "VAL" | "UNK"
    )
}

/// Whether a residue is a standard ribo- or deoxyribonucleotide.
pub fn is_nucleotide(residue_name: &str) -> bool {
    matches!(
        residue_name.trim().to_uppercase().as_str(),
        "A" | "C" | "G" | "U" | "I" | "N" | "DA" | "DC" | "DG" | "DT" | "DU"
            | "DI" | "DN"
    )
}

/// Whether a polymer residue is one of the standard building blocks.
pub fn is_standard_polymer_residue(residue_name: &str) -> bool {
    is_standard_amino_acid(residue_name) || is_nucleotide(residue_name)
}

/// Whether a residue name denotes solvent water.
pub fn is_water_residue(residue_name: &str) -> bool {
    matches!(
        residue_name.trim().to_uppercase().as_str(),
        "HOH" | "WAT" | "DOD" | "H2O" | "TIP" | "TIP3" | "SOL"
    )
}

/// Atom names that make up the backbone trace: `CA` for amino acids, `P`
/// for nucleotides.
pub fn is_trace_atom(residue_name: &str, atom_name: &str) -> bool {
    if is_nucleotide(residue_name) {
        atom_name == "P"
    } else {
        atom_name == "CA"
    }
}
