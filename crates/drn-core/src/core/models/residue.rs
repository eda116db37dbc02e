use phf::{Set, phf_set};

#[rustfmt::skip]
static PROTEIN_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    // --- Standard amino acids ---
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
    // --- Protonation and force-field variants ---
    "HSE", "HSD", "HSP", "HID", "HIE", "HIP", "CYX", "CYM", "ASH", "GLH", "LYN",
    // --- Common terminal-capped and modified forms ---
    "ACE", "NME", "MSE", "SEP", "TPO", "PTR",
};

/// Returns `true` if the residue name denotes an amino acid.
///
/// The comparison trims surrounding whitespace and is case-sensitive, matching
/// the upper-case convention of PDB residue names.
pub fn is_protein_residue(residue_name: &str) -> bool {
    PROTEIN_RESIDUE_NAMES.contains(residue_name.trim())
}
