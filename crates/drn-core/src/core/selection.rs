//! Structured atom selection.
//!
//! A selection is a set of inclusion rules evaluated atom by atom; an atom is
//! selected if any rule matches. Resolving a selection against a topology yields
//! atom indices in ascending topology order, which fixes the node numbering of
//! every contact graph built from it.

use crate::core::models::atom::Atom;
use crate::core::models::topology::Topology;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const BETA_CARBON: &str = "CB";
const ALPHA_CARBON: &str = "CA";
const GLYCINE: &str = "GLY";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Invalid ligand specification '{0}'. Expected 'RESNAME:ATOMNAME' (e.g., 'ATP:PG').")]
    InvalidLigand(String),
}

/// A single inclusion rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectionRule {
    /// An atom with the given name on any amino-acid residue.
    ProteinAtom { atom_name: String },
    /// An atom with the given name on residues with the given name.
    ResidueAtom {
        residue_name: String,
        atom_name: String,
    },
}

impl SelectionRule {
    pub fn matches(&self, atom: &Atom) -> bool {
        match self {
            SelectionRule::ProteinAtom { atom_name } => {
                atom.name == *atom_name && atom.is_protein()
            }
            SelectionRule::ResidueAtom {
                residue_name,
                atom_name,
            } => atom.name == *atom_name && atom.residue_name == *residue_name,
        }
    }
}

impl fmt::Display for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionRule::ProteinAtom { atom_name } => {
                write!(f, "(name {} and protein)", atom_name)
            }
            SelectionRule::ResidueAtom {
                residue_name,
                atom_name,
            } => write!(f, "(name {} and resname {})", atom_name, residue_name),
        }
    }
}

/// A ligand atom to include as an extra network node, written `RESNAME:ATOMNAME`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LigandSpec {
    pub residue_name: String,
    pub atom_name: String,
}

impl FromStr for LigandSpec {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (residue_name, atom_name) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| SelectionError::InvalidLigand(s.to_string()))?;
        let (residue_name, atom_name) = (residue_name.trim(), atom_name.trim());
        if residue_name.is_empty() || atom_name.is_empty() || atom_name.contains(':') {
            return Err(SelectionError::InvalidLigand(s.to_string()));
        }
        Ok(Self {
            residue_name: residue_name.to_string(),
            atom_name: atom_name.to_string(),
        })
    }
}

impl From<LigandSpec> for SelectionRule {
    fn from(spec: LigandSpec) -> Self {
        SelectionRule::ResidueAtom {
            residue_name: spec.residue_name,
            atom_name: spec.atom_name,
        }
    }
}

/// Parses a comma-separated ligand list such as `"ATP:PG,MG:MG"`.
///
/// Empty entries (e.g. from a trailing comma) are ignored.
pub fn parse_ligand_list(list: &str) -> Result<Vec<LigandSpec>, SelectionError> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(LigandSpec::from_str)
        .collect()
}

/// An ordered set of inclusion rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomSelection {
    rules: Vec<SelectionRule>,
}

impl AtomSelection {
    pub fn new(rules: Vec<SelectionRule>) -> Self {
        Self { rules }
    }

    /// One node per amino acid: the beta carbon, or the alpha carbon for glycine.
    pub fn residue_representatives() -> Self {
        Self::new(vec![
            SelectionRule::ProteinAtom {
                atom_name: BETA_CARBON.to_string(),
            },
            SelectionRule::ResidueAtom {
                residue_name: GLYCINE.to_string(),
                atom_name: ALPHA_CARBON.to_string(),
            },
        ])
    }

    /// Adds one rule per ligand atom, skipping rules already present.
    pub fn with_ligands(mut self, ligands: impl IntoIterator<Item = LigandSpec>) -> Self {
        for ligand in ligands {
            let rule = SelectionRule::from(ligand);
            if !self.rules.contains(&rule) {
                self.rules.push(rule);
            }
        }
        self
    }

    pub fn rules(&self) -> &[SelectionRule] {
        &self.rules
    }

    pub fn matches(&self, atom: &Atom) -> bool {
        self.rules.iter().any(|rule| rule.matches(atom))
    }

    /// Evaluates the selection into atom indices in ascending topology order.
    pub fn resolve(&self, topology: &Topology) -> Vec<usize> {
        topology
            .atoms()
            .iter()
            .enumerate()
            .filter(|(_, atom)| self.matches(atom))
            .map(|(idx, _)| idx)
            .collect()
    }
}

impl Default for AtomSelection {
    fn default() -> Self {
        Self::residue_representatives()
    }
}

impl fmt::Display for AtomSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                write!(f, " or ")?;
            }
            write!(f, "{}", rule)?;
        }
        Ok(())
    }
}
