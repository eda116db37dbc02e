use super::atom::Atom;

/// The static layout of a molecular system: its atoms in file order.
///
/// A topology is immutable once built and is shared (behind an `Arc`) by every
/// [`Frame`](super::frame::Frame) of a trajectory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    atoms: Vec<Atom>,
}

impl Topology {
    /// Builds a topology from atoms in file order.
    pub fn from_atoms(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Returns `true` if both topologies describe the same atoms in the same
    /// order, ignoring serial numbers (which renumbering tools freely rewrite).
    pub fn is_compatible_with(&self, other: &Topology) -> bool {
        self.atoms.len() == other.atoms.len()
            && self.atoms.iter().zip(&other.atoms).all(|(a, b)| {
                a.name == b.name
                    && a.residue_name == b.residue_name
                    && a.residue_number == b.residue_number
                    && a.chain_id == b.chain_id
            })
    }
}
