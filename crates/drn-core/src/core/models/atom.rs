use super::residue::is_protein_residue;

/// Static identity of an atom, shared by every frame of a trajectory.
///
/// Coordinates are deliberately absent: they live in [`Frame`](super::frame::Frame)
/// so that one topology can back an arbitrary number of timesteps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    /// The serial number from the source file.
    pub serial: usize,
    /// The name of the atom (e.g., "CA", "CB").
    pub name: String,
    /// The name of the parent residue (e.g., "ALA", "ATP").
    pub residue_name: String,
    /// The residue sequence number from the source file.
    pub residue_number: isize,
    /// The chain identifier.
    pub chain_id: char,
    /// The element symbol, empty if the source did not provide one.
    pub element: String,
    /// Whether the atom came from a HETATM record.
    pub hetero: bool,
}

impl Atom {
    /// Creates a new `Atom` from an ATOM record with no element information.
    ///
    /// # Arguments
    ///
    /// * `serial` - The serial number of the atom.
    /// * `name` - The atom name.
    /// * `residue_name` - The name of the residue the atom belongs to.
    /// * `residue_number` - The residue sequence number.
    /// * `chain_id` - The chain identifier.
    pub fn new(
        serial: usize,
        name: &str,
        residue_name: &str,
        residue_number: isize,
        chain_id: char,
    ) -> Self {
        Self {
            serial,
            name: name.to_string(),
            residue_name: residue_name.to_string(),
            residue_number,
            chain_id,
            element: String::new(),
            hetero: false,
        }
    }

    /// Returns `true` if the atom belongs to a standard amino-acid residue.
    pub fn is_protein(&self) -> bool {
        is_protein_residue(&self.residue_name)
    }

    /// Returns the element symbol, inferring it from the atom name when the
    /// source left the element column blank.
    pub fn element_symbol(&self) -> String {
        if !self.element.is_empty() {
            return self.element.clone();
        }
        self.name
            .trim_start_matches(|c: char| c.is_ascii_digit())
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase().to_string())
            .unwrap_or_default()
    }
}
