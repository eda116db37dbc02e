use crate::core::io::mmcif::{AnnotatedAtom, save_annotated_structure};
use crate::core::metrics::Metric;
use crate::core::models::frame::Frame;
use crate::core::models::topology::Topology;
use crate::core::selection::AtomSelection;
use crate::engine::aggregate::AggregateTable;
use crate::engine::error::EngineError;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Projects aggregated per-residue values onto a reference structure.
///
/// The reference is usually the first model of the topology file. The
/// selection must be the one the networks were built with, so that the `i`-th
/// selected atom is the `i`-th row of the table.
pub struct StructureMapper<'a> {
    reference: &'a Frame,
    selection: &'a AtomSelection,
}

impl<'a> StructureMapper<'a> {
    pub fn new(reference: &'a Frame, selection: &'a AtomSelection) -> Self {
        Self {
            reference,
            selection,
        }
    }

    /// Pairs each selected atom with its value from `column`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SelectionMismatch`] if the selection size differs
    /// from the column length.
    pub fn annotate(&self, column: &[f64]) -> Result<Vec<AnnotatedAtom<'a>>, EngineError> {
        let indices = self.reference.select(self.selection);
        if indices.len() != column.len() {
            return Err(EngineError::SelectionMismatch {
                expected: column.len(),
                found: indices.len(),
            });
        }

        let topology: &'a Topology = self.reference.topology();
        let positions = self.reference.positions();
        indices
            .into_iter()
            .zip(column)
            .map(|(idx, &b_factor)| {
                let atom = topology.atom(idx).ok_or_else(|| {
                    EngineError::Internal(format!("selected atom {idx} is outside the topology"))
                })?;
                Ok(AnnotatedAtom {
                    atom,
                    position: positions[idx],
                    b_factor,
                })
            })
            .collect()
    }

    /// Writes `<basename>_<stat>_<label>.cif` for every metric of the table
    /// whose column is not identically zero, returning the written paths.
    #[instrument(skip_all, name = "structure_mapping", fields(statistic = %table.statistic()))]
    pub fn write(
        &self,
        table: &AggregateTable,
        directory: &Path,
        basename: &str,
    ) -> Result<Vec<PathBuf>, EngineError> {
        let selected = self.reference.select(self.selection).len();
        if selected != table.residue_count() {
            return Err(EngineError::SelectionMismatch {
                expected: table.residue_count(),
                found: selected,
            });
        }

        let mut written = Vec::new();
        for (metric, column) in table.columns() {
            if column.iter().all(|&v| v == 0.0) {
                info!(%metric, "All values are zero; skipping structure mapping");
                continue;
            }
            let path = directory.join(file_name(basename, table, metric));
            let atoms = self.annotate(column)?;
            let block = format!("{}_{}_{}", basename, table.statistic(), metric.label());
            save_annotated_structure(&path, &block, &atoms)?;
            info!(%metric, path = %path.display(), "Mapped values onto structure");
            written.push(path);
        }
        Ok(written)
    }
}

fn file_name(basename: &str, table: &AggregateTable, metric: Metric) -> String {
    format!("{}_{}_{}.cif", basename, table.statistic(), metric.label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::engine::aggregate::{Statistic, aggregate};
    use crate::engine::dataset::Dataset;
    use nalgebra::Point3;
    use std::sync::Arc;

    fn reference() -> Frame {
        let topology = Topology::from_atoms(vec![
            Atom::new(1, "N", "ALA", 1, 'A'),
            Atom::new(2, "CB", "ALA", 1, 'A'),
            Atom::new(3, "CA", "GLY", 2, 'A'),
            Atom::new(4, "CB", "SER", 3, 'A'),
        ]);
        let positions = (0..4).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        Frame::new(1, Arc::new(topology), positions).unwrap()
    }

    fn table() -> AggregateTable {
        let mut dataset = Dataset::new();
        dataset.insert(Metric::Degree, 1, vec![0.5, 1.0, 0.5]).unwrap();
        dataset.insert(Metric::Betweenness, 1, vec![0.0, 0.0, 0.0]).unwrap();
        aggregate(&dataset, Statistic::Mean).unwrap()
    }

    #[test]
    fn annotate_pairs_selected_atoms_with_values() {
        let reference = reference();
        let selection = AtomSelection::default();
        let mapper = StructureMapper::new(&reference, &selection);

        let atoms = mapper.annotate(&[0.1, 0.2, 0.3]).unwrap();
        let names: Vec<_> = atoms.iter().map(|a| a.atom.name.as_str()).collect();
        assert_eq!(names, vec!["CB", "CA", "CB"]);
        assert_eq!(atoms[1].position, Point3::new(2.0, 0.0, 0.0));
        assert_eq!(atoms[2].b_factor, 0.3);
    }

    #[test]
    fn write_skips_all_zero_columns() {
        let dir = tempfile::tempdir().unwrap();
        let reference = reference();
        let selection = AtomSelection::default();
        let written = StructureMapper::new(&reference, &selection)
            .write(&table(), dir.path(), "md")
            .unwrap();

        assert_eq!(written, vec![dir.path().join("md_mean_DC.cif")]);
        let text = std::fs::read_to_string(&written[0]).unwrap();
        assert!(text.starts_with("data_md_mean_DC"));
        assert_eq!(text.lines().filter(|l| l.starts_with("ATOM ")).count(), 3);
        assert!(!dir.path().join("md_mean_BC.cif").exists());
    }

    #[test]
    fn selection_size_must_match_the_table() {
        let dir = tempfile::tempdir().unwrap();
        let reference = reference();
        let selection = AtomSelection::new(Vec::new());
        let err = StructureMapper::new(&reference, &selection)
            .write(&table(), dir.path(), "md")
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::SelectionMismatch {
                expected: 3,
                found: 0
            }
        ));
    }
}
