use super::OutputError;
use crate::core::models::atom::Atom;
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// An atom to be written with a per-atom value in the B-factor column.
#[derive(Debug, Clone)]
pub struct AnnotatedAtom<'a> {
    pub atom: &'a Atom,
    pub position: Point3<f64>,
    pub b_factor: f64,
}

const ATOM_SITE_FIELDS: [&str; 15] = [
    "group_PDB",
    "id",
    "type_symbol",
    "label_atom_id",
    "label_alt_id",
    "label_comp_id",
    "label_asym_id",
    "label_seq_id",
    "Cartn_x",
    "Cartn_y",
    "Cartn_z",
    "occupancy",
    "B_iso_or_equiv",
    "auth_seq_id",
    "pdbx_PDB_model_num",
];

fn cif_token(value: &str) -> String {
    if value.is_empty() {
        "?".to_string()
    } else if value.contains(|c: char| c.is_whitespace() || c == '\'') {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

fn format_b_factor(value: f64) -> String {
    if value.is_finite() {
        format!("{:.6}", value)
    } else {
        "?".to_string()
    }
}

/// Writes a single-block mmCIF file with an `_atom_site` loop.
///
/// Serial numbers are renumbered from 1 in the order given.
pub fn write_annotated_structure(
    block_name: &str,
    atoms: &[AnnotatedAtom<'_>],
    writer: &mut impl Write,
) -> io::Result<()> {
    let block_name: String = block_name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    writeln!(writer, "data_{}", block_name)?;
    writeln!(writer, "#")?;
    writeln!(writer, "loop_")?;
    for field in ATOM_SITE_FIELDS {
        writeln!(writer, "_atom_site.{}", field)?;
    }

    for (i, entry) in atoms.iter().enumerate() {
        let atom = entry.atom;
        writeln!(
            writer,
            "{} {} {} {} . {} {} {} {:.3} {:.3} {:.3} 1.00 {} {} 1",
            if atom.hetero { "HETATM" } else { "ATOM" },
            i + 1,
            cif_token(&atom.element_symbol()),
            cif_token(&atom.name),
            cif_token(&atom.residue_name),
            cif_token(&atom.chain_id.to_string()),
            atom.residue_number,
            entry.position.x,
            entry.position.y,
            entry.position.z,
            format_b_factor(entry.b_factor),
            atom.residue_number,
        )?;
    }
    writeln!(writer, "#")?;
    Ok(())
}

pub fn save_annotated_structure(
    path: &Path,
    block_name: &str,
    atoms: &[AnnotatedAtom<'_>],
) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|e| OutputError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_annotated_structure(block_name, atoms, &mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| OutputError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atom_site_loop_carries_b_factors() {
        let cb = Atom::new(40, "CB", "ALA", 7, 'A');
        let mut mg = Atom::new(900, "MG", "MG", 301, 'B');
        mg.hetero = true;
        mg.element = "MG".to_string();
        let atoms = [
            AnnotatedAtom {
                atom: &cb,
                position: Point3::new(1.0, 2.0, 3.0),
                b_factor: 0.125,
            },
            AnnotatedAtom {
                atom: &mg,
                position: Point3::new(-1.5, 0.0, 10.25),
                b_factor: 2.0,
            },
        ];

        let mut out = Vec::new();
        write_annotated_structure("run mean DC", &atoms, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "data_run_mean_DC");
        assert_eq!(lines[2], "loop_");
        assert_eq!(lines[3], "_atom_site.group_PDB");
        assert!(lines.contains(&"_atom_site.B_iso_or_equiv"));
        assert!(lines.contains(&"ATOM 1 C CB . ALA A 7 1.000 2.000 3.000 1.00 0.125000 7 1"));
        assert!(lines.contains(&"HETATM 2 MG MG . MG B 301 -1.500 0.000 10.250 1.00 2.000000 301 1"));
        assert_eq!(lines.last(), Some(&"#"));
    }

    #[test]
    fn tokens_with_spaces_are_quoted() {
        assert_eq!(cif_token("O5'"), "\"O5'\"");
        assert_eq!(cif_token(""), "?");
        assert_eq!(cif_token("CA"), "CA");
    }

    #[test]
    fn undefined_values_are_written_as_unknown() {
        assert_eq!(format_b_factor(f64::NAN), "?");
        assert_eq!(format_b_factor(0.5), "0.500000");
    }
}
