use super::{OutputError, with_suffix};
use crate::core::graph::ContactGraph;
use crate::core::models::atom::Atom;
use crate::core::models::topology::Topology;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

fn node_atom<'t>(
    graph: &ContactGraph,
    topology: &'t Topology,
    node: usize,
) -> Option<&'t Atom> {
    graph.atom_index(node).and_then(|idx| topology.atom(idx))
}

fn escape_gml(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Writes a contact graph in GML.
///
/// Every node carries its residue name, residue number, chain and atom name.
pub fn write_gml(
    graph: &ContactGraph,
    topology: &Topology,
    writer: &mut impl Write,
) -> io::Result<()> {
    writeln!(writer, "graph [")?;
    writeln!(writer, "  directed 0")?;
    if let Some(threshold) = graph.threshold() {
        writeln!(writer, "  threshold {}", threshold)?;
    }
    for node in 0..graph.node_count() {
        writeln!(writer, "  node [")?;
        writeln!(writer, "    id {}", node)?;
        writeln!(writer, "    label \"{}\"", node)?;
        if let Some(atom) = node_atom(graph, topology, node) {
            writeln!(writer, "    residue \"{}\"", escape_gml(&atom.residue_name))?;
            writeln!(writer, "    resid {}", atom.residue_number)?;
            writeln!(writer, "    chain \"{}\"", escape_gml(&atom.chain_id.to_string()))?;
            writeln!(writer, "    atom \"{}\"", escape_gml(&atom.name))?;
        }
        writeln!(writer, "  ]")?;
    }
    for (source, target) in graph.edges() {
        writeln!(writer, "  edge [")?;
        writeln!(writer, "    source {}", source)?;
        writeln!(writer, "    target {}", target)?;
        writeln!(writer, "  ]")?;
    }
    writeln!(writer, "]")?;
    Ok(())
}

/// Writes a contact graph in GraphML with the same node attributes as
/// [`write_gml`].
pub fn write_graphml(
    graph: &ContactGraph,
    topology: &Topology,
    writer: &mut impl Write,
) -> io::Result<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        writer,
        r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">"#
    )?;
    writeln!(writer, r#"  <key id="d0" for="node" attr.name="residue" attr.type="string"/>"#)?;
    writeln!(writer, r#"  <key id="d1" for="node" attr.name="resid" attr.type="long"/>"#)?;
    writeln!(writer, r#"  <key id="d2" for="node" attr.name="chain" attr.type="string"/>"#)?;
    writeln!(writer, r#"  <key id="d3" for="node" attr.name="atom" attr.type="string"/>"#)?;
    writeln!(writer, r#"  <graph edgedefault="undirected">"#)?;
    for node in 0..graph.node_count() {
        match node_atom(graph, topology, node) {
            Some(atom) => {
                writeln!(writer, r#"    <node id="{}">"#, node)?;
                writeln!(writer, r#"      <data key="d0">{}</data>"#, escape_xml(&atom.residue_name))?;
                writeln!(writer, r#"      <data key="d1">{}</data>"#, atom.residue_number)?;
                writeln!(writer, r#"      <data key="d2">{}</data>"#, escape_xml(&atom.chain_id.to_string()))?;
                writeln!(writer, r#"      <data key="d3">{}</data>"#, escape_xml(&atom.name))?;
                writeln!(writer, "    </node>")?;
            }
            None => writeln!(writer, r#"    <node id="{}"/>"#, node)?,
        }
    }
    for (source, target) in graph.edges() {
        writeln!(writer, r#"    <edge source="{}" target="{}"/>"#, source, target)?;
    }
    writeln!(writer, "  </graph>")?;
    writeln!(writer, "</graphml>")?;
    Ok(())
}

fn write_file(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|e| OutputError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| OutputError::io(path, e))
}

/// Persists a graph as `<prefix>_graph.gml` and `<prefix>_graph.graphml`,
/// returning the written paths.
pub fn save_graph(
    graph: &ContactGraph,
    topology: &Topology,
    prefix: &Path,
) -> Result<[PathBuf; 2], OutputError> {
    let gml_path = with_suffix(prefix, "_graph.gml");
    let graphml_path = with_suffix(prefix, "_graph.graphml");
    write_file(&gml_path, |w| write_gml(graph, topology, w))?;
    write_file(&graphml_path, |w| write_graphml(graph, topology, w))?;
    Ok([gml_path, graphml_path])
}
