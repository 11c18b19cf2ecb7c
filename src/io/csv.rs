// src/io/csv.rs
//! Attribute tables for vertices and edges, one row per record.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::ExportConfig;
use crate::error::{Result, TaxonomyError};
use crate::taxonomy::{Edge, Taxonomy, Vertex, VertexSet};

fn vertex_header(config: &ExportConfig) -> String {
    let mut columns = vec!["Synset ID", "Words", "ParentsID", "IC value"];
    if config.include_probability {
        columns.push("Probability");
    }
    columns.extend([
        "Depth",
        "Longest depth",
        "# Children",
        "# Parents",
        "# Subsumers",
        "# Hyponyms",
        "# Leaves",
    ]);
    columns.join(&config.separator)
}

/// Quotes `value` when it holds the separator, a quote or a line break,
/// doubling embedded quotes.
fn escape_field<'v>(value: &'v str, separator: &str) -> Cow<'v, str> {
    let needs_quotes = value.contains(separator)
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');
    if needs_quotes {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

fn vertex_row(vertex: Vertex<'_>, config: &ExportConfig) -> Result<String> {
    let parents = vertex
        .parents()
        .ids()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");

    let mut fields = vec![
        vertex.id().to_string(),
        escape_field(vertex.string_tag(), &config.separator).into_owned(),
        parents,
        vertex.ic_value().to_string(),
    ];
    if config.include_probability {
        fields.push(vertex.probability().to_string());
    }
    fields.extend([
        vertex.depth_min()?.to_string(),
        vertex.depth_max()?.to_string(),
        vertex.children_count().to_string(),
        vertex.parent_count().to_string(),
        vertex.non_inclusive_ancestor_count()?.to_string(),
        vertex.non_inclusive_hyponym_count()?.to_string(),
        vertex.non_inclusive_subsumed_leaf_count()?.to_string(),
    ]);
    Ok(fields.join(&config.separator))
}

/// Rows are oriented top-down: the source is the parent.
fn edge_row(edge: Edge<'_>, separator: &str) -> String {
    [
        edge.parent().id().to_string(),
        edge.child().id().to_string(),
        edge.cond_probability().to_string(),
        edge.weight().to_string(),
    ]
    .join(separator)
}

/// Writes the vertex table, header first, in insertion order.
///
/// # Errors
/// Returns `Io` on write failure and `Interrupted` if a depth or count
/// computation is cancelled.
pub fn write_vertices<W: Write>(taxonomy: &Taxonomy, config: &ExportConfig, out: &mut W) -> Result<()> {
    writeln!(out, "{}", vertex_header(config))?;
    for vertex in taxonomy.vertices().iter() {
        writeln!(out, "{}", vertex_row(vertex, config)?)?;
    }
    Ok(())
}

/// Writes the edge table, header first, in insertion order.
///
/// # Errors
/// Returns `Io` on write failure.
pub fn write_edges<W: Write>(taxonomy: &Taxonomy, config: &ExportConfig, out: &mut W) -> Result<()> {
    let sep = config.separator.as_str();
    writeln!(out, "{}", ["Source ID", "Target ID", "CondProbability", "IC weight"].join(sep))?;
    for edge in taxonomy.edges().iter() {
        writeln!(out, "{}", edge_row(edge, sep))?;
    }
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| TaxonomyError::Io {
            source,
            path: path.to_path_buf(),
        })
}

fn finish(mut writer: BufWriter<File>, path: &Path) -> Result<()> {
    writer.flush().map_err(|source| TaxonomyError::Io {
        source,
        path: path.to_path_buf(),
    })
}

/// # Errors
/// See [`write_vertices`]; I/O errors carry `path`.
pub fn save_vertices(taxonomy: &Taxonomy, config: &ExportConfig, path: &Path) -> Result<()> {
    let mut writer = create(path)?;
    write_vertices(taxonomy, config, &mut writer)?;
    finish(writer, path)?;
    tracing::debug!(path = %path.display(), rows = taxonomy.vertex_count(), "vertex table written");
    Ok(())
}

/// # Errors
/// See [`write_edges`]; I/O errors carry `path`.
pub fn save_edges(taxonomy: &Taxonomy, config: &ExportConfig, path: &Path) -> Result<()> {
    let mut writer = create(path)?;
    write_edges(taxonomy, config, &mut writer)?;
    finish(writer, path)?;
    tracing::debug!(path = %path.display(), rows = taxonomy.edge_count(), "edge table written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Taxonomy {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[1]).unwrap();
        t.add_vertex(3, &[1]).unwrap();
        t.add_vertex(4, &[2, 3]).unwrap();
        t.vertex_mut(1).unwrap().set_string_tag("entity");
        t
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> Vec<String> {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_vertex_table() {
        let t = sample();
        let config = ExportConfig::default();
        let lines = render(|out| write_vertices(&t, &config, out));
        assert_eq!(
            lines[0],
            "Synset ID;Words;ParentsID;IC value;Depth;Longest depth;# Children;# Parents;# Subsumers;# Hyponyms;# Leaves"
        );
        assert_eq!(lines[1], "1;entity;;0;0;0;2;0;0;3;1");
        assert_eq!(lines[4], "4;;2,3;0;2;2;0;2;3;0;0");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_probability_column_and_separator() {
        let mut t = sample();
        t.assign_probabilities(|_| Ok(0.5)).unwrap();
        let config = ExportConfig {
            separator: "\t".to_string(),
            include_probability: true,
        };
        let lines = render(|out| write_vertices(&t, &config, out));
        assert!(lines[0].contains("IC value\tProbability\tDepth"));
        assert!(lines[2].starts_with("2\t\t1\t0\t0.5\t1\t"));
    }

    #[test]
    fn test_edge_table_is_top_down() {
        let mut t = sample();
        t.assign_edge_weights(|_| Ok(crate::taxonomy::EdgeWeights::uniform(1.5)))
            .unwrap();
        let lines = render(|out| write_edges(&t, &ExportConfig::default(), out));
        assert_eq!(lines[0], "Source ID;Target ID;CondProbability;IC weight");
        assert_eq!(lines[1], "1;2;0;1.5");
        assert_eq!(lines[4], "3;4;0;1.5");
    }

    #[test]
    fn test_tag_with_separator_is_quoted() {
        let mut t = sample();
        t.vertex_mut(2)
            .unwrap()
            .set_string_tag("dog;canine \"pet\"\nline");
        let lines = render(|out| write_vertices(&t, &ExportConfig::default(), out));
        assert!(lines[2].starts_with("2;\"dog;canine \"\"pet\"\""));
        assert_eq!(escape_field("plain", ";"), "plain");
        assert_eq!(escape_field("a\tb", "\t"), "\"a\tb\"");
    }
}
