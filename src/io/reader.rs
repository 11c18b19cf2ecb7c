// src/io/reader.rs
//! Line-oriented taxonomy files.
//!
//! Each non-blank line is `id;parent;parent;...` with unsigned integer
//! fields. Records may appear in any order; they are sorted parents-first
//! before insertion.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::path::Path;

use crate::config::TaxonomyConfig;
use crate::error::{Result, TaxonomyError};
use crate::taxonomy::{Taxonomy, VertexId};

/// One parsed line: a vertex id and its parent ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyRecord {
    pub id: VertexId,
    pub parents: Vec<VertexId>,
}

/// Parses one line. Returns `Ok(None)` for blank lines.
///
/// # Errors
/// Returns `Parse` if a field is not an unsigned 32-bit integer or a
/// non-blank line holds only separators.
pub fn parse_record(line: &str, line_no: usize) -> Result<Option<TaxonomyRecord>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut fields: Vec<&str> = line.split(';').map(str::trim).collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }

    let mut ids = fields.into_iter().map(|field| {
        field.parse::<VertexId>().map_err(|e| TaxonomyError::Parse {
            line: line_no,
            message: format!("invalid vertex id '{field}': {e}"),
        })
    });
    let Some(id) = ids.next().transpose()? else {
        return Err(TaxonomyError::Parse {
            line: line_no,
            message: "missing vertex id".to_string(),
        });
    };
    let parents = ids.collect::<Result<Vec<_>>>()?;
    Ok(Some(TaxonomyRecord { id, parents }))
}

/// Parses every line of `content`.
///
/// A record whose id was already seen replaces the earlier one but keeps its
/// position.
///
/// # Errors
/// Returns `Parse` on the first malformed line.
pub fn parse_records(content: &str) -> Result<Vec<TaxonomyRecord>> {
    let mut records: Vec<TaxonomyRecord> = Vec::new();
    let mut seen: HashMap<VertexId, usize> = HashMap::new();

    for (i, line) in content.lines().enumerate() {
        let Some(record) = parse_record(line, i + 1)? else {
            continue;
        };
        if let Some(&slot) = seen.get(&record.id) {
            tracing::warn!(id = record.id, line = i + 1, "duplicate record replaces earlier one");
            if let Some(existing) = records.get_mut(slot) {
                *existing = record;
            }
        } else {
            seen.insert(record.id, records.len());
            records.push(record);
        }
    }
    Ok(records)
}

/// Orders `records` so that every parent precedes its children.
///
/// Records whose parents are not emitted yet go back to the end of the
/// queue. A full pass over the queue without progress means the remaining
/// records depend on each other.
///
/// # Errors
/// Returns `MissingParent` for a parent id with no record and
/// `UnresolvedRecords` when parents form a cycle.
pub fn topological_order(records: Vec<TaxonomyRecord>) -> Result<Vec<TaxonomyRecord>> {
    let known: HashSet<VertexId> = records.iter().map(|r| r.id).collect();
    for record in &records {
        if let Some(&parent) = record.parents.iter().find(|p| !known.contains(p)) {
            return Err(TaxonomyError::MissingParent {
                vertex: record.id,
                parent,
            });
        }
    }

    let mut emitted: HashSet<VertexId> = HashSet::with_capacity(records.len());
    let mut ordered = Vec::with_capacity(records.len());
    let mut pending: VecDeque<TaxonomyRecord> = records.into();
    let mut stalled = 0;

    while let Some(record) = pending.pop_front() {
        if record.parents.iter().all(|p| emitted.contains(p)) {
            emitted.insert(record.id);
            ordered.push(record);
            stalled = 0;
        } else {
            pending.push_back(record);
            stalled += 1;
            if stalled > pending.len() {
                let mut ids: Vec<VertexId> = pending.iter().map(|r| r.id).collect();
                ids.sort_unstable();
                return Err(TaxonomyError::UnresolvedRecords(ids));
            }
        }
    }
    Ok(ordered)
}

/// Builds a taxonomy from file content.
///
/// # Errors
/// Returns `Parse` for malformed lines, `MissingParent` or
/// `UnresolvedRecords` for inconsistent records.
pub fn load_str(content: &str, config: TaxonomyConfig) -> Result<Taxonomy> {
    let records = topological_order(parse_records(content)?)?;
    let mut taxonomy = Taxonomy::with_config(config);
    for record in &records {
        taxonomy.add_vertex(record.id, &record.parents)?;
    }
    tracing::debug!(
        vertices = taxonomy.vertex_count(),
        edges = taxonomy.edge_count(),
        "taxonomy loaded"
    );
    Ok(taxonomy)
}

/// Reads and builds the taxonomy stored at `path`.
///
/// # Errors
/// Returns `Io` if the file cannot be read, otherwise see [`load_str`].
pub fn load_file(path: &Path, config: TaxonomyConfig) -> Result<Taxonomy> {
    let content = fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "reading taxonomy");
    load_str(&content, config)
}
