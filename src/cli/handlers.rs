// src/cli/handlers.rs
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use super::args::OutputFormat;
use crate::config::Config;
use crate::error::TaxonomyError;
use crate::exit::TaxonExit;
use crate::io::{self, csv};
use crate::taxonomy::{EdgeWeights, Taxonomy, Vertex, VertexId, VertexSet};

fn load(file: &Path, config: &Config) -> Result<Taxonomy> {
    io::load_file(file, config.taxonomy.clone())
        .with_context(|| format!("failed to load taxonomy from {}", file.display()))
}

fn resolve(taxonomy: &Taxonomy, id: VertexId) -> Result<Vertex<'_>> {
    Ok(taxonomy
        .vertex(id)
        .ok_or(TaxonomyError::UnknownVertex(id))?)
}

/// Seco-style intrinsic IC, `1 - ln(hyponyms + 1) / ln(N)`, plus edge
/// weights equal to the IC gap between child and parent.
///
/// # Errors
/// Returns error if a hyponym count traversal is interrupted.
#[allow(clippy::cast_precision_loss)]
pub fn assign_intrinsic_ic(taxonomy: &mut Taxonomy) -> Result<()> {
    let total = taxonomy.vertex_count() as f64;
    let denominator = total.ln();
    taxonomy.assign_ic_values(|v| {
        if denominator <= 0.0 {
            return Ok(0.0);
        }
        let hyponyms = v.non_inclusive_hyponym_count()? as f64;
        Ok(1.0 - (hyponyms + 1.0).ln() / denominator)
    })?;
    taxonomy.assign_edge_weights(|edge| {
        let gap = edge.child().ic_value() - edge.parent().ic_value();
        Ok(EdgeWeights::uniform(gap))
    })?;
    Ok(())
}

/// Aggregate figures printed by `taxon stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxonomyStats {
    pub vertices: usize,
    pub edges: usize,
    pub roots: usize,
    pub leaves: usize,
    pub greatest_depth_min: u32,
    pub greatest_depth_max: u32,
    pub multiple_inheritance: usize,
}

impl TaxonomyStats {
    /// Warms every cache, then reads the aggregates.
    ///
    /// # Errors
    /// Returns `Interrupted` if the warm-up is cancelled.
    pub fn collect(taxonomy: &Taxonomy) -> crate::error::Result<Self> {
        taxonomy.compute_cached_attributes()?;
        let all = taxonomy.vertices();
        Ok(Self {
            vertices: taxonomy.vertex_count(),
            edges: taxonomy.edge_count(),
            roots: all.roots().len(),
            leaves: all.leaves_count(),
            greatest_depth_min: if all.is_empty() { 0 } else { all.greatest_depth_min()? },
            greatest_depth_max: if all.is_empty() { 0 } else { all.greatest_depth_max()? },
            multiple_inheritance: all.iter().filter(|v| v.parents().len() > 1).count(),
        })
    }
}

/// Handles the stats command.
///
/// # Errors
/// Returns error if loading or the warm-up fails.
pub fn handle_stats(file: &Path, config: &Config, format: OutputFormat) -> Result<TaxonExit> {
    let taxonomy = load(file, config)?;
    let stats = TaxonomyStats::collect(&taxonomy)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => {
            println!("{}", file.display().to_string().bold());
            println!("  vertices             {}", stats.vertices.to_string().green());
            println!("  edges                {}", stats.edges.to_string().green());
            println!("  roots                {}", stats.roots);
            println!("  leaves               {}", stats.leaves);
            println!("  multiple inheritance {}", stats.multiple_inheritance);
            println!("  max depth (min/max)  {}/{}", stats.greatest_depth_min, stats.greatest_depth_max);
        }
    }
    Ok(TaxonExit::Success)
}

/// Handles the ancestors command.
///
/// # Errors
/// Returns error if loading fails or the id is unknown.
pub fn handle_ancestors(file: &Path, config: &Config, id: VertexId, include_self: bool) -> Result<TaxonExit> {
    let taxonomy = load(file, config)?;
    let vertex = resolve(&taxonomy, id)?;
    let ancestors = vertex.ancestors(include_self)?;
    println!(
        "{} {} {}",
        id.to_string().bold(),
        format!("({} ancestors)", ancestors.len()).dimmed(),
        ancestors
    );
    Ok(TaxonExit::Success)
}

/// Handles the lcs command.
///
/// # Errors
/// Returns error if loading fails, an id is unknown or no common ancestor exists.
pub fn handle_lcs(file: &Path, config: &Config, a: VertexId, b: VertexId, longest: bool) -> Result<TaxonExit> {
    let taxonomy = load(file, config)?;
    let lcs = taxonomy.lcs(resolve(&taxonomy, a)?, resolve(&taxonomy, b)?, longest)?;
    let depth = if longest { lcs.depth_max()? } else { lcs.depth_min()? };
    println!(
        "{} {} {}",
        "LCS:".green().bold(),
        lcs.id(),
        format!("(depth {depth})").dimmed()
    );
    Ok(TaxonExit::Success)
}

/// Handles the mica command.
///
/// # Errors
/// Returns error if loading fails, an id is unknown or no MICA exists.
pub fn handle_mica(file: &Path, config: &Config, a: VertexId, b: VertexId) -> Result<TaxonExit> {
    let mut taxonomy = load(file, config)?;
    assign_intrinsic_ic(&mut taxonomy)?;
    let mica = taxonomy.mica(resolve(&taxonomy, a)?, resolve(&taxonomy, b)?)?;
    println!(
        "{} {} {}",
        "MICA:".green().bold(),
        mica.id(),
        format!("(IC {:.4})", mica.ic_value()).dimmed()
    );
    Ok(TaxonExit::Success)
}

/// Handles the distance command.
///
/// # Errors
/// Returns error if loading fails or an id is unknown.
pub fn handle_distance(file: &Path, config: &Config, a: VertexId, b: VertexId, weighted: bool) -> Result<TaxonExit> {
    let mut taxonomy = load(file, config)?;
    if weighted {
        assign_intrinsic_ic(&mut taxonomy)?;
    }
    let source = resolve(&taxonomy, a)?;
    let target = resolve(&taxonomy, b)?;
    let distance = source.shortest_path_distance_to(target, weighted)?;
    if distance.is_finite() {
        println!("{} {distance}", "distance:".green().bold());
    } else {
        println!("{} {}", "distance:".green().bold(), "unreachable".yellow());
    }
    Ok(TaxonExit::Success)
}

/// Handles the export command.
///
/// # Errors
/// Returns error if loading or writing fails.
pub fn handle_export(file: &Path, config: &Config, vertices: &Path, edges: Option<&Path>) -> Result<TaxonExit> {
    let mut taxonomy = load(file, config)?;
    assign_intrinsic_ic(&mut taxonomy)?;
    taxonomy.compute_cached_attributes()?;

    csv::save_vertices(&taxonomy, &config.export, vertices)
        .with_context(|| format!("failed to write {}", vertices.display()))?;
    println!("{} {}", "wrote".green(), vertices.display());

    if let Some(edges) = edges {
        csv::save_edges(&taxonomy, &config.export, edges)
            .with_context(|| format!("failed to write {}", edges.display()))?;
        println!("{} {}", "wrote".green(), edges.display());
    }
    Ok(TaxonExit::Success)
}
