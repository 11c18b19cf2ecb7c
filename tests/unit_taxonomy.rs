// tests/unit_taxonomy.rs
use taxon_core::taxonomy::{OrientedEdgeType, Taxonomy, VertexSet};
use taxon_core::TaxonomyError;

fn chain() -> Taxonomy {
    let mut t = Taxonomy::new();
    t.add_vertex(1, &[]).unwrap();
    t.add_vertex(2, &[1]).unwrap();
    t.add_vertex(3, &[2]).unwrap();
    t
}

fn diamond() -> Taxonomy {
    let mut t = Taxonomy::new();
    t.add_vertex(1, &[]).unwrap();
    t.add_vertex(2, &[1]).unwrap();
    t.add_vertex(3, &[1]).unwrap();
    t.add_vertex(4, &[2, 3]).unwrap();
    t
}

#[test]
fn test_chain_scenario() {
    let t = chain();
    let v1 = t.vertex(1).unwrap();
    let v3 = t.vertex(3).unwrap();
    assert!(v1.is_root());
    assert!(!v1.is_leaf());
    assert!(v3.is_leaf());
    assert_eq!(v3.depth_min().unwrap(), 2);
    assert_eq!(v3.depth_max().unwrap(), 2);
    let lcs = t.lcs(t.vertex(2).unwrap(), v3, false).unwrap();
    assert_eq!(lcs.id(), 2);
}

#[test]
fn test_diamond_scenario() {
    let t = diamond();
    let mut ancestors = t.vertex(4).unwrap().ancestors(false).unwrap().ids();
    ancestors.sort_unstable();
    assert_eq!(ancestors, vec![1, 2, 3]);
    let lcs = t.lcs(t.vertex(2).unwrap(), t.vertex(3).unwrap(), false).unwrap();
    assert_eq!(lcs.id(), 1);
}

#[test]
fn test_duplicate_insert_scenario() {
    let mut t = Taxonomy::new();
    t.add_vertex(1, &[]).unwrap();
    let err = t.add_vertex(1, &[]).unwrap_err();
    assert!(err.is_structural());
    assert!(matches!(err, TaxonomyError::DuplicateId(1)));
    assert_eq!(t.vertex_count(), 1);
    let v1 = t.vertex(1).unwrap();
    assert!(v1.is_root() && v1.is_leaf());
}

#[test]
fn test_missing_parent_scenario() {
    let mut t = Taxonomy::new();
    let err = t.add_vertex(5, &[99]).unwrap_err();
    assert!(err.is_structural());
    assert!(t.vertex(5).is_none());
    assert!(!t.vertices().contains(5));
    assert_eq!(t.vertex_count(), 0);
}

#[test]
fn test_depth_caching_is_idempotent() {
    let t = diamond();
    let v4 = t.vertex(4).unwrap();
    let first = v4.depth_min().unwrap();
    let count = t.traversal_count();
    assert_eq!(v4.depth_min().unwrap(), first);
    assert_eq!(t.traversal_count(), count);
}

#[test]
fn test_ring_visits_every_arc_once() {
    let t = diamond();
    assert_eq!(t.vertex(1).unwrap().arcs().count(), 2);

    let v2 = t.vertex(2).unwrap();
    assert_eq!(v2.arcs().count(), 2);
    // Parent arc first (inserted with the vertex), child arc second.
    let first = v2.first_out_arc().unwrap();
    assert_eq!(first.source(), v2);
    assert_eq!(first.kind(), OrientedEdgeType::SubClassOf);
    assert_eq!(first.target().id(), 1);
    let second = first.next_around_source().unwrap();
    assert_eq!(second.kind(), OrientedEdgeType::SuperClassOf);
    assert_eq!(second.target().id(), 4);
    assert_eq!(second.next_around_source().unwrap(), first);
    assert_eq!(first.opposite().opposite(), first);
    assert_eq!(first.edge().child(), v2);
}

#[test]
fn test_neighbours_and_counts() {
    let t = diamond();
    let v2 = t.vertex(2).unwrap();
    assert_eq!(v2.neighbours().ids(), vec![1, 4]);
    assert_eq!(v2.parents().ids(), vec![1]);
    assert_eq!(v2.children().ids(), vec![4]);
    let v1 = t.vertex(1).unwrap();
    assert_eq!(v1.non_inclusive_hyponym_count().unwrap(), 3);
    assert_eq!(v1.non_inclusive_subsumed_leaf_count().unwrap(), 1);
    assert_eq!(v1.inclusive_subsumed_leaf_count().unwrap(), 1);
    assert_eq!(t.vertex(4).unwrap().inclusive_subsumed_leaf_count().unwrap(), 1);
    assert_eq!(t.vertex(4).unwrap().non_inclusive_ancestor_count().unwrap(), 3);
}

#[test]
fn test_distances_across_forest() {
    let mut t = diamond();
    t.add_vertex(10, &[]).unwrap();
    let v4 = t.vertex(4).unwrap();
    assert_eq!(v4.shortest_path_distance_to(t.vertex(1).unwrap(), false).unwrap(), 2.0);
    assert_eq!(v4.shortest_path_distance_to(t.vertex(2).unwrap(), false).unwrap(), 1.0);
    assert!(v4
        .shortest_path_distance_to(t.vertex(10).unwrap(), false)
        .unwrap()
        .is_infinite());
}

#[test]
fn test_multiple_roots_lcs_is_shared_one() {
    let mut t = Taxonomy::new();
    t.add_vertex(1, &[]).unwrap();
    t.add_vertex(2, &[]).unwrap();
    t.add_vertex(3, &[1, 2]).unwrap();
    t.add_vertex(4, &[2]).unwrap();
    let lcs = t.lcs(t.vertex(3).unwrap(), t.vertex(4).unwrap(), true).unwrap();
    assert_eq!(lcs.id(), 2);
    assert_eq!(t.vertices().roots().ids(), vec![1, 2]);
}

#[test]
fn test_clear_then_rebuild() {
    let mut t = diamond();
    t.clear();
    assert!(t.vertices().is_empty());
    assert!(t.edges().is_empty());
    t.add_vertex(4, &[]).unwrap();
    assert!(t.vertex(4).unwrap().is_root());
}

#[test]
fn test_string_tags_and_base1_depths() {
    let mut t = chain();
    t.vertex_mut(2).unwrap().set_string_tag("animal");
    let v3 = t.vertex(3).unwrap();
    assert_eq!(v3.parent_string_tags(), vec!["animal"]);
    assert_eq!(v3.depth_min_base1().unwrap(), 3);
    assert_eq!(t.vertices().greatest_depth_min_base1().unwrap(), 3);
}
