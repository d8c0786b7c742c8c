//! Tests for LensGraph construction and queries

use lens_graph::{
    CentralityMeasure, ClusterAlgorithm, DirectorySnapshot, Episode, FrameRecord, GraphBuilder,
    GraphConfig, GraphError, GraphHandle, LensGraph, LensRecord, Provenance, RelationshipKind,
    RelationshipRecord, RetrievalEnhancer, RetrievedLens, ScoredPath, Snapshot, SnapshotConfig,
};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::sync::Arc;

fn make_lens(id: &str, episode: Option<i64>, tags: &[&str]) -> LensRecord {
    LensRecord {
        id: id.to_string(),
        name: id.to_uppercase(),
        episode: episode.map(Episode::Number),
        lens_type: "lens".to_string(),
        definition: String::new(),
        related_concepts: tags.iter().map(|t| (*t).to_string()).collect(),
    }
}

fn plain(ids: &[&str]) -> Vec<LensRecord> {
    ids.iter().map(|id| make_lens(id, None, &[])).collect()
}

fn make_rel(source: &str, target: &str, weight: f64, kind: &str) -> RelationshipRecord {
    RelationshipRecord {
        source_id: source.to_string(),
        target_id: target.to_string(),
        weight,
        kind: kind.to_string(),
        insight: format!("{source} meets {target}"),
    }
}

fn snapshot(lenses: Vec<LensRecord>, relationships: Vec<RelationshipRecord>) -> Snapshot {
    Snapshot {
        lenses,
        relationships,
        frames: Vec::new(),
    }
}

fn build(snapshot: &Snapshot) -> LensGraph {
    build_with(GraphConfig::default(), snapshot)
}

fn build_with(config: GraphConfig, snapshot: &Snapshot) -> LensGraph {
    GraphBuilder::new(config).build(snapshot).unwrap()
}

fn ids(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// a -> b -> c, both hops weighted 0.9.
fn chain() -> Snapshot {
    snapshot(
        plain(&["a", "b", "c"]),
        vec![
            make_rel("a", "b", 0.9, "builds_on"),
            make_rel("b", "c", 0.9, "builds_on"),
        ],
    )
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn test_curated_edge_beats_temporal() {
    let lenses = vec![make_lens("a", Some(1), &[]), make_lens("b", Some(2), &[])];

    let forward = build(&snapshot(lenses.clone(), vec![make_rel("a", "b", 0.8, "extends")]));
    assert_eq!(forward.edge_count(), 1);
    let edge = forward.edge("a", "b").unwrap();
    assert_eq!(edge.kind, RelationshipKind::Curated("extends".to_string()));
    assert!((edge.weight - 0.8).abs() < 1e-12);

    let reverse = build(&snapshot(lenses, vec![make_rel("b", "a", 0.7, "extends")]));
    assert_eq!(reverse.edge_count(), 1);
    assert!(reverse.edge("a", "b").is_none());
    assert_eq!(
        reverse.edge("b", "a").unwrap().kind,
        RelationshipKind::Curated("extends".to_string())
    );
}

#[test]
fn test_temporal_edges_without_curation() {
    let graph = build(&snapshot(
        vec![
            make_lens("a", Some(1), &[]),
            make_lens("b", Some(2), &[]),
            make_lens("c", Some(4), &[]),
        ],
        Vec::new(),
    ));

    let edge = graph.edge("a", "b").unwrap();
    assert_eq!(edge.kind, RelationshipKind::Temporal);
    assert!((edge.weight - 0.1).abs() < 1e-12);
    assert_eq!(edge.origin.as_deref(), Some("1->2"));
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_rare_tag_threshold() {
    let common: Vec<LensRecord> = (0..6)
        .map(|i| make_lens(&format!("c{i}"), None, &["Systems"]))
        .collect();
    let graph = build(&snapshot(common, Vec::new()));
    assert_eq!(graph.edge_count(), 0);
    assert!(!graph.stats().edges_by_kind.contains_key("concept"));

    for size in 2..=5 {
        let rare: Vec<LensRecord> = (0..size)
            .map(|i| make_lens(&format!("r{i}"), None, &["feedback"]))
            .collect();
        let graph = build(&snapshot(rare, Vec::new()));

        assert_eq!(graph.edge_count(), size * (size - 1) / 2);
        for i in 0..size {
            for j in (i + 1)..size {
                let (x, y) = (format!("r{i}"), format!("r{j}"));
                let edge = graph.edge(&x, &y).or_else(|| graph.edge(&y, &x)).unwrap();
                assert_eq!(edge.kind, RelationshipKind::Concept);
                assert_eq!(edge.origin.as_deref(), Some("feedback"));
            }
        }
    }
}

#[test]
fn test_frame_edges_skip_connected_pairs() {
    let mut snap = snapshot(plain(&["a", "b", "c"]), vec![make_rel("b", "a", 0.6, "extends")]);
    snap.frames.push(FrameRecord {
        id: "f1".to_string(),
        name: "Systems".to_string(),
        lens_ids: ids(&["a", "b", "c", "ghost"]),
    });
    let graph = build(&snap);

    assert!(graph.edge("a", "b").is_none());
    assert_eq!(graph.edge("a", "c").unwrap().kind, RelationshipKind::Frame);
    assert_eq!(graph.edge("b", "c").unwrap().origin.as_deref(), Some("f1"));
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn test_idempotent_rebuild() {
    let mut snap = chain();
    snap.lenses.push(make_lens("d", Some(3), &["loop"]));
    snap.lenses.push(make_lens("e", Some(4), &["loop"]));

    let first = build(&snap);
    let second = build(&snap);

    let edges = |g: &LensGraph| -> Vec<(String, String, String, u64)> {
        g.edges()
            .map(|(s, t, e)| (s.to_string(), t.to_string(), e.kind.to_string(), e.weight.to_bits()))
            .collect()
    };
    assert_eq!(first.lenses().collect::<Vec<_>>(), second.lenses().collect::<Vec<_>>());
    assert_eq!(edges(&first), edges(&second));
    assert_eq!(first.stats(), second.stats());
}

#[test]
fn test_stats_by_kind() {
    let mut snap = chain();
    snap.relationships.push(make_rel("c", "a", 0.4, "contrast"));
    let stats = build(&snap).stats();

    assert_eq!(stats.nodes, 3);
    assert_eq!(stats.edges, 3);
    assert_eq!(
        stats.edges_by_kind,
        BTreeMap::from([("builds_on".to_string(), 2), ("contrast".to_string(), 1)])
    );
}

#[test]
fn test_directory_snapshot_with_missing_frames() {
    let dir = tempfile::tempdir().unwrap();
    let config = SnapshotConfig::default();
    std::fs::write(
        dir.path().join(&config.catalog_file),
        r#"[
            {"id": "a", "name": "Alpha", "episode": 1, "type": "lens"},
            {"id": "b", "name": "Beta", "episode": "2", "type": "lens"},
            {"name": "missing id"}
        ]"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join(&config.relationships_file),
        r#"{"connections": [
            {"source_id": "b", "target_id": "a", "weight": 0.5, "type": "contrast", "insight": "tension"}
        ]}"#,
    )
    .unwrap();

    let graph = GraphBuilder::new(GraphConfig::default())
        .build(&DirectorySnapshot::with_dir(dir.path(), &config))
        .unwrap();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edge("b", "a").unwrap().kind, RelationshipKind::Contrast);
}

#[test]
fn test_missing_catalog_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let result = GraphBuilder::new(GraphConfig::default())
        .build(&DirectorySnapshot::with_dir(dir.path(), &SnapshotConfig::default()));
    assert!(matches!(result, Err(GraphError::EmptyCatalog)));
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

#[test]
fn test_find_path_scores_by_weight() {
    let graph = build(&chain());
    let paths = graph.find_path("a", "c", 4);

    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].lenses, ids(&["a", "b", "c"]));
    assert!((paths[0].score - 1.8).abs() < 1e-9);
}

#[test]
fn test_find_path_edge_cases() {
    let graph = build(&chain());

    assert!(graph.find_path("a", "missing", 4).is_empty());
    assert!(graph.find_path("c", "a", 4).is_empty());
    assert!(graph.find_path("a", "a", 4).is_empty());
    assert!(graph.find_path("a", "c", 1).is_empty());
}

#[test]
fn test_find_path_ranks_and_limits() {
    let graph = build(&snapshot(
        plain(&["a", "b", "c", "d", "e", "f"]),
        vec![
            make_rel("a", "f", 0.5, "x"),
            make_rel("a", "b", 0.9, "x"),
            make_rel("b", "f", 0.9, "x"),
            make_rel("a", "c", 0.3, "x"),
            make_rel("c", "f", 0.3, "x"),
            make_rel("a", "d", 0.1, "x"),
            make_rel("d", "f", 0.1, "x"),
        ],
    ));
    let paths = graph.find_path("a", "f", 4);

    let routes: Vec<Vec<String>> = paths.iter().map(|p| p.lenses.clone()).collect();
    assert_eq!(
        routes,
        vec![ids(&["a", "b", "f"]), ids(&["a", "c", "f"]), ids(&["a", "f"])]
    );
}

#[test]
fn test_suggest_journey_prefers_strong_edges() {
    let mut lenses = plain(&["a", "b", "c"]);
    lenses[2].definition = "How Emergence arises from simple rules".to_string();
    let snap = snapshot(
        lenses,
        vec![
            make_rel("a", "b", 0.9, "x"),
            make_rel("b", "c", 0.9, "x"),
            make_rel("a", "c", 0.05, "x"),
        ],
    );

    let graph = build(&snap);
    assert_eq!(graph.suggest_journey("a", "emergence"), ids(&["a", "b", "c"]));
    assert!(graph.suggest_journey("a", "nothing matches").is_empty());
    assert!(graph.suggest_journey("missing", "emergence").is_empty());

    let mut config = GraphConfig::default();
    config.query.journey_max_edges = 1;
    assert!(build_with(config, &snap).suggest_journey("a", "emergence").is_empty());
}

#[test]
fn test_synthesis_and_progression() {
    let graph = build(&chain());

    let synthesis = graph.synthesis_path(&ids(&["a", "c", "b"])).unwrap();
    assert_eq!(synthesis.paths.len(), 2);
    assert_eq!(synthesis.paths[0].path, ids(&["a", "b"]));
    assert_eq!(synthesis.insight, "These lenses are directly connected");
    assert!(graph.synthesis_path(&ids(&["a"])).is_none());

    let progression = graph.progression("a", "c", 5).unwrap();
    let steps: Vec<&str> = progression.steps.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(steps, vec!["a", "b", "c"]);
    assert!(progression.steps[0].insight.starts_with("Begin with A"));
    assert_eq!(progression.summary, "A 3-step journey from A to C");
    assert!(graph.progression("c", "a", 5).is_none());
}

// ---------------------------------------------------------------------------
// Bridges, contrasts, neighborhoods
// ---------------------------------------------------------------------------

#[test]
fn test_bridge_symmetry() {
    let graph = build(&snapshot(
        plain(&["a", "b", "x", "y"]),
        vec![
            make_rel("a", "x", 0.5, "x"),
            make_rel("x", "b", 0.5, "x"),
            make_rel("b", "y", 0.2, "x"),
            make_rel("y", "a", 0.2, "x"),
        ],
    ));

    let forward: Vec<String> = graph.find_bridges(&ids(&["a", "b"])).into_iter().map(|b| b.id).collect();
    let backward: Vec<String> = graph.find_bridges(&ids(&["b", "a"])).into_iter().map(|b| b.id).collect();

    assert_eq!(forward, ids(&["x", "y"]));
    assert_eq!(backward, ids(&["x", "y"]));
    assert!(graph.find_bridges(&ids(&["a", "missing"])).is_empty());
}

#[test]
fn test_contrasts_outgoing_then_incoming() {
    let graph = build(&snapshot(
        plain(&["a", "b", "c", "d"]),
        vec![
            make_rel("c", "a", 0.4, "paradox"),
            make_rel("a", "b", 0.6, "contrast"),
            make_rel("a", "d", 0.9, "builds_on"),
        ],
    ));
    let contrasts = graph.find_contrasts("a");

    let found: Vec<(&str, &str)> = contrasts
        .iter()
        .map(|c| (c.id.as_str(), c.insight.as_str()))
        .collect();
    assert_eq!(found, vec![("b", "a meets b"), ("c", "c meets a")]);
    assert!(graph.find_contrasts("missing").is_empty());
}

#[test]
fn test_neighborhood_radius_one() {
    let graph = build(&snapshot(
        plain(&["a", "b", "c", "d"]),
        vec![
            make_rel("a", "b", 0.5, "builds_on"),
            make_rel("b", "c", 0.5, "builds_on"),
            make_rel("a", "d", 0.5, "contrast"),
            make_rel("b", "a", 0.5, "extends"),
        ],
    ));
    let near = graph.neighborhood("a", 1);

    assert_eq!(
        near,
        BTreeMap::from([
            ("builds_on".to_string(), ids(&["b"])),
            ("contrast".to_string(), ids(&["d"])),
        ])
    );
    let two = graph.neighborhood("a", 2);
    assert_eq!(two["builds_on"], ids(&["b", "c"]));
    assert!(graph.neighborhood("missing", 2).is_empty());
    assert!(graph.neighborhood("a", 0).is_empty());
}

#[test]
fn test_neighborhood_first_discovery_wins() {
    let graph = build(&snapshot(
        plain(&["a", "b", "c"]),
        vec![
            make_rel("a", "b", 0.1, "extends"),
            make_rel("b", "c", 0.1, "extends"),
            make_rel("a", "c", 0.9, "contrast"),
        ],
    ));
    let near = graph.neighborhood("a", 2);

    assert_eq!(near["extends"], ids(&["b"]));
    assert_eq!(near["contrast"], ids(&["c"]));
}

#[test]
fn test_triads() {
    let graph = build(&snapshot(
        plain(&["t", "u", "v", "s", "m"]),
        vec![
            make_rel("t", "u", 0.5, "contrast"),
            make_rel("t", "v", 0.2, "paradox"),
            make_rel("t", "s", 0.5, "x"),
            make_rel("u", "s", 0.5, "x"),
            make_rel("t", "m", 0.6, "x"),
            make_rel("m", "v", 0.6, "x"),
        ],
    ));
    let triads = graph.triads("t", 5);

    let found: Vec<(&str, &str)> = triads
        .iter()
        .map(|t| (t.antithesis.as_str(), t.synthesis.as_str()))
        .collect();
    assert_eq!(found, vec![("u", "s"), ("v", "m")]);
    assert!(triads[0].synthesis_insight.contains("through S"));
    assert_eq!(graph.triads("t", 1).len(), 1);
}

// ---------------------------------------------------------------------------
// Clusters and centrality
// ---------------------------------------------------------------------------

fn two_triangles() -> Snapshot {
    snapshot(
        plain(&["a", "b", "c", "d", "e", "f", "z"]),
        vec![
            make_rel("a", "b", 0.5, "x"),
            make_rel("b", "c", 0.5, "x"),
            make_rel("c", "a", 0.5, "x"),
            make_rel("d", "e", 0.5, "x"),
            make_rel("e", "f", 0.5, "x"),
            make_rel("f", "d", 0.5, "x"),
            make_rel("c", "d", 0.5, "x"),
        ],
    )
}

#[test]
fn test_louvain_clusters() {
    let clustering = build(&two_triangles()).clusters();

    assert_eq!(clustering.algorithm, "louvain");
    assert_eq!(
        clustering.clusters,
        BTreeMap::from([
            (0, ids(&["a", "b", "c"])),
            (1, ids(&["d", "e", "f"])),
            (2, ids(&["z"])),
        ])
    );
}

#[test]
fn test_component_clusters_drop_singletons() {
    let mut config = GraphConfig::default();
    config.clustering.algorithm = ClusterAlgorithm::ConnectedComponents;
    let clustering = build_with(config, &two_triangles()).clusters();

    assert_eq!(clustering.algorithm, "connected_components");
    assert_eq!(
        clustering.clusters,
        BTreeMap::from([(0, ids(&["a", "b", "c", "d", "e", "f"]))])
    );
}

#[test]
fn test_degree_and_betweenness_rankings() {
    let graph = build(&chain());

    let degree = graph.rank(CentralityMeasure::Degree);
    assert_eq!(degree.used, CentralityMeasure::Degree);
    assert_eq!(degree.entries[0].id, "b");
    assert!((degree.entries[0].score - 1.0).abs() < 1e-12);

    let betweenness = graph.rank(CentralityMeasure::Betweenness);
    let order: Vec<&str> = betweenness.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(order, vec!["b", "a", "c"]);
    assert!((betweenness.entries[0].score - 0.5).abs() < 1e-12);
    assert_eq!(betweenness.entries[0].name, "B");

    let unknown = graph.rank_by_name("closeness");
    assert_eq!(unknown.requested, CentralityMeasure::Degree);
    assert!(!unknown.degraded());
}

#[test]
fn test_pagerank_converges_on_chain() {
    let ranking = build(&chain()).rank(CentralityMeasure::PageRank);

    assert!(!ranking.degraded());
    assert!(ranking.note.is_none());
    assert_eq!(ranking.entries[0].id, "c");
    let total: f64 = ranking.entries.iter().map(|e| e.score).sum();
    assert!((total - 1.0).abs() < 1e-6);
}

#[test]
fn test_pagerank_degradation() {
    let mut config = GraphConfig::default();
    config.centrality.pagerank_max_iter = 0;
    let ranking = build_with(config, &chain()).rank(CentralityMeasure::PageRank);

    assert_eq!(ranking.requested, CentralityMeasure::PageRank);
    assert_eq!(ranking.used, CentralityMeasure::Betweenness);
    assert!(ranking.degraded());
    assert!(ranking.note.is_some());
    assert_eq!(ranking.entries[0].id, "b");

    let mut negative = chain();
    negative.relationships.push(make_rel("c", "a", -1.0, "x"));
    let ranking = build(&negative).rank(CentralityMeasure::PageRank);
    assert_eq!(ranking.used, CentralityMeasure::Betweenness);
    assert!(ranking.note.is_some());
}

#[test]
fn test_eigenvector_falls_back_to_degree_silently() {
    let mut config = GraphConfig::default();
    config.centrality.eigenvector_max_iter = 0;
    let ranking = build_with(config, &chain()).rank(CentralityMeasure::Eigenvector);

    assert_eq!(ranking.used, CentralityMeasure::Degree);
    assert!(ranking.note.is_none());
    assert_eq!(ranking.entries[0].id, "b");
}

#[test]
fn test_eigenvector_on_strongly_connected_graph() {
    let graph = build(&snapshot(
        plain(&["a", "b", "c"]),
        vec![
            make_rel("a", "b", 1.0, "builds_on"),
            make_rel("b", "c", 1.0, "builds_on"),
            make_rel("c", "a", 1.0, "builds_on"),
            make_rel("a", "c", 1.0, "builds_on"),
        ],
    ));
    let ranking = graph.rank(CentralityMeasure::Eigenvector);

    assert_eq!(ranking.used, CentralityMeasure::Eigenvector);
    assert!(!ranking.degraded());
    let order: Vec<&str> = ranking.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(order, vec!["c", "a", "b"]);
    for (entry, expected) in ranking.entries.iter().zip([0.72652, 0.54843, 0.41400]) {
        assert!((entry.score - expected).abs() < 1e-4, "{}: {}", entry.id, entry.score);
    }
}

#[test]
fn test_centrality_limit_and_ties() {
    let lenses: Vec<LensRecord> = (0..12).map(|i| make_lens(&format!("l{i:02}"), None, &[])).collect();
    let ranking = build(&snapshot(lenses, Vec::new())).rank(CentralityMeasure::Degree);

    assert_eq!(ranking.entries.len(), 10);
    let order: Vec<&str> = ranking.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(order[..3].to_vec(), vec!["l00", "l01", "l02"]);
}

// ---------------------------------------------------------------------------
// Retrieval enhancement
// ---------------------------------------------------------------------------

fn retrieval_graph() -> Arc<LensGraph> {
    Arc::new(build(&snapshot(
        plain(&["a", "b", "x", "k", "n", "y"]),
        vec![
            make_rel("a", "x", 0.5, "builds_on"),
            make_rel("x", "b", 0.5, "builds_on"),
            make_rel("a", "k", 0.8, "contrast"),
            make_rel("a", "n", 0.3, "extends"),
            make_rel("y", "a", 0.4, "extends"),
        ],
    )))
}

#[test]
fn test_enhance_appends_graph_lenses() {
    let enhancer = RetrievalEnhancer::new(retrieval_graph());
    let initial = vec![
        RetrievedLens::external("a"),
        RetrievedLens::external("b"),
        RetrievedLens::external("ghost"),
    ];
    let enhanced = enhancer.enhance(initial.clone());

    assert_eq!(enhanced[..3].to_vec(), initial);
    let added: Vec<&str> = enhanced[3..].iter().map(|l| l.id.as_str()).collect();
    assert_eq!(added, vec!["x", "k", "n"]);
    assert!(enhanced[3..].iter().all(|l| l.source == Provenance::Graph));
    assert_eq!(enhanced[3].name.as_deref(), Some("X"));
}

#[test]
fn test_enhance_without_graph_hits() {
    let enhancer = RetrievalEnhancer::new(retrieval_graph());
    let initial = vec![RetrievedLens::external("ghost")];
    assert_eq!(enhancer.enhance(initial.clone()), initial);
}

#[test]
fn test_enhance_accepts_loose_metadata() {
    let enhancer = RetrievalEnhancer::new(retrieval_graph());
    let initial: Vec<RetrievedLens> = serde_json::from_value(serde_json::json!([
        {"id": "a", "episode": "3", "related_concepts": null},
        {"id": "b", "episode": 4.0, "score": 0.9}
    ]))
    .unwrap();
    let enhanced = enhancer.enhance(initial.clone());

    assert_eq!(enhanced[..2].to_vec(), initial);
    assert_eq!(enhanced[0].episode, Some(Episode::Text("3".to_string())));
    assert!(enhanced.len() > 2);
}

#[test]
fn test_recommend_sums_both_directions() {
    let enhancer = RetrievalEnhancer::new(retrieval_graph());

    let recs = enhancer.recommend(&ids(&["a"]), 3);
    let found: Vec<&str> = recs.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(found, vec!["k", "x", "y"]);

    let shared = enhancer.recommend(&ids(&["a", "b"]), 2);
    let found: Vec<&str> = shared.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(found, vec!["x", "k"]);
    assert!((shared[0].score - 1.0).abs() < 1e-12);
    assert_eq!(shared[0].reason, "Connected through graph relationships");
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

#[test]
fn test_handle_rebuild_swaps_atomically() {
    let builder = GraphBuilder::new(GraphConfig::default());
    let handle = GraphHandle::build(builder, &chain()).unwrap();
    let before = handle.current();

    let mut bigger = chain();
    bigger.lenses.push(make_lens("d", None, &[]));
    let after = handle.rebuild(&bigger).unwrap();

    assert_eq!(before.node_count(), 3);
    assert_eq!(after.node_count(), 4);
    assert_eq!(handle.current().node_count(), 4);

    assert!(handle.rebuild(&Snapshot::default()).is_err());
    assert_eq!(handle.current().node_count(), 4);

    let previous = handle.replace(build(&chain()));
    assert_eq!(previous.node_count(), 4);
    assert_eq!(handle.current().node_count(), 3);
}

#[test]
fn test_scored_path_serializes_plainly() {
    let path = ScoredPath {
        lenses: ids(&["a", "b"]),
        score: 0.5,
    };
    assert_eq!(
        serde_json::to_value(&path).unwrap(),
        serde_json::json!({"lenses": ["a", "b"], "score": 0.5})
    );
}
