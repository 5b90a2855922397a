mod common;

use gitscope::graph::{self, GraphEdge, BASE, LANE_WIDTH, ROW_HEIGHT};

#[test]
fn rows_follow_the_global_log_order() {
    let fixture = common::merge_fixture();
    let repo = fixture.repo();

    let layout = graph::layout(&repo).unwrap();

    let order: Vec<&str> = layout.nodes.iter().map(|n| n.hash.as_str()).collect();
    assert_eq!(
        order,
        vec![
            fixture.c3.as_str(),
            fixture.c4.as_str(),
            fixture.c2.as_str(),
            fixture.c1.as_str(),
        ]
    );

    for (i, node) in layout.nodes.iter().enumerate() {
        assert_eq!(node.y, BASE + i as i32 * ROW_HEIGHT);
    }

    // A commit and its parent on the same lineage sit one row apart.
    let c2 = layout.node(&fixture.c2).unwrap();
    let c1 = layout.node(&fixture.c1).unwrap();
    assert_eq!(c1.y - c2.y, ROW_HEIGHT);
}

#[test]
fn merge_parents_keep_their_edges() {
    let fixture = common::merge_fixture();
    let repo = fixture.repo();

    let layout = graph::layout(&repo).unwrap();

    let edge = |from: &str, to: &str| GraphEdge {
        from: from.to_string(),
        to: to.to_string(),
    };

    // The log is first-parent simplified, but the merge edge to the second
    // parent still shows up in the drawing.
    assert!(layout.edges.contains(&edge(&fixture.c3, &fixture.c2)));
    assert!(layout.edges.contains(&edge(&fixture.c3, &fixture.c4)));
    assert!(layout.edges.contains(&edge(&fixture.c4, &fixture.c2)));
    assert!(layout.edges.contains(&edge(&fixture.c2, &fixture.c1)));
    assert_eq!(layout.edges.len(), 4);
}

#[test]
fn tips_own_their_lanes_and_first_claim_wins_below() {
    let fixture = common::merge_fixture();
    let repo = fixture.repo();

    let layout = graph::layout(&repo).unwrap();

    // Each tip is labeled with its own branch, wherever lane enumeration
    // started.
    assert_eq!(
        layout.node(&fixture.c3).unwrap().branch.as_deref(),
        Some("main")
    );
    assert_eq!(
        layout.node(&fixture.c4).unwrap().branch.as_deref(),
        Some("feature")
    );

    // C2 is reachable from both tips; the first ref enumerated claims it and
    // everything below it.
    let refs = repo.refs().unwrap();
    let first = refs[0].nice_name().to_string();
    let c2 = layout.node(&fixture.c2).unwrap();
    let c1 = layout.node(&fixture.c1).unwrap();
    assert_eq!(c2.branch.as_deref(), Some(first.as_str()));
    assert_eq!(c1.branch.as_deref(), Some(first.as_str()));
    assert_eq!(c2.x, BASE);
    assert_eq!(c1.x, BASE);
}

#[test]
fn canvas_spans_all_lanes_and_rows() {
    let fixture = common::merge_fixture();
    let repo = fixture.repo();

    let layout = graph::layout(&repo).unwrap();

    assert_eq!(layout.height, 3 * ROW_HEIGHT + 2 * BASE);
    assert_eq!(layout.width, LANE_WIDTH + 2 * BASE);
}
