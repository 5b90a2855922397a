//! Lane layout for the commit graph.
//!
//! Every commit in the global (all-refs) history gets a 2D coordinate and,
//! where a branch lineage claims it, a lane label. The layout is best-effort:
//! lanes may cross and are not minimized, which is acceptable for the small
//! to medium histories a self-hosted browser serves.

use std::collections::HashMap;

use crate::error::Result;
use crate::repo::Repo;
use crate::user::UserDirectory;

/// Offset of the first node from the drawing origin, in both axes.
pub const BASE: i32 = 10;

/// Vertical distance between consecutive commits.
pub const ROW_HEIGHT: i32 = 32;

/// Horizontal distance between branch lanes.
pub const LANE_WIDTH: i32 = 32;

#[derive(Clone, Debug)]
pub struct GraphNode {
    pub hash: String,
    pub x: i32,
    pub y: i32,

    /// Short name of the branch whose lineage claimed this commit.
    pub branch: Option<String>,
}

/// A child-to-parent link. Present for every parent, so merge topology is
/// visible even though the log itself is first-parent simplified.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

#[derive(Clone, Debug)]
pub struct GraphLayout {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub width: i32,
    pub height: i32,
}

impl GraphLayout {
    pub fn node(&self, hash: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.hash == hash)
    }
}

/// Lay out the repository's full history as a lane graph.
pub fn layout(repo: &Repo) -> Result<GraphLayout> {
    // Attribution is irrelevant to geometry; skip keyring resolution.
    let users = UserDirectory::empty();
    let commits = repo.commit_log(None, &users)?;

    let mut nodes = Vec::with_capacity(commits.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(commits.len());
    let mut parents: Vec<Vec<String>> = Vec::with_capacity(commits.len());

    for (i, commit) in commits.iter().enumerate() {
        let hash = commit.hash();
        index.insert(hash.clone(), i);
        parents.push(commit.parent_ids().map(|id| id.to_string()).collect());
        nodes.push(GraphNode {
            hash,
            x: BASE,
            y: BASE + i as i32 * ROW_HEIGHT,
            branch: None,
        });
    }

    // Each local ref stakes out a lane at its tip, then propagates the claim
    // down every ancestry path. First claim wins where lineages converge, so
    // refs enumerated earlier keep their lanes. The work stack only ever
    // pushes freshly claimed commits, which bounds the walk to one visit per
    // commit regardless of how many paths reach it.
    let refs = repo.refs()?;
    for (ref_index, r) in refs.iter().enumerate() {
        let tip = match r.inner().peel_to_commit() {
            Ok(commit) => commit.id().to_string(),
            Err(_) => continue,
        };
        let tip_index = match index.get(&tip) {
            Some(&i) => i,
            None => continue,
        };

        nodes[tip_index].x = BASE + ref_index as i32 * LANE_WIDTH;
        nodes[tip_index].branch = Some(r.nice_name().to_string());

        let mut stack = vec![tip_index];
        while let Some(i) = stack.pop() {
            let (x, branch) = (nodes[i].x, nodes[i].branch.clone());
            for parent_hash in &parents[i] {
                if let Some(&pi) = index.get(parent_hash) {
                    if nodes[pi].branch.is_none() {
                        nodes[pi].x = x;
                        nodes[pi].branch = branch.clone();
                        stack.push(pi);
                    }
                }
            }
        }
    }

    let mut edges = Vec::new();
    for (i, node_parents) in parents.iter().enumerate() {
        for parent_hash in node_parents {
            // Parents outside the walked history have no node; skip them.
            if index.contains_key(parent_hash) {
                edges.push(GraphEdge {
                    from: nodes[i].hash.clone(),
                    to: parent_hash.clone(),
                });
            }
        }
    }

    Ok(GraphLayout {
        width: span(refs.len(), LANE_WIDTH),
        height: span(nodes.len(), ROW_HEIGHT),
        nodes,
        edges,
    })
}

fn span(count: usize, step: i32) -> i32 {
    match count {
        0 => 2 * BASE,
        n => (n as i32 - 1) * step + 2 * BASE,
    }
}
