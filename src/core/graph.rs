//! Divergence between two tips of a commit graph.
//!
//! The walk is generic over the node type and the parent lookup so it can run
//! against a real repository (`git2::Oid` and `Commit::parent_ids`) or a
//! synthetic graph in tests.
//!
//! # Algorithm
//! 1. Collect every node reachable from the upstream tip, memoizing each
//!    node's parents as they are looked up.
//! 2. Walk from the local tip, stopping at any node the upstream can reach.
//!    Every node visited outside that set is one commit ahead.
//! 3. Expand the nodes where the local walk stopped, using the memoized
//!    parents only. Whatever that expansion covers is shared history; the rest
//!    of the upstream set is behind.
//!
//! Each node is looked up at most twice, so the cost is linear in the size of
//! the history that is actually visited.

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

/// Count the commits unique to `local` (ahead) and unique to `upstream` (behind).
///
/// `parents` is called for each visited node and may fail, in which case the
/// error is returned unchanged.
pub fn ahead_behind<N, E, F>(local: N, upstream: N, mut parents: F) -> Result<(usize, usize), E>
where
    N: Copy + Eq + Hash,
    F: FnMut(N) -> Result<Vec<N>, E>,
{
    if local == upstream {
        return Ok((0, 0));
    }

    let upstream_history = reachable(upstream, &mut parents)?;

    let mut ahead = 0;
    let mut boundary = Vec::new();
    let mut seen = HashSet::from([local]);
    let mut queue = VecDeque::from([local]);
    while let Some(node) = queue.pop_front() {
        if upstream_history.contains_key(&node) {
            boundary.push(node);
            continue;
        }
        ahead += 1;
        for parent in parents(node)? {
            if seen.insert(parent) {
                queue.push_back(parent);
            }
        }
    }

    // Ancestors of the boundary are all inside the upstream history
    let mut common = HashSet::new();
    while let Some(node) = boundary.pop() {
        if !common.insert(node) {
            continue;
        }
        if let Some(node_parents) = upstream_history.get(&node) {
            boundary.extend(node_parents.iter().filter(|p| !common.contains(*p)));
        }
    }

    Ok((ahead, upstream_history.len() - common.len()))
}

/// Every node reachable from `tip`, mapped to its parents
fn reachable<N, E, F>(tip: N, parents: &mut F) -> Result<HashMap<N, Vec<N>>, E>
where
    N: Copy + Eq + Hash,
    F: FnMut(N) -> Result<Vec<N>, E>,
{
    let mut history = HashMap::new();
    let mut stack = vec![tip];
    while let Some(node) = stack.pop() {
        if history.contains_key(&node) {
            continue;
        }
        let node_parents = parents(node)?;
        stack.extend(node_parents.iter().filter(|p| !history.contains_key(*p)));
        history.insert(node, node_parents);
    }
    Ok(history)
}
