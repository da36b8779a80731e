//! Deterministic dependency ordering over a session's objects.

use std::collections::HashSet;

use weft_types::ObjectId;

use crate::dag::ReferenceDag;

/// Produce a total order over `storage_order` in which every object appears
/// after all of its transitive parents.
///
/// The traversal is a memoized depth-first walk seeded twice: first with
/// every root candidate in storage order, then with whatever remains
/// (disconnected fragments), also in storage order. Objects with no
/// precedence constraint between them therefore keep their storage order,
/// making the result reproducible for identical input.
///
/// Guarantees:
/// - every id in `storage_order` appears exactly once;
/// - for every recorded edge, the parent precedes the child;
/// - cycles terminate — the first visit wins and the closing edge is
///   silently dropped.
pub fn sequence(storage_order: &[ObjectId], dag: &ReferenceDag) -> Vec<ObjectId> {
    let mut visited: HashSet<ObjectId> = HashSet::with_capacity(storage_order.len());
    let mut out: Vec<ObjectId> = Vec::with_capacity(storage_order.len());

    for id in storage_order.iter().filter(|id| dag.is_root(id)) {
        visit(*id, dag, &mut visited, &mut out);
    }
    for id in storage_order {
        visit(*id, dag, &mut visited, &mut out);
    }

    out
}

/// Post-order DFS with an explicit stack.
///
/// Depth is bounded by the store size, not the thread stack, so a
/// pathologically deep (or maliciously cyclic) chain cannot overflow.
fn visit(
    start: ObjectId,
    dag: &ReferenceDag,
    visited: &mut HashSet<ObjectId>,
    out: &mut Vec<ObjectId>,
) {
    if !visited.insert(start) {
        return;
    }

    // Each frame tracks how many of the node's parents have been expanded.
    let mut stack: Vec<(ObjectId, usize)> = vec![(start, 0)];
    while let Some((id, next_parent)) = stack.last_mut() {
        let parents = dag.parents_of(id);
        match parents.get(*next_parent) {
            Some(parent) => {
                *next_parent += 1;
                if visited.insert(*parent) {
                    stack.push((*parent, 0));
                }
            }
            None => {
                out.push(*id);
                stack.pop();
            }
        }
    }
}
