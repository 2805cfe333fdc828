//! Tree assembly for project nodes.
//!
//! Nodes are stored flat with a `parent_id` back-reference and reassembled
//! here by grouping children per parent at read time. No live child pointers
//! are kept in memory, so a corrupt `parent_id` (self-reference or cycle)
//! can never hang traversal: every walk carries a visited set, and nodes
//! whose parent is missing from the set are lifted to the root level.

use std::collections::{HashMap, HashSet};

use shared_types::{NodeDetail, NodeTree};

/// Reconstruct the node tree of one chain from its flat node list.
pub fn build_tree(nodes: &[NodeDetail]) -> Vec<NodeTree> {
    let ids: HashSet<i32> = nodes.iter().map(|n| n.node_id).collect();

    let mut by_parent: HashMap<Option<i32>, Vec<&NodeDetail>> = HashMap::new();
    let mut roots: Vec<&NodeDetail> = Vec::new();
    for node in nodes {
        match node.parent_id {
            // Dangling or self-referencing parents surface at the root
            // rather than silently disappearing.
            Some(p) if p != node.node_id && ids.contains(&p) => {
                by_parent.entry(Some(p)).or_default().push(node);
            }
            _ => roots.push(node),
        }
    }
    roots.sort_by_key(|n| n.order_index);
    for group in by_parent.values_mut() {
        group.sort_by_key(|n| n.order_index);
    }

    let mut visited = HashSet::new();
    let mut tree: Vec<NodeTree> = roots
        .iter()
        .filter_map(|root| attach(root, &by_parent, &mut visited))
        .collect();

    // Members of a parent cycle are reachable from no root; walk them in id
    // order so they still appear once each.
    if visited.len() < nodes.len() {
        let mut leftover: Vec<&NodeDetail> = nodes
            .iter()
            .filter(|n| !visited.contains(&n.node_id))
            .collect();
        leftover.sort_by_key(|n| n.node_id);
        for node in leftover {
            if let Some(subtree) = attach(node, &by_parent, &mut visited) {
                tree.push(subtree);
            }
        }
    }

    tree
}

fn attach(
    node: &NodeDetail,
    by_parent: &HashMap<Option<i32>, Vec<&NodeDetail>>,
    visited: &mut HashSet<i32>,
) -> Option<NodeTree> {
    if !visited.insert(node.node_id) {
        return None;
    }

    let children = by_parent
        .get(&Some(node.node_id))
        .map(|group| {
            group
                .iter()
                .filter_map(|child| attach(child, by_parent, visited))
                .collect()
        })
        .unwrap_or_default();

    Some(NodeTree {
        node: node.clone(),
        children,
    })
}

/// Collect the ids of `root` and every descendant, given the flat
/// `(node_id, parent_id)` pairs of one chain. Used by the cascade-delete
/// policy for node removal.
pub fn collect_subtree(links: &[(i32, Option<i32>)], root: i32) -> Vec<i32> {
    let mut children: HashMap<i32, Vec<i32>> = HashMap::new();
    for (id, parent) in links {
        if let Some(p) = parent {
            children.entry(*p).or_default().push(*id);
        }
    }

    let mut collected = Vec::new();
    let mut visited = HashSet::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        collected.push(id);
        if let Some(kids) = children.get(&id) {
            stack.extend(kids.iter().copied());
        }
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(node_id: i32, parent_id: Option<i32>, order_index: i32) -> NodeDetail {
        NodeDetail {
            node_id,
            title: format!("node {node_id}"),
            note: String::new(),
            is_done: false,
            order_index,
            priority: None,
            tag_id: None,
            tag_title: None,
            parent_id,
            start_time: None,
            end_time: None,
        }
    }

    fn titles(level: &[NodeTree]) -> Vec<i32> {
        level.iter().map(|t| t.node.node_id).collect()
    }

    #[test]
    fn roots_sorted_by_order_index() {
        let nodes = vec![node(1, None, 1), node(2, None, 0), node(3, None, 2)];
        let tree = build_tree(&nodes);
        assert_eq!(titles(&tree), vec![2, 1, 3]);
        assert!(tree.iter().all(|t| t.children.is_empty()));
    }

    #[test]
    fn children_group_under_their_parent_depth_first() {
        let nodes = vec![
            node(1, None, 0),
            node(2, Some(1), 1),
            node(3, Some(1), 0),
            node(4, Some(3), 0),
            node(5, None, 1),
        ];
        let tree = build_tree(&nodes);
        assert_eq!(titles(&tree), vec![1, 5]);
        assert_eq!(titles(&tree[0].children), vec![3, 2]);
        assert_eq!(titles(&tree[0].children[0].children), vec![4]);
    }

    #[test]
    fn dangling_parent_surfaces_at_root() {
        let nodes = vec![node(1, None, 0), node(2, Some(99), 0)];
        let tree = build_tree(&nodes);
        assert_eq!(titles(&tree), vec![1, 2]);
    }

    #[test]
    fn self_parent_does_not_recurse() {
        let nodes = vec![node(1, Some(1), 0)];
        let tree = build_tree(&nodes);
        assert_eq!(titles(&tree), vec![1]);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn parent_cycle_terminates_and_keeps_every_node() {
        // 2 -> 3 -> 2 cycle, unreachable from the root
        let nodes = vec![node(1, None, 0), node(2, Some(3), 0), node(3, Some(2), 0)];
        let tree = build_tree(&nodes);
        let mut seen: Vec<i32> = Vec::new();
        fn walk(level: &[NodeTree], out: &mut Vec<i32>) {
            for t in level {
                out.push(t.node.node_id);
                walk(&t.children, out);
            }
        }
        walk(&tree, &mut seen);
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn subtree_collects_all_descendants() {
        let links = vec![
            (1, None),
            (2, Some(1)),
            (3, Some(2)),
            (4, Some(1)),
            (5, None),
        ];
        let mut ids = collect_subtree(&links, 1);
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        assert_eq!(collect_subtree(&links, 5), vec![5]);
        let mut mid = collect_subtree(&links, 2);
        mid.sort_unstable();
        assert_eq!(mid, vec![2, 3]);
    }

    #[test]
    fn subtree_collection_survives_cycles() {
        let links = vec![(1, Some(2)), (2, Some(1))];
        let mut ids = collect_subtree(&links, 1);
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }
}
