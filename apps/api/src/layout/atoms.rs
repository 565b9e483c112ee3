//! Atom Collector: flattens a block into the indivisible units the paginator places.

use crate::layout::classify::TagSets;
use crate::models::Node;

/// Returns the atoms of `node` in document order.
///
/// An atom-tagged node is returned whole. Otherwise its children are collected recursively;
/// a leaf without the atom tag is treated as an atom so that nothing is ever lost.
pub fn collect_atoms<'a>(node: &'a Node, tags: &TagSets) -> Vec<&'a Node> {
    let mut atoms = Vec::new();
    collect_into(node, tags, &mut atoms);
    atoms
}

fn collect_into<'a>(node: &'a Node, tags: &TagSets, atoms: &mut Vec<&'a Node>) {
    if tags.is_atom(node) || node.children.is_empty() {
        atoms.push(node);
    } else {
        for child in &node.children {
            collect_into(child, tags, atoms);
        }
    }
}
