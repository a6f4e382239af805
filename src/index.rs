use std::collections::HashMap;

use crate::node::MenuNode;

/// Positional address of a node within one tree generation: the chain of
/// child indices from the root sequence down to the node.
///
/// Paths stay valid for exactly one generation; replacing the root tree
/// invalidates them together with the maps that hold them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn resolve<'a>(&self, nodes: &'a [MenuNode]) -> Option<&'a MenuNode> {
        let (&first, rest) = self.0.split_first()?;
        let mut node = nodes.get(first)?;
        for &index in rest {
            node = node.items.as_ref()?.get(index)?;
        }
        Some(node)
    }

    pub fn resolve_mut<'a>(&self, nodes: &'a mut [MenuNode]) -> Option<&'a mut MenuNode> {
        let (&first, rest) = self.0.split_first()?;
        let mut node = nodes.get_mut(first)?;
        for &index in rest {
            node = node.items.as_mut()?.get_mut(index)?;
        }
        Some(node)
    }
}

/// Lookup maps over one tree generation: identifier → node and
/// percent-encoded navigation target → node.
///
/// Hidden nodes are excluded at every level. Duplicate keys resolve
/// last-write-wins: the later-visited node owns the entry.
#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    by_identifier: HashMap<String, NodePath>,
    by_target: HashMap<String, NodePath>,
}

impl TreeIndex {
    /// Build both maps in a single recursive pass. Empty input yields
    /// empty maps.
    pub fn build(nodes: &[MenuNode]) -> Self {
        let mut index = Self::default();
        let mut prefix = Vec::new();
        index.add_level(nodes, &mut prefix);
        index
    }

    fn add_level(&mut self, nodes: &[MenuNode], prefix: &mut Vec<usize>) {
        for (position, node) in nodes.iter().enumerate() {
            if node.hidden {
                continue;
            }
            prefix.push(position);
            if let Some(id) = node.id.as_deref().filter(|id| !id.is_empty()) {
                self.by_identifier
                    .insert(id.to_string(), NodePath(prefix.clone()));
            }
            if let Some(link) = node.link.as_deref().filter(|link| !link.is_empty()) {
                self.by_target
                    .insert(Self::encode_target(link), NodePath(prefix.clone()));
            }
            if let Some(items) = &node.items {
                self.add_level(items, prefix);
            }
            prefix.pop();
        }
    }

    /// Percent-encode a navigation target the same way stored targets are
    /// encoded, so probes stay consistent with insertions.
    pub fn encode_target(target: &str) -> String {
        urlencoding::encode(target).into_owned()
    }

    pub fn path_by_identifier(&self, id: &str) -> Option<&NodePath> {
        self.by_identifier.get(id)
    }

    pub fn path_by_target(&self, target: &str) -> Option<&NodePath> {
        self.by_target.get(&Self::encode_target(target))
    }

    pub fn node_by_identifier<'a>(&self, nodes: &'a [MenuNode], id: &str) -> Option<&'a MenuNode> {
        self.path_by_identifier(id)?.resolve(nodes)
    }

    pub fn node_by_target<'a>(&self, nodes: &'a [MenuNode], target: &str) -> Option<&'a MenuNode> {
        self.path_by_target(target)?.resolve(nodes)
    }

    pub fn identifier_count(&self) -> usize {
        self.by_identifier.len()
    }

    pub fn target_count(&self) -> usize {
        self.by_target.len()
    }

    pub fn clear(&mut self) {
        self.by_identifier.clear();
        self.by_target.clear();
    }
}
