use crate::config::MenuConfig;
use crate::node::MenuNode;

/// True iff `id` identifies `node` itself or any descendant reachable
/// through `items`, at unbounded depth.
///
/// Hidden nodes are not skipped here: a hidden descendant still contains
/// the selection target structurally.
pub fn contains_node(node: &MenuNode, id: &str) -> bool {
    if node.id.as_deref() == Some(id) {
        return true;
    }
    node.items
        .as_ref()
        .is_some_and(|items| items.iter().any(|nested| contains_node(nested, id)))
}

/// The node currently considered selected, as a snapshot taken at
/// selection time. Together with the active configuration it determines
/// how selection state propagates through the tree.
#[derive(Debug, Clone)]
pub struct SelectionDescriptor {
    pub node: MenuNode,
}

impl SelectionDescriptor {
    pub fn new(node: MenuNode) -> Self {
        Self { node }
    }

    pub fn identifier(&self) -> Option<&str> {
        self.node.id.as_deref()
    }

    /// Whether nodes on the path to this selection show as selected:
    /// forced by configuration, or the selected node is a leaf, or it is
    /// explicitly selectable.
    pub fn highlights(&self, config: &MenuConfig) -> bool {
        config.highlight_on_select || self.node.items.is_none() || self.node.selectable
    }

    pub fn is_leaf(&self) -> bool {
        self.node.items.is_none()
    }
}
