use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Caller-supplied select callback, invoked with the node when it is chosen.
///
/// Cloning is cheap (shared handle). The handler is ignored by serde: trees
/// loaded from JSON simply have no callbacks attached.
#[derive(Clone)]
pub struct SelectHandler(Arc<dyn Fn(&MenuNode) + Send + Sync>);

impl SelectHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&MenuNode) + Send + Sync + 'static,
    {
        Self(Arc::new(handler))
    }

    pub fn invoke(&self, node: &MenuNode) {
        (self.0)(node)
    }
}

impl fmt::Debug for SelectHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SelectHandler(..)")
    }
}

/// Which icon field a renderer should use for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Icon,
    FaIcon,
    ImageIcon,
    SvgIcon,
    None,
}

impl IconKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconKind::Icon => "icon",
            IconKind::FaIcon => "faIcon",
            IconKind::ImageIcon => "imageIcon",
            IconKind::SvgIcon => "svgIcon",
            IconKind::None => "",
        }
    }
}

/// A single item in the hierarchical menu, possibly with children.
///
/// Nodes are created by the caller; the engine mutates `id`, `expanded`,
/// `is_selected` and `has_children` in place. `items` distinguishes "no
/// child list at all" (`None`, a leaf) from "an empty child list"
/// (`Some(vec![])`), which matters for selection semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    pub label: String,
    /// Engine-assigned identifier, unique within one tree generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Navigation target used for URL-driven selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<MenuNode>>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub selectable: bool,
    #[serde(default)]
    pub dont_emit: bool,
    /// Tri-state expansion hint: `None` means "unset".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
    /// Derived: whether the node has visible children.
    #[serde(default)]
    pub has_children: bool,
    /// Derived: whether the node lies on the active selection path.
    #[serde(default)]
    pub is_selected: bool,

    // Visual hints, opaque to the engine apart from active-variant selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fa_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_fa_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_image_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_svg_icon: Option<String>,

    #[serde(skip)]
    pub on_selected: Option<SelectHandler>,
}

impl MenuNode {
    /// Create a new leaf node with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            id: None,
            link: None,
            items: None,
            hidden: false,
            disabled: false,
            selectable: false,
            dont_emit: false,
            expanded: None,
            has_children: false,
            is_selected: false,
            icon: None,
            active_icon: None,
            fa_icon: None,
            active_fa_icon: None,
            image_icon: None,
            active_image_icon: None,
            svg_icon: None,
            active_svg_icon: None,
            on_selected: None,
        }
    }

    /// Attach a navigation target.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Attach a child list, turning the node into a branch.
    pub fn with_items(mut self, items: Vec<MenuNode>) -> Self {
        self.items = Some(items);
        self
    }

    /// Attach a select callback.
    pub fn with_on_selected<F>(mut self, handler: F) -> Self
    where
        F: Fn(&MenuNode) + Send + Sync + 'static,
    {
        self.on_selected = Some(SelectHandler::new(handler));
        self
    }

    /// The node's non-hidden children, in order. Empty for leaves.
    pub fn visible_children(&self) -> Vec<&MenuNode> {
        match &self.items {
            Some(items) => items.iter().filter(|n| !n.hidden).collect(),
            None => Vec::new(),
        }
    }

    pub fn has_visible_children(&self) -> bool {
        match &self.items {
            Some(items) => items.iter().any(|n| !n.hidden),
            None => false,
        }
    }

    /// A node with no child list at all. An empty child list is not a leaf.
    pub fn is_leaf(&self) -> bool {
        self.items.is_none()
    }

    /// Whether the node carries a non-empty navigation target.
    pub fn has_link(&self) -> bool {
        self.link.as_deref().is_some_and(|l| !l.is_empty())
    }

    /// Which icon field the renderer should use, in precedence order.
    pub fn icon_kind(&self) -> IconKind {
        if non_empty(&self.icon) {
            IconKind::Icon
        } else if non_empty(&self.fa_icon) {
            IconKind::FaIcon
        } else if non_empty(&self.image_icon) {
            IconKind::ImageIcon
        } else if non_empty(&self.svg_icon) {
            IconKind::SvgIcon
        } else {
            IconKind::None
        }
    }

    /// The icon to render: the active variant when the node is selected and
    /// one is present, otherwise the default, otherwise empty.
    pub fn selected_icon(&self) -> &str {
        resolve_active(self.is_selected, &self.active_icon, &self.icon)
    }

    pub fn selected_fa_icon(&self) -> &str {
        resolve_active(self.is_selected, &self.active_fa_icon, &self.fa_icon)
    }

    pub fn selected_image_icon(&self) -> &str {
        resolve_active(self.is_selected, &self.active_image_icon, &self.image_icon)
    }

    pub fn selected_svg_icon(&self) -> &str {
        resolve_active(self.is_selected, &self.active_svg_icon, &self.svg_icon)
    }

    /// Prefix the default FontAwesome style when the reference carries no
    /// style token of its own (e.g. `fa-home` becomes `fas fa-home`).
    pub fn normalize_fa_icon(&mut self) {
        if let Some(fa_icon) = &self.fa_icon {
            let has_style_token = fa_icon.split_whitespace().any(|tok| {
                tok.len() >= 3 && tok.starts_with("fa") && tok.as_bytes()[2] != b'-'
            });
            if !has_style_token {
                self.fa_icon = Some(format!("fas {}", fa_icon));
            }
        }
    }
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn resolve_active<'a>(
    is_selected: bool,
    active: &'a Option<String>,
    default: &'a Option<String>,
) -> &'a str {
    if is_selected {
        if let Some(active) = active {
            return active;
        }
    }
    default.as_deref().unwrap_or("")
}
