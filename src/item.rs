use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

use crate::config::MenuConfig;
use crate::node::MenuNode;
use crate::selection::{contains_node, SelectionDescriptor};
use crate::service::{ExpandCollapseStatus, MenuService};
use crate::style::{self, ItemClasses, ListStyle, SubmenuClasses};

/// What a user toggle resolved to. The holder decides; executing the
/// action (navigating, forwarding the selection) is the caller's job.
#[derive(Debug, Clone)]
pub enum ToggleOutcome {
    /// Route integration is on and the node carries a navigation target:
    /// navigate there, emit no selection.
    Navigate(String),
    /// The node was chosen: forward it as a selection.
    Selected(MenuNode),
    /// Pure expand/collapse with no selection semantics.
    Toggled,
    /// The node is disabled; nothing changed.
    Ignored,
}

/// Per-item state holder, one per rendered menu item.
///
/// Owns the item's local expanded/selected/class state and reacts to
/// direct user toggling, selection propagation, and global broadcast
/// commands. Created when the item is rendered; dropping it releases the
/// broadcast subscription.
#[derive(Debug)]
pub struct ItemState {
    level: usize,
    submenu_level: usize,
    generation: u64,
    expanded: bool,
    is_selected: bool,
    first_interaction: bool,
    commands: broadcast::Receiver<ExpandCollapseStatus>,
    item_classes: ItemClasses,
    submenu_classes: SubmenuClasses,
}

impl ItemState {
    /// Attach a holder to a node. Seeds expansion from the node's
    /// `expanded` hint, stamps the depth tag, and subscribes to the
    /// service's broadcast stream.
    pub fn new(
        node: &mut MenuNode,
        level: usize,
        submenu_level: usize,
        generation: u64,
        config: &MenuConfig,
        service: &MenuService,
    ) -> Self {
        node.normalize_fa_icon();
        node.has_children = node.has_visible_children();

        let mut state = Self {
            level,
            submenu_level,
            generation,
            expanded: node.expanded == Some(true),
            is_selected: false,
            first_interaction: false,
            commands: service.subscribe_status(),
            item_classes: ItemClasses {
                selected: false,
                active: false,
                disabled: node.disabled,
                level_tag: style::level_tag(level, submenu_level),
            },
            submenu_classes: SubmenuClasses::default(),
        };
        state.recompute_submenu_classes(node, config);
        state
    }

    /// Bring the holder up to date: re-derive `has_children`, apply the
    /// current selection, then drain pending broadcast commands in publish
    /// order. Runs synchronously to completion.
    pub fn refresh(
        &mut self,
        node: &mut MenuNode,
        selection: Option<&SelectionDescriptor>,
        config: &MenuConfig,
        generation: u64,
    ) {
        if generation != self.generation {
            // A new tree generation renders this a fresh item: forget the
            // interaction history and re-seed expansion from the node.
            self.generation = generation;
            self.first_interaction = false;
            self.expanded = node.expanded == Some(true);
            self.is_selected = false;
        }

        node.has_children = node.has_visible_children();

        if let Some(selection) = selection {
            if let Some(id) = selection.identifier() {
                self.apply_selection(node, selection, id, config);
            }
        }

        loop {
            match self.commands.try_recv() {
                Ok(status) => self.handle_status(status, node, config),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }

        self.recompute_submenu_classes(node, config);
    }

    /// Direct user toggle. No-op on disabled nodes. Flips local expansion,
    /// mirrors it onto the node, then resolves the post-toggle action:
    /// navigation beats the callback, the callback beats plain selection,
    /// and a branch without selection semantics just toggles.
    pub fn toggle(&mut self, node: &mut MenuNode, config: &MenuConfig) -> ToggleOutcome {
        if node.disabled {
            return ToggleOutcome::Ignored;
        }

        // A user toggle supersedes any global command published before it.
        self.discard_pending_commands();

        self.expanded = !self.expanded;
        node.expanded = Some(self.expanded);
        self.first_interaction = true;
        self.recompute_submenu_classes(node, config);

        if config.interface_with_route && node.has_link() {
            return ToggleOutcome::Navigate(node.link.clone().unwrap_or_default());
        }
        if let Some(handler) = node.on_selected.clone() {
            handler.invoke(node);
            return ToggleOutcome::Selected(node.clone());
        }
        if node.items.is_none() || config.collapse_on_select {
            return ToggleOutcome::Selected(node.clone());
        }
        if node.selectable {
            return ToggleOutcome::Selected(node.clone());
        }
        ToggleOutcome::Toggled
    }

    fn apply_selection(
        &mut self,
        node: &mut MenuNode,
        selection: &SelectionDescriptor,
        selected_id: &str,
        config: &MenuConfig,
    ) {
        if contains_node(node, selected_id) {
            if !self.first_interaction {
                self.expanded = true;
            }
            if config.collapse_on_select && selection.is_leaf() {
                // Selecting a leaf folds the matched branch back up.
                self.expanded = false;
                node.expanded = Some(false);
            }
            self.is_selected = selection.highlights(config);
        } else {
            self.is_selected = false;
            if config.collapse_on_select {
                self.expanded = false;
                node.expanded = Some(false);
            }
        }

        node.is_selected = self.is_selected;
        self.item_classes = ItemClasses {
            selected: self.is_selected,
            active: node.id.as_deref() == Some(selected_id),
            disabled: node.disabled,
            level_tag: style::level_tag(self.level, self.submenu_level),
        };
    }

    fn handle_status(
        &mut self,
        status: ExpandCollapseStatus,
        node: &mut MenuNode,
        config: &MenuConfig,
    ) {
        match status {
            ExpandCollapseStatus::Expand => {
                self.expanded = true;
                if config.custom_template {
                    node.expanded = Some(true);
                }
            }
            ExpandCollapseStatus::Collapse => {
                self.expanded = false;
                if config.custom_template {
                    node.expanded = Some(false);
                }
            }
            ExpandCollapseStatus::Neutral => {}
        }
    }

    fn discard_pending_commands(&mut self) {
        loop {
            match self.commands.try_recv() {
                Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
    }

    fn recompute_submenu_classes(&mut self, node: &MenuNode, config: &MenuConfig) {
        let has_items = node.has_visible_children();
        self.submenu_classes = SubmenuClasses {
            level: self.level + 1,
            padded: has_items && config.padding_at_start,
            has_submenu: has_items,
        };
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    /// Whether the user has toggled this exact item at least once in the
    /// current tree generation.
    pub fn has_interacted(&self) -> bool {
        self.first_interaction
    }

    pub fn item_classes(&self) -> &ItemClasses {
        &self.item_classes
    }

    pub fn submenu_classes(&self) -> &SubmenuClasses {
        &self.submenu_classes
    }

    /// The inline style the renderer should use for this item.
    pub fn list_style(&self, config: &MenuConfig) -> ListStyle {
        style::list_style(config, self.is_selected)
    }

    /// Expand-state marker for structural-template consumers.
    pub fn expand_marker(&self) -> &'static str {
        if self.expanded {
            style::EXPANDED_MARKER
        } else {
            style::COLLAPSED_MARKER
        }
    }
}
