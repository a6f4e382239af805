use serde_json::Value;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::mpsc;

use crate::config::MenuConfig;
use crate::error::{MenuError, Result};
use crate::identity;
use crate::index::{NodePath, TreeIndex};
use crate::item::ToggleOutcome;
use crate::node::MenuNode;
use crate::selection::SelectionDescriptor;
use crate::service::{ExpandCollapseStatus, MenuService};
use crate::style::{self, BackgroundStyle};

/// Seam to the host's routing layer. The controller decides when to
/// navigate and to which target; executing the navigation is the host's
/// job.
#[cfg_attr(test, mockall::automock)]
pub trait Router {
    /// Perform the navigation to `target`.
    fn navigate(&mut self, target: &str);

    /// The navigation target the host currently displays, if any.
    fn current_target(&self) -> Option<String>;
}

/// Router for hosts without route integration.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRouter;

impl Router for NullRouter {
    fn navigate(&mut self, _target: &str) {}

    fn current_target(&self) -> Option<String> {
        None
    }
}

/// Outward menu events, delivered over the controller's event channel.
#[derive(Debug, Clone)]
pub enum MenuEvent {
    /// A leaf or explicitly selectable node was chosen.
    ItemSelected(MenuNode),
    /// A branch header was activated without being a terminal selection.
    LabelActivated(MenuNode),
    /// A valid tree was assigned, filtered and indexed.
    MenuReady(Vec<MenuNode>),
}

/// Top-level coordinator for one rendered menu.
///
/// Owns the root tree for the lifetime of one generation, rebuilds
/// identity and the lookup maps whenever the tree is replaced, resolves
/// navigation targets to nodes, and emits selection events outward.
pub struct MenuController {
    service: MenuService,
    router: Box<dyn Router>,
    events: mpsc::UnboundedSender<MenuEvent>,
    config: MenuConfig,
    items: Vec<MenuNode>,
    index: TreeIndex,
    selection: Option<SelectionDescriptor>,
    indexed: bool,
    generation: u64,
    select_rx: broadcast::Receiver<String>,
    status_rx: broadcast::Receiver<ExpandCollapseStatus>,
    last_status: ExpandCollapseStatus,
}

impl MenuController {
    pub fn new(
        service: MenuService,
        router: Box<dyn Router>,
        events: mpsc::UnboundedSender<MenuEvent>,
    ) -> Self {
        let select_rx = service.subscribe_selection();
        let status_rx = service.subscribe_status();
        Self {
            service,
            router,
            events,
            config: MenuConfig::default(),
            items: Vec::new(),
            index: TreeIndex::default(),
            selection: None,
            indexed: false,
            generation: 0,
            select_rx,
            status_rx,
            last_status: ExpandCollapseStatus::Neutral,
        }
    }

    /// Build a controller on the process-wide default service.
    pub fn with_global_service(
        router: Box<dyn Router>,
        events: mpsc::UnboundedSender<MenuEvent>,
    ) -> Self {
        Self::new(crate::service::global().clone(), router, events)
    }

    /// Merge caller options over the current configuration. Wrong-typed
    /// options are ignored per option.
    pub fn set_configuration(&mut self, options: &Value) {
        self.config.apply(options);
    }

    /// Replace the root tree, starting a new generation.
    ///
    /// Empty input is reported through the warning log and the returned
    /// error, and suspends all indexing until a valid tree arrives.
    /// Otherwise: hidden top-level nodes are stripped, every remaining
    /// node is stamped with a fresh identifier, both lookup maps are
    /// rebuilt, and `MenuReady` is emitted. Identity assignment completes
    /// before indexing, and indexing before any lookup is served. With
    /// route integration on, the router's current target is resolved
    /// immediately.
    pub fn set_items(&mut self, items: Vec<MenuNode>) -> Result<()> {
        if items.is_empty() {
            log::warn!("{}", style::INVALID_ITEMS_MESSAGE);
            self.items = Vec::new();
            self.index.clear();
            self.indexed = false;
            self.selection = None;
            return Err(MenuError::EmptyTree);
        }

        let mut items: Vec<MenuNode> = items.into_iter().filter(|node| !node.hidden).collect();
        identity::assign_identifiers(&mut items);
        self.index = TreeIndex::build(&items);
        self.items = items;
        self.indexed = true;
        self.generation += 1;
        // The old descriptor held identifiers of a dead generation.
        self.selection = None;

        let _ = self.events.send(MenuEvent::MenuReady(self.items.clone()));

        if self.config.interface_with_route {
            if let Some(target) = self.router.current_target() {
                self.update_node_by_target(&target);
            }
        }
        Ok(())
    }

    /// React to a host route change. Consumed only under route
    /// integration.
    pub fn handle_route_change(&mut self, target: &str) {
        if !self.config.interface_with_route {
            return;
        }
        self.update_node_by_target(target);
    }

    fn update_node_by_target(&mut self, target: &str) {
        if !self.indexed {
            return;
        }
        let Some(path) = self.index.path_by_target(target).cloned() else {
            return;
        };
        let Some(node) = path.resolve(&self.items) else {
            return;
        };
        if !node.has_link() {
            return;
        }
        self.select_at_path(&path);
    }

    /// Select a node by its engine-assigned identifier and emit outward.
    pub fn select_by_identifier(&mut self, id: &str) -> Result<()> {
        if !self.indexed {
            return Err(MenuError::NotIndexed);
        }
        let path = self
            .index
            .path_by_identifier(id)
            .cloned()
            .ok_or_else(|| MenuError::UnknownIdentifier(id.to_string()))?;
        self.select_at_path(&path);
        Ok(())
    }

    /// Execute a holder's toggle outcome: navigation goes to the router,
    /// selections are recorded and emitted, everything else is done.
    pub fn handle_toggle(&mut self, outcome: ToggleOutcome) {
        match outcome {
            ToggleOutcome::Navigate(target) => self.router.navigate(&target),
            ToggleOutcome::Selected(node) => self.notify_selected(node),
            ToggleOutcome::Toggled | ToggleOutcome::Ignored => {}
        }
    }

    /// Record a selection originating from an item holder and emit it.
    pub fn notify_selected(&mut self, node: MenuNode) {
        let highlighted = self.selection_highlighted(&node);
        if let Some(id) = node.id.clone() {
            if let Some(path) = self.index.path_by_identifier(&id).cloned() {
                if let Some(tree_node) = path.resolve_mut(&mut self.items) {
                    tree_node.is_selected = highlighted;
                }
            }
        }
        let mut snapshot = node;
        snapshot.is_selected = highlighted;
        self.record_selection(snapshot);
    }

    fn select_at_path(&mut self, path: &NodePath) {
        let highlight_on_select = self.config.highlight_on_select;
        let Some(node) = path.resolve_mut(&mut self.items) else {
            return;
        };
        node.is_selected =
            highlight_on_select || node.items.is_none() || node.selectable;
        let snapshot = node.clone();
        self.record_selection(snapshot);
    }

    fn selection_highlighted(&self, node: &MenuNode) -> bool {
        self.config.highlight_on_select || node.items.is_none() || node.selectable
    }

    fn record_selection(&mut self, snapshot: MenuNode) {
        self.last_status = ExpandCollapseStatus::Neutral;
        self.selection = Some(SelectionDescriptor::new(snapshot.clone()));

        if snapshot.dont_emit {
            return;
        }
        let is_item = (snapshot.items.is_none() && snapshot.on_selected.is_none())
            || snapshot.selectable;
        let event = if is_item {
            MenuEvent::ItemSelected(snapshot)
        } else {
            MenuEvent::LabelActivated(snapshot)
        };
        let _ = self.events.send(event);
    }

    /// Drain pending inward commands: select-by-identifier requests and
    /// global status updates. Unknown identifiers are skipped; they may
    /// be meant for another controller on the same service.
    pub fn process_commands(&mut self) {
        loop {
            match self.select_rx.try_recv() {
                Ok(id) => {
                    let _ = self.select_by_identifier(&id);
                }
                Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        self.drain_status();
    }

    /// The most recent global expand/collapse command this controller has
    /// observed, for hosts that render from the structural template.
    pub fn global_status(&mut self) -> ExpandCollapseStatus {
        self.drain_status();
        self.last_status
    }

    fn drain_status(&mut self) {
        loop {
            match self.status_rx.try_recv() {
                Ok(status) => self.last_status = status,
                Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.indexed
    }

    /// Current tree generation; bumped on every valid tree replacement.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn items(&self) -> &[MenuNode] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [MenuNode] {
        &mut self.items
    }

    pub fn node_by_identifier(&self, id: &str) -> Option<&MenuNode> {
        if !self.indexed {
            return None;
        }
        self.index.node_by_identifier(&self.items, id)
    }

    pub fn node_by_identifier_mut(&mut self, id: &str) -> Option<&mut MenuNode> {
        if !self.indexed {
            return None;
        }
        let path = self.index.path_by_identifier(id)?.clone();
        path.resolve_mut(&mut self.items)
    }

    pub fn node_by_target(&self, target: &str) -> Option<&MenuNode> {
        if !self.indexed {
            return None;
        }
        self.index.node_by_target(&self.items, target)
    }

    pub fn selection(&self) -> Option<&SelectionDescriptor> {
        self.selection.as_ref()
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn service(&self) -> &MenuService {
        &self.service
    }

    pub fn class_name(&self) -> String {
        self.config.class_name()
    }

    pub fn global_style(&self) -> BackgroundStyle {
        style::global_style(&self.config)
    }

    pub fn is_rtl_layout(&self) -> bool {
        self.config.rtl_layout
    }
}
