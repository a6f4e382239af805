use lazy_static::lazy_static;
use tokio::sync::broadcast;

/// Capacity of each broadcast stream. Commands are drained synchronously
/// within the triggering event, so the buffer only has to absorb bursts.
pub const CHANNEL_CAPACITY: usize = 64;

/// Global expand/collapse command. `Neutral` forces nothing: per-node
/// state stays as it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpandCollapseStatus {
    Expand,
    Collapse,
    #[default]
    Neutral,
}

/// Process-wide publish/subscribe hub for menu commands.
///
/// Cloning the service shares the underlying channels, so any number of
/// controllers and item holders can hang off one service; every live
/// subscriber sees every command in publish order. Subscriptions are
/// released by dropping the receiver.
#[derive(Debug, Clone)]
pub struct MenuService {
    status_tx: broadcast::Sender<ExpandCollapseStatus>,
    select_tx: broadcast::Sender<String>,
}

impl MenuService {
    pub fn new() -> Self {
        let (status_tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        let (select_tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            status_tx,
            select_tx,
        }
    }

    /// Broadcast a global expand/collapse command to every live holder.
    pub fn set_expand_collapse_status(&self, status: ExpandCollapseStatus) {
        // A send with no live subscribers is not an error here.
        let _ = self.status_tx.send(status);
    }

    /// Ask whichever controller indexes `id` to select that node.
    pub fn select_menu_by_id(&self, id: &str) {
        let _ = self.select_tx.send(id.to_string());
    }

    pub fn subscribe_status(&self) -> broadcast::Receiver<ExpandCollapseStatus> {
        self.status_tx.subscribe()
    }

    pub fn subscribe_selection(&self) -> broadcast::Receiver<String> {
        self.select_tx.subscribe()
    }

    /// Number of live status subscribers.
    pub fn status_subscriber_count(&self) -> usize {
        self.status_tx.receiver_count()
    }
}

impl Default for MenuService {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    static ref GLOBAL_SERVICE: MenuService = MenuService::new();
}

/// The process-wide default service. Controllers built on it share one
/// broadcast channel, which lets external code drive several rendered
/// menus with a single command.
pub fn global() -> &'static MenuService {
    &GLOBAL_SERVICE
}
