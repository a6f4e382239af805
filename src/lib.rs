//! multimenu - hierarchical menu state engine
//!
//! Renders nothing itself: this crate owns the state machine behind an
//! arbitrarily deep, collapsible menu tree — stable per-generation node
//! identity, O(1) lookup by identifier and navigation target, selection
//! propagation along the active path, and local plus globally-broadcast
//! expand/collapse coordination. A host application supplies the tree and
//! the rendering; the engine supplies consistent state and derived
//! class/style/icon resolution.

pub mod config;
pub mod controller;
pub mod error;
pub mod identity;
pub mod index;
pub mod item;
pub mod node;
pub mod selection;
pub mod service;
pub mod style;

// Re-exports for convenience
pub use config::MenuConfig;
pub use controller::{MenuController, MenuEvent, NullRouter, Router};
pub use error::{MenuError, Result};
pub use identity::{assign_identifiers, generate_identifier};
pub use index::{NodePath, TreeIndex};
pub use item::{ItemState, ToggleOutcome};
pub use node::{IconKind, MenuNode, SelectHandler};
pub use selection::{contains_node, SelectionDescriptor};
pub use service::{ExpandCollapseStatus, MenuService};
pub use style::{BackgroundStyle, ItemClasses, ListStyle, SubmenuClasses};
