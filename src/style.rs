use crate::config::MenuConfig;

// Class names applied for visual states. The renderer owns their meaning;
// the engine only derives which of them are active.
pub const CONTAINER_CLASS: &str = "mlm-container";
pub const ITEM_CLASS: &str = "mlm-item";
pub const SELECTED_ITEM_CLASS: &str = "mlm-item-selected";
pub const ACTIVE_ITEM_CLASS: &str = "mlm-item-active";
pub const DISABLED_ITEM_CLASS: &str = "mlm-item-disabled";
pub const SUBMENU_CLASS: &str = "mlm-submenu";
pub const HAS_SUBMENU_CLASS: &str = "mlm-has-submenu";

pub const DEFAULT_LIST_BACKGROUND_COLOR: &str = "transparent";
pub const DEFAULT_LIST_FONT_COLOR: &str = "rgba(0,0,0,.87)";
pub const DEFAULT_SELECTED_FONT_COLOR: &str = "#1976d2";

/// Markers for the expand state exposed to structural-template consumers.
pub const EXPANDED_MARKER: &str = "yes";
pub const COLLAPSED_MARKER: &str = "no";

pub const INVALID_ITEMS_MESSAGE: &str =
    "invalid menu items: expected a non-empty list of menu nodes";

/// Tag identifying an item's depth position, e.g. `level-1-submenulevel-0`.
pub fn level_tag(level: usize, submenu_level: usize) -> String {
    format!("level-{}-submenulevel-{}", level, submenu_level)
}

/// Class bundle for a single menu item, recomputed whenever selection or
/// interaction state changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemClasses {
    pub selected: bool,
    pub active: bool,
    pub disabled: bool,
    pub level_tag: String,
}

impl ItemClasses {
    pub fn class_list(&self) -> Vec<String> {
        let mut classes = vec![ITEM_CLASS.to_string()];
        if self.selected {
            classes.push(SELECTED_ITEM_CLASS.to_string());
        }
        if self.active {
            classes.push(ACTIVE_ITEM_CLASS.to_string());
        }
        if self.disabled {
            classes.push(DISABLED_ITEM_CLASS.to_string());
        }
        classes.push(self.level_tag.clone());
        classes
    }
}

/// Class bundle for an item's child list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmenuClasses {
    pub level: usize,
    pub padded: bool,
    pub has_submenu: bool,
}

impl SubmenuClasses {
    pub fn class_list(&self) -> Vec<String> {
        let mut classes = vec![format!("level-{}", self.level)];
        if self.padded {
            classes.push(SUBMENU_CLASS.to_string());
        }
        if self.has_submenu {
            classes.push(HAS_SUBMENU_CLASS.to_string());
        }
        classes
    }
}

/// Inline style resolved for one list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListStyle {
    pub background: String,
    pub color: String,
}

/// Resolve the item style from the configuration colors. Selected items
/// prefer the configured selected font color, falling back to the default
/// selected color.
pub fn list_style(config: &MenuConfig, is_selected: bool) -> ListStyle {
    let background = config
        .list_background_color
        .clone()
        .unwrap_or_else(|| DEFAULT_LIST_BACKGROUND_COLOR.to_string());
    let color = if is_selected {
        config
            .selected_list_font_color
            .clone()
            .unwrap_or_else(|| DEFAULT_SELECTED_FONT_COLOR.to_string())
    } else {
        config
            .font_color
            .clone()
            .unwrap_or_else(|| DEFAULT_LIST_FONT_COLOR.to_string())
    };
    ListStyle { background, color }
}

/// Inline style for the menu container.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BackgroundStyle {
    pub background: String,
}

pub fn global_style(config: &MenuConfig) -> BackgroundStyle {
    BackgroundStyle {
        background: config.background_color.clone().unwrap_or_default(),
    }
}
