use serde_json::Value;

use crate::style;

/// Resolved menu configuration: caller-supplied options merged over
/// hard-coded defaults.
///
/// Options arrive as loosely-typed JSON and are validated independently by
/// type; a wrong-typed or empty option is ignored and its default retained,
/// so one bad option never blocks the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    pub padding_at_start: bool,
    pub list_background_color: Option<String>,
    pub font_color: Option<String>,
    pub background_color: Option<String>,
    pub selected_list_font_color: Option<String>,
    pub interface_with_route: bool,
    pub collapse_on_select: bool,
    pub highlight_on_select: bool,
    pub use_dividers: bool,
    pub rtl_layout: bool,
    pub custom_template: bool,
    pub classname: Option<String>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            padding_at_start: true,
            list_background_color: None,
            font_color: None,
            background_color: None,
            selected_list_font_color: None,
            interface_with_route: false,
            collapse_on_select: false,
            highlight_on_select: false,
            use_dividers: true,
            rtl_layout: false,
            custom_template: false,
            classname: None,
        }
    }
}

impl MenuConfig {
    /// Build a configuration from caller options, starting from defaults.
    pub fn from_value(options: &Value) -> Self {
        let mut config = Self::default();
        config.apply(options);
        config
    }

    /// Merge caller options into this configuration. Each option is taken
    /// only if it carries the expected type; anything else leaves the
    /// current value in place.
    pub fn apply(&mut self, options: &Value) {
        apply_bool(options, "paddingAtStart", &mut self.padding_at_start);
        apply_string(options, "listBackgroundColor", &mut self.list_background_color);
        apply_string(options, "fontColor", &mut self.font_color);
        apply_string(options, "backgroundColor", &mut self.background_color);
        apply_string(
            options,
            "selectedListFontColor",
            &mut self.selected_list_font_color,
        );
        apply_bool(options, "interfaceWithRoute", &mut self.interface_with_route);
        apply_bool(options, "collapseOnSelect", &mut self.collapse_on_select);
        apply_bool(options, "highlightOnSelect", &mut self.highlight_on_select);
        apply_bool(options, "useDividers", &mut self.use_dividers);
        apply_bool(options, "rtlLayout", &mut self.rtl_layout);
        apply_bool(options, "customTemplate", &mut self.custom_template);
        apply_string(options, "classname", &mut self.classname);
    }

    /// The container class: the fixed base class, plus the configured
    /// classname when one is set.
    pub fn class_name(&self) -> String {
        match self.classname.as_deref() {
            Some(classname) => format!("{} {}", style::CONTAINER_CLASS, classname),
            None => style::CONTAINER_CLASS.to_string(),
        }
    }
}

fn apply_bool(options: &Value, key: &str, slot: &mut bool) {
    if let Some(value) = options.get(key).and_then(Value::as_bool) {
        *slot = value;
    }
}

fn apply_string(options: &Value, key: &str, slot: &mut Option<String>) {
    if let Some(value) = options.get(key).and_then(Value::as_str) {
        if !value.is_empty() {
            *slot = Some(value.to_string());
        }
    }
}
