/// Defaults shared by the renderer, the config layer and the registry.

// External map library entry points, called as `<namespace>.<fn>(...)`
pub const DEFAULT_JS_NAMESPACE: &str = "CLLD";
pub const JS_INIT_FN: &str = "map";
pub const JS_TOGGLE_FN: &str = "mapToggleLayer";

// Container heights in pixels
pub const SIDEBAR_HEIGHT: u32 = 200;
pub const PANEL_HEIGHT: u32 = 500;

pub const TOGGLE_LABEL: &str = "show/hide map";
pub const LAYER_MENU_LABEL: &str = "Layers";
pub const DEFAULT_LIBRARY_URL: &str = "/static/map.js";

// Option key that selects the compact layout
pub const SIDEBAR_OPTION: &str = "sidebar";

// Registered map names
pub const LANGUAGES_MAP: &str = "languages";
pub const LANGUAGE_MAP: &str = "language";
pub const PARAMETER_MAP: &str = "parameter";

/// Markers handed out to parameter value layers, cycled in order.
pub const VALUE_MARKERS: [&str; 6] = ["●", "■", "▲", "◆", "★", "▼"];

/// Get all map names registered by default
pub fn get_default_maps() -> Vec<&'static str> {
    vec![LANGUAGES_MAP, LANGUAGE_MAP, PARAMETER_MAP]
}
