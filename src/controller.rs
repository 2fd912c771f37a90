//! Map display controller.
//!
//! Decides between the compact sidebar layout and the collapsible panel
//! layout, renders the layer menu and legend, and emits the deferred
//! initialization call for the external map library.

use askama::Template;
use tracing::debug;

use crate::config::MapSettings;
use crate::constants;
use crate::error::Result;
use crate::models::MapView;
use crate::script::{InitCall, ToggleBinding, ToggleTarget};
use crate::templates::{MenuEntry, PanelMapTemplate, SidebarMapTemplate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Sidebar,
    Panel,
}

impl LayoutMode {
    pub fn for_view(view: &MapView) -> Self {
        if view.options.is_sidebar() {
            LayoutMode::Sidebar
        } else {
            LayoutMode::Panel
        }
    }
}

/// The rendered layer dropdown: its element id and entries in layer order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerMenu {
    pub menu_id: String,
    pub entries: Vec<MenuEntry>,
}

impl LayerMenu {
    fn for_view(view: &MapView) -> Self {
        let entries = view
            .layers
            .iter()
            .enumerate()
            .map(|(index, layer)| MenuEntry {
                id: layer_entry_id(&view.eid, index),
                name: layer.name.clone(),
                marker_html: layer.marker.as_ref().map(|m| m.to_string()).unwrap_or_default(),
            })
            .collect();

        Self {
            menu_id: format!("{}-layers", view.eid),
            entries,
        }
    }

    pub fn targets(&self) -> Vec<ToggleTarget> {
        self.entries
            .iter()
            .map(|e| ToggleTarget {
                id: e.id.clone(),
                name: e.name.clone(),
            })
            .collect()
    }
}

/// Stable identifier of the menu entry for the layer at `index`.
pub fn layer_entry_id(eid: &str, index: usize) -> String {
    format!("{eid}-layer-{index}")
}

/// Result of rendering one `MapView`.
#[derive(Debug, Clone)]
pub struct RenderedMap {
    pub mode: LayoutMode,
    pub eid: String,
    pub html: String,
    pub init: InitCall,
    pub menu: Option<LayerMenu>,
}

#[derive(Debug, Clone, Default)]
pub struct MapDisplayController {
    settings: MapSettings,
}

impl MapDisplayController {
    pub fn new(settings: MapSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    pub fn render(&self, view: &MapView) -> Result<RenderedMap> {
        let mode = LayoutMode::for_view(view);
        let init = InitCall::new(
            self.settings.namespace.clone(),
            view.eid.clone(),
            view.layers.clone(),
            view.options.clone(),
        );
        let (has_legend, legend_html) = match &view.legend {
            Some(legend) => (true, legend.to_string()),
            None => (false, String::new()),
        };

        debug!(
            eid = %view.eid,
            ?mode,
            layers = view.layers.len(),
            has_legend,
            "Rendering map"
        );

        let (html, menu) = match mode {
            LayoutMode::Sidebar => {
                let template = SidebarMapTemplate {
                    eid: view.eid.clone(),
                    height: self.settings.sidebar_height,
                    has_legend,
                    legend_html,
                    init_script: init.to_script()?,
                };
                (template.render()?, None)
            }
            LayoutMode::Panel => {
                let menu = (view.layers.len() > 1).then(|| LayerMenu::for_view(view));

                let mut init_script = init.to_script()?;
                if let Some(menu) = &menu {
                    let binding = ToggleBinding {
                        namespace: self.settings.namespace.clone(),
                        eid: view.eid.clone(),
                        menu_id: menu.menu_id.clone(),
                        targets: menu.targets(),
                    };
                    init_script.push('\n');
                    init_script.push_str(&binding.to_script()?);
                }

                let template = PanelMapTemplate {
                    eid: view.eid.clone(),
                    height: self.settings.panel_height,
                    toggle_label: self.settings.toggle_label.clone(),
                    show_menu: menu.is_some(),
                    menu_id: menu.as_ref().map(|m| m.menu_id.clone()).unwrap_or_default(),
                    menu_label: constants::LAYER_MENU_LABEL.to_string(),
                    entries: menu.as_ref().map(|m| m.entries.clone()).unwrap_or_default(),
                    has_legend,
                    legend_html,
                    init_script,
                };
                (template.render()?, menu)
            }
        };

        Ok(RenderedMap {
            mode,
            eid: view.eid.clone(),
            html,
            init,
            menu,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Layer, MapOptions};

    #[test]
    fn test_layout_mode_follows_sidebar_option() {
        let sidebar = MapView::new("m").with_options(MapOptions::new().sidebar(true));
        assert_eq!(LayoutMode::for_view(&sidebar), LayoutMode::Sidebar);
        assert_eq!(LayoutMode::for_view(&MapView::new("m")), LayoutMode::Panel);
    }

    #[test]
    fn test_menu_entries_have_stable_ids() {
        let view = MapView::new("m")
            .with_layer(Layer::new("A").with_marker("●"))
            .with_layer(Layer::new("B"));
        let rendered = MapDisplayController::default().render(&view).unwrap();
        let menu = rendered.menu.expect("menu for two layers");

        assert_eq!(menu.menu_id, "m-layers");
        assert_eq!(menu.entries[0].id, "m-layer-0");
        assert_eq!(menu.entries[0].marker_html, "●");
        assert_eq!(menu.entries[1].id, "m-layer-1");
        assert!(menu.entries[1].marker_html.is_empty());
    }

    #[test]
    fn test_custom_heights_are_used() {
        let settings = MapSettings {
            panel_height: 640,
            ..MapSettings::default()
        };
        let rendered = MapDisplayController::new(settings)
            .render(&MapView::new("m").with_layer(Layer::new("A")))
            .unwrap();
        assert!(rendered.html.contains("height: 640px"));
    }
}
