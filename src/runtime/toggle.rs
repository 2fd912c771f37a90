use std::collections::HashMap;
use tracing::warn;

use crate::controller::LayerMenu;
use crate::error::{MapError, Result};
use crate::runtime::MapInstance;

/// Resolves layer-menu entry ids to layer names, the Rust side of the single
/// delegated click handler.
#[derive(Debug, Clone, Default)]
pub struct ToggleDispatcher {
    names: HashMap<String, String>,
}

impl ToggleDispatcher {
    pub fn from_menu(menu: &LayerMenu) -> Self {
        Self {
            names: menu
                .entries
                .iter()
                .map(|e| (e.id.clone(), e.name.clone()))
                .collect(),
        }
    }

    pub fn layer_name(&self, entry_id: &str) -> Option<&str> {
        self.names.get(entry_id).map(String::as_str)
    }

    pub async fn dispatch(&self, instance: &MapInstance, entry_id: &str, visible: bool) -> Result<()> {
        let Some(name) = self.layer_name(entry_id) else {
            warn!(eid = instance.eid(), entry_id, "Click on unknown layer entry");
            return Err(MapError::UnknownLayerEntry(entry_id.to_string()));
        };
        instance.toggle(name, visible).await
    }
}
