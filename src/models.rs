use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::constants;

/// Named display options supplied by the caller.
///
/// Options are passed verbatim to the external map library; only `sidebar`
/// is interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapOptions(Map<String, Value>);

impl MapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used while assembling a view.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn sidebar(self, sidebar: bool) -> Self {
        self.with(constants::SIDEBAR_OPTION, sidebar)
    }

    /// `true` only when `sidebar` is present and a JSON `true`.
    pub fn is_sidebar(&self) -> bool {
        self.0
            .get(constants::SIDEBAR_OPTION)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for MapOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Pre-rendered markup that is emitted without escaping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fragment(String);

impl Fragment {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Fragment {
    fn from(markup: &str) -> Self {
        Self::new(markup)
    }
}

impl From<String> for Fragment {
    fn from(markup: String) -> Self {
        Self(markup)
    }
}

/// One togglable overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    /// Icon markup shown in the layer menu; not sent to the map library.
    #[serde(default, skip_serializing)]
    pub marker: Option<Fragment>,
    /// Opaque payload for the map library (GeoJSON URL, inline features, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            marker: None,
            data: None,
        }
    }

    pub fn with_marker(mut self, marker: impl Into<Fragment>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// Everything needed to render one map on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    #[serde(default)]
    pub options: MapOptions,
    #[serde(default)]
    pub layers: Vec<Layer>,
    pub eid: String,
    #[serde(default)]
    pub legend: Option<Fragment>,
}

impl MapView {
    pub fn new(eid: impl Into<String>) -> Self {
        Self {
            options: MapOptions::default(),
            layers: Vec::new(),
            eid: eid.into(),
            legend: None,
        }
    }

    /// A view whose element id is unique for this render.
    pub fn with_generated_eid() -> Self {
        Self::new(format!("map-{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn with_options(mut self, options: MapOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn with_layers(mut self, layers: impl IntoIterator<Item = Layer>) -> Self {
        self.layers.extend(layers);
        self
    }

    pub fn with_legend(mut self, legend: impl Into<Fragment>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }
}
