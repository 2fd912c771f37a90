//! Named map factories.
//!
//! A hosting application registers one factory per map name; at request time
//! the factory turns the request context into a `MapView` for the controller.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{info, warn};

use crate::constants;
use crate::error::{MapError, Result};
use crate::legend::Legend;
use crate::models::{Fragment, Layer, MapOptions, MapView};

/// What a factory knows about the request it builds a map for.
#[derive(Debug, Clone, Default)]
pub struct MapContext {
    pub name: String,
    pub id: Option<String>,
    pub params: HashMap<String, String>,
}

impl MapContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Explicit `sidebar` query parameter, if the request carried one.
    pub fn sidebar_override(&self) -> Option<bool> {
        self.params
            .get(constants::SIDEBAR_OPTION)
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes" | "on"))
    }

    fn require_id(&self) -> Result<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| MapError::MissingParameter(format!("id (map '{}')", self.name)))
    }

    fn eid(&self) -> String {
        match &self.id {
            Some(id) => format!("map-{}-{}", self.name, id),
            None => format!("map-{}", self.name),
        }
    }
}

pub trait MapFactory: Send + Sync {
    fn build(&self, ctx: &MapContext) -> Result<MapView>;
}

impl<F> MapFactory for F
where
    F: Fn(&MapContext) -> Result<MapView> + Send + Sync,
{
    fn build(&self, ctx: &MapContext) -> Result<MapView> {
        self(ctx)
    }
}

/// Overview map of all languages.
pub struct LanguagesMap;

impl MapFactory for LanguagesMap {
    fn build(&self, ctx: &MapContext) -> Result<MapView> {
        Ok(MapView::new(ctx.eid())
            .with_layer(Layer::new("Languages").with_data("/languages.geojson")))
    }
}

/// Compact map locating a single language.
pub struct LanguageMap;

impl MapFactory for LanguageMap {
    fn build(&self, ctx: &MapContext) -> Result<MapView> {
        let id = ctx.require_id()?;
        Ok(MapView::new(ctx.eid())
            .with_options(MapOptions::new().sidebar(true).with("zoom", 5))
            .with_layer(Layer::new(id).with_data(format!("/languages/{id}.geojson"))))
    }
}

/// One layer per parameter value, each with its own marker and a legend.
pub struct ParameterMap;

impl MapFactory for ParameterMap {
    fn build(&self, ctx: &MapContext) -> Result<MapView> {
        let id = ctx.require_id()?;
        let values: Vec<&str> = ctx
            .params
            .get("values")
            .map(|v| v.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        let mut legend = Legend::new(format!("Parameter {id}"));
        let mut view = MapView::new(ctx.eid());
        for (index, value) in values.iter().enumerate() {
            let marker = Fragment::new(constants::VALUE_MARKERS[index % constants::VALUE_MARKERS.len()]);
            legend = legend.entry(Some(marker.clone()), *value);
            view = view.with_layer(
                Layer::new(*value)
                    .with_marker(marker)
                    .with_data(format!("/parameters/{id}/{value}.geojson")),
            );
        }

        if !legend.is_empty() {
            view = view.with_legend(legend.render()?);
        }
        Ok(view)
    }
}

#[derive(Clone, Default)]
pub struct MapRegistry {
    factories: BTreeMap<String, Arc<dyn MapFactory>>,
}

impl MapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the `languages`, `language` and `parameter` maps.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(constants::LANGUAGES_MAP, LanguagesMap);
        registry.register(constants::LANGUAGE_MAP, LanguageMap);
        registry.register(constants::PARAMETER_MAP, ParameterMap);
        info!("Registered {} default maps", registry.factories.len());
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, factory: impl MapFactory + 'static) {
        let name = name.into();
        if self.factories.insert(name.clone(), Arc::new(factory)).is_some() {
            warn!(map = %name, "Replacing previously registered map factory");
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Build the view for `ctx`, applying an explicit `sidebar` override.
    pub fn build(&self, ctx: &MapContext) -> Result<MapView> {
        let factory = self
            .factories
            .get(&ctx.name)
            .ok_or_else(|| MapError::UnknownMap(ctx.name.clone()))?;

        let mut view = factory.build(ctx)?;
        if let Some(sidebar) = ctx.sidebar_override() {
            view.options = view.options.sidebar(sidebar);
        }
        Ok(view)
    }
}
