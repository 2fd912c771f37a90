use askama::Template;
use std::collections::HashSet;
use tracing::warn;

use crate::controller::RenderedMap;
use crate::error::Result;
use crate::templates::MapPageTemplate;

/// A full HTML document hosting one or more rendered maps.
pub struct MapPage {
    title: String,
    library_url: String,
    maps: Vec<RenderedMap>,
}

impl MapPage {
    pub fn new(title: impl Into<String>, library_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            library_url: library_url.into(),
            maps: Vec::new(),
        }
    }

    pub fn with_map(mut self, map: RenderedMap) -> Self {
        self.maps.push(map);
        self
    }

    /// Element ids used by more than one map on this page.
    pub fn duplicate_eids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for map in &self.maps {
            if !seen.insert(map.eid.as_str()) && !duplicates.contains(&map.eid.as_str()) {
                duplicates.push(map.eid.as_str());
            }
        }
        duplicates
    }

    pub fn render(&self) -> Result<String> {
        for eid in self.duplicate_eids() {
            // Both maps will initialize against the same element; the last one wins
            warn!(eid, "Element id used by more than one map on the page");
        }

        let template = MapPageTemplate {
            title: self.title.clone(),
            library_url: self.library_url.clone(),
            fragments: self.maps.iter().map(|m| m.html.clone()).collect(),
        };
        Ok(template.render()?)
    }
}
