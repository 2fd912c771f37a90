use askama::Template;

use crate::error::Result;
use crate::models::Fragment;
use crate::templates::{LegendEntry, LegendTemplate};

/// Builds a legend fragment explaining map symbology.
#[derive(Debug, Clone, Default)]
pub struct Legend {
    title: String,
    entries: Vec<(Option<Fragment>, String)>,
}

impl Legend {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn entry(mut self, marker: Option<Fragment>, label: impl Into<String>) -> Self {
        self.entries.push((marker, label.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render(&self) -> Result<Fragment> {
        let template = LegendTemplate {
            title: self.title.clone(),
            entries: self
                .entries
                .iter()
                .map(|(marker, label)| LegendEntry {
                    marker_html: marker.as_ref().map(|m| m.to_string()).unwrap_or_default(),
                    label: label.clone(),
                })
                .collect(),
        };
        Ok(Fragment::new(template.render()?))
    }
}
