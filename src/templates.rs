use askama::Template;

/// One row of the layer dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: String,
    pub name: String,
    /// Raw marker markup, empty when the layer has none.
    pub marker_html: String,
}

#[derive(Template)]
#[template(path = "map_sidebar.html")]
pub struct SidebarMapTemplate {
    pub eid: String,
    pub height: u32,
    pub has_legend: bool,
    pub legend_html: String,
    pub init_script: String,
}

#[derive(Template)]
#[template(path = "map_panel.html")]
pub struct PanelMapTemplate {
    pub eid: String,
    pub height: u32,
    pub toggle_label: String,
    pub show_menu: bool,
    pub menu_id: String,
    pub menu_label: String,
    pub entries: Vec<MenuEntry>,
    pub has_legend: bool,
    pub legend_html: String,
    pub init_script: String,
}

pub struct LegendEntry {
    pub marker_html: String,
    pub label: String,
}

#[derive(Template)]
#[template(path = "legend.html")]
pub struct LegendTemplate {
    pub title: String,
    pub entries: Vec<LegendEntry>,
}

#[derive(Template)]
#[template(path = "page.html")]
pub struct MapPageTemplate {
    pub title: String,
    pub library_url: String,
    pub fragments: Vec<String>,
}
