//! Inline script emission.
//!
//! Two snippets are produced per map: the deferred initialization call, which
//! runs once the page's `load` event fires, and (panel mode with a layer menu
//! only) a single delegated click handler that turns checkbox clicks into
//! `toggle(eid, layerName, visible)` calls.

use serde::Serialize;

use crate::constants;
use crate::error::Result;
use crate::models::{Layer, MapOptions};

/// Serialize `value` as JSON that can sit inside a `<script>` element.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    Ok(out)
}

/// The deferred `<namespace>.map(eid, layers, options)` call.
#[derive(Debug, Clone, PartialEq)]
pub struct InitCall {
    pub namespace: String,
    pub eid: String,
    pub layers: Vec<Layer>,
    pub options: MapOptions,
}

impl InitCall {
    pub fn new(namespace: impl Into<String>, eid: impl Into<String>, layers: Vec<Layer>, options: MapOptions) -> Self {
        Self {
            namespace: namespace.into(),
            eid: eid.into(),
            layers,
            options,
        }
    }

    /// The call expression itself, without the load-event wrapper.
    pub fn call_expression(&self) -> Result<String> {
        Ok(format!(
            "{}.{}({}, {}, {});",
            self.namespace,
            constants::JS_INIT_FN,
            script_json(&self.eid)?,
            script_json(&self.layers)?,
            script_json(&self.options)?,
        ))
    }

    pub fn to_script(&self) -> Result<String> {
        Ok(format!(
            "window.addEventListener(\"load\", function () {{\n  {}\n}});",
            self.call_expression()?
        ))
    }
}

/// One layer-menu entry as seen by the delegated handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleTarget {
    pub id: String,
    pub name: String,
}

/// Delegated click handler for a rendered layer menu.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleBinding {
    pub namespace: String,
    pub eid: String,
    pub menu_id: String,
    pub targets: Vec<ToggleTarget>,
}

impl ToggleBinding {
    pub fn to_script(&self) -> Result<String> {
        let lookup: serde_json::Map<String, serde_json::Value> = self
            .targets
            .iter()
            .map(|t| (t.id.clone(), serde_json::Value::String(t.name.clone())))
            .collect();

        Ok(format!(
            r#"(function () {{
  var layers = {lookup};
  var menu = document.getElementById({menu_id});
  if (!menu) {{ return; }}
  menu.addEventListener("click", function (event) {{
    var id = event.target.getAttribute("data-map-layer");
    if (id && Object.prototype.hasOwnProperty.call(layers, id)) {{
      {ns}.{toggle}({eid}, layers[id], event.target.checked);
    }}
  }});
}})();"#,
            lookup = script_json(&lookup)?,
            menu_id = script_json(&self.menu_id)?,
            ns = self.namespace,
            toggle = constants::JS_TOGGLE_FN,
            eid = script_json(&self.eid)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_json_escapes_closing_tags() {
        let out = script_json("</script><script>alert(1)</script>").unwrap();
        assert!(!out.contains("</script>"));
        assert!(out.contains("\\u003c/script\\u003e"));
    }

    #[test]
    fn test_init_call_is_deferred_to_load() {
        let call = InitCall::new(
            "CLLD",
            "map-1",
            vec![Layer::new("Languages")],
            MapOptions::new().sidebar(true),
        );
        let script = call.to_script().unwrap();

        assert!(script.starts_with("window.addEventListener(\"load\""));
        assert!(script.contains(r#"CLLD.map("map-1", [{"name":"Languages"}], {"sidebar":true});"#));
    }

    #[test]
    fn test_toggle_binding_registers_one_listener() {
        let binding = ToggleBinding {
            namespace: "CLLD".to_string(),
            eid: "m".to_string(),
            menu_id: "m-layers".to_string(),
            targets: vec![
                ToggleTarget { id: "m-layer-0".to_string(), name: "A".to_string() },
                ToggleTarget { id: "m-layer-1".to_string(), name: "B".to_string() },
            ],
        };
        let script = binding.to_script().unwrap();

        assert_eq!(script.matches("addEventListener").count(), 1);
        assert!(script.contains(r#""m-layer-0":"A""#));
        assert!(script.contains(r#"CLLD.mapToggleLayer("m", layers[id], event.target.checked);"#));
    }
}
