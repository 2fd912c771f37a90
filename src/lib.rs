//! Server-side rendering of interactive map widgets.
//!
//! [`controller::MapDisplayController`] turns a [`models::MapView`] into markup
//! plus a deferred initialization call for the browser-side map library.
//! [`registry::MapRegistry`] builds views by map name, [`server`] serves them
//! over HTTP and [`runtime`] models the client-side lifecycle.

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod legend;
pub mod logging;
pub mod models;
pub mod page;
pub mod registry;
pub mod runtime;
pub mod script;
pub mod server;
pub mod templates;

pub use controller::{LayoutMode, MapDisplayController, RenderedMap};
pub use error::{MapError, Result};
pub use models::{Fragment, Layer, MapOptions, MapView};
