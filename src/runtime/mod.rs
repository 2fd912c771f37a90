//! Client-side lifecycle of a rendered map.
//!
//! The browser runs the emitted script; this module models the same lifecycle
//! so hosts that drive a map library from Rust (headless renderers, tests) get
//! identical semantics: initialization waits for a one-shot ready signal, a
//! map is initialized at most once, and layer toggles address an initialized
//! instance by layer name.

pub mod instance;
pub mod ready;
pub mod toggle;

pub use instance::{spawn_initializer, MapApi, MapInstance, MapState};
pub use ready::ReadySignal;
pub use toggle::ToggleDispatcher;
