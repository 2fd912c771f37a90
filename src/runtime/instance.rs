use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{MapError, Result};
use crate::models::{Layer, MapOptions};
use crate::runtime::ReadySignal;
use crate::script::InitCall;

/// The external map library, as driven by the emitted script.
#[async_trait]
pub trait MapApi: Send + Sync {
    async fn init(&self, eid: &str, layers: &[Layer], options: &MapOptions) -> Result<()>;
    async fn set_layer_visible(&self, eid: &str, layer: &str, visible: bool) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapState {
    Uninitialized,
    Initialized,
}

struct Inner {
    state: MapState,
    visible: HashMap<String, bool>,
}

/// A map mounted at `eid`, initialized at most once.
#[derive(Clone)]
pub struct MapInstance {
    call: Arc<InitCall>,
    api: Arc<dyn MapApi>,
    inner: Arc<Mutex<Inner>>,
}

impl MapInstance {
    pub fn new(call: InitCall, api: Arc<dyn MapApi>) -> Self {
        Self {
            call: Arc::new(call),
            api,
            inner: Arc::new(Mutex::new(Inner {
                state: MapState::Uninitialized,
                visible: HashMap::new(),
            })),
        }
    }

    pub fn eid(&self) -> &str {
        &self.call.eid
    }

    pub async fn state(&self) -> MapState {
        self.inner.lock().await.state
    }

    /// Visibility of `layer`, `None` before initialization or for unknown names.
    pub async fn is_visible(&self, layer: &str) -> Option<bool> {
        self.inner.lock().await.visible.get(layer).copied()
    }

    pub async fn initialize(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if inner.state == MapState::Initialized {
            return Err(MapError::AlreadyInitialized {
                eid: self.call.eid.clone(),
            });
        }

        self.api
            .init(&self.call.eid, &self.call.layers, &self.call.options)
            .await?;

        // Every layer starts visible, matching the pre-checked menu entries
        inner.visible = self
            .call
            .layers
            .iter()
            .map(|l| (l.name.clone(), true))
            .collect();
        inner.state = MapState::Initialized;

        info!(eid = %self.call.eid, layers = self.call.layers.len(), "Map initialized");
        Ok(())
    }

    /// Show or hide `layer`. Repeating the current state is harmless.
    pub async fn toggle(&self, layer: &str, visible: bool) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if inner.state != MapState::Initialized {
            return Err(MapError::NotInitialized {
                eid: self.call.eid.clone(),
            });
        }

        if !inner.visible.contains_key(layer) {
            // Names are not validated; the library decides what an unknown name means
            warn!(eid = %self.call.eid, layer, "Toggling a layer the map was not initialized with");
        }

        self.api.set_layer_visible(&self.call.eid, layer, visible).await?;
        inner.visible.insert(layer.to_string(), visible);

        debug!(eid = %self.call.eid, layer, visible, "Layer toggled");
        Ok(())
    }
}

/// Initialize `instance` once `ready` resolves.
pub fn spawn_initializer(instance: MapInstance, ready: ReadySignal) -> JoinHandle<Result<MapInstance>> {
    tokio::spawn(async move {
        ready.wait().await;
        instance.initialize().await?;
        Ok(instance)
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::time::Duration;

    /// Records every call made against the map library.
    #[derive(Default)]
    pub struct RecordingApi {
        pub inits: std::sync::Mutex<Vec<(String, Vec<String>)>>,
        pub toggles: std::sync::Mutex<Vec<(String, String, bool)>>,
    }

    #[async_trait]
    impl MapApi for RecordingApi {
        async fn init(&self, eid: &str, layers: &[Layer], _options: &MapOptions) -> Result<()> {
            self.inits
                .lock()
                .unwrap()
                .push((eid.to_string(), layers.iter().map(|l| l.name.clone()).collect()));
            Ok(())
        }

        async fn set_layer_visible(&self, eid: &str, layer: &str, visible: bool) -> Result<()> {
            self.toggles
                .lock()
                .unwrap()
                .push((eid.to_string(), layer.to_string(), visible));
            Ok(())
        }
    }

    fn instance(api: Arc<RecordingApi>) -> MapInstance {
        let call = InitCall::new(
            "CLLD",
            "m",
            vec![Layer::new("A"), Layer::new("B")],
            MapOptions::new(),
        );
        MapInstance::new(call, api)
    }

    #[tokio::test]
    async fn test_initializes_exactly_once() {
        let api = Arc::new(RecordingApi::default());
        let map = instance(api.clone());

        assert_eq!(map.state().await, MapState::Uninitialized);
        map.initialize().await.unwrap();
        assert_eq!(map.state().await, MapState::Initialized);

        let err = map.initialize().await.unwrap_err();
        assert!(matches!(err, MapError::AlreadyInitialized { .. }));
        assert_eq!(api.inits.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_requires_initialization() {
        let api = Arc::new(RecordingApi::default());
        let map = instance(api.clone());

        let err = map.toggle("A", false).await.unwrap_err();
        assert!(matches!(err, MapError::NotInitialized { .. }));
        assert!(api.toggles.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_is_idempotent() {
        let api = Arc::new(RecordingApi::default());
        let map = instance(api.clone());
        map.initialize().await.unwrap();

        assert_eq!(map.is_visible("A").await, Some(true));
        map.toggle("A", false).await.unwrap();
        map.toggle("A", false).await.unwrap();
        assert_eq!(map.is_visible("A").await, Some(false));
        assert_eq!(map.is_visible("B").await, Some(true));

        map.toggle("A", true).await.unwrap();
        assert_eq!(map.is_visible("A").await, Some(true));
        assert_eq!(api.toggles.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_initializer_waits_for_ready() {
        let api = Arc::new(RecordingApi::default());
        let ready = ReadySignal::new();
        let handle = spawn_initializer(instance(api.clone()), ready.clone());

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(api.inits.lock().unwrap().is_empty());

        ready.resolve();
        let map = handle.await.unwrap().unwrap();
        assert_eq!(map.state().await, MapState::Initialized);
        assert_eq!(
            api.inits.lock().unwrap().as_slice(),
            &[("m".to_string(), vec!["A".to_string(), "B".to_string()])]
        );
    }
}
