use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use map_widget::config::MapSettings;
use map_widget::runtime::{spawn_initializer, MapApi, MapInstance, MapState, ReadySignal, ToggleDispatcher};
use map_widget::{Layer, MapDisplayController, MapError, MapOptions, MapView, Result};

#[derive(Default)]
struct FakeLibrary {
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl MapApi for FakeLibrary {
    async fn init(&self, eid: &str, layers: &[Layer], options: &MapOptions) -> Result<()> {
        let names: Vec<&str> = layers.iter().map(|l| l.name.as_str()).collect();
        self.calls
            .lock()
            .unwrap()
            .push(format!("init {eid} {names:?} sidebar={}", options.is_sidebar()));
        Ok(())
    }

    async fn set_layer_visible(&self, eid: &str, layer: &str, visible: bool) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("toggle {eid} {layer} {visible}"));
        Ok(())
    }
}

#[tokio::test]
async fn test_render_then_initialize_then_toggle() {
    let view = MapView::new("m")
        .with_layer(Layer::new("A").with_marker("●"))
        .with_layer(Layer::new("B"));
    let rendered = MapDisplayController::new(MapSettings::default())
        .render(&view)
        .unwrap();

    let library = Arc::new(FakeLibrary::default());
    let ready = ReadySignal::new();
    let pending = MapInstance::new(rendered.init.clone(), library.clone());
    let handle = spawn_initializer(pending.clone(), ready.clone());

    // Clicks before load hit an uninitialized map
    let dispatcher = ToggleDispatcher::from_menu(rendered.menu.as_ref().unwrap());
    let early = dispatcher.dispatch(&pending, "m-layer-0", false).await;
    assert!(matches!(early, Err(MapError::NotInitialized { .. })));

    assert!(ready.resolve());
    let map = handle.await.unwrap().unwrap();
    assert_eq!(map.state().await, MapState::Initialized);

    dispatcher.dispatch(&map, "m-layer-0", false).await.unwrap();
    dispatcher.dispatch(&map, "m-layer-0", true).await.unwrap();

    assert_eq!(
        library.calls.lock().unwrap().as_slice(),
        &[
            "init m [\"A\", \"B\"] sidebar=false".to_string(),
            "toggle m A false".to_string(),
            "toggle m A true".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_second_ready_does_not_reinitialize() {
    let library = Arc::new(FakeLibrary::default());
    let ready = ReadySignal::new();
    let view = MapView::new("s")
        .with_options(MapOptions::new().sidebar(true))
        .with_layer(Layer::new("Languages"));
    let rendered = MapDisplayController::default().render(&view).unwrap();

    let handle = spawn_initializer(MapInstance::new(rendered.init, library.clone()), ready.clone());
    ready.resolve();
    let map = handle.await.unwrap().unwrap();
    assert!(!ready.resolve());

    assert!(matches!(map.initialize().await, Err(MapError::AlreadyInitialized { .. })));
    assert_eq!(library.calls.lock().unwrap().len(), 1);
}
