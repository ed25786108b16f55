//! Browser binding
//!
//! JavaScript owns the animation frame loop and the canvas; it calls
//! [`WebGame::frame`] each refresh and draws the returned snapshot JSON.

use wasm_bindgen::prelude::*;

use crate::config::WorldConfig;
use crate::driver::{Driver, InputEvent};
use crate::error::HostError;
use crate::host::{HostBridge, HostRequest, LifecycleEvent};
use crate::persistence::LocalStorageStore;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
}

/// Forwards lifecycle events, as JSON strings, to a JS callback
struct JsHost {
    callback: Option<js_sys::Function>,
}

impl HostBridge for JsHost {
    fn send(&mut self, event: &LifecycleEvent) -> Result<(), HostError> {
        let Some(callback) = &self.callback else {
            return Err(HostError::NotConnected);
        };
        let json = serde_json::to_string(event).map_err(|e| HostError::Rejected {
            event: event.name(),
            reason: e.to_string(),
        })?;
        callback
            .call1(&JsValue::NULL, &JsValue::from_str(&json))
            .map(|_| ())
            .map_err(|e| HostError::Rejected {
                event: event.name(),
                reason: format!("{e:?}"),
            })
    }
}

#[wasm_bindgen]
pub struct WebGame {
    driver: Driver,
}

#[wasm_bindgen]
impl WebGame {
    /// `config_json` overrides the default tuning; `on_event` receives
    /// lifecycle events as JSON strings
    #[wasm_bindgen(constructor)]
    pub fn new(
        seed: Option<f64>,
        config_json: Option<String>,
        on_event: Option<js_sys::Function>,
    ) -> Result<WebGame, JsValue> {
        let config = match config_json {
            Some(json) => WorldConfig::from_json_str(&json)
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => WorldConfig::default(),
        };
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        let host = JsHost { callback: on_event };
        let driver = Driver::new(config, seed, Box::new(LocalStorageStore), Box::new(host));
        Ok(WebGame { driver })
    }

    /// Advance by the raw elapsed seconds; returns the snapshot as JSON
    pub fn frame(&mut self, dt: f32) -> String {
        let snapshot = self.driver.frame(dt);
        serde_json::to_string(&snapshot).unwrap_or_default()
    }

    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.driver.snapshot()).unwrap_or_default()
    }

    /// `flap`, `toggle_pause`, `start`, `restart` or `primary`
    pub fn input(&mut self, name: &str) -> bool {
        match InputEvent::from_str(name) {
            Some(input) => self.driver.handle(input),
            None => {
                log::warn!("Unknown input {:?}", name);
                false
            }
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.driver.resize(width, height)
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.driver.visibility_changed(visible);
    }

    /// Request from the host SDK, e.g. `{"type":"pause"}`
    pub fn host_request(&mut self, json: &str) -> Result<(), JsValue> {
        let request: HostRequest =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.driver.host_request(&request);
        Ok(())
    }

    pub fn mode(&self) -> String {
        self.driver.mode().as_str().to_string()
    }
}
