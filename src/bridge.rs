/// Browser-side implementations of the host capability traits

use crate::config::GoConfig;
use crate::error::StorageError;
use crate::panel::Dialogs;
use crate::recent::KeyValueStore;
use crate::redirect::{handle_input_entered, suggestion, Disposition, TabNavigator};
use log::{error, info, warn};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

// Import JS bridge functions
#[wasm_bindgen(module = "/chrome.js")]
extern "C" {
    fn addOmniboxListeners(on_changed: &js_sys::Function, on_entered: &js_sys::Function);

    fn updateCurrentTab(url: &str);

    fn createTab(url: &str, active: bool);

    fn onInstalled(callback: &js_sys::Function);

    #[wasm_bindgen(catch)]
    async fn openPanelOnActionClick() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getSyncStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setSyncStorage(key: &str, value: JsValue) -> Result<(), JsValue>;
}

/// `chrome.tabs`
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeTabs;

impl TabNavigator for ChromeTabs {
    fn update_current_tab(&self, url: &str) {
        updateCurrentTab(url);
    }

    fn create_tab(&self, url: &str, active: bool) {
        createTab(url, active);
    }
}

/// `chrome.storage.sync`
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncStorage;

impl KeyValueStore for SyncStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let value = getSyncStorage(key)
            .await
            .map_err(|e| StorageError::Bridge(format!("{:?}", e)))?;

        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }

        serde_wasm_bindgen::from_value(value)
            .map(Some)
            .map_err(|e| StorageError::Serde(e.to_string()))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let js = value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| StorageError::Serde(e.to_string()))?;

        setSyncStorage(key, js)
            .await
            .map_err(|e| StorageError::Bridge(format!("{:?}", e)))
    }
}

/// `window.confirm` / `window.alert`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDialogs;

impl Dialogs for BrowserDialogs {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.alert_with_message(message) {
                error!("alert failed: {:?}", e);
            }
        }
    }
}

/// Close the popup window after a navigation
pub fn close_window() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.close() {
            warn!("window.close failed: {:?}", e);
        }
    }
}

/// Hook the omnibox keyword events up to the redirector
pub fn register_omnibox(config: &GoConfig) {
    let base = config.redirect_base.clone();
    let on_changed = Closure::wrap(Box::new(move |text: String| -> JsValue {
        serde_wasm_bindgen::to_value(&suggestion(&base, &text)).unwrap_or_else(|e| {
            error!("Failed to build suggestion: {}", e);
            JsValue::NULL
        })
    }) as Box<dyn Fn(String) -> JsValue>);

    let base = config.redirect_base.clone();
    let on_entered = Closure::wrap(Box::new(move |text: String, disposition: String| {
        handle_input_entered(&ChromeTabs, &base, &text, &Disposition::parse(&disposition));
    }) as Box<dyn Fn(String, String)>);

    addOmniboxListeners(
        on_changed.as_ref().unchecked_ref(),
        on_entered.as_ref().unchecked_ref(),
    );

    // Listeners live as long as the background page
    on_changed.forget();
    on_entered.forget();
}

/// Ask, once at install time, for the toolbar icon to open the side panel
pub fn register_side_panel_behavior() {
    let on_installed = Closure::wrap(Box::new(|| {
        spawn_local(async {
            match openPanelOnActionClick().await {
                Ok(applied) if applied.as_bool() == Some(true) => {
                    info!("toolbar icon now opens the side panel");
                }
                Ok(_) => warn!("sidePanel API unavailable, keeping popup behavior"),
                Err(e) => warn!("sidePanel behavior error: {:?}", e),
            }
        });
    }) as Box<dyn Fn()>);

    onInstalled(on_installed.as_ref().unchecked_ref());
    on_installed.forget();
}
