//! Page-Embedded Data
//!
//! Config and transfer state ride along in the host page as
//! `<script type="application/json">` elements.

use shopping_core::{AppConfig, TransferState};

const CONFIG_ELEMENT_ID: &str = "app-config";
const TRANSFER_STATE_ELEMENT_ID: &str = "transfer-state";

fn embedded_json(id: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(id)?;
    element.text_content()
}

/// Page config, defaults when absent or invalid
pub fn load_config() -> AppConfig {
    let Some(json) = embedded_json(CONFIG_ELEMENT_ID) else {
        return AppConfig::default();
    };
    match AppConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            web_sys::console::warn_1(&format!("[PAGE] Ignoring page config: {}", e).into());
            AppConfig::default()
        }
    }
}

/// State handed over by an earlier render, empty when there is none
pub fn load_transfer_state() -> TransferState {
    let Some(json) = embedded_json(TRANSFER_STATE_ELEMENT_ID) else {
        return TransferState::new();
    };
    TransferState::from_json(&json).unwrap_or_else(|e| {
        log::warn!("discarding transfer state: {}", e);
        TransferState::new()
    })
}
