use starwish::WidgetConfig;

use super::{log_warn, LOCALSTORAGE_CONFIG_KEY};

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(super) fn local_storage_get_string(key: &str) -> Option<String> {
    local_storage().and_then(|s| s.get_item(key).ok().flatten())
}

/// Optional JSON overrides; anything unreadable falls back to the defaults.
pub(super) fn load_config() -> WidgetConfig {
    let Some(raw) = local_storage_get_string(LOCALSTORAGE_CONFIG_KEY) else {
        return WidgetConfig::default();
    };
    match WidgetConfig::from_json(&raw) {
        Ok(cfg) => cfg,
        Err(e) => {
            log_warn(&format!("ignoring {LOCALSTORAGE_CONFIG_KEY}: {e}"));
            WidgetConfig::default()
        }
    }
}
