//! Browser-side adapters for the client: `localStorage` and hard navigation.

use boxcraft_client::{ClientError, KeyValueStore, Navigator};
use tracing::warn;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// `window.localStorage`, looked up on every call so the handle stays `Send + Sync`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let storage = local_storage()
            .ok_or_else(|| ClientError::Storage("localStorage unavailable".into()))?;
        storage
            .set_item(key, value)
            .map_err(|_| ClientError::Storage(format!("could not write {key}")))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            if storage.remove_item(key).is_err() {
                warn!("could not remove {key} from localStorage");
            }
        }
    }
}

/// Full page navigation, used when the session dies under the router.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn navigate(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if window.location().pathname().ok().as_deref() == Some(path) {
            return;
        }
        if window.location().set_href(path).is_err() {
            warn!("could not navigate to {path}");
        }
    }
}

/// Reads the first file picked in `input`, if any, into an upload.
pub async fn read_image(
    input: &web_sys::HtmlInputElement,
) -> Result<Option<boxcraft_types::ImageUpload>, String> {
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(None);
    };
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| format!("could not read {}", file.name()))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    let contentType = file.type_();
    Ok(Some(boxcraft_types::ImageUpload {
        file_name: file.name(),
        content_type: if contentType.is_empty() {
            "application/octet-stream".to_string()
        } else {
            contentType
        },
        bytes,
    }))
}
