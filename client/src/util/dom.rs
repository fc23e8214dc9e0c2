//! Browser environment access: bootstrap inputs, session storage, language.
//!
//! Every helper is a no-op or returns `None` outside the browser so SSR and
//! native tests stay deterministic.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

/// DOM id of the hidden input carrying the UI's instance prefix.
pub const INSTANCE_ELEMENT_ID: &str = "EDUMFA_INSTANCE_URL";

/// `value` attribute of the `<input>` element with the given id.
pub fn input_value(id: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()?.document()?;
        let input = document.get_element_by_id(id)?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
        Some(input.value())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        None
    }
}

/// Instance prefix the UI and backend are mounted under (`""` for the root).
pub fn instance_url() -> String {
    normalize_instance(&input_value(INSTANCE_ELEMENT_ID).unwrap_or_default())
}

/// `"/"` and trailing slashes collapse so paths can be appended directly.
pub fn normalize_instance(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}

/// Read a value from `sessionStorage`.
pub fn session_get(key: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window()?.session_storage().ok()??;
        storage.get_item(key).ok()?
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Remove a value from `sessionStorage`.
pub fn session_remove(key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(Ok(Some(storage))) = web_sys::window().map(|w| w.session_storage()) {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
    }
}

/// Full page load of another URL (leaves the single-page app).
pub fn redirect(url: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(url);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
    }
}
