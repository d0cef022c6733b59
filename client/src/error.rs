use wasm_bindgen::JsValue;

/// A page collaborator that could not be set up. The affected feature stays
/// inert; nothing else is torn down.
#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("page element `{0}` not found")]
    MissingElement(String),
    #[error("{context}: {message}")]
    Js {
        context: &'static str,
        message: String,
    },
}

impl MountError {
    pub fn js(context: &'static str, err: JsValue) -> Self {
        let message = err
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&err, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{err:?}"));
        Self::Js { context, message }
    }
}
