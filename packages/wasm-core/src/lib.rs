use wasm_bindgen::prelude::*;

use vimeo_embed_common::{schema, EmbedOptions, EmbedWidget, FieldKey};

pub use vimeo_embed_common::{PLUGIN_DESCRIPTION, PLUGIN_DISPLAY_NAME};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[wasm_bindgen]
pub fn display_name() -> String {
    PLUGIN_DISPLAY_NAME.to_string()
}

#[wasm_bindgen]
pub fn description() -> String {
    PLUGIN_DESCRIPTION.to_string()
}

// ===== Widget WASM Bindings =====

/// WASM wrapper for EmbedWidget
#[wasm_bindgen]
pub struct VimeoEmbed {
    widget: EmbedWidget,
    options: EmbedOptions,
}

impl Default for VimeoEmbed {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl VimeoEmbed {
    /// Create a widget with default field values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            widget: EmbedWidget::new(),
            options: EmbedOptions::default(),
        }
    }

    /// Create a widget with rendering options given as JSON
    #[wasm_bindgen]
    pub fn with_options(options_json: &str) -> Result<VimeoEmbed, String> {
        let options = EmbedOptions::from_json(options_json).map_err(|e| e.to_string())?;
        Ok(Self {
            widget: EmbedWidget::new(),
            options,
        })
    }

    /// The `|`-delimited state string the host persists
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.widget.encode_state()
    }

    /// Apply a stored state string. Returns false, leaving every field
    /// unchanged, when it does not have exactly nine segments.
    #[wasm_bindgen]
    pub fn set_state(&mut self, state: &str) -> bool {
        let outcome = self.widget.decode_state(state);
        if !outcome.is_applied() {
            web_sys::console::warn_1(&format!("vimeo embed: ignored state {state:?}").into());
        }
        outcome.is_applied()
    }

    /// Read a field by its host key, e.g. "Video Width"
    #[wasm_bindgen]
    pub fn get_property(&self, key: &str) -> Result<String, String> {
        let key = key.parse::<FieldKey>().map_err(|e| e.to_string())?;
        Ok(self.widget.get(key))
    }

    /// Write a field by its host key
    #[wasm_bindgen]
    pub fn set_property(&mut self, key: &str, value: &str) -> Result<(), String> {
        let key = key.parse::<FieldKey>().map_err(|e| e.to_string())?;
        self.widget.set(key, value);
        Ok(())
    }

    /// Field keys in schema order
    #[wasm_bindgen]
    pub fn field_keys(&self) -> js_sys::Array {
        FieldKey::ALL
            .iter()
            .map(|key| JsValue::from_str(key.as_str()))
            .collect()
    }

    /// Field descriptors (key, kind, required, default) as JSON
    #[wasm_bindgen]
    pub fn schema_json(&self) -> Result<String, String> {
        serde_json::to_string(&schema()).map_err(|e| e.to_string())
    }

    /// Check required fields; returns an error message when one is empty
    #[wasm_bindgen]
    pub fn validate(&self) -> Result<(), String> {
        self.widget.validate().map_err(|e| e.to_string())
    }

    /// Render the iframe markup
    #[wasm_bindgen]
    pub fn render(&self) -> Result<String, String> {
        self.widget
            .render_with(&self.options)
            .map_err(|e| e.to_string())
    }
}
