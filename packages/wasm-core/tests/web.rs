//! Browser-side tests, run with `wasm-pack test --headless --firefox`

#![cfg(target_arch = "wasm32")]

use vimeo_embed_wasm::VimeoEmbed;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_malformed_state_is_ignored() {
    let mut embed = VimeoEmbed::new();
    embed.set_property("Video ID", "x").unwrap();
    assert!(!embed.set_state("a|b|c"));
    assert_eq!(embed.get_property("Video ID").unwrap(), "x");
}

#[wasm_bindgen_test]
fn test_field_keys_in_order() {
    let keys = VimeoEmbed::new().field_keys();
    assert_eq!(keys.length(), 9);
    assert_eq!(keys.get(0).as_string().unwrap(), "Video ID");
    assert_eq!(keys.get(8).as_string().unwrap(), "Video Height");
}

#[wasm_bindgen_test]
fn test_render_default_markup() {
    let mut embed = VimeoEmbed::new();
    embed.set_property("Video ID", "99").unwrap();
    let markup = embed.render().unwrap();
    assert!(markup.contains("width=\"480\""));
    assert!(markup.contains("height=\"360\""));
    assert!(markup.contains("/video/99?title=1&byline=1&portrait=1&autoplay=0&loop=0"));
}
