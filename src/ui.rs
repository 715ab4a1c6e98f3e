use leptos::web_sys::window;
use semform_core::FormConfig;
use wasm_bindgen::JsCast;

pub fn apply(cfg: &FormConfig) {
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(root_el) = doc.document_element() {
            let html_el: leptos::web_sys::HtmlElement = root_el.unchecked_into();
            let style = html_el.style();

            if let Some(v) = &cfg.font {
                let _ = style.set_property("--font", v);
            }
            if let Some(px) = cfg.font_size {
                let _ = style.set_property("--fs", &format!("{px}px"));
            }
            if let Some(gap) = cfg.gap {
                let _ = style.set_property("--gap", &format!("{gap}rem"));
            }
        }
    }
}
