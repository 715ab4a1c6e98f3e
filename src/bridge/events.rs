use crate::bridge::invoke::{get_config, get_form};
use crate::ui;
use leptos::prelude::*;
use semform_core::{FormConfig, FormPayload, Mode};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"], js_name = listen)]
    async fn tauri_listen(event: &str, callback: &js_sys::Function);
}

pub fn prime_config(set_config: WriteSignal<FormConfig>) {
    leptos::task::spawn_local(async move {
        if let Some(cfg) = get_config().await {
            ui::apply(&cfg);
            set_config.set(cfg);
        }
    });
}

pub fn prime_form(set_payload: WriteSignal<Option<FormPayload>>, set_mode: WriteSignal<Mode>) {
    leptos::task::spawn_local(async move {
        match get_form().await {
            Some(payload) => {
                set_mode.set(Mode::ReadOnly);
                set_payload.set(Some(payload));
            }
            None => log::debug!("host returned no form"),
        }
    });
}

pub fn init_config_listener(set_config: WriteSignal<FormConfig>) {
    leptos::task::spawn_local(async move {
        let cb = Closure::<dyn FnMut(js_sys::Object)>::new(move |evt_obj: js_sys::Object| {
            if let Ok(payload) = js_sys::Reflect::get(&evt_obj, &JsValue::from_str("payload")) {
                if let Ok(cfg) = serde_wasm_bindgen::from_value::<FormConfig>(payload) {
                    ui::apply(&cfg);
                    set_config.set(cfg);
                }
            }
        });
        let _unlisten = tauri_listen("config://updated", cb.as_ref().unchecked_ref()).await;
        cb.forget();
    });
}

pub fn init_form_listener(
    set_payload: WriteSignal<Option<FormPayload>>,
    set_mode: WriteSignal<Mode>,
) {
    leptos::task::spawn_local(async move {
        let cb = Closure::<dyn FnMut(js_sys::Object)>::new(move |evt_obj: js_sys::Object| {
            if let Ok(payload) = js_sys::Reflect::get(&evt_obj, &JsValue::from_str("payload")) {
                match serde_wasm_bindgen::from_value::<FormPayload>(payload) {
                    Ok(form) => {
                        set_mode.set(Mode::ReadOnly);
                        set_payload.set(Some(form));
                    }
                    Err(e) => log::warn!("ignoring malformed form payload: {}", e),
                }
            }
        });
        let _unlisten = tauri_listen("form://updated", cb.as_ref().unchecked_ref()).await;
        cb.forget();
    });
}
