use semform_core::{FormConfig, FormPayload, Uuid};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> JsValue;
}

#[derive(Serialize, Deserialize)]
pub struct Empty {}

#[derive(Serialize, Deserialize)]
pub struct SubmitFieldsArgs {
    pub semantic: Uuid,
    pub fields: Vec<serde_json::Value>,
}

fn empty_args() -> JsValue {
    serde_wasm_bindgen::to_value(&Empty {}).unwrap_or(JsValue::NULL)
}

pub async fn get_config() -> Option<FormConfig> {
    let v = invoke("get_config", empty_args()).await;
    serde_wasm_bindgen::from_value::<FormConfig>(v).ok()
}

pub async fn get_form() -> Option<FormPayload> {
    let v = invoke("get_form", empty_args()).await;
    serde_wasm_bindgen::from_value::<FormPayload>(v).ok()
}

pub async fn submit_fields(semantic: Uuid, fields: Vec<serde_json::Value>) {
    // serde_json first so `Value::Object` crosses as a plain JS object, not a Map.
    let Ok(json) = serde_json::to_value(SubmitFieldsArgs { semantic, fields }) else {
        log::error!("failed to encode fields for semantic {}", semantic);
        return;
    };
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    match json.serialize(&serializer) {
        Ok(args) => {
            let _ = invoke("submit_fields", args).await;
        }
        Err(e) => log::error!("failed to encode fields for semantic {}: {}", semantic, e),
    }
}
