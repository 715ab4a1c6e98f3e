use serde::{Deserialize, Serialize};
use uuid::{uuid, Uuid};

/// Semantic that gets an image control until patterns can carry image fields.
pub const IMAGE_SEMANTIC_PUBLIC_ID: Uuid = uuid!("4a3b5e7c-0d1f-4c2a-9b8e-6f7a1c2d3e4f");

pub const DEFAULT_SEPARATOR_CLASS: &str = "field-separator";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    pub separator_class: Option<String>,
    pub image: Option<ImageConfig>,
    pub image_semantic: Option<Uuid>,
    pub show_public_ids: Option<bool>,
    pub font: Option<String>,
    pub font_size: Option<f32>,
    pub gap: Option<f32>, // rem between rows (default ~0.5)
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ImageConfig {
    pub src: String,
    pub alt: Option<String>,
    pub w: Option<u32>,
    pub h: Option<u32>,
}

impl FormConfig {
    pub fn separator_class(&self) -> &str {
        self.separator_class
            .as_deref()
            .unwrap_or(DEFAULT_SEPARATOR_CLASS)
    }

    pub fn image_semantic(&self) -> Uuid {
        self.image_semantic.unwrap_or(IMAGE_SEMANTIC_PUBLIC_ID)
    }

    pub fn show_public_ids(&self) -> bool {
        self.show_public_ids.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = FormConfig::default();
        assert_eq!(cfg.separator_class(), "field-separator");
        assert_eq!(cfg.image_semantic(), IMAGE_SEMANTIC_PUBLIC_ID);
        assert!(!cfg.show_public_ids());
    }

    #[test]
    fn partial_json() {
        let cfg: FormConfig = serde_json::from_value(serde_json::json!({
            "separator_class": "rule",
            "image": { "src": "/assets/logo.png", "w": 64 }
        }))
        .unwrap();
        assert_eq!(cfg.separator_class(), "rule");
        let image = cfg.image.unwrap();
        assert_eq!(image.w, Some(64));
        assert_eq!(image.alt, None);
    }
}
