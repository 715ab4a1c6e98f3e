use anyhow::Result;
use leptos::prelude::*;
use semform_core::{
    value_text, EditAction, FieldFactory, ImageConfig, ImageFactory, ObservableField,
    SemanticVersion, Uuid, ViewProperties, Widget,
};
use serde_json::Value;

/// A rendered field row, plus the edit slot for widgets that offer one.
pub struct FormWidget {
    view: AnyView,
    on_edit: Option<StoredValue<Option<EditAction>>>,
}

impl FormWidget {
    fn plain(view: AnyView) -> Self {
        Self {
            view,
            on_edit: None,
        }
    }

    pub fn into_view(self) -> AnyView {
        self.view
    }
}

impl Widget for FormWidget {
    fn set_on_edit_action(&mut self, action: EditAction) {
        match &self.on_edit {
            Some(slot) => slot.set_value(Some(action)),
            None => log::debug!("widget has no edit trigger, dropping action"),
        }
    }
}

fn row(label: String, control: AnyView) -> AnyView {
    view! {
      <div class="semform-field">
        <label class="semform-label">{ label }</label>
        { control }
      </div>
    }
    .into_any()
}

fn bind(field: &ObservableField, value: Value) {
    if let Err(e) = field.set_value(value) {
        log::warn!("{}", e);
    }
}

pub struct StringFieldFactory;

impl FieldFactory<FormWidget> for StringFieldFactory {
    fn create(
        &self,
        field: &ObservableField,
        _view: &ViewProperties,
        editable: bool,
    ) -> Result<FormWidget> {
        let initial = value_text(&field.value());
        let control = if editable {
            let field = field.clone();
            view! {
              <input
                type="text"
                class="semform-input semform-control"
                prop:value=initial
                prop:spellcheck=false
                autocomplete="off"
                on:input=move |ev| bind(&field, Value::String(event_target_value(&ev)))
              />
            }
            .into_any()
        } else {
            view! { <div class="semform-value">{ initial }</div> }.into_any()
        };
        Ok(FormWidget::plain(row(field.meaning().to_string(), control)))
    }
}

pub struct IntegerFieldFactory;

impl FieldFactory<FormWidget> for IntegerFieldFactory {
    fn create(
        &self,
        field: &ObservableField,
        _view: &ViewProperties,
        editable: bool,
    ) -> Result<FormWidget> {
        let initial = value_text(&field.value());
        let label = field.meaning().to_string();
        if editable {
            let field = field.clone();
            let control = view! {
              <input
                type="number"
                step="1"
                class="semform-input semform-control"
                prop:value=initial
                on:input=move |ev| {
                    match event_target_value(&ev).trim().parse::<i64>() {
                        Ok(n) => bind(&field, Value::from(n)),
                        Err(_) => log::debug!("ignoring non-integer input for {}", field.meaning()),
                    }
                }
              />
            }
            .into_any();
            return Ok(FormWidget::plain(row(label, control)));
        }

        let slot = StoredValue::new(None::<EditAction>);
        let control = view! {
          <div class="semform-value semform-editable">
            <span>{ initial }</span>
            <button
              type="button"
              class="semform-edit semform-control"
              on:click=move |_| slot.with_value(|action| {
                  if let Some(action) = action {
                      action();
                  }
              })
            >
              "edit"
            </button>
          </div>
        }
        .into_any();
        Ok(FormWidget {
            view: row(label, control),
            on_edit: Some(slot),
        })
    }
}

pub struct FloatFieldFactory;

impl FieldFactory<FormWidget> for FloatFieldFactory {
    fn create(
        &self,
        field: &ObservableField,
        _view: &ViewProperties,
        editable: bool,
    ) -> Result<FormWidget> {
        let initial = value_text(&field.value());
        let control = if editable {
            let field = field.clone();
            view! {
              <input
                type="number"
                step="any"
                class="semform-input semform-control"
                prop:value=initial
                on:input=move |ev| {
                    let parsed = event_target_value(&ev)
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64);
                    match parsed {
                        Some(n) => bind(&field, Value::Number(n)),
                        None => log::debug!("ignoring non-numeric input for {}", field.meaning()),
                    }
                }
              />
            }
            .into_any()
        } else {
            view! { <div class="semform-value">{ initial }</div> }.into_any()
        };
        Ok(FormWidget::plain(row(field.meaning().to_string(), control)))
    }
}

pub struct BooleanFieldFactory;

impl FieldFactory<FormWidget> for BooleanFieldFactory {
    fn create(
        &self,
        field: &ObservableField,
        _view: &ViewProperties,
        editable: bool,
    ) -> Result<FormWidget> {
        let checked = field.value().as_bool().unwrap_or(false);
        let bound = field.clone();
        let control = view! {
          <input
            type="checkbox"
            class="semform-checkbox semform-control"
            prop:checked=checked
            disabled=!editable
            on:change=move |ev| bind(&bound, Value::Bool(event_target_checked(&ev)))
          />
        }
        .into_any();
        Ok(FormWidget::plain(row(field.meaning().to_string(), control)))
    }
}

pub struct ComponentFieldFactory;

impl FieldFactory<FormWidget> for ComponentFieldFactory {
    fn create(
        &self,
        field: &ObservableField,
        view: &ViewProperties,
        editable: bool,
    ) -> Result<FormWidget> {
        let value = field.value();
        let text = view.value_label(&value);
        let control = if editable {
            let field = field.clone();
            view! {
              <div class="semform-component">
                <span class="semform-value">{ text }</span>
                <input
                  type="text"
                  class="semform-input semform-control"
                  prop:value=value_text(&value)
                  placeholder="component id"
                  on:change=move |ev| {
                      let raw = event_target_value(&ev);
                      match Uuid::parse_str(raw.trim()) {
                          Ok(id) => bind(&field, Value::String(id.to_string())),
                          Err(e) => log::warn!("invalid component id {:?}: {}", raw, e),
                      }
                  }
                />
              </div>
            }
            .into_any()
        } else {
            view! { <div class="semform-value semform-component">{ text }</div> }.into_any()
        };
        Ok(FormWidget::plain(row(field.meaning().to_string(), control)))
    }
}

/// Component sets and lists. Either way the members are shown read-only.
pub struct ComponentCollectionFactory {
    pub ordered: bool,
}

impl FieldFactory<FormWidget> for ComponentCollectionFactory {
    fn create(
        &self,
        field: &ObservableField,
        view: &ViewProperties,
        _editable: bool,
    ) -> Result<FormWidget> {
        let items = view
            .component_labels(&field.value(), self.ordered)
            .into_iter()
            .map(|l| view! { <li>{ l }</li> })
            .collect_view();
        let control = if self.ordered {
            view! { <ol class="semform-components">{ items }</ol> }.into_any()
        } else {
            view! { <ul class="semform-components">{ items }</ul> }.into_any()
        };
        Ok(FormWidget::plain(row(field.meaning().to_string(), control)))
    }
}

pub struct DiTreeFieldFactory;

impl FieldFactory<FormWidget> for DiTreeFieldFactory {
    fn create(
        &self,
        field: &ObservableField,
        _view: &ViewProperties,
        _editable: bool,
    ) -> Result<FormWidget> {
        let text = serde_json::to_string_pretty(&field.value())?;
        let control = view! { <pre class="semform-tree">{ text }</pre> }.into_any();
        Ok(FormWidget::plain(row(field.meaning().to_string(), control)))
    }
}

pub struct ImageFieldFactory {
    pub image: Option<ImageConfig>,
}

impl ImageFactory<FormWidget> for ImageFieldFactory {
    fn create(
        &self,
        semantic: &SemanticVersion,
        _view: &ViewProperties,
        _editable: bool,
    ) -> Result<FormWidget> {
        let control = match &self.image {
            Some(img) => {
                let style = format!(
                    "{}{}",
                    img.w.map(|v| format!("width:{v}px;")).unwrap_or_default(),
                    img.h.map(|v| format!("height:{v}px;")).unwrap_or_default()
                );
                view! {
                  <img
                    class="semform-img"
                    src=img.src.clone()
                    alt=img.alt.clone().unwrap_or_default()
                    style=style
                  />
                }
                .into_any()
            }
            None => {
                log::debug!("no image configured for semantic {}", semantic.public_id);
                view! { <div class="semform-img semform-img-missing">"no image"</div> }.into_any()
            }
        };
        Ok(FormWidget::plain(row("image".to_string(), control)))
    }
}
