use crate::bridge::events::{init_config_listener, init_form_listener, prime_config, prime_form};
use crate::bridge::invoke::submit_fields;
use crate::form::render_semantic_form;
use crate::utils::focus::{focus_move, raf_focus_first_form_control};
use leptos::ev::KeyboardEvent;
use leptos::prelude::*;
use semform_core::{
    write_back, FormConfig, FormPayload, Latest, Mode, NodeView, ObservableField, ViewProperties,
    ViewSnapshot,
};
use std::sync::Arc;

#[component]
pub fn App() -> impl IntoView {
    let (payload, set_payload) = signal(Option::<FormPayload>::None);
    let (config, set_config) = signal(FormConfig::default());
    let (mode, set_mode) = signal(Mode::ReadOnly);
    let fields = StoredValue::new(Vec::<ObservableField>::new());
    let (dirty, set_dirty) = signal(false);

    // Prime state from host
    prime_config(set_config);
    prime_form(set_payload, set_mode);

    // Event listeners
    init_config_listener(set_config);
    init_form_listener(set_payload, set_mode);

    let submit = move || {
        let Some(semantic) = payload.with_untracked(|p| {
            p.as_ref()
                .and_then(|p| p.semantic.as_ref())
                .map(|s| s.public_id)
        }) else {
            return;
        };
        let (changed, values) = fields.with_value(|fields| {
            (
                fields.iter().any(|f| f.is_dirty()),
                fields.iter().map(|f| f.value()).collect::<Vec<_>>(),
            )
        });
        if changed {
            // Keep the read-only pass showing what was just saved.
            fields.with_value(|fields| {
                set_payload.update(|p| {
                    if let Some(s) = p.as_mut().and_then(|p| p.semantic.as_mut()) {
                        write_back(s, fields);
                    }
                });
            });
            leptos::task::spawn_local(async move {
                submit_fields(semantic, values).await;
            });
        } else {
            log::debug!("nothing changed on semantic {}", semantic);
        }
        set_dirty.set(false);
        set_mode.set(Mode::ReadOnly);
    };

    let cancel = move || {
        fields.with_value(|fields| {
            for f in fields.iter().filter(|f| f.is_writable()) {
                if let Err(e) = f.reset() {
                    log::warn!("{}", e);
                }
            }
        });
        set_dirty.set(false);
        set_mode.set(Mode::ReadOnly);
    };

    let form_keys = move |ev: KeyboardEvent| {
        let editing = mode.get_untracked().is_editable();
        match ev.key().as_str() {
            "Enter" if editing => {
                ev.prevent_default();
                submit();
            }
            "Escape" if editing => {
                ev.prevent_default();
                cancel();
            }
            "n" if ev.ctrl_key() => {
                ev.prevent_default();
                focus_move(1);
            }
            "p" if ev.ctrl_key() => {
                ev.prevent_default();
                focus_move(-1);
            }
            _ => {}
        }
    };

    Effect::new(move |_| {
        let _ = mode.get();
        raf_focus_first_form_control();
    });

    view! {
      <main class="semform" on:keydown=form_keys tabindex="0">
        { move || {
            let Some(p) = payload.get() else {
              return view! { <div class="semform-empty">"no record"</div> }.into_any();
            };
            let cfg = config.get();
            let current = mode.get();
            let view_props = ViewProperties::new(
                Arc::new(ViewSnapshot::from_payload(&p)),
                NodeView { show_public_ids: cfg.show_public_ids() },
            );
            let latest = Latest::from(p.semantic.clone());
            let locked = p.read_only;

            let (form, rendered) = render_semantic_form(&view_props, &cfg, &latest, current, move |req| {
                if locked {
                    log::debug!("semantic {} is locked, ignoring edit request", req.semantic);
                    return;
                }
                log::info!("editing semantic {} from field {}", req.semantic, req.field_index);
                set_mode.set(Mode::Editable);
            });
            for f in rendered.iter().filter(|f| f.is_writable()) {
                f.subscribe(move |_| set_dirty.set(true));
            }
            fields.set_value(rendered);

            let actions = if current.is_editable() {
                view! {
                  <div class="semform-actions">
                    <button
                      type="button"
                      class="semform-btn semform-control"
                      class:semform-dirty=move || dirty.get()
                      on:click=move |_| submit()
                    >
                      "save"
                    </button>
                    <button type="button" class="semform-btn semform-control" on:click=move |_| cancel()>
                      "cancel"
                    </button>
                  </div>
                }
                .into_any()
            } else {
                ().into_any()
            };

            view! { {form} {actions} }.into_any()
        }}
      </main>
    }
}
