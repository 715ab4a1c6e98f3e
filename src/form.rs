mod container;
mod widgets;

use container::ViewContainer;
use widgets::FormWidget;

use leptos::prelude::*;
use semform_core::{
    DataType, EditRequest, FactoryRegistry, FieldRenderer, FormConfig, Latest, Mode,
    ObservableField, SemanticVersion, ViewProperties,
};
use widgets::{
    BooleanFieldFactory, ComponentCollectionFactory, ComponentFieldFactory, DiTreeFieldFactory,
    FloatFieldFactory, ImageFieldFactory, IntegerFieldFactory, StringFieldFactory,
};

pub fn default_registry(config: &FormConfig) -> FactoryRegistry<FormWidget> {
    FactoryRegistry::new(ImageFieldFactory {
        image: config.image.clone(),
    })
    .with(DataType::Component, ComponentFieldFactory)
    .with(DataType::String, StringFieldFactory)
    .with(
        DataType::ComponentIdSet,
        ComponentCollectionFactory { ordered: false },
    )
    .with(
        DataType::ComponentIdList,
        ComponentCollectionFactory { ordered: true },
    )
    .with(DataType::DiTree, DiTreeFieldFactory)
    .with(DataType::Float, FloatFieldFactory)
    .with(DataType::Integer, IntegerFieldFactory)
    .with(DataType::Boolean, BooleanFieldFactory)
}

/// Renders `latest` in `mode` and returns the view with its bound fields.
///
/// Render failures are logged and shown inline; the field list is then empty.
pub fn render_semantic_form(
    view_props: &ViewProperties,
    config: &FormConfig,
    latest: &Latest<SemanticVersion>,
    mode: Mode,
    on_edit: impl Fn(EditRequest) + Send + Sync + 'static,
) -> (AnyView, Vec<ObservableField>) {
    let renderer = FieldRenderer::new(default_registry(config))
        .with_image_semantic(config.image_semantic())
        .with_edit_hook(on_edit);
    let mut container = ViewContainer::new(config.separator_class());

    let rendered = match mode {
        Mode::Editable => {
            renderer.display_editable_semantic_fields(view_props, &mut container, latest)
        }
        Mode::ReadOnly => {
            renderer.display_read_only_semantic_fields(view_props, &mut container, latest)
        }
    };

    match rendered {
        Ok(fields) => {
            log::debug!("form has {} rows for {} fields", container.len(), fields.len());
            (container.into_view(), fields)
        }
        Err(e) => {
            log::error!("failed to render form: {:#}", e);
            let message = e.to_string();
            (
                view! { <div class="semform-error">{ message }</div> }.into_any(),
                Vec::new(),
            )
        }
    }
}
