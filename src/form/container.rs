use super::widgets::FormWidget;
use leptos::prelude::*;
use semform_core::FieldContainer;

/// Collects rendered rows in field order.
pub struct ViewContainer {
    children: Vec<AnyView>,
    separator_class: String,
}

impl ViewContainer {
    pub fn new(separator_class: impl Into<String>) -> Self {
        Self {
            children: Vec::new(),
            separator_class: separator_class.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn into_view(self) -> AnyView {
        let children = self.children;
        view! { <div class="semform-fields">{ children }</div> }.into_any()
    }
}

impl FieldContainer<FormWidget> for ViewContainer {
    fn add_widget(&mut self, widget: FormWidget) {
        self.children.push(widget.into_view());
    }

    fn add_separator(&mut self) {
        let class = self.separator_class.clone();
        self.children.push(view! { <hr class=class /> }.into_any());
    }
}
