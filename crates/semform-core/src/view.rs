use crate::latest::Latest;
use crate::model::PatternVersion;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Resolves versions and display text at the current view coordinate.
pub trait ViewCalculator: Send + Sync {
    fn latest_pattern(&self, pattern: Uuid) -> Latest<PatternVersion>;

    fn description_text(&self, component: Uuid) -> Option<String>;
}

/// Display preferences handed to widget factories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeView {
    pub show_public_ids: bool,
}

#[derive(Clone)]
pub struct ViewProperties {
    calculator: Arc<dyn ViewCalculator>,
    node_view: NodeView,
}

impl ViewProperties {
    pub fn new(calculator: Arc<dyn ViewCalculator>, node_view: NodeView) -> Self {
        Self {
            calculator,
            node_view,
        }
    }

    pub fn calculator(&self) -> &dyn ViewCalculator {
        self.calculator.as_ref()
    }

    pub fn node_view(&self) -> &NodeView {
        &self.node_view
    }

    /// Description for a component, falling back to its id.
    pub fn component_label(&self, component: Uuid) -> String {
        match self.calculator.description_text(component) {
            Some(text) if self.node_view.show_public_ids => format!("{text} [{component}]"),
            Some(text) => text,
            None => component.to_string(),
        }
    }

    /// Label for a value that should hold a component id. Anything else is shown as text.
    pub fn value_label(&self, value: &Value) -> String {
        match value.as_str().and_then(|s| Uuid::parse_str(s.trim()).ok()) {
            Some(id) => self.component_label(id),
            None => value_text(value),
        }
    }

    /// Labels for the members of a component set or list.
    ///
    /// A list keeps its stored order. A set has none, so it is sorted case-insensitively.
    /// A non-array value yields no labels.
    pub fn component_labels(&self, value: &Value, ordered: bool) -> Vec<String> {
        let mut labels: Vec<String> = value
            .as_array()
            .map(|items| items.iter().map(|item| self.value_label(item)).collect())
            .unwrap_or_default();
        if !ordered {
            labels.sort_by_key(|l| l.to_lowercase());
        }
        labels
    }
}

/// Plain text for a field value: strings unquoted, null empty, the rest as JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl std::fmt::Debug for ViewProperties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewProperties")
            .field("node_view", &self.node_view)
            .finish_non_exhaustive()
    }
}
