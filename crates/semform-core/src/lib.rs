//! Schema-driven rendering of semantic records into form widgets.
//!
//! The crate knows nothing about a UI toolkit. Callers supply the widgets through
//! [`FieldFactory`]/[`ImageFactory`] and the target through [`FieldContainer`].

pub mod config;
pub mod factory;
pub mod latest;
pub mod model;
pub mod observable;
pub mod render;
pub mod resolve;
pub mod snapshot;
pub mod view;

pub use config::{FormConfig, ImageConfig, IMAGE_SEMANTIC_PUBLIC_ID};
pub use factory::{EditAction, FactoryRegistry, FieldFactory, ImageFactory, Widget};
pub use latest::Latest;
pub use model::{
    DataType, FieldDefinition, FieldRecord, FormPayload, PatternVersion, SemanticVersion,
};
pub use observable::{obtain_observable_field, same_value, write_back, ObservableField};
pub use render::{EditHook, EditRequest, FieldContainer, FieldRenderer, Mode};
pub use resolve::{field_records, generate_semantic_ui_fields};
pub use snapshot::ViewSnapshot;
pub use view::{value_text, NodeView, ViewCalculator, ViewProperties};
pub use uuid::Uuid;
