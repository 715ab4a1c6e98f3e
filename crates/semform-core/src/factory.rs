use crate::model::{DataType, SemanticVersion};
use crate::observable::ObservableField;
use crate::view::ViewProperties;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Callback fired when the user asks to edit a read-only widget.
pub type EditAction = Arc<dyn Fn() + Send + Sync>;

pub trait Widget {
    /// Installs the edit trigger. Widgets without one ignore it.
    fn set_on_edit_action(&mut self, _action: EditAction) {}
}

/// Builds the control for one data type.
pub trait FieldFactory<W>: Send + Sync {
    fn create(&self, field: &ObservableField, view: &ViewProperties, editable: bool) -> Result<W>;
}

/// Builds the image control injected for the image workaround semantic.
pub trait ImageFactory<W>: Send + Sync {
    fn create(&self, semantic: &SemanticVersion, view: &ViewProperties, editable: bool) -> Result<W>;
}

pub struct FactoryRegistry<W> {
    factories: HashMap<DataType, Box<dyn FieldFactory<W>>>,
    image: Box<dyn ImageFactory<W>>,
}

impl<W> FactoryRegistry<W> {
    pub fn new(image: impl ImageFactory<W> + 'static) -> Self {
        Self {
            factories: HashMap::new(),
            image: Box::new(image),
        }
    }

    /// Registers `factory` for `data_type`, replacing any previous one.
    pub fn register(&mut self, data_type: DataType, factory: impl FieldFactory<W> + 'static) {
        if self.factories.insert(data_type.clone(), Box::new(factory)).is_some() {
            log::debug!("replaced factory for {}", data_type);
        }
    }

    pub fn with(mut self, data_type: DataType, factory: impl FieldFactory<W> + 'static) -> Self {
        self.register(data_type, factory);
        self
    }

    pub fn factory_for(&self, data_type: &DataType) -> Option<&dyn FieldFactory<W>> {
        self.factories.get(data_type).map(|f| f.as_ref())
    }

    pub fn image_factory(&self) -> &dyn ImageFactory<W> {
        self.image.as_ref()
    }
}
