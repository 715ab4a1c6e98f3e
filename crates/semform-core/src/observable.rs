use crate::latest::Latest;
use crate::model::{DataType, FieldRecord, SemanticVersion};
use crate::view::ViewProperties;
use anyhow::{bail, Result};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

type Listener = Arc<dyn Fn(&Value) + Send + Sync>;

struct Inner {
    record: FieldRecord,
    writable: bool,
    value: RwLock<Value>,
    listeners: RwLock<Vec<Listener>>,
}

/// A bindable view over one field record's value.
///
/// Clones share the same cell. Only writable fields accept `set_value`.
#[derive(Clone)]
pub struct ObservableField {
    inner: Arc<Inner>,
}

impl ObservableField {
    pub fn new(record: FieldRecord, writable: bool) -> Self {
        let value = RwLock::new(record.value.clone());
        Self {
            inner: Arc::new(Inner {
                record,
                writable,
                value,
                listeners: RwLock::new(Vec::new()),
            }),
        }
    }

    pub fn data_type(&self) -> &DataType {
        self.inner.record.data_type()
    }

    pub fn meaning(&self) -> &str {
        &self.inner.record.definition.meaning
    }

    pub fn index(&self) -> usize {
        self.inner.record.index
    }

    pub fn semantic(&self) -> Uuid {
        self.inner.record.semantic
    }

    pub fn is_writable(&self) -> bool {
        self.inner.writable
    }

    pub fn value(&self) -> Value {
        self.inner.value.read().clone()
    }

    pub fn set_value(&self, value: Value) -> Result<()> {
        if !self.inner.writable {
            bail!(
                "field {} ({}) of semantic {} is read-only",
                self.index(),
                self.meaning(),
                self.semantic()
            );
        }
        {
            let mut current = self.inner.value.write();
            // Keeps the stored representation, e.g. `3` stays `3` when the input yields `3.0`.
            if same_value(&current, &value) {
                return Ok(());
            }
            *current = value.clone();
        }

        // Listeners run without holding the value lock.
        let listeners = self.inner.listeners.read().clone();
        for listener in listeners {
            listener(&value);
        }
        Ok(())
    }

    pub fn subscribe(&self, listener: impl Fn(&Value) + Send + Sync + 'static) {
        self.inner.listeners.write().push(Arc::new(listener));
    }

    pub fn is_dirty(&self) -> bool {
        !same_value(&self.inner.value.read(), &self.inner.record.value)
    }

    pub fn reset(&self) -> Result<()> {
        self.set_value(self.inner.record.value.clone())
    }
}

impl std::fmt::Debug for ObservableField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableField")
            .field("index", &self.index())
            .field("data_type", self.data_type())
            .field("writable", &self.inner.writable)
            .field("value", &*self.inner.value.read())
            .finish()
    }
}

/// JSON equality, except numbers compare by numeric value.
pub fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Copies the current values of `fields` into `semantic`. Returns whether anything changed.
pub fn write_back(semantic: &mut SemanticVersion, fields: &[ObservableField]) -> bool {
    let mut changed = false;
    for field in fields.iter().filter(|f| f.semantic() == semantic.public_id) {
        let Some(slot) = semantic.fields.get_mut(field.index()) else {
            log::warn!(
                "semantic {} has no field {} to write back",
                semantic.public_id,
                field.index()
            );
            continue;
        };
        let value = field.value();
        if !same_value(slot, &value) {
            *slot = value;
            changed = true;
        }
    }
    changed
}

/// Wraps a raw field record for binding, tagged editable or read-only.
pub fn obtain_observable_field(
    _view: &ViewProperties,
    latest: &Latest<SemanticVersion>,
    record: FieldRecord,
    writable: bool,
) -> ObservableField {
    if let Some(semantic) = latest.get() {
        debug_assert_eq!(semantic.public_id, record.semantic);
    }
    ObservableField::new(record, writable)
}
