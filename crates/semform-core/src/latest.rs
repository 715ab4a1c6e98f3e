/// The newest version of something at a view coordinate, if there is one.
///
/// Absence is a normal state: nothing has been written at that coordinate.
/// When several versions share the newest stamp time, one is picked and the
/// others are kept as `contradictions`.
#[derive(Debug, Clone, PartialEq)]
pub struct Latest<T> {
    value: Option<T>,
    contradictions: Vec<T>,
}

impl<T> Latest<T> {
    pub fn present(value: T) -> Self {
        Self {
            value: Some(value),
            contradictions: Vec::new(),
        }
    }

    pub fn absent() -> Self {
        Self {
            value: None,
            contradictions: Vec::new(),
        }
    }

    pub fn with_contradictions(mut self, contradictions: Vec<T>) -> Self {
        self.contradictions = contradictions;
        self
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn contradictions(&self) -> &[T] {
        &self.contradictions
    }
}

impl<T> From<Option<T>> for Latest<T> {
    fn from(value: Option<T>) -> Self {
        Self {
            value,
            contradictions: Vec::new(),
        }
    }
}
