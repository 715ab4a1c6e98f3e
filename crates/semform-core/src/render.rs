use crate::config::IMAGE_SEMANTIC_PUBLIC_ID;
use crate::factory::{EditAction, FactoryRegistry, Widget};
use crate::latest::Latest;
use crate::model::{DataType, SemanticVersion};
use crate::observable::{obtain_observable_field, ObservableField};
use crate::resolve::generate_semantic_ui_fields;
use crate::view::ViewProperties;
use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

/// Ordered, append-only target for rendered widgets.
pub trait FieldContainer<W> {
    fn add_widget(&mut self, widget: W);
    fn add_separator(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Editable,
    ReadOnly,
}

impl Mode {
    pub fn is_editable(self) -> bool {
        matches!(self, Mode::Editable)
    }
}

/// What the host receives when a read-only widget asks to be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRequest {
    pub semantic: Uuid,
    pub field_index: usize,
}

pub type EditHook = Arc<dyn Fn(EditRequest) + Send + Sync>;

/// State for a single render call. Never outlives it.
struct RenderPass {
    mode: Mode,
    image_inserted: bool,
    widgets: usize,
}

impl RenderPass {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            image_inserted: false,
            widgets: 0,
        }
    }

    fn append<W, C: FieldContainer<W>>(&mut self, container: &mut C, widget: W) {
        container.add_widget(widget);
        if self.mode.is_editable() {
            container.add_separator();
        }
        self.widgets += 1;
    }
}

/// Turns the fields of a semantic version into widgets, one factory lookup per field.
pub struct FieldRenderer<W> {
    registry: FactoryRegistry<W>,
    image_semantic: Uuid,
    on_edit: Option<EditHook>,
}

impl<W: Widget> FieldRenderer<W> {
    pub fn new(registry: FactoryRegistry<W>) -> Self {
        Self {
            registry,
            image_semantic: IMAGE_SEMANTIC_PUBLIC_ID,
            on_edit: None,
        }
    }

    pub fn with_image_semantic(mut self, semantic: Uuid) -> Self {
        self.image_semantic = semantic;
        self
    }

    pub fn with_edit_hook(mut self, hook: impl Fn(EditRequest) + Send + Sync + 'static) -> Self {
        self.on_edit = Some(Arc::new(hook));
        self
    }

    pub fn display_editable_semantic_fields<C: FieldContainer<W>>(
        &self,
        view: &ViewProperties,
        container: &mut C,
        latest: &Latest<SemanticVersion>,
    ) -> Result<Vec<ObservableField>> {
        self.render_fields(view, container, latest, Mode::Editable)
    }

    pub fn display_read_only_semantic_fields<C: FieldContainer<W>>(
        &self,
        view: &ViewProperties,
        container: &mut C,
        latest: &Latest<SemanticVersion>,
    ) -> Result<Vec<ObservableField>> {
        self.render_fields(view, container, latest, Mode::ReadOnly)
    }

    /// Renders every field of `latest` into `container` and returns one observable field per record.
    ///
    /// Records whose data type has no factory still yield an observable field but add nothing
    /// to the container. Factory errors are returned as-is.
    pub fn render_fields<C: FieldContainer<W>>(
        &self,
        view: &ViewProperties,
        container: &mut C,
        latest: &Latest<SemanticVersion>,
        mode: Mode,
    ) -> Result<Vec<ObservableField>> {
        let editable = mode.is_editable();
        let mut pass = RenderPass::new(mode);
        let mut observable_fields = Vec::new();

        generate_semantic_ui_fields(view, latest, |semantic, record| {
            let data_type = record.data_type().clone();
            let field = obtain_observable_field(view, latest, record, editable);
            observable_fields.push(field.clone());

            if semantic.public_id == self.image_semantic && !pass.image_inserted {
                let image = self.registry.image_factory().create(semantic, view, editable)?;
                pass.append(&mut *container, image);
                pass.image_inserted = true;
            }

            let Some(factory) = self.registry.factory_for(&data_type) else {
                log::trace!("no factory for {}, skipping field {}", data_type, field.index());
                return Ok(());
            };

            let mut widget = factory.create(&field, view, editable)?;
            if data_type == DataType::Integer && !editable {
                widget.set_on_edit_action(self.edit_action(field.semantic(), field.index()));
            }
            pass.append(&mut *container, widget);
            Ok(())
        })?;

        if let Some(semantic) = latest.get() {
            log::debug!(
                "rendered {} widgets for {} fields of semantic {} ({:?})",
                pass.widgets,
                observable_fields.len(),
                semantic.public_id,
                pass.mode
            );
        }
        Ok(observable_fields)
    }

    fn edit_action(&self, semantic: Uuid, field_index: usize) -> EditAction {
        let hook = self.on_edit.clone();
        Arc::new(move || {
            let request = EditRequest {
                semantic,
                field_index,
            };
            match &hook {
                Some(hook) => hook(request),
                None => log::debug!("edit requested for {:?} but no handler is wired", request),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{FieldFactory, ImageFactory};
    use crate::model::{FieldDefinition, FormPayload, PatternVersion};
    use crate::snapshot::ViewSnapshot;
    use crate::view::NodeView;
    use anyhow::bail;
    use parking_lot::Mutex;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    enum Child {
        Widget(String),
        Separator,
    }

    struct TestWidget {
        label: String,
        edit: Option<EditAction>,
    }

    impl Widget for TestWidget {
        fn set_on_edit_action(&mut self, action: EditAction) {
            self.edit = Some(action);
        }
    }

    #[derive(Default)]
    struct Recorder {
        children: Vec<Child>,
        edit_actions: Vec<EditAction>,
    }

    impl Recorder {
        fn widgets(&self) -> Vec<&str> {
            self.children
                .iter()
                .filter_map(|c| match c {
                    Child::Widget(label) => Some(label.as_str()),
                    Child::Separator => None,
                })
                .collect()
        }

        fn count(&self, label: &str) -> usize {
            self.widgets().iter().filter(|l| **l == label).count()
        }
    }

    impl FieldContainer<TestWidget> for Recorder {
        fn add_widget(&mut self, widget: TestWidget) {
            if let Some(action) = widget.edit {
                self.edit_actions.push(action);
            }
            self.children.push(Child::Widget(widget.label));
        }

        fn add_separator(&mut self) {
            self.children.push(Child::Separator);
        }
    }

    struct Labeled(String);

    impl FieldFactory<TestWidget> for Labeled {
        fn create(
            &self,
            _field: &ObservableField,
            _view: &ViewProperties,
            editable: bool,
        ) -> Result<TestWidget> {
            let mode = if editable { "rw" } else { "ro" };
            Ok(TestWidget {
                label: format!("{}:{}", self.0, mode),
                edit: None,
            })
        }
    }

    struct Failing;

    impl FieldFactory<TestWidget> for Failing {
        fn create(&self, _: &ObservableField, _: &ViewProperties, _: bool) -> Result<TestWidget> {
            bail!("boom")
        }
    }

    struct Image;

    impl ImageFactory<TestWidget> for Image {
        fn create(&self, _: &SemanticVersion, _: &ViewProperties, _: bool) -> Result<TestWidget> {
            Ok(TestWidget {
                label: "image".to_string(),
                edit: None,
            })
        }
    }

    fn registry() -> FactoryRegistry<TestWidget> {
        let mut registry = FactoryRegistry::new(Image);
        for dt in DataType::RECOGNIZED {
            let label = dt.id().trim_end_matches("_field").to_string();
            registry.register(dt, Labeled(label));
        }
        registry
    }

    fn fixture(semantic: Uuid, types: &[&str]) -> (ViewProperties, Latest<SemanticVersion>) {
        let _ = env_logger::builder().is_test(true).try_init();
        let pattern = PatternVersion {
            public_id: Uuid::from_u128(100),
            time: 1,
            meaning: "test pattern".to_string(),
            field_definitions: types
                .iter()
                .map(|t| FieldDefinition {
                    meaning: format!("{t} value"),
                    purpose: None,
                    data_type: DataType::from(*t),
                })
                .collect(),
        };
        let version = SemanticVersion {
            public_id: semantic,
            pattern: pattern.public_id,
            fields: types.iter().map(|t| json!(t)).collect(),
        };
        let payload = FormPayload {
            semantic: Some(version.clone()),
            patterns: vec![pattern],
            ..Default::default()
        };
        let view = ViewProperties::new(
            Arc::new(ViewSnapshot::from_payload(&payload)),
            NodeView::default(),
        );
        (view, Latest::present(version))
    }

    const PLAIN: Uuid = Uuid::from_u128(1);

    #[test]
    fn absent_record_is_noop() {
        let renderer = FieldRenderer::new(registry());
        let (view, _) = fixture(PLAIN, &["string_field"]);
        let mut container = Recorder::default();
        let fields = renderer
            .display_editable_semantic_fields(&view, &mut container, &Latest::absent())
            .unwrap();
        assert!(fields.is_empty());
        assert!(container.children.is_empty());
    }

    #[test]
    fn absent_pattern_is_noop() {
        let renderer = FieldRenderer::new(registry());
        let (_, latest) = fixture(PLAIN, &["string_field"]);
        let empty = ViewProperties::new(Arc::new(ViewSnapshot::default()), NodeView::default());
        let mut container = Recorder::default();
        let fields = renderer
            .display_read_only_semantic_fields(&empty, &mut container, &latest)
            .unwrap();
        assert!(fields.is_empty());
        assert!(container.children.is_empty());
    }

    #[test]
    fn editable_interleaves_separators() {
        let renderer = FieldRenderer::new(registry());
        let (view, latest) = fixture(PLAIN, &["string_field", "boolean_field", "float"]);
        let mut container = Recorder::default();
        let fields = renderer
            .display_editable_semantic_fields(&view, &mut container, &latest)
            .unwrap();

        assert_eq!(
            container.children,
            vec![
                Child::Widget("string:rw".to_string()),
                Child::Separator,
                Child::Widget("boolean:rw".to_string()),
                Child::Separator,
                Child::Widget("float:rw".to_string()),
                Child::Separator,
            ]
        );
        assert_eq!(fields.len(), 3);
        assert!(fields.iter().all(|f| f.is_writable()));
    }

    #[test]
    fn read_only_has_no_separators() {
        let renderer = FieldRenderer::new(registry());
        let types = [
            "component_field",
            "component_id_set_field",
            "component_id_list_field",
            "ditree_field",
        ];
        let (view, latest) = fixture(PLAIN, &types);
        let mut container = Recorder::default();
        let fields = renderer
            .display_read_only_semantic_fields(&view, &mut container, &latest)
            .unwrap();

        assert_eq!(
            container.widgets(),
            vec![
                "component:ro",
                "component_id_set:ro",
                "component_id_list:ro",
                "ditree:ro"
            ]
        );
        assert!(!container.children.contains(&Child::Separator));
        assert_eq!(fields.len(), 4);
        assert!(fields.iter().all(|f| !f.is_writable()));
    }

    #[test]
    fn unknown_types_yield_fields_but_no_widgets() {
        let renderer = FieldRenderer::new(registry());
        let (view, latest) = fixture(PLAIN, &["string", "integer_field", "made_up_field"]);
        let mut container = Recorder::default();
        let fields = renderer
            .display_read_only_semantic_fields(&view, &mut container, &latest)
            .unwrap();

        assert_eq!(container.children.len(), 2);
        assert_eq!(container.widgets(), vec!["string:ro", "integer:ro"]);
        assert_eq!(fields.len(), 3);
        assert_eq!(
            fields[2].data_type(),
            &DataType::Other("made_up_field".to_string())
        );
    }

    #[test]
    fn image_inserted_once_per_call() {
        let renderer = FieldRenderer::new(registry());
        let (view, latest) = fixture(
            IMAGE_SEMANTIC_PUBLIC_ID,
            &["string_field", "string_field", "boolean_field"],
        );

        for _ in 0..2 {
            let mut container = Recorder::default();
            let fields = renderer
                .display_editable_semantic_fields(&view, &mut container, &latest)
                .unwrap();
            assert_eq!(container.count("image"), 1);
            assert_eq!(container.children[0], Child::Widget("image".to_string()));
            assert_eq!(container.children[1], Child::Separator);
            assert_eq!(container.children[2], Child::Widget("string:rw".to_string()));
            assert_eq!(container.children.len(), 8);
            assert_eq!(fields.len(), 3);
        }
    }

    #[test]
    fn editable_then_read_only_each_insert_image() {
        let renderer = FieldRenderer::new(registry());
        let (view, latest) = fixture(IMAGE_SEMANTIC_PUBLIC_ID, &["string_field", "float_field"]);
        let mut container = Recorder::default();

        renderer
            .display_editable_semantic_fields(&view, &mut container, &latest)
            .unwrap();
        renderer
            .display_read_only_semantic_fields(&view, &mut container, &latest)
            .unwrap();

        assert_eq!(
            container.children,
            vec![
                Child::Widget("image".to_string()),
                Child::Separator,
                Child::Widget("string:rw".to_string()),
                Child::Separator,
                Child::Widget("float:rw".to_string()),
                Child::Separator,
                Child::Widget("image".to_string()),
                Child::Widget("string:ro".to_string()),
                Child::Widget("float:ro".to_string()),
            ]
        );
    }

    #[test]
    fn image_semantic_can_be_overridden() {
        let custom = Uuid::from_u128(42);
        let renderer = FieldRenderer::new(registry()).with_image_semantic(custom);
        let (view, latest) = fixture(custom, &["string_field"]);
        let mut container = Recorder::default();
        renderer
            .display_read_only_semantic_fields(&view, &mut container, &latest)
            .unwrap();
        assert_eq!(container.widgets(), vec!["image", "string:ro"]);
    }

    #[test]
    fn read_only_integer_exposes_edit_hook() {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let sink = requests.clone();
        let renderer =
            FieldRenderer::new(registry()).with_edit_hook(move |req| sink.lock().push(req));
        let (view, latest) = fixture(PLAIN, &["string_field", "integer_field"]);

        let mut container = Recorder::default();
        renderer
            .display_read_only_semantic_fields(&view, &mut container, &latest)
            .unwrap();
        assert_eq!(container.edit_actions.len(), 1);
        (container.edit_actions[0])();
        assert_eq!(
            *requests.lock(),
            vec![EditRequest {
                semantic: PLAIN,
                field_index: 1
            }]
        );

        let mut editable = Recorder::default();
        renderer
            .display_editable_semantic_fields(&view, &mut editable, &latest)
            .unwrap();
        assert!(editable.edit_actions.is_empty());
    }

    #[test]
    fn unwired_edit_hook_is_harmless() {
        let renderer = FieldRenderer::new(registry());
        let (view, latest) = fixture(PLAIN, &["integer_field"]);
        let mut container = Recorder::default();
        renderer
            .display_read_only_semantic_fields(&view, &mut container, &latest)
            .unwrap();
        (container.edit_actions[0])();
    }

    #[test]
    fn factory_errors_propagate() {
        let registry = registry().with(DataType::Boolean, Failing);
        let renderer = FieldRenderer::new(registry);
        let (view, latest) = fixture(PLAIN, &["string_field", "boolean_field", "float_field"]);
        let mut container = Recorder::default();
        let err = renderer
            .display_editable_semantic_fields(&view, &mut container, &latest)
            .unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(container.widgets(), vec!["string:rw"]);
    }

    #[test]
    fn extra_data_types_can_be_registered() {
        let image_field = DataType::from("image_field");
        let registry = registry().with(image_field.clone(), Labeled("picture".to_string()));
        assert!(registry.factory_for(&image_field).is_some());
        let renderer = FieldRenderer::new(registry);
        let (view, latest) = fixture(PLAIN, &["image_field"]);
        let mut container = Recorder::default();
        renderer
            .display_read_only_semantic_fields(&view, &mut container, &latest)
            .unwrap();
        assert_eq!(container.widgets(), vec!["picture:ro"]);
    }
}
