use crate::latest::Latest;
use crate::model::{FieldRecord, PatternVersion, SemanticVersion};
use crate::view::ViewProperties;
use anyhow::Result;

/// Pairs each value of `version` with the pattern's definition for that slot, in pattern order.
pub fn field_records(version: &SemanticVersion, pattern: &PatternVersion) -> Vec<FieldRecord> {
    if version.fields.len() != pattern.field_definitions.len() {
        log::warn!(
            "semantic {} has {} fields but pattern {} defines {}",
            version.public_id,
            version.fields.len(),
            pattern.public_id,
            pattern.field_definitions.len()
        );
    }

    pattern
        .field_definitions
        .iter()
        .zip(version.fields.iter())
        .enumerate()
        .map(|(index, (definition, value))| FieldRecord {
            index,
            semantic: version.public_id,
            definition: definition.clone(),
            value: value.clone(),
        })
        .collect()
}

/// Resolves the pattern of the latest semantic version and feeds every field record to `consumer`.
///
/// An absent version or an absent pattern is not an error; the consumer is simply never called.
pub fn generate_semantic_ui_fields<F>(
    view: &ViewProperties,
    latest: &Latest<SemanticVersion>,
    mut consumer: F,
) -> Result<()>
where
    F: FnMut(&SemanticVersion, FieldRecord) -> Result<()>,
{
    let Some(semantic) = latest.get() else {
        return Ok(());
    };
    let pattern = view.calculator().latest_pattern(semantic.pattern);
    let Some(pattern_version) = pattern.get() else {
        log::debug!(
            "no latest pattern {} for semantic {}",
            semantic.pattern,
            semantic.public_id
        );
        return Ok(());
    };
    if !pattern.contradictions().is_empty() {
        log::warn!(
            "pattern {} has {} contradicting versions, rendering {}",
            semantic.pattern,
            pattern.contradictions().len(),
            pattern_version.meaning
        );
    }

    for record in field_records(semantic, pattern_version) {
        consumer(semantic, record)?;
    }
    Ok(())
}
