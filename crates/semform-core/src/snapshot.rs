use crate::latest::Latest;
use crate::model::{FormPayload, PatternVersion};
use crate::view::ViewCalculator;
use std::collections::HashMap;
use uuid::Uuid;

/// A `ViewCalculator` over the versions a host shipped with a form payload.
#[derive(Debug, Clone, Default)]
pub struct ViewSnapshot {
    patterns: HashMap<Uuid, Vec<PatternVersion>>,
    descriptions: HashMap<Uuid, String>,
}

impl ViewSnapshot {
    pub fn from_payload(payload: &FormPayload) -> Self {
        let mut patterns: HashMap<Uuid, Vec<PatternVersion>> = HashMap::new();
        for p in &payload.patterns {
            patterns.entry(p.public_id).or_default().push(p.clone());
        }
        Self {
            patterns,
            descriptions: payload.descriptions.clone(),
        }
    }
}

impl ViewCalculator for ViewSnapshot {
    fn latest_pattern(&self, pattern: Uuid) -> Latest<PatternVersion> {
        let Some(versions) = self.patterns.get(&pattern) else {
            return Latest::absent();
        };
        let Some(newest) = versions.iter().map(|v| v.time).max() else {
            return Latest::absent();
        };

        let mut tied = versions.iter().filter(|v| v.time == newest).cloned();
        let Some(first) = tied.next() else {
            return Latest::absent();
        };
        let contradictions: Vec<_> = tied.collect();
        if !contradictions.is_empty() {
            log::warn!(
                "pattern {} has {} contradicting versions at time {}",
                pattern,
                contradictions.len(),
                newest
            );
        }
        Latest::present(first).with_contradictions(contradictions)
    }

    fn description_text(&self, component: Uuid) -> Option<String> {
        self.descriptions.get(&component).cloned()
    }
}
