use serde::Serialize;

use crate::model::{CandidateSource, Person};

use super::trigger::TriggerSymbol;

/// One row of the suggestion popup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Suggestion {
    Person(Person),
    Tag { tag: String },
}

impl Suggestion {
    /// Row text: `display_name (handle)` for people, the raw tag for tags
    pub fn label(&self) -> String {
        match self {
            Suggestion::Person(p) => match &p.display_name {
                Some(name) => format!("{} ({})", name, p.handle),
                None => p.handle.clone(),
            },
            Suggestion::Tag { tag } => tag.clone(),
        }
    }

    /// Text inserted after the trigger symbol on commit
    pub fn insert_text(&self) -> &str {
        match self {
            Suggestion::Person(p) => &p.handle,
            Suggestion::Tag { tag } => tag,
        }
    }
}

/// People whose handle or display name starts with `filter`, case-insensitively,
/// in source order.
pub fn filter_people(people: &[Person], filter: &str) -> Vec<Suggestion> {
    let filter = filter.to_lowercase();
    people
        .iter()
        .filter(|p| {
            p.handle.to_lowercase().starts_with(&filter)
                || p
                    .display_name
                    .as_ref()
                    .is_some_and(|n| n.to_lowercase().starts_with(&filter))
        })
        .cloned()
        .map(Suggestion::Person)
        .collect()
}

/// Tags starting with `filter`, case-insensitively, in source order.
pub fn filter_tags(tags: &[String], filter: &str) -> Vec<Suggestion> {
    let filter = filter.to_lowercase();
    tags.iter()
        .filter(|t| t.to_lowercase().starts_with(&filter))
        .map(|t| Suggestion::Tag { tag: t.clone() })
        .collect()
}

/// Filter the list that belongs to `symbol`
pub fn suggestions_for(
    source: &CandidateSource,
    symbol: TriggerSymbol,
    filter: &str,
) -> Vec<Suggestion> {
    match symbol {
        TriggerSymbol::At => filter_people(&source.people, filter),
        TriggerSymbol::Hash => filter_tags(&source.tags, filter),
    }
}
