use serde::{Deserialize, Serialize};

/// A mentionable person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// The handle inserted after `@` on commit
    pub handle: String,
    /// Optional human-readable name, also matched when filtering
    pub display_name: Option<String>,
}

impl Person {
    pub fn new(handle: impl Into<String>) -> Self {
        Person {
            handle: handle.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(handle: impl Into<String>, display_name: impl Into<String>) -> Self {
        Person {
            handle: handle.into(),
            display_name: Some(display_name.into()),
        }
    }
}

/// Cached, read-only candidate lists for one process lifetime.
///
/// Each list starts empty and is filled at most once, whenever its fetch
/// resolves. Filtering an empty list is valid and yields nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSource {
    pub people: Vec<Person>,
    pub tags: Vec<String>,
}

impl CandidateSource {
    pub fn new(people: Vec<Person>, tags: Vec<String>) -> Self {
        CandidateSource { people, tags }
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.tags.is_empty()
    }
}

/// One entry of `usernames_with_display_names`
#[derive(Debug, Clone, Deserialize)]
pub struct PersonRecord {
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Body of the followed-usernames endpoint.
///
/// Current servers send `usernames_with_display_names`; older ones send a
/// bare `usernames` list. Both are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeoplePayload {
    #[serde(default)]
    pub usernames_with_display_names: Option<Vec<PersonRecord>>,
    #[serde(default)]
    pub usernames: Option<Vec<String>>,
}

impl PeoplePayload {
    pub fn into_people(self) -> Vec<Person> {
        if let Some(records) = self.usernames_with_display_names {
            return records
                .into_iter()
                .map(|r| Person {
                    handle: r.username,
                    display_name: r.display_name.filter(|n| !n.is_empty()),
                })
                .collect();
        }
        self.usernames
            .unwrap_or_default()
            .into_iter()
            .map(Person::new)
            .collect()
    }
}

/// Body of the user-tags endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagsPayload {
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Offline candidates file: both endpoint bodies merged into one object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidatesFile {
    #[serde(flatten)]
    pub people: PeoplePayload,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CandidatesFile {
    pub fn into_source(self) -> CandidateSource {
        CandidateSource::new(self.people.into_people(), self.tags)
    }
}
