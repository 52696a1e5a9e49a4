use serde::Serialize;

use crate::mention::{Suggestion, Trigger};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct SuggestJson {
    /// Active trigger, or null when the caret is not inside one
    pub trigger: Option<Trigger>,
    pub filter: String,
    pub suggestions: Vec<Suggestion>,
}

