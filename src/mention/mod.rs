//! `@`-mention and `#`-tag autocomplete.
//!
//! The controller is pure state: it is fed the text and caret after every
//! change and hands back a replacement text when a suggestion is committed.
//! Drawing the popup is left to the caller.

pub mod controller;
pub mod filter;
pub mod trigger;

pub use controller::{Commit, KeyOutcome, MentionController, MentionKey, Overlay};
pub use filter::{Suggestion, filter_people, filter_tags, suggestions_for};
pub use trigger::{Trigger, TriggerSymbol, find_trigger};
