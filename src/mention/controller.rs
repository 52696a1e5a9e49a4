use crate::model::CandidateSource;

use super::filter::{Suggestion, suggestions_for};
use super::trigger::{Trigger, TriggerSymbol, find_trigger, floor_char_boundary};

/// The floating suggestion list. A controller owns at most one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub symbol: TriggerSymbol,
    /// Trigger offset the popup is positioned against
    pub anchor: usize,
    pub suggestions: Vec<Suggestion>,
    /// Selection cursor; `None` until the user navigates
    pub selected: Option<usize>,
}

impl Overlay {
    pub fn selected_suggestion(&self) -> Option<&Suggestion> {
        self.selected.and_then(|i| self.suggestions.get(i))
    }
}

/// Keys the controller may intercept before normal editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionKey {
    Up,
    Down,
    Enter,
}

/// Text and caret after a suggestion is committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub text: String,
    pub caret: usize,
}

/// What the caller should do with a key after the controller saw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not intercepted; apply the key's default behavior
    Ignored,
    /// Intercepted; suppress the default behavior
    Consumed,
    /// Intercepted and the text surface must be replaced
    Committed(Commit),
}

/// Mention/tag autocomplete state for a single text surface.
#[derive(Debug, Clone, Default)]
pub struct MentionController {
    trigger: Option<Trigger>,
    overlay: Option<Overlay>,
    /// Filter text the current overlay was built from
    filter: String,
}

impl MentionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) -> Option<Trigger> {
        self.trigger
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.overlay.is_some()
    }

    /// Re-evaluate after the text or caret changed.
    pub fn on_text_changed(&mut self, text: &str, caret: usize, source: &CandidateSource) {
        let caret = floor_char_boundary(text, caret);
        let fresh = find_trigger(text, caret);

        // A moved or deleted trigger closes the current popup before the new
        // trigger (if any) is evaluated on this same event.
        if let Some(current) = self.trigger
            && (fresh.map(|t| t.offset) != Some(current.offset) || !current.still_present(text))
        {
            tracing::debug!(offset = current.offset, "trigger closed");
            self.close();
        }

        let Some(trigger) = fresh else {
            self.close();
            return;
        };

        let filter = trigger.filter_text(text, caret);
        let suggestions = suggestions_for(source, trigger.symbol, &filter);

        // Only an event that left both the filter and the list untouched keeps
        // the highlight; any new input resets it.
        let kept = self
            .overlay
            .as_ref()
            .filter(|o| {
                o.anchor == trigger.offset
                    && o.symbol == trigger.symbol
                    && self.filter == filter
                    && o.suggestions == suggestions
            })
            .and_then(|o| o.selected);

        self.trigger = Some(trigger);
        self.render(suggestions, trigger.offset, trigger.symbol);
        if let Some(overlay) = &mut self.overlay {
            overlay.selected = kept;
        }
        self.filter = filter;
    }

    /// Replace the popup with `suggestions`, or remove it when there are none.
    /// The selection cursor starts out unset.
    pub fn render(&mut self, suggestions: Vec<Suggestion>, trigger_offset: usize, symbol: TriggerSymbol) {
        if suggestions.is_empty() {
            self.overlay = None;
            return;
        }
        self.overlay = Some(Overlay {
            symbol,
            anchor: trigger_offset,
            suggestions,
            selected: None,
        });
    }

    /// Handle a navigation or confirm key.
    pub fn on_key_down(&mut self, key: MentionKey, text: &str, caret: usize) -> KeyOutcome {
        let Some(overlay) = &mut self.overlay else {
            return KeyOutcome::Ignored;
        };
        let last = overlay.suggestions.len() - 1;
        match key {
            MentionKey::Down => {
                overlay.selected = Some(overlay.selected.map_or(0, |i| (i + 1).min(last)));
                KeyOutcome::Consumed
            }
            MentionKey::Up => {
                overlay.selected = Some(overlay.selected.map_or(0, |i| i.saturating_sub(1)));
                KeyOutcome::Consumed
            }
            MentionKey::Enter => {
                if self.trigger.is_none() {
                    return KeyOutcome::Ignored;
                }
                match self.commit_selection(text, caret) {
                    Some(commit) => KeyOutcome::Committed(commit),
                    None => KeyOutcome::Consumed,
                }
            }
        }
    }

    /// Replace `[symbol, caret)` with `symbol + candidate + " "`.
    ///
    /// Returns None (and leaves the text alone) when nothing is highlighted.
    /// A trigger whose symbol has since disappeared closes the popup instead.
    pub fn commit_selection(&mut self, text: &str, caret: usize) -> Option<Commit> {
        let trigger = self.trigger?;
        let suggestion = self.overlay.as_ref()?.selected_suggestion()?.clone();

        let caret = floor_char_boundary(text, caret);
        if !trigger.still_present(text) || caret < trigger.offset {
            tracing::debug!(offset = trigger.offset, "stale trigger at commit");
            self.close();
            return None;
        }

        let start = trigger.symbol_pos();
        let inserted = format!("{}{} ", trigger.symbol, suggestion.insert_text());
        let mut new_text = String::with_capacity(text.len() + inserted.len());
        new_text.push_str(&text[..start]);
        new_text.push_str(&inserted);
        new_text.push_str(&text[caret..]);

        tracing::debug!(inserted = %inserted, "committed suggestion");
        self.close();
        Some(Commit {
            text: new_text,
            caret: start + inserted.len(),
        })
    }

    /// Mouse click on a popup row: highlight it, then commit.
    pub fn click_row(&mut self, index: usize, text: &str, caret: usize) -> Option<Commit> {
        let overlay = self.overlay.as_mut()?;
        if index >= overlay.suggestions.len() {
            return None;
        }
        overlay.selected = Some(index);
        self.commit_selection(text, caret)
    }

    /// Hide the popup without touching the text. Typing re-shows it.
    pub fn dismiss(&mut self) {
        self.overlay = None;
    }

    fn close(&mut self) {
        self.overlay = None;
        self.trigger = None;
        self.filter.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Person;
    use pretty_assertions::assert_eq;

    fn source() -> CandidateSource {
        CandidateSource::new(
            vec![Person::new("alice"), Person::new("albert"), Person::new("bob")],
            vec!["food".into(), "foo".into(), "bar".into()],
        )
    }

    fn labels(ctl: &MentionController) -> Vec<String> {
        ctl.overlay()
            .map(|o| o.suggestions.iter().map(|s| s.label()).collect())
            .unwrap_or_default()
    }

    /// Type `text` one character at a time, firing a change event after each.
    fn type_text(ctl: &mut MentionController, text: &str, source: &CandidateSource) {
        let mut buf = String::new();
        for c in text.chars() {
            buf.push(c);
            ctl.on_text_changed(&buf, buf.len(), source);
        }
    }

    #[test]
    fn no_trigger_no_overlay() {
        let mut ctl = MentionController::new();
        ctl.on_text_changed("hello world", 11, &source());
        assert!(!ctl.is_visible());
        assert_eq!(ctl.trigger(), None);
    }

    #[test]
    fn hello_at_al_scenario() {
        let src = source();
        let mut ctl = MentionController::new();
        let text = "hello @al";
        type_text(&mut ctl, text, &src);
        assert_eq!(labels(&ctl), vec!["alice", "albert"]);
        assert_eq!(ctl.overlay().unwrap().selected, None);

        assert_eq!(ctl.on_key_down(MentionKey::Down, text, text.len()), KeyOutcome::Consumed);
        let outcome = ctl.on_key_down(MentionKey::Enter, text, text.len());
        assert_eq!(
            outcome,
            KeyOutcome::Committed(Commit {
                text: "hello @alice ".into(),
                caret: 13,
            })
        );
        assert!(!ctl.is_visible());
        assert_eq!(ctl.trigger(), None);
    }

    #[test]
    fn hash_wins_when_later() {
        let mut ctl = MentionController::new();
        ctl.on_text_changed("@bob #fo", 8, &source());
        assert_eq!(ctl.trigger().unwrap().symbol, TriggerSymbol::Hash);
        assert_eq!(labels(&ctl), vec!["food", "foo"]);
    }

    #[test]
    fn unresolved_fetch_shows_nothing() {
        let mut ctl = MentionController::new();
        ctl.on_text_changed("@a", 2, &CandidateSource::default());
        assert!(!ctl.is_visible());
        // Trigger is still tracked, so a later keystroke can show results
        assert!(ctl.trigger().is_some());
        ctl.on_text_changed("@a", 2, &source());
        assert_eq!(labels(&ctl), vec!["alice", "albert"]);
    }

    #[test]
    fn empty_filter_result_hides_overlay() {
        let mut ctl = MentionController::new();
        ctl.on_text_changed("@al", 3, &source());
        assert!(ctl.is_visible());
        ctl.on_text_changed("@alz", 4, &source());
        assert!(!ctl.is_visible());
    }

    #[test]
    fn arrows_clamp_to_range() {
        let text = "@al";
        let mut ctl = MentionController::new();
        ctl.on_text_changed(text, 3, &source());

        ctl.on_key_down(MentionKey::Up, text, 3);
        assert_eq!(ctl.overlay().unwrap().selected, Some(0));
        for _ in 0..5 {
            ctl.on_key_down(MentionKey::Down, text, 3);
        }
        assert_eq!(ctl.overlay().unwrap().selected, Some(1));
        for _ in 0..5 {
            ctl.on_key_down(MentionKey::Up, text, 3);
        }
        assert_eq!(ctl.overlay().unwrap().selected, Some(0));
    }

    #[test]
    fn rebuild_from_new_input_resets_selection() {
        let mut ctl = MentionController::new();
        ctl.on_text_changed("@", 1, &source());
        ctl.on_key_down(MentionKey::Down, "@", 1);
        ctl.on_key_down(MentionKey::Down, "@", 1);
        assert_eq!(ctl.overlay().unwrap().selected, Some(1));

        ctl.on_text_changed("@a", 2, &source());
        assert_eq!(labels(&ctl), vec!["alice", "albert"]);
        assert_eq!(ctl.overlay().unwrap().selected, None);
    }

    #[test]
    fn repeated_event_with_same_filter_keeps_selection() {
        let mut ctl = MentionController::new();
        ctl.on_text_changed("@al", 3, &source());
        ctl.on_key_down(MentionKey::Down, "@al", 3);
        ctl.on_text_changed("@al", 3, &source());
        assert_eq!(ctl.overlay().unwrap().selected, Some(0));
    }

    #[test]
    fn typing_over_unchanged_list_resets_selection() {
        let mut ctl = MentionController::new();
        ctl.on_text_changed("@a", 2, &source());
        ctl.on_key_down(MentionKey::Down, "@a", 2);
        ctl.on_key_down(MentionKey::Down, "@a", 2);
        assert_eq!(ctl.overlay().unwrap().selected, Some(1));

        // Same two matches, but the filter grew
        ctl.on_text_changed("@al", 3, &source());
        assert_eq!(labels(&ctl), vec!["alice", "albert"]);
        assert_eq!(ctl.overlay().unwrap().selected, None);
        assert_eq!(ctl.on_key_down(MentionKey::Enter, "@al", 3), KeyOutcome::Consumed);
    }

    #[test]
    fn render_always_starts_unselected() {
        let mut ctl = MentionController::new();
        ctl.on_text_changed("@al", 3, &source());
        ctl.on_key_down(MentionKey::Down, "@al", 3);
        let same = ctl.overlay().unwrap().suggestions.clone();
        ctl.render(same, 1, TriggerSymbol::At);
        assert_eq!(ctl.overlay().unwrap().selected, None);
    }

    #[test]
    fn enter_without_overlay_is_ignored() {
        let mut ctl = MentionController::new();
        ctl.on_text_changed("plain", 5, &source());
        assert_eq!(ctl.on_key_down(MentionKey::Enter, "plain", 5), KeyOutcome::Ignored);
        assert_eq!(ctl.on_key_down(MentionKey::Down, "plain", 5), KeyOutcome::Ignored);
    }

    #[test]
    fn enter_without_highlight_is_consumed_but_commits_nothing() {
        let mut ctl = MentionController::new();
        ctl.on_text_changed("@al", 3, &source());
        assert_eq!(ctl.on_key_down(MentionKey::Enter, "@al", 3), KeyOutcome::Consumed);
        assert!(ctl.is_visible());
    }

    #[test]
    fn commit_replaces_only_trigger_span() {
        let mut ctl = MentionController::new();
        let text = "hi #fo and more";
        ctl.on_text_changed(text, 6, &source());
        ctl.on_key_down(MentionKey::Down, text, 6);
        ctl.on_key_down(MentionKey::Down, text, 6);
        let commit = ctl.commit_selection(text, 6).unwrap();
        assert_eq!(commit.text, "hi #foo  and more");
        assert_eq!(commit.caret, 8);
    }

    #[test]
    fn deleting_trigger_closes_overlay() {
        let mut ctl = MentionController::new();
        ctl.on_text_changed("hi @al", 6, &source());
        assert!(ctl.is_visible());
        ctl.on_text_changed("hi al", 5, &source());
        assert!(!ctl.is_visible());
        assert_eq!(ctl.trigger(), None);
    }

    #[test]
    fn newer_trigger_replaces_old_one() {
        let mut ctl = MentionController::new();
        ctl.on_text_changed("@al", 3, &source());
        ctl.on_key_down(MentionKey::Down, "@al", 3);
        ctl.on_text_changed("@al #f", 6, &source());
        let overlay = ctl.overlay().unwrap();
        assert_eq!(overlay.symbol, TriggerSymbol::Hash);
        assert_eq!(overlay.anchor, 5);
        assert_eq!(overlay.selected, None);
    }

    #[test]
    fn caret_moved_before_trigger_uses_earlier_trigger() {
        let mut ctl = MentionController::new();
        let text = "@al #f";
        ctl.on_text_changed(text, 6, &source());
        ctl.on_text_changed(text, 3, &source());
        let trigger = ctl.trigger().unwrap();
        assert_eq!(trigger.symbol, TriggerSymbol::At);
        assert_eq!(trigger.offset, 1);
        assert_eq!(labels(&ctl), vec!["alice", "albert"]);
    }

    #[test]
    fn click_row_commits_that_row() {
        let mut ctl = MentionController::new();
        let text = "@al";
        ctl.on_text_changed(text, 3, &source());
        let commit = ctl.click_row(1, text, 3).unwrap();
        assert_eq!(commit.text, "@albert ");
        assert_eq!(commit.caret, 8);
        assert!(!ctl.is_visible());
    }

    #[test]
    fn click_outside_rows_does_nothing() {
        let mut ctl = MentionController::new();
        ctl.on_text_changed("@al", 3, &source());
        assert_eq!(ctl.click_row(5, "@al", 3), None);
        assert!(ctl.is_visible());
    }

    #[test]
    fn dismiss_hides_until_next_change() {
        let mut ctl = MentionController::new();
        ctl.on_text_changed("@a", 2, &source());
        ctl.dismiss();
        assert!(!ctl.is_visible());
        assert_eq!(ctl.on_key_down(MentionKey::Enter, "@a", 2), KeyOutcome::Ignored);
        ctl.on_text_changed("@al", 3, &source());
        assert!(ctl.is_visible());
    }

    #[test]
    fn caret_on_symbol_at_commit_closes_without_duplicating() {
        let mut ctl = MentionController::new();
        ctl.on_text_changed("hi @al", 6, &source());
        ctl.on_key_down(MentionKey::Down, "hi @al", 6);
        assert_eq!(ctl.commit_selection("hi @al", 3), None);
        assert!(!ctl.is_visible());
    }

    #[test]
    fn stale_trigger_at_commit_closes() {
        let mut ctl = MentionController::new();
        ctl.on_text_changed("@al", 3, &source());
        ctl.on_key_down(MentionKey::Down, "@al", 3);
        assert_eq!(ctl.commit_selection("al", 2), None);
        assert!(!ctl.is_visible());
    }
}
