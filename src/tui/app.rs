use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::io::fetch::{CandidateFetcher, FetchEvent, apply_event};
use crate::mention::{Commit, MentionController};
use crate::model::{CandidateSource, Config, UiConfig};

use super::editor::Editor;
use super::input;
use super::render;
use super::theme::Theme;

/// Where the popup rows were drawn on the last frame (for mouse hit-testing)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupHit {
    /// Screen area covering only the suggestion rows (inside the border)
    pub rows: Rect,
    /// Suggestion index of the first visible row
    pub first_index: usize,
}

/// Main application state
pub struct App {
    pub editor: Editor,
    pub mention: MentionController,
    /// Candidate lists; filled in whenever the fetch resolves
    pub candidates: CandidateSource,
    pub theme: Theme,
    pub max_visible: usize,
    pub show_key_hints: bool,
    pub should_quit: bool,
    /// Set when the user submits; returned from `run`
    pub submitted: Option<String>,
    /// First visible editor row
    pub scroll_offset: usize,
    /// Editor text width from the last frame
    pub wrap_width: usize,
    pub popup_hit: Option<PopupHit>,
}

impl App {
    pub fn new(text: &str, ui: &UiConfig) -> Self {
        App {
            editor: Editor::new(text),
            mention: MentionController::new(),
            candidates: CandidateSource::default(),
            theme: Theme::from_config(ui),
            max_visible: ui.max_visible.max(1),
            show_key_hints: ui.show_key_hints,
            should_quit: false,
            submitted: None,
            scroll_offset: 0,
            wrap_width: 80,
            popup_hit: None,
        }
    }

    /// Notify the mention controller that the text or caret moved
    pub fn text_changed(&mut self) {
        self.mention
            .on_text_changed(&self.editor.buffer, self.editor.cursor, &self.candidates);
    }

    /// Install the text produced by a committed suggestion
    pub fn apply_commit(&mut self, commit: Commit) {
        self.editor.replace(commit.text, commit.caret);
    }

    /// Fold fetch results into the cache. Does not re-filter; the next edit does.
    pub fn apply_fetch_events(&mut self, events: Vec<FetchEvent>) {
        for event in events {
            apply_event(&mut self.candidates, event);
        }
    }

    pub fn submit(&mut self) {
        self.submitted = Some(self.editor.buffer.clone());
        self.should_quit = true;
    }

    /// First suggestion index in the popup's scroll window
    pub fn popup_scroll_start(&self) -> usize {
        match self.mention.overlay().and_then(|o| o.selected) {
            Some(sel) if sel >= self.max_visible => sel - self.max_visible + 1,
            _ => 0,
        }
    }
}

/// What to launch the composer with
pub struct RunOptions {
    pub text: String,
    pub config: Config,
    /// Offline candidates; when None they are fetched from the server
    pub candidates: Option<CandidateSource>,
}

/// Run the TUI application. Returns the submitted text, or None on quit.
pub fn run(opts: RunOptions) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let mut app = App::new(&opts.text, &opts.config.ui);
    app.text_changed();

    let fetcher = match opts.candidates {
        Some(source) => CandidateFetcher::from_source(source),
        None => CandidateFetcher::start(&opts.config.server),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste, EnableMouseCapture)?;
    let kitty = opts.config.ui.kitty_keyboard.unwrap_or(true)
        && supports_keyboard_enhancement().unwrap_or(false);
    if kitty {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if kitty {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &fetcher);

    // Restore terminal
    if kitty {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result?;
    Ok(app.submitted)
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    fetcher: &CandidateFetcher,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.apply_fetch_events(fetcher.poll());

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Paste(text) => input::handle_paste(app, &text),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
