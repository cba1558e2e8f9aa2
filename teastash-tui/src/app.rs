//! Application state for the TUI.
//!
//! The app owns a [`SyncController`] clone and translates key events into
//! its four dispatch points. Each dispatched operation is spawned as a
//! local task so the render loop never waits on the network; the local
//! half of every operation has already landed by the time the task first
//! suspends.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::TableState;
use teastash_core::{DraftField, RemoteStore, SyncController, TeaRecord};

/// Which part of the screen has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Moving through the tea list
    #[default]
    Browse,
    /// Editing the add form
    Edit,
}

/// Main application state.
pub struct App<R> {
    /// Sync controller (shared with spawned operation tasks)
    controller: SyncController<R>,
    /// Current focus mode
    pub mode: Mode,
    /// Which draft field the form cursor is in
    pub focus: DraftField,
    /// Table selection state
    pub table_state: TableState,
    /// Whether the app should exit
    pub should_quit: bool,
}

impl<R: RemoteStore + 'static> App<R> {
    /// Create a new App around the given controller.
    pub fn new(controller: SyncController<R>) -> Self {
        Self {
            controller,
            mode: Mode::default(),
            focus: DraftField::Name,
            table_state: TableState::default(),
            should_quit: false,
        }
    }

    /// Snapshot of the teas for rendering.
    pub fn teas(&self) -> Vec<TeaRecord> {
        self.controller.snapshot()
    }

    /// Current draft values for rendering the form.
    pub fn draft(&self) -> teastash_core::TeaDraft {
        self.controller.draft()
    }

    /// Keep the selection inside the (possibly shrunken) list.
    pub fn clamp_selection(&mut self) {
        let len = self.controller.len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            match self.table_state.selected() {
                Some(i) if i < len => {}
                _ => self.table_state.select(Some(len.saturating_sub(1))),
            }
        }
    }

    /// Handle a key event according to the current mode.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Edit => self.handle_edit_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('a') => {
                self.mode = Mode::Edit;
                self.focus = DraftField::Name;
            }
            KeyCode::Char('r') => self.dispatch_refresh(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char('d') | KeyCode::Enter => {
                if let Some(index) = self.table_state.selected() {
                    self.dispatch_drink(index);
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(index) = self.table_state.selected() {
                    self.dispatch_remove(index);
                }
            }
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Browse,
            KeyCode::Tab => {
                self.focus = match self.focus {
                    DraftField::Name => DraftField::Bags,
                    DraftField::Bags => DraftField::Name,
                };
            }
            KeyCode::Enter => {
                self.dispatch_add();
                self.mode = Mode::Browse;
            }
            KeyCode::Backspace => {
                let mut value = self.focused_value();
                value.pop();
                self.controller.set_input(self.focus, value);
            }
            KeyCode::Char(c) => {
                // The bag count field only accepts digits
                if self.focus == DraftField::Bags && !c.is_ascii_digit() {
                    return;
                }
                let mut value = self.focused_value();
                value.push(c);
                self.controller.set_input(self.focus, value);
            }
            _ => {}
        }
    }

    fn focused_value(&self) -> String {
        let draft = self.controller.draft();
        match self.focus {
            DraftField::Name => draft.name,
            DraftField::Bags => draft.bags,
        }
    }

    fn select_previous(&mut self) {
        if self.controller.is_empty() {
            return;
        }
        let i = self.table_state.selected().unwrap_or(0);
        self.table_state.select(Some(i.saturating_sub(1)));
    }

    fn select_next(&mut self) {
        let len = self.controller.len();
        if len == 0 {
            return;
        }
        let i = self.table_state.selected().map(|i| i + 1).unwrap_or(0);
        self.table_state.select(Some(i.min(len - 1)));
    }

    /// Spawn a full refresh from the remote store.
    pub fn dispatch_refresh(&self) {
        let controller = self.controller.clone();
        tokio::task::spawn_local(async move { controller.refresh().await });
    }

    fn dispatch_add(&self) {
        let controller = self.controller.clone();
        tokio::task::spawn_local(async move { controller.add().await });
    }

    fn dispatch_drink(&self, index: usize) {
        let controller = self.controller.clone();
        tokio::task::spawn_local(async move { controller.drink(index).await });
    }

    fn dispatch_remove(&self, index: usize) {
        let controller = self.controller.clone();
        tokio::task::spawn_local(async move { controller.remove(index).await });
    }
}
