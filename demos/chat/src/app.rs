use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use ratatui::widgets::ListState;
use threadline::{Action, AppState, Store, Subscription, selectors};
use tracing::{debug, info};

pub struct App {
    store: Store,
    subscription: Option<Subscription>,

    // Set by the store subscription, cleared when a frame is drawn
    dirty: Arc<AtomicBool>,

    // View-local state
    pub input: String,
    pub list_state: ListState,

    pub should_quit: bool,
}

impl App {
    pub fn new(store: Store) -> Self {
        // Draw the first frame without waiting for a dispatch
        let dirty = Arc::new(AtomicBool::new(true));
        let flag = dirty.clone();
        let subscription = store.subscribe(move || flag.store(true, Ordering::Release));

        Self {
            store,
            subscription: Some(subscription),
            dirty,
            input: String::new(),
            list_state: ListState::default(),
            should_quit: false,
        }
    }

    pub fn state(&self) -> Arc<AppState> {
        self.store.state()
    }

    /// Returns true once per change, then resets.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    /// Requests a redraw for changes that never reach the store.
    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    pub fn next_thread(&mut self) {
        self.switch_thread(1);
    }

    pub fn previous_thread(&mut self) {
        self.switch_thread(-1);
    }

    fn switch_thread(&mut self, step: isize) {
        let state = self.state();
        if let Some(id) = selectors::neighbor_thread(&state, step) {
            debug!(thread = %id, "Switching thread");
            self.list_state.select(None);
            self.store.dispatch(Action::open_thread(id.clone()));
        }
    }

    /// Number of messages in the active thread.
    fn message_count(&self) -> usize {
        selectors::active_thread(&self.state()).map_or(0, |t| t.messages.len())
    }

    pub fn select_up(&mut self) {
        if self.message_count() == 0 {
            return;
        }
        let index = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => self.message_count() - 1,
        };
        self.list_state.select(Some(index));
        self.mark_dirty();
    }

    pub fn select_down(&mut self) {
        let count = self.message_count();
        if count == 0 {
            return;
        }
        let index = match self.list_state.selected() {
            Some(i) if i + 1 < count => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(index));
        self.mark_dirty();
    }

    pub fn delete_selected(&mut self) {
        let state = self.state();
        let Some(thread) = selectors::active_thread(&state) else {
            return;
        };
        let Some(message) = self
            .list_state
            .selected()
            .and_then(|i| thread.messages.get(i))
        else {
            return;
        };

        self.store.dispatch(Action::delete_message(message.id.clone()));
        self.clamp_selection();
    }

    /// Keeps the selection inside the active thread as it is now.
    fn clamp_selection(&mut self) {
        let count = self.message_count();
        let selected = self
            .list_state
            .selected()
            .filter(|_| count > 0)
            .map(|i| i.min(count - 1));
        self.list_state.select(selected);
    }

    /// Sends the input to the active thread and clears it.
    ///
    /// Text that is empty after trimming is ignored and kept in the field.
    pub fn submit_input(&mut self) {
        let text = self.input.trim();
        if text.is_empty() {
            return;
        }
        let thread_id = self.state().active_thread_id.clone();
        self.store.dispatch(Action::add_message(thread_id, text));
        self.input.clear();
        self.list_state.select(None);
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.mark_dirty();
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
        self.mark_dirty();
    }

    pub fn quit(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        info!("Leaving chat");
        self.should_quit = true;
    }
}
