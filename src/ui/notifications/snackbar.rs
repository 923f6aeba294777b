// SPDX-License-Identifier: MPL-2.0
//! Snackbar presenter.
//!
//! `Snackbar` holds the content of one snackbar and walks its view through
//! the show and hide transitions requested by the [`SnackbarManager`].
//! Rendering is left to the embedding UI, which reads [`Snackbar::view_state`]
//! and the content getters.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::manager::SnackbarManager;
use super::Callback;
use crate::config::{ACTION_PRESS_DELAY_MS, DEFAULT_ANIMATION_DURATION_MS};
use crate::domain::snackbar::{DismissEvent, SnackbarDuration};
use crate::error::Result;
use crate::ui::color::validate_color;

/// Visibility of a snackbar's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Hidden,
    /// Show transition running.
    Showing,
    Shown,
    /// Hide transition running.
    Hiding,
}

type ActionListener = Arc<dyn Fn() + Send + Sync>;

struct Action {
    text: String,
    color: Option<String>,
    listener: ActionListener,
}

struct Content {
    text: String,
    text_color: Option<String>,
    action: Option<Action>,
    duration: SnackbarDuration,
    callback: Option<Arc<dyn Callback>>,
    animation: Duration,
    view: ViewState,
    /// Running show or hide transition.
    transition: Option<JoinHandle<()>>,
    /// Bumped on every transition so a stale one never completes.
    generation: u64,
}

struct Presenter {
    manager: SnackbarManager,
    /// Identity registered with the manager.
    handle: Arc<dyn Callback>,
    content: Mutex<Content>,
}

/// Forwards manager notifications to the presenter.
struct ManagerCallback {
    presenter: Weak<Presenter>,
}

impl Callback for ManagerCallback {
    fn on_shown(&self) {
        if let Some(presenter) = self.presenter.upgrade() {
            presenter.show_view();
        }
    }

    fn on_dismissed(&self, event: DismissEvent) {
        if let Some(presenter) = self.presenter.upgrade() {
            presenter.hide_view(event);
        }
    }
}

impl Presenter {
    fn content(&self) -> MutexGuard<'_, Content> {
        self.content.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cancels the running transition and enters `view`.
    ///
    /// Returns the new transition number and its length.
    fn begin_transition(&self, view: ViewState) -> (u64, Duration) {
        let mut content = self.content();
        if let Some(task) = content.transition.take() {
            task.abort();
        }
        content.generation = content.generation.wrapping_add(1);
        content.view = view;
        (content.generation, content.animation)
    }

    fn track_transition(&self, generation: u64, task: Option<JoinHandle<()>>) {
        let mut content = self.content();
        if content.generation == generation {
            content.transition = task;
        }
    }

    fn show_view(self: Arc<Self>) {
        let (generation, animation) = self.begin_transition(ViewState::Showing);
        let presenter = Arc::clone(&self);
        let task = after(
            animation,
            async move { presenter.on_view_shown(generation) },
            || self.on_view_shown(generation),
        );
        self.track_transition(generation, task);
    }

    fn hide_view(self: Arc<Self>, event: DismissEvent) {
        let (generation, animation) = self.begin_transition(ViewState::Hiding);
        let presenter = Arc::clone(&self);
        let task = after(
            animation,
            async move { presenter.on_view_hidden(generation, event) },
            || self.on_view_hidden(generation, event),
        );
        self.track_transition(generation, task);
    }

    /// Ends a transition, unless a newer one replaced it.
    fn finish_transition(&self, generation: u64, from: ViewState, to: ViewState) -> bool {
        let mut content = self.content();
        if content.generation != generation || content.view != from {
            return false;
        }
        content.transition = None;
        content.view = to;
        true
    }

    fn on_view_shown(&self, generation: u64) {
        if !self.finish_transition(generation, ViewState::Showing, ViewState::Shown) {
            return;
        }
        self.manager.on_shown(&self.handle);
        let callback = self.content().callback.clone();
        if let Some(callback) = callback {
            callback.on_shown();
        }
    }

    fn on_view_hidden(&self, generation: u64, event: DismissEvent) {
        if !self.finish_transition(generation, ViewState::Hiding, ViewState::Hidden) {
            return;
        }
        self.manager.on_dismissed(&self.handle);
        let callback = self.content().callback.clone();
        if let Some(callback) = callback {
            callback.on_dismissed(event);
        }
    }
}

/// Runs `delayed` after `delay` on the current runtime, or `immediate` right
/// away when there is no delay or no runtime.
///
/// Returns the spawned task, if any.
fn after<F, I>(delay: Duration, delayed: F, immediate: I) -> Option<JoinHandle<()>>
where
    F: Future<Output = ()> + Send + 'static,
    I: FnOnce(),
{
    match Handle::try_current() {
        Ok(runtime) if !delay.is_zero() => Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            delayed.await;
        })),
        _ => {
            immediate();
            None
        }
    }
}

/// A snackbar: a message, an optional action button and a display duration.
///
/// Clones refer to the same snackbar.
#[derive(Clone)]
pub struct Snackbar {
    presenter: Arc<Presenter>,
}

impl std::fmt::Debug for Snackbar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let content = self.presenter.content();
        f.debug_struct("Snackbar")
            .field("text", &content.text)
            .field("duration", &content.duration)
            .field("view", &content.view)
            .finish_non_exhaustive()
    }
}

impl Snackbar {
    /// Creates a snackbar queued on the process-wide manager.
    #[must_use]
    pub fn make(text: impl Into<String>, duration: SnackbarDuration) -> Self {
        Self::with_manager(SnackbarManager::global(), text, duration)
    }

    /// Creates a snackbar queued on `manager`.
    #[must_use]
    pub fn with_manager(
        manager: SnackbarManager,
        text: impl Into<String>,
        duration: SnackbarDuration,
    ) -> Self {
        let presenter = Arc::new_cyclic(|presenter: &Weak<Presenter>| Presenter {
            manager,
            handle: Arc::new(ManagerCallback {
                presenter: presenter.clone(),
            }),
            content: Mutex::new(Content {
                text: String::new(),
                text_color: None,
                action: None,
                duration,
                callback: None,
                animation: Duration::from_millis(DEFAULT_ANIMATION_DURATION_MS),
                view: ViewState::Hidden,
                transition: None,
                generation: 0,
            }),
        });
        Self { presenter }.set_text(text)
    }

    /// Sets the message. An empty message is ignored.
    #[must_use]
    pub fn set_text(self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.presenter.content().text = text;
        }
        self
    }

    /// Sets the message color. An empty color is ignored.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `color` is not an RGB, RGBA, HSL,
    /// HSLA or `#rrggbb` color.
    pub fn set_text_color(self, color: &str) -> Result<Self> {
        if !color.is_empty() {
            validate_color(color)?;
            self.presenter.content().text_color = Some(color.to_string());
        }
        Ok(self)
    }

    /// Adds an action button. Pressing it dismisses the snackbar and then
    /// calls `listener`. An empty text is ignored.
    #[must_use]
    pub fn set_action<F>(self, text: impl Into<String>, listener: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let text = text.into();
        if !text.is_empty() {
            let mut content = self.presenter.content();
            let color = content.action.take().and_then(|action| action.color);
            content.action = Some(Action {
                text,
                color,
                listener: Arc::new(listener),
            });
        }
        self
    }

    /// Sets the action button color. An empty color is ignored.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `color` is not a supported color.
    pub fn set_action_text_color(self, color: &str) -> Result<Self> {
        if !color.is_empty() {
            validate_color(color)?;
            if let Some(action) = self.presenter.content().action.as_mut() {
                action.color = Some(color.to_string());
            }
        }
        Ok(self)
    }

    /// Sets how long the snackbar stays visible.
    #[must_use]
    pub fn set_duration(self, duration: SnackbarDuration) -> Self {
        self.presenter.content().duration = duration;
        self
    }

    /// Sets the listener told when the snackbar finished showing or hiding.
    #[must_use]
    pub fn set_callback(self, callback: Arc<dyn Callback>) -> Self {
        self.presenter.content().callback = Some(callback);
        self
    }

    /// Sets the length of the show and hide transitions.
    #[must_use]
    pub fn set_animation_duration(self, animation: Duration) -> Self {
        self.presenter.content().animation = animation;
        self
    }

    /// Asks the manager to show this snackbar.
    pub fn show(&self) {
        let duration = self.presenter.content().duration;
        self.presenter.manager.show(&self.presenter.handle, duration);
    }

    /// Hides this snackbar, or drops it from the queue if it is waiting.
    pub fn dismiss(&self) {
        self.dispatch_dismiss(DismissEvent::Manual);
    }

    /// Presses the action button.
    ///
    /// After a short press delay the snackbar is dismissed with
    /// [`DismissEvent::Action`] and the action listener is called. Returns
    /// false if no action is set.
    pub fn perform_action(&self) -> bool {
        let Some(listener) = self
            .presenter
            .content()
            .action
            .as_ref()
            .map(|action| Arc::clone(&action.listener))
        else {
            return false;
        };

        let snackbar = self.clone();
        let press = move || {
            snackbar.dispatch_dismiss(DismissEvent::Action);
            listener();
        };
        match Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    tokio::time::sleep(Duration::from_millis(ACTION_PRESS_DELAY_MS)).await;
                    press();
                });
            }
            Err(_) => press(),
        }
        true
    }

    /// Returns true if this snackbar is the one the manager presents.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.presenter.manager.is_current(&self.presenter.handle)
    }

    /// Returns where the view is in its show/hide cycle.
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.presenter.content().view
    }

    /// Returns the message.
    #[must_use]
    pub fn text(&self) -> String {
        self.presenter.content().text.clone()
    }

    /// Returns the message color, if set.
    #[must_use]
    pub fn text_color(&self) -> Option<String> {
        self.presenter.content().text_color.clone()
    }

    /// Returns the action button label, if an action is set.
    #[must_use]
    pub fn action_text(&self) -> Option<String> {
        self.presenter
            .content()
            .action
            .as_ref()
            .map(|action| action.text.clone())
    }

    /// Returns the action button color, if set.
    #[must_use]
    pub fn action_text_color(&self) -> Option<String> {
        self.presenter
            .content()
            .action
            .as_ref()
            .and_then(|action| action.color.clone())
    }

    /// Returns how long the snackbar stays visible.
    #[must_use]
    pub fn duration(&self) -> SnackbarDuration {
        self.presenter.content().duration
    }

    /// Returns the length of the show and hide transitions.
    #[must_use]
    pub fn animation_duration(&self) -> Duration {
        self.presenter.content().animation
    }

    /// Returns the manager this snackbar is queued on.
    #[must_use]
    pub fn manager(&self) -> &SnackbarManager {
        &self.presenter.manager
    }

    fn dispatch_dismiss(&self, event: DismissEvent) {
        self.presenter.manager.dismiss(&self.presenter.handle, event);
    }
}
