use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A data-bound control that renders into a given [`Rect`] area.
///
/// Controls are driven by their host one request at a time: the host decodes
/// whatever gesture happened into a `Message`, calls
/// [`update`](Component::update), forwards the returned [`Command`] and finally
/// calls [`view`](Component::view).
///
/// # Composition pattern
///
/// To embed a control inside a larger one, wrap the control's message type in
/// a variant of the parent message and use [`Command::map`] to translate
/// commands:
///
/// ```rust,ignore
/// use boc_core::{Component, Command};
///
/// enum FormMsg { Active(boc_widgets::boolean_value::Message) }
///
/// fn update(&mut self, msg: FormMsg) -> Command<FormMsg> {
///     match msg {
///         FormMsg::Active(m) => self.active.update(m).map(FormMsg::Active),
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The control's message type.
    ///
    /// Parents typically wrap this in one of their own message variants so
    /// that events can be routed to the correct child.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] carrying any
    /// follow-up notifications.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into a specific `area` of the [`Frame`].
    ///
    /// Implementations should confine all rendering to the given rectangle.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Whether the control currently accepts input.
    ///
    /// The default implementation returns `true`.
    fn enabled(&self) -> bool {
        true
    }
}
