use crate::command::{Command, CommandInner};
use crate::component::Component;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless test harness that drives a [`Component`] without a host.
///
/// `TestHarness` lets you exercise the update/view cycle of a control in a
/// plain `#[test]` function. Follow-up messages returned by
/// [`Component::update`] are collected and can either be inspected with
/// [`emitted`](TestHarness::emitted) or fed back with
/// [`drain_messages`](TestHarness::drain_messages), which is why the
/// control's message type must be `Clone`.
///
/// # Example
///
/// ```rust,ignore
/// use boc_core::testing::TestHarness;
///
/// let mut h = TestHarness::new(BooleanValue::new(path));
/// h.send(Message::Toggle);
/// assert_eq!(h.component().value(), Some(true));
///
/// let output = h.render_string(10, 1);
/// assert!(output.contains("[x]"));
/// ```
pub struct TestHarness<C: Component> {
    component: C,
    pending_messages: Vec<C::Message>,
    emitted: Vec<C::Message>,
}

impl<C> TestHarness<C>
where
    C: Component,
    C::Message: Clone,
{
    pub fn new(component: C) -> Self {
        Self {
            component,
            pending_messages: Vec::new(),
            emitted: Vec::new(),
        }
    }

    /// Send a message, triggering a single update cycle.
    ///
    /// Follow-up messages are enqueued; call
    /// [`drain_messages`](TestHarness::drain_messages) to flush them.
    pub fn send(&mut self, msg: C::Message) {
        let cmd = self.component.update(msg);
        self.collect(cmd);
    }

    /// Feed every pending follow-up message back into the component until no
    /// new ones are produced.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                let cmd = self.component.update(msg);
                self.collect(cmd);
            }
        }
    }

    /// Take the pending follow-up messages without delivering them.
    pub fn take_pending(&mut self) -> Vec<C::Message> {
        std::mem::take(&mut self.pending_messages)
    }

    /// Every follow-up message produced so far, delivered or not.
    pub fn emitted(&self) -> &[C::Message] {
        &self.emitted
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    /// Mutable access for arranging test state outside the message cycle.
    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    pub fn into_inner(self) -> C {
        self.component
    }

    /// Render the component into a ratatui [`Buffer`] of the given size.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                self.component.view(frame, area);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    /// Render and return the visible content as a plain string, one line per
    /// buffer row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = Rect::new(0, 0, width, height);
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                output.push_str(buf[(x, y)].symbol());
            }
            if y < area.bottom() - 1 {
                output.push('\n');
            }
        }
        output
    }

    fn collect(&mut self, cmd: Command<C::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => {
                self.emitted.push(msg.clone());
                self.pending_messages.push(msg);
            }
            CommandInner::Batch(cmds) | CommandInner::Sequence(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
        }
    }
}
