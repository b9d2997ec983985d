//! Tri-state checkbox bound to a boolean property.

use crate::bound_value::{BoundValue, ValidationFailure};
use boc_core::command::Command;
use boc_core::component::Component;
use boc_core::{BusinessObject, PropertyError, PropertyPath, PropertyResolver, Value};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Messages for the boolean value component.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Advance to the next state of the toggle cycle.
    Toggle,
    Set(Option<bool>),
    /// Emitted after the pending value changed.
    Changed(Option<bool>),
}

#[derive(Debug, Clone)]
pub struct BooleanValueStyle {
    pub checkbox: Style,
    pub label: Style,
    pub read_only: Style,
}

impl Default for BooleanValueStyle {
    fn default() -> Self {
        Self {
            checkbox: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            label: Style::default(),
            read_only: Style::default().fg(Color::DarkGray),
        }
    }
}

/// A checkbox over an `Option<bool>` property.
///
/// Unless the binding is required, `null` is a third state: toggling cycles
/// `true -> false -> null -> true`. Required bindings alternate between
/// `true` and `false`.
pub struct BooleanValue {
    binding: BoundValue,
    label: String,
    style: BooleanValueStyle,
}

impl BooleanValue {
    pub fn new(path: PropertyPath) -> Self {
        Self {
            binding: BoundValue::new(path),
            label: String::new(),
            style: BooleanValueStyle::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.binding = self.binding.with_required(required);
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.binding = self.binding.with_read_only(read_only);
        self
    }

    pub fn with_style(mut self, style: BooleanValueStyle) -> Self {
        self.style = style;
        self
    }

    pub fn binding(&self) -> &BoundValue {
        &self.binding
    }

    /// The pending value.
    pub fn value(&self) -> Option<bool> {
        self.binding.value().as_bool()
    }

    /// Load the property. Anything but a boolean or null is a type error.
    pub fn load_value(
        &mut self,
        object: &dyn BusinessObject,
        resolver: &mut PropertyResolver,
        interim: bool,
    ) -> Result<(), PropertyError> {
        self.binding.load_value(object, resolver, interim)?;
        match self.binding.value() {
            Value::Null | Value::Bool(_) => Ok(()),
            other => Err(PropertyError::TypeMismatch {
                property: self.binding.path().to_string(),
                expected: "bool",
                found: other.kind_name(),
            }),
        }
    }

    pub fn save_value(
        &mut self,
        object: &mut dyn BusinessObject,
        resolver: &mut PropertyResolver,
    ) -> Result<bool, PropertyError> {
        self.binding.save_value(object, resolver)
    }

    pub fn validate(&self) -> Result<(), ValidationFailure> {
        self.binding.validate()
    }

    /// The state `toggle` moves to.
    pub fn next_value(&self) -> Option<bool> {
        match (self.value(), self.binding.is_required()) {
            (Some(true), _) => Some(false),
            (Some(false), true) => Some(true),
            (Some(false), false) => None,
            (None, _) => Some(true),
        }
    }

    /// Returns `true` if the pending value changed.
    pub fn toggle(&mut self) -> bool {
        let next = self.next_value();
        self.set(next)
    }

    /// Returns `true` if the pending value changed.
    pub fn set(&mut self, value: Option<bool>) -> bool {
        self.binding.set_value(Value::from(value))
    }
}

impl Component for BooleanValue {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        let changed = match msg {
            Message::Toggle => self.toggle(),
            Message::Set(value) => self.set(value),
            Message::Changed(_) => return Command::none(),
        };
        if changed {
            log::trace!("{} changed to {:?}", self.binding.path(), self.value());
            Command::message(Message::Changed(self.value()))
        } else {
            Command::none()
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let mark = match self.value() {
            Some(true) => "[x]",
            Some(false) => "[ ]",
            None => "[?]",
        };
        let (checkbox, label) = if self.binding.is_read_only() {
            (self.style.read_only, self.style.read_only)
        } else {
            (self.style.checkbox, self.style.label)
        };
        let mut spans = vec![Span::styled(mark, checkbox)];
        if !self.label.is_empty() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(self.label.as_str(), label));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn enabled(&self) -> bool {
        !self.binding.is_read_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::fixtures::Person;
    use boc_core::testing::TestHarness;

    fn active() -> BooleanValue {
        BooleanValue::new(PropertyPath::parse("Active").unwrap()).with_label("Active")
    }

    #[test]
    fn optional_toggle_cycles_through_null() {
        let mut b = active();
        assert_eq!(b.value(), None);
        b.toggle();
        assert_eq!(b.value(), Some(true));
        b.toggle();
        assert_eq!(b.value(), Some(false));
        b.toggle();
        assert_eq!(b.value(), None);
    }

    #[test]
    fn required_toggle_skips_null() {
        let mut b = active().with_required(true);
        assert!(b.validate().is_err());
        b.toggle();
        b.toggle();
        assert_eq!(b.value(), Some(false));
        b.toggle();
        assert_eq!(b.value(), Some(true));
        assert!(b.validate().is_ok());
    }

    #[test]
    fn load_and_save() {
        let mut r = PropertyResolver::new();
        let mut p = Person::new("Ann", 1);
        p.active = Some(true);
        let mut b = active();
        b.load_value(&p, &mut r, false).unwrap();
        assert_eq!(b.value(), Some(true));
        b.toggle();
        assert!(b.save_value(&mut p, &mut r).unwrap());
        assert_eq!(p.active, Some(false));
    }

    #[test]
    fn non_boolean_property_is_rejected() {
        let mut r = PropertyResolver::new();
        let p = Person::new("Ann", 1);
        let mut b = BooleanValue::new(PropertyPath::parse("Name").unwrap());
        let err = b.load_value(&p, &mut r, false).unwrap_err();
        assert_eq!(
            err,
            PropertyError::TypeMismatch {
                property: "Name".into(),
                expected: "bool",
                found: "text",
            }
        );
    }

    #[test]
    fn update_emits_changes() {
        let mut h = TestHarness::new(active());
        h.send(Message::Toggle);
        h.send(Message::Set(Some(true)));
        h.send(Message::Set(None));
        assert_eq!(
            h.emitted(),
            &[Message::Changed(Some(true)), Message::Changed(None)]
        );
    }

    #[test]
    fn read_only_ignores_toggles() {
        let mut h = TestHarness::new(active().with_read_only(true));
        h.send(Message::Toggle);
        assert!(h.emitted().is_empty());
        assert!(!h.component().enabled());
    }

    #[test]
    fn renders_checkbox() {
        let mut h = TestHarness::new(active());
        assert!(h.render_string(12, 1).starts_with("[?] Active"));
        h.send(Message::Toggle);
        assert!(h.render_string(12, 1).starts_with("[x] Active"));
    }
}
