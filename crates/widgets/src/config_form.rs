use fwd_core::{ConfigState, ConfigValue, Message};
use fwd_theme::Theme;
use iced::{
    widget::{button, checkbox, column, row, text, text_input, Column},
    Alignment, Color, Element, Length,
};
use std::collections::BTreeSet;

/// Outcome of the last config round trip, shown under the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditorStatus {
    #[default]
    Idle,
    Loading,
    Saved,
    Error(String),
}

/// Local, editable mirror of the backend's configuration.
///
/// Edits only touch the local copy.  A load replaces the whole state and a
/// save sends the whole state; there is no per-field sync.
#[derive(Debug, Clone)]
pub struct ConfigEditor {
    /// Field names this module kind understands, in display order.
    fields:  &'static [&'static str],
    state:   ConfigState,
    /// Fields that held a number in the last loaded state.
    numeric: BTreeSet<String>,
    status:  EditorStatus,
}

impl ConfigEditor {
    pub fn new(fields: &'static [&'static str]) -> Self {
        Self {
            fields,
            state: ConfigState::new(),
            numeric: BTreeSet::new(),
            status: EditorStatus::Idle,
        }
    }

    /// Replace the local state with a freshly loaded one, dropping any
    /// unsaved edits.
    pub fn replace(&mut self, state: ConfigState) {
        self.numeric = state
            .iter()
            .filter(|(_, value)| matches!(value, ConfigValue::Number(_)))
            .map(|(id, _)| id.clone())
            .collect();
        self.state = state;
        self.status = EditorStatus::Idle;
    }

    /// Set a boolean field.  Ignored for unknown or non-boolean fields.
    pub fn toggle(&mut self, field: &str, value: bool) {
        if let Some(slot) = self.state.get_mut(field) {
            if matches!(slot, ConfigValue::Bool(_)) {
                *slot = ConfigValue::Bool(value);
            }
        }
    }

    /// Set a text field from user input.  Ignored for unknown or boolean
    /// fields.  Fields loaded as numbers go back as numbers whenever the
    /// input parses.
    pub fn edit(&mut self, field: &str, input: String) {
        let numeric = self.numeric.contains(field);
        match self.state.get_mut(field) {
            Some(ConfigValue::Bool(_)) | None => {}
            Some(slot) => *slot = ConfigValue::from_input(input, numeric),
        }
    }

    /// The full state to send on save.
    pub fn snapshot(&self) -> ConfigState {
        self.state.clone()
    }

    pub fn state(&self) -> &ConfigState {
        &self.state
    }

    pub fn status(&self) -> &EditorStatus {
        &self.status
    }

    pub fn set_status(&mut self, status: EditorStatus) {
        self.status = status;
    }

    /// Recognised fields the backend actually reported, in display order.
    pub fn visible_fields(&self) -> impl Iterator<Item = (&'static str, &ConfigValue)> + '_ {
        self.fields
            .iter()
            .filter_map(|id| self.state.get(*id).map(|value| (*id, value)))
    }

    pub fn view<'a>(&'a self, theme: &'a Theme) -> Element<'a, Message> {
        let size = theme.font_size;

        let rows: Vec<Element<'a, Message>> = self
            .visible_fields()
            .map(|(id, value)| {
                let control: Element<'a, Message> = match value {
                    ConfigValue::Bool(checked) => checkbox(*checked)
                        .on_toggle(move |value| Message::FieldToggled {
                            field: id.to_string(),
                            value,
                        })
                        .into(),
                    other => text_input("", &other.display_text())
                        .on_input(move |value| Message::FieldEdited {
                            field: id.to_string(),
                            value,
                        })
                        .size(size)
                        .width(Length::Fill)
                        .into(),
                };
                labeled_row(id, control, size)
            })
            .collect();

        let actions = row![
            button(text("Apply").size(size)).on_press(Message::Apply),
            button(text("Refresh").size(size)).on_press(Message::Refresh),
            button(text("Reload").size(size)).on_press(Message::Reload),
            self.status_line(size),
        ]
        .spacing(theme.gap as f32)
        .align_y(Alignment::Center);

        column![
            Column::from_vec(rows).spacing(theme.gap as f32),
            actions,
        ]
        .spacing(theme.gap as f32 * 2.0)
        .into()
    }

    fn status_line<'a>(&self, size: f32) -> Element<'a, Message> {
        match &self.status {
            EditorStatus::Idle    => text("").into(),
            EditorStatus::Loading => text("Loading…").size(size).into(),
            EditorStatus::Saved   => text("✓ Sent")
                .size(size)
                .color(Color::from_rgb8(0xa6, 0xe3, 0xa1))
                .into(),
            EditorStatus::Error(e) => text(format!("✗ {e}"))
                .size(size)
                .color(Color::from_rgb8(0xf3, 0x8b, 0xa8))
                .into(),
        }
    }
}

fn labeled_row<'a>(
    label: &'a str,
    content: impl Into<Element<'a, Message>>,
    size: f32,
) -> Element<'a, Message> {
    row![
        text(label).size(size).width(200),
        content.into(),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}
