//! Registration form for a new location
//!
//! The draft lives in the component; only a parsed payload leaves it, as a
//! create request.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use slice_dispatch::{Component, EventKind};

use super::modal::{centered_rect, render_modal};
use crate::action::Action;
use crate::model::CreateUserLocationPayload;
use crate::user_location::{close_user_location_registration_dialog, create_user_location};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Field {
    #[default]
    Name,
    Latitude,
    Longitude,
}

impl Field {
    const ALL: [Field; 3] = [Field::Name, Field::Latitude, Field::Longitude];

    fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Latitude => "Latitude",
            Field::Longitude => "Longitude",
        }
    }

    fn next(self) -> Self {
        match self {
            Field::Name => Field::Latitude,
            Field::Latitude => Field::Longitude,
            Field::Longitude => Field::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Name => Field::Longitude,
            Field::Latitude => Field::Name,
            Field::Longitude => Field::Latitude,
        }
    }
}

#[derive(Default)]
pub struct RegistrationForm {
    name: String,
    latitude: String,
    longitude: String,
    focus: Field,
    /// Parse error of the draft, cleared on the next edit
    local_error: Option<String>,
    was_open: bool,
}

pub struct RegistrationFormProps<'a> {
    /// Error reported by the API for the last create
    pub error: Option<&'a str>,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an empty draft every time the dialog opens
    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            *self = Self {
                was_open: true,
                ..Self::default()
            };
        }
        self.was_open = is_open;
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Latitude => &mut self.latitude,
            Field::Longitude => &mut self.longitude,
        }
    }

    fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Latitude => &self.latitude,
            Field::Longitude => &self.longitude,
        }
    }

    fn payload(&self) -> Result<CreateUserLocationPayload, String> {
        let latitude = parse_coordinate(Field::Latitude, &self.latitude)?;
        let longitude = parse_coordinate(Field::Longitude, &self.longitude)?;
        Ok(CreateUserLocationPayload {
            name: self.name.clone(),
            latitude,
            longitude,
        })
    }
}

fn parse_coordinate(field: Field, value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("{} must be a number", field.label()))
}

impl Component<Action> for RegistrationForm {
    type Props<'a> = RegistrationFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let Some(key) = event.as_key() else {
            return None;
        };
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }

        match key.code {
            KeyCode::Esc => Some(Action::from(close_user_location_registration_dialog())),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Enter => match self.payload() {
                Ok(payload) => {
                    self.local_error = None;
                    Some(Action::from(create_user_location(payload)))
                }
                Err(message) => {
                    self.local_error = Some(message);
                    None
                }
            },
            KeyCode::Backspace => {
                self.local_error = None;
                self.field_mut(self.focus).pop();
                None
            }
            KeyCode::Char(c) => {
                self.local_error = None;
                self.field_mut(self.focus).push(c);
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let inner = render_modal(
            frame,
            centered_rect(50, 9, area),
            "New location",
            Color::Cyan,
        );

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        for (row, field) in rows.iter().zip(Field::ALL) {
            let focused = field == self.focus;
            let label_style = if focused {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let mut spans = vec![
                Span::styled(format!("{:>10}: ", field.label()), label_style),
                Span::raw(self.field(field).to_string()),
            ];
            if focused {
                spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), *row);
        }

        if let Some(error) = self.local_error.as_deref().or(props.error) {
            frame.render_widget(
                Paragraph::new(error).style(Style::default().fg(Color::Red)),
                rows[3],
            );
        }

        let hint = Line::styled(
            "tab next field, enter save, esc cancel",
            Style::default().fg(Color::DarkGray),
        );
        frame.render_widget(Paragraph::new(hint), rows[4]);
    }
}
