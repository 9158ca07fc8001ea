//! Scrollable list of locations with selection checkboxes

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use slice_dispatch::{Component, EventKind};

use crate::action::Action;
use crate::state::AppState;
use crate::user_location::selectors::{get_user_locations, is_active, is_loading};
use crate::user_location::{
    fetch_user_locations, open_user_location_registration_dialog,
    toggle_user_location_selection,
};

#[derive(Default)]
pub struct LocationList {
    /// Highlighted row
    cursor: usize,
}

pub struct LocationListProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

impl LocationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn clamp_cursor(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

impl Component<Action> for LocationList {
    type Props<'a> = LocationListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let Some(key) = event.as_key() else {
            return None;
        };
        let locations = get_user_locations(props.state);
        self.clamp_cursor(locations.len());

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.cursor + 1 < locations.len() {
                    self.cursor += 1;
                }
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Char(' ') => locations.get(self.cursor).map(|location| {
                Action::from(toggle_user_location_selection(location.id.clone()))
            }),
            KeyCode::Char('r') => Some(Action::from(fetch_user_locations())),
            KeyCode::Char('n') => Some(Action::from(open_user_location_registration_dialog())),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let locations = get_user_locations(props.state);
        self.clamp_cursor(locations.len());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if props.is_focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            })
            .title(" User locations ");

        if locations.is_empty() {
            let text = if is_loading(props.state) {
                "Loading..."
            } else {
                "No locations yet, press n to add one"
            };
            let paragraph = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = locations
            .iter()
            .map(|location| {
                let active = is_active(props.state, &location.id);
                let checkbox = if active { "[x] " } else { "[ ] " };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        checkbox,
                        Style::default().fg(if active { Color::Green } else { Color::DarkGray }),
                    ),
                    Span::raw(location.name.clone()),
                    Span::styled(
                        format!("  {:.4}, {:.4}", location.latitude, location.longitude),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
