//! Terminal UI: maps events to actions and renders the root state
//!
//! Input goes to the topmost layer only: alert, then registration dialog,
//! then the list. `ctrl+c` quits from anywhere.

mod alert;
mod location_list;
mod modal;
mod registration_dialog;
mod status_bar;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};
use slice_dispatch::{Component, EventKind};

pub use alert::{AlertModal, AlertProps};
pub use location_list::{LocationList, LocationListProps};
pub use registration_dialog::{RegistrationForm, RegistrationFormProps};
pub use status_bar::{StatusBar, StatusBarProps};

use crate::action::Action;
use crate::state::AppState;
use crate::user_location::selectors::{
    active_count, get_user_locations, is_loading, is_registration_dialog_open,
    registration_error,
};

#[derive(Default)]
pub struct App {
    list: LocationList,
    form: RegistrationForm,
    alert: AlertModal,
    status: StatusBar,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let [body, footer] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

        let dialog_open = is_registration_dialog_open(state);
        let props = LocationListProps {
            state,
            is_focused: !dialog_open && state.alert.is_none(),
        };
        self.list.render(frame, body, props);

        let props = StatusBarProps {
            loading: is_loading(state),
            total: get_user_locations(state).len(),
            active: active_count(state),
        };
        self.status.render(frame, footer, props);

        self.form.set_open(dialog_open);
        if dialog_open {
            let props = RegistrationFormProps {
                error: registration_error(state),
            };
            self.form.render(frame, area, props);
        }

        if let Some(message) = state.alert.as_deref() {
            self.alert.render(frame, area, AlertProps { message });
        }
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        if let EventKind::Key(key) = event {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return vec![Action::Quit];
            }
        }

        if let Some(message) = state.alert.as_deref() {
            return self
                .alert
                .handle_event(event, AlertProps { message })
                .into_iter()
                .collect();
        }

        let dialog_open = is_registration_dialog_open(state);
        self.form.set_open(dialog_open);
        if dialog_open {
            let props = RegistrationFormProps {
                error: registration_error(state),
            };
            return self.form.handle_event(event, props).into_iter().collect();
        }

        let props = LocationListProps {
            state,
            is_focused: true,
        };
        self.list.handle_event(event, props).into_iter().collect()
    }
}
