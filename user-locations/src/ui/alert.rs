//! Blocking alert; swallows every key until dismissed

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};
use slice_dispatch::{Component, EventKind};

use super::modal::{centered_rect, render_modal};
use crate::action::Action;

#[derive(Default)]
pub struct AlertModal;

pub struct AlertProps<'a> {
    pub message: &'a str,
}

impl Component<Action> for AlertModal {
    type Props<'a> = AlertProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        match event.as_key().map(|key| key.code) {
            Some(KeyCode::Enter | KeyCode::Esc) => Some(Action::AlertDismiss),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let inner = render_modal(frame, centered_rect(50, 7, area), "Error", Color::Red);
        let text = vec![
            Line::from(props.message),
            Line::default(),
            Line::styled("enter to dismiss", Style::default().fg(Color::DarkGray)),
        ];
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
    }
}
