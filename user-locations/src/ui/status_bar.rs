use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use slice_dispatch::Component;

use crate::action::Action;

#[derive(Default)]
pub struct StatusBar;

pub struct StatusBarProps {
    pub loading: bool,
    pub total: usize,
    pub active: usize,
}

impl Component<Action> for StatusBar {
    type Props<'a> = StatusBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let status = if props.loading {
            Span::styled(" Loading... ", Style::default().fg(Color::Yellow))
        } else {
            Span::raw(format!(" {} locations, {} selected ", props.total, props.active))
        };

        let mut spans = vec![status];
        for (key, label) in [("space", "toggle"), ("r", "refresh"), ("n", "new"), ("q", "quit")] {
            spans.push(Span::styled(key, Style::default().fg(Color::Cyan).bold()));
            spans.push(Span::styled(
                format!(" {label}  "),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
