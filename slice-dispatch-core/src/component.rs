//! Component trait for pure UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A pure UI component that renders based on props and emits actions
///
/// Components follow these rules:
/// 1. Props contain ALL read-only data needed for rendering
/// 2. `handle_event` returns actions, never mutates store state
/// 3. `render` is a pure function of props (plus internal UI state like a cursor)
///
/// Internal UI state (cursor position, form drafts) can be stored in `&mut self`,
/// but data mutations must go through actions.
///
/// # Example
///
/// ```ignore
/// use slice_dispatch::{Component, EventKind};
///
/// struct Counter;
///
/// struct CounterProps {
///     count: i32,
/// }
///
/// impl Component<AppAction> for Counter {
///     type Props<'a> = CounterProps;
///
///     fn handle_event(&mut self, event: &EventKind, _props: Self::Props<'_>) -> impl IntoIterator<Item = AppAction> {
///         match event.as_key().map(|k| k.code) {
///             Some(KeyCode::Up) => Some(AppAction::Increment),
///             _ => None,
///         }
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         frame.render_widget(Paragraph::new(format!("Count: {}", props.count)), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to dispatch
    ///
    /// Returns any type implementing `IntoIterator<Item = A>`:
    /// - `None` - no actions (most common)
    /// - `Some(action)` - single action
    /// - `vec![...]` - multiple actions
    ///
    /// Default implementation returns no actions (render-only components).
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
