//! TUI rendering with ratatui
//!
//! Renders the two-pane layout: device summaries on the left, the
//! descriptor dump of the selected device on the right, and a one-line
//! status bar at the bottom.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::app::{ActivePane, App};

/// Colors used in the UI
mod colors {
    use ratatui::style::Color;

    pub const ACTIVE_BORDER: Color = Color::Cyan;
    pub const INACTIVE_BORDER: Color = Color::Gray;

    pub const HIGHLIGHT_BG: Color = Color::DarkGray;
    pub const STATUS_BAR_BG: Color = Color::Blue;
}

/// Render the complete UI
///
/// Also feeds the pane heights back into the list views so scroll
/// arithmetic matches what is actually on screen.
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Two panes
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(app.list_width_percent),
            Constraint::Percentage(100 - app.list_width_percent),
        ])
        .split(chunks[0]);

    let inner_height = |area: Rect| area.height.saturating_sub(2) as usize;
    app.device_list.set_height(inner_height(panes[0]));
    app.detail_view.set_height(inner_height(panes[1]));

    render_device_list(frame, app, panes[0]);
    render_details(frame, app, panes[1]);
    render_status_bar(frame, app, chunks[1]);
}

fn pane_block(title: &str, is_active: bool) -> Block<'_> {
    let border_color = if is_active {
        colors::ACTIVE_BORDER
    } else {
        colors::INACTIVE_BORDER
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title)
        .title_style(if is_active {
            Style::default()
                .fg(colors::ACTIVE_BORDER)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        })
}

/// Render the device summary pane
fn render_device_list(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = app.active_pane == ActivePane::Devices;

    let items: Vec<ListItem> = app
        .summaries
        .iter()
        .map(|s| ListItem::new(s.as_str()))
        .collect();

    let list = List::new(items)
        .block(pane_block(" Devices ", is_active))
        .highlight_style(
            Style::default()
                .bg(colors::HIGHLIGHT_BG)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.summaries.is_empty() {
        state.select(Some(app.device_list.cursor()));
    }
    *state.offset_mut() = app.device_list.window_start();

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the descriptor dump pane
fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = app.active_pane == ActivePane::Details;

    let items: Vec<ListItem> = app
        .details
        .iter()
        .map(|s| ListItem::new(s.as_str()))
        .collect();

    let highlight = if is_active {
        Style::default().bg(colors::HIGHLIGHT_BG)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(pane_block(" Descriptors ", is_active))
        .highlight_style(highlight);

    let mut state = ListState::default();
    if !app.details.is_empty() {
        state.select(Some(app.detail_view.cursor()));
    }
    *state.offset_mut() = app.detail_view.window_start();

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the bottom status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let paragraph = Paragraph::new(app.status_line()).style(
        Style::default()
            .fg(Color::White)
            .bg(colors::STATUS_BAR_BG),
    );
    frame.render_widget(paragraph, area);
}
