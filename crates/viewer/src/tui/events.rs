//! TUI event handling
//!
//! Handles keyboard input using crossterm and dispatches actions to the application.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use super::app::{App, AppAction};

/// Event handler for TUI input
pub struct EventHandler {
    /// Tick rate for polling events
    tick_rate: Duration,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    /// Create a new event handler
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
        }
    }

    /// Create event handler with custom tick rate
    pub fn with_tick_rate(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Poll for next event
    ///
    /// Returns Some(Event) if an event occurred, None if tick timeout elapsed.
    pub fn poll(&self) -> Result<Option<Event>> {
        if event::poll(self.tick_rate)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Handle a key event and return the resulting action
    pub fn handle_key(&self, app: &mut App, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::F(10) | KeyCode::Esc => AppAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => AppAction::Quit,

            KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
                app.toggle_pane();
                AppAction::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.navigate_up();
                AppAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.navigate_down();
                AppAction::None
            }
            KeyCode::PageUp => {
                app.page_up();
                AppAction::None
            }
            KeyCode::PageDown => {
                app.page_down();
                AppAction::None
            }

            KeyCode::Char('r') => AppAction::Rescan,

            _ => AppAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usb::{DeviceRecord, DeviceRegistry};
    use std::sync::Arc;

    fn app_with_devices(count: usize) -> App {
        let registry = DeviceRegistry::new();
        registry.replace(
            (0..count)
                .map(|i| DeviceRecord {
                    bus: 1,
                    address: i as u8 + 1,
                    vendor_id: 0x046d,
                    product_id: 0xc077,
                    summary: format!("device {}", i),
                    details: vec![format!("dump {}", i)],
                })
                .collect(),
        );
        let mut app = App::new(Arc::new(registry));
        app.device_list.set_height(10);
        app.detail_view.set_height(10);
        app
    }

    #[test]
    fn test_event_handler_creation() {
        let handler = EventHandler::new();
        assert_eq!(handler.tick_rate, Duration::from_millis(100));
    }

    #[test]
    fn test_navigation_keys() {
        let handler = EventHandler::new();
        let mut app = app_with_devices(3);

        let key = KeyEvent::new(KeyCode::Down, KeyModifiers::empty());
        let action = handler.handle_key(&mut app, key);
        assert!(matches!(action, AppAction::None));
        assert_eq!(app.selected_index(), 1);

        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::empty());
        handler.handle_key(&mut app, key);
        assert_eq!(app.selected_index(), 2);

        let key = KeyEvent::new(KeyCode::Up, KeyModifiers::empty());
        handler.handle_key(&mut app, key);
        assert_eq!(app.selected_index(), 1);

        let key = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::empty());
        handler.handle_key(&mut app, key);
        assert_eq!(app.selected_index(), 0);
    }

    #[test]
    fn test_tab_toggle() {
        use super::super::app::ActivePane;

        let handler = EventHandler::new();
        let mut app = app_with_devices(2);
        assert_eq!(app.active_pane, ActivePane::Devices);

        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::empty());
        handler.handle_key(&mut app, key);
        assert_eq!(app.active_pane, ActivePane::Details);

        handler.handle_key(&mut app, key);
        assert_eq!(app.active_pane, ActivePane::Devices);
    }

    #[test]
    fn test_quit_keys() {
        let handler = EventHandler::new();
        let mut app = app_with_devices(1);

        for key in [
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty()),
            KeyEvent::new(KeyCode::F(10), KeyModifiers::empty()),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let action = handler.handle_key(&mut app, key);
            assert!(matches!(action, AppAction::Quit));
        }
    }

    #[test]
    fn test_rescan_key() {
        let handler = EventHandler::new();
        let mut app = app_with_devices(1);

        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::empty());
        let action = handler.handle_key(&mut app, key);
        assert!(matches!(action, AppAction::Rescan));
    }
}
