//! TUI application state
//!
//! Holds the two panes, the current registry snapshot, and the selection
//! logic that keeps the detail pane paired with the selected device.

use crate::tui::listview::ListView;
use crate::usb::DeviceRegistry;
use std::sync::Arc;

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Devices,
    Details,
}

/// Action returned from key handling for the runner to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    None,
    Quit,
    Rescan,
}

/// Main application state
pub struct App {
    registry: Arc<DeviceRegistry>,
    /// One summary line per device, left pane
    pub summaries: Vec<String>,
    /// Descriptor dump of the selected device, right pane
    pub details: Vec<String>,
    pub device_list: ListView,
    pub detail_view: ListView,
    pub active_pane: ActivePane,
    pub should_quit: bool,
    /// Width of the device pane as a percentage of the terminal
    pub list_width_percent: u16,
    /// (bus, address) of the selected device, to spot hot-plug renumbering
    selected_key: Option<(u8, u8)>,
}

impl App {
    pub fn new(registry: Arc<DeviceRegistry>) -> Self {
        let mut app = Self {
            registry,
            summaries: Vec::new(),
            details: Vec::new(),
            device_list: ListView::new(true),
            detail_view: ListView::new(false),
            active_pane: ActivePane::Devices,
            should_quit: false,
            list_width_percent: 40,
            selected_key: None,
        };
        app.refresh_devices();
        app
    }

    /// Reload both panes from the registry. Called on startup and whenever
    /// the worker publishes a new snapshot.
    pub fn refresh_devices(&mut self) {
        self.summaries = self.registry.summaries();
        self.device_list.set_len(self.summaries.len());
        self.load_details();
    }

    /// Reload the detail pane for the current selection.
    ///
    /// Detail scroll is kept when the same physical device is still
    /// selected and reset when the selection landed on a different one.
    fn load_details(&mut self) {
        let index = self.device_list.cursor();
        let key = self
            .registry
            .snapshot()
            .get(index)
            .map(|r| (r.bus, r.address));

        self.details = self.registry.details(index).unwrap_or_default();
        self.detail_view.set_len(self.details.len());
        if key != self.selected_key {
            self.detail_view.reset();
        }
        self.selected_key = key;
    }

    /// Index of the selected device in the list pane.
    pub fn selected_index(&self) -> usize {
        self.device_list.cursor()
    }

    pub fn toggle_pane(&mut self) {
        self.active_pane = match self.active_pane {
            ActivePane::Devices => ActivePane::Details,
            ActivePane::Details => ActivePane::Devices,
        };
        self.device_list
            .set_focused(self.active_pane == ActivePane::Devices);
        self.detail_view
            .set_focused(self.active_pane == ActivePane::Details);
    }

    pub fn navigate_down(&mut self) {
        match self.active_pane {
            ActivePane::Devices => {
                let before = self.device_list.cursor();
                self.device_list.cursor_down();
                if self.device_list.cursor() != before {
                    self.load_details();
                }
            }
            ActivePane::Details => self.detail_view.cursor_down(),
        }
    }

    pub fn navigate_up(&mut self) {
        match self.active_pane {
            ActivePane::Devices => {
                let before = self.device_list.cursor();
                self.device_list.cursor_up();
                if self.device_list.cursor() != before {
                    self.load_details();
                }
            }
            ActivePane::Details => self.detail_view.cursor_up(),
        }
    }

    pub fn page_down(&mut self) {
        match self.active_pane {
            ActivePane::Devices => {
                let before = self.device_list.cursor();
                self.device_list.page_down();
                if self.device_list.cursor() != before {
                    self.load_details();
                }
            }
            ActivePane::Details => self.detail_view.page_down(),
        }
    }

    pub fn page_up(&mut self) {
        match self.active_pane {
            ActivePane::Devices => {
                let before = self.device_list.cursor();
                self.device_list.page_up();
                if self.device_list.cursor() != before {
                    self.load_details();
                }
            }
            ActivePane::Details => self.detail_view.page_up(),
        }
    }

    /// Bottom status line.
    pub fn status_line(&self) -> String {
        format!("[F10] Exit (current index = {})", self.selected_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usb::DeviceRecord;

    fn registry_with(count: usize) -> Arc<DeviceRegistry> {
        let registry = DeviceRegistry::new();
        registry.replace(
            (0..count)
                .map(|i| DeviceRecord {
                    bus: 1,
                    address: i as u8 + 1,
                    vendor_id: 0x1d6b,
                    product_id: 0x0002,
                    summary: format!("device {}", i),
                    details: vec![format!("dump {}", i), "line 2".to_string()],
                })
                .collect(),
        );
        Arc::new(registry)
    }

    #[test]
    fn selection_and_details_stay_paired() {
        let mut app = App::new(registry_with(3));
        app.device_list.set_height(10);
        assert_eq!(app.summaries.len(), 3);
        assert_eq!(app.details[0], "dump 0");

        app.navigate_down();
        assert_eq!(app.selected_index(), 1);
        assert_eq!(app.details[0], "dump 1");

        app.navigate_up();
        assert_eq!(app.details[0], "dump 0");
    }

    #[test]
    fn tab_moves_focus_to_the_detail_pane() {
        let mut app = App::new(registry_with(2));
        app.device_list.set_height(10);
        app.detail_view.set_height(10);

        app.toggle_pane();
        assert_eq!(app.active_pane, ActivePane::Details);

        // Navigation now scrolls the dump, not the device list
        app.navigate_down();
        assert_eq!(app.selected_index(), 0);
        assert_eq!(app.detail_view.cursor(), 1);

        app.toggle_pane();
        assert_eq!(app.active_pane, ActivePane::Devices);
    }

    #[test]
    fn unplug_clamps_the_selection() {
        let registry = registry_with(3);
        let mut app = App::new(registry.clone());
        app.device_list.set_height(10);
        app.navigate_down();
        app.navigate_down();
        assert_eq!(app.selected_index(), 2);

        registry.replace(vec![DeviceRecord {
            bus: 1,
            address: 9,
            vendor_id: 0x1d6b,
            product_id: 0x0003,
            summary: "survivor".to_string(),
            details: vec!["survivor dump".to_string()],
        }]);
        app.refresh_devices();

        assert_eq!(app.selected_index(), 0);
        assert_eq!(app.details[0], "survivor dump");
    }

    #[test]
    fn detail_scroll_resets_when_selection_changes_device() {
        let mut app = App::new(registry_with(2));
        app.device_list.set_height(10);
        app.detail_view.set_height(1);

        app.toggle_pane();
        app.navigate_down();
        assert_eq!(app.detail_view.cursor(), 1);

        app.toggle_pane();
        app.navigate_down();
        assert_eq!(app.detail_view.cursor(), 0);
    }

    #[test]
    fn status_line_names_the_current_index() {
        let mut app = App::new(registry_with(3));
        app.device_list.set_height(10);
        assert_eq!(app.status_line(), "[F10] Exit (current index = 0)");
        app.navigate_down();
        assert_eq!(app.status_line(), "[F10] Exit (current index = 1)");
    }

    #[test]
    fn empty_registry_renders_empty_panes() {
        let app = App::new(Arc::new(DeviceRegistry::new()));
        assert!(app.summaries.is_empty());
        assert!(app.details.is_empty());
        assert_eq!(app.status_line(), "[F10] Exit (current index = 0)");
    }
}
