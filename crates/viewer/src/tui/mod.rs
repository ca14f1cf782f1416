//! Terminal User Interface
//!
//! Two-pane viewer: device summaries on the left, the full descriptor
//! dump of the selected device on the right.
//!
//! # Keybindings
//!
//! - `Tab` or arrow left/right: switch between panes
//! - `j/k`, arrow up/down, PageUp/PageDown: navigate the focused pane
//! - `r`: force a bus rescan
//! - `q`, `F10`, `Esc` or `Ctrl+C`: quit

pub mod app;
pub mod events;
pub mod listview;
pub mod ui;

use anyhow::{Context as _, Result};
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::ViewerConfig;
use crate::usb::{DeviceRegistry, UsbBridge, UsbCommand, UsbEvent};

pub use app::{App, AppAction};
pub use events::EventHandler;
pub use listview::ListView;

/// TUI runner that manages the terminal and event loop
pub struct TuiRunner {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    app: App,
    event_handler: EventHandler,
    bridge: UsbBridge,
}

impl TuiRunner {
    /// Create a new TUI runner
    pub fn new(
        registry: Arc<DeviceRegistry>,
        bridge: UsbBridge,
        config: &ViewerConfig,
    ) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        let mut app = App::new(registry);
        app.list_width_percent = config.ui.list_width_percent;

        Ok(Self {
            terminal,
            app,
            event_handler: EventHandler::with_tick_rate(std::time::Duration::from_millis(
                config.ui.tick_rate_ms,
            )),
            bridge,
        })
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting TUI");

        self.terminal.draw(|f| ui::render(f, &mut self.app))?;

        loop {
            // Drain pending notifications from the USB worker
            while let Some(event) = self.bridge.try_recv_event() {
                match event {
                    UsbEvent::DevicesChanged { count } => {
                        debug!("Device list changed, {} devices", count);
                        self.app.refresh_devices();
                    }
                }
            }

            // Poll for terminal events
            if let Some(event) = self.event_handler.poll()? {
                let action = match event {
                    Event::Key(key) => self.event_handler.handle_key(&mut self.app, key),
                    Event::Resize(_, _) => {
                        // Pane heights are recomputed on the next draw
                        AppAction::None
                    }
                    _ => AppAction::None,
                };

                match action {
                    AppAction::None => {}
                    AppAction::Quit => {
                        self.app.should_quit = true;
                    }
                    AppAction::Rescan => {
                        self.bridge.send_command(UsbCommand::Rescan).await?;
                    }
                }
            }

            if self.app.should_quit {
                break;
            }

            self.terminal.draw(|f| ui::render(f, &mut self.app))?;
        }

        info!("TUI shutting down");
        Ok(())
    }
}

impl Drop for TuiRunner {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Run the TUI application
///
/// Main entry point for interactive mode. Creates a TuiRunner, runs the
/// event loop, and restores the terminal on exit.
pub async fn run(
    registry: Arc<DeviceRegistry>,
    bridge: UsbBridge,
    config: &ViewerConfig,
) -> Result<()> {
    let mut runner = TuiRunner::new(registry, bridge, config)?;
    runner.run().await
}
