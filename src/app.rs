use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::activity::ActivityLog;
use crate::config::Config;
use crate::export;
use crate::telemetry::TelemetryCollector;
use crate::ui::tabs::Tab;

const MIN_POLL_MS: u64 = 250;
const MAX_POLL_MS: u64 = 60_000;
const POLL_STEP_MS: u64 = 250;

pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Tick,
    Resize,
}

pub struct App {
    pub running: bool,
    pub current_tab: Tab,
    pub telemetry: TelemetryCollector,
    pub activity: ActivityLog,
    pub hostname: String,
    pub started: Instant,
    pub scroll_offset: usize,
    pub viewport_height: usize,
    pub show_help: bool,
    export_dir: PathBuf,
    geolocate: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let telemetry = TelemetryCollector::new(
            config.endpoint.clone(),
            Duration::from_millis(config.poll_interval),
            config.capacity(),
            config.field_set(),
        );

        Self {
            running: true,
            current_tab: Tab::Overview,
            telemetry,
            activity: ActivityLog::new(),
            hostname,
            started: Instant::now(),
            scroll_offset: 0,
            viewport_height: 24,
            show_help: false,
            export_dir: config.export_dir,
            geolocate: !config.no_geolocate,
        }
    }

    pub fn session_uptime(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    pub fn run(
        &mut self,
        terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    ) -> color_eyre::Result<()> {
        let poll_timeout = Duration::from_millis(250);

        // First fetch goes out before the first frame is drawn.
        self.telemetry.start(self.geolocate, &mut self.activity);

        while self.running {
            // Drain completed poll cycles on the UI thread.
            self.telemetry.poll(&mut self.activity);

            terminal.draw(|frame| {
                let area = frame.area();
                // body = total height - 2 (header) - 1 (footer) - 2 (borders)
                self.viewport_height = area.height.saturating_sub(5) as usize;
                crate::ui::render(frame, self);
            })?;

            match poll_event(poll_timeout)? {
                AppEvent::Key(key) => self.handle_key(key),
                AppEvent::Mouse(mouse) => self.handle_mouse(mouse),
                AppEvent::Resize => {}
                AppEvent::Tick => {}
            }
        }

        self.telemetry.stop();
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Help overlay swallows the next key
        if self.show_help {
            self.show_help = false;
            return;
        }

        // Global keys
        match key.code {
            KeyCode::Char('q') => {
                self.running = false;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
                return;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return;
            }
            _ => {}
        }

        match key.code {
            // Tab selection by number
            KeyCode::Char('1') => self.switch_tab(Tab::Overview),
            KeyCode::Char('2') => self.switch_tab(Tab::Rpm),
            KeyCode::Char('3') => self.switch_tab(Tab::Tds),
            KeyCode::Char('4') => self.switch_tab(Tab::Motion),
            KeyCode::Char('5') => self.switch_tab(Tab::Power),
            KeyCode::Char('6') => self.switch_tab(Tab::Location),
            KeyCode::Char('7') => self.switch_tab(Tab::Activity),

            // Tab cycling
            KeyCode::Tab => self.switch_tab(self.current_tab.next()),
            KeyCode::BackTab => self.switch_tab(self.current_tab.prev()),

            KeyCode::F(n) if (1..=7).contains(&n) => {
                if let Some(tab) = Tab::from_index(n as usize - 1) {
                    self.switch_tab(tab);
                }
            }

            // Poll rate
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let ms = self.telemetry.poll_interval().as_millis() as u64;
                let new_ms = ms.saturating_sub(POLL_STEP_MS).max(MIN_POLL_MS);
                self.telemetry.set_poll_interval(Duration::from_millis(new_ms));
            }
            KeyCode::Char('-') => {
                let ms = self.telemetry.poll_interval().as_millis() as u64;
                let new_ms = (ms + POLL_STEP_MS).min(MAX_POLL_MS);
                self.telemetry.set_poll_interval(Duration::from_millis(new_ms));
            }

            // CSV export
            KeyCode::Char('e') => self.export_csv(),

            // Scrolling
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            KeyCode::Char('g') => self.scroll_offset = 0,
            KeyCode::Char('G') => self.scroll_offset = usize::MAX,
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(self.viewport_height);
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(self.viewport_height);
            }

            // Activity tab keys
            KeyCode::Char('l') if self.current_tab == Tab::Activity => {
                self.activity.cycle_level_filter();
            }
            KeyCode::Char('a') if self.current_tab == Tab::Activity => {
                self.activity.toggle_auto_scroll();
            }

            _ => {}
        }
    }

    fn export_csv(&mut self) {
        let count = self.telemetry.history.len();
        match export::write_csv(self.telemetry.history.entries(), &self.export_dir) {
            Ok(Some(path)) => self
                .activity
                .info(format!("exported {count} entries to {}", path.display())),
            Ok(None) => self.activity.warn("nothing to export yet"),
            Err(e) => self.activity.error(format!("export failed: {e}")),
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        self.scroll_offset = 0;
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.show_help {
            if matches!(mouse.kind, MouseEventKind::Down(_)) {
                self.show_help = false;
            }
            return;
        }

        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(3);
            }
            MouseEventKind::ScrollDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(3);
            }
            MouseEventKind::Down(crossterm::event::MouseButton::Left) => {
                // Tab bar is on row 1 (second row of header)
                if mouse.row == 1 {
                    self.handle_tab_click(mouse.column);
                }
            }
            _ => {}
        }
    }

    fn handle_tab_click(&mut self, col: u16) {
        // Tab bar format: " N:Label  N:Label  ..."
        let mut x: u16 = 1; // initial space
        for tab in &Tab::ALL {
            let label = format!(" {}:{} ", tab.index() + 1, tab.label());
            let width = label.len() as u16;
            if col >= x && col < x + width {
                self.switch_tab(*tab);
                return;
            }
            x += width + 1; // +1 for the gap space
        }
    }
}

fn poll_event(timeout: Duration) -> color_eyre::Result<AppEvent> {
    if event::poll(timeout)? {
        match event::read()? {
            Event::Key(key) => Ok(AppEvent::Key(key)),
            Event::Mouse(mouse) => Ok(AppEvent::Mouse(mouse)),
            Event::Resize(_, _) => Ok(AppEvent::Resize),
            _ => Ok(AppEvent::Tick),
        }
    } else {
        Ok(AppEvent::Tick)
    }
}
