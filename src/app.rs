use crate::clock::ClockTicker;
use crate::config::DashboardConfig;
use crate::dashboard::{DashboardSnapshot, Period};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::io;
use std::time::Duration;
use tracing::debug;

const INPUT_POLL_MS: u64 = 50;

pub struct App {
    pub should_quit: bool,
    pub config: DashboardConfig,
    pub period: Period,
    pub snapshot: DashboardSnapshot,
    clock: ClockTicker,
}

impl App {
    /// Starts the header clock; must be called inside a tokio runtime.
    pub fn new(config: DashboardConfig) -> Self {
        let clock = ClockTicker::start(config.tick_interval);
        let period = Period::default();
        let snapshot =
            DashboardSnapshot::capture(&clock.now(), &config, period, &mut rand::thread_rng());
        Self {
            should_quit: false,
            config,
            period,
            snapshot,
            clock,
        }
    }

    /// One render pass: new clock reading and freshly sampled chart data.
    pub fn refresh(&mut self) {
        self.snapshot = DashboardSnapshot::capture(
            &self.clock.now(),
            &self.config,
            self.period,
            &mut rand::thread_rng(),
        );
    }

    /// Re-renders only when the clock has moved. Returns whether it did.
    pub fn tick(&mut self) -> bool {
        if self.clock.take_update().is_some() {
            self.refresh();
            true
        } else {
            false
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('p') => {
                self.period = self.period.next();
                debug!("Period changed to {}", self.period.label());
                self.refresh();
            }
            _ => {}
        }
    }

    pub async fn run(&mut self, terminal: &mut crate::tui::Tui) -> io::Result<()> {
        terminal.draw(|f| crate::ui::render(f, self))?;
        while !self.should_quit {
            let mut dirty = self.tick();

            if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code);
                        dirty = true;
                    }
                    Event::Resize(_, _) => dirty = true,
                    _ => {}
                }
            }

            if dirty && !self.should_quit {
                terminal.draw(|f| crate::ui::render(f, self))?;
            }
        }
        Ok(())
    }
}
