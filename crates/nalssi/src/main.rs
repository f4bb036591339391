use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use nalssi_config::Config;
use nalssi_core::{Conditions, Units, Viewport};
use nalssi_scene::{Rgba, Scene, SceneFrame};
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::Stylize,
    text::Line,
    widgets::Paragraph,
    DefaultTerminal, Frame,
};

mod blit;
mod readout;
mod weather;

use blit::SceneBlit;
use readout::{readout_lines, READOUT_HEIGHT};
use weather::WeatherMonitor;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load().map_err(|e| color_eyre::eyre::eyre!(e))?;
    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// User configuration.
    config: Config,
    /// The animated weather scene.
    scene: Scene,
    /// Per-layer pixel buffers the scene paints into.
    scene_frame: SceneFrame,
    /// Background weather fetcher.
    monitor: WeatherMonitor,
    /// Keyboard-driven conditions, overriding live weather until cleared.
    conditions_override: Option<Conditions>,
    /// Current temperature units for the readout.
    units: Units,
    /// Terminal size waiting for the resize debounce to elapse.
    pending_resize: Option<(u16, u16, Instant)>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let monitor = WeatherMonitor::new(config.location.clone());
        let units = config.units;
        Self {
            running: false,
            config,
            scene: Scene::new(Conditions::default(), Viewport::default()),
            scene_frame: SceneFrame::new(0, 0),
            monitor,
            conditions_override: None,
            units,
            pending_resize: None,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.monitor.start();

        let size = terminal.size()?;
        self.apply_size(size.width, size.height);

        while self.running {
            self.apply_pending_resize();
            self.sync_conditions();
            self.scene.advance(1);
            self.scene.render(&mut self.scene_frame);
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Size the scene to the terminal: one pixel per column, two per row.
    fn apply_size(&mut self, cols: u16, rows: u16) {
        let width = cols as usize;
        let height = rows as usize * 2;
        self.scene
            .resize(Viewport::new(width as f32, height as f32));
        self.scene_frame.resize(width, height);
    }

    /// Apply a resize once the debounce interval has elapsed, so a drag
    /// doesn't regenerate the particle fields on every intermediate size.
    fn apply_pending_resize(&mut self) {
        if let Some((cols, rows, at)) = self.pending_resize
            && at.elapsed() >= Duration::from_millis(self.config.resize_debounce_ms)
        {
            self.apply_size(cols, rows);
            self.pending_resize = None;
        }
    }

    /// Feed the scene its inputs: the keyboard override if one is active,
    /// otherwise the latest live weather, otherwise a clear day.
    fn sync_conditions(&mut self) {
        let desired = self.conditions_override.unwrap_or_else(|| {
            self.monitor
                .latest()
                .map(|s| s.conditions)
                .unwrap_or_default()
        });
        self.scene.set_conditions(desired);
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let backdrop = Rgba::opaque(
            self.config.backdrop[0],
            self.config.backdrop[1],
            self.config.backdrop[2],
        );
        frame.render_widget(SceneBlit::new(&self.scene_frame, backdrop), area);

        let chunks = Layout::vertical([
            Constraint::Fill(1),               // Top padding
            Constraint::Length(READOUT_HEIGHT), // Temperature readout
            Constraint::Fill(1),               // Bottom padding
            Constraint::Length(1),             // Help text
        ])
        .split(area);

        if let Some(snapshot) = self.monitor.latest() {
            let readout = Paragraph::new(readout_lines(&snapshot, self.units))
                .alignment(Alignment::Center);
            frame.render_widget(readout, chunks[1]);
        }

        let help = Line::from(vec![
            "q".bold().white(),
            " quit  ".dark_gray(),
            "d".bold().white(),
            " day/night  ".dark_gray(),
            "p".bold().white(),
            " precip  ".dark_gray(),
            "u".bold().white(),
            " units  ".dark_gray(),
            "w".bold().white(),
            " live weather".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[3]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Uses polling with timeout so the scene keeps animating.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(Duration::from_millis(self.config.tick_ms))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(cols, rows) => {
                    self.pending_resize = Some((cols, rows, Instant::now()));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('d')) => self.adjust(|c| c.is_day = !c.is_day),
            (_, KeyCode::Char('p')) => self.adjust(|c| c.precip = c.precip.next()),
            (_, KeyCode::Char('A')) => self.adjust(|c| c.precip_amount += 0.1),
            (_, KeyCode::Char('a')) => self.adjust(|c| c.precip_amount -= 0.1),
            (_, KeyCode::Char('O')) => self.adjust(|c| c.cloud_cover += 0.1),
            (_, KeyCode::Char('o')) => self.adjust(|c| c.cloud_cover -= 0.1),
            (_, KeyCode::Char('V')) => self.adjust(|c| c.wind += 0.1),
            (_, KeyCode::Char('v')) => self.adjust(|c| c.wind -= 0.1),
            (_, KeyCode::Char('u')) => self.units = self.units.toggle(),
            (_, KeyCode::Char('w')) => self.conditions_override = None,
            _ => {}
        }
    }

    /// Tweak the active conditions, switching to keyboard-override mode.
    fn adjust(&mut self, f: impl FnOnce(&mut Conditions)) {
        let mut conditions = self
            .conditions_override
            .unwrap_or_else(|| self.scene.conditions());
        f(&mut conditions);
        self.conditions_override = Some(conditions.clamped());
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
