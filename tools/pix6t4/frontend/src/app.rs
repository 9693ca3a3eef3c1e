use std::collections::HashMap;
use pix6t4_core::{Button, Console};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Flex, Layout};
use ratatui::style::{Color, Style, Stylize};
use ratatui::symbols::border;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use tracing::{error, info};
use crate::matrix::{MatrixScreen, BACKGROUND, MATRIX_HEIGHT, MATRIX_WIDTH};

const HELP: &str = "arrows/wasd move  space A  b B  x X  y Y  enter START  esc SELECT  q quit";

/// The emulator front panel: keyboard in, LED matrix out.
pub struct Emulator {
    console: Console<MatrixScreen>,
    input_bindings: HashMap<KeyCode, Button>,
    /// Without key release reporting every press is released after the next tick.
    key_releases: bool,
    pending_releases: Vec<Button>,
    last_error: Option<String>,
    quit: bool,
}

impl Emulator {
    pub fn new(console: Console<MatrixScreen>, key_releases: bool) -> Self {
        Self {
            console,
            input_bindings: input_bindings(),
            key_releases,
            pending_releases: Vec::new(),
            last_error: None,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn console(&self) -> &Console<MatrixScreen> {
        &self.console
    }

    pub fn handle_event(&mut self, event: &Event) {
        if let Event::Key(key) = event {
            self.handle_key(*key);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let quit = key.code == KeyCode::Char('q')
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL));
        if quit && key.kind == KeyEventKind::Press {
            info!("quit requested");
            self.quit = true;
            return;
        }

        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            code => code,
        };
        let Some(&button) = self.input_bindings.get(&code) else {
            return;
        };

        let result = match key.kind {
            KeyEventKind::Press => {
                if !self.key_releases {
                    self.pending_releases.push(button);
                }
                self.console.button_pressed(button)
            }
            KeyEventKind::Release => self.console.button_released(button),
            KeyEventKind::Repeat => Ok(()),
        };
        self.report(result);
    }

    pub fn tick(&mut self) {
        let result = self.console.tick();
        self.report(result);

        for button in std::mem::take(&mut self.pending_releases) {
            let result = self.console.button_released(button);
            self.report(result);
        }
    }

    fn report(&mut self, result: Result<(), pix6t4_core::Error>) {
        if let Err(e) = result {
            error!("console: {e}");
            self.last_error = Some(e.to_string());
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let [title, body, status, help] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(MATRIX_HEIGHT + 2),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(
            Line::from(" PIX6T4 Color ").bold().alignment(Alignment::Center),
            title,
        );

        let [board] = Layout::horizontal([Constraint::Length(MATRIX_WIDTH + 2)])
            .flex(Flex::Center)
            .areas(body);
        let [board] = Layout::vertical([Constraint::Length(MATRIX_HEIGHT + 2)])
            .flex(Flex::Center)
            .areas(board);
        let block = Block::bordered()
            .border_set(border::ROUNDED)
            .style(Style::default().bg(BACKGROUND).fg(Color::Gray));
        let inner = block.inner(board);
        frame.render_widget(block, board);
        frame.render_widget(self.console.display().widget(), inner);

        frame.render_widget(
            Paragraph::new(self.status_line()).alignment(Alignment::Center),
            status,
        );
        frame.render_widget(
            Paragraph::new(HELP).alignment(Alignment::Center).dark_gray(),
            help,
        );
    }

    fn status_line(&self) -> String {
        let device = self.console.device();
        let game = self.console.current_game().map_or("no games", |g| g.name());
        let state = if self.console.is_running() { "playing" } else { "title" };
        let sound = if device.sound_enabled() { "on" } else { "off" };
        let mut line = format!(
            "{game} {}/{} ({state})  brightness {:.0}%  sound {sound}",
            self.console.current_index() + 1,
            self.console.game_count(),
            device.brightness() * 100.0
        );
        if let Some(e) = &self.last_error {
            line.push_str("  last error: ");
            line.push_str(e);
        }
        line
    }
}

/// Keyboard layout of the emulator.
pub fn input_bindings() -> HashMap<KeyCode, Button> {
    HashMap::from([
        (KeyCode::Esc, Button::Select),
        (KeyCode::Enter, Button::Start),
        (KeyCode::Up, Button::Up),
        (KeyCode::Down, Button::Down),
        (KeyCode::Left, Button::Left),
        (KeyCode::Right, Button::Right),
        (KeyCode::Char('w'), Button::Up),
        (KeyCode::Char('s'), Button::Down),
        (KeyCode::Char('a'), Button::Left),
        (KeyCode::Char('d'), Button::Right),
        (KeyCode::Char('y'), Button::Y),
        (KeyCode::Char('b'), Button::B),
        (KeyCode::Backspace, Button::B),
        (KeyCode::Char('x'), Button::X),
        (KeyCode::Char(' '), Button::A),
    ])
}
