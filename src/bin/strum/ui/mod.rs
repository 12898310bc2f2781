//! TUI module for strum
//!
//! Keyboard-driven plucking and parameter control, with live views of the
//! strings, the output waveform and its spectrum.

mod controls;
mod spectrum;
pub mod state;
mod strings;
mod waveform;

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

use plucked::synth::{SynthHandle, SynthParams};

pub use state::{UiStateInit, UiStateUpdate};

use controls::{render_controls, AudioStats, Control};
use spectrum::{render_spectrum, SpectrumAnalyzer};
use strings::{render_strings, STRING_KEYS};
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 2048;

/// Pitch shift range in octaves
const PITCH_RANGE: (f32, f32) = (-0.5, 1.5);

/// UI application state
pub struct UiApp {
    /// Control end of the engine channel
    handle: SynthHandle,
    /// Ring buffer receiver for audio samples
    audio_rx: Consumer<f32>,
    /// Ring buffer receiver for UI state updates
    state_rx: Consumer<UiStateUpdate>,
    static_state: UiStateInit,
    /// Current UI state (latest received)
    current_state: UiStateUpdate,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    selected: usize,
    /// Pitch shift in octaves applied to the base tuning
    pitch: f32,
    /// Amplitude of keyboard plucks
    strength: f32,
    /// Last error from the handle, shown in the help bar
    status: Option<String>,
    /// Whether the app should quit
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        handle: SynthHandle,
        audio_rx: Consumer<f32>,
        state_rx: Consumer<UiStateUpdate>,
        static_state: UiStateInit,
    ) -> Self {
        Self {
            handle,
            audio_rx,
            state_rx,
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, static_state.sample_rate),
            static_state,
            current_state: UiStateUpdate::default(),
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            selected: 0,
            pitch: 0.0,
            strength: 0.8,
            status: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_state();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Poll for new audio samples, keeping the last VIS_BUFFER_SIZE
    fn poll_audio(&mut self) {
        let available = self.audio_rx.slots();
        if available == 0 {
            return;
        }

        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
        self.spectrum.update(&self.audio_buffer);
    }

    /// Keep only the latest state
    fn poll_state(&mut self) {
        while let Ok(state) = self.state_rx.pop() {
            self.current_state = state;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                for string in 0..self.handle.params().tuning.len() {
                    self.pluck(string);
                }
            }
            KeyCode::Char(c) => {
                if let Some(string) = STRING_KEYS.iter().position(|&k| k == c) {
                    self.pluck(string);
                }
            }
            KeyCode::Up => {
                self.selected = (self.selected + Control::ALL.len() - 1) % Control::ALL.len();
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % Control::ALL.len();
            }
            KeyCode::Left => self.adjust(-1.0),
            KeyCode::Right => self.adjust(1.0),
            _ => {}
        }
    }

    fn pluck(&mut self, string: usize) {
        if string >= self.handle.params().tuning.len() {
            return;
        }
        let result = self.handle.pluck(string, self.strength);
        self.report(result);
    }

    /// Step the selected control one notch in `direction` (+1 or -1)
    fn adjust(&mut self, direction: f32) {
        let mut params = *self.handle.params();

        match Control::ALL[self.selected] {
            Control::Voices => {
                let voices = params.voices as i64 + direction as i64;
                params.voices = voices.clamp(1, self.static_state.max_voices as i64) as usize;
            }
            Control::Brightness => {
                params.brightness = (params.brightness + 0.05 * direction).clamp(0.0, 1.0);
            }
            Control::Decay => {
                params.decay = (params.decay * 1.25f32.powf(direction)).clamp(0.1, 30.0);
            }
            Control::Position => {
                params.position = (params.position + 0.05 * direction).clamp(0.0, 1.0);
            }
            Control::Pitch => {
                self.pitch = (self.pitch + direction / 12.0).clamp(PITCH_RANGE.0, PITCH_RANGE.1);
                params.tuning = self.static_state.base_tuning.transposed(self.pitch);
            }
            Control::Strength => {
                self.strength = (self.strength + 0.1 * direction).clamp(0.1, 1.0);
                return;
            }
        }

        self.send_params(params);
    }

    fn send_params(&mut self, params: SynthParams) {
        let result = self.handle.set_params(params);
        self.report(result);
    }

    fn report(&mut self, result: plucked::Result<()>) {
        self.status = result.err().map(|err| err.to_string());
    }

    fn control_values(&self) -> Vec<(Control, String)> {
        let params = self.handle.params();
        Control::ALL
            .iter()
            .map(|&control| {
                let value = match control {
                    Control::Voices => format!("{}", params.voices),
                    Control::Brightness => format!("{:.2}", params.brightness),
                    Control::Decay => format!("{:.2}s", params.decay),
                    Control::Position => format!("{:.2}", params.position),
                    Control::Pitch => format!("{:+.0}st", self.pitch * 12.0),
                    Control::Strength => format!("{:.1}", self.strength),
                };
                (control, value)
            })
            .collect()
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Controls
                Constraint::Min(6),     // Strings
                Constraint::Length(8),  // Waveform
                Constraint::Length(10), // Spectrum
                Constraint::Length(1),  // Help bar
            ])
            .split(area);

        let audio_stats = AudioStats::from_buffer(&self.audio_buffer);
        render_controls(
            frame,
            chunks[0],
            &self.control_values(),
            Control::ALL[self.selected],
            &self.static_state,
            &self.current_state,
            &audio_stats,
        );

        let strings_block = Block::default()
            .title(format!(" Strings ({:?}) ", self.static_state.allocation))
            .borders(Borders::ALL);
        let strings_inner = strings_block.inner(chunks[1]);
        frame.render_widget(strings_block, chunks[1]);
        render_strings(
            frame,
            strings_inner,
            &self.handle.params().tuning,
            &self.current_state,
        );

        render_waveform(frame, chunks[2], &self.audio_buffer);
        render_spectrum(frame, chunks[3], self.spectrum.data());

        let help = match &self.status {
            Some(err) => Paragraph::new(format!(" {err}")).style(Style::default().fg(Color::Red)),
            None => Paragraph::new(
                " [1-0 - =] Pluck  [Space] Strum  [Up/Down] Select  [Left/Right] Adjust  [Q] Quit",
            )
            .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(help, chunks[4]);
    }
}
