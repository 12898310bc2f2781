//! Control bar - synth parameters, selection cursor and audio stats

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{UiStateInit, UiStateUpdate};

/// A user-adjustable setting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Voices,
    Brightness,
    Decay,
    Position,
    Pitch,
    Strength,
}

impl Control {
    pub const ALL: [Control; 6] = [
        Control::Voices,
        Control::Brightness,
        Control::Decay,
        Control::Position,
        Control::Pitch,
        Control::Strength,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Control::Voices => "Voices",
            Control::Brightness => "Bright",
            Control::Decay => "Decay",
            Control::Position => "Pos",
            Control::Pitch => "Pitch",
            Control::Strength => "Pluck",
        }
    }
}

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Render the control bar. `values` pairs each control with its display text.
pub fn render_controls(
    frame: &mut Frame,
    area: Rect,
    values: &[(Control, String)],
    selected: Control,
    static_state: &UiStateInit,
    dynamic_state: &UiStateUpdate,
    audio_stats: &AudioStats,
) {
    let block = Block::default().title(" strum ").borders(Borders::ALL);

    let mut spans = Vec::with_capacity(values.len() + 3);
    for (control, value) in values {
        let style = if *control == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(format!(" {}: {} ", control.label(), value), style));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::styled(
        format!(
            " {} voices  {:.1}kHz  ",
            dynamic_state.voices,
            static_state.sample_rate / 1000.0
        ),
        Style::default().fg(Color::DarkGray),
    ));
    spans.push(Span::styled(
        format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
        Style::default().fg(Color::Magenta),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
