//! String panel - one row per string with its key, pitch and activity

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use plucked::Tuning;

use super::UiStateUpdate;

/// Keys that pluck strings, in string order
pub const STRING_KEYS: [char; 12] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0', '-', '='];

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Nearest equal-tempered note, e.g. `A2 +3`
fn note_name(freq: f32) -> String {
    let midi = 69.0 + 12.0 * (freq / 440.0).log2();
    let nearest = midi.round();
    let cents = ((midi - nearest) * 100.0).round() as i32;
    let note = nearest as i32;
    let name = NOTE_NAMES[note.rem_euclid(12) as usize];
    let octave = note.div_euclid(12) - 1;
    if cents == 0 {
        format!("{name}{octave}")
    } else {
        format!("{name}{octave} {cents:+}")
    }
}

/// Render every string of `tuning`, highlighting the ones holding a voice
pub fn render_strings(frame: &mut Frame, area: Rect, tuning: &Tuning, state: &UiStateUpdate) {
    if area.height < 1 || area.width < 24 {
        return;
    }

    let max_freq = tuning.iter().fold(1.0f32, f32::max);
    let bar_width = area.width.saturating_sub(30) as f32;

    let lines: Vec<Line> = tuning
        .iter()
        .enumerate()
        .take(area.height as usize)
        .map(|(i, freq)| {
            let sounding = state.sounding.get(i).copied().unwrap_or(false);
            let key = STRING_KEYS.get(i).copied().unwrap_or(' ');
            let color = if sounding { Color::Green } else { Color::DarkGray };

            // longer bar for lower strings, like a fretboard seen from the nut
            let len = ((max_freq / freq).log2() / 3.0 * bar_width).clamp(1.0, bar_width) as usize;

            Line::from(vec![
                Span::styled(format!(" [{key}] "), Style::default().fg(Color::White)),
                Span::styled(
                    format!("{:>8.2} Hz {:<8}", freq, note_name(freq)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    if sounding { "━".repeat(len) } else { "─".repeat(len) },
                    Style::default().fg(color),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
