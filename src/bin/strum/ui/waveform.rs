//! Waveform oscilloscope widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Samples shown per frame; the rest of the buffer is search room for the trigger
const WINDOW: usize = 1024;

/// Start of the window: the last rising zero crossing that still leaves a full
/// window after it, so a ringing string holds still on screen.
fn trigger_index(buffer: &[f32]) -> usize {
    let last_start = buffer.len().saturating_sub(WINDOW);
    (1..=last_start)
        .rev()
        .find(|&i| buffer[i - 1] < 0.0 && buffer[i] >= 0.0)
        .unwrap_or(last_start)
}

/// Render the oscilloscope, scaled to the loudest sample shown
pub fn render_waveform(frame: &mut Frame, area: Rect, audio_buffer: &[f32]) {
    let start = trigger_index(audio_buffer);
    let shown = &audio_buffer[start..(start + WINDOW).min(audio_buffer.len())];

    let data: Vec<(f64, f64)> = shown
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64 / WINDOW as f64, sample as f64))
        .collect();

    // keep quiet tails visible
    let range = shown
        .iter()
        .fold(0.0f32, |acc, &x| acc.max(x.abs()))
        .clamp(0.05, 1.0) as f64;

    let chart = Chart::new(vec![Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data)])
    .block(Block::default().title(" Scope ").borders(Borders::ALL))
    .x_axis(Axis::default().bounds([0.0, 1.0]))
    .y_axis(
        Axis::default()
            .bounds([-range, range])
            .style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(chart, area);
}
