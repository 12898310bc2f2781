//! Spectrum analyzer widget
//!
//! Windowed FFT of the most recent output, sampled at log-spaced
//! frequencies so the string fundamentals and their first partials get
//! most of the width.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Number of points on the spectrum curve
const SPECTRUM_POINTS: usize = 96;
const MIN_DISPLAY_HZ: f32 = 40.0;
const MAX_DISPLAY_HZ: f32 = 8_000.0;
const FLOOR_DB: f64 = -100.0;

pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f32>,
    /// FFT bin for each display point
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (log10 frequency, magnitude dB) per display point
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    /// `buffer_len` must match the length later passed to `update`.
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(buffer_len);

        let denom = buffer_len.saturating_sub(1).max(1) as f32;
        let window = (0..buffer_len)
            .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos()))
            .collect();

        let max_hz = MAX_DISPLAY_HZ.min(sample_rate / 2.0).max(MIN_DISPLAY_HZ * 2.0);
        let ratio = max_hz / MIN_DISPLAY_HZ;
        let last_bin = (buffer_len / 2).saturating_sub(1);

        let mut bin_indices = Vec::with_capacity(SPECTRUM_POINTS);
        let mut spectrum = Vec::with_capacity(SPECTRUM_POINTS);
        for i in 0..SPECTRUM_POINTS {
            let t = i as f32 / (SPECTRUM_POINTS - 1) as f32;
            let freq = MIN_DISPLAY_HZ * ratio.powf(t);
            let bin = (freq * buffer_len as f32 / sample_rate).round() as usize;
            bin_indices.push(bin.min(last_bin));
            spectrum.push((freq.log10() as f64, FLOOR_DB));
        }

        Self {
            window,
            bin_indices,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            spectrum,
        }
    }

    /// Recompute from `buffer`; ignored if its length does not match.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((bin, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *bin = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        let norm = 2.0 / self.window.len() as f32;
        for (point, &idx) in self.spectrum.iter_mut().zip(&self.bin_indices) {
            let magnitude = (self.scratch[idx].norm() * norm).max(1e-6);
            point.1 = (20.0 * magnitude.log10() as f64).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

/// Render the spectrum analyzer widget
pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let lo = spectrum.first().map_or(1.0, |p| p.0);
    let hi = spectrum.last().map_or(4.0, |p| p.0).max(lo + 0.1);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([lo, hi])
                .labels(vec![
                    format!("{:.0}", 10f64.powf(lo)),
                    format!("{:.0}", 10f64.powf((lo + hi) / 2.0)),
                    format!("{:.0}k", 10f64.powf(hi) / 1000.0),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 0.0])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
