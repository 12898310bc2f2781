//! Strum - audio setup and the realtime callback

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use plucked::{
    synth::{channel, Allocation, SynthParams},
    EngineConfig, Tuning, MAX_BLOCK_SIZE, MAX_STRINGS,
};

use super::ui::{UiApp, UiStateInit, UiStateUpdate};

/// Samples kept in flight for the oscilloscope and spectrum
const VIS_RING_SIZE: usize = 8192;

/// Main application builder
pub struct Strum {
    config: EngineConfig,
    params: SynthParams,
}

impl Strum {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            params: SynthParams {
                tuning: Tuning::split_guitar(),
                ..SynthParams::default()
            },
        }
    }

    /// Polyphony budget for the pooled allocator
    pub fn voices(mut self, voices: usize) -> Self {
        self.params.voices = voices;
        self
    }

    pub fn allocation(mut self, allocation: Allocation) -> Self {
        self.config.allocation = allocation;
        self
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(mut self) -> EyreResult<()> {
        // Set up audio
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        self.config.sample_rate = sample_rate;
        log::info!("output: {sample_rate} Hz, {channels} channels");

        let (mut handle, mut engine) = channel(&self.config);
        handle
            .set_params(self.params)
            .wrap_err("initial parameters rejected")?;

        let (mut audio_tx, audio_rx) = RingBuffer::<f32>::new(VIS_RING_SIZE);
        let (mut state_tx, state_rx) = RingBuffer::<UiStateUpdate>::new(64);

        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    engine.render_block(block);

                    // Copy to output (mono to all channels)
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                        // visualization is best-effort; drop samples when the UI lags
                        let _ = audio_tx.push(s);
                    }

                    frames_written += frames_to_render;
                }

                let mut update = UiStateUpdate::default();
                for string in engine.pool().strings() {
                    if string < MAX_STRINGS {
                        update.sounding[string] = true;
                    }
                    update.voices += 1;
                }
                let _ = state_tx.push(update);
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )?;

        stream.play()?;

        let init = UiStateInit {
            sample_rate,
            max_voices: handle.max_voices(),
            allocation: self.config.allocation,
            base_tuning: self.params.tuning,
        };

        let mut terminal = ratatui::init();
        let result = UiApp::new(handle, audio_rx, state_rx, init).run(&mut terminal);
        ratatui::restore();
        drop(stream);

        result
    }
}

impl Default for Strum {
    fn default() -> Self {
        Self::new()
    }
}
