//! strum - terminal plucked-string synthesizer
//!
//! Run with: cargo run --bin strum
//! Set RUST_LOG=debug to log control traffic (it will draw over the TUI).

mod app;
mod ui;

use app::Strum;
use plucked::synth::Allocation;
use simple_logger::SimpleLogger;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    SimpleLogger::new()
        .with_level(log::LevelFilter::Off)
        .env()
        .init()?;

    let mut strum = Strum::new();
    for arg in std::env::args().skip(1) {
        strum = match arg.as_str() {
            "--per-string" => strum.allocation(Allocation::PerString),
            other => match other.strip_prefix("--voices=") {
                Some(n) => strum.voices(n.parse()?),
                None => color_eyre::eyre::bail!("unknown argument `{other}`"),
            },
        };
    }

    strum.run()
}
