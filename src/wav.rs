use crate::Signal;
use crate::performance::{Performance, Voice};

pub fn save_wav(
    mut synth: impl FnMut(&mut Signal) -> f32,
    filename: &str,
    duration_seconds: f32,
    sample_rate: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: sample_rate as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(filename, spec)?;
    let mut signal = Signal::new(sample_rate);
    let total_samples = (duration_seconds * sample_rate as f32) as usize;

    for _ in 0..total_samples {
        let sample = synth(&mut signal).clamp(-1., 1.);
        writer.write_sample((sample * i16::MAX as f32) as i16)?;
        signal.advance();
    }

    writer.finalize()?;
    Ok(())
}

/// Bounces a performance to disk with the same voice used live.
pub fn render_performance(
    performance: &Performance,
    filename: &str,
    sample_rate: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut voice = Voice::new(0.25);
    let performance = performance.clone();
    let duration = performance.total();
    save_wav(
        move |signal| voice.sample(&performance, signal),
        filename,
        duration,
        sample_rate,
    )
}
