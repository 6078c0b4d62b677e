use crate::performance::{Performance, Voice};
use crate::signal::Signal;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use std::sync::{Arc, Mutex};

use assert_no_alloc::*;

#[cfg(debug_assertions)] // required when disable_release is set (default)
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

pub struct AudioPlayer {
    pub device: Device,
    pub config: StreamConfig,
}

impl AudioPlayer {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("No output device available")?;

        let config = device.default_output_config()?.into();

        Ok(AudioPlayer { device, config })
    }
}

struct PlaybackState {
    performance: Option<Performance>,
    voice: Voice,
    signal: Signal,
}

impl PlaybackState {
    fn next_sample(&mut self) -> f32 {
        if let Some(perf) = &self.performance {
            if perf.finished(self.signal.elapsed()) {
                self.performance = None;
            }
        }
        let sample = match &self.performance {
            Some(perf) => self.voice.sample(perf, &self.signal),
            None => 0.0,
        };
        self.signal.advance();
        sample
    }
}

/// Plays performances through the default output device. One performance at
/// a time: requests made while one is in flight are ignored, and the flag
/// clears on the audio clock once the scheduled span has elapsed.
pub struct Player {
    state: Arc<Mutex<PlaybackState>>,
    _stream: Stream,
}

impl Player {
    pub fn new() -> Result<Player, Box<dyn std::error::Error>> {
        let player = AudioPlayer::new()?;
        let sample_rate = player.config.sample_rate.0 as usize;
        let channels = player.config.channels as usize;

        let state = Arc::new(Mutex::new(PlaybackState {
            performance: None,
            voice: Voice::new(0.25),
            signal: Signal::new(sample_rate),
        }));
        let callback_state = Arc::clone(&state);

        let stream = player.device.build_output_stream(
            &player.config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let mut state = callback_state.lock().unwrap();
                for frame in data.chunks_mut(channels) {
                    let sample = assert_no_alloc(|| state.next_sample().clamp(-1., 1.));
                    for channel_sample in frame.iter_mut() {
                        *channel_sample = sample;
                    }
                }
            },
            |err| log::error!("audio stream error: {}", err),
            None,
        )?;

        stream.play()?;

        Ok(Player {
            state,
            _stream: stream,
        })
    }

    /// Returns false when the request was ignored because a performance is
    /// still in flight.
    pub fn play(&self, performance: Performance) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.performance.is_some() {
            log::debug!("play request ignored, still sounding");
            return false;
        }
        state.signal.reset();
        state.performance = Some(performance);
        true
    }

    pub fn playing(&self) -> bool {
        self.state.lock().unwrap().performance.is_some()
    }
}
