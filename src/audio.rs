//! Audio system using Web Audio API
//!
//! Procedurally generated beeps and a looping background melody. Audio is
//! fire-and-forget: every Web Audio failure is logged and dropped, and nothing
//! here can reach back into the simulation.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Food eaten
    Eat,
    /// Self-collision
    Death,
    /// Score milestone reached
    Celebration,
}

/// One scheduled beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub frequency: f32,
    /// Seconds
    pub duration: f64,
    /// Seconds after the effect starts
    pub delay: f64,
}

const fn note(frequency: f32, duration: f64, delay: f64) -> Note {
    Note {
        frequency,
        duration,
        delay,
    }
}

const EAT_NOTES: [Note; 1] = [note(800.0, 0.1, 0.0)];
const DEATH_NOTES: [Note; 1] = [note(200.0, 0.5, 0.0)];
const CELEBRATION_NOTES: [Note; 4] = [
    note(523.0, 0.2, 0.0),
    note(659.0, 0.2, 0.2),
    note(784.0, 0.2, 0.4),
    note(1047.0, 0.3, 0.6),
];

impl SoundEffect {
    /// Effect for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::AteFood { .. } => Some(SoundEffect::Eat),
            GameEvent::Collided { .. } => Some(SoundEffect::Death),
            GameEvent::Milestone { .. } => Some(SoundEffect::Celebration),
            _ => None,
        }
    }

    pub fn notes(&self) -> &'static [Note] {
        match self {
            SoundEffect::Eat => &EAT_NOTES,
            SoundEffect::Death => &DEATH_NOTES,
            SoundEffect::Celebration => &CELEBRATION_NOTES,
        }
    }
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// Audio theme (selectable voice for effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AudioTheme {
    #[default]
    Default,
    Arcade,
    Chill,
}

impl AudioTheme {
    pub const ALL: [AudioTheme; 3] = [AudioTheme::Default, AudioTheme::Arcade, AudioTheme::Chill];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioTheme::Default => "default",
            AudioTheme::Arcade => "arcade",
            AudioTheme::Chill => "chill",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" => Some(AudioTheme::Default),
            "arcade" | "retro" => Some(AudioTheme::Arcade),
            "chill" => Some(AudioTheme::Chill),
            _ => None,
        }
    }

    pub fn waveform(&self) -> Waveform {
        match self {
            AudioTheme::Default => Waveform::Sine,
            AudioTheme::Arcade => Waveform::Square,
            AudioTheme::Chill => Waveform::Triangle,
        }
    }
}

/// C major scale, one note per step
pub const MELODY: [f32; 8] = [
    261.63, 293.66, 329.63, 349.23, 392.00, 440.00, 493.88, 523.25,
];
/// Milliseconds per melody note
pub const MELODY_STEP_MS: f64 = 800.0;

/// Tracks which melody note should be sounding
#[derive(Debug, Clone, Default)]
pub struct MelodyClock {
    started_ms: Option<f64>,
    last_step: Option<u64>,
}

impl MelodyClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.started_ms.is_some()
    }

    pub fn start(&mut self, now_ms: f64) {
        self.started_ms = Some(now_ms);
        self.last_step = None;
    }

    pub fn stop(&mut self) {
        self.started_ms = None;
        self.last_step = None;
    }

    /// New note frequency if the melody moved on since the last call
    pub fn update(&mut self, now_ms: f64) -> Option<f32> {
        let started = self.started_ms?;
        let step = ((now_ms - started).max(0.0) / MELODY_STEP_MS) as u64;
        if self.last_step == Some(step) {
            return None;
        }
        self.last_step = Some(step);
        Some(MELODY[(step % MELODY.len() as u64) as usize])
    }
}

/// Effect gain at full volume
const EFFECT_GAIN: f32 = 0.3;
/// Melody gain at full volume
const MUSIC_GAIN: f32 = 0.1;
/// Envelope floor (exponential ramps cannot reach zero)
#[cfg(target_arch = "wasm32")]
const GAIN_FLOOR: f32 = 0.01;

/// Shared volume/mute bookkeeping for both backends
#[derive(Debug, Clone, Copy)]
struct Mix {
    volume: f32,
    muted: bool,
    theme: AudioTheme,
}

impl Mix {
    fn effect_gain(&self) -> f32 {
        if self.muted { 0.0 } else { EFFECT_GAIN * self.volume }
    }

    fn music_gain(&self) -> f32 {
        if self.muted { 0.0 } else { MUSIC_GAIN * self.volume }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::*;

    fn oscillator_type(waveform: Waveform) -> OscillatorType {
        match waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Triangle => OscillatorType::Triangle,
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        mix: Mix,
        music: Option<(OscillatorNode, GainNode)>,
        melody: MelodyClock,
    }

    impl AudioManager {
        pub fn new(volume: f32, muted: bool, theme: AudioTheme) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                mix: Mix {
                    volume: volume.clamp(0.0, 1.0),
                    muted,
                    theme,
                },
                music: None,
                melody: MelodyClock::new(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                if ctx.state() == web_sys::AudioContextState::Suspended {
                    if ctx.resume().is_err() {
                        log::warn!("AudioContext resume failed");
                    }
                }
            }
        }

        pub fn set_volume(&mut self, volume: f32) {
            self.mix.volume = volume.clamp(0.0, 1.0);
            self.apply_music_gain();
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.mix.muted = muted;
            if muted {
                self.stop_music();
            }
        }

        /// Flip mute; returns the new state
        pub fn toggle_mute(&mut self) -> bool {
            self.set_muted(!self.mix.muted);
            self.mix.muted
        }

        pub fn set_theme(&mut self, theme: AudioTheme) {
            self.mix.theme = theme;
        }

        /// Play the effect for a simulation event, if any
        pub fn handle(&self, event: &GameEvent) {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.play(effect);
            }
        }

        pub fn play(&self, effect: SoundEffect) {
            let gain = self.mix.effect_gain();
            if gain <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            self.resume();

            let waveform = oscillator_type(self.mix.theme.waveform());
            for note in effect.notes() {
                if self.beep(ctx, note, gain, waveform).is_none() {
                    log::warn!("Dropped {:?} note at {} Hz", effect, note.frequency);
                }
            }
        }

        fn beep(
            &self,
            ctx: &AudioContext,
            note: &Note,
            gain: f32,
            waveform: OscillatorType,
        ) -> Option<()> {
            let osc = ctx.create_oscillator().ok()?;
            let amp = ctx.create_gain().ok()?;
            osc.set_type(waveform);
            osc.frequency().set_value(note.frequency);
            osc.connect_with_audio_node(&amp).ok()?;
            amp.connect_with_audio_node(&ctx.destination()).ok()?;

            let t = ctx.current_time() + note.delay;
            amp.gain().set_value_at_time(gain, t).ok()?;
            amp.gain()
                .exponential_ramp_to_value_at_time(GAIN_FLOOR, t + note.duration)
                .ok()?;
            osc.start_with_when(t).ok()?;
            osc.stop_with_when(t + note.duration).ok()?;
            Some(())
        }

        /// Keep the melody in step with the game: plays only while `running`
        pub fn update_music(&mut self, running: bool, now_ms: f64) {
            let wanted = running && !self.mix.muted;
            if !wanted {
                self.stop_music();
                return;
            }
            if !self.melody.is_playing() {
                self.start_music(now_ms);
            }
            if let Some(freq) = self.melody.update(now_ms) {
                if let (Some(ctx), Some((osc, _))) = (&self.ctx, &self.music) {
                    osc.frequency()
                        .set_value_at_time(freq, ctx.current_time())
                        .ok();
                }
            }
        }

        fn start_music(&mut self, now_ms: f64) {
            self.melody.start(now_ms);
            let Some(ctx) = &self.ctx else { return };
            let nodes = (|| {
                let osc = ctx.create_oscillator().ok()?;
                let amp = ctx.create_gain().ok()?;
                osc.set_type(OscillatorType::Triangle);
                osc.connect_with_audio_node(&amp).ok()?;
                amp.connect_with_audio_node(&ctx.destination()).ok()?;
                amp.gain().set_value(self.mix.music_gain());
                osc.start().ok()?;
                Some((osc, amp))
            })();
            if nodes.is_none() {
                log::warn!("Background melody unavailable");
            }
            self.music = nodes;
        }

        pub fn stop_music(&mut self) {
            self.melody.stop();
            if let Some((osc, _)) = self.music.take() {
                osc.stop().ok();
            }
        }

        fn apply_music_gain(&self) {
            if let Some((_, amp)) = &self.music {
                amp.gain().set_value(self.mix.music_gain());
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use super::*;

    /// Silent stand-in with the same API; logs effects instead of playing them
    pub struct AudioManager {
        mix: Mix,
        melody: MelodyClock,
    }

    impl AudioManager {
        pub fn new(volume: f32, muted: bool, theme: AudioTheme) -> Self {
            Self {
                mix: Mix {
                    volume: volume.clamp(0.0, 1.0),
                    muted,
                    theme,
                },
                melody: MelodyClock::new(),
            }
        }

        pub fn resume(&self) {}

        pub fn set_volume(&mut self, volume: f32) {
            self.mix.volume = volume.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.mix.muted = muted;
            if muted {
                self.stop_music();
            }
        }

        pub fn toggle_mute(&mut self) -> bool {
            self.set_muted(!self.mix.muted);
            self.mix.muted
        }

        pub fn set_theme(&mut self, theme: AudioTheme) {
            self.mix.theme = theme;
        }

        pub fn handle(&self, event: &GameEvent) {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.play(effect);
            }
        }

        pub fn play(&self, effect: SoundEffect) {
            if self.mix.effect_gain() > 0.0 {
                log::debug!("[audio] {:?} ({:?})", effect, self.mix.theme.waveform());
            }
        }

        pub fn update_music(&mut self, running: bool, now_ms: f64) {
            if !running || self.mix.muted {
                self.stop_music();
                return;
            }
            if !self.melody.is_playing() {
                self.melody.start(now_ms);
            }
            if let Some(freq) = self.melody.update(now_ms) {
                log::trace!("[audio] melody {:.2} Hz at gain {:.3}", freq, self.mix.music_gain());
            }
        }

        pub fn stop_music(&mut self) {
            self.melody.stop();
        }

        pub fn is_music_playing(&self) -> bool {
            self.melody.is_playing()
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(not(target_arch = "wasm32"))]
pub use headless::AudioManager;
