//! Music cue tables, the background-melody sequencer and cue synthesis.
//!
//! Cues are rendered to mono `f32` samples at [`SAMPLE_RATE`]; a frontend
//! with an output device plays them. A frequency of 0 is a rest.

use std::f64::consts::TAU;
use std::time::Duration;

/// Sample rate of every rendered cue.
pub const SAMPLE_RATE: u32 = 44_100;

/// Peak gain of background melody notes.
const MELODY_GAIN: f64 = 0.05;
/// Peak gain of the correct-answer cheer.
const CHEER_GAIN: f64 = 0.3;
/// Peak gain of each fanfare note.
const FANFARE_GAIN: f64 = 0.5;
/// Gain every envelope decays to.
const FADE_FLOOR: f64 = 0.01;
/// Melody notes reach the floor this long before they end.
const NOTE_RELEASE_S: f64 = 0.05;
/// Fanfare notes swell to full gain over this long.
const FANFARE_ATTACK_S: f64 = 0.05;

/// A note (or rest) of the background melody.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Pitch in Hz; 0 for a rest.
    pub freq_hz: f64,
    /// Length in seconds.
    pub duration_s: f64,
}

impl Note {
    const fn tone(freq_hz: f64, duration_s: f64) -> Self {
        Self { freq_hz, duration_s }
    }

    const fn rest(duration_s: f64) -> Self {
        Self {
            freq_hz: 0.0,
            duration_s,
        }
    }

    /// Whether this entry is silent.
    #[must_use]
    pub fn is_rest(&self) -> bool {
        self.freq_hz <= 0.0
    }

    /// Length as a [`Duration`].
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_s)
    }
}

/// Circus-march background melody, looped while playing.
pub const MELODY: [Note; 22] = [
    Note::tone(261.63, 0.2), // C4
    Note::rest(0.1),
    Note::tone(293.66, 0.2), // D4
    Note::rest(0.1),
    Note::tone(329.63, 0.2), // E4
    Note::rest(0.1),
    Note::tone(349.23, 0.2), // F4
    Note::rest(0.1),
    Note::tone(392.00, 0.4), // G4
    Note::rest(0.1),
    Note::tone(392.00, 0.4), // G4
    Note::rest(0.1),
    Note::tone(440.00, 0.2), // A4
    Note::rest(0.1),
    Note::tone(392.00, 0.2), // G4
    Note::rest(0.1),
    Note::tone(349.23, 0.2), // F4
    Note::rest(0.1),
    Note::tone(329.63, 0.2), // E4
    Note::rest(0.1),
    Note::tone(293.66, 0.4), // D4
    Note::rest(0.1),
];

/// A note of the victory fanfare, offset from the moment of victory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanfareNote {
    /// Pitch in Hz.
    pub freq_hz: f64,
    /// Start offset in seconds.
    pub start_s: f64,
    /// Length in seconds.
    pub duration_s: f64,
}

/// C-major arpeggio played when a player wins.
pub const FANFARE: [FanfareNote; 4] = [
    FanfareNote {
        freq_hz: 523.25,
        start_s: 0.0,
        duration_s: 0.15,
    },
    FanfareNote {
        freq_hz: 659.25,
        start_s: 0.15,
        duration_s: 0.15,
    },
    FanfareNote {
        freq_hz: 783.99,
        start_s: 0.3,
        duration_s: 0.3,
    },
    FanfareNote {
        freq_hz: 1046.50,
        start_s: 0.6,
        duration_s: 1.5,
    },
];

/// Time from the first fanfare note until the last one ends.
#[must_use]
pub fn fanfare_length() -> Duration {
    let end = FANFARE
        .iter()
        .map(|n| n.start_s + n.duration_s)
        .fold(0.0, f64::max);
    Duration::from_secs_f64(end)
}

/// A tone that glides from one pitch to another, then holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    /// Starting pitch in Hz.
    pub from_hz: f64,
    /// Pitch reached at the end of the glide.
    pub to_hz: f64,
    /// Length of the glide in seconds.
    pub glide_s: f64,
    /// Total length in seconds.
    pub duration_s: f64,
}

impl Sweep {
    /// Pitch `t` seconds in. The glide is exponential, so it rises evenly in
    /// musical steps.
    #[must_use]
    pub fn freq_at(&self, t: f64) -> f64 {
        xerp(self.from_hz, self.to_hz, t / self.glide_s)
    }
}

/// The rising "ding" for a correct answer, C5 up to C6.
pub const CHEER: Sweep = Sweep {
    from_hz: 523.25,
    to_hz: 1046.5,
    glide_s: 0.1,
    duration_s: 0.5,
};

/// Oscillator shapes used by the cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Waveform {
    Sine,
    Square,
    Triangle,
}

impl Waveform {
    /// Value at `phase` in `[0, 1)`, within `[-1, 1]`.
    fn sample(self, phase: f64) -> f64 {
        match self {
            Self::Sine => (TAU * phase).sin(),
            Self::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Self::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        }
    }
}

/// Exponential interpolation from `a` to `b`; `x` is clamped to `[0, 1]`.
fn xerp(a: f64, b: f64, x: f64) -> f64 {
    a * (b / a).powf(x.clamp(0.0, 1.0))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sample_count(duration_s: f64) -> usize {
    (duration_s.max(0.0) * f64::from(SAMPLE_RATE)).round() as usize
}

/// Render an oscillator with time-varying pitch and gain.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn render(
    duration_s: f64,
    wave: Waveform,
    freq: impl Fn(f64) -> f64,
    gain: impl Fn(f64) -> f64,
) -> Vec<f32> {
    let dt = 1.0 / f64::from(SAMPLE_RATE);
    let mut phase = 0.0_f64;
    (0..sample_count(duration_s))
        .map(|i| {
            let t = i as f64 * dt;
            let value = wave.sample(phase) * gain(t);
            phase = (phase + freq(t) * dt).fract();
            value as f32
        })
        .collect()
}

/// Samples for one melody entry: a square wave that fades out, or silence
/// for a rest.
#[must_use]
pub fn render_note(note: &Note) -> Vec<f32> {
    if note.is_rest() {
        return vec![0.0; sample_count(note.duration_s)];
    }
    let fade = (note.duration_s - NOTE_RELEASE_S).max(f64::EPSILON);
    render(
        note.duration_s,
        Waveform::Square,
        |_| note.freq_hz,
        |t| xerp(MELODY_GAIN, FADE_FLOOR, t / fade),
    )
}

/// Samples for [`CHEER`]: a sine glide with a half-second fade.
#[must_use]
pub fn render_cheer() -> Vec<f32> {
    render(
        CHEER.duration_s,
        Waveform::Sine,
        |t| CHEER.freq_at(t),
        |t| xerp(CHEER_GAIN, FADE_FLOOR, t / CHEER.duration_s),
    )
}

/// Samples for the whole [`FANFARE`], each note a triangle wave with a short
/// swell and a long fade.
#[must_use]
pub fn render_fanfare() -> Vec<f32> {
    let mut mix = vec![0.0_f32; sample_count(fanfare_length().as_secs_f64())];
    for note in &FANFARE {
        let tone = render(
            note.duration_s,
            Waveform::Triangle,
            |_| note.freq_hz,
            |t| {
                if t < FANFARE_ATTACK_S {
                    FANFARE_GAIN * t / FANFARE_ATTACK_S
                } else {
                    let decay = (note.duration_s - FANFARE_ATTACK_S).max(f64::EPSILON);
                    xerp(FANFARE_GAIN, FADE_FLOOR, (t - FANFARE_ATTACK_S) / decay)
                }
            },
        );
        let start = sample_count(note.start_s);
        for (out, s) in mix.iter_mut().skip(start).zip(tone) {
            *out += s;
        }
    }
    mix
}

/// Walks [`MELODY`] in a loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequencer {
    index: usize,
    muted: bool,
}

impl Sequencer {
    /// A sequencer at the start of the melody, unmuted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewind to the first note.
    pub fn restart(&mut self) {
        self.index = 0;
    }

    /// Whether output is muted.
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip the mute switch; returns the new state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Return the current note and move to the next one, wrapping around.
    ///
    /// Returns `None` while muted; the position does not advance.
    pub fn next_note(&mut self) -> Option<Note> {
        if self.muted {
            return None;
        }
        let note = MELODY[self.index % MELODY.len()];
        self.index = (self.index + 1) % MELODY.len();
        Some(note)
    }
}
