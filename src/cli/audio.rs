//! Sound output for the play command.
//!
//! Samples come from [`tugmath::cues`]; this module only hands them to the
//! default output device. Without the `audio` feature, or when no device
//! opens, the game runs silently.

#[cfg(feature = "audio")]
use rodio::{OutputStream, OutputStreamHandle, Sink, buffer::SamplesBuffer};
use tracing::debug;
use tugmath::cues::{self, Note};

/// An open output device.
#[cfg(feature = "audio")]
pub(crate) struct Audio {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

#[cfg(feature = "audio")]
impl Audio {
    /// Open the default output device, or `None` if there is none.
    pub(crate) fn open() -> Option<Self> {
        match OutputStream::try_default() {
            Ok((stream, handle)) => Some(Self {
                _stream: stream,
                handle,
            }),
            Err(e) => {
                debug!(error = %e, "no audio output, playing silently");
                None
            }
        }
    }

    fn play_samples(&self, samples: Vec<f32>) {
        if let Ok(sink) = Sink::try_new(&self.handle) {
            sink.append(SamplesBuffer::new(1, cues::SAMPLE_RATE, samples));
            sink.detach();
        }
    }
}

/// Stand-in when built without an audio backend; never constructed.
#[cfg(not(feature = "audio"))]
pub(crate) enum Audio {}

#[cfg(not(feature = "audio"))]
impl Audio {
    pub(crate) fn open() -> Option<Self> {
        debug!("built without the audio feature, playing silently");
        None
    }

    #[allow(clippy::needless_pass_by_value)]
    fn play_samples(&self, _samples: Vec<f32>) {
        match *self {}
    }
}

impl Audio {
    /// Start one background melody entry. Rests play nothing.
    pub(crate) fn play_note(&self, note: &Note) {
        if !note.is_rest() {
            self.play_samples(cues::render_note(note));
        }
    }

    /// The correct-answer ding.
    pub(crate) fn play_cheer(&self) {
        self.play_samples(cues::render_cheer());
    }

    /// The victory fanfare.
    pub(crate) fn play_fanfare(&self) {
        self.play_samples(cues::render_fanfare());
    }
}
