//! Speech output seam.
//!
//! The desktop treats speech synthesis as an external capability behind a
//! trait; the terminal build has no synthesizer, so the shipped provider
//! surfaces utterances on the orb status line and the log. Recognized
//! commands travel the other direction as plain lowercase transcripts
//! handed to the dispatcher by whatever input layer is attached.

/// Fire-and-forget speech synthesis. `speak` cancels any in-flight
/// utterance before starting the new one.
pub trait Voice {
    fn speak(&mut self, text: &str);
}

/// Terminal-flavored voice: remembers the last utterance for the orb and
/// logs it. Replacing an utterance is the cancel.
#[derive(Debug, Default)]
pub struct OrbVoice {
    utterance: Option<String>,
}

impl OrbVoice {
    pub fn new() -> Self {
        Self::default()
    }

    /// The utterance currently being "spoken", if any.
    pub fn current_utterance(&self) -> Option<&str> {
        self.utterance.as_deref()
    }
}

impl Voice for OrbVoice {
    fn speak(&mut self, text: &str) {
        if let Some(previous) = self.utterance.take() {
            tracing::debug!(cancelled = %previous, "utterance superseded");
        }
        tracing::info!(%text, "speak");
        self.utterance = Some(text.to_string());
    }
}

/// Records everything spoken; test double.
#[derive(Debug, Default)]
pub struct RecordingVoice {
    pub spoken: Vec<String>,
}

impl Voice for RecordingVoice {
    fn speak(&mut self, text: &str) {
        self.spoken.push(text.to_string());
    }
}
