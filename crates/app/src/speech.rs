use std::time::Duration;

use colored::Colorize;
use log::debug;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use services::{Playback, SpeechEngine, Utterance, UtteranceTicket};

/// Speaking pace at rate 1.0.
const WORDS_PER_SECOND: f32 = 2.5;

/// Prints utterances and reports completion after a speaking-length delay.
///
/// Must be used from inside a tokio runtime.
pub struct ConsoleSpeech {
    done: UnboundedSender<UtteranceTicket>,
    playing: Option<JoinHandle<()>>,
}

impl ConsoleSpeech {
    #[must_use]
    pub fn new(done: UnboundedSender<UtteranceTicket>) -> Self {
        Self {
            done,
            playing: None,
        }
    }
}

impl SpeechEngine for ConsoleSpeech {
    fn speak(&mut self, utterance: Utterance) -> Playback {
        self.cancel();
        println!("{} {}", "🔊".magenta(), utterance.text.italic());

        let delay = speaking_time(&utterance.text, utterance.rate);
        let done = self.done.clone();
        let ticket = utterance.ticket;
        self.playing = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if done.send(ticket).is_err() {
                debug!("[Speech] Shell gone before utterance {} finished", ticket.value());
            }
        }));
        Playback::Pending
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.playing.take() {
            handle.abort();
        }
    }
}

/// How long `text` takes to say at `rate`.
#[must_use]
pub fn speaking_time(text: &str, rate: f32) -> Duration {
    let words = text.split_whitespace().count().max(1);
    #[allow(clippy::cast_precision_loss)]
    let secs = words as f32 / (WORDS_PER_SECOND * rate.max(0.1));
    Duration::from_secs_f32(secs)
}
