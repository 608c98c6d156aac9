#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog;
pub mod error;
pub mod narration;
pub mod player;
pub mod preferences;
pub mod sessions;

pub use mcq_core::Clock;

pub use app_services::AppServices;
pub use catalog::QuestionCatalog;
pub use error::{AppServicesError, PlayerError, PreferencesError, SessionError};
pub use narration::{
    FollowUp, NarrationMode, Narrator, Playback, SilentSpeech, SpeechEngine, Utterance,
    UtteranceTicket,
};
pub use player::{AUTO_ADVANCE_DELAY, PlayerConfig, PlayerEvent, QuizPlayer};
pub use preferences::PreferencesService;
pub use sessions::{Answer, QuizSession, SubmitOutcome, Verdict};
