#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod parser;
pub mod time;

pub use error::Error;
pub use parser::{ParseReport, parse_questions, parse_with_report};
pub use time::Clock;
