pub mod catalog;
pub mod config;
pub mod error;
pub mod report;
pub mod scoring;
pub mod telemetry;
pub mod types;

pub use error::{FunalyticsError, Result};
pub use types::audience::Audience;
pub use types::config::PolicyConfig;
pub use types::event::{EventFeatures, Frequency, Rating, RatingScale};
pub use types::scoring::{EventReport, ExclusionVerdict, RankedEvent, ScoreBatch, ScoreResult};
