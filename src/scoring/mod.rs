pub mod engine;

pub use engine::{calculate_score, score, ItemContribution, ScoreBreakdown, ScoreResult};
