pub mod types;

pub use types::{Category, CategoryScores, GenAiImpact, Occupation, ScorableItem};
