pub mod config;
pub mod engine;
pub mod enhanced;
pub mod table;
pub mod validation;

pub use config::*;
pub use engine::{
    average_score, category_scores, explain_item, infer_gen_ai_impact, overall_score,
    overall_score_with, score_item, weighted_overall, FactorContribution, ItemScore,
    ScoreBreakdown,
};
pub use enhanced::{time_horizon_years, ApoResult, AutomationFactor, FactorScores};
pub use table::{best_match, similarity, PhraseMatch};
pub use validation::{validate_factor, validate_weights};
