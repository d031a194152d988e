use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::category_multiplier;
use super::validation::factor_checks;
use crate::industry::IndustryContext;

/// A single scorable unit for the factor-weighted engine.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationFactor {
    pub id: String,
    pub name: String,
    pub weight: f64,      // 0-1
    pub category: String, // cognitive, manual, social, creative, analytical, ...
    pub complexity: u8,   // 1-5
    #[serde(default)]
    pub repetitiveness: f64, // 0-1
    #[serde(alias = "humanAICollaboration")]
    pub human_ai_collaboration: f64, // 0-1
    #[serde(default)]
    pub industry_specific: bool,
    pub emerging_tech_impact: f64, // 0-1
}

/// Named sub-scores that multiply into the final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorScores {
    pub base_apo: f64,
    pub complexity_factor: f64,
    pub collaboration_factor: f64,
    pub industry_factor: f64,
    pub emerging_tech_factor: f64,
}

impl FactorScores {
    pub fn product(&self) -> f64 {
        self.base_apo
            * self.complexity_factor
            * self.collaboration_factor
            * self.industry_factor
            * self.emerging_tech_factor
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApoResult {
    pub score: f64,
    pub factors: FactorScores,
    pub confidence: f64,
    pub recommendations: Vec<String>,
}

pub const FULL_AUTOMATION_THRESHOLD: f64 = 0.8;
pub const PARTIAL_AUTOMATION_THRESHOLD: f64 = 0.5;

pub fn complexity_factor(complexity: u8) -> f64 {
    1.0 - f64::from(complexity) * 0.15
}

pub fn collaboration_factor(human_ai_collaboration: f64) -> f64 {
    1.0 - human_ai_collaboration * 0.2
}

pub fn emerging_tech_factor(emerging_tech_impact: f64) -> f64 {
    1.0 + emerging_tech_impact * 0.3
}

/// Industry multiplier for a factor.
///
/// The context only matters for industry-specific factors; everything else
/// gets 1.0 whether or not a context is supplied.
pub fn industry_factor(factor: &AutomationFactor, context: Option<&IndustryContext>) -> f64 {
    if !factor.industry_specific {
        return 1.0;
    }
    match context {
        None => 0.8,
        Some(ctx) => {
            let tech_maturity_impact = ctx.tech_maturity() * 0.4;
            let regulatory_impact = (1.0 - ctx.regulation_impact) * 0.3;
            let human_interaction_impact = (1.0 - ctx.human_interaction_level) * 0.3;
            (tech_maturity_impact + regulatory_impact + human_interaction_impact) * 0.8
        }
    }
}

/// Score one automation factor.
pub fn score(factor: &AutomationFactor, context: Option<&IndustryContext>) -> ApoResult {
    let factors = FactorScores {
        base_apo: factor.weight * category_multiplier(&factor.category),
        complexity_factor: complexity_factor(factor.complexity),
        collaboration_factor: collaboration_factor(factor.human_ai_collaboration),
        industry_factor: industry_factor(factor, context),
        emerging_tech_factor: emerging_tech_factor(factor.emerging_tech_impact),
    };
    let score = factors.product();

    debug!(factor = %factor.name, score, ?factors, "enhanced score");

    ApoResult {
        score,
        factors,
        confidence: confidence(factor),
        recommendations: recommendations(factor, score),
    }
}

/// Fraction of the four validity checks that pass: always k/4.
pub fn confidence(factor: &AutomationFactor) -> f64 {
    let checks = factor_checks(factor);
    let passed = checks.iter().filter(|(_, ok)| *ok).count();
    passed as f64 / checks.len() as f64
}

pub fn recommendations(factor: &AutomationFactor, score: f64) -> Vec<String> {
    let mut out = Vec::new();

    if score > FULL_AUTOMATION_THRESHOLD {
        out.push("Favor full automation: this work is highly automatable with current technology.".to_string());
    } else if score >= PARTIAL_AUTOMATION_THRESHOLD {
        out.push("Favor partial automation: automate routine steps and keep people on exceptions.".to_string());
        if factor.human_ai_collaboration > 0.6 {
            out.push("Invest in human-AI collaboration tooling to support shared workflows.".to_string());
        }
    } else {
        out.push("Favor augmentation: use AI to assist people rather than replace them.".to_string());
        if factor.complexity > 3 {
            out.push("Break complex work into smaller subtasks to find automatable parts.".to_string());
        }
    }

    if factor.emerging_tech_impact > 0.7 {
        out.push("Monitor emerging technologies closely; they are likely to change this work.".to_string());
    }

    out
}

/// Rough number of years until a score of this size is realized.
pub fn time_horizon_years(score: f64) -> u32 {
    if score >= 0.8 {
        2
    } else if score >= 0.6 {
        5
    } else if score >= 0.4 {
        10
    } else if score >= 0.2 {
        15
    } else {
        20
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_factor() -> AutomationFactor {
        AutomationFactor {
            id: "1".to_string(),
            name: "Data Analysis".to_string(),
            weight: 0.8,
            category: "cognitive".to_string(),
            complexity: 3,
            repetitiveness: 0.7,
            human_ai_collaboration: 0.6,
            industry_specific: false,
            emerging_tech_impact: 0.7,
        }
    }

    fn context() -> IndustryContext {
        IndustryContext {
            sector: "Finance".to_string(),
            region: "North America".to_string(),
            tech_adoption_rate: 80.0,
            labor_market_factor: 50.0,
            regulation_impact: 0.7,
            human_interaction_level: 0.4,
        }
    }

    #[test]
    fn test_worked_example() {
        let factor = AutomationFactor {
            weight: 1.0,
            category: "analytical".to_string(),
            complexity: 5,
            human_ai_collaboration: 1.0,
            emerging_tech_impact: 0.0,
            ..sample_factor()
        };
        let result = score(&factor, None);
        assert!((result.factors.base_apo - 0.8).abs() < 1e-12);
        assert!((result.factors.complexity_factor - 0.25).abs() < 1e-12);
        assert!((result.factors.collaboration_factor - 0.8).abs() < 1e-12);
        assert_eq!(result.factors.industry_factor, 1.0);
        assert_eq!(result.factors.emerging_tech_factor, 1.0);
        assert!((result.score - 0.16).abs() < 1e-12);
    }

    #[test]
    fn test_complexity_strictly_decreases_score() {
        let mut previous = f64::INFINITY;
        for complexity in 1..=5 {
            let factor = AutomationFactor { complexity, ..sample_factor() };
            let s = score(&factor, None).score;
            assert!(s < previous, "complexity {} did not lower the score", complexity);
            previous = s;
        }
    }

    #[test]
    fn test_emerging_tech_strictly_increases_score() {
        let low = score(&AutomationFactor { emerging_tech_impact: 0.0, ..sample_factor() }, None);
        let mid = score(&AutomationFactor { emerging_tech_impact: 0.5, ..sample_factor() }, None);
        let high = score(&AutomationFactor { emerging_tech_impact: 1.0, ..sample_factor() }, None);
        assert!(low.score < mid.score);
        assert!(mid.score < high.score);
    }

    #[test]
    fn test_industry_factor_without_context() {
        let generic = sample_factor();
        assert_eq!(industry_factor(&generic, None), 1.0);

        let specific = AutomationFactor { industry_specific: true, ..sample_factor() };
        assert_eq!(industry_factor(&specific, None), 0.8);
    }

    #[test]
    fn test_industry_context_ignored_for_generic_factor() {
        let generic = sample_factor();
        assert_eq!(industry_factor(&generic, Some(&context())), 1.0);
    }

    #[test]
    fn test_industry_context_for_specific_factor() {
        let specific = AutomationFactor { industry_specific: true, ..sample_factor() };
        // (0.8*0.4 + 0.3*0.3 + 0.6*0.3) * 0.8
        let expected = (0.32 + 0.09 + 0.18) * 0.8;
        assert!((industry_factor(&specific, Some(&context())) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_confidence_is_quarter_steps() {
        assert_eq!(confidence(&sample_factor()), 1.0);

        let one_bad = AutomationFactor { complexity: 7, ..sample_factor() };
        assert_eq!(confidence(&one_bad), 0.75);

        let all_bad = AutomationFactor {
            weight: f64::NAN,
            complexity: 0,
            human_ai_collaboration: 1.5,
            emerging_tech_impact: -0.1,
            ..sample_factor()
        };
        assert_eq!(confidence(&all_bad), 0.0);
    }

    #[test]
    fn test_recommendations_full_automation() {
        let factor = AutomationFactor { emerging_tech_impact: 0.2, ..sample_factor() };
        let recs = recommendations(&factor, 0.9);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].starts_with("Favor full automation"));
    }

    #[test]
    fn test_recommendations_partial_with_collaboration() {
        let factor = AutomationFactor {
            human_ai_collaboration: 0.7,
            emerging_tech_impact: 0.8,
            ..sample_factor()
        };
        let recs = recommendations(&factor, 0.6);
        assert_eq!(recs.len(), 3);
        assert!(recs[0].starts_with("Favor partial automation"));
        assert!(recs[1].contains("collaboration tooling"));
        assert!(recs[2].starts_with("Monitor emerging technologies"));
    }

    #[test]
    fn test_recommendations_boundary_is_partial() {
        let recs = recommendations(&sample_factor(), 0.8);
        assert!(recs[0].starts_with("Favor partial automation"));
        let recs = recommendations(&sample_factor(), 0.5);
        assert!(recs[0].starts_with("Favor partial automation"));
    }

    #[test]
    fn test_recommendations_augmentation_with_decomposition() {
        let factor = AutomationFactor { complexity: 4, emerging_tech_impact: 0.1, ..sample_factor() };
        let recs = recommendations(&factor, 0.3);
        assert_eq!(recs.len(), 2);
        assert!(recs[0].starts_with("Favor augmentation"));
        assert!(recs[1].contains("subtasks"));
    }

    #[test]
    fn test_time_horizon() {
        assert_eq!(time_horizon_years(0.85), 2);
        assert_eq!(time_horizon_years(0.6), 5);
        assert_eq!(time_horizon_years(0.45), 10);
        assert_eq!(time_horizon_years(0.2), 15);
        assert_eq!(time_horizon_years(0.05), 20);
    }

    #[test]
    fn test_factor_json_parse() {
        let json = r#"{
            "id": "t-1",
            "name": "Reconcile ledgers",
            "weight": 0.6,
            "category": "analytical",
            "complexity": 2,
            "repetitiveness": 0.9,
            "humanAICollaboration": 0.3,
            "industrySpecific": true,
            "emergingTechImpact": 0.5
        }"#;
        let factor: AutomationFactor = serde_json::from_str(json).unwrap();
        assert_eq!(factor.complexity, 2);
        assert!(factor.industry_specific);
        assert_eq!(factor.human_ai_collaboration, 0.3);
    }
}
