use super::config::CategoryWeights;
use super::enhanced::AutomationFactor;
use crate::occupation::Category;

/// Tolerance when checking that category weights add up to 1.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

fn in_unit_range(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

/// The four checks behind enhanced-engine confidence, in a fixed order.
pub(crate) fn factor_checks(factor: &AutomationFactor) -> [(&'static str, bool); 4] {
    [
        ("weight", in_unit_range(factor.weight)),
        ("complexity", (1..=5).contains(&factor.complexity)),
        ("humanAICollaboration", in_unit_range(factor.human_ai_collaboration)),
        ("emergingTechImpact", in_unit_range(factor.emerging_tech_impact)),
    ]
}

/// Validate an automation factor before scoring.
/// Returns all validation errors at once (not just the first).
pub fn validate_factor(factor: &AutomationFactor) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !in_unit_range(factor.weight) {
        errors.push(format!("factor.weight: {} is outside 0..=1", factor.weight));
    }
    if !(1..=5).contains(&factor.complexity) {
        errors.push(format!(
            "factor.complexity: {} is outside 1..=5",
            factor.complexity
        ));
    }
    if !in_unit_range(factor.repetitiveness) {
        errors.push(format!(
            "factor.repetitiveness: {} is outside 0..=1",
            factor.repetitiveness
        ));
    }
    if !in_unit_range(factor.human_ai_collaboration) {
        errors.push(format!(
            "factor.humanAICollaboration: {} is outside 0..=1",
            factor.human_ai_collaboration
        ));
    }
    if !in_unit_range(factor.emerging_tech_impact) {
        errors.push(format!(
            "factor.emergingTechImpact: {} is outside 0..=1",
            factor.emerging_tech_impact
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate category weights: each non-negative and finite, summing to 1.
pub fn validate_weights(weights: &CategoryWeights) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for category in Category::ALL {
        let w = weights.get(category);
        if !w.is_finite() || w < 0.0 {
            errors.push(format!("weights.{}: must be a non-negative number", category));
        }
    }

    let sum = weights.sum();
    if errors.is_empty() && (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        errors.push(format!("weights: must sum to 1.0 (got {})", sum));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
