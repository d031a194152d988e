use tracing::debug;

use super::config::{CategoryWeights, HIGH_IMPACT_KEYWORDS, LOW_IMPACT_KEYWORDS};
use super::table::{best_match, PhraseMatch};
use crate::occupation::{Category, CategoryScores, GenAiImpact, Occupation, ScorableItem};

#[derive(Debug, Clone)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Importance", "Level", "GenAI impact"
    pub description: String, // e.g. "80/100 -> x0.8"
    pub before: f64,         // Score before this factor
    pub after: f64,          // Score after this factor
}

#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub matched: Option<PhraseMatch>,
    pub base_score: f64,
    pub factors: Vec<FactorContribution>,
}

#[derive(Debug, Clone)]
pub struct ItemScore {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Score one item and keep the per-multiplier trail.
///
/// Absent or zero importance/level count as 1.0 and an absent GenAI tag as 1.0.
/// Nothing is clamped: a strongly weighted item can land above 100.
pub fn explain_item(item: &ScorableItem, category: Category) -> ItemScore {
    let matched = best_match(&item.text(), category);
    let base_score = matched.as_ref().map(|m| m.base_score).unwrap_or(0.0);
    let mut score = base_score;
    let mut factors = Vec::new();

    if let Some(importance) = item.importance.filter(|v| *v != 0.0) {
        let before = score;
        score *= importance / 100.0;
        factors.push(FactorContribution {
            label: "Importance".to_string(),
            description: format!("{}/100 -> x{}", importance, importance / 100.0),
            before,
            after: score,
        });
    }

    if let Some(level) = item.level.filter(|v| *v != 0.0) {
        let before = score;
        score *= level / 100.0;
        factors.push(FactorContribution {
            label: "Level".to_string(),
            description: format!("{}/100 -> x{}", level, level / 100.0),
            before,
            after: score,
        });
    }

    if let Some(impact) = item.gen_ai_impact {
        let before = score;
        score *= impact.factor();
        factors.push(FactorContribution {
            label: "GenAI impact".to_string(),
            description: format!("{:?} -> x{}", impact, impact.factor()),
            before,
            after: score,
        });
    }

    ItemScore {
        score,
        breakdown: ScoreBreakdown {
            matched,
            base_score,
            factors,
        },
    }
}

pub fn score_item(item: &ScorableItem, category: Category) -> f64 {
    explain_item(item, category).score
}

/// Mean item score for a category; 0 for an empty list.
pub fn average_score(items: &[ScorableItem], category: Category) -> f64 {
    if items.is_empty() {
        debug!(%category, "no items to score");
        return 0.0;
    }

    let total: f64 = items
        .iter()
        .map(|item| {
            let s = score_item(item, category);
            debug!(%category, item = %item.name, apo = s, "static item score");
            s
        })
        .sum();

    let average = total / items.len() as f64;
    debug!(%category, average, "static category average");
    average
}

/// Static average for each of the five categories.
pub fn category_scores(occupation: &Occupation) -> CategoryScores {
    CategoryScores::from_fn(|category| average_score(occupation.items(category), category))
}

/// Weighted sum of category scores.
pub fn weighted_overall(scores: &CategoryScores, weights: &CategoryWeights) -> f64 {
    scores
        .iter()
        .map(|(category, score)| score * weights.get(category))
        .sum()
}

/// Overall static APO using the default category weights.
pub fn overall_score(occupation: &Occupation) -> f64 {
    overall_score_with(occupation, &CategoryWeights::default())
}

pub fn overall_score_with(occupation: &Occupation, weights: &CategoryWeights) -> f64 {
    let overall = weighted_overall(&category_scores(occupation), weights);
    debug!(occupation = %occupation.title, overall, "static overall APO");
    overall
}

/// Tag an item with a GenAI impact level from its wording.
///
/// High-impact words are checked before low-impact ones; anything else is
/// Medium. Any existing tag is replaced.
pub fn infer_gen_ai_impact(item: &ScorableItem) -> ScorableItem {
    let text = item.text().to_lowercase();
    let impact = if HIGH_IMPACT_KEYWORDS.iter().any(|k| text.contains(k)) {
        GenAiImpact::High
    } else if LOW_IMPACT_KEYWORDS.iter().any(|k| text.contains(k)) {
        GenAiImpact::Low
    } else {
        GenAiImpact::Medium
    };

    ScorableItem {
        gen_ai_impact: Some(impact),
        ..item.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, importance: Option<f64>, level: Option<f64>, impact: Option<GenAiImpact>) -> ScorableItem {
        ScorableItem {
            name: name.to_string(),
            description: Some(String::new()),
            importance,
            level,
            gen_ai_impact: impact,
        }
    }

    fn occupation() -> Occupation {
        Occupation {
            title: "Energy Auditor".to_string(),
            tasks: vec![item("Analyzing Data", None, None, None), item("Auditing", None, None, None)],
            knowledge: vec![item("Mathematics", None, None, None)],
            skills: vec![item("Monitoring", None, None, None)],
            abilities: vec![item("Information Ordering", None, None, None)],
            technologies: vec![item("Database Management", None, None, None)],
            ..Default::default()
        }
    }

    #[test]
    fn test_worked_example() {
        let it = item("Analyzing Data", Some(80.0), Some(60.0), Some(GenAiImpact::High));
        let s = score_item(&it, Category::Tasks);
        // 65 * 0.8 * 0.6 * 1.3
        assert!((s - 40.56).abs() < 1e-9);
    }

    #[test]
    fn test_missing_attributes_use_unit_multipliers() {
        let it = ScorableItem::new("Programming");
        assert_eq!(score_item(&it, Category::Tasks), 65.0);
    }

    #[test]
    fn test_zero_importance_and_level_are_ignored() {
        let it = item("Analyzing Data", Some(0.0), Some(0.0), None);
        let result = explain_item(&it, Category::Tasks);
        assert_eq!(result.score, 65.0);
        assert!(result.breakdown.factors.is_empty());
    }

    #[test]
    fn test_gen_ai_factors() {
        let low = score_item(&item("Programming", None, None, Some(GenAiImpact::Low)), Category::Tasks);
        let medium = score_item(&item("Programming", None, None, Some(GenAiImpact::Medium)), Category::Tasks);
        assert!((low - 58.5).abs() < 1e-9);
        assert!((medium - 71.5).abs() < 1e-9);
    }

    #[test]
    fn test_scores_are_not_clamped() {
        let it = item("Calculating Metrics", Some(150.0), None, Some(GenAiImpact::High));
        let s = score_item(&it, Category::Tasks);
        assert!(s > 100.0);
    }

    #[test]
    fn test_unmatched_item_scores_zero() {
        let it = ScorableItem::new("Underwater basket weaving");
        assert_eq!(score_item(&it, Category::Technologies), 0.0);
    }

    #[test]
    fn test_average_empty_is_zero() {
        for category in Category::ALL {
            assert_eq!(average_score(&[], category), 0.0);
        }
    }

    #[test]
    fn test_average_score() {
        let items = vec![item("Analyzing Data", None, None, None), item("Auditing", None, None, None)];
        assert_eq!(average_score(&items, Category::Tasks), 60.0);
    }

    #[test]
    fn test_overall_score() {
        let occ = occupation();
        // 60*0.3 + 70*0.2 + 65*0.2 + 70*0.15 + 70*0.15
        let expected = 18.0 + 14.0 + 13.0 + 10.5 + 10.5;
        assert!((overall_score(&occ) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_overall_monotonic_in_category() {
        let occ = occupation();
        let base = overall_score(&occ);

        let mut higher = occ.clone();
        higher.knowledge[0].gen_ai_impact = Some(GenAiImpact::High);
        assert!(overall_score(&higher) > base);

        let mut lower = occ.clone();
        lower.skills[0].importance = Some(50.0);
        assert!(overall_score(&lower) < base);
    }

    #[test]
    fn test_explain_records_each_multiplier() {
        let it = item("Analyzing Data", Some(80.0), Some(60.0), Some(GenAiImpact::High));
        let result = explain_item(&it, Category::Tasks);
        assert_eq!(result.breakdown.base_score, 65.0);
        assert_eq!(result.breakdown.factors.len(), 3);
        assert_eq!(result.breakdown.factors[0].label, "Importance");
        assert_eq!(result.breakdown.factors[2].after, result.score);
        assert_eq!(result.breakdown.matched.unwrap().phrase, "Analyzing Data");
    }

    #[test]
    fn test_infer_high_impact() {
        let it = ScorableItem {
            description: Some("Analyze energy usage patterns".to_string()),
            ..ScorableItem::new("Review bills")
        };
        assert_eq!(infer_gen_ai_impact(&it).gen_ai_impact, Some(GenAiImpact::High));
    }

    #[test]
    fn test_infer_low_impact() {
        let it = ScorableItem::new("Repair HVAC units");
        assert_eq!(infer_gen_ai_impact(&it).gen_ai_impact, Some(GenAiImpact::Low));
    }

    #[test]
    fn test_infer_high_beats_low() {
        let it = ScorableItem::new("Inspect and optimize boilers");
        assert_eq!(infer_gen_ai_impact(&it).gen_ai_impact, Some(GenAiImpact::High));
    }

    #[test]
    fn test_infer_medium_default() {
        let it = ScorableItem::new("Meet clients");
        let tagged = infer_gen_ai_impact(&it);
        assert_eq!(tagged.gen_ai_impact, Some(GenAiImpact::Medium));
        assert_eq!(tagged.name, it.name);
    }
}
