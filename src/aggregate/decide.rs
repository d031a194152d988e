use tracing::{debug, info};

use super::collect::SourceResults;
use super::insights::generate_insights;
use super::{DataSource, DynamicApoResult, TrendPoint};
use crate::error::AggregateError;
use crate::occupation::{Category, CategoryScores, Occupation, ScorableItem};
use crate::scoring::{average_score, category_scores, score_item, weighted_overall, CategoryWeights};
use crate::sources::{ResearchRecord, SourceKind, TrendRecord};

pub const STATIC_CONFIDENCE: f64 = 0.5;
pub const HYBRID_CONFIDENCE: f64 = 0.6;
pub const ERROR_FALLBACK_CONFIDENCE: f64 = 0.4;
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Item names shorter than this are too generic to search for.
const MIN_TERM_LEN: usize = 4;

fn malformed(slot: SourceKind, detail: String) -> AggregateError {
    AggregateError::MalformedPayload { slot, detail }
}

fn check_ratio(slot: SourceKind, what: &str, name: &str, value: f64) -> Result<(), AggregateError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(malformed(slot, format!("{} for '{}' is {}", what, name, value)))
    }
}

fn check_percentage(slot: SourceKind, title: &str, value: Option<f64>) -> Result<(), AggregateError> {
    match value {
        Some(v) if !v.is_finite() || !(0.0..=100.0).contains(&v) => Err(malformed(
            slot,
            format!("automation percentage for '{}' is {}", title, v),
        )),
        _ => Ok(()),
    }
}

/// Reject payloads carrying non-finite or out-of-range numbers.
pub fn validate_payload(results: &SourceResults) -> Result<(), AggregateError> {
    let trend_slots = [
        (SourceKind::AutomationTrends, &results.automation_trends),
        (SourceKind::AutomationResearch, &results.automation_research),
        (SourceKind::TechnologyAdoption, &results.technology_adoption),
    ];
    for (slot, records) in trend_slots {
        for record in records.iter().flatten() {
            check_percentage(slot, &record.title, record.automation_percentage)?;
        }
    }

    for analysis in results.task_analysis.iter().flatten() {
        check_ratio(SourceKind::TaskAnalysis, "automationPotential", &analysis.task, analysis.automation_potential)?;
        check_ratio(SourceKind::TaskAnalysis, "confidence", &analysis.task, analysis.confidence)?;
    }
    for analysis in results.skill_analysis.iter().flatten() {
        check_ratio(SourceKind::SkillAnalysis, "automationPotential", &analysis.skill, analysis.automation_potential)?;
        check_ratio(SourceKind::SkillAnalysis, "confidence", &analysis.skill, analysis.confidence)?;
    }

    let crawl_slots = [
        (SourceKind::ResearchCrawl, &results.research),
        (SourceKind::IndustryCrawl, &results.industry),
    ];
    for (slot, records) in crawl_slots {
        for record in records.iter().flatten() {
            for mention in &record.automation_mentions {
                check_percentage(slot, &record.title, mention.automation_percentage)?;
            }
        }
    }

    Ok(())
}

/// Mean over items, taking the analysis value where one exists and the
/// static score otherwise.
fn analyzed_average<F>(items: &[ScorableItem], category: Category, lookup: F) -> f64
where
    F: Fn(&str) -> Option<f64>,
{
    if items.is_empty() {
        return 0.0;
    }
    let total: f64 = items
        .iter()
        .map(|item| match lookup(&item.name) {
            Some(apo) => {
                debug!(%category, item = %item.name, apo, "dynamic item score");
                apo
            }
            None => score_item(item, category),
        })
        .sum();
    total / items.len() as f64
}

/// Search terms for a category: item names long enough to be specific.
fn search_terms(items: &[ScorableItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.name.trim().to_lowercase())
        .filter(|name| name.chars().count() >= MIN_TERM_LEN)
        .collect()
}

/// Mean of the positive percentages attached to evidence that mentions any
/// term. `None` when nothing usable was found.
fn evidence_average<I>(evidence: I, terms: &[String]) -> Option<f64>
where
    I: IntoIterator<Item = (String, Option<f64>)>,
{
    if terms.is_empty() {
        return None;
    }
    let percentages: Vec<f64> = evidence
        .into_iter()
        .filter(|(text, _)| {
            let text = text.to_lowercase();
            terms.iter().any(|term| text.contains(term.as_str()))
        })
        .filter_map(|(_, percentage)| percentage)
        .filter(|p| *p > 0.0)
        .collect();

    if percentages.is_empty() {
        None
    } else {
        Some(percentages.iter().sum::<f64>() / percentages.len() as f64)
    }
}

fn trend_evidence(records: &[TrendRecord]) -> impl Iterator<Item = (String, Option<f64>)> + '_ {
    records.iter().map(|r| (r.text(), r.automation_percentage))
}

fn research_evidence(records: &[ResearchRecord]) -> impl Iterator<Item = (String, Option<f64>)> + '_ {
    records.iter().map(|r| {
        let first = r.automation_mentions.first().and_then(|m| m.automation_percentage);
        (r.text(), first)
    })
}

/// Category score from the sources that cover it, falling back to static.
pub fn dynamic_category_score(category: Category, items: &[ScorableItem], results: &SourceResults) -> f64 {
    if items.is_empty() {
        return 0.0;
    }

    let extracted = match category {
        Category::Tasks => results.task_analysis.as_ref().map(|analyses| {
            analyzed_average(items, category, |name| {
                analyses
                    .iter()
                    .find(|a| a.task == name)
                    .map(|a| a.automation_potential * 100.0 * a.confidence)
            })
        }),
        Category::Skills => results.skill_analysis.as_ref().map(|analyses| {
            analyzed_average(items, category, |name| {
                analyses
                    .iter()
                    .find(|a| a.skill == name)
                    .map(|a| a.automation_potential * 100.0 * a.confidence)
            })
        }),
        Category::Knowledge | Category::Abilities => {
            if results.automation_research.is_none() && results.research.is_none() {
                None
            } else {
                let research_trends = results.automation_research.as_deref().unwrap_or(&[]);
                let research = results.research.as_deref().unwrap_or(&[]);
                evidence_average(
                    trend_evidence(research_trends).chain(research_evidence(research)),
                    &search_terms(items),
                )
            }
        }
        Category::Technologies => results
            .technology_adoption
            .as_deref()
            .and_then(|records| evidence_average(trend_evidence(records), &search_terms(items))),
    };

    match extracted {
        Some(score) => {
            debug!(%category, score, "category scored from sources");
            score
        }
        None => average_score(items, category),
    }
}

/// `(year, value, source)` points from trend records and research mentions,
/// ordered by year. Points from the same year keep their source order.
pub fn extract_trends(results: &SourceResults) -> Vec<TrendPoint> {
    let mut trends = Vec::new();

    for record in results.automation_trends.iter().flatten() {
        if let (Some(year), Some(value)) = (record.year, record.automation_percentage) {
            trends.push(TrendPoint {
                year,
                value,
                source: record.source.clone(),
            });
        }
    }

    for record in results.research.iter().flatten() {
        for mention in &record.automation_mentions {
            if let (Some(year), Some(value)) = (mention.year, mention.automation_percentage) {
                trends.push(TrendPoint {
                    year,
                    value,
                    source: record.source.clone(),
                });
            }
        }
    }

    trends.sort_by_key(|t| t.year);
    trends
}

pub fn compute_confidence(results: &SourceResults) -> f64 {
    let mut confidence = results.success_count() as f64 * 0.15;
    if results.task_analysis.is_some() {
        confidence += 0.1;
    }
    if results.research.is_some() {
        confidence += 0.1;
    }
    confidence.min(MAX_CONFIDENCE)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Decision {
    source: DataSource,
    confidence: f64,
}

/// Turn collected source data into a result.
pub fn decide(
    occupation: &Occupation,
    results: &SourceResults,
    fallback_to_static: bool,
    weights: &CategoryWeights,
) -> Result<DynamicApoResult, AggregateError> {
    validate_payload(results)?;

    let succeeded = results.success_count();
    let (scores, mut decision) = if succeeded >= 2 {
        let scores = CategoryScores::from_fn(|category| {
            dynamic_category_score(category, occupation.items(category), results)
        });
        let decision = Decision {
            source: DataSource::Dynamic,
            confidence: compute_confidence(results),
        };
        (scores, decision)
    } else if fallback_to_static {
        let decision = Decision {
            source: DataSource::Static,
            confidence: STATIC_CONFIDENCE,
        };
        (category_scores(occupation), decision)
    } else {
        return Err(AggregateError::InsufficientData);
    };

    if succeeded > 0 && decision.source == DataSource::Static {
        decision = Decision {
            source: DataSource::Hybrid,
            confidence: HYBRID_CONFIDENCE,
        };
    }

    info!(
        occupation = %occupation.title,
        succeeded,
        data_source = %decision.source,
        confidence = decision.confidence,
        "aggregation decided"
    );

    let mut result = DynamicApoResult {
        overall_apo: weighted_overall(&scores, weights),
        category_scores: scores,
        trends: extract_trends(results),
        insights: Vec::new(),
        data_confidence: decision.confidence,
        data_source: decision.source,
        sources_used: results.succeeded(),
    };
    result.insights = generate_insights(occupation, &result, results);
    Ok(result)
}

pub const ERROR_INSIGHT: &str = "Error occurred during dynamic APO calculation";
pub const ERROR_FALLBACK_INSIGHT: &str = "Results based on static data as fallback";

/// Static result returned when source data could not be used.
pub fn error_fallback(occupation: &Occupation, weights: &CategoryWeights) -> DynamicApoResult {
    let scores = category_scores(occupation);
    let mut result = DynamicApoResult {
        overall_apo: weighted_overall(&scores, weights),
        category_scores: scores,
        trends: Vec::new(),
        insights: Vec::new(),
        data_confidence: ERROR_FALLBACK_CONFIDENCE,
        data_source: DataSource::Static,
        sources_used: Vec::new(),
    };

    let mut insights = vec![ERROR_INSIGHT.to_string(), ERROR_FALLBACK_INSIGHT.to_string()];
    insights.extend(generate_insights(occupation, &result, &SourceResults::default()));
    result.insights = insights;
    result
}
