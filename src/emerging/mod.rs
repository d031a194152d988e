//! Emerging-technology impact weighting.

pub mod catalog;
pub mod types;

use std::collections::HashSet;

use tracing::debug;

pub use catalog::{catalog, known_occupations, occupation_skills};
pub use types::{
    DemandTrend, EmergingTechnology, IndustryImpact, JobsAffected, MaturityLevel, SkillRequirement,
};

/// Share of a task's words that a technology's keywords cover.
pub fn relevance(task_text: &str, technology: &EmergingTechnology) -> f64 {
    let task_words: HashSet<String> = task_text.split_whitespace().map(str::to_lowercase).collect();
    if task_words.is_empty() {
        return 0.0;
    }
    let keywords = technology.keywords();
    task_words.intersection(&keywords).count() as f64 / task_words.len() as f64
}

/// Discount for technologies further from the mainstream.
pub fn time_weight(time_to_mainstream_months: u32) -> f64 {
    1.0 / (1.0 + f64::from(time_to_mainstream_months) / 12.0)
}

/// Relevance and time weighted impact of `technologies` on a task.
///
/// Only technologies that create or modify jobs in at least one industry take
/// part. The result is the mean over those, and 0 when none qualify.
pub fn impact(task_text: &str, technologies: &[EmergingTechnology]) -> f64 {
    let qualifying: Vec<&EmergingTechnology> = technologies
        .iter()
        .filter(|t| t.industry_impacts.iter().any(IndustryImpact::affects_jobs))
        .collect();

    if qualifying.is_empty() {
        return 0.0;
    }

    let total: f64 = qualifying
        .iter()
        .map(|t| t.impact_score * relevance(task_text, t) * time_weight(t.time_to_mainstream))
        .sum();

    let mean = total / qualifying.len() as f64;
    debug!(task = task_text, considered = qualifying.len(), impact = mean, "emerging tech impact");
    mean
}

/// Technologies from `technologies` that disrupt `industry` and call for a
/// skill tied to `occupation`.
pub fn recommend_from<'a>(
    technologies: &'a [EmergingTechnology],
    industry: &str,
    occupation: &str,
) -> Vec<&'a EmergingTechnology> {
    let skills = occupation_skills(occupation);
    if skills.is_empty() {
        return Vec::new();
    }

    technologies
        .iter()
        .filter(|t| {
            t.industry_impact(industry)
                .is_some_and(|i| i.disruption_level > 0.5)
        })
        .filter(|t| {
            t.skill_requirements
                .iter()
                .any(|req| skills.iter().any(|s| s.eq_ignore_ascii_case(&req.skill_name)))
        })
        .collect()
}

/// Catalog technologies worth watching for an occupation within an industry.
pub fn recommend_technologies(industry: &str, occupation: &str) -> Vec<&'static EmergingTechnology> {
    recommend_from(catalog(), industry, occupation)
}

/// Projected impact of each technology after `horizon_months`, scaled by how
/// far along its path to the mainstream it will be.
pub fn adoption_outlook(technologies: &[EmergingTechnology], horizon_months: u32) -> Vec<(String, f64)> {
    technologies
        .iter()
        .map(|t| {
            let progress = if t.time_to_mainstream == 0 {
                1.0
            } else {
                (f64::from(horizon_months) / f64::from(t.time_to_mainstream)).min(1.0)
            };
            (t.name.clone(), t.impact_score * progress)
        })
        .collect()
}
