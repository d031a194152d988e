use std::io::IsTerminal;
use owo_colors::OwoColorize;

use crate::aggregate::{DataSource, DynamicApoResult};
use crate::emerging::EmergingTechnology;
use crate::industry::IndustryContext;
use crate::occupation::{Category, CategoryScores, Occupation};
use crate::scoring::{explain_item, time_horizon_years, ApoResult, AutomationFactor, ItemScore};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format an APO score on the 0-100 scale with one decimal
/// Trailing ".0" is dropped ("65.0" -> "65")
pub fn format_score(score: f64) -> String {
    let formatted = format!("{:.1}", score);
    match formatted.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => formatted,
    }
}

/// Format a 0-1 ratio as a whole percentage ("0.75" -> "75%")
pub fn format_ratio(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// Score column, right-aligned, 6 chars wide (fits "1000.0")
fn score_cell(score: f64, use_colors: bool) -> String {
    let padded = format!("{:>6}", format_score(score));
    if !use_colors {
        return padded;
    }
    if score > 70.0 {
        padded.red().to_string()
    } else if score > 40.0 {
        padded.yellow().to_string()
    } else {
        padded.green().to_string()
    }
}

/// One line per category plus the weighted overall.
pub fn format_category_table(scores: &CategoryScores, overall: f64, use_colors: bool) -> String {
    let mut lines: Vec<String> = scores
        .iter()
        .map(|(category, score)| format!("  {:<13}{}", category.as_str(), score_cell(score, use_colors)))
        .collect();
    lines.push(format!(
        "  {:<13}{}",
        heading("overall", use_colors),
        score_cell(overall, use_colors)
    ));
    lines.join("\n")
}

/// Static result header plus the category table.
pub fn format_static(occupation: &Occupation, scores: &CategoryScores, overall: f64, use_colors: bool) -> String {
    format!(
        "{} (static APO)\n{}",
        heading(&occupation.title, use_colors),
        format_category_table(scores, overall, use_colors)
    )
}

fn format_item_score(name: &str, result: &ItemScore, use_colors: bool) -> String {
    let mut out = format!("    {}  {}", score_cell(result.score, use_colors), name);

    match result.breakdown.matched {
        Some(ref m) => {
            let via = m.synonym.map(|s| format!(" via \"{}\"", s)).unwrap_or_default();
            out.push_str(&format!(
                "\n             matched \"{}\"{} (similarity {:.2}, base {})",
                m.phrase,
                via,
                m.similarity,
                format_score(result.breakdown.base_score)
            ));
        }
        None => out.push_str("\n             no matching phrase (base 0)"),
    }

    for factor in &result.breakdown.factors {
        out.push_str(&format!(
            "\n             {}: {} ({} -> {})",
            factor.label,
            factor.description,
            format_score(factor.before),
            format_score(factor.after)
        ));
    }
    out
}

/// Per-item breakdown for every category of an occupation.
pub fn format_explanation(occupation: &Occupation, use_colors: bool) -> String {
    let mut sections = Vec::new();
    for category in Category::ALL {
        let items = occupation.items(category);
        let mut section = heading(&format!("  {} ({})", category.as_str(), category.describe()), use_colors);
        if items.is_empty() {
            section.push_str("\n    (no items)");
        }
        for item in items {
            section.push('\n');
            section.push_str(&format_item_score(&item.name, &explain_item(item, category), use_colors));
        }
        sections.push(section);
    }
    sections.join("\n")
}

/// Dynamic aggregation result: scores, trends, insights and provenance.
pub fn format_dynamic(occupation: &Occupation, result: &DynamicApoResult, use_colors: bool) -> String {
    let source_label = match result.data_source {
        DataSource::Dynamic if use_colors => result.data_source.green().to_string(),
        DataSource::Hybrid if use_colors => result.data_source.yellow().to_string(),
        DataSource::Static if use_colors => result.data_source.dimmed().to_string(),
        _ => result.data_source.to_string(),
    };

    let mut out = format!(
        "{} ({} APO, confidence {})\n{}",
        heading(&occupation.title, use_colors),
        source_label,
        format_ratio(result.data_confidence),
        format_category_table(&result.category_scores, result.overall_apo, use_colors)
    );

    if !result.sources_used.is_empty() {
        let names: Vec<&str> = result.sources_used.iter().map(|s| s.as_str()).collect();
        out.push_str(&format!("\n\nSources: {}", names.join(", ")));
    }

    if !result.trends.is_empty() {
        out.push_str(&format!("\n\n{}", heading("Trends", use_colors)));
        for point in &result.trends {
            out.push_str(&format!("\n  {}  {:>6}%  {}", point.year, format_score(point.value), point.source));
        }
    }

    if !result.insights.is_empty() {
        out.push_str(&format!("\n\n{}", heading("Insights", use_colors)));
        for insight in &result.insights {
            out.push_str(&format!("\n  - {}", insight));
        }
    }

    out
}

/// Enhanced factor result with its named sub-scores.
pub fn format_factor(factor: &AutomationFactor, result: &ApoResult, use_colors: bool) -> String {
    let f = &result.factors;
    let mut out = format!(
        "{} ({})\n  Score: {:.3}\n  Confidence: {}\n  Time horizon: ~{} years",
        heading(&factor.name, use_colors),
        factor.category,
        result.score,
        format_ratio(result.confidence),
        time_horizon_years(result.score)
    );
    out.push_str(&format!(
        "\n  Factors: base {:.3} x complexity {:.3} x collaboration {:.3} x industry {:.3} x emerging {:.3}",
        f.base_apo, f.complexity_factor, f.collaboration_factor, f.industry_factor, f.emerging_tech_factor
    ));
    if !result.recommendations.is_empty() {
        out.push_str(&format!("\n\n{}", heading("Recommendations", use_colors)));
        for rec in &result.recommendations {
            out.push_str(&format!("\n  - {}", rec));
        }
    }
    out
}

/// Industry-adjusted score next to the raw one.
pub fn format_industry(context: &IndustryContext, raw: f64, adjusted: f64, use_colors: bool) -> String {
    format!(
        "{} / {}\n  Raw score: {}\n  Adjusted score: {}\n  Tech adoption: {}%  Labor market: {}%",
        heading(&context.sector, use_colors),
        context.region,
        format_score(raw),
        if use_colors {
            format_score(adjusted).bold().to_string()
        } else {
            format_score(adjusted)
        },
        format_score(context.tech_adoption_rate),
        format_score(context.labor_market_factor)
    )
}

/// Recommended technologies and, when a task was given, the catalog impact on it.
pub fn format_emerging(
    industry: &str,
    occupation: &str,
    recommended: &[&EmergingTechnology],
    task_impact: Option<(&str, f64)>,
    use_colors: bool,
) -> String {
    let mut out = heading(
        &format!("Emerging technologies for {} in {}", occupation, industry),
        use_colors,
    );

    if recommended.is_empty() {
        out.push_str("\n  No technologies to recommend.");
    }
    for tech in recommended {
        let disruption = tech
            .industry_impact(industry)
            .map(|i| i.disruption_level)
            .unwrap_or(0.0);
        let name = if use_colors {
            tech.name.cyan().to_string()
        } else {
            tech.name.clone()
        };
        out.push_str(&format!(
            "\n  - {} [{:?}] impact {:.2}, disruption {:.2}, mainstream in ~{} months",
            name, tech.maturity_level, tech.impact_score, disruption, tech.time_to_mainstream
        ));
    }

    if let Some((task, impact)) = task_impact {
        out.push_str(&format!("\n\nImpact on \"{}\": {:.3}", task, impact));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::TrendPoint;
    use crate::occupation::ScorableItem;
    use crate::scoring::enhanced::score;
    use crate::sources::SourceKind;

    fn occupation() -> Occupation {
        Occupation {
            title: "Energy Auditor".to_string(),
            tasks: vec![
                ScorableItem {
                    importance: Some(80.0),
                    ..ScorableItem::new("Analyzing Data")
                },
                ScorableItem::new("troubleshooting"),
            ],
            knowledge: vec![ScorableItem::new("Underwater basket weaving")],
            ..Default::default()
        }
    }

    #[test]
    fn test_format_score_trims_zero_decimal() {
        assert_eq!(format_score(65.0), "65");
        assert_eq!(format_score(40.56), "40.6");
        assert_eq!(format_score(0.0), "0");
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(0.75), "75%");
        assert_eq!(format_ratio(0.0), "0%");
    }

    #[test]
    fn test_category_table_plain() {
        let scores = CategoryScores::from_fn(|c| if c == Category::Tasks { 60.0 } else { 0.0 });
        let table = format_category_table(&scores, 18.0, false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("  tasks"));
        assert!(lines[0].ends_with("60"));
        assert!(lines[5].contains("overall"));
        assert!(lines[5].ends_with("18"));
    }

    #[test]
    fn test_explanation_lists_matches_and_factors() {
        let text = format_explanation(&occupation(), false);
        assert!(text.contains("matched \"Analyzing Data\""));
        assert!(text.contains("Importance: 80/100 -> x0.8 (65 -> 52)"));
        assert!(text.contains("via \"troubleshooting\""));
        assert!(text.contains("no matching phrase"));
        assert!(text.contains("(no items)"));
    }

    #[test]
    fn test_format_dynamic_sections() {
        let result = DynamicApoResult {
            overall_apo: 42.0,
            category_scores: CategoryScores::default(),
            trends: vec![TrendPoint {
                year: 2023,
                value: 45.0,
                source: "Example Research".to_string(),
            }],
            insights: vec!["First insight".to_string()],
            data_confidence: 0.65,
            data_source: DataSource::Hybrid,
            sources_used: vec![SourceKind::AutomationTrends],
        };
        let text = format_dynamic(&occupation(), &result, false);
        assert!(text.starts_with("Energy Auditor (hybrid APO, confidence 65%)"));
        assert!(text.contains("Sources: automation trends"));
        assert!(text.contains("2023"));
        assert!(text.contains("  - First insight"));
    }

    #[test]
    fn test_format_dynamic_omits_empty_sections() {
        let result = DynamicApoResult {
            overall_apo: 10.0,
            category_scores: CategoryScores::default(),
            trends: vec![],
            insights: vec![],
            data_confidence: 0.5,
            data_source: DataSource::Static,
            sources_used: vec![],
        };
        let text = format_dynamic(&occupation(), &result, false);
        assert!(!text.contains("Sources:"));
        assert!(!text.contains("Trends"));
        assert!(!text.contains("Insights"));
    }

    #[test]
    fn test_format_factor() {
        let factor = AutomationFactor {
            id: "1".to_string(),
            name: "Reconcile ledgers".to_string(),
            weight: 1.0,
            category: "analytical".to_string(),
            complexity: 5,
            repetitiveness: 0.5,
            human_ai_collaboration: 1.0,
            industry_specific: false,
            emerging_tech_impact: 0.0,
        };
        let result = score(&factor, None);
        let text = format_factor(&factor, &result, false);
        assert!(text.contains("Score: 0.160"));
        assert!(text.contains("Confidence: 100%"));
        assert!(text.contains("Time horizon: ~20 years"));
        assert!(text.contains("Favor augmentation"));
    }

    #[test]
    fn test_format_industry() {
        let ctx = IndustryContext::new("Finance", "North America", 70.0, 50.0);
        let text = format_industry(&ctx, 50.0, 42.5, false);
        assert!(text.contains("Finance / North America"));
        assert!(text.contains("Adjusted score: 42.5"));
    }

    #[test]
    fn test_format_emerging_empty() {
        let text = format_emerging("Mining", "Astronaut", &[], None, false);
        assert!(text.contains("No technologies to recommend."));
        assert!(!text.contains("Impact on"));
    }

    #[test]
    fn test_format_emerging_with_task() {
        let recommended = crate::emerging::recommend_technologies("Finance", "Financial Analyst");
        let text = format_emerging("Finance", "Financial Analyst", &recommended, Some(("analyze data", 0.25)), false);
        for tech in &recommended {
            assert!(text.contains(&tech.name));
        }
        assert!(text.contains("Impact on \"analyze data\": 0.250"));
    }
}
