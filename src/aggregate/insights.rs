use super::collect::SourceResults;
use super::{DataSource, DynamicApoResult};
use crate::occupation::{Category, CategoryScores, Occupation};
use crate::sources::Sentiment;

const HIGH_APO: f64 = 70.0;
const MODERATE_APO: f64 = 40.0;
const TREND_SHIFT: f64 = 10.0;

fn overall_insight(title: &str, overall: f64) -> String {
    if overall > HIGH_APO {
        format!(
            "{} has a high automation potential ({:.1}%), suggesting significant portions of this role may be automated in the future.",
            title, overall
        )
    } else if overall > MODERATE_APO {
        format!(
            "{} has a moderate automation potential ({:.1}%), indicating some tasks may be automated while others require human skills.",
            title, overall
        )
    } else {
        format!(
            "{} has a low automation potential ({:.1}%), suggesting this role is relatively resistant to automation.",
            title, overall
        )
    }
}

fn first_best<I, F>(entries: I, better: F) -> Option<(Category, f64)>
where
    I: Iterator<Item = (Category, f64)>,
    F: Fn(f64, f64) -> bool,
{
    entries.fold(None, |best, current| match best {
        Some(b) if !better(current.1, b.1) => Some(b),
        _ => Some(current),
    })
}

/// Highest and lowest scoring categories. The first category wins ties.
///
/// Categories without items are not candidates for the lowest unless every
/// category is empty.
pub fn extremes(scores: &CategoryScores, occupation: &Occupation) -> ((Category, f64), (Category, f64)) {
    let fallback = (Category::Tasks, scores.tasks);
    let high = first_best(scores.iter(), |a, b| a > b).unwrap_or(fallback);
    let low = first_best(
        scores.iter().filter(|(c, _)| !occupation.items(*c).is_empty()),
        |a, b| a < b,
    )
    .or_else(|| first_best(scores.iter(), |a, b| a < b))
    .unwrap_or(fallback);
    (high, low)
}

fn trend_insight(result: &DynamicApoResult) -> Option<String> {
    if result.trends.len() < 2 {
        return None;
    }
    let oldest = result.trends.first()?;
    let newest = result.trends.last()?;
    let difference = newest.value - oldest.value;

    let span = format!(
        "from {:.1}% in {} to {:.1}% in {}",
        oldest.value, oldest.year, newest.value, newest.year
    );
    Some(if difference > TREND_SHIFT {
        format!("Automation potential has increased significantly {}.", span)
    } else if difference < -TREND_SHIFT {
        format!(
            "Automation potential has decreased {}, suggesting increasing value of human skills in this role.",
            span
        )
    } else {
        format!("Automation potential has remained relatively stable {}.", span)
    })
}

fn sentiment_insight(results: &SourceResults) -> Option<String> {
    let sentiments: Vec<Sentiment> = results
        .research
        .iter()
        .flatten()
        .flat_map(|record| record.automation_mentions.iter())
        .filter_map(|mention| mention.sentiment)
        .collect();

    if sentiments.is_empty() {
        return None;
    }

    let positive = sentiments.iter().filter(|s| **s == Sentiment::Positive).count();
    let ratio = positive as f64 / sentiments.len() as f64;

    Some(
        if ratio > 0.6 {
            "Research generally views automation in this field positively, focusing on augmentation rather than replacement."
        } else if ratio < 0.4 {
            "Research indicates concerns about automation's impact on this occupation, with emphasis on potential job displacement."
        } else {
            "Research shows mixed perspectives on automation's impact on this occupation."
        }
        .to_string(),
    )
}

fn source_insight(source: DataSource, confidence: f64) -> String {
    let percent = confidence * 100.0;
    match source {
        DataSource::Dynamic => format!(
            "This analysis is based on real-time data from multiple sources with {:.0}% confidence.",
            percent
        ),
        DataSource::Hybrid => format!(
            "This analysis combines real-time data with predefined models with {:.0}% confidence.",
            percent
        ),
        DataSource::Static => format!(
            "This analysis is based on predefined models with {:.0}% confidence. Consider enabling API access for more accurate results.",
            percent
        ),
    }
}

/// Human-readable observations about a result, in a fixed order: overall
/// level, strongest and weakest category, trend direction, research
/// sentiment, then where the data came from. Trend and sentiment lines are
/// left out when there is nothing to say.
pub fn generate_insights(occupation: &Occupation, result: &DynamicApoResult, results: &SourceResults) -> Vec<String> {
    let mut insights = vec![overall_insight(&occupation.title, result.overall_apo)];

    let ((high, high_score), (low, low_score)) = extremes(&result.category_scores, occupation);
    insights.push(format!(
        "The most automatable aspect is {} ({:.1}%).",
        high.describe(),
        high_score
    ));
    insights.push(format!(
        "The least automatable aspect is {} ({:.1}%).",
        low.describe(),
        low_score
    ));

    insights.extend(trend_insight(result));
    insights.extend(sentiment_insight(results));
    insights.push(source_insight(result.data_source, result.data_confidence));
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::TrendPoint;
    use crate::sources::{Mention, ResearchRecord};

    fn result(overall: f64, scores: CategoryScores, trends: Vec<TrendPoint>, source: DataSource) -> DynamicApoResult {
        DynamicApoResult {
            overall_apo: overall,
            category_scores: scores,
            trends,
            insights: Vec::new(),
            data_confidence: 0.6,
            data_source: source,
            sources_used: Vec::new(),
        }
    }

    fn point(year: i32, value: f64) -> TrendPoint {
        TrendPoint {
            year,
            value,
            source: "OECD".to_string(),
        }
    }

    fn occupation() -> Occupation {
        Occupation {
            title: "Bookkeeper".to_string(),
            ..Default::default()
        }
    }

    fn research(sentiments: &[Sentiment]) -> SourceResults {
        let mentions = sentiments
            .iter()
            .map(|s| Mention {
                text: "automation".to_string(),
                automation_percentage: None,
                year: None,
                sentiment: Some(*s),
            })
            .collect();
        SourceResults {
            research: Some(vec![ResearchRecord {
                source: "Brookings".to_string(),
                title: "Study".to_string(),
                date: String::new(),
                url: String::new(),
                automation_mentions: mentions,
                relevance_score: None,
            }]),
            ..Default::default()
        }
    }

    #[test]
    fn test_overall_levels() {
        assert!(overall_insight("Bookkeeper", 70.5).contains("high automation potential (70.5%)"));
        assert!(overall_insight("Bookkeeper", 70.0).contains("moderate"));
        assert!(overall_insight("Bookkeeper", 40.0).contains("low automation potential"));
    }

    #[test]
    fn test_extremes_first_wins_ties() {
        let scores = CategoryScores {
            tasks: 50.0,
            knowledge: 50.0,
            skills: 20.0,
            abilities: 20.0,
            technologies: 30.0,
        };
        let ((high, _), (low, _)) = extremes(&scores, &occupation());
        assert_eq!(high, Category::Tasks);
        assert_eq!(low, Category::Skills);
    }

    #[test]
    fn test_empty_category_is_never_lowest() {
        let occ = Occupation {
            tasks: vec![crate::occupation::ScorableItem::new("Auditing")],
            skills: vec![crate::occupation::ScorableItem::new("Monitoring")],
            ..occupation()
        };
        let scores = CategoryScores {
            tasks: 55.0,
            knowledge: 0.0,
            skills: 65.0,
            abilities: 0.0,
            technologies: 0.0,
        };
        let ((high, _), (low, low_score)) = extremes(&scores, &occ);
        assert_eq!(high, Category::Skills);
        assert_eq!(low, Category::Tasks);
        assert_eq!(low_score, 55.0);

        let r = result(30.0, scores, vec![], DataSource::Static);
        let insights = generate_insights(&occ, &r, &SourceResults::default());
        assert_eq!(insights[2], "The least automatable aspect is tasks and responsibilities (55.0%).");
    }

    #[test]
    fn test_static_insights_have_four_lines() {
        let scores = CategoryScores {
            tasks: 60.0,
            knowledge: 70.0,
            skills: 65.0,
            abilities: 55.0,
            technologies: 70.0,
        };
        let r = result(63.5, scores, vec![], DataSource::Static);
        let insights = generate_insights(&occupation(), &r, &SourceResults::default());
        assert_eq!(insights.len(), 4);
        assert_eq!(insights[1], "The most automatable aspect is knowledge requirements (70.0%).");
        assert_eq!(insights[2], "The least automatable aspect is abilities (55.0%).");
        assert!(insights[3].starts_with("This analysis is based on predefined models with 60% confidence."));
    }

    #[test]
    fn test_trend_directions() {
        let up = result(50.0, CategoryScores::default(), vec![point(2018, 20.0), point(2023, 45.0)], DataSource::Dynamic);
        assert_eq!(
            trend_insight(&up).unwrap(),
            "Automation potential has increased significantly from 20.0% in 2018 to 45.0% in 2023."
        );

        let down = result(50.0, CategoryScores::default(), vec![point(2018, 45.0), point(2023, 20.0)], DataSource::Dynamic);
        assert!(trend_insight(&down).unwrap().contains("human skills"));

        let flat = result(50.0, CategoryScores::default(), vec![point(2018, 30.0), point(2023, 40.0)], DataSource::Dynamic);
        assert!(trend_insight(&flat).unwrap().contains("remained relatively stable"));

        let single = result(50.0, CategoryScores::default(), vec![point(2020, 30.0)], DataSource::Dynamic);
        assert!(trend_insight(&single).is_none());
    }

    #[test]
    fn test_sentiment_ratio() {
        use Sentiment::*;
        assert!(sentiment_insight(&research(&[Positive, Positive, Positive, Negative]))
            .unwrap()
            .contains("positively"));
        assert!(sentiment_insight(&research(&[Negative, Neutral, Positive]))
            .unwrap()
            .contains("concerns"));
        assert!(sentiment_insight(&research(&[Positive, Negative]))
            .unwrap()
            .contains("mixed"));
        assert!(sentiment_insight(&research(&[])).is_none());
    }

    #[test]
    fn test_source_lines() {
        assert_eq!(
            source_insight(DataSource::Dynamic, 0.85),
            "This analysis is based on real-time data from multiple sources with 85% confidence."
        );
        assert_eq!(
            source_insight(DataSource::Hybrid, 0.6),
            "This analysis combines real-time data with predefined models with 60% confidence."
        );
    }
}
