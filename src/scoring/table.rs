use std::collections::HashSet;

use crate::occupation::Category;

/// Below this similarity the synonym map is consulted as well.
pub const SYNONYM_THRESHOLD: f64 = 0.3;

const TASKS: &[(&str, f64)] = &[
    ("Analyzing Data", 65.0),
    ("Preparing Reports", 55.0),
    ("Coordinating Activities", 40.0),
    ("Evaluating Information", 35.0),
    ("Developing Objectives", 25.0),
    ("Communicating", 30.0),
    ("Monitoring Processes", 50.0),
    ("Training", 35.0),
    ("Problem Solving", 45.0),
    ("Updating Knowledge", 60.0),
    ("Identifying Issues", 40.0),
    ("Conducting Audits", 55.0),
    ("Recommending Solutions", 50.0),
    ("Calculating Metrics", 70.0),
    ("Inspecting Systems", 45.0),
    ("Analyzing Feasibility", 60.0),
    ("Collecting Data", 55.0),
    ("Programming", 65.0),
    ("Debugging", 55.0),
    ("Testing", 50.0),
    ("Documenting", 45.0),
    ("Energy Analysis", 60.0),
    ("Auditing", 55.0),
    ("Calculating Savings", 65.0),
    ("Identifying Improvements", 55.0),
];

const KNOWLEDGE: &[(&str, f64)] = &[
    ("Administration and Management", 35.0),
    ("Customer and Personal Service", 40.0),
    ("Engineering and Technology", 50.0),
    ("Mathematics", 70.0),
    ("English Language", 55.0),
    ("Computers and Electronics", 60.0),
    ("Education and Training", 40.0),
    ("Psychology", 30.0),
    ("Law and Government", 45.0),
    ("Production and Processing", 55.0),
    ("Design", 45.0),
    ("Geography", 40.0),
];

const SKILLS: &[(&str, f64)] = &[
    ("Active Listening", 35.0),
    ("Critical Thinking", 40.0),
    ("Reading Comprehension", 60.0),
    ("Speaking", 25.0),
    ("Writing", 55.0),
    ("Active Learning", 50.0),
    ("Monitoring", 65.0),
    ("Social Perceptiveness", 20.0),
    ("Time Management", 45.0),
    ("Complex Problem Solving", 40.0),
    ("Systems Analysis", 55.0),
    ("Quality Control Analysis", 50.0),
    ("Judgment and Decision Making", 45.0),
];

const ABILITIES: &[(&str, f64)] = &[
    ("Oral Comprehension", 40.0),
    ("Written Comprehension", 65.0),
    ("Oral Expression", 25.0),
    ("Written Expression", 55.0),
    ("Fluency of Ideas", 35.0),
    ("Originality", 30.0),
    ("Problem Sensitivity", 55.0),
    ("Deductive Reasoning", 50.0),
    ("Inductive Reasoning", 60.0),
    ("Information Ordering", 70.0),
    ("Near Vision", 40.0),
    ("Speech Recognition", 35.0),
];

const TECHNOLOGIES: &[(&str, f64)] = &[
    ("Development Environment", 55.0),
    ("Presentation Software", 50.0),
    ("Object Oriented Development", 60.0),
    ("Web Platform Development", 65.0),
    ("Database Management", 70.0),
    ("Operating System", 45.0),
    ("Data Base User Interface", 55.0),
    ("Compiler and Decompiler", 50.0),
    ("Enterprise Resource Planning", 60.0),
    ("Enterprise Application Integration", 65.0),
];

const SYNONYMS: &[(&str, &[&str])] = &[
    ("Analyzing Data", &["data analysis", "statistical analysis", "data mining", "analyze information", "evaluate data"]),
    ("Preparing Reports", &["report writing", "documentation", "summarizing findings", "create documents"]),
    ("Coordinating Activities", &["project management", "organizing", "scheduling", "coordinate tasks"]),
    ("Evaluating Information", &["assess information", "review data", "examine results", "evaluate findings"]),
    ("Developing Objectives", &["goal setting", "planning", "strategy development", "establish targets"]),
    ("Communicating", &["presenting", "explaining", "discussing", "conveying information"]),
    ("Monitoring Processes", &["overseeing operations", "supervising", "tracking progress", "quality control"]),
    ("Training", &["teaching", "instructing", "educating", "skill development"]),
    ("Problem Solving", &["troubleshooting", "resolving issues", "finding solutions", "addressing challenges"]),
    ("Updating Knowledge", &["learning", "staying current", "professional development", "skill enhancement"]),
    ("Energy Analysis", &["energy-saving measures", "energy efficiency", "energy consumption"]),
    ("Auditing", &["audit reports", "energy analysis results", "cost savings recommendations"]),
    ("Recommending Solutions", &["recommend technologies", "suggest alternatives", "propose improvements"]),
    ("Calculating Savings", &["calculate potential", "estimate savings", "quantify benefits"]),
    ("Identifying Improvements", &["identify measures", "prioritize improvements", "spot inefficiencies"]),
];

/// Outcome of a phrase lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseMatch {
    /// Canonical phrase whose score was taken
    pub phrase: &'static str,
    /// Alternate phrasing that matched, when the synonym pass won
    pub synonym: Option<&'static str>,
    pub similarity: f64,
    pub base_score: f64,
}

/// Ordered canonical phrase table for a category.
pub fn phrases(category: Category) -> &'static [(&'static str, f64)] {
    match category {
        Category::Tasks => TASKS,
        Category::Knowledge => KNOWLEDGE,
        Category::Skills => SKILLS,
        Category::Abilities => ABILITIES,
        Category::Technologies => TECHNOLOGIES,
    }
}

/// Base score of a canonical phrase within a category, if listed.
pub fn base_score(category: Category, phrase: &str) -> Option<f64> {
    phrases(category)
        .iter()
        .find(|(p, _)| *p == phrase)
        .map(|(_, score)| *score)
}

/// Alternate phrasings recorded for a canonical phrase.
pub fn synonyms(phrase: &str) -> &'static [&'static str] {
    SYNONYMS
        .iter()
        .find(|(p, _)| *p == phrase)
        .map(|(_, alts)| *alts)
        .unwrap_or(&[])
}

fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(|w| w.to_lowercase()).collect()
}

/// Bag-of-words overlap: shared words over the larger word count.
pub fn similarity(a: &str, b: &str) -> f64 {
    let set_a = word_set(a);
    let set_b = word_set(b);
    let larger = set_a.len().max(set_b.len());
    if larger == 0 {
        return 0.0;
    }
    set_a.intersection(&set_b).count() as f64 / larger as f64
}

/// Find the canonical phrase closest to `text` within `category`.
///
/// The highest similarity wins and ties keep the earlier phrase. When the
/// best direct similarity stays under [`SYNONYM_THRESHOLD`], alternate
/// phrasings are searched too, scoring with their owner's base score. Owners
/// missing from this category's table are skipped. Returns `None` when nothing
/// overlaps at all.
pub fn best_match(text: &str, category: Category) -> Option<PhraseMatch> {
    let mut best: Option<PhraseMatch> = None;
    let mut best_similarity = 0.0;

    for &(phrase, score) in phrases(category) {
        let s = similarity(text, phrase);
        if s > best_similarity {
            best_similarity = s;
            best = Some(PhraseMatch {
                phrase,
                synonym: None,
                similarity: s,
                base_score: score,
            });
        }
    }

    if best_similarity < SYNONYM_THRESHOLD {
        for &(owner, alternates) in SYNONYMS {
            let Some(score) = base_score(category, owner) else {
                continue;
            };
            for &alt in alternates {
                let s = similarity(text, alt);
                if s > best_similarity {
                    best_similarity = s;
                    best = Some(PhraseMatch {
                        phrase: owner,
                        synonym: Some(alt),
                        similarity: s,
                        base_score: score,
                    });
                }
            }
        }
    }

    best
}
