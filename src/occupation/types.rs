use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Generative-AI exposure tag carried by an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum GenAiImpact {
    Low,
    Medium,
    High,
}

impl GenAiImpact {
    /// Multiplier applied by the static engine
    pub fn factor(self) -> f64 {
        match self {
            GenAiImpact::Low => 0.9,
            GenAiImpact::Medium => 1.1,
            GenAiImpact::High => 1.3,
        }
    }
}

/// One task, skill, knowledge area, ability or technology entry.
///
/// Occupation data providers are inconsistent about the label field: some
/// send `name`, some send `title`. Deserialization resolves it once here
/// (`name` first, then `title`) so nothing downstream has to care.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ScorableItem {
    pub name: String,
    pub description: Option<String>,
    pub importance: Option<f64>, // 0-100
    pub level: Option<f64>,      // 0-100
    pub gen_ai_impact: Option<GenAiImpact>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    importance: Option<f64>,
    #[serde(default)]
    level: Option<f64>,
    #[serde(default, alias = "gen_ai_impact", alias = "genAIImpact")]
    gen_ai_impact: Option<GenAiImpact>,
}

impl<'de> Deserialize<'de> for ScorableItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawItem::deserialize(deserializer)?;
        let name = raw
            .name
            .filter(|n| !n.trim().is_empty())
            .or(raw.title)
            .unwrap_or_default();
        Ok(ScorableItem {
            name,
            description: raw.description,
            importance: raw.importance,
            level: raw.level,
            gen_ai_impact: raw.gen_ai_impact,
        })
    }
}

impl ScorableItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Name and description joined, as used for phrase matching
    pub fn text(&self) -> String {
        match self.description.as_deref() {
            Some(desc) if !desc.trim().is_empty() => format!("{} {}", self.name, desc),
            _ => self.name.clone(),
        }
    }
}

/// The five item categories an occupation is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tasks,
    Knowledge,
    Skills,
    Abilities,
    Technologies,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Tasks,
        Category::Knowledge,
        Category::Skills,
        Category::Abilities,
        Category::Technologies,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Tasks => "tasks",
            Category::Knowledge => "knowledge",
            Category::Skills => "skills",
            Category::Abilities => "abilities",
            Category::Technologies => "technologies",
        }
    }

    /// Phrase used in insight sentences
    pub fn describe(self) -> &'static str {
        match self {
            Category::Tasks => "tasks and responsibilities",
            Category::Knowledge => "knowledge requirements",
            Category::Skills => "skills",
            Category::Abilities => "abilities",
            Category::Technologies => "technology usage",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An occupation as supplied by the occupation data provider.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Occupation {
    pub title: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub tasks: Vec<ScorableItem>,
    #[serde(default)]
    pub knowledge: Vec<ScorableItem>,
    #[serde(default)]
    pub skills: Vec<ScorableItem>,
    #[serde(default)]
    pub abilities: Vec<ScorableItem>,
    #[serde(default)]
    pub technologies: Vec<ScorableItem>,
    #[serde(default)]
    pub industry_specific: bool,
}

impl Occupation {
    pub fn items(&self, category: Category) -> &[ScorableItem] {
        match category {
            Category::Tasks => &self.tasks,
            Category::Knowledge => &self.knowledge,
            Category::Skills => &self.skills,
            Category::Abilities => &self.abilities,
            Category::Technologies => &self.technologies,
        }
    }

    /// Resolved item names for a category, in input order
    pub fn names(&self, category: Category) -> Vec<String> {
        self.items(category).iter().map(|i| i.name.clone()).collect()
    }
}

/// Per-category score map used by both engines' results.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryScores {
    pub tasks: f64,
    pub knowledge: f64,
    pub skills: f64,
    pub abilities: f64,
    pub technologies: f64,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Tasks => self.tasks,
            Category::Knowledge => self.knowledge,
            Category::Skills => self.skills,
            Category::Abilities => self.abilities,
            Category::Technologies => self.technologies,
        }
    }

    pub fn set(&mut self, category: Category, value: f64) {
        match category {
            Category::Tasks => self.tasks = value,
            Category::Knowledge => self.knowledge = value,
            Category::Skills => self.skills = value,
            Category::Abilities => self.abilities = value,
            Category::Technologies => self.technologies = value,
        }
    }

    /// Build from a per-category function, in `Category::ALL` order
    pub fn from_fn<F: FnMut(Category) -> f64>(mut f: F) -> Self {
        let mut scores = CategoryScores::default();
        for category in Category::ALL {
            scores.set(category, f(category));
        }
        scores
    }

    /// Iterate as `(category, score)` in `Category::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_preferred_over_title() {
        let item: ScorableItem =
            serde_json::from_str(r#"{"name": "Programming", "title": "Coding"}"#).unwrap();
        assert_eq!(item.name, "Programming");
    }

    #[test]
    fn test_title_fallback() {
        let item: ScorableItem =
            serde_json::from_str(r#"{"title": "Debugging", "importance": 70}"#).unwrap();
        assert_eq!(item.name, "Debugging");
        assert_eq!(item.importance, Some(70.0));
    }

    #[test]
    fn test_missing_label_is_empty() {
        let item: ScorableItem = serde_json::from_str(r#"{"level": 40}"#).unwrap();
        assert_eq!(item.name, "");
        assert_eq!(item.level, Some(40.0));
    }

    #[test]
    fn test_gen_ai_impact_parse() {
        let item: ScorableItem =
            serde_json::from_str(r#"{"name": "Testing", "genAIImpact": "High"}"#).unwrap();
        assert_eq!(item.gen_ai_impact, Some(GenAiImpact::High));
    }

    #[test]
    fn test_occupation_defaults_empty_lists() {
        let occ: Occupation = serde_json::from_str(r#"{"title": "Energy Auditor"}"#).unwrap();
        assert!(occ.tasks.is_empty());
        assert!(occ.technologies.is_empty());
        assert!(!occ.industry_specific);
    }

    #[test]
    fn test_item_text_skips_blank_description() {
        let mut item = ScorableItem::new("Analyzing Data");
        item.description = Some("".to_string());
        assert_eq!(item.text(), "Analyzing Data");
        item.description = Some("from sensors".to_string());
        assert_eq!(item.text(), "Analyzing Data from sensors");
    }

    #[test]
    fn test_category_scores_iter_order() {
        let scores = CategoryScores::from_fn(|c| match c {
            Category::Tasks => 1.0,
            Category::Technologies => 5.0,
            _ => 0.0,
        });
        let order: Vec<_> = scores.iter().map(|(c, _)| c).collect();
        assert_eq!(order, Category::ALL.to_vec());
        assert_eq!(scores.get(Category::Technologies), 5.0);
    }
}
