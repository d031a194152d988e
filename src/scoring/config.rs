use serde::{Deserialize, Serialize};

use crate::occupation::Category;

/// Category multipliers for the enhanced engine. Unlisted categories use
/// [`DEFAULT_CATEGORY_MULTIPLIER`].
pub const CATEGORY_MULTIPLIERS: &[(&str, f64)] = &[
    ("cognitive", 0.9),
    ("manual", 0.7),
    ("social", 0.5),
    ("creative", 0.6),
    ("analytical", 0.8),
];

pub const DEFAULT_CATEGORY_MULTIPLIER: f64 = 0.7;

/// Look up the multiplier for an automation factor category (case-insensitive).
pub fn category_multiplier(category: &str) -> f64 {
    let category = category.trim();
    CATEGORY_MULTIPLIERS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(category))
        .map(|(_, m)| *m)
        .unwrap_or(DEFAULT_CATEGORY_MULTIPLIER)
}

/// Words that mark an item as highly exposed to generative AI.
pub const HIGH_IMPACT_KEYWORDS: &[&str] = &["analyze", "calculate", "predict", "optimize"];

/// Words that mark an item as mostly out of generative AI's reach.
pub const LOW_IMPACT_KEYWORDS: &[&str] = &["manual", "physical", "inspect", "repair"];

/// Category weights for the overall score.
///
/// Example YAML:
/// ```yaml
/// weights:
///   tasks: 0.3
///   knowledge: 0.2
///   skills: 0.2
///   abilities: 0.15
///   technologies: 0.15
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CategoryWeights {
    pub tasks: f64,
    pub knowledge: f64,
    pub skills: f64,
    pub abilities: f64,
    pub technologies: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            tasks: 0.30,
            knowledge: 0.20,
            skills: 0.20,
            abilities: 0.15,
            technologies: 0.15,
        }
    }
}

impl CategoryWeights {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Tasks => self.tasks,
            Category::Knowledge => self.knowledge,
            Category::Skills => self.skills,
            Category::Abilities => self.abilities,
            Category::Technologies => self.technologies,
        }
    }

    pub fn sum(&self) -> f64 {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }
}
