use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum MaturityLevel {
    Experimental,
    Emerging,
    Growth,
    Mature,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandTrend {
    Increasing,
    Stable,
    Decreasing,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequirement {
    pub skill_name: String,
    pub proficiency_level: f64, // 0-1
    pub demand_trend: DemandTrend,
    pub availability_score: f64, // 0-1
    pub time_to_acquire: u32,    // months
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct JobsAffected {
    pub created: u64,
    pub modified: u64,
    pub displaced: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryImpact {
    pub industry: String,
    pub disruption_level: f64, // 0-1
    pub adoption_rate: f64,    // 0-1
    pub jobs_affected: JobsAffected,
    pub timeline_to_impact: u32, // months
}

impl IndustryImpact {
    /// True when the technology creates or reshapes jobs in this industry
    pub fn affects_jobs(&self) -> bool {
        self.jobs_affected.created > 0 || self.jobs_affected.modified > 0
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergingTechnology {
    pub id: String,
    pub name: String,
    pub category: String,
    pub maturity_level: MaturityLevel,
    pub impact_score: f64,      // 0-1
    pub time_to_mainstream: u32, // months
    #[serde(default)]
    pub skill_requirements: Vec<SkillRequirement>,
    #[serde(default)]
    pub industry_impacts: Vec<IndustryImpact>,
}

impl EmergingTechnology {
    pub fn industry_impact(&self, industry: &str) -> Option<&IndustryImpact> {
        self.industry_impacts
            .iter()
            .find(|i| i.industry.eq_ignore_ascii_case(industry.trim()))
    }

    /// Lower-cased words of the name and every skill requirement name
    pub fn keywords(&self) -> std::collections::HashSet<String> {
        std::iter::once(self.name.as_str())
            .chain(self.skill_requirements.iter().map(|s| s.skill_name.as_str()))
            .flat_map(str::split_whitespace)
            .map(str::to_lowercase)
            .collect()
    }
}
