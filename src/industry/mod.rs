//! Sector, region and labor-market modifiers for APO scores.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fixed characteristics of an industry sector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorProfile {
    pub baseline_automation: f64,
    pub regulatory_complexity: f64,
    pub skill_requirements: f64,
}

impl SectorProfile {
    const fn new(baseline_automation: f64, regulatory_complexity: f64, skill_requirements: f64) -> Self {
        Self {
            baseline_automation,
            regulatory_complexity,
            skill_requirements,
        }
    }

    pub fn baseline(&self) -> f64 {
        self.baseline_automation * 0.5
            + (1.0 - self.regulatory_complexity) * 0.3
            + self.skill_requirements * 0.2
    }
}

pub const SECTORS: &[(&str, SectorProfile)] = &[
    ("Technology", SectorProfile::new(0.85, 0.6, 0.9)),
    ("Healthcare", SectorProfile::new(0.65, 0.9, 0.85)),
    ("Finance", SectorProfile::new(0.8, 0.95, 0.8)),
    ("Manufacturing", SectorProfile::new(0.9, 0.7, 0.75)),
    ("Retail", SectorProfile::new(0.75, 0.5, 0.6)),
    ("Education", SectorProfile::new(0.55, 0.7, 0.8)),
    ("Construction", SectorProfile::new(0.7, 0.75, 0.7)),
    ("Agriculture", SectorProfile::new(0.8, 0.6, 0.65)),
];

pub const DEFAULT_SECTOR: SectorProfile = SectorProfile::new(0.7, 0.7, 0.7);

pub const REGIONS: &[(&str, f64)] = &[
    ("North America", 1.0),
    ("Western Europe", 0.95),
    ("Asia Pacific", 0.90),
    ("Eastern Europe", 0.85),
    ("Latin America", 0.80),
    ("Middle East", 0.75),
    ("Africa", 0.70),
    ("South Asia", 0.85),
    ("Southeast Asia", 0.88),
    ("Oceania", 0.92),
];

pub const DEFAULT_REGIONAL_FACTOR: f64 = 0.85;

fn default_half() -> f64 {
    0.5
}

/// Where and under what market conditions an occupation is practiced.
///
/// `regulation_impact` and `human_interaction_level` are only read by the
/// enhanced engine's industry factor.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IndustryContext {
    pub sector: String,
    pub region: String,
    #[serde(alias = "techAdoptionRate")]
    pub tech_adoption_rate: f64, // 0-100
    #[serde(alias = "laborMarketFactors", alias = "labor_market_factors")]
    pub labor_market_factor: f64, // 0-100
    #[serde(default = "default_half", alias = "regulationImpact")]
    pub regulation_impact: f64, // 0-1
    #[serde(default = "default_half", alias = "humanInteractionLevel")]
    pub human_interaction_level: f64, // 0-1
}

impl IndustryContext {
    pub fn new(
        sector: impl Into<String>,
        region: impl Into<String>,
        tech_adoption_rate: f64,
        labor_market_factor: f64,
    ) -> Self {
        Self {
            sector: sector.into(),
            region: region.into(),
            tech_adoption_rate,
            labor_market_factor,
            regulation_impact: default_half(),
            human_interaction_level: default_half(),
        }
    }

    /// Technology maturity on a 0-1 scale
    pub fn tech_maturity(&self) -> f64 {
        self.tech_adoption_rate / 100.0
    }
}

fn sector_profile(sector: &str) -> Option<SectorProfile> {
    let sector = sector.trim();
    SECTORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(sector))
        .map(|(_, profile)| *profile)
}

pub fn sector_baseline(sector: &str) -> f64 {
    sector_profile(sector).unwrap_or(DEFAULT_SECTOR).baseline()
}

pub fn regional_factor(region: &str) -> f64 {
    let region = region.trim();
    REGIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(region))
        .map(|(_, factor)| *factor)
        .unwrap_or(DEFAULT_REGIONAL_FACTOR)
}

pub fn industry_specific_factor(context: &IndustryContext) -> f64 {
    sector_baseline(&context.sector) * 0.4
        + regional_factor(&context.region) * 0.3
        + context.tech_adoption_rate / 100.0 * 0.2
        + context.labor_market_factor / 100.0 * 0.1
}

/// Scale a score up in tight labor markets and down in slack ones.
pub fn labor_market_impact(score: f64, labor_market_factor: f64) -> f64 {
    score * (1.0 + (labor_market_factor / 100.0 - 0.5) * 0.4)
}

pub fn tech_adoption_impact(score: f64, tech_adoption_rate: f64) -> f64 {
    score * (0.7 + tech_adoption_rate / 100.0 * 0.6)
}

/// Full industry adjustment of a base score: labor market, then tech
/// adoption, then the industry-specific factor.
pub fn adjusted_score(score: f64, context: &IndustryContext) -> f64 {
    let factor = industry_specific_factor(context);
    let labor_adjusted = labor_market_impact(score, context.labor_market_factor);
    let adoption_adjusted = tech_adoption_impact(labor_adjusted, context.tech_adoption_rate);
    let adjusted = adoption_adjusted * factor;
    debug!(
        sector = %context.sector,
        region = %context.region,
        score,
        factor,
        adjusted,
        "industry adjustment"
    );
    adjusted
}

pub fn known_sectors() -> impl Iterator<Item = &'static str> {
    SECTORS.iter().map(|(name, _)| *name)
}

pub fn known_regions() -> impl Iterator<Item = &'static str> {
    REGIONS.iter().map(|(name, _)| *name)
}
