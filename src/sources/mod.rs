//! Contracts for the external signal providers the aggregator consults.

pub mod file;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use crate::error::SourceError;
pub use file::{FileResearchCrawl, FileSimilaritySource, FileTrendSearch};

/// Which trend search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendQueryKind {
    AutomationTrends,
    AutomationResearch,
    TechnologyAdoption,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendQuery {
    pub kind: TrendQueryKind,
    pub text: String,
}

impl TrendQuery {
    pub fn new(kind: TrendQueryKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRecord {
    pub source: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub automation_percentage: Option<f64>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub relevance_score: Option<f64>,
}

impl TrendRecord {
    /// Title and snippet, the text searched for item names
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.snippet.as_deref().unwrap_or(""))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAnalysis {
    pub task: String,
    pub automation_potential: f64, // 0-1
    pub confidence: f64,           // 0-1
    #[serde(default)]
    pub similar_tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillAnalysis {
    pub skill: String,
    pub automation_potential: f64, // 0-1
    pub confidence: f64,           // 0-1
    #[serde(default)]
    pub future_relevance: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    pub text: String,
    #[serde(default)]
    pub automation_percentage: Option<f64>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchRecord {
    pub source: String,
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub automation_mentions: Vec<Mention>,
    #[serde(default)]
    pub relevance_score: Option<f64>,
}

impl ResearchRecord {
    /// Title followed by every mention's text
    pub fn text(&self) -> String {
        let mut text = self.title.clone();
        for mention in &self.automation_mentions {
            text.push(' ');
            text.push_str(&mention.text);
        }
        text
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResponse {
    #[serde(default)]
    pub research_data: Vec<ResearchRecord>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CrawlResponse {
    /// Records of a usable response. A reported error with no data counts
    /// as a failed call.
    pub fn into_records(self) -> Result<Vec<ResearchRecord>, SourceError> {
        match self.error {
            Some(error) if self.research_data.is_empty() => Err(SourceError::Provider(error)),
            _ => Ok(self.research_data),
        }
    }
}

/// Web search for automation trend articles.
#[async_trait]
pub trait TrendSearch: Send + Sync {
    async fn query(&self, query: &TrendQuery) -> Result<Vec<TrendRecord>, SourceError>;
}

/// Embedding-similarity analysis of task and skill names.
#[async_trait]
pub trait SimilaritySource: Send + Sync {
    async fn analyze_tasks(&self, tasks: &[String]) -> Result<Vec<TaskAnalysis>, SourceError>;
    async fn analyze_skills(&self, skills: &[String]) -> Result<Vec<SkillAnalysis>, SourceError>;
}

/// Crawl of published automation research, optionally scoped to an industry.
#[async_trait]
pub trait ResearchCrawl: Send + Sync {
    async fn crawl(&self, occupation: &str, industry: Option<&str>) -> Result<CrawlResponse, SourceError>;
}

/// One independently fallible source call made per aggregation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    AutomationTrends,
    AutomationResearch,
    TechnologyAdoption,
    TaskAnalysis,
    SkillAnalysis,
    ResearchCrawl,
    IndustryCrawl,
}

impl SourceKind {
    pub const ALL: [SourceKind; 7] = [
        SourceKind::AutomationTrends,
        SourceKind::AutomationResearch,
        SourceKind::TechnologyAdoption,
        SourceKind::TaskAnalysis,
        SourceKind::SkillAnalysis,
        SourceKind::ResearchCrawl,
        SourceKind::IndustryCrawl,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::AutomationTrends => "automation trends",
            SourceKind::AutomationResearch => "automation research",
            SourceKind::TechnologyAdoption => "technology adoption",
            SourceKind::TaskAnalysis => "task analysis",
            SourceKind::SkillAnalysis => "skill analysis",
            SourceKind::ResearchCrawl => "research crawl",
            SourceKind::IndustryCrawl => "industry crawl",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
