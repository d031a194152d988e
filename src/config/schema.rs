use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::aggregate::{AnalyzeOptions, CallPolicy, Sources};
use crate::industry::IndustryContext;
use crate::scoring::CategoryWeights;
use crate::sources::{
    FileResearchCrawl, FileSimilaritySource, FileTrendSearch, ResearchCrawl, SimilaritySource, TrendSearch,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub aggregator: AggregatorSettings,
    #[serde(default)]
    pub weights: CategoryWeights,
    #[serde(default)]
    pub industry: Option<IndustryContext>,
    #[serde(default)]
    pub sources: SourcePaths,
}

/// How the dynamic aggregator talks to its sources.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AggregatorSettings {
    pub fallback_to_static: bool,
    /// Per-call timeout, e.g. "10s" or "1m 30s"
    pub timeout: String,
    pub max_attempts: usize,
    pub backoff_ms: u64,
    pub use_trends: bool,
    pub use_similarity: bool,
    pub use_crawl: bool,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            fallback_to_static: true,
            timeout: "10s".to_string(),
            max_attempts: 2,
            backoff_ms: 100,
            use_trends: true,
            use_similarity: true,
            use_crawl: true,
        }
    }
}

impl AggregatorSettings {
    pub fn timeout(&self) -> Result<Duration> {
        humantime::parse_duration(self.timeout.trim())
            .with_context(|| format!("Invalid aggregator.timeout '{}'", self.timeout))
    }

    pub fn call_policy(&self) -> Result<CallPolicy> {
        Ok(CallPolicy {
            timeout: self.timeout()?,
            max_attempts: self.max_attempts,
            backoff_ms: self.backoff_ms,
        })
    }
}

/// Fixture files for the file-backed sources. Relative paths resolve against
/// the working directory.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourcePaths {
    pub trends: Option<PathBuf>,
    pub similarity: Option<PathBuf>,
    pub crawl: Option<PathBuf>,
}

impl Config {
    /// File-backed sources for every path that is set and switched on.
    pub fn build_sources(&self) -> Sources {
        let settings = &self.aggregator;
        Sources {
            trends: self
                .sources
                .trends
                .as_ref()
                .filter(|_| settings.use_trends)
                .map(|p| Arc::new(FileTrendSearch::new(p)) as Arc<dyn TrendSearch>),
            similarity: self
                .sources
                .similarity
                .as_ref()
                .filter(|_| settings.use_similarity)
                .map(|p| Arc::new(FileSimilaritySource::new(p)) as Arc<dyn SimilaritySource>),
            crawl: self
                .sources
                .crawl
                .as_ref()
                .filter(|_| settings.use_crawl)
                .map(|p| Arc::new(FileResearchCrawl::new(p)) as Arc<dyn ResearchCrawl>),
        }
    }

    pub fn analyze_options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            fallback_to_static: self.aggregator.fallback_to_static,
            industry: self.industry.as_ref().map(|ctx| ctx.sector.clone()),
        }
    }
}
