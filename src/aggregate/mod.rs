//! Dynamic APO: blends external source signals with the static model.
//!
//! A request fans out to every configured source at once, waits for all of
//! them, then decides synchronously between three outcomes:
//!
//! - two or more slots delivered data: scores come from the sources, with
//!   the static model filling gaps item by item (`dynamic`);
//! - exactly one slot delivered: static scores (`hybrid`);
//! - nothing delivered: static scores (`static`), or an error when static
//!   fallback is disabled.

pub mod collect;
pub mod decide;
pub mod insights;

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

pub use collect::{CallBudget, CallPolicy, SourceResults, Sources};
pub use decide::{compute_confidence, decide, error_fallback, extract_trends, validate_payload};
pub use insights::generate_insights;

use crate::error::AggregateError;
use crate::occupation::{CategoryScores, Occupation};
use crate::scoring::CategoryWeights;
use crate::sources::SourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Dynamic,
    Hybrid,
    Static,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataSource::Dynamic => "dynamic",
            DataSource::Hybrid => "hybrid",
            DataSource::Static => "static",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub value: f64,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynamicApoResult {
    pub overall_apo: f64,
    pub category_scores: CategoryScores,
    pub trends: Vec<TrendPoint>,
    pub insights: Vec<String>,
    pub data_confidence: f64,
    pub data_source: DataSource,
    /// Slots that delivered data
    pub sources_used: Vec<SourceKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeOptions {
    pub fallback_to_static: bool,
    pub industry: Option<String>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            fallback_to_static: true,
            industry: None,
        }
    }
}

pub struct Aggregator {
    sources: Sources,
    policy: CallPolicy,
    weights: CategoryWeights,
}

impl Aggregator {
    pub fn new(sources: Sources) -> Self {
        Self {
            sources,
            policy: CallPolicy::default(),
            weights: CategoryWeights::default(),
        }
    }

    pub fn with_policy(mut self, policy: CallPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_weights(mut self, weights: CategoryWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Compute the dynamic APO for an occupation.
    ///
    /// Dropping the returned future cancels any source calls still running.
    pub async fn analyze(
        &self,
        occupation: &Occupation,
        options: &AnalyzeOptions,
    ) -> Result<DynamicApoResult, AggregateError> {
        info!(occupation = %occupation.title, industry = ?options.industry, "calculating dynamic APO");

        let results = collect::collect(
            &self.sources,
            occupation,
            options.industry.as_deref(),
            &self.policy,
        )
        .await;

        match decide(occupation, &results, options.fallback_to_static, &self.weights) {
            Err(err @ AggregateError::MalformedPayload { .. }) if options.fallback_to_static => {
                warn!(error = %err, "discarding source data, falling back to static APO");
                Ok(error_fallback(occupation, &self.weights))
            }
            other => other,
        }
    }
}
