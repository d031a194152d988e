use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::RetryIf;
use tracing::{debug, warn};

use crate::occupation::{Category, Occupation};
use crate::sources::{
    ResearchCrawl, ResearchRecord, SimilaritySource, SkillAnalysis, SourceError, SourceKind,
    TaskAnalysis, TrendQuery, TrendQueryKind, TrendRecord, TrendSearch,
};

/// The external collaborators available to an aggregator. A missing source
/// is treated as switched off.
#[derive(Clone, Default)]
pub struct Sources {
    pub trends: Option<Arc<dyn TrendSearch>>,
    pub similarity: Option<Arc<dyn SimilaritySource>>,
    pub crawl: Option<Arc<dyn ResearchCrawl>>,
}

impl Sources {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.trends.is_none() && self.similarity.is_none() && self.crawl.is_none()
    }
}

/// How each source call is bounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallPolicy {
    pub timeout: Duration,
    pub max_attempts: usize,
    pub backoff_ms: u64,
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_attempts: 2,
            backoff_ms: 100,
        }
    }
}

/// Distinct kinds of outside call: automation trend, research and technology
/// adoption searches, similarity analysis, and the research crawl. The
/// similarity and crawl types each fill two slots.
pub const SOURCE_TYPES: usize = 5;

/// Per-request cap on source calls, retries included.
#[derive(Debug)]
pub struct CallBudget {
    limit: usize,
    remaining: AtomicUsize,
}

impl CallBudget {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            remaining: AtomicUsize::new(limit),
        }
    }

    /// Two calls per source type, retries included
    pub fn per_request() -> Self {
        Self::new(SOURCE_TYPES * 2)
    }

    pub fn acquire(&self) -> Result<(), SourceError> {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .map(|_| ())
            .map_err(|_| SourceError::BudgetExhausted { limit: self.limit })
    }

    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::SeqCst)
    }
}

/// Whatever each source slot delivered. `None` means the slot was skipped or
/// failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceResults {
    pub automation_trends: Option<Vec<TrendRecord>>,
    pub automation_research: Option<Vec<TrendRecord>>,
    pub technology_adoption: Option<Vec<TrendRecord>>,
    pub task_analysis: Option<Vec<TaskAnalysis>>,
    pub skill_analysis: Option<Vec<SkillAnalysis>>,
    pub research: Option<Vec<ResearchRecord>>,
    pub industry: Option<Vec<ResearchRecord>>,
}

impl SourceResults {
    pub fn has(&self, kind: SourceKind) -> bool {
        match kind {
            SourceKind::AutomationTrends => self.automation_trends.is_some(),
            SourceKind::AutomationResearch => self.automation_research.is_some(),
            SourceKind::TechnologyAdoption => self.technology_adoption.is_some(),
            SourceKind::TaskAnalysis => self.task_analysis.is_some(),
            SourceKind::SkillAnalysis => self.skill_analysis.is_some(),
            SourceKind::ResearchCrawl => self.research.is_some(),
            SourceKind::IndustryCrawl => self.industry.is_some(),
        }
    }

    /// Slots that delivered data, in slot order
    pub fn succeeded(&self) -> Vec<SourceKind> {
        SourceKind::ALL.into_iter().filter(|k| self.has(*k)).collect()
    }

    pub fn success_count(&self) -> usize {
        SourceKind::ALL.iter().filter(|k| self.has(**k)).count()
    }

    fn store(&mut self, data: SlotData) {
        match data {
            SlotData::Trends(TrendQueryKind::AutomationTrends, records) => self.automation_trends = Some(records),
            SlotData::Trends(TrendQueryKind::AutomationResearch, records) => self.automation_research = Some(records),
            SlotData::Trends(TrendQueryKind::TechnologyAdoption, records) => self.technology_adoption = Some(records),
            SlotData::Tasks(analyses) => self.task_analysis = Some(analyses),
            SlotData::Skills(analyses) => self.skill_analysis = Some(analyses),
            SlotData::Research(records) => self.research = Some(records),
            SlotData::Industry(records) => self.industry = Some(records),
        }
    }
}

enum SlotData {
    Trends(TrendQueryKind, Vec<TrendRecord>),
    Tasks(Vec<TaskAnalysis>),
    Skills(Vec<SkillAnalysis>),
    Research(Vec<ResearchRecord>),
    Industry(Vec<ResearchRecord>),
}

fn trend_slot(kind: TrendQueryKind) -> SourceKind {
    match kind {
        TrendQueryKind::AutomationTrends => SourceKind::AutomationTrends,
        TrendQueryKind::AutomationResearch => SourceKind::AutomationResearch,
        TrendQueryKind::TechnologyAdoption => SourceKind::TechnologyAdoption,
    }
}

/// Run one source call under the budget, timeout and retry policy.
async fn bounded_call<T, F, Fut>(policy: &CallPolicy, budget: &CallBudget, mut op: F) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
{
    let retry_strategy = ExponentialBackoff::from_millis(policy.backoff_ms.max(1))
        .max_delay(Duration::from_secs(5))
        .take(policy.max_attempts.saturating_sub(1));
    let limit = policy.timeout;

    RetryIf::start(
        retry_strategy,
        || {
            let attempt = budget.acquire().map(|()| op());
            async move {
                let call = attempt?;
                match tokio::time::timeout(limit, call).await {
                    Ok(result) => result,
                    Err(_) => Err(SourceError::Timeout(limit)),
                }
            }
        },
        SourceError::is_retryable,
    )
    .await
}

/// Query every configured source concurrently and gather the results.
///
/// Failures are logged and leave their slot empty. The industry crawl only
/// runs when an industry is given.
pub async fn collect(
    sources: &Sources,
    occupation: &Occupation,
    industry: Option<&str>,
    policy: &CallPolicy,
) -> SourceResults {
    let budget = CallBudget::per_request();
    let title = occupation.title.as_str();
    let task_names = occupation.names(Category::Tasks);
    let skill_names = occupation.names(Category::Skills);

    let mut futures: FuturesUnordered<BoxFuture<'_, (SourceKind, Result<SlotData, SourceError>)>> =
        FuturesUnordered::new();

    if let Some(trends) = &sources.trends {
        for kind in [
            TrendQueryKind::AutomationTrends,
            TrendQueryKind::AutomationResearch,
            TrendQueryKind::TechnologyAdoption,
        ] {
            let query = TrendQuery::new(kind, title);
            let budget = &budget;
            futures.push(
                async move {
                    let result = bounded_call(policy, budget, || trends.query(&query)).await;
                    (trend_slot(kind), result.map(|records| SlotData::Trends(kind, records)))
                }
                .boxed(),
            );
        }
    }

    if let Some(similarity) = &sources.similarity {
        let budget = &budget;
        let tasks = &task_names;
        futures.push(
            async move {
                let result = bounded_call(policy, budget, || similarity.analyze_tasks(tasks)).await;
                (SourceKind::TaskAnalysis, result.map(SlotData::Tasks))
            }
            .boxed(),
        );
        let skills = &skill_names;
        futures.push(
            async move {
                let result = bounded_call(policy, budget, || similarity.analyze_skills(skills)).await;
                (SourceKind::SkillAnalysis, result.map(SlotData::Skills))
            }
            .boxed(),
        );
    }

    if let Some(crawl) = &sources.crawl {
        let budget = &budget;
        futures.push(
            async move {
                let result = bounded_call(policy, budget, move || async move {
                    crawl.crawl(title, None).await?.into_records()
                })
                .await;
                (SourceKind::ResearchCrawl, result.map(SlotData::Research))
            }
            .boxed(),
        );

        if let Some(industry) = industry {
            futures.push(
                async move {
                    let result = bounded_call(policy, budget, move || async move {
                        crawl.crawl(title, Some(industry)).await?.into_records()
                    })
                    .await;
                    (SourceKind::IndustryCrawl, result.map(SlotData::Industry))
                }
                .boxed(),
            );
        }
    }

    let mut results = SourceResults::default();
    while let Some((kind, result)) = futures.next().await {
        match result {
            Ok(data) => {
                debug!(source = %kind, "source delivered");
                results.store(data);
            }
            Err(e) => {
                warn!(source = %kind, error = %e, "source failed, continuing without it");
            }
        }
    }

    debug!(
        succeeded = results.success_count(),
        calls_left = budget.remaining(),
        "collection finished"
    );
    results
}
