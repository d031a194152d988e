//! Source implementations backed by JSON fixture files.
//!
//! Each call re-reads its file, so fixtures can be edited between runs.
//! A fixture that omits a section behaves like a provider that is down.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{
    CrawlResponse, ResearchCrawl, SimilaritySource, SkillAnalysis, SourceError, TaskAnalysis,
    TrendQuery, TrendQueryKind, TrendRecord, TrendSearch,
};

async fn read_fixture<T: DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), bytes = content.len(), "read source fixture");
    serde_json::from_str(&content).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn missing(section: &str, path: &Path) -> SourceError {
    SourceError::Unavailable {
        reason: format!("no '{}' section in {}", section, path.display()),
    }
}

#[derive(Debug, Default, Deserialize)]
struct TrendFixture {
    automation_trends: Option<Vec<TrendRecord>>,
    automation_research: Option<Vec<TrendRecord>>,
    technology_adoption: Option<Vec<TrendRecord>>,
}

/// Trend search answered from a fixture with one section per query kind.
///
/// ```json
/// {
///   "automation_trends": [{"source": "...", "title": "...", "year": 2022, "automationPercentage": 38}],
///   "automation_research": [],
///   "technology_adoption": []
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileTrendSearch {
    path: PathBuf,
}

impl FileTrendSearch {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TrendSearch for FileTrendSearch {
    async fn query(&self, query: &TrendQuery) -> Result<Vec<TrendRecord>, SourceError> {
        let fixture: TrendFixture = read_fixture(&self.path).await?;
        let (section, records) = match query.kind {
            TrendQueryKind::AutomationTrends => ("automation_trends", fixture.automation_trends),
            TrendQueryKind::AutomationResearch => ("automation_research", fixture.automation_research),
            TrendQueryKind::TechnologyAdoption => ("technology_adoption", fixture.technology_adoption),
        };
        records.ok_or_else(|| missing(section, &self.path))
    }
}

#[derive(Debug, Default, Deserialize)]
struct SimilarityFixture {
    tasks: Option<Vec<TaskAnalysis>>,
    skills: Option<Vec<SkillAnalysis>>,
}

/// Similarity analysis answered from a fixture with `tasks` and `skills`
/// sections. Only entries for the requested names are returned.
#[derive(Debug, Clone)]
pub struct FileSimilaritySource {
    path: PathBuf,
}

impl FileSimilaritySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SimilaritySource for FileSimilaritySource {
    async fn analyze_tasks(&self, tasks: &[String]) -> Result<Vec<TaskAnalysis>, SourceError> {
        let fixture: SimilarityFixture = read_fixture(&self.path).await?;
        let analyses = fixture.tasks.ok_or_else(|| missing("tasks", &self.path))?;
        Ok(analyses
            .into_iter()
            .filter(|a| tasks.contains(&a.task))
            .collect())
    }

    async fn analyze_skills(&self, skills: &[String]) -> Result<Vec<SkillAnalysis>, SourceError> {
        let fixture: SimilarityFixture = read_fixture(&self.path).await?;
        let analyses = fixture.skills.ok_or_else(|| missing("skills", &self.path))?;
        Ok(analyses
            .into_iter()
            .filter(|a| skills.contains(&a.skill))
            .collect())
    }
}

#[derive(Debug, Default, Deserialize)]
struct CrawlFixture {
    research: Option<CrawlResponse>,
    #[serde(default)]
    industries: HashMap<String, CrawlResponse>,
}

/// Research crawl answered from a fixture with a `research` response and an
/// `industries` map keyed by industry name.
#[derive(Debug, Clone)]
pub struct FileResearchCrawl {
    path: PathBuf,
}

impl FileResearchCrawl {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ResearchCrawl for FileResearchCrawl {
    async fn crawl(&self, occupation: &str, industry: Option<&str>) -> Result<CrawlResponse, SourceError> {
        let mut fixture: CrawlFixture = read_fixture(&self.path).await?;
        debug!(occupation, industry, "crawl fixture lookup");
        match industry {
            None => fixture.research.ok_or_else(|| missing("research", &self.path)),
            Some(name) => fixture
                .industries
                .remove(name)
                .ok_or_else(|| missing(&format!("industries.{}", name), &self.path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("apo-engine-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_trend_fixture_sections() {
        let path = write_fixture(
            "trends.json",
            r#"{"automation_trends": [{"source": "OECD", "title": "Jobs at risk", "year": 2021, "automationPercentage": 32}]}"#,
        );
        let search = FileTrendSearch::new(&path);

        let records = search
            .query(&TrendQuery::new(TrendQueryKind::AutomationTrends, "Accountant"))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year, Some(2021));

        let err = search
            .query(&TrendQuery::new(TrendQueryKind::TechnologyAdoption, "Accountant"))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_similarity_filters_requested_names() {
        let path = write_fixture(
            "similarity.json",
            r#"{"tasks": [
                {"task": "Prepare tax returns", "automationPotential": 0.7, "confidence": 0.9},
                {"task": "Advise clients", "automationPotential": 0.2, "confidence": 0.8}
            ]}"#,
        );
        let source = FileSimilaritySource::new(&path);
        let analyses = source
            .analyze_tasks(&["Advise clients".to_string()])
            .await
            .unwrap();
        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].task, "Advise clients");

        assert!(source.analyze_skills(&[]).await.is_err());
    }

    #[tokio::test]
    async fn test_crawl_industry_lookup() {
        let path = write_fixture(
            "crawl.json",
            r#"{"industries": {"Finance": {"researchData": [], "error": "blocked"}}}"#,
        );
        let crawl = FileResearchCrawl::new(&path);

        let response = crawl.crawl("Accountant", Some("Finance")).await.unwrap();
        assert_eq!(response.error.as_deref(), Some("blocked"));

        assert!(crawl.crawl("Accountant", None).await.is_err());
        assert!(crawl.crawl("Accountant", Some("Retail")).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let search = FileTrendSearch::new("/nonexistent/apo/trends.json");
        let err = search
            .query(&TrendQuery::new(TrendQueryKind::AutomationTrends, "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn test_bad_json_is_parse_error() {
        let path = write_fixture("broken.json", "{ not json");
        let err = FileSimilaritySource::new(&path)
            .analyze_tasks(&[])
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }
}
