//! In-process doubles for the external collaborators, plus a local HTTP server for
//! exercising the real clients.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::github::client::{GitHubError, RepoMetadata, RepositorySource};
use crate::github::url::RepoRef;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::resume::ResumeRecord;
use crate::resumes::store::{not_found, stale_write, ResumeStore};

type StubResult<T> = Result<T, (u16, String)>;

/// Serves `router` on an ephemeral loopback port and returns its base URL.
pub async fn serve_locally(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn status_error(status: u16, message: &str) -> GitHubError {
    GitHubError::Status {
        status,
        message: message.to_string(),
    }
}

/// Returns one canned reply (or upstream error) and records every `(prompt, system)` pair.
pub struct StubGenerator {
    reply: StubResult<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl StubGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            reply: Err((status, message.to_string())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str, system_instruction: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), system_instruction.to_string()));
        self.reply.clone().map_err(|(status, message)| LlmError::Api { status, message })
    }
}

/// Per-step canned GitHub responses; records the order steps were called in.
pub struct StubRepositories {
    metadata: StubResult<RepoMetadata>,
    languages: StubResult<Vec<String>>,
    readme: StubResult<String>,
    calls: Mutex<Vec<&'static str>>,
}

impl StubRepositories {
    pub fn new(metadata: RepoMetadata) -> Self {
        Self {
            metadata: Ok(metadata),
            languages: Ok(Vec::new()),
            readme: Ok(String::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_metadata(status: u16, message: &str) -> Self {
        Self {
            metadata: Err((status, message.to_string())),
            languages: Ok(Vec::new()),
            readme: Ok(String::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_languages(mut self, languages: StubResult<Vec<String>>) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_readme(mut self, readme: StubResult<String>) -> Self {
        self.readme = readme;
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record<T: Clone>(&self, step: &'static str, result: &StubResult<T>) -> Result<T, GitHubError> {
        self.calls.lock().unwrap().push(step);
        result
            .clone()
            .map_err(|(status, message)| status_error(status, &message))
    }
}

#[async_trait]
impl RepositorySource for StubRepositories {
    async fn fetch_metadata(&self, _repo: &RepoRef) -> Result<RepoMetadata, GitHubError> {
        self.record("metadata", &self.metadata)
    }

    async fn fetch_languages(&self, _repo: &RepoRef) -> Result<Vec<String>, GitHubError> {
        self.record("languages", &self.languages)
    }

    async fn fetch_readme(&self, _repo: &RepoRef) -> Result<String, GitHubError> {
        self.record("readme", &self.readme)
    }
}

/// In-memory `ResumeStore` with the same owner scoping and concurrency check as Postgres.
#[derive(Default)]
pub struct MemoryResumeStore {
    inner: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    records: HashMap<Uuid, ResumeRecord>,
    last_stamp: Option<DateTime<Utc>>,
}

impl MemoryState {
    /// Strictly increasing timestamps so ordering and staleness are deterministic.
    fn next_stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn save(
        &self,
        mut record: ResumeRecord,
        expected_updated_at: Option<DateTime<Utc>>,
    ) -> Result<ResumeRecord, AppError> {
        let mut state = self.inner.lock().unwrap();

        if let Some(existing) = state.records.get(&record.id) {
            if existing.user_id != record.user_id
                || expected_updated_at.is_some_and(|expected| expected != existing.updated_at)
            {
                return Err(stale_write(record.id));
            }
            record.created_at = existing.created_at;
        }

        record.updated_at = state.next_stamp();
        state.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: Uuid, owner: &str) -> Result<ResumeRecord, AppError> {
        let state = self.inner.lock().unwrap();
        state
            .records
            .get(&id)
            .filter(|r| r.user_id == owner)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<ResumeRecord>, AppError> {
        let state = self.inner.lock().unwrap();
        let mut records: Vec<ResumeRecord> = state
            .records
            .values()
            .filter(|r| r.user_id == owner)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(records)
    }

    async fn delete(&self, id: Uuid, owner: &str) -> Result<(), AppError> {
        let mut state = self.inner.lock().unwrap();
        match state.records.get(&id) {
            Some(record) if record.user_id == owner => {
                state.records.remove(&id);
                Ok(())
            }
            _ => Err(not_found(id)),
        }
    }
}
