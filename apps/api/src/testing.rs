//! In-memory doubles for the external services, used by unit and router tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::config::Config;
use crate::models::job::{JobRow, NewJob};
use crate::models::resume::{NewResume, ResumeRow};
use crate::models::user::UserRow;
use crate::retry::RetryPolicy;
use crate::session::{IdentityError, IdentityProvider, Session};
use crate::state::AppState;
use crate::storage::{public_object_url, ObjectStore, StorageError};
use crate::store::{JobStore, ResumeStore, StoreError, StoreResult, UserStore};

/// Users, resumes and jobs in concurrent maps. Row ids come from one counter
/// and `created_at` advances one second per row, so ordering is strict.
#[derive(Clone)]
pub struct MemoryStore {
    users: Arc<DashMap<String, UserRow>>,
    resumes: Arc<DashMap<i64, ResumeRow>>,
    jobs: Arc<DashMap<i64, JobRow>>,
    next_id: Arc<AtomicI64>,
    resume_insert_calls: Arc<AtomicU32>,
    resume_insert_failure: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(DashMap::new()),
            resumes: Arc::new(DashMap::new()),
            jobs: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(1)),
            resume_insert_calls: Arc::new(AtomicU32::new(0)),
            resume_insert_failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Every subsequent resume insert fails with `message`.
    pub fn fail_resume_inserts(&self, message: &str) {
        *self.resume_insert_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn resume_insert_calls(&self) -> u32 {
        self.resume_insert_calls.load(Ordering::SeqCst)
    }

    fn allocate(&self) -> (i64, DateTime<Utc>) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (id, base + chrono::Duration::seconds(id))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, id: &str) -> StoreResult<Option<UserRow>> {
        Ok(self.users.get(id).map(|row| row.clone()))
    }

    async fn upsert_user(&self, user: &UserRow) -> StoreResult<UserRow> {
        let mut row = user.clone();
        if let Some(existing) = self.users.get(&user.id) {
            row.created_at = existing.created_at;
        }
        self.users.insert(row.id.clone(), row.clone());
        Ok(row)
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn insert_resume(&self, resume: &NewResume) -> StoreResult<ResumeRow> {
        self.resume_insert_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.resume_insert_failure.lock().unwrap().clone() {
            return Err(StoreError::Unavailable(message));
        }
        let (id, created_at) = self.allocate();
        let row = ResumeRow {
            id,
            user_id: resume.user_id.clone(),
            public_url: resume.public_url.clone(),
            file_path: resume.file_path.clone(),
            ats_score: resume.ats_score,
            created_at,
            updated_at: created_at,
        };
        self.resumes.insert(id, row.clone());
        Ok(row)
    }

    async fn list_resumes(&self, user_id: &str) -> StoreResult<Vec<ResumeRow>> {
        let mut rows: Vec<ResumeRow> = self
            .resumes
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.clone())
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }

    async fn latest_resume(&self, user_id: &str) -> StoreResult<Option<ResumeRow>> {
        Ok(self.list_resumes(user_id).await?.into_iter().next())
    }

    async fn update_ats_score(
        &self,
        user_id: &str,
        resume_id: i64,
        ats_score: i32,
    ) -> StoreResult<Option<ResumeRow>> {
        Ok(self
            .resumes
            .get_mut(&resume_id)
            .filter(|r| r.user_id == user_id)
            .map(|mut r| {
                r.ats_score = ats_score;
                r.updated_at = Utc::now();
                r.clone()
            }))
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn insert_job(&self, job: &NewJob) -> StoreResult<JobRow> {
        let (id, created_at) = self.allocate();
        let row = JobRow {
            id,
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            description: job.description.clone(),
            requirements: job.requirements.clone(),
            salary_range: job.salary_range.clone(),
            application_url: job.application_url.clone(),
            posted_by: job.posted_by.clone(),
            created_at,
        };
        self.jobs.insert(id, row.clone());
        Ok(row)
    }

    async fn list_jobs(&self, limit: i64) -> StoreResult<Vec<JobRow>> {
        let mut rows: Vec<JobRow> = self.jobs.iter().map(|j| j.clone()).collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }
}

/// Object store with scriptable upload failures and call counters.
#[derive(Clone)]
pub struct MemoryObjectStore {
    objects: Arc<DashMap<String, Bytes>>,
    upload_failures: Arc<Mutex<VecDeque<String>>>,
    remove_failure: Arc<Mutex<Option<String>>>,
    upload_calls: Arc<AtomicU32>,
    remove_calls: Arc<AtomicU32>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(DashMap::new()),
            upload_failures: Arc::new(Mutex::new(VecDeque::new())),
            remove_failure: Arc::new(Mutex::new(None)),
            upload_calls: Arc::new(AtomicU32::new(0)),
            remove_calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// The next uploads fail with these messages, in order.
    pub fn script_upload_failures(&self, messages: &[&str]) {
        let mut queue = self.upload_failures.lock().unwrap();
        queue.extend(messages.iter().map(|m| m.to_string()));
    }

    pub fn fail_removals(&self, message: &str) {
        *self.remove_failure.lock().unwrap() = Some(message.to_string());
    }

    /// Stores an object directly, bypassing counters.
    pub fn seed(&self, path: &str) {
        self.objects.insert(path.to_string(), Bytes::from_static(b"%PDF-1.4"));
    }

    pub fn upload_calls(&self) -> u32 {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn remove_calls(&self) -> u32 {
        self.remove_calls.load(Ordering::SeqCst)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.objects.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        path: &str,
        body: Bytes,
        _content_type: &str,
    ) -> Result<(), StorageError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.upload_failures.lock().unwrap().pop_front() {
            return Err(StorageError::Upload {
                path: path.to_string(),
                message,
            });
        }
        match self.objects.entry(path.to_string()) {
            Entry::Occupied(_) => Err(StorageError::Upload {
                path: path.to_string(),
                message: "The resource already exists".to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(body);
                Ok(())
            }
        }
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.remove_failure.lock().unwrap().clone() {
            return Err(StorageError::Remove {
                path: path.to_string(),
                message,
            });
        }
        self.objects.remove(path);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        Ok(self
            .objects
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect())
    }

    fn public_url(&self, path: &str) -> String {
        public_object_url("https://test.supabase.co", "resumes", path)
    }
}

/// Maps fixed tokens to sessions; anything else is rejected.
#[derive(Default)]
pub struct StaticIdentity {
    sessions: HashMap<String, Session>,
}

impl StaticIdentity {
    pub fn with(mut self, token: &str, session: Session) -> Self {
        self.sessions.insert(token.to_string(), session);
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn resolve(&self, token: &str) -> Result<Session, IdentityError> {
        self.sessions
            .get(token)
            .cloned()
            .ok_or(IdentityError::Rejected)
    }
}

pub const ALICE_TOKEN: &str = "sess_alice";
pub const BOB_TOKEN: &str = "sess_bob";

pub fn alice() -> Session {
    Session {
        user_id: "user_alice".into(),
        name: "Alice Example".into(),
        email: "alice@example.com".into(),
    }
}

pub fn bob() -> Session {
    Session {
        user_id: "user_bob".into(),
        name: "Bob Example".into(),
        email: "bob@example.com".into(),
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/careerai_test".into(),
        supabase_url: "https://test.supabase.co".into(),
        storage_endpoint: "http://localhost:9000".into(),
        storage_access_key_id: "test".into(),
        storage_secret_access_key: "test".into(),
        storage_bucket: "resumes".into(),
        storage_region: "us-east-1".into(),
        identity_userinfo_url: "https://id.example.com/oauth/userinfo".into(),
        identity_sign_in_url: "https://id.example.com/sign-in".into(),
        sign_out_redirect_url: "/".into(),
        port: 0,
        rust_log: "debug".into(),
    }
}

/// App state over fresh in-memory doubles, with Alice and Bob signed in.
/// Retries sleep for 1ms so router tests stay fast.
pub fn test_state(store: &MemoryStore, objects: &MemoryObjectStore) -> AppState {
    let identity = StaticIdentity::default()
        .with(ALICE_TOKEN, alice())
        .with(BOB_TOKEN, bob());
    AppState {
        users: Arc::new(store.clone()),
        resumes: Arc::new(store.clone()),
        jobs: Arc::new(store.clone()),
        objects: Arc::new(objects.clone()),
        identity: Arc::new(identity),
        upload_retry: RetryPolicy::new(3, Duration::from_millis(1), Duration::from_millis(2)),
        config: test_config(),
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}
