//! Test Helper Utilities
//!
//! Shared utilities for testing ivf-api

#![allow(dead_code)]

use async_trait::async_trait;
use ivf_api::oracle::{ClaimOracle, OracleError, OraclePrompt};
use ivf_api::AppState;
use ivf_common::config::TomlConfig;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type Script = dyn Fn(usize, &OraclePrompt) -> Result<String, OracleError> + Send + Sync;

/// Oracle stand-in answering from a closure
///
/// The closure gets the zero-based call number and the prompt. Every prompt
/// is recorded for later assertions.
pub struct ScriptedOracle {
    script: Box<Script>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<OraclePrompt>>,
}

impl ScriptedOracle {
    pub fn new<F>(script: F) -> Arc<Self>
    where
        F: Fn(usize, &OraclePrompt) -> Result<String, OracleError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            script: Box::new(script),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Always answer with the same text
    pub fn always(text: String) -> Arc<Self> {
        Self::new(move |_, _| Ok(text.clone()))
    }

    /// Always fail at the transport level
    pub fn failing() -> Arc<Self> {
        Self::new(|_, _| Err(OracleError::NetworkError("connection refused".to_string())))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<OraclePrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClaimOracle for ScriptedOracle {
    async fn complete(&self, prompt: &OraclePrompt) -> Result<String, OracleError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.clone());
        (self.script)(n, prompt)
    }
}

/// In-memory store with the schema applied
///
/// One connection only: every connection to `sqlite::memory:` is a
/// separate database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    ivf_api::db::init_tables(&pool).await.unwrap();
    pool
}

/// App state over a fresh in-memory store
pub async fn test_state(oracle: Option<Arc<dyn ClaimOracle>>, config: &TomlConfig) -> AppState {
    AppState::new(test_pool().await, oracle, config).unwrap()
}

pub async fn count_rows(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM influencers")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// A well-formed oracle influencer profile
pub fn profile_json(name: &str, trust_score: u8) -> Value {
    json!({
        "name": name,
        "bio": "Sports physiologist and podcast host",
        "category": "Exercise",
        "trustScore": trust_score,
        "followers": 850000,
        "yearlyRevenue": "$1.2M",
        "claims": [
            {
                "id": "1",
                "text": "Zone 2 training improves mitochondrial density",
                "category": "Exercise",
                "verificationStatus": "Verified",
                "trustScore": 88,
                "date": "2024-03-01T00:00:00.000Z",
                "analysis": "Supported by muscle biopsy studies",
                "scientificReference": "J Physiol (2019) - DOI: 10.1113/JP277000"
            },
            {
                "id": "2",
                "text": "Cold plunges double fat loss",
                "category": "Wellness",
                "verificationStatus": "Debunked",
                "trustScore": 20,
                "date": "2024-03-02T00:00:00.000Z",
                "analysis": "No controlled trial supports the magnitude",
                "scientificReference": "Obesity Reviews (2021) - DOI: 10.1111/obr.13000"
            }
        ]
    })
}

/// A well-formed oracle claim verdict
pub fn verdict_json(status: &str, confidence: u8) -> Value {
    json!({
        "claimId": "ignored",
        "status": status,
        "confidence": confidence,
        "supportingEvidence": "Two randomized controlled trials",
        "journalReferences": ["Nature (2022) - Title - DOI: 10.1038/s41586-022-00000-0"]
    })
}
