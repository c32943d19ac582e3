//! Influencer resolution engine
//!
//! resolve(name) → normalize → store lookup → freshness check → fixture
//! lookup → oracle → persist → return. Each step falls through to the next
//! on a miss or failure; the last resort is the "unknown influencer" record.

use chrono::{DateTime, Duration, Utc};
use ivf_common::fixtures::fixtures;
use ivf_common::{normalize_name, Error, InfluencerProfile, InfluencerRecord, Result};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::db::influencers;
use crate::oracle::{prompts, schema, ClaimOracle};

/// Stored records younger than this are returned without re-resolving
pub const FRESHNESS_WINDOW_DAYS: i64 = 7;

/// True if `record` is still inside the freshness window at `now`
pub fn is_fresh(record: &InfluencerRecord, now: DateTime<Utc>) -> bool {
    record.age(now) < Duration::days(FRESHNESS_WINDOW_DAYS)
}

/// Optional narrowing hints forwarded to the oracle
#[derive(Debug, Clone, Default)]
pub struct ResolveHints {
    pub time_range: Option<String>,
    pub claim_count: Option<u32>,
}

/// Which step of the pipeline produced the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Cache,
    Fixture,
    Oracle,
    Fallback,
}

impl ResolutionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionSource::Cache => "cache",
            ResolutionSource::Fixture => "fixture",
            ResolutionSource::Oracle => "oracle",
            ResolutionSource::Fallback => "fallback",
        }
    }
}

/// A resolved record plus the step it came from
#[derive(Debug, Clone)]
pub struct Resolution {
    pub record: InfluencerRecord,
    pub source: ResolutionSource,
}

pub struct ResolutionEngine {
    db: SqlitePool,
    oracle: Option<Arc<dyn ClaimOracle>>,
}

impl ResolutionEngine {
    /// `oracle` is `None` when no credential is configured
    pub fn new(db: SqlitePool, oracle: Option<Arc<dyn ClaimOracle>>) -> Self {
        Self { db, oracle }
    }

    /// Resolve a name to an influencer record
    ///
    /// Only an empty name and store write failures are errors; oracle
    /// failures are absorbed into the fallback record.
    ///
    /// Oracle results are stored under the oracle's spelling of the name.
    /// A query that normalizes differently (e.g. "jane runner phd" for
    /// "Dr. Jane Runner") misses the store and asks the oracle again; the
    /// second answer overwrites the same row rather than adding one.
    ///
    /// Names that normalize to nothing (only punctuation or non-ASCII
    /// letters) never touch the store: they cannot be told apart by key.
    pub async fn resolve(&self, name: &str, hints: &ResolveHints) -> Result<InfluencerRecord> {
        Ok(self.resolve_detailed(name, hints).await?.record)
    }

    /// Like [`resolve`](Self::resolve), also reporting which step answered
    pub async fn resolve_detailed(&self, name: &str, hints: &ResolveHints) -> Result<Resolution> {
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("Influencer name is required".to_string()));
        }

        let key = normalize_name(name);
        let now = Utc::now();
        info!(name = %name, key = %key, "Resolving influencer");

        // Step 1: stored record inside the freshness window
        let stored = if key.is_empty() {
            debug!(name = %name, "Name has no usable key, skipping store lookup");
            Ok(None)
        } else {
            influencers::find_by_normalized_name(&self.db, &key).await
        };
        match stored {
            Ok(Some(record)) if is_fresh(&record, now) => {
                info!(key = %key, id = %record.id, source = "cache", "Found recent record in store");
                return Ok(Resolution {
                    record,
                    source: ResolutionSource::Cache,
                });
            }
            Ok(Some(record)) => {
                debug!(
                    key = %key,
                    last_updated = %record.last_updated,
                    "Stored record is stale, re-resolving"
                );
            }
            Ok(None) => debug!(key = %key, "No stored record"),
            Err(e) => warn!(key = %key, error = %e, "Store lookup failed, continuing resolution"),
        }

        // Step 2: built-in fixtures
        if let Some(fixture) = fixtures().find(&key) {
            info!(key = %key, fixture = fixture.key, source = "fixture", "Matched fixture, persisting");
            let record = InfluencerRecord::from_profile(fixture.profile.clone(), key, now);
            let stored = influencers::upsert_influencer(&self.db, &record).await?;
            return Ok(Resolution {
                record: stored,
                source: ResolutionSource::Fixture,
            });
        }

        // Step 3: oracle
        let Some(oracle) = self.oracle.as_deref() else {
            info!(key = %key, source = "fallback", "No oracle configured, using unknown influencer");
            return Ok(self.fallback(now));
        };

        match ask_oracle(oracle, name, hints).await {
            Ok(profile) => {
                let oracle_key = normalize_name(&profile.name);
                info!(
                    key = %key,
                    oracle_key = %oracle_key,
                    claims = profile.claims.len(),
                    source = "oracle",
                    "Oracle profile accepted, persisting"
                );
                let record = InfluencerRecord::from_profile(profile, oracle_key, now);
                if record.normalized_name.is_empty() {
                    warn!(name = %record.name, "Oracle name has no usable key, not persisting");
                    return Ok(Resolution {
                        record,
                        source: ResolutionSource::Oracle,
                    });
                }
                let stored = influencers::upsert_influencer(&self.db, &record).await?;
                Ok(Resolution {
                    record: stored,
                    source: ResolutionSource::Oracle,
                })
            }
            Err(e) => {
                // Step 4: fallback
                warn!(key = %key, error = %e, source = "fallback", "Oracle failed, using unknown influencer");
                Ok(self.fallback(now))
            }
        }
    }

    /// The unknown-influencer fixture with a fresh id; never persisted
    fn fallback(&self, now: DateTime<Utc>) -> Resolution {
        let profile = fixtures().unknown().profile.clone();
        let key = normalize_name(&profile.name);
        Resolution {
            record: InfluencerRecord::from_profile(profile, key, now),
            source: ResolutionSource::Fallback,
        }
    }
}

async fn ask_oracle(
    oracle: &dyn ClaimOracle,
    name: &str,
    hints: &ResolveHints,
) -> Result<InfluencerProfile> {
    let prompt = prompts::influencer_profile(name, hints.time_range.as_deref(), hints.claim_count);
    let text = oracle.complete(&prompt).await?;
    Ok(schema::decode_profile(&text)?)
}
