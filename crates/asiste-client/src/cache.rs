//! TTL cache for the home-screen reads (active shift and stats), layered on
//! the preference store.
//!
//! A cached entry is valid for 30 minutes from its last write. Staleness,
//! absence and undeserializable payloads all read as a miss; cache failures
//! never surface to the caller. The shift is stored as discrete fields, the
//! stats as a single JSON blob.

use serde_json::Value;

use asiste_common::api::ShiftData;
use asiste_common::models::stats::Stats;

use crate::store::PrefStore;

pub const CACHE_VALIDITY_MS: i64 = 30 * 60 * 1000;

const KEY_SHIFT_ID: &str = "shift_id";
const KEY_SHIFT_STATUS: &str = "shift_status";
const KEY_SHIFT_START: &str = "shift_start";
const KEY_SHIFT_END: &str = "shift_end";
const KEY_SHIFT_NEXT: &str = "shift_next";
const KEY_SHIFT_CACHE_TIME: &str = "shift_cache_time";

const KEY_STATS_JSON: &str = "stats_json";
const KEY_STATS_CACHE_TIME: &str = "stats_cache_time";

/// Shift fields as cached locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedShift {
    pub id: String,
    pub status: String,
    pub scheduled_start_time: String,
    pub scheduled_end_time: String,
    pub next_shift_time: Option<String>,
}

#[derive(Clone)]
pub struct HomeCache {
    prefs: PrefStore,
}

impl HomeCache {
    pub fn new(prefs: PrefStore) -> Self {
        Self { prefs }
    }

    fn now_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn is_fresh(&self, time_key: &str) -> bool {
        match self.prefs.get_i64(time_key) {
            Some(written_at) => Self::now_ms() - written_at <= CACHE_VALIDITY_MS,
            None => false,
        }
    }

    // --- shift ---

    pub fn save_shift(&self, shift: &ShiftData) {
        let result = self.prefs.edit(|map| {
            map.insert(KEY_SHIFT_ID.to_string(), Value::String(shift.id.clone()));
            map.insert(
                KEY_SHIFT_STATUS.to_string(),
                Value::String(shift.status.clone()),
            );
            map.insert(
                KEY_SHIFT_START.to_string(),
                Value::String(shift.scheduled_start_time.clone()),
            );
            map.insert(
                KEY_SHIFT_END.to_string(),
                Value::String(shift.scheduled_end_time.clone()),
            );
            match &shift.next_shift_time {
                Some(next) => map.insert(KEY_SHIFT_NEXT.to_string(), Value::String(next.clone())),
                None => map.remove(KEY_SHIFT_NEXT),
            };
            map.insert(KEY_SHIFT_CACHE_TIME.to_string(), Value::from(Self::now_ms()));
        });
        if let Err(err) = result {
            tracing::warn!("Failed to write shift cache: {:#}", err);
        }
    }

    /// Returns the cached shift, or `None` when absent or older than the
    /// validity window.
    pub fn cached_shift(&self) -> Option<CachedShift> {
        if !self.is_fresh(KEY_SHIFT_CACHE_TIME) {
            return None;
        }
        Some(CachedShift {
            id: self.prefs.get_string(KEY_SHIFT_ID)?,
            status: self.prefs.get_string(KEY_SHIFT_STATUS)?,
            scheduled_start_time: self.prefs.get_string(KEY_SHIFT_START)?,
            scheduled_end_time: self.prefs.get_string(KEY_SHIFT_END)?,
            next_shift_time: self.prefs.get_string(KEY_SHIFT_NEXT),
        })
    }

    pub fn clear_shift(&self) {
        let result = self.prefs.edit(|map| {
            map.remove(KEY_SHIFT_ID);
            map.remove(KEY_SHIFT_STATUS);
            map.remove(KEY_SHIFT_START);
            map.remove(KEY_SHIFT_END);
            map.remove(KEY_SHIFT_NEXT);
            map.remove(KEY_SHIFT_CACHE_TIME);
        });
        if let Err(err) = result {
            tracing::warn!("Failed to clear shift cache: {:#}", err);
        }
    }

    // --- stats ---

    pub fn save_stats(&self, stats: &Stats) {
        let json = match serde_json::to_string(stats) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!("Failed to serialize stats for cache: {}", err);
                return;
            }
        };
        let result = self.prefs.edit(|map| {
            map.insert(KEY_STATS_JSON.to_string(), Value::String(json));
            map.insert(KEY_STATS_CACHE_TIME.to_string(), Value::from(Self::now_ms()));
        });
        if let Err(err) = result {
            tracing::warn!("Failed to write stats cache: {:#}", err);
        }
    }

    /// Returns the cached stats, or `None` when absent, stale, or no longer
    /// parseable (schema drift reads as a miss, never as an error).
    pub fn cached_stats(&self) -> Option<Stats> {
        if !self.is_fresh(KEY_STATS_CACHE_TIME) {
            return None;
        }
        let json = self.prefs.get_string(KEY_STATS_JSON)?;
        match serde_json::from_str(&json) {
            Ok(stats) => Some(stats),
            Err(err) => {
                tracing::debug!("Cached stats no longer parse, treating as miss: {}", err);
                None
            }
        }
    }

    pub fn clear_stats(&self) {
        let result = self.prefs.edit(|map| {
            map.remove(KEY_STATS_JSON);
            map.remove(KEY_STATS_CACHE_TIME);
        });
        if let Err(err) = result {
            tracing::warn!("Failed to clear stats cache: {:#}", err);
        }
    }

    /// Drops every cached read. Called on logout and at the start of login
    /// so a new user can never observe the previous user's data.
    pub fn clear_all(&self) {
        self.clear_shift();
        self.clear_stats();
    }
}
