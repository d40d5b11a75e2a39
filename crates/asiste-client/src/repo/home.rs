//! Home-screen reads: active shift and monthly stats, both behind the
//! 30-minute cache.
//!
//! Cache-first unless `force_refresh`; a network success writes through.
//! Two concurrent refreshes may both hit the network and race on the cache
//! write; the reads are idempotent, so last-writer-wins is acceptable.

use asiste_common::api::CODE_OK;
use asiste_common::models::shift::{Shift, ShiftStatus};
use asiste_common::models::stats::Stats;

use crate::cache::{CachedShift, HomeCache};
use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::store::SessionStore;

pub struct HomeRepository {
    client: ApiClient,
    session: SessionStore,
    cache: HomeCache,
}

impl HomeRepository {
    pub fn new(client: ApiClient, session: SessionStore, cache: HomeCache) -> Self {
        Self {
            client,
            session,
            cache,
        }
    }

    /// The employee's current shift, or `None` when there is none. Absence
    /// is never cached, so the next call re-checks the network.
    #[tracing::instrument(skip(self))]
    pub async fn active_shift(&self, force_refresh: bool) -> ApiResult<Option<Shift>> {
        if !force_refresh {
            if let Some(cached) = self.cache.cached_shift() {
                tracing::debug!("Serving active shift from cache");
                return Ok(Some(shift_from_cache(cached)));
            }
        }

        let token = self.session.token().ok_or_else(ApiError::not_authenticated)?;
        let envelope = self.client.active_shift(&token).await?;
        if envelope.header.code != CODE_OK {
            return Err(ApiError::message(envelope.header.message));
        }

        match envelope.body.shift {
            Some(data) => {
                self.cache.save_shift(&data);
                Ok(Some(Shift {
                    id: data.id,
                    status: ShiftStatus::parse_lossy(&data.status),
                    scheduled_start_time: data.scheduled_start_time,
                    scheduled_end_time: data.scheduled_end_time,
                    next_shift_time: data.next_shift_time,
                }))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn stats(&self, force_refresh: bool) -> ApiResult<Stats> {
        if !force_refresh {
            if let Some(cached) = self.cache.cached_stats() {
                tracing::debug!("Serving stats from cache");
                return Ok(cached);
            }
        }

        let token = self.session.token().ok_or_else(ApiError::not_authenticated)?;
        let envelope = self.client.stats(&token).await?;
        if envelope.header.code != CODE_OK {
            return Err(ApiError::message(envelope.header.message));
        }

        let stats = Stats {
            dias_laborados: envelope.body.dias_laborados,
            puntualidad: envelope.body.puntualidad,
        };
        self.cache.save_stats(&stats);
        Ok(stats)
    }
}

fn shift_from_cache(cached: CachedShift) -> Shift {
    Shift {
        id: cached.id,
        status: ShiftStatus::parse_lossy(&cached.status),
        scheduled_start_time: cached.scheduled_start_time,
        scheduled_end_time: cached.scheduled_end_time,
        next_shift_time: cached.next_shift_time,
    }
}
