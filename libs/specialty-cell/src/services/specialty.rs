use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use shared_cache::{Clock, SystemClock, TtlCache};
use shared_config::AppConfig;
use shared_mis::client::{MisTransport, OP_GET_SPECIALITY_LIST};
use shared_mis::mapper::{map_specialties, slugify};
use shared_mis::{GatewayError, Specialty};

pub const SPECIALTY_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Served when the very first fetch for a branch fails, so the booking flow
/// always has something to show.
pub fn fallback_specialties() -> Vec<Specialty> {
    [("1", "Терапевт"), ("2", "Педиатр"), ("3", "Хирург"), ("4", "Офтальмолог")]
        .into_iter()
        .map(|(id, name)| Specialty {
            id: id.to_string(),
            name: name.to_string(),
            slug: slugify(name),
        })
        .collect()
}

/// Specialty lookups through a per-branch TTL cache.
pub struct SpecialtyService {
    transport: Arc<dyn MisTransport>,
    cache: TtlCache<String, Vec<Specialty>>,
    default_lpu_id: String,
}

impl SpecialtyService {
    pub fn new(config: &AppConfig, transport: Arc<dyn MisTransport>) -> Self {
        Self::with_clock(config, transport, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: &AppConfig,
        transport: Arc<dyn MisTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            transport,
            cache: TtlCache::new(SPECIALTY_CACHE_TTL, clock),
            default_lpu_id: config.default_lpu_id.clone(),
        }
    }

    pub fn default_lpu_id(&self) -> &str {
        &self.default_lpu_id
    }

    fn resolve_lpu<'a>(&'a self, lpu_id: Option<&'a str>) -> &'a str {
        lpu_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(&self.default_lpu_id)
    }

    /// Uncached fetch straight from MIS.
    pub async fn fetch_specialties(&self, lpu_id: &str) -> Result<Vec<Specialty>, GatewayError> {
        let payload = self
            .transport
            .get_speciality_list(lpu_id)
            .await?
            .into_gateway_result(OP_GET_SPECIALITY_LIST)?;

        Ok(map_specialties(payload))
    }

    /// Never fails. Fresh cache hit, otherwise a re-fetch; on fetch failure the
    /// stale entry is served untouched, or the static fallback when nothing was
    /// ever fetched for this branch.
    pub async fn list_specialties(&self, lpu_id: Option<&str>) -> Vec<Specialty> {
        let lpu_id = self.resolve_lpu(lpu_id).to_string();

        if let Some(specialties) = self.cache.get(&lpu_id).await {
            debug!(lpu_id = %lpu_id, "Specialty cache hit");
            return specialties;
        }

        match self.fetch_specialties(&lpu_id).await {
            Ok(specialties) => {
                info!(lpu_id = %lpu_id, count = specialties.len(), "Specialty list refreshed from MIS");
                self.cache.put(lpu_id, specialties.clone()).await;
                specialties
            }
            Err(e) => match self.cache.peek(&lpu_id).await {
                Some(stale) => {
                    warn!(lpu_id = %lpu_id, "Specialty refresh failed, serving stale list: {}", e);
                    stale
                }
                None => {
                    warn!(lpu_id = %lpu_id, "Specialty fetch failed, serving fallback list: {}", e);
                    fallback_specialties()
                }
            },
        }
    }

    /// Resolves a slug or MIS id against the cached specialty list.
    pub async fn find_specialty(&self, lpu_id: Option<&str>, identifier: &str) -> Option<Specialty> {
        self.list_specialties(lpu_id)
            .await
            .into_iter()
            .find(|s| s.matches(identifier))
    }
}
