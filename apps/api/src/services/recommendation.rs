//! Weather-driven music recommendations
//!
//! Picks a search keyword from the condition's mood profile, searches the
//! catalog, and samples a small, duplicate-free set of tracks. Any catalog
//! problem degrades to the curated fallback library, so `recommend` never
//! fails.

use std::collections::HashSet;
use std::sync::Arc;

use skymood_catalog_client::{CatalogClient, CatalogError, CatalogResult, CatalogTrack};
use tracing::{debug, info, instrument, warn};

use crate::models::{CanonicalCondition, RecommendationResult, RecommendationSource, Track};
use crate::services::fallback::fallback;
use crate::services::mood::{self, MoodProfile};
use crate::services::random::RandomSource;

/// Maximum tracks per recommendation
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Candidate pool requested from the catalog
pub const CANDIDATE_POOL_SIZE: u32 = 10;

/// Draw budget per candidate before sampling stops relying on the random source
const MAX_DRAWS_PER_CANDIDATE: usize = 20;

/// Recommendation engine
pub struct RecommendationService {
    catalog: Arc<CatalogClient>,
    random: Arc<dyn RandomSource>,
}

impl RecommendationService {
    pub fn new(catalog: Arc<CatalogClient>, random: Arc<dyn RandomSource>) -> Self {
        Self { catalog, random }
    }

    /// The catalog client used for searches
    pub fn catalog(&self) -> &Arc<CatalogClient> {
        &self.catalog
    }

    /// Recommend up to three tracks for a condition
    #[instrument(skip(self))]
    pub async fn recommend(&self, condition: CanonicalCondition) -> RecommendationResult {
        let profile = mood::lookup(condition);
        let keyword = self.pick_keyword(profile);

        debug!(
            keyword,
            target_valence = profile.target_valence,
            target_energy = profile.target_energy,
            "Searching catalog for mood"
        );

        match self.search_catalog(keyword).await {
            Ok(candidates) if candidates.is_empty() => {
                info!(keyword, "Catalog returned no tracks, serving fallback");
                fallback(condition)
            }
            Ok(candidates) => self.select(condition, profile, candidates),
            Err(err) => {
                log_catalog_failure(&err);
                fallback(condition)
            }
        }
    }

    fn pick_keyword(&self, profile: &'static MoodProfile) -> &'static str {
        let index = self.random.next_index(profile.keywords.len());
        profile
            .keywords
            .get(index)
            .or_else(|| profile.keywords.first())
            .copied()
            .unwrap_or_default()
    }

    async fn search_catalog(&self, keyword: &str) -> CatalogResult<Vec<CatalogTrack>> {
        let token = self.catalog.get_token().await?;
        let result = self
            .catalog
            .search_tracks(&token, keyword, Some(CANDIDATE_POOL_SIZE))
            .await;

        // A rejected exchange already cleared the cache; only a rejected
        // bearer token needs dropping here
        if matches!(&result, Err(err) if err.is_auth_failure()) {
            self.catalog.invalidate_token(&token).await;
        }
        result
    }

    fn select(
        &self,
        condition: CanonicalCondition,
        profile: &MoodProfile,
        candidates: Vec<CatalogTrack>,
    ) -> RecommendationResult {
        let pool = dedupe_by_id(candidates);
        let picks = sample_distinct(pool.len(), MAX_RECOMMENDATIONS, self.random.as_ref());
        let reason = format!(
            "fits a {} day's {} vibe",
            condition.adjective(),
            profile.mood_label
        );

        // Take picks out of the pool in pick order without cloning
        let mut slots: Vec<Option<CatalogTrack>> = pool.into_iter().map(Some).collect();
        let tracks: Vec<Track> = picks
            .into_iter()
            .filter_map(|i| slots.get_mut(i).and_then(Option::take))
            .map(|t| Track::from_catalog(t, profile.mood_label, reason.clone()))
            .collect();

        debug!(count = tracks.len(), "Selected catalog tracks");

        RecommendationResult {
            tracks,
            source: RecommendationSource::Catalog,
        }
    }
}

/// Log a catalog failure at a level matching its cause
fn log_catalog_failure(err: &CatalogError) {
    match err {
        CatalogError::MissingCredentials => {
            debug!("Catalog credentials not configured, serving fallback")
        }
        err if err.is_auth_failure() => {
            warn!(error = %err, "Catalog authentication failed, token cache cleared")
        }
        err => warn!(error = %err, "Catalog search failed, serving fallback"),
    }
}

/// Drop later tracks sharing an id with an earlier one
fn dedupe_by_id(candidates: Vec<CatalogTrack>) -> Vec<CatalogTrack> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|t| seen.insert(t.id.clone()))
        .collect()
}

/// Sample up to `count` distinct indices from `0..pool_len` without replacement
///
/// Draws until enough unseen indices are accepted. If the random source keeps
/// repeating itself past the draw budget, the remainder is filled with the
/// lowest unseen indices so the call always terminates.
pub fn sample_distinct(pool_len: usize, count: usize, random: &dyn RandomSource) -> Vec<usize> {
    let target = count.min(pool_len);
    let mut picked: Vec<usize> = Vec::with_capacity(target);
    let max_draws = pool_len.saturating_mul(MAX_DRAWS_PER_CANDIDATE);

    let mut draws = 0;
    while picked.len() < target && draws < max_draws {
        draws += 1;
        let index = random.next_index(pool_len);
        if index < pool_len && !picked.contains(&index) {
            picked.push(index);
        }
    }

    if picked.len() < target {
        debug!(draws, "Random source exhausted draw budget, filling in order");
        for index in 0..pool_len {
            if picked.len() == target {
                break;
            }
            if !picked.contains(&index) {
                picked.push(index);
            }
        }
    }

    picked
}
