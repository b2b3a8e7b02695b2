//! Candidate Hydrator: candidate ids → full profile records.


use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::profile::{Profile, Role};
use crate::store::{ProfileStore, StoreError};
use crate::vectordb::MatchCandidate;

/// A candidate paired with its stored profile, if the id still resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct HydratedCandidate {
    pub candidate: MatchCandidate,
    pub profile: Option<Profile>,
}

impl HydratedCandidate {
    pub fn id(&self) -> &str {
        &self.candidate.id
    }
}

#[derive(Clone)]
pub struct CandidateHydrator {
    store: Arc<dyn ProfileStore>,
}

impl CandidateHydrator {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Fetches all candidate profiles from `target_role`'s table in one call.
    ///
    /// The output follows `candidates` order, not the store's. Ids the store no
    /// longer knows come back with `profile: None`. No call is made for an empty
    /// candidate list.
    #[instrument(skip(self, candidates), fields(table = target_role.table(), candidates = candidates.len()))]
    pub async fn hydrate(
        &self,
        target_role: Role,
        candidates: Vec<MatchCandidate>,
    ) -> Result<Vec<HydratedCandidate>, StoreError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = candidates.iter().map(|c| c.id.clone()).collect();
        let mut by_id: HashMap<String, Profile> = self
            .store
            .fetch_profiles(target_role, &ids)
            .await?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        let hydrated: Vec<HydratedCandidate> = candidates
            .into_iter()
            .map(|candidate| {
                let profile = by_id.remove(&candidate.id);
                HydratedCandidate { candidate, profile }
            })
            .collect();

        debug!(
            resolved = hydrated.iter().filter(|h| h.profile.is_some()).count(),
            "Hydration complete"
        );
        Ok(hydrated)
    }
}
