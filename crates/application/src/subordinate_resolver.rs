use std::collections::BTreeSet;
use std::sync::Arc;

use stratum_core::{AppResult, OrgId, UserId};
use stratum_domain::collect_subordinates;
use tracing::warn;

use crate::ReportingLineRepository;

/// Resolves the transitive set of users reporting to a manager.
#[derive(Clone)]
pub struct SubordinateResolver {
    repository: Arc<dyn ReportingLineRepository>,
}

impl SubordinateResolver {
    /// Creates a resolver over a reporting-line repository.
    #[must_use]
    pub fn new(repository: Arc<dyn ReportingLineRepository>) -> Self {
        Self { repository }
    }

    /// Returns every user in `org_id` transitively reporting to `user_id`.
    ///
    /// Cyclic hierarchy data is an upstream integrity problem: the walk
    /// stops at already-visited users and the cycle is logged, never raised.
    pub async fn subordinates_of(
        &self,
        org_id: OrgId,
        user_id: UserId,
    ) -> AppResult<BTreeSet<UserId>> {
        let lines = self.repository.list_reporting_lines(org_id).await?;
        let traversal = collect_subordinates(user_id, &lines);

        if traversal.cycle_detected() {
            let revisited = traversal
                .revisited
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            warn!(
                %org_id,
                %user_id,
                revisited = %revisited,
                "reporting hierarchy contains a cycle; traversal stopped at visited users"
            );
        }

        Ok(traversal.subordinates)
    }
}
