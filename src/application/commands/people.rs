// src/application/commands/people.rs
use crate::{
    application::{
        dto::{AuthenticatedUser, BulkEditReport},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        pager::Pager,
        profile::{ProfileRepository, ProfileSelection, SpaceOperation, SpacesPatch},
    },
};
use std::sync::Arc;

pub struct PeopleCommandService {
    profile_repo: Arc<dyn ProfileRepository>,
    page_size: u32,
}

#[derive(Debug, Clone)]
pub struct BulkEditCommand {
    pub operation: SpaceOperation,
    pub selection: Option<ProfileSelection>,
    pub spaces: Vec<String>,
}

impl PeopleCommandService {
    pub fn new(profile_repo: Arc<dyn ProfileRepository>, page_size: u32) -> Self {
        Self {
            profile_repo,
            page_size: page_size.max(1),
        }
    }

    /// Changes space memberships of every selected profile that is not held by
    /// a moderator or administrator.
    ///
    /// Each fetched page is patched before the next one is requested. The edit
    /// is not transactional: a failure leaves earlier pages committed, and
    /// re-running the same command converges to the same result.
    pub async fn bulk_edit(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: BulkEditCommand,
    ) -> ApplicationResult<BulkEditReport> {
        let Some(actor) = actor.filter(|a| a.is_admin()) else {
            return Err(ApplicationError::forbidden("bulk edit requires an administrator"));
        };

        let Some(selection) = command.selection else {
            return Ok(BulkEditReport::default());
        };

        let spaces = normalize_spaces(command.spaces);
        let query = selection.query();
        let mut pager = Pager::by_docid(self.page_size);
        let mut report = BulkEditReport::default();
        let mut fetched_total: u64 = 0;

        loop {
            let hits = self.profile_repo.find(&query, &mut pager).await?;
            report.rounds += 1;

            if hits.fetched == 0 {
                break;
            }
            fetched_total += hits.fetched as u64;

            let mut batch: Vec<SpacesPatch> = Vec::with_capacity(hits.profiles.len());
            for mut profile in hits.profiles {
                if profile.is_protected() {
                    report.protected += 1;
                    continue;
                }
                profile.apply_spaces(command.operation, &spaces);
                batch.push(profile.spaces_patch());
            }

            if !batch.is_empty() {
                report.updated += batch.len();
                report.batches += 1;
                self.profile_repo.patch_spaces(batch).await?;
            }

            if is_last_page(hits.fetched, fetched_total, &pager) {
                break;
            }
            pager.advance();
        }

        tracing::info!(
            actor = %actor.id,
            operation = command.operation.as_str(),
            rounds = report.rounds,
            batches = report.batches,
            updated = report.updated,
            protected = report.protected,
            "bulk space edit finished"
        );

        Ok(report)
    }
}

/// With a reported total, paging ends once that many records were seen; a
/// backend may cap pages below the requested limit, so a short page alone
/// proves nothing. Without a total, a short page is the only end marker
/// besides an empty one.
fn is_last_page(fetched: usize, fetched_total: u64, pager: &Pager) -> bool {
    if pager.count > 0 {
        fetched_total >= pager.count
    } else {
        fetched < pager.limit as usize
    }
}

fn normalize_spaces(spaces: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(spaces.len());
    for space in spaces {
        let space = space.trim();
        if !space.is_empty() && !out.iter().any(|s| s == space) {
            out.push(space.to_string());
        }
    }
    out
}
