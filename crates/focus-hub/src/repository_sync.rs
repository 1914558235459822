//! Resolve watchlist entries into dashboard cards
//!
//! Every entry is fetched independently: repository metadata and the open PR
//! count run concurrently, and entries run concurrently with each other. A
//! failing entry becomes a placeholder card instead of failing the batch.

use crate::domain_models::RepositorySummary;
use futures::future::join_all;
use gh_client::{ClientResult, GitHubClient, RepositoryName};

/// Fetch one card
pub async fn fetch_summary(
    client: &dyn GitHubClient,
    full_name: &str,
) -> ClientResult<RepositorySummary> {
    let name = RepositoryName::parse(full_name)?;
    let (repository, pull_requests_count) = tokio::try_join!(
        client.fetch_repository(&name.owner, &name.name),
        client.count_open_pull_requests(&name.owner, &name.name),
    )?;
    Ok(RepositorySummary::from_repository(
        repository,
        pull_requests_count,
    ))
}

/// Fetch every card, in watchlist order
pub async fn load_all(client: &dyn GitHubClient, watchlist: &[String]) -> Vec<RepositorySummary> {
    let fetches = watchlist
        .iter()
        .enumerate()
        .map(|(position, full_name)| async move {
            match fetch_summary(client, full_name).await {
                Ok(summary) => summary,
                Err(e) => {
                    log::warn!("Failed to load {}: {}", full_name, e);
                    RepositorySummary::failed(full_name, position)
                }
            }
        });

    let summaries = join_all(fetches).await;
    log::info!(
        "Loaded {} repositories ({} failed)",
        summaries.len(),
        summaries.iter().filter(|s| s.error).count()
    );
    summaries
}

/// Replace the card for `full_name` with a refresh result
///
/// A failed refresh keeps the previous data and only flags the card. Returns
/// false when the card is no longer listed.
pub fn apply_refresh(
    summaries: &mut [RepositorySummary],
    full_name: &str,
    result: ClientResult<RepositorySummary>,
) -> bool {
    let Some(card) = summaries.iter_mut().find(|s| s.full_name == full_name) else {
        log::debug!("Dropping refresh for {}, no longer listed", full_name);
        return false;
    };

    match result {
        Ok(summary) => *card = summary,
        Err(e) => {
            log::warn!("Failed to refresh {}: {}", full_name, e);
            card.mark_refresh_failed();
        }
    }
    true
}
