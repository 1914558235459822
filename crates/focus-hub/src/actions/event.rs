//! Event types
//!
//! Events are facts that re-enter the middleware chain so other middleware
//! can react to them. They never reach the reducers.
//!
//! Events use past tense or descriptive names:
//! - `WatchlistChanged` (not `ReloadWatchlist`)

/// Events that re-enter the middleware chain
#[derive(Debug, Clone)]
pub enum Event {
    /// The watchlist of a signed-in user was loaded or mutated
    WatchlistChanged { watchlist: Vec<String> },
}
