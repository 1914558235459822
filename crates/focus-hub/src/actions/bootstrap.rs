//! Bootstrap actions

/// Application startup
#[derive(Debug, Clone)]
pub enum BootstrapAction {
    /// Load persisted state and verify the stored token
    Start,
    /// Startup finished, the splash screen can go
    End,
}
