pub use crate::{
    command_id::CommandId,
    keybindings::{KeyBinding, Keymap},
};

/// Get the default keymap
pub fn default_keymap() -> Keymap {
    use CommandId::*;

    let bindings = vec![
        // Navigation
        KeyBinding::new("j", "j", NavigateNext),
        KeyBinding::new("down", "↓", NavigateNext),
        KeyBinding::new("k", "k", NavigatePrevious),
        KeyBinding::new("up", "↑", NavigatePrevious),
        KeyBinding::new("enter", "Enter", Confirm),
        // Watchlist
        KeyBinding::new("a", "a", RepositoryAdd),
        KeyBinding::new("d", "d", RepositoryRemove),
        KeyBinding::new("r", "r", RepositoryRefresh),
        KeyBinding::new("R", "R", RepositoryReloadAll),
        KeyBinding::new("o", "o", RepositoryOpenInBrowser),
        KeyBinding::new("/", "/", FilterStart),
        // Pull request triage
        KeyBinding::new("m", "m", PrMerge),
        KeyBinding::new("x", "x", PrReject),
        KeyBinding::new("o", "o", PrOpenInBrowser),
        KeyBinding::new("y", "y", ConfirmYes),
        KeyBinding::new("n", "n", ConfirmNo),
        // Session
        KeyBinding::new("r", "r", AuthRetry),
        KeyBinding::new("L", "L", SessionLogout),
        // General
        KeyBinding::new("q", "q", GlobalClose),
        KeyBinding::new("ctrl+c", "Ctrl+C", GlobalQuit),
    ];

    Keymap::new(bindings)
}
