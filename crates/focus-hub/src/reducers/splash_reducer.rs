use crate::actions::{Action, BootstrapAction, GlobalAction};
use crate::state::SplashState;

/// Reducer for splash screen state
pub fn reduce_splash(mut state: SplashState, action: &Action) -> SplashState {
    match action {
        Action::Bootstrap(BootstrapAction::Start) => {
            state.bootstrapping = true;
            state.animation_frame = 0;
        }
        Action::Bootstrap(BootstrapAction::End) => {
            state.bootstrapping = false;
        }
        Action::Global(GlobalAction::Tick) if state.bootstrapping => {
            state.animation_frame += 1;
        }
        _ => {}
    }

    state
}
