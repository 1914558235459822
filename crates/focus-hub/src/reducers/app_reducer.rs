use std::time::Instant;

use crate::actions::{Action, AddRepositoryAction, GlobalAction, SessionAction};
use crate::reducers::{
    add_repo_reducer::reduce_add_repo, auth_reducer::reduce_auth,
    dashboard_reducer::reduce_dashboard, repo_detail_reducer::reduce_repo_detail,
    splash_reducer::reduce_splash, status_bar_reducer::reduce_status_bar,
};
use crate::state::{AddRepoFormState, AppState, AuthState, RepoDetailState};
use crate::views::{View, ViewId};

/// Reducer - pure function that produces new state from current state + action
/// This is the root reducer that orchestrates all sub-reducers
pub fn reduce(mut state: AppState, action: &Action) -> AppState {
    match action {
        Action::Global(GlobalAction::Quit) => {
            state.running = false;
            return state;
        }
        Action::Global(GlobalAction::PushView(new_view)) => push_view(&mut state, new_view.as_ref()),
        Action::Global(GlobalAction::ReplaceView(new_view)) => {
            log::debug!("Replacing view stack with: {:?}", new_view.view_id());
            while let Some(view) = state.view_stack.pop() {
                forget_view_state(&mut state, view.view_id());
            }
            state.view_stack.push(new_view.clone());
        }
        Action::Global(GlobalAction::Close) => close_top_view(&mut state),
        Action::Global(GlobalAction::Tick) => {
            state.repo_detail.expire_notice(Instant::now());
        }

        Action::Session(SessionAction::SnapshotUpdated(snapshot)) => {
            state.session = snapshot.clone();
            if !snapshot.is_authenticated() {
                state.dashboard.reset();
            }
        }
        Action::Session(SessionAction::Logout) => {
            state.auth = AuthState::default();
        }

        Action::Auth(auth_action) => {
            state.auth = reduce_auth(state.auth, auth_action);
        }
        Action::Dashboard(dashboard_action) => {
            state.dashboard = reduce_dashboard(state.dashboard, dashboard_action);
        }
        Action::AddRepository(AddRepositoryAction::Succeeded { .. }) => {
            // The form closes itself, but only if the user has not left it already
            if state.view_stack.last().map(|v| v.view_id()) == Some(ViewId::AddRepository) {
                close_top_view(&mut state);
            }
        }
        Action::AddRepository(add_action) => {
            state.add_repo_form = reduce_add_repo(state.add_repo_form, add_action);
        }
        Action::RepoDetail(detail_action) => {
            let lifetime = state.app_config.notice_duration;
            state.repo_detail = reduce_repo_detail(state.repo_detail, detail_action, lifetime);
        }
        Action::StatusBar(status_action) => {
            state.status_bar = reduce_status_bar(state.status_bar, status_action);
        }
        _ => {}
    }

    state.splash = reduce_splash(state.splash, action);

    state
}

/// Push a view, or pop it when it is already on top
fn push_view(state: &mut AppState, new_view: &dyn View) {
    let is_duplicate = state
        .view_stack
        .last()
        .is_some_and(|top| top.view_id() == new_view.view_id());

    if is_duplicate {
        log::debug!(
            "Popping view from the stack, it is on top already: {:?}",
            new_view.view_id()
        );
        if let Some(view) = state.view_stack.pop() {
            forget_view_state(state, view.view_id());
        }
        return;
    }

    log::debug!("Pushing view onto stack: {:?}", new_view.view_id());
    if new_view.view_id() == ViewId::AddRepository {
        state.add_repo_form = AddRepoFormState::default();
    }
    state.view_stack.push(new_view.clone_box());
}

/// Close the top-most view, quitting when it is the last one
///
/// An open merge prompt counts as the top-most layer of the detail view.
fn close_top_view(state: &mut AppState) {
    let top = state.view_stack.last().map(|v| v.view_id());

    if top == Some(ViewId::RepoDetail) && state.repo_detail.merge_prompt {
        state.repo_detail.merge_prompt = false;
        return;
    }

    if state.view_stack.len() > 1 {
        if let Some(view) = state.view_stack.pop() {
            log::debug!("Closed view: {:?}", view.view_id());
            forget_view_state(state, view.view_id());
        }
    } else {
        log::debug!("Closing last view - quitting application");
        state.running = false;
    }
}

/// Drop state owned by a view that left the stack
fn forget_view_state(state: &mut AppState, view_id: ViewId) {
    match view_id {
        ViewId::AddRepository => state.add_repo_form = AddRepoFormState::default(),
        ViewId::RepoDetail => state.repo_detail = RepoDetailState::default(),
        _ => {}
    }
}
