//! Add Repository Form Reducer

use crate::actions::AddRepositoryAction;
use crate::state::{AddRepoFormState, AddRepoStatus};

pub fn reduce_add_repo(mut state: AddRepoFormState, action: &AddRepositoryAction) -> AddRepoFormState {
    // The typed name is frozen while its existence check runs
    let editable = !state.is_submitting();

    match action {
        AddRepositoryAction::Char(c) if editable => {
            state.input.push(*c);
            state.status = AddRepoStatus::Idle;
        }
        AddRepositoryAction::Backspace if editable => {
            state.input.pop();
            state.status = AddRepoStatus::Idle;
        }
        AddRepositoryAction::ClearField if editable => {
            state.input.clear();
            state.status = AddRepoStatus::Idle;
        }
        AddRepositoryAction::Submitted { .. } => {
            state.status = AddRepoStatus::Loading;
        }
        AddRepositoryAction::Succeeded { .. } => {
            state.status = AddRepoStatus::Success;
        }
        AddRepositoryAction::Failed { message } => {
            state.status = AddRepoStatus::Error(message.clone());
        }
        _ => {}
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_cleared_by_typing() {
        let state = AddRepoFormState {
            input: "a/".to_string(),
            status: AddRepoStatus::Error("Repository not found".to_string()),
        };
        let state = reduce_add_repo(state, &AddRepositoryAction::Char('b'));
        assert_eq!(state.input, "a/b");
        assert_eq!(state.status, AddRepoStatus::Idle);
    }

    #[test]
    fn test_input_frozen_while_checking() {
        let state = AddRepoFormState {
            input: "a/b".to_string(),
            ..Default::default()
        };
        let state = reduce_add_repo(
            state,
            &AddRepositoryAction::Submitted {
                full_name: "a/b".to_string(),
            },
        );
        let state = reduce_add_repo(state, &AddRepositoryAction::ClearField);
        assert_eq!(state.input, "a/b");
        assert!(state.is_submitting());
    }
}
