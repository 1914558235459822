//! Add Repository form state

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AddRepoStatus {
    #[default]
    Idle,
    /// Existence check in flight
    Loading,
    Success,
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct AddRepoFormState {
    pub input: String,
    pub status: AddRepoStatus,
}

impl AddRepoFormState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_submitting(&self) -> bool {
        self.status == AddRepoStatus::Loading
    }

    /// The typed text as `owner/name`
    pub fn normalized(&self) -> String {
        normalize_repository_input(&self.input)
    }
}

/// Accept pasted GitHub URLs as well as plain `owner/name`
///
/// Strips the scheme, host, `.git` suffix and anything after the repository
/// segment. Text that is not a GitHub URL is only trimmed; validation happens
/// when the name is parsed.
pub fn normalize_repository_input(input: &str) -> String {
    let input = input.trim();

    let path = if let Some(rest) = input.strip_prefix("git@github.com:") {
        Some(rest)
    } else {
        ["https://", "http://", ""]
            .iter()
            .find_map(|scheme| {
                input
                    .strip_prefix(scheme)
                    .and_then(|rest| rest.strip_prefix("www.").or(Some(rest)))
                    .and_then(|rest| rest.strip_prefix("github.com/"))
            })
    };

    let Some(path) = path else {
        return input.to_string();
    };

    let mut segments = path.split('/').filter(|s| !s.is_empty());
    match (segments.next(), segments.next()) {
        (Some(owner), Some(repo)) => {
            let repo = repo.strip_suffix(".git").unwrap_or(repo);
            format!("{}/{}", owner, repo)
        }
        _ => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_plain_name() {
        assert_eq!(normalize_repository_input("  rust-lang/rust "), "rust-lang/rust");
    }

    #[test]
    fn test_normalize_urls() {
        for input in [
            "https://github.com/rust-lang/rust",
            "https://github.com/rust-lang/rust/",
            "https://github.com/rust-lang/rust.git",
            "https://github.com/rust-lang/rust/pull/123",
            "http://www.github.com/rust-lang/rust",
            "github.com/rust-lang/rust",
            "git@github.com:rust-lang/rust.git",
        ] {
            assert_eq!(normalize_repository_input(input), "rust-lang/rust", "{}", input);
        }
    }

    #[test]
    fn test_normalize_keeps_unrecognised_text() {
        assert_eq!(normalize_repository_input("nonsense"), "nonsense");
        assert_eq!(
            normalize_repository_input("https://github.com/only-owner"),
            "https://github.com/only-owner"
        );
    }
}
