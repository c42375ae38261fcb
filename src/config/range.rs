//! History range endpoints.

use std::fmt;

/// One boundary of the history range.
///
/// An endpoint is either a ref or a commit, never both: setting one
/// replaces the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeEndpoint {
    /// A ref name such as `refs/tags/v1.0.0`
    Ref(String),
    /// A commit id
    Commit(String),
}

impl RangeEndpoint {
    /// Applies a commit flag and then a ref flag to this endpoint.
    ///
    /// The two assignments run in this fixed order, so when both are
    /// supplied the ref always wins. Command-line order plays no part.
    pub fn apply(&mut self, commit: Option<&str>, reference: Option<&str>) {
        if let Some(commit) = commit {
            *self = Self::Commit(commit.to_string());
        }
        if let Some(reference) = reference {
            *self = Self::Ref(reference.to_string());
        }
    }

    /// Returns the ref name, if this endpoint is a ref.
    #[must_use]
    pub fn ref_name(&self) -> Option<&str> {
        match self {
            Self::Ref(name) => Some(name),
            Self::Commit(_) => None,
        }
    }

    /// Returns the commit id, if this endpoint is a commit.
    #[must_use]
    pub fn commit(&self) -> Option<&str> {
        match self {
            Self::Commit(id) => Some(id),
            Self::Ref(_) => None,
        }
    }
}

impl fmt::Display for RangeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ref(name) => write!(f, "ref:{name}"),
            Self::Commit(id) => write!(f, "commit:{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(id: &str) -> RangeEndpoint {
        RangeEndpoint::Commit(id.to_string())
    }

    #[test]
    fn nothing_supplied_keeps_current_value() {
        let mut endpoint = commit("abc");
        endpoint.apply(None, None);

        assert_eq!(endpoint, commit("abc"));
    }

    #[test]
    fn commit_replaces_ref() {
        let mut endpoint = RangeEndpoint::Ref("main".to_string());
        endpoint.apply(Some("abc"), None);

        assert_eq!(endpoint.commit(), Some("abc"));
        assert_eq!(endpoint.ref_name(), None);
    }

    #[test]
    fn ref_replaces_commit() {
        let mut endpoint = commit("abc");
        endpoint.apply(None, Some("main"));

        assert_eq!(endpoint.ref_name(), Some("main"));
        assert_eq!(endpoint.commit(), None);
    }

    #[test]
    fn ref_wins_when_both_supplied() {
        let mut endpoint = commit("000");
        endpoint.apply(Some("abc"), Some("main"));

        assert_eq!(endpoint, RangeEndpoint::Ref("main".to_string()));
    }

    #[test]
    fn display_names_the_kind() {
        assert_eq!(commit("abc").to_string(), "commit:abc");
        assert_eq!(RangeEndpoint::Ref("main".into()).to_string(), "ref:main");
    }
}
