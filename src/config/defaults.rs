//! Default values for configuration options.
//!
//! Centralized constants so the resolver, the settings file template and the
//! tests agree on the same built-in values.

/// Default repository location.
pub const REPO: &str = ".";

/// Default start of the history range: the all-zero commit, meaning "from the beginning".
pub const FROM_COMMIT: &str = "0000000000000000000000000000000000000000";

/// Default end of the history range.
pub const TO_REF: &str = "refs/heads/master";

/// Commits whose message matches this pattern are ignored by default.
pub const IGNORE_PATTERN: &str =
    r"^\[maven-release-plugin\].*|^\[Gradle Release Plugin\].*|^Merge.*";

/// Name of the virtual tag collecting commits not reachable from any tag.
pub const UNTAGGED_NAME: &str = "No tag";

/// Date format used when printing dates in the changelog.
pub const DATE_FORMAT: &str = "YYYY-MM-dd HH:mm:ss";

/// Time zone used when printing dates.
pub const TIME_ZONE: &str = "UTC";

/// Name of the virtual issue collecting commits without an issue reference.
pub const NO_ISSUE_NAME: &str = "No issue";

/// Pattern extracting the human-readable part of a tag name.
pub const READABLE_TAG_NAME: &str = "/([^/]+?)$";

/// Pattern recognizing Jira issue keys.
pub const JIRA_ISSUE_PATTERN: &str = r"\b[a-zA-Z]([a-zA-Z]+)-([0-9]+)\b";

/// Template used when neither a template path nor template content is given.
pub const TEMPLATE_PATH: &str = "changelog.mustache";

/// Key under which extended variables are exposed to templates (`{{extended.*}}`).
pub const EXTENDED_KEY: &str = "extended";

/// Fixed format accepted by `--ignore-older-than` (`YYYY-MM-dd HH:mm:ss`).
pub const IGNORE_OLDER_THAN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default output path for `init`.
pub const SETTINGS_FILE: &str = "changelog.toml";
