//! Tests for CLI argument parsing.

use std::path::Path;

use super::cli::{Cli, Command};

mod parsing {
    use super::*;

    #[test]
    fn parse_output_flags() {
        let cli = Cli::parse_from_iter([
            "git-changelog",
            "--stdout",
            "--output-file",
            "CHANGELOG.md",
            "--mediawiki-url",
            "https://wiki.example.com",
        ]);

        assert!(cli.stdout);
        assert_eq!(cli.output_file.as_deref(), Some(Path::new("CHANGELOG.md")));
        assert_eq!(cli.mediawiki_url.as_deref(), Some("https://wiki.example.com"));
        assert!(cli.has_output());
    }

    #[test]
    fn parse_range_flags() {
        let cli = Cli::parse_from_iter([
            "git-changelog",
            "--from-ref",
            "refs/tags/v1.0.0",
            "--from-commit",
            "abc123",
            "--to-ref",
            "HEAD",
            "--to-commit",
            "def456",
        ]);

        assert_eq!(cli.from_ref.as_deref(), Some("refs/tags/v1.0.0"));
        assert_eq!(cli.from_commit.as_deref(), Some("abc123"));
        assert_eq!(cli.to_ref.as_deref(), Some("HEAD"));
        assert_eq!(cli.to_commit.as_deref(), Some("def456"));
    }

    #[test]
    fn parse_json_flags_as_raw_text() {
        let cli = Cli::parse_from_iter([
            "git-changelog",
            "--extended-variables",
            r#"{"var1":"val1"}"#,
            "--extended-headers",
            r#"{"X-Token":"abc"}"#,
        ]);

        assert_eq!(cli.extended_variables.as_deref(), Some(r#"{"var1":"val1"}"#));
        assert_eq!(cli.extended_headers.as_deref(), Some(r#"{"X-Token":"abc"}"#));
    }

    #[test]
    fn parse_tracker_flags() {
        let cli = Cli::parse_from_iter([
            "git-changelog",
            "--jira-server",
            "https://jira.example.com",
            "--jira-username",
            "user",
            "--github-token",
            "gh-token",
            "--gitlab-project-name",
            "project",
        ]);

        assert_eq!(cli.jira_server.as_deref(), Some("https://jira.example.com"));
        assert_eq!(cli.jira_username.as_deref(), Some("user"));
        assert_eq!(cli.github_token.as_deref(), Some("gh-token"));
        assert_eq!(cli.gitlab_project_name.as_deref(), Some("project"));
    }

    #[test]
    fn parse_short_flags() {
        let cli = Cli::parse_from_iter([
            "git-changelog",
            "-r",
            "/tmp/repo",
            "-t",
            "changelog.hbs",
            "-v",
        ]);

        assert_eq!(cli.repo.as_deref(), Some(Path::new("/tmp/repo")));
        assert_eq!(cli.template.as_deref(), Some(Path::new("changelog.hbs")));
        assert!(cli.verbose);
    }

    #[test]
    fn parse_switches() {
        let cli = Cli::parse_from_iter([
            "git-changelog",
            "--ignore-commits-without-issue",
            "--remove-issue-from-message",
        ]);

        assert!(cli.ignore_commits_without_issue);
        assert!(cli.remove_issue_from_message);
    }
}

mod legacy_aliases {
    use super::*;

    #[test]
    fn short_codes_are_accepted_as_long_aliases() {
        let cli = Cli::parse_from_iter([
            "git-changelog",
            "--std",
            "--of",
            "out.md",
            "--fr",
            "v1",
            "--tc",
            "abc",
            "--cn",
            "JIRA",
            "--cp",
            "[A-Z]+-[0-9]+",
            "--ex",
            "{}",
        ]);

        assert!(cli.stdout);
        assert_eq!(cli.output_file.as_deref(), Some(Path::new("out.md")));
        assert_eq!(cli.from_ref.as_deref(), Some("v1"));
        assert_eq!(cli.to_commit.as_deref(), Some("abc"));
        assert_eq!(cli.custom_issue_name.as_deref(), Some("JIRA"));
        assert_eq!(cli.custom_issue_pattern.as_deref(), Some("[A-Z]+-[0-9]+"));
        assert_eq!(cli.extended_variables.as_deref(), Some("{}"));
    }

    #[test]
    fn single_dash_spellings_are_accepted() {
        let cli = Cli::parse_from_iter([
            "git-changelog",
            "-std",
            "-of",
            "out.md",
            "-fr",
            "v1",
            "-rt=/(.*)$",
            "-jiraServer",
            "https://jira",
        ]);

        assert!(cli.stdout);
        assert_eq!(cli.output_file.as_deref(), Some(Path::new("out.md")));
        assert_eq!(cli.from_ref.as_deref(), Some("v1"));
        assert_eq!(cli.readable_tag_name.as_deref(), Some("/(.*)$"));
        assert_eq!(cli.jira_server.as_deref(), Some("https://jira"));
    }

    #[test]
    fn single_letter_short_flags_are_unchanged() {
        let cli = Cli::parse_from_iter(["git-changelog", "-v", "-r", "/srv/repo", "-t", "a.hbs"]);

        assert!(cli.verbose);
        assert_eq!(cli.repo.as_deref(), Some(Path::new("/srv/repo")));
        assert_eq!(cli.template.as_deref(), Some(Path::new("a.hbs")));
    }

    #[test]
    fn values_after_terminator_are_not_rewritten() {
        let result = Cli::try_parse_from_iter(["git-changelog", "--", "-std"]);

        assert!(result.is_err());
    }

    #[test]
    fn jira_server_accepts_camel_case_spelling() {
        let cli = Cli::parse_from_iter(["git-changelog", "--jiraServer", "https://jira"]);

        assert_eq!(cli.jira_server.as_deref(), Some("https://jira"));
    }
}

mod defaults {
    use super::*;

    #[test]
    fn unsupplied_flags_are_absent() {
        let cli = Cli::parse_from_iter(["git-changelog"]);

        assert!(cli.command.is_none());
        assert!(cli.settings_file.is_none());
        assert!(cli.template.is_none());
        assert!(cli.repo.is_none());
        assert!(cli.date_format.is_none());
        assert!(cli.custom_issue_link.is_none());
        assert!(cli.mediawiki_user.is_none());
        assert!(!cli.stdout);
        assert!(!cli.verbose);
        assert!(!cli.has_output());
    }

    #[test]
    fn empty_string_is_still_supplied() {
        let cli = Cli::parse_from_iter(["git-changelog", "--date-format", ""]);

        assert_eq!(cli.date_format.as_deref(), Some(""));
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_flag_is_rejected() {
        let result = Cli::try_parse_from_iter(["git-changelog", "--no-such-flag"]);

        assert!(result.is_err());
    }

    #[test]
    fn missing_value_is_rejected() {
        let result = Cli::try_parse_from_iter(["git-changelog", "--output-file"]);

        assert!(result.is_err());
    }

    #[test]
    fn help_text_lists_output_flags() {
        let help = Cli::help_text();

        assert!(help.contains("--stdout"));
        assert!(help.contains("--output-file"));
        assert!(help.contains("--mediawiki-url"));
    }
}

mod init_command {
    use super::*;

    #[test]
    fn parse_init_default_output() {
        let cli = Cli::parse_from_iter(["git-changelog", "init"]);

        assert!(cli.is_init());
        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, Path::new("changelog.toml"));
            }
            None => panic!("expected init command"),
        }
    }

    #[test]
    fn parse_init_custom_output() {
        let cli = Cli::parse_from_iter(["git-changelog", "init", "--output", "custom.toml"]);

        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, Path::new("custom.toml"));
            }
            None => panic!("expected init command"),
        }
    }

    #[test]
    fn run_mode_is_not_init() {
        let cli = Cli::parse_from_iter(["git-changelog", "--stdout"]);

        assert!(!cli.is_init());
    }
}
