//! Tests for custom issue activation.

use super::super::resolved::CustomIssue;
use super::*;

mod activation {
    use super::*;

    #[test]
    fn name_and_pattern_activate_without_link_or_title() {
        let settings = resolve(&[
            "--custom-issue-name",
            "JIRA",
            "--custom-issue-pattern",
            "[A-Z]+-[0-9]+",
        ])
        .unwrap();

        let issue = settings.custom_issue().unwrap();
        assert_eq!(issue.name, "JIRA");
        assert_eq!(issue.pattern, "[A-Z]+-[0-9]+");
        assert!(issue.link.is_none());
        assert!(issue.title.is_none());
    }

    #[test]
    fn link_and_title_are_independent() {
        let with_link = resolve(&[
            "--custom-issue-name",
            "Bug",
            "--custom-issue-pattern",
            "bug([0-9]+)",
            "--custom-issue-link",
            "https://bugs/${PATTERN_GROUP_1}",
        ])
        .unwrap();
        let with_title = resolve(&[
            "--custom-issue-name",
            "Bug",
            "--custom-issue-pattern",
            "bug([0-9]+)",
            "--custom-issue-title",
            "Bug ${PATTERN_GROUP_1}",
        ])
        .unwrap();

        let issue = with_link.custom_issue().unwrap();
        assert_eq!(issue.link.as_deref(), Some("https://bugs/${PATTERN_GROUP_1}"));
        assert!(issue.title.is_none());

        let issue = with_title.custom_issue().unwrap();
        assert!(issue.link.is_none());
        assert_eq!(issue.title.as_deref(), Some("Bug ${PATTERN_GROUP_1}"));
    }

    #[test]
    fn pattern_only_is_silently_inactive() {
        let settings = resolve(&["--custom-issue-pattern", "[A-Z]+-[0-9]+"]).unwrap();

        assert!(settings.custom_issue().is_none());
    }

    #[test]
    fn name_only_is_silently_inactive() {
        let settings = resolve(&["--custom-issue-name", "JIRA", "--custom-issue-link", "x"]).unwrap();

        assert!(settings.custom_issue().is_none());
    }

    #[test]
    fn backreference_pattern_is_kept_verbatim() {
        let settings = resolve(&[
            "--custom-issue-name",
            "Twin",
            "--custom-issue-pattern",
            r"(\w)\1",
        ])
        .unwrap();

        assert_eq!(settings.custom_issue().unwrap().pattern, r"(\w)\1");
    }
}

mod from_parts {
    use super::*;

    #[test]
    fn requires_both_mandatory_parts() {
        assert!(CustomIssue::from_parts(None, None, Some("l"), Some("t")).is_none());
        assert!(CustomIssue::from_parts(Some("n"), None, None, None).is_none());
        assert!(CustomIssue::from_parts(None, Some("p"), None, None).is_none());
        assert!(CustomIssue::from_parts(Some("n"), Some("p"), None, None).is_some());
    }
}

mod settings_file {
    use super::*;

    #[test]
    fn file_issue_is_used_when_cli_supplies_nothing() {
        let settings = Settings::resolve(
            &cli(&["--stdout"]),
            Some(&file(
                r#"
                [custom_issue]
                name = "Bugzilla"
                pattern = "bug([0-9]+)"
                title = "Bug"
            "#,
            )),
        )
        .unwrap();

        let issue = settings.custom_issue().unwrap();
        assert_eq!(issue.name, "Bugzilla");
        assert_eq!(issue.title.as_deref(), Some("Bug"));
    }

    #[test]
    fn cli_link_and_title_complete_file_issue() {
        let settings = Settings::resolve(
            &cli(&[
                "--stdout",
                "--custom-issue-link",
                "http://x/${PATTERN_GROUP_1}",
                "--custom-issue-title",
                "Bug ${PATTERN_GROUP_1}",
            ]),
            Some(&file(
                r#"
                [custom_issue]
                name = "Bug"
                pattern = "bug[0-9]+"
            "#,
            )),
        )
        .unwrap();

        assert_eq!(
            settings.custom_issue(),
            Some(&CustomIssue {
                name: "Bug".to_string(),
                pattern: "bug[0-9]+".to_string(),
                link: Some("http://x/${PATTERN_GROUP_1}".to_string()),
                title: Some("Bug ${PATTERN_GROUP_1}".to_string()),
            })
        );
    }

    #[test]
    fn cli_name_with_file_pattern_activates() {
        let settings = Settings::resolve(
            &cli(&["--stdout", "--custom-issue-name", "Tracker"]),
            Some(&file(
                r#"
                [custom_issue]
                pattern = "T-[0-9]+"
            "#,
            )),
        )
        .unwrap();

        let issue = settings.custom_issue().unwrap();
        assert_eq!(issue.name, "Tracker");
        assert_eq!(issue.pattern, "T-[0-9]+");
    }

    #[test]
    fn cli_parts_override_file_parts() {
        let settings = Settings::resolve(
            &cli(&[
                "--stdout",
                "--custom-issue-name",
                "JIRA",
                "--custom-issue-pattern",
                "[A-Z]+-[0-9]+",
            ]),
            Some(&file(
                r#"
                [custom_issue]
                name = "Bugzilla"
                pattern = "bug([0-9]+)"
                title = "Bug"
            "#,
            )),
        )
        .unwrap();

        let issue = settings.custom_issue().unwrap();
        assert_eq!(issue.name, "JIRA");
        assert_eq!(issue.pattern, "[A-Z]+-[0-9]+");
        assert_eq!(issue.title.as_deref(), Some("Bug"));
    }
}
