//! CLI argument parsing tests.

use clap::Parser;
use ophal::cli::{Cli, Command, Entity};

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["ophal", "--url", "https://op.example.com", "get", "project", "3"]);

    assert!(!cli.json);
    assert_eq!(cli.url.as_deref(), Some("https://op.example.com"));
    match cli.command {
        Command::Get { entity, id } => {
            assert_eq!(entity, Entity::Project);
            assert_eq!(id, 3);
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_rejects_non_numeric_id() {
    assert!(Cli::try_parse_from(["ophal", "get", "project", "lectio"]).is_err());
}

#[test]
fn test_cli_parses_list_subcommand() {
    let cli = Cli::parse_from(["ophal", "list", "work-packages"]);

    match cli.command {
        Command::List {
            entity,
            offset,
            page_size,
            filters,
            all,
        } => {
            assert_eq!(entity, Entity::WorkPackage);
            assert_eq!(offset, None);
            assert_eq!(page_size, None);
            assert!(filters.is_empty());
            assert!(!all);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_list_with_filters_and_paging() {
    let cli = Cli::parse_from([
        "ophal",
        "list",
        "wp",
        "--offset",
        "2",
        "--page-size",
        "25",
        "--filter",
        "status:o",
        "--filter",
        "assignee:=:4",
        "--json",
    ]);

    assert!(cli.json);
    match cli.command {
        Command::List {
            offset,
            page_size,
            filters,
            ..
        } => {
            assert_eq!(offset, Some(2));
            assert_eq!(page_size, Some(25));
            assert_eq!(filters.len(), 2);
            assert_eq!(filters[0].name, "status");
            assert_eq!(filters[1].values, vec!["4"]);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_rejects_malformed_filter() {
    assert!(Cli::try_parse_from(["ophal", "list", "projects", "--filter", "status"]).is_err());
}

#[test]
fn test_cli_all_conflicts_with_offset() {
    assert!(Cli::try_parse_from(["ophal", "list", "projects", "--all", "--offset", "2"]).is_err());
}

#[test]
fn test_cli_all_conflicts_with_page_size() {
    let err = Cli::try_parse_from(["ophal", "list", "projects", "--all", "--page-size", "50"])
        .unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
}

#[test]
fn test_cli_parses_follow_subcommand() {
    let cli = Cli::parse_from(["ophal", "follow", "/api/v3/work_packages/42", "project"]);

    match cli.command {
        Command::Follow { path, link } => {
            assert_eq!(path, "/api/v3/work_packages/42");
            assert_eq!(link, "project");
        }
        _ => panic!("Expected Follow command"),
    }
}

#[test]
fn test_cli_api_key_flag_after_subcommand() {
    let cli = Cli::parse_from(["ophal", "show", "/api/v3/my_preferences", "--api-key", "secret"]);

    assert_eq!(cli.api_key.as_deref(), Some("secret"));
    assert!(matches!(cli.command, Command::Show { .. }));
}
