//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the ophal binary.

use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};

use crate::filters::Filters;

/// HAL API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "ophal", about = "OpenProject HAL API CLI", version)]
pub struct Cli {
    /// Server root, e.g. https://community.openproject.org
    #[arg(long, global = true, env = "OPENPROJECT_URL")]
    pub url: Option<String>,

    /// API key, sent with basic auth.
    #[arg(long, global = true, env = "OPENPROJECT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single resource by ID.
    Get {
        /// The type of resource to get.
        entity: Entity,

        /// The numeric ID.
        id: u64,
    },

    /// List resources with optional filtering and pagination.
    List {
        /// The type of resource to list.
        entity: Entity,

        /// Page number (1-indexed).
        #[arg(long)]
        offset: Option<u32>,

        /// Number of items per page.
        #[arg(long)]
        page_size: Option<u32>,

        /// Filter as `name:operator[:value,...]`, e.g. `status:o` or
        /// `assignee:=:4,5`. May be repeated.
        #[arg(long = "filter", value_name = "FILTER")]
        filters: Vec<FilterArg>,

        /// Fetch every page instead of one.
        #[arg(long, conflicts_with_all = ["offset", "page_size"])]
        all: bool,
    },

    /// Fetch any API path and print the decoded resource.
    Show {
        /// Path relative to the server root, e.g. /api/v3/my_preferences.
        path: String,
    },

    /// Fetch a path, then follow one of its links.
    Follow {
        /// Path of the starting resource.
        path: String,

        /// Name of the link to follow, e.g. `project`.
        link: String,
    },
}

/// Resource types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    #[value(alias = "projects")]
    Project,
    #[value(alias = "work-packages", alias = "wp")]
    WorkPackage,
    #[value(alias = "users")]
    User,
    #[value(alias = "time-entries")]
    TimeEntry,
    /// Only supported by `get`.
    #[value(alias = "attachments")]
    Attachment,
}

/// One `--filter` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterArg {
    pub name: String,
    pub operator: String,
    pub values: Vec<String>,
}

impl FromStr for FilterArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let name = parts.next().unwrap_or_default().trim();
        let operator = parts.next().unwrap_or_default().trim();
        if name.is_empty() || operator.is_empty() {
            return Err(format!("expected name:operator[:values], got '{s}'"));
        }
        let values = parts
            .next()
            .map(|values| {
                values
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            name: name.to_string(),
            operator: operator.to_string(),
            values,
        })
    }
}

/// Combine `--filter` arguments into a filter set.
pub fn build_filters(args: &[FilterArg]) -> Filters {
    args.iter().fold(Filters::new(), |filters, arg| {
        filters.filter(arg.name.clone(), arg.operator.clone(), arg.values.clone())
    })
}
