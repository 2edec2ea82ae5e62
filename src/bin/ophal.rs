//! OpenProject HAL API CLI binary.
//!
//! A command-line interface for browsing a HAL+JSON API.

use clap::Parser;
use ophal::cli::{build_filters, Cli, Command, Entity, FilterArg};
use ophal::output::PrettyPrint;
use ophal::{
    Attachment, Collection, Get, HalClient, HalError, HalResource, List, PaginationParams,
    Project, Resource, TimeEntry, TypedResource, User, WorkPackage,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match build_client(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set OPENPROJECT_URL or pass --url");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_client(cli: &Cli) -> ophal::Result<HalClient> {
    let url = cli
        .url
        .as_deref()
        .ok_or_else(|| HalError::ConfigMissing("no server URL given".to_string()))?;
    let client = HalClient::new(url)?;
    Ok(match cli.api_key.as_deref() {
        Some(key) if !key.is_empty() => client.with_api_key(key),
        _ => client,
    })
}

async fn run(client: &HalClient, cli: Cli) -> ophal::Result<()> {
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, id, cli.json).await,
        Command::List {
            entity,
            offset,
            page_size,
            filters,
            all,
        } => {
            let params = PaginationParams { offset, page_size };
            handle_list(client, entity, &params, &filters, all, cli.json).await
        }
        Command::Show { path } => {
            let resource = client.get(&path).await?;
            output_single(&resource, cli.json)
        }
        Command::Follow { path, link } => {
            let resource = client.get(&path).await?;
            let object = resource
                .object()
                .ok_or_else(|| HalError::MissingLink(link.clone()))?;
            let target = object.link_resource(client, &link).await?;
            output_single(&target, cli.json)
        }
    }
}

async fn handle_get(client: &HalClient, entity: Entity, id: u64, json: bool) -> ophal::Result<()> {
    let resource = match entity {
        Entity::Project => Project::get(client, id).await?.into_resource(),
        Entity::WorkPackage => WorkPackage::get(client, id).await?.into_resource(),
        Entity::User => User::get(client, id).await?.into_resource(),
        Entity::TimeEntry => TimeEntry::get(client, id).await?.into_resource(),
        Entity::Attachment => Attachment::get(client, id).await?.into_resource(),
    };
    output_single(&resource, json)
}

async fn handle_list(
    client: &HalClient,
    entity: Entity,
    params: &PaginationParams,
    filter_args: &[FilterArg],
    all: bool,
    json: bool,
) -> ophal::Result<()> {
    let filters = build_filters(filter_args);

    match entity {
        Entity::Project => {
            list::<Project, ProjectRow>(client, &filters, params, all, json).await
        }
        Entity::WorkPackage => {
            list::<WorkPackage, WorkPackageRow>(client, &filters, params, all, json).await
        }
        Entity::User => list::<User, UserRow>(client, &filters, params, all, json).await,
        Entity::TimeEntry => {
            list::<TimeEntry, TimeEntryRow>(client, &filters, params, all, json).await
        }
        Entity::Attachment => {
            eprintln!("Error: Attachments can only be retrieved individually");
            eprintln!("Hint: Use 'ophal show /api/v3/work_packages/<id>/attachments'");
            Err(HalError::Unsupported("list attachments".to_string()))
        }
    }
}

async fn list<T, R>(
    client: &HalClient,
    filters: &ophal::Filters,
    params: &PaginationParams,
    all: bool,
    json: bool,
) -> ophal::Result<()>
where
    T: List + Serialize + Sync,
    R: Tabled + for<'a> From<&'a T>,
{
    if all {
        let items = T::list_all(client, filters).await?;
        if json {
            println!("{}", serde_json::to_string_pretty(&items)?);
        } else {
            let rows: Vec<R> = items.iter().map(R::from).collect();
            println!("{}", Table::new(rows));
            println!("\n{} items", items.len());
        }
        return Ok(());
    }

    let page = T::list_page(client, filters, params).await?;
    output_page::<T, R>(&page, json)
}

fn output_single(resource: &Resource, json: bool) -> ophal::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(resource)?);
    } else {
        println!("{}", resource.pretty_print());
    }
    Ok(())
}

fn output_page<T, R>(page: &Collection, json: bool) -> ophal::Result<()>
where
    T: TypedResource + Serialize,
    R: Tabled + for<'a> From<&'a T>,
{
    let items: Vec<T> = page.items_of();
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        let rows: Vec<R> = items.iter().map(R::from).collect();
        println!("{}", Table::new(rows));
        if page.has_next_page() {
            println!(
                "\nPage {}/{} ({} total items)",
                page.offset(),
                page.page_count(),
                page.total()
            );
        } else {
            println!("\nPage {} (end, {} total items)", page.offset(), page.total());
        }
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct ProjectRow {
    id: i64,
    identifier: String,
    name: String,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id(),
            identifier: p.identifier().to_string(),
            name: p.name().to_string(),
        }
    }
}

#[derive(Tabled)]
struct WorkPackageRow {
    id: i64,
    subject: String,
    status: String,
    assignee: String,
}

impl From<&WorkPackage> for WorkPackageRow {
    fn from(wp: &WorkPackage) -> Self {
        let title = |name: &str| {
            wp.link(name)
                .and_then(|link| link.title.clone())
                .unwrap_or_default()
        };
        Self {
            id: wp.id(),
            subject: wp.subject().to_string(),
            status: title("status"),
            assignee: title("assignee"),
        }
    }
}

#[derive(Tabled)]
struct UserRow {
    id: i64,
    login: String,
    name: String,
    status: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id(),
            login: u.login().to_string(),
            name: u.name().to_string(),
            status: u.status().to_string(),
        }
    }
}

#[derive(Tabled)]
struct TimeEntryRow {
    id: i64,
    #[tabled(rename = "spent on")]
    spent_on: String,
    hours: String,
    activity: String,
}

impl From<&TimeEntry> for TimeEntryRow {
    fn from(t: &TimeEntry) -> Self {
        Self {
            id: t.id(),
            spent_on: t.spent_on().map(|d| d.to_string()).unwrap_or_default(),
            hours: t.hours().map(ophal::duration::format).unwrap_or_default(),
            activity: t
                .link("activity")
                .and_then(|link| link.title.clone())
                .unwrap_or_default(),
        }
    }
}
