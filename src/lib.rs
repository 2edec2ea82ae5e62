//! HAL+JSON API client library.
//!
//! A Rust library for hypermedia APIs that speak HAL+JSON, modeled on
//! OpenProject's API v3. Every response is decoded into a [`Resource`]
//! picked by its `_type` discriminator, and related resources are reached
//! by following links rather than by building URLs.
//!
//! # Quick Start
//!
//! ```no_run
//! use ophal::{HalClient, Filters, Get, List, Project, WorkPackage, operators};
//!
//! #[tokio::main]
//! async fn main() -> ophal::Result<()> {
//!     // Create client from environment variables
//!     let client = HalClient::from_env()?;
//!
//!     // Get a project by ID
//!     let project = Project::get(&client, 3).await?;
//!     println!("Project: {}", project.name());
//!
//!     // Follow a link to its work packages
//!     let work_packages = project.work_packages(&client).await?;
//!     println!("{} work packages", work_packages.total());
//!
//!     // List all open work packages, page after page
//!     let filters = Filters::new().filter("status", operators::OPEN, Vec::<String>::new());
//!     let open = WorkPackage::list_all(&client, &filters).await?;
//!     println!("Found {} open work packages", open.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`decode`] turns a HAL document into a [`Resource`], consulting a
//!   [`TypeRegistry`] for the typed variant of each `_type`.
//! - [`ResourceObject`] holds fields, links and embedded resources, and
//!   offers the accessors typed resources are built from.
//! - A document of type `Error` never becomes a normal resource: the client
//!   reports it as [`HalError::Api`].
//! - [`Get`], [`List`] and [`Update`] are the operations typed resources
//!   gain on top of the generic accessors.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `OPENPROJECT_URL` (required) - Server root, e.g. `https://community.openproject.org`
//! - `OPENPROJECT_API_KEY` (optional) - API key, sent with basic auth

mod client;
pub mod decode;
pub mod duration;
mod error;
mod filters;
mod formattable;
mod link;
mod models;
mod object;
mod pagination;
mod registry;
mod resource;
mod traits;

pub mod cli;
pub mod output;

// Re-export core types
pub use client::HalClient;
pub use error::{HalError, Result};
pub use filters::{operators, FilterOperator, Filters};
pub use formattable::Formattable;
pub use link::Link;
pub use object::{ResourceObject, DELETE_LINK, UPDATE_LINK};
pub use pagination::{collect_all, PaginationParams, DEFAULT_PAGE_SIZE};
pub use registry::{Constructor, TypeRegistry};
pub use resource::{Embedded, Resource};

// Re-export traits
pub use traits::{Get, HalResource, List, TypedResource, Update};

// Re-export models
pub use models::{
    ApiError, Attachment, Collection, Project, TimeEntriesActivity, TimeEntry, User,
    UserPreferences, WorkPackage, NEXT_PAGE_LINK, PREVIOUS_PAGE_LINK,
};
