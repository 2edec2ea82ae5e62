//! Trait definitions for HAL resources and operations.
//!
//! [`HalResource`] and [`TypedResource`] are the capabilities every decoded
//! resource offers; [`Get`], [`List`] and [`Update`] are operations that
//! typed resources gain from them.

mod get;
mod list;
mod resource;
mod update;

pub use get::Get;
pub use list::List;
pub use resource::{HalResource, TypedResource};
pub use update::Update;
