//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::traits::HalResource;
use crate::{Attachment, Collection, Project, Resource, ResourceObject, TimeEntry, User, WorkPackage};

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";

/// Trait for human-readable key-value output.
///
/// Implemented by resource types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

fn push_timestamps(lines: &mut Vec<String>, object: &ResourceObject) {
    if let Some(created) = object.created_at() {
        lines.push(format!("Created:        {}", created.format(DATE_TIME_FORMAT)));
    }
    if let Some(updated) = object.updated_at() {
        lines.push(format!("Updated:        {}", updated.format(DATE_TIME_FORMAT)));
    }
}

impl PrettyPrint for Project {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Project #{}: {}", self.id(), self.identifier()));
        lines.push(format!("Name:           {}", self.name()));

        let description = self.description();
        if !description.is_empty() {
            lines.push(format!("Description:    {}", description));
        }

        lines.push(format!(
            "Status:         {}",
            if self.active() { "active" } else { "archived" }
        ));
        if self.public() {
            lines.push("Visibility:     public".to_string());
        }
        push_timestamps(&mut lines, self);

        lines.join("\n")
    }
}

impl PrettyPrint for WorkPackage {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Work Package #{}", self.id()));
        lines.push(format!("Subject:        {}", self.subject()));

        // Titles of linked relations are enough for display; nothing is fetched.
        for (label, name) in [("Type", "type"), ("Status", "status"), ("Assignee", "assignee")] {
            if let Some(title) = self.link(name).and_then(|link| link.title.as_deref()) {
                lines.push(format!("{:<16}{}", format!("{label}:"), title));
            }
        }

        if let Some(start) = self.start_date() {
            lines.push(format!("Start:          {}", start));
        }
        if let Some(due) = self.due_date() {
            lines.push(format!("Due:            {}", due));
        }
        if let Some(estimate) = self.estimated_time() {
            lines.push(format!("Estimated:      {}", crate::duration::format(estimate)));
        }
        lines.push(format!("Done:           {}%", self.percentage_done()));
        push_timestamps(&mut lines, self);

        lines.join("\n")
    }
}

impl PrettyPrint for User {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("User #{}: {}", self.id(), self.name()));
        if !self.login().is_empty() {
            lines.push(format!("Login:          {}", self.login()));
        }
        if !self.email().is_empty() {
            lines.push(format!("Email:          {}", self.email()));
        }
        lines.push(format!("Status:         {}", self.status()));
        lines.join("\n")
    }
}

impl PrettyPrint for TimeEntry {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Time Entry #{}", self.id()));

        if let Some(spent_on) = self.spent_on() {
            lines.push(format!("Spent On:       {}", spent_on));
        }
        if let Some(hours) = self.hours() {
            lines.push(format!("Hours:          {}", crate::duration::format(hours)));
        }
        if let Some(comment) = self.comment().filter(|c| !c.raw.is_empty()) {
            lines.push(format!("Comment:        {}", comment.raw));
        }
        if let Some(title) = self.link("activity").and_then(|link| link.title.as_deref()) {
            lines.push(format!("Activity:       {}", title));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Attachment {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Attachment #{}: {}", self.id(), self.file_name()));
        lines.push(format!("Content Type:   {}", self.content_type()));
        lines.push(format!("Size:           {} bytes", self.file_size()));
        if let Some(description) = self.description().filter(|d| !d.raw.is_empty()) {
            lines.push(format!("Description:    {}", description.raw));
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Collection {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Collection ({} of {})", self.count(), self.total()));
        if self.is_paginated() {
            lines.push(format!(
                "Page:           {} ({} per page)",
                self.offset(),
                self.page_size()
            ));
        }
        for item in self.items() {
            lines.push(format!("- {}", summary(item)));
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Resource {
    fn pretty_print(&self) -> String {
        match self {
            Resource::Project(res) => res.pretty_print(),
            Resource::WorkPackage(res) => res.pretty_print(),
            Resource::User(res) => res.pretty_print(),
            Resource::TimeEntry(res) => res.pretty_print(),
            Resource::Attachment(res) => res.pretty_print(),
            Resource::Collection(res) => res.pretty_print(),
            Resource::Error(err) => format!("Error: {err}"),
            other => {
                let mut lines = header(other.resource_type().to_string());
                if let Some(object) = other.object() {
                    for (name, value) in object.fields() {
                        lines.push(format!("{:<16}{}", format!("{name}:"), value));
                    }
                    for (name, link) in object.links() {
                        lines.push(format!("{:<16}-> {}", format!("{name}:"), link.href));
                    }
                }
                lines.join("\n")
            }
        }
    }
}

/// One-line description of a collection element.
fn summary(item: &Resource) -> String {
    let object = match item.object() {
        Some(object) => object,
        None => return item.resource_type().to_string(),
    };
    let label = ["subject", "name", "fileName", "login"]
        .into_iter()
        .map(|field| object.string(field))
        .find(|value| !value.is_empty())
        .unwrap_or("");
    format!("{} #{} {}", item.resource_type(), object.int("id"), label)
        .trim_end()
        .to_string()
}
