//! Work package resource.

use chrono::NaiveDate;

use crate::client::HalClient;
use crate::error::Result;
use crate::formattable::Formattable;
use crate::models::{Collection, Project, User, API_V3};
use crate::traits::{Get, List, TypedResource};

typed_resource! {
    /// A work package (task, bug, milestone, ...).
    ///
    /// Relations such as the assignee may be embedded or only linked; the
    /// relation accessors read the embedded copy and fall back to the link
    /// when a client is given.
    WorkPackage => "WorkPackage"
}

impl WorkPackage {
    pub fn id(&self) -> i64 {
        self.int("id")
    }

    pub fn subject(&self) -> &str {
        self.string("subject")
    }

    pub fn set_subject(&mut self, subject: &str) {
        self.set_field("subject", subject);
    }

    /// Description, or `None` when unset or malformed.
    pub fn description(&self) -> Option<Formattable> {
        self.formattable("description").ok().flatten()
    }

    pub fn set_description(&mut self, description: &Formattable) {
        self.set_formattable("description", description);
    }

    /// Optimistic locking counter; must be sent back with updates.
    pub fn lock_version(&self) -> i64 {
        self.int("lockVersion")
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.date("startDate").ok()
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.date("dueDate").ok()
    }

    pub fn estimated_time(&self) -> Option<chrono::Duration> {
        self.duration("estimatedTime").ok()
    }

    pub fn percentage_done(&self) -> i64 {
        self.int("percentageDone")
    }

    /// Attachments, embedded or loaded from the `attachments` link.
    pub async fn attachments(&self, client: Option<&HalClient>) -> Result<Option<Collection>> {
        self.relation("attachments", client).await
    }

    pub async fn author(&self, client: Option<&HalClient>) -> Result<Option<User>> {
        self.relation("author", client).await
    }

    pub async fn responsible(&self, client: Option<&HalClient>) -> Result<Option<User>> {
        self.relation("responsible", client).await
    }

    pub async fn assignee(&self, client: Option<&HalClient>) -> Result<Option<User>> {
        self.relation("assignee", client).await
    }

    pub async fn project(&self, client: Option<&HalClient>) -> Result<Option<Project>> {
        self.relation("project", client).await
    }

    /// A related resource of type `T`. A relation of another type (e.g. a
    /// group as assignee) gives `None`.
    async fn relation<T: TypedResource>(
        &self,
        name: &str,
        client: Option<&HalClient>,
    ) -> Result<Option<T>> {
        let resource = self.resolve_embedded(name, client).await?;
        Ok(resource.and_then(|res| T::from_resource(res.into_owned())))
    }
}

impl Get for WorkPackage {
    fn path(id: u64) -> String {
        format!("{API_V3}/work_packages/{id}")
    }
}

impl List for WorkPackage {
    const COLLECTION_PATH: &'static str = "/api/v3/work_packages";
}
