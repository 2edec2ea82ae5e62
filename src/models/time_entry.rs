//! Time entry and time entry activity resources.

use chrono::NaiveDate;

use crate::client::HalClient;
use crate::error::Result;
use crate::formattable::Formattable;
use crate::link::Link;
use crate::models::API_V3;
use crate::traits::{Get, List, TypedResource};

typed_resource! {
    /// Time logged against a work package or project.
    TimeEntry => "TimeEntry"
}

impl TimeEntry {
    pub fn id(&self) -> i64 {
        self.int("id")
    }

    pub fn comment(&self) -> Option<Formattable> {
        self.formattable("comment").ok().flatten()
    }

    pub fn set_comment(&mut self, comment: &Formattable) {
        self.set_formattable("comment", comment);
    }

    /// The day the time was spent.
    pub fn spent_on(&self) -> Option<NaiveDate> {
        self.date("spentOn").ok()
    }

    pub fn set_spent_on(&mut self, spent_on: NaiveDate) {
        self.set_date("spentOn", spent_on);
    }

    pub fn hours(&self) -> Option<chrono::Duration> {
        self.duration("hours").ok()
    }

    pub fn set_hours(&mut self, hours: chrono::Duration) {
        self.set_duration("hours", hours);
    }

    /// Point the `activity` link at an activity, e.g.
    /// `/api/v3/time_entries/activities/1`.
    pub fn set_activity(&mut self, href: impl Into<String>) {
        self.set_link("activity", Link::new(href));
    }

    pub fn set_work_package(&mut self, href: impl Into<String>) {
        self.set_link("workPackage", Link::new(href));
    }

    pub fn set_project(&mut self, href: impl Into<String>) {
        self.set_link("project", Link::new(href));
    }

    /// The activity, embedded or loaded from the `activity` link.
    pub async fn activity(&self, client: Option<&HalClient>) -> Result<Option<TimeEntriesActivity>> {
        let resource = self.resolve_embedded("activity", client).await?;
        Ok(resource.and_then(|res| TimeEntriesActivity::from_resource(res.into_owned())))
    }
}

typed_resource! {
    /// A kind of work time can be booked on (development, management, ...).
    TimeEntriesActivity => "TimeEntriesActivity"
}

impl TimeEntriesActivity {
    pub fn id(&self) -> i64 {
        self.int("id")
    }

    pub fn name(&self) -> &str {
        self.string("name")
    }

    pub fn position(&self) -> i64 {
        self.int("position")
    }

    pub fn is_default(&self) -> bool {
        self.bool("default")
    }
}

impl Get for TimeEntry {
    fn path(id: u64) -> String {
        format!("{API_V3}/time_entries/{id}")
    }
}

impl List for TimeEntry {
    const COLLECTION_PATH: &'static str = "/api/v3/time_entries";
}

impl TimeEntry {
    /// Log the entry: POST it to the time entries collection.
    pub async fn create(&self, client: &HalClient) -> Result<TimeEntry> {
        client.post(Self::COLLECTION_PATH, self).await?.downcast()
    }
}

impl Get for TimeEntriesActivity {
    fn path(id: u64) -> String {
        format!("{API_V3}/time_entries/activities/{id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_as;
    use crate::registry::TypeRegistry;
    use crate::traits::HalResource;

    #[tokio::test]
    async fn test_time_entry_accessors() {
        let body = br#"{
            "_type": "TimeEntry",
            "id": 5,
            "comment": {"format": "plain", "raw": "Reviewed", "html": "<p>Reviewed</p>"},
            "spentOn": "2019-09-01",
            "hours": "PT1H30M",
            "_embedded": {
                "activity": {"_type": "TimeEntriesActivity", "id": 1, "name": "Management",
                             "position": 1, "default": true}
            }
        }"#;
        let entry: TimeEntry = decode_as(body, &TypeRegistry::default()).unwrap();
        assert_eq!(entry.id(), 5);
        assert_eq!(entry.comment().unwrap().raw, "Reviewed");
        assert_eq!(entry.spent_on(), NaiveDate::from_ymd_opt(2019, 9, 1));
        assert_eq!(entry.hours(), Some(chrono::Duration::minutes(90)));

        let activity = entry.activity(None).await.unwrap().unwrap();
        assert_eq!(activity.name(), "Management");
        assert_eq!(activity.position(), 1);
        assert!(activity.is_default());
    }

    #[test]
    fn test_time_entry_write_body() {
        let mut entry = TimeEntry::empty();
        entry.set_comment(&Formattable::new("plain", "Meeting", ""));
        entry.set_spent_on(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        entry.set_hours(chrono::Duration::hours(2));
        entry.set_activity("/api/v3/time_entries/activities/3");
        entry.set_work_package("/api/v3/work_packages/42");

        assert_eq!(
            entry.link("activity").unwrap().href,
            "/api/v3/time_entries/activities/3"
        );

        let body = serde_json::to_value(&entry).unwrap();
        assert_eq!(body["_type"], "TimeEntry");
        assert_eq!(body["spentOn"], "2024-01-15");
        assert_eq!(body["hours"], "PT2H");
        assert_eq!(body["comment"]["raw"], "Meeting");
        assert_eq!(body["_links"]["workPackage"]["href"], "/api/v3/work_packages/42");
    }
}
