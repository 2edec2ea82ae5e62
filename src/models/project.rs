//! Project resource.

use crate::client::HalClient;
use crate::error::Result;
use crate::models::{Collection, API_V3};
use crate::traits::{Get, List};

typed_resource! {
    /// A project: the container of work packages, versions and memberships.
    Project => "Project"
}

impl Project {
    pub fn id(&self) -> i64 {
        self.int("id")
    }

    /// URL-friendly identifier, e.g. `lectio`.
    pub fn identifier(&self) -> &str {
        self.string("identifier")
    }

    pub fn name(&self) -> &str {
        self.string("name")
    }

    /// Plain description text.
    ///
    /// Newer servers send a formattable here; its raw text is returned.
    pub fn description(&self) -> &str {
        match self.field("description") {
            Some(serde_json::Value::Object(map)) => {
                map.get("raw").and_then(|raw| raw.as_str()).unwrap_or("")
            }
            _ => self.string("description"),
        }
    }

    pub fn active(&self) -> bool {
        self.bool("active")
    }

    pub fn public(&self) -> bool {
        self.bool("public")
    }

    /// The project's work packages, fetched through the `workPackages` link.
    pub async fn work_packages(&self, client: &HalClient) -> Result<Collection> {
        self.link_resource(client, "workPackages").await?.downcast()
    }
}

impl Get for Project {
    fn path(id: u64) -> String {
        format!("{API_V3}/projects/{id}")
    }
}

impl List for Project {
    const COLLECTION_PATH: &'static str = "/api/v3/projects";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_as;
    use crate::registry::TypeRegistry;

    #[test]
    fn test_project_accessors() {
        let body = br#"{
            "_type": "Project", "id": 3, "identifier": "lectio", "name": "Lectio",
            "active": true, "public": false, "description": "",
            "createdAt": "2019-08-30T07:52:22Z", "updatedAt": "2019-08-31T11:08:11Z",
            "_links": {"workPackages": {"href": "/api/v3/projects/3/work_packages"}}
        }"#;
        let project: Project = decode_as(body, &TypeRegistry::default()).unwrap();
        assert_eq!(project.id(), 3);
        assert_eq!(project.identifier(), "lectio");
        assert_eq!(project.name(), "Lectio");
        assert_eq!(project.description(), "");
        assert!(project.active());
        assert!(!project.public());
        assert!(project.created_at().is_some());
        assert!(project.updated_at().is_some());
    }

    #[test]
    fn test_project_formattable_description() {
        let body = br#"{"_type": "Project", "description": {"format": "markdown", "raw": "About", "html": "<p>About</p>"}}"#;
        let project: Project = decode_as(body, &TypeRegistry::default()).unwrap();
        assert_eq!(project.description(), "About");
    }
}
