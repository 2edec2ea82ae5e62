//! User and user preferences resources.

use crate::client::HalClient;
use crate::error::Result;
use crate::models::API_V3;
use crate::traits::{Get, List};

typed_resource! {
    /// A user account.
    User => "User"
}

impl User {
    pub fn id(&self) -> i64 {
        self.int("id")
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.string("name")
    }

    pub fn first_name(&self) -> &str {
        self.string("firstName")
    }

    pub fn last_name(&self) -> &str {
        self.string("lastName")
    }

    pub fn login(&self) -> &str {
        self.string("login")
    }

    /// Email address; empty when hidden from the requesting user.
    pub fn email(&self) -> &str {
        self.string("email")
    }

    /// Account status (`active`, `locked`, `invited`, ...).
    pub fn status(&self) -> &str {
        self.string("status")
    }
}

typed_resource! {
    /// Preferences of the current user (`/api/v3/my_preferences`).
    UserPreferences => "UserPreferences"
}

impl UserPreferences {
    pub fn hide_mail(&self) -> bool {
        self.bool("hideMail")
    }

    /// Time zone name, empty when the server default applies.
    pub fn time_zone(&self) -> &str {
        self.string("timeZone")
    }

    /// The user these preferences belong to.
    pub async fn user(&self, client: &HalClient) -> Result<User> {
        self.link_resource(client, "user").await?.downcast()
    }
}

impl Get for User {
    fn path(id: u64) -> String {
        format!("{API_V3}/users/{id}")
    }
}

impl List for User {
    const COLLECTION_PATH: &'static str = "/api/v3/users";
}

impl UserPreferences {
    /// Path of the current user's preferences.
    pub const PATH: &'static str = "/api/v3/my_preferences";

    /// Fetch the preferences of the authenticated user.
    pub async fn current(client: &HalClient) -> Result<Self> {
        client.get(Self::PATH).await?.downcast()
    }
}
