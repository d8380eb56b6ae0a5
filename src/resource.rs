use serde::{Deserialize, Serialize};

/// A role in the organization's catalog (engineer, designer, PM...).
/// Resources carry a role, and allocation rows are keyed by role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display ordering; lower comes first.
    #[serde(default)]
    pub order: i64,
}

impl Role {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            order: 0,
        }
    }
}

/// A person/contractor assignable to projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    /// Short unique code shown in grids (e.g. "JDO").
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    /// Percent of a full-time week this person is available (0-100).
    #[serde(default = "default_availability")]
    pub availability: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_availability() -> i64 {
    100
}

fn default_true() -> bool {
    true
}

impl Resource {
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        role_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            email: None,
            role_id: role_id.into(),
            specialization: None,
            availability: 100,
            is_active: true,
        }
    }

    pub fn with_availability(mut self, availability: i64) -> Self {
        self.availability = availability;
        self
    }
}
