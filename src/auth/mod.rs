pub mod password;
pub mod sessions;

/// Access roles. New sign-ups default to `Technician`; promoting to admin is
/// a direct data change, there is no in-app flow for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Technician,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Technician => "technician",
        }
    }

    /// Unknown or missing role strings fall back to technician.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            _ => Role::Technician,
        }
    }
}

/// The signed-in user attached to a request after session lookup.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
