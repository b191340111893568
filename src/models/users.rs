use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account roles, stored as lowercase strings in a Postgres TEXT column.
///
/// `Client` books and orders; the other three are provider roles. A chat's
/// provider side is always exactly one of the three provider roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Roles {
    #[sea_orm(string_value = "client")]
    Client,
    #[sea_orm(string_value = "photographer")]
    Photographer,
    #[sea_orm(string_value = "shop")]
    Shop,
    #[sea_orm(string_value = "rental")]
    Rental,
}

impl Roles {
    /// Parse a role label from query/body input. Case and surrounding
    /// whitespace are ignored.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "client" => Some(Roles::Client),
            "photographer" => Some(Roles::Photographer),
            "shop" => Some(Roles::Shop),
            "rental" => Some(Roles::Rental),
            _ => None,
        }
    }
}

/// SeaORM entity for the `users` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub auth_provider: String,
    pub role: Roles,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

impl Model {
    /// The name shown to other marketplace users, with sensible fallbacks.
    pub fn public_name(&self) -> String {
        self.display_name
            .clone()
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| self.email.clone())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::profiles::Entity")]
    Profiles,
    #[sea_orm(has_many = "super::portfolios::Entity")]
    Portfolios,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profiles.def()
    }
}

impl Related<super::portfolios::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Portfolios.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs (not stored in DB, used for request bodies) ──

/// Used internally by the auth middleware to create a user from JWT claims.
#[derive(Debug, Clone)]
pub struct CreateUserFromAuth {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub auth_provider: String,
    pub role: Roles,
}

/// Used by the `POST /api/auth/complete-profile` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteProfile {
    pub username: Option<String>,
    pub role: Option<Roles>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Used for user self-service updates.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Option<Roles>,
}

/// A safe user representation for API responses (never leaks internal fields).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Roles,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

impl From<Model> for UserResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            username: m.username,
            display_name: m.display_name,
            avatar_url: m.avatar_url,
            role: m.role,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Roles;

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(Roles::parse("  Photographer "), Some(Roles::Photographer));
        assert_eq!(Roles::parse("SHOP"), Some(Roles::Shop));
        assert_eq!(Roles::parse("rental"), Some(Roles::Rental));
        assert_eq!(Roles::parse("client"), Some(Roles::Client));
    }

    #[test]
    fn parse_rejects_unknown_labels() {
        assert_eq!(Roles::parse("freelancer"), None);
        assert_eq!(Roles::parse(""), None);
    }
}
