use serde::{Deserialize, Serialize};

use ordermill_core::{
    DomainResult, Entity, EntityId, Registered, Registry, Shared, impl_entity_id_newtype,
};

/// User identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub EntityId);

impl_entity_id_newtype!(UserId);

/// Identity entity: one per person.
///
/// Never mutated after construction; the username is derived once from the
/// email address (substring after the last `@`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    phone_number: String,
    email: String,
    username: String,
}

impl User {
    /// Construct and register a user.
    ///
    /// Fails with `DuplicateEntity` when the derived username collides with
    /// an already-registered user.
    pub fn create(
        registry: &mut Registry<User>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone_number: impl Into<String>,
        email: impl Into<String>,
    ) -> DomainResult<Shared<User>> {
        let email = email.into();
        let username = derive_username(&email);

        registry.register(Self {
            id: UserId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number: phone_number.into(),
            email,
            username,
        })
    }

    pub fn id_typed(&self) -> UserId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Substring after the last `@`; the whole email when no `@` is present.
fn derive_username(email: &str) -> String {
    email
        .rsplit('@')
        .next()
        .unwrap_or(email)
        .to_string()
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Registered for User {
    const KIND: &'static str = "user";

    fn is_duplicate_of(&self, other: &Self) -> bool {
        self.username == other.username
    }
}
