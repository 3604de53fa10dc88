use rand::Rng;
use serde::{Deserialize, Serialize};

use ordermill_core::{
    DomainError, DomainResult, Entity, EntityId, Registered, Registry, Shared,
    impl_entity_id_newtype,
};
use ordermill_notify::Notifier;
use ordermill_users::User;

/// Customer identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub EntityId);

impl_entity_id_newtype!(CustomerId);

/// Customer address identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerAddressId(pub EntityId);

impl_entity_id_newtype!(CustomerAddressId);

/// Free-text delivery address. No uniqueness constraint; owned by at most
/// one customer's address list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAddress {
    id: CustomerAddressId,
    address: String,
}

impl CustomerAddress {
    pub fn create(
        registry: &mut Registry<CustomerAddress>,
        address: impl Into<String>,
    ) -> DomainResult<Shared<CustomerAddress>> {
        registry.register(Self {
            id: CustomerAddressId::new(),
            address: address.into(),
        })
    }

    pub fn id_typed(&self) -> CustomerAddressId {
        self.id
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl Entity for CustomerAddress {
    type Id = CustomerAddressId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Registered for CustomerAddress {
    const KIND: &'static str = "customer address";
}

/// Address list mutation selector.
///
/// The enum is closed, so every action maps to exactly one mutator; there is
/// no "unknown action" case to fall through.
#[derive(Debug, Clone)]
pub enum AddressAction {
    Add(Shared<CustomerAddress>),
    Remove(CustomerAddressId),
}

/// User-linked customer profile.
///
/// Creation issues a verification code and dispatches it to the user's email
/// through the notification collaborator; the code is stored before dispatch,
/// so a subsequent `verify` always observes it.
#[derive(Debug, Clone)]
pub struct Customer {
    id: CustomerId,
    user: Shared<User>,
    addresses: Vec<Shared<CustomerAddress>>,
    is_verified: bool,
    verification_code: Option<String>,
}

impl Customer {
    /// Construct and register a customer, then issue a verification code.
    ///
    /// Fails with `DuplicateEntity` when the user already has a customer
    /// profile.
    pub fn create(
        registry: &mut Registry<Customer>,
        user: Shared<User>,
        addresses: Vec<Shared<CustomerAddress>>,
        notifier: &dyn Notifier,
    ) -> DomainResult<Shared<Customer>> {
        let customer = registry.register(Self {
            id: CustomerId::new(),
            user,
            addresses,
            is_verified: false,
            verification_code: None,
        })?;

        customer.borrow_mut().issue_verification_code(notifier);
        Ok(customer)
    }

    pub fn id_typed(&self) -> CustomerId {
        self.id
    }

    pub fn user(&self) -> &Shared<User> {
        &self.user
    }

    pub fn addresses(&self) -> &[Shared<CustomerAddress>] {
        &self.addresses
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    pub fn verification_code(&self) -> Option<&str> {
        self.verification_code.as_deref()
    }

    /// Verify the customer profile with a previously issued code.
    ///
    /// One-shot: success consumes the pending code. Fails with
    /// `VerificationFailed` when no code is pending or the code mismatches.
    pub fn verify(&mut self, code: &str) -> DomainResult<()> {
        tracing::info!("verifying customer profile");
        match &self.verification_code {
            Some(pending) if pending == code => {
                self.verification_code = None;
                self.is_verified = true;
                Ok(())
            }
            _ => Err(DomainError::VerificationFailed),
        }
    }

    /// Regenerate and redispatch a verification code, overwriting any
    /// pending one.
    pub fn request_verification_code(&mut self, notifier: &dyn Notifier) {
        tracing::info!("verification code has been regenerated");
        self.issue_verification_code(notifier);
    }

    /// Append an address to the owned list.
    pub fn add_address(&mut self, address: Shared<CustomerAddress>) {
        self.addresses.push(address);
    }

    /// Remove an address by id. No-op when the id is not in the list.
    pub fn remove_address(&mut self, address_id: CustomerAddressId) {
        self.addresses
            .retain(|a| a.borrow().id_typed() != address_id);
    }

    /// Membership check used by order creation.
    pub fn is_address_valid(&self, address: &Shared<CustomerAddress>) -> bool {
        let id = address.borrow().id_typed();
        self.addresses.iter().any(|a| a.borrow().id_typed() == id)
    }

    /// Dispatch an address-list action to the corresponding mutator and
    /// return the resulting list.
    pub fn apply_address_action(&mut self, action: AddressAction) -> &[Shared<CustomerAddress>] {
        match action {
            AddressAction::Add(address) => self.add_address(address),
            AddressAction::Remove(id) => self.remove_address(id),
        }
        &self.addresses
    }

    fn issue_verification_code(&mut self, notifier: &dyn Notifier) {
        let code = format!("{}", rand::rng().random_range(10_000..99_000));
        self.verification_code = Some(code.clone());

        notifier.notify(&code, &[self.user.borrow().email().to_string()]);
        tracing::info!("verification code dispatch is in progress");
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Registered for Customer {
    const KIND: &'static str = "customer";

    fn is_duplicate_of(&self, other: &Self) -> bool {
        self.user.borrow().id_typed() == other.user.borrow().id_typed()
    }
}
