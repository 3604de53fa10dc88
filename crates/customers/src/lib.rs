//! Customers domain module.
//!
//! User-linked customer profiles with an owned address list and the
//! email-code verification workflow.

pub mod customer;

pub use customer::{
    AddressAction, Customer, CustomerAddress, CustomerAddressId, CustomerId,
};
