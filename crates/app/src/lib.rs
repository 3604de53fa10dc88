//! `ordermill-app` — bounded application context.
//!
//! [`Domain`] holds every entity registry together with the notification
//! sink; registries are never ambient globals. Tests get isolation by
//! building a fresh context per test (or calling [`Domain::reset_all`]).

use std::rc::Rc;

use ordermill_core::Registry;
use ordermill_customers::{Customer, CustomerAddress};
use ordermill_employees::{Employee, EmployeeDepartment, EmployeeRating};
use ordermill_notify::{NoopNotifier, Notifier};
use ordermill_orders::Order;
use ordermill_products::Product;
use ordermill_users::User;

/// All domain registries plus the notification collaborator.
pub struct Domain {
    pub users: Registry<User>,
    pub products: Registry<Product>,
    pub addresses: Registry<CustomerAddress>,
    pub customers: Registry<Customer>,
    pub departments: Registry<EmployeeDepartment>,
    pub ratings: Registry<EmployeeRating>,
    pub employees: Registry<Employee>,
    pub orders: Registry<Order>,
    notifier: Rc<dyn Notifier>,
}

impl Domain {
    pub fn new(notifier: Rc<dyn Notifier>) -> Self {
        Self {
            users: Registry::new(),
            products: Registry::new(),
            addresses: Registry::new(),
            customers: Registry::new(),
            departments: Registry::new(),
            ratings: Registry::new(),
            employees: Registry::new(),
            orders: Registry::new(),
            notifier,
        }
    }

    /// Context with a no-op notification sink (tests, offline runs).
    pub fn offline() -> Self {
        Self::new(Rc::new(NoopNotifier))
    }

    /// Cloned handle to the notification sink.
    ///
    /// Returned by value so callers can hold it across a mutable borrow of
    /// one of the registries (e.g. while registering a customer).
    pub fn notifier(&self) -> Rc<dyn Notifier> {
        Rc::clone(&self.notifier)
    }

    /// Clear every registry. Destructive; never call with entity
    /// construction in flight.
    pub fn reset_all(&mut self) {
        self.users.reset();
        self.products.reset();
        self.addresses.reset();
        self.customers.reset();
        self.departments.reset();
        self.ratings.reset();
        self.employees.reset();
        self.orders.reset();
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::offline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_all_clears_every_registry() {
        let mut domain = Domain::offline();
        User::create(
            &mut domain.users,
            "Gvido",
            "Van Rosom",
            "+374747474",
            "van.rosom@gmail.com",
        )
        .unwrap();
        Product::create(&mut domain.products, "Some product", 300.0, 10.0, 13.0).unwrap();

        domain.reset_all();
        assert!(domain.users.is_empty());
        assert!(domain.products.is_empty());
    }

    #[test]
    fn notifier_handle_outlives_registry_borrows() {
        let mut domain = Domain::offline();
        let user = User::create(
            &mut domain.users,
            "Gvido",
            "Van Rosom",
            "+374747474",
            "van.rosom@gmail.com",
        )
        .unwrap();

        // The cloned handle stays usable while a registry is mutably
        // borrowed for registration.
        let notifier = domain.notifier();
        let customer =
            Customer::create(&mut domain.customers, user, Vec::new(), notifier.as_ref())
                .unwrap();

        assert!(customer.borrow().verification_code().is_some());
    }
}
