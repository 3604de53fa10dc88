use serde::{Deserialize, Serialize};

use ordermill_core::{
    DomainError, DomainResult, Entity, EntityId, Registered, Registry, Shared,
    impl_entity_id_newtype,
};
use ordermill_customers::{Customer, CustomerAddress, CustomerId};
use ordermill_employees::{Employee, EmployeeId, EmployeeRating};
use ordermill_products::Product;

use crate::status::{DeliveryStatus, PaymentStatus};

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub EntityId);

impl_entity_id_newtype!(OrderId);

/// Order item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderItemId(pub EntityId);

impl_entity_id_newtype!(OrderItemId);

/// Line item: product reference, quantity, and the unit price snapshotted at
/// add time.
///
/// The quantity is validated against the product's current stock but the
/// stock itself is not decremented here; deduction is a separate, explicit
/// `Product::reduce_stock` call.
#[derive(Debug, Clone)]
pub struct OrderItem {
    id: OrderItemId,
    product: Shared<Product>,
    qty: f64,
    item_price: f64,
}

impl OrderItem {
    /// Build a line item.
    ///
    /// Fails with `InvalidQuantity` for a negative quantity and with
    /// `InsufficientStock` when the quantity exceeds the product's current
    /// stock.
    pub fn new(product: Shared<Product>, qty: f64, item_price: f64) -> DomainResult<Self> {
        if qty < 0.0 {
            return Err(DomainError::InvalidQuantity(qty));
        }

        let available = product.borrow().stock_qty();
        if qty > available {
            return Err(DomainError::InsufficientStock {
                requested: qty,
                available,
            });
        }

        Ok(Self {
            id: OrderItemId::new(),
            product,
            qty,
            item_price,
        })
    }

    pub fn id_typed(&self) -> OrderItemId {
        self.id
    }

    pub fn product(&self) -> &Shared<Product> {
        &self.product
    }

    pub fn qty(&self) -> f64 {
        self.qty
    }

    pub fn item_price(&self) -> f64 {
        self.item_price
    }

    /// Quantity times unit price. Pure.
    pub fn item_total(&self) -> f64 {
        self.qty * self.item_price
    }
}

/// The central aggregate: customer, delivery address, assigned employee, and
/// line items, with independently tracked delivery and payment statuses.
#[derive(Debug, Clone)]
pub struct Order {
    id: OrderId,
    customer: Shared<Customer>,
    address: Shared<CustomerAddress>,
    employee: Shared<Employee>,
    employee_rating: Option<Shared<EmployeeRating>>,
    items: Vec<OrderItem>,
    delivery_status: DeliveryStatus,
    payment_status: PaymentStatus,
}

impl Order {
    /// Construct and register an order.
    ///
    /// Fails with `InvalidAddress` unless `address` is a member of the
    /// customer's current address list. Both statuses start at `Waiting`.
    pub fn create(
        registry: &mut Registry<Order>,
        customer: Shared<Customer>,
        address: Shared<CustomerAddress>,
        employee: Shared<Employee>,
    ) -> DomainResult<Shared<Order>> {
        if !customer.borrow().is_address_valid(&address) {
            return Err(DomainError::InvalidAddress);
        }

        registry.register(Self {
            id: OrderId::new(),
            customer,
            address,
            employee,
            employee_rating: None,
            items: Vec::new(),
            delivery_status: DeliveryStatus::Waiting,
            payment_status: PaymentStatus::Waiting,
        })
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn customer(&self) -> &Shared<Customer> {
        &self.customer
    }

    pub fn address(&self) -> &Shared<CustomerAddress> {
        &self.address
    }

    pub fn employee(&self) -> &Shared<Employee> {
        &self.employee
    }

    pub fn employee_rating(&self) -> Option<&Shared<EmployeeRating>> {
        self.employee_rating.as_ref()
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn delivery_status(&self) -> DeliveryStatus {
        self.delivery_status
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    /// Derived flag: true exactly when the order has been paid.
    pub fn is_ordered(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    /// Append a line item.
    pub fn add_item(&mut self, item: OrderItem) {
        self.items.push(item);
    }

    /// Remove a line item by id. No-op when the id is not present.
    pub fn remove_item(&mut self, item_id: OrderItemId) {
        self.items.retain(|item| item.id_typed() != item_id);
    }

    /// Sum of line item totals. Pure.
    pub fn order_total(&self) -> f64 {
        self.items.iter().map(OrderItem::item_total).sum()
    }

    /// Update the delivery status.
    ///
    /// Fails with `NoItems` on an empty order and with `OrderLocked` when
    /// the order is already paid and the target is not completion,
    /// cancellation or return. `Canceled` routes through the shared
    /// cancellation path. A redundant same-value update is permitted and
    /// merely logged.
    pub fn change_delivery_status(&mut self, status: DeliveryStatus) -> DomainResult<()> {
        if self.items.is_empty() {
            return Err(DomainError::NoItems);
        }

        if self.is_ordered()
            && !matches!(
                status,
                DeliveryStatus::Canceled | DeliveryStatus::Delivered | DeliveryStatus::Returned
            )
        {
            return Err(DomainError::OrderLocked);
        }

        if status == DeliveryStatus::Canceled {
            self.cancel();
            return Ok(());
        }

        if status == self.delivery_status {
            tracing::warn!(status = %status, "delivery status updated repeatedly");
        }
        self.delivery_status = status;
        Ok(())
    }

    /// Update the payment status.
    ///
    /// Symmetric to [`Self::change_delivery_status`], with `{Canceled,
    /// Refunded}` as the post-payment allowance set.
    pub fn change_payment_status(&mut self, status: PaymentStatus) -> DomainResult<()> {
        if self.items.is_empty() {
            return Err(DomainError::NoItems);
        }

        if self.is_ordered()
            && !matches!(status, PaymentStatus::Canceled | PaymentStatus::Refunded)
        {
            return Err(DomainError::OrderLocked);
        }

        if status == PaymentStatus::Canceled {
            self.cancel();
            return Ok(());
        }

        if status == self.payment_status {
            tracing::warn!(status = %status, "payment status updated repeatedly");
        }
        self.payment_status = status;
        Ok(())
    }

    /// Rate the assigned employee for this order.
    ///
    /// Allowed once the order is paid or delivered (either suffices); fails
    /// with `RatingNotAllowed` before that. Delegates the value check and
    /// history append to the employee; on success the order records the
    /// rating.
    pub fn rate_employee(&mut self, rating: Shared<EmployeeRating>) -> DomainResult<()> {
        if self.payment_status != PaymentStatus::Paid
            && self.delivery_status != DeliveryStatus::Delivered
        {
            return Err(DomainError::RatingNotAllowed);
        }

        self.employee.borrow_mut().assign_rating(rating.clone())?;
        self.employee_rating = Some(rating);

        tracing::info!("thank you for the review");
        Ok(())
    }

    /// Shared cancellation path for both status dimensions: delivery is
    /// forced to `Canceled`; payment becomes `Refunded` when it was `Paid`
    /// at this moment, otherwise `Canceled`.
    fn cancel(&mut self) {
        self.delivery_status = DeliveryStatus::Canceled;
        self.payment_status = if self.payment_status == PaymentStatus::Paid {
            PaymentStatus::Refunded
        } else {
            PaymentStatus::Canceled
        };
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Registered for Order {
    const KIND: &'static str = "order";
}

/// All orders placed by the given customer, in first-insertion order.
pub fn orders_for_customer(registry: &Registry<Order>, customer_id: CustomerId) -> Vec<Shared<Order>> {
    registry
        .iter()
        .filter(|order| order.borrow().customer.borrow().id_typed() == customer_id)
        .cloned()
        .collect()
}

/// All orders handled by the given employee, in first-insertion order.
pub fn orders_for_employee(registry: &Registry<Order>, employee_id: EmployeeId) -> Vec<Shared<Order>> {
    registry
        .iter()
        .filter(|order| order.borrow().employee.borrow().id_typed() == employee_id)
        .cloned()
        .collect()
}
