//! Sample wiring: builds a small order end to end.
//!
//! Uses SMTP notifications when the `EMAIL_*` environment is configured,
//! a no-op sink otherwise.

use std::rc::Rc;

use anyhow::Result;

use ordermill_app::Domain;
use ordermill_customers::{Customer, CustomerAddress};
use ordermill_employees::{Employee, EmployeeDepartment};
use ordermill_notify::{NoopNotifier, Notifier, SmtpConfig, SmtpNotifier};
use ordermill_orders::{Order, OrderItem};
use ordermill_products::Product;
use ordermill_users::User;

fn notifier_from_env() -> Rc<dyn Notifier> {
    match SmtpConfig::from_env() {
        Ok(config) => match SmtpNotifier::new(&config) {
            Ok(notifier) => return Rc::new(notifier),
            Err(e) => tracing::warn!(error = %e, "SMTP setup failed; notifications disabled"),
        },
        Err(e) => tracing::info!(reason = %e, "no SMTP configuration; notifications disabled"),
    }
    Rc::new(NoopNotifier)
}

fn main() -> Result<()> {
    ordermill_observability::init();

    let mut domain = Domain::new(notifier_from_env());

    let product = Product::create(&mut domain.products, "Some product", 45_000.0, 10.0, 13.0)?;
    let product1 = Product::create(&mut domain.products, "Some product 1", 45_000.0, 15.0, 15.0)?;

    let customer_user = User::create(
        &mut domain.users,
        "Gvido",
        "Van Rosom",
        "+374747474",
        "van.rosom@gmail.com",
    )?;
    let customer_address = CustomerAddress::create(&mut domain.addresses, "Armenia, Yerevan")?;
    let notifier = domain.notifier();
    let customer = Customer::create(
        &mut domain.customers,
        customer_user,
        vec![customer_address.clone()],
        notifier.as_ref(),
    )?;

    let code = customer
        .borrow()
        .verification_code()
        .map(str::to_string)
        .expect("a fresh customer has a pending code");
    customer.borrow_mut().verify(&code)?;

    let employee_user = User::create(
        &mut domain.users,
        "Gvido",
        "Van Rosom",
        "+374747474",
        "test@mail.com",
    )?;
    let department = EmployeeDepartment::create(&mut domain.departments, "Delivery")?;
    let employee = Employee::create(
        &mut domain.employees,
        employee_user,
        department,
        200_000.0,
        10,
        1000.0,
    )?;

    let order = Order::create(&mut domain.orders, customer, customer_address, employee)?;

    for product in [product, product1] {
        let (qty, price) = {
            let product = product.borrow();
            (product.stock_qty() - 2.0, product.final_price())
        };
        order.borrow_mut().add_item(OrderItem::new(product, qty, price)?);
    }

    tracing::info!(total = order.borrow().order_total(), "order assembled");
    Ok(())
}
