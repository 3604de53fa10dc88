use serde::{Deserialize, Serialize};

use ordermill_core::{
    DomainError, DomainResult, Entity, EntityId, Registered, Registry, Shared,
    impl_entity_id_newtype,
};
use ordermill_users::User;

/// Average rating below this threshold blocks the employee.
pub const MINIMUM_RATING: f64 = 2.0;

/// Employee identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub EntityId);

impl_entity_id_newtype!(EmployeeId);

/// Employee department identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeDepartmentId(pub EntityId);

impl_entity_id_newtype!(EmployeeDepartmentId);

/// Employee rating identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeRatingId(pub EntityId);

impl_entity_id_newtype!(EmployeeRatingId);

/// Department with a unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDepartment {
    id: EmployeeDepartmentId,
    name: String,
}

impl EmployeeDepartment {
    pub fn create(
        registry: &mut Registry<EmployeeDepartment>,
        name: impl Into<String>,
    ) -> DomainResult<Shared<EmployeeDepartment>> {
        registry.register(Self {
            id: EmployeeDepartmentId::new(),
            name: name.into(),
        })
    }

    pub fn id_typed(&self) -> EmployeeDepartmentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for EmployeeDepartment {
    type Id = EmployeeDepartmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Registered for EmployeeDepartment {
    const KIND: &'static str = "employee department";

    fn is_duplicate_of(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Immutable rating value with an optional message.
///
/// No constraint at construction: a non-positive rating can exist, it just
/// cannot be attached to an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRating {
    id: EmployeeRatingId,
    value: f64,
    message: Option<String>,
}

impl EmployeeRating {
    pub fn create(
        registry: &mut Registry<EmployeeRating>,
        value: f64,
        message: Option<String>,
    ) -> DomainResult<Shared<EmployeeRating>> {
        registry.register(Self {
            id: EmployeeRatingId::new(),
            value,
            message,
        })
    }

    pub fn id_typed(&self) -> EmployeeRatingId {
        self.id
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Entity for EmployeeRating {
    type Id = EmployeeRatingId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Registered for EmployeeRating {
    const KIND: &'static str = "employee rating";
}

/// User-linked staff profile.
#[derive(Debug, Clone)]
pub struct Employee {
    id: EmployeeId,
    user: Shared<User>,
    department: Shared<EmployeeDepartment>,
    salary: f64,
    num_absent: u32,
    absence_cost: f64,
    blocked: bool,
    ratings: Vec<Shared<EmployeeRating>>,
}

impl Employee {
    /// Construct and register an employee.
    ///
    /// Fails with `DuplicateEntity` when the user's email already has an
    /// employee record.
    pub fn create(
        registry: &mut Registry<Employee>,
        user: Shared<User>,
        department: Shared<EmployeeDepartment>,
        salary: f64,
        num_absent: u32,
        absence_cost: f64,
    ) -> DomainResult<Shared<Employee>> {
        registry.register(Self {
            id: EmployeeId::new(),
            user,
            department,
            salary,
            num_absent,
            absence_cost,
            blocked: false,
            ratings: Vec::new(),
        })
    }

    pub fn id_typed(&self) -> EmployeeId {
        self.id
    }

    pub fn user(&self) -> &Shared<User> {
        &self.user
    }

    pub fn department(&self) -> &Shared<EmployeeDepartment> {
        &self.department
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn num_absent(&self) -> u32 {
        self.num_absent
    }

    pub fn absence_cost(&self) -> f64 {
        self.absence_cost
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn ratings(&self) -> &[Shared<EmployeeRating>] {
        &self.ratings
    }

    /// Append a rating to the history.
    ///
    /// Fails with `InvalidRating` when the value is not positive; the
    /// history is left untouched.
    pub fn assign_rating(&mut self, rating: Shared<EmployeeRating>) -> DomainResult<()> {
        let value = rating.borrow().value();
        if value <= 0.0 {
            return Err(DomainError::InvalidRating(value));
        }

        self.ratings.push(rating);
        Ok(())
    }

    /// Arithmetic mean over the rating history. Pure.
    ///
    /// Fails with `NoRatingsYet` when the history is empty.
    pub fn average_rating(&self) -> DomainResult<f64> {
        if self.ratings.is_empty() {
            return Err(DomainError::NoRatingsYet);
        }

        let sum: f64 = self.ratings.iter().map(|r| r.borrow().value()).sum();
        Ok(sum / self.ratings.len() as f64)
    }

    /// Recompute the average and store the blocking decision.
    ///
    /// Fetching the average is what (re)applies the blocking policy; callers
    /// that only want the number use [`Self::average_rating`]. Returns the
    /// average.
    pub fn refresh_blocked_status(&mut self) -> DomainResult<f64> {
        let average = self.average_rating()?;
        self.blocked = average < MINIMUM_RATING;

        if average < MINIMUM_RATING {
            tracing::warn!(
                average,
                threshold = MINIMUM_RATING,
                "employee rating fell below the minimum; blocking"
            );
        } else if average > 4.0 {
            tracing::info!(average, "employee rating is excellent this period");
        }

        Ok(average)
    }

    /// Salary minus the absence deduction.
    ///
    /// Fails with `TerminatedForNegativeEarnings` when the result is not
    /// positive.
    pub fn take_home_salary(&self) -> DomainResult<f64> {
        let total = self.salary - self.absence_deduction();
        if total <= 0.0 {
            return Err(DomainError::TerminatedForNegativeEarnings);
        }

        Ok(total)
    }

    fn absence_deduction(&self) -> f64 {
        self.absence_cost * f64::from(self.num_absent)
    }
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Registered for Employee {
    const KIND: &'static str = "employee";

    fn is_duplicate_of(&self, other: &Self) -> bool {
        self.user.borrow().email() == other.user.borrow().email()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        users: Registry<User>,
        departments: Registry<EmployeeDepartment>,
        ratings: Registry<EmployeeRating>,
        employees: Registry<Employee>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                users: Registry::new(),
                departments: Registry::new(),
                ratings: Registry::new(),
                employees: Registry::new(),
            }
        }

        fn employee(&mut self, email: &str, salary: f64, num_absent: u32) -> Shared<Employee> {
            let user =
                User::create(&mut self.users, "Test", "Employee", "+374", email).unwrap();
            let department =
                EmployeeDepartment::create(&mut self.departments, format!("dept-{email}"))
                    .unwrap();
            Employee::create(
                &mut self.employees,
                user,
                department,
                salary,
                num_absent,
                1000.0,
            )
            .unwrap()
        }

        fn rating(&mut self, value: f64) -> Shared<EmployeeRating> {
            EmployeeRating::create(&mut self.ratings, value, None).unwrap()
        }
    }

    #[test]
    fn duplicate_department_name_is_rejected() {
        let mut departments = Registry::new();
        EmployeeDepartment::create(&mut departments, "Delivery").unwrap();

        let err = EmployeeDepartment::create(&mut departments, "Delivery").unwrap_err();
        assert_eq!(err, DomainError::DuplicateEntity("employee department"));
    }

    #[test]
    fn duplicate_employee_per_user_email_is_rejected() {
        let mut fx = Fixture::new();
        let user = User::create(&mut fx.users, "A", "B", "+1", "staff@ordermill.dev").unwrap();
        let d1 = EmployeeDepartment::create(&mut fx.departments, "Delivery").unwrap();
        let d2 = EmployeeDepartment::create(&mut fx.departments, "Support").unwrap();

        Employee::create(&mut fx.employees, user.clone(), d1, 1000.0, 0, 10.0).unwrap();
        let err = Employee::create(&mut fx.employees, user, d2, 2000.0, 0, 10.0).unwrap_err();

        assert_eq!(err, DomainError::DuplicateEntity("employee"));
        assert_eq!(fx.employees.len(), 1);
    }

    #[test]
    fn non_positive_rating_is_rejected_and_history_unchanged() {
        let mut fx = Fixture::new();
        let employee = fx.employee("a@one.dev", 1000.0, 0);

        for value in [0.0, -1.5] {
            let rating = fx.rating(value);
            let err = employee.borrow_mut().assign_rating(rating).unwrap_err();
            assert_eq!(err, DomainError::InvalidRating(value));
        }
        assert!(employee.borrow().ratings().is_empty());
    }

    #[test]
    fn average_rating_requires_history() {
        let mut fx = Fixture::new();
        let employee = fx.employee("a@one.dev", 1000.0, 0);

        assert_eq!(
            employee.borrow().average_rating().unwrap_err(),
            DomainError::NoRatingsYet
        );
        assert_eq!(
            employee.borrow_mut().refresh_blocked_status().unwrap_err(),
            DomainError::NoRatingsYet
        );
    }

    #[test]
    fn refresh_applies_the_blocking_policy() {
        let mut fx = Fixture::new();
        let employee = fx.employee("a@one.dev", 1000.0, 0);

        let five = fx.rating(5.0);
        let one = fx.rating(1.0);
        employee.borrow_mut().assign_rating(five).unwrap();
        employee.borrow_mut().assign_rating(one).unwrap();

        let average = employee.borrow_mut().refresh_blocked_status().unwrap();
        assert_eq!(average, 3.0);
        assert!(!employee.borrow().is_blocked());

        // (5 + 1 + 1) / 3 ≈ 2.33, still at or above the threshold.
        let another_one = fx.rating(1.0);
        employee.borrow_mut().assign_rating(another_one).unwrap();
        let average = employee.borrow_mut().refresh_blocked_status().unwrap();
        assert!((average - 7.0 / 3.0).abs() < 1e-9);
        assert!(!employee.borrow().is_blocked());

        // Enough low ratings drag the average below 2 and flip the flag.
        for _ in 0..4 {
            let low = fx.rating(1.0);
            employee.borrow_mut().assign_rating(low).unwrap();
        }
        let average = employee.borrow_mut().refresh_blocked_status().unwrap();
        assert!(average < MINIMUM_RATING);
        assert!(employee.borrow().is_blocked());
    }

    #[test]
    fn blocking_is_reversible_on_the_next_refresh() {
        let mut fx = Fixture::new();
        let employee = fx.employee("a@one.dev", 1000.0, 0);

        let low = fx.rating(1.0);
        employee.borrow_mut().assign_rating(low).unwrap();
        employee.borrow_mut().refresh_blocked_status().unwrap();
        assert!(employee.borrow().is_blocked());

        for _ in 0..3 {
            let high = fx.rating(5.0);
            employee.borrow_mut().assign_rating(high).unwrap();
        }
        employee.borrow_mut().refresh_blocked_status().unwrap();
        assert!(!employee.borrow().is_blocked());
    }

    #[test]
    fn take_home_salary_subtracts_absences() {
        let mut fx = Fixture::new();
        let employee = fx.employee("a@one.dev", 200_000.0, 10);

        // 200_000 - 10 * 1000
        assert_eq!(employee.borrow().take_home_salary().unwrap(), 190_000.0);
    }

    #[test]
    fn non_positive_take_home_salary_terminates() {
        let mut fx = Fixture::new();
        let broke = fx.employee("a@one.dev", 1000.0, 1);
        let negative = fx.employee("b@two.dev", 500.0, 2);

        assert_eq!(
            broke.borrow().take_home_salary().unwrap_err(),
            DomainError::TerminatedForNegativeEarnings
        );
        assert_eq!(
            negative.borrow().take_home_salary().unwrap_err(),
            DomainError::TerminatedForNegativeEarnings
        );
    }
}
