//! Employees domain module.
//!
//! User-linked staff profiles with departments, salary/absence accounting,
//! and a rolling rating average that drives the blocking policy.

pub mod employee;

pub use employee::{
    Employee, EmployeeDepartment, EmployeeDepartmentId, EmployeeId, EmployeeRating,
    EmployeeRatingId, MINIMUM_RATING,
};
