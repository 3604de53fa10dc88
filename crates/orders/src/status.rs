//! Order status dimensions.
//!
//! The two dimensions are tracked independently; their interaction (locking
//! after payment, the shared cancellation path) lives on the order itself.
//! Statuses inside the enums are valid by construction; textual input is
//! validated at the `FromStr` seam, where an unrecognized value reports
//! `UnknownStatus`.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use ordermill_core::DomainError;

/// Delivery progression: `Waiting → InProgress → PickUp → OnTheWay →
/// Delivered`, with `Canceled` and `Returned` as absorbing alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Waiting,
    InProgress,
    PickUp,
    OnTheWay,
    Delivered,
    Returned,
    Canceled,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::InProgress => "in_progress",
            Self::PickUp => "pick_up",
            Self::OnTheWay => "on_the_way",
            Self::Delivered => "delivered",
            Self::Returned => "returned",
            Self::Canceled => "canceled",
        }
    }
}

impl core::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "in_progress" => Ok(Self::InProgress),
            "pick_up" => Ok(Self::PickUp),
            "on_the_way" => Ok(Self::OnTheWay),
            "delivered" => Ok(Self::Delivered),
            "returned" => Ok(Self::Returned),
            "canceled" => Ok(Self::Canceled),
            other => Err(DomainError::unknown_status(other)),
        }
    }
}

/// Payment progression: `Waiting → Unpaid/Paid`, with `Canceled` and
/// `Refunded` as alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Waiting,
    Unpaid,
    Paid,
    Refunded,
    Canceled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Unpaid => "unpaid",
            Self::Paid => "paid",
            Self::Refunded => "refunded",
            Self::Canceled => "canceled",
        }
    }
}

impl core::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "unpaid" => Ok(Self::Unpaid),
            "paid" => Ok(Self::Paid),
            "refunded" => Ok(Self::Refunded),
            "canceled" => Ok(Self::Canceled),
            other => Err(DomainError::unknown_status(other)),
        }
    }
}
