//! Collection access for the till dashboard.
//!
//! One generic [`Collection`] accessor serves every record kind; the
//! kind-specific behaviour (key derivation, insert defaults, list ordering
//! and filtering) comes from the kind's static policy in `till-core`. The
//! [`Dashboard`] facade bundles an accessor per kind over one shared store
//! handle, and [`NotificationLedger`] layers the unread-count query and the
//! bulk mark-as-read transition on top of the notification accessor.
//!
//! The backing store is injected at construction — nothing in this crate
//! reaches a global store handle.

mod accessor;
mod dashboard;
mod ledger;

#[cfg(test)]
mod tests;

pub use accessor::Collection;
pub use dashboard::{Dashboard, DashboardConfig};
pub use ledger::{NotificationLedger, WriteOutcome};
