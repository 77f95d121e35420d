//! Collection kinds and policy dispatch.

use strum::{Display, EnumIter, IntoStaticStr};

use crate::policy::{self, Policy};

/// The record kinds the dashboard manages. The camelCase form of the variant
/// name is the store partition name (`CollectionKind::UserInfo` lives under
/// `userInfo/`).
///
/// The `admins` partition is not a kind: it is the read-only admin set
/// consumed by the session pipeline, and its root value is a sequence rather
/// than a key→record map.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum CollectionKind {
  UserInfo,
  Products,
  Carts,
  Orders,
  Blogs,
  Anniversary,
  Schedule,
  Message,
  Notification,
  Users,
}

impl CollectionKind {
  /// The store partition this kind lives under.
  pub fn name(self) -> &'static str { self.into() }

  /// The access policy for this kind.
  pub fn policy(self) -> &'static Policy {
    match self {
      Self::UserInfo => &policy::USER_INFO,
      Self::Products => &policy::PRODUCTS,
      Self::Carts => &policy::CARTS,
      Self::Orders => &policy::ORDERS,
      Self::Blogs => &policy::BLOGS,
      Self::Anniversary => &policy::ANNIVERSARY,
      Self::Schedule => &policy::SCHEDULE,
      Self::Message => &policy::MESSAGE,
      Self::Notification => &policy::NOTIFICATION,
      Self::Users => &policy::USERS,
    }
  }
}
