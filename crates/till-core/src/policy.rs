//! Per-collection access policies.
//!
//! Each collection kind carries one static [`Policy`] describing how its keys
//! are derived, which defaults are injected at insert, and how a snapshot is
//! filtered and ordered into a list. The accessor and the materializer are
//! generic; everything kind-specific lives in the table at the bottom of this
//! module.

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::record::Record;

// ─── Status vocabulary ───────────────────────────────────────────────────────

/// Initial status for messages and notifications.
pub const STATUS_NEW: &str = "new";
/// A message or notification the recipient has opened.
pub const STATUS_READ: &str = "read";
/// A message the recipient has answered.
pub const STATUS_REPLIED: &str = "replied";
/// Initial order status. The storefront's original label is kept verbatim;
/// downstream order screens match on it.
pub const ORDER_PLACED: &str = "주문완료";

// ─── Stamping ────────────────────────────────────────────────────────────────

/// A fresh creation stamp: ISO-8601 UTC with milliseconds and a `Z` suffix
/// (`2024-01-02T03:04:05.678Z`). The format is fixed-width, so lexicographic
/// order on stamps equals chronological order.
pub fn creation_stamp() -> String {
  Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ─── Key derivation ──────────────────────────────────────────────────────────

/// How a collection's key is obtained at insert time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRule {
  /// A random v4 UUID, generated by the accessor.
  Generated,
  /// The caller supplies the key in the record's key field — account-shaped
  /// collections reuse the identity's own key.
  CallerProvided,
}

// ─── Defaults ────────────────────────────────────────────────────────────────

/// A default field value injected at insert. Defaults win over caller input
/// for the same field name.
#[derive(Debug, Clone, Copy)]
pub enum DefaultValue {
  Str(&'static str),
  Int(i64),
  Bool(bool),
}

impl DefaultValue {
  pub fn to_value(self) -> Value {
    match self {
      Self::Str(s) => Value::from(s),
      Self::Int(n) => Value::from(n),
      Self::Bool(b) => Value::from(b),
    }
  }
}

// ─── Ordering ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Asc,
  Desc,
}

/// One sort key. Comparison is string-lexicographic: sortable fields are
/// fixed-format ISO-8601 stamps, zero-padded `HH:MM` times, or status words,
/// so lexicographic order is the intended order. A record missing the field
/// compares as the empty string.
#[derive(Debug, Clone, Copy)]
pub struct SortKey {
  pub field:     &'static str,
  pub direction: Direction,
}

impl SortKey {
  pub fn compare(&self, a: &Record, b: &Record) -> std::cmp::Ordering {
    let left = a.str_field(self.field).unwrap_or("");
    let right = b.str_field(self.field).unwrap_or("");
    match self.direction {
      Direction::Asc => left.cmp(right),
      Direction::Desc => right.cmp(left),
    }
  }
}

// ─── Filtering ───────────────────────────────────────────────────────────────

/// Caller-supplied filter parameters for [`crate::materialize::materialize`].
/// Which fields a given collection consults is part of its policy; unused
/// fields are ignored.
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
  /// Owner identity key (orders).
  pub uid:   Option<String>,
  /// Calendar date, `YYYY-MM-DD` (anniversary, schedule).
  pub date:  Option<String>,
  /// Identity email (anniversary, schedule, message, notification).
  pub email: Option<String>,
}

impl ListArgs {
  pub fn owner(uid: impl Into<String>) -> Self {
    Self { uid: Some(uid.into()), ..Self::default() }
  }

  pub fn email(email: impl Into<String>) -> Self {
    Self { email: Some(email.into()), ..Self::default() }
  }

  pub fn day(date: impl Into<String>, email: impl Into<String>) -> Self {
    Self {
      uid:   None,
      date:  Some(date.into()),
      email: Some(email.into()),
    }
  }
}

/// Deployment-level context consulted by filter rules. Injected at accessor
/// construction, never read from ambient globals.
#[derive(Debug, Clone, Default)]
pub struct FilterCtx {
  /// The admin-designated address whose anniversary entries (holidays and
  /// the like) every identity sees alongside its own.
  pub admin_address: Option<String>,
}

/// The filter predicate for one collection. All predicates are conjunctive
/// equality tests; the single disjunct is the anniversary admin-or-self
/// clause. A rule that requires an argument matches nothing when the caller
/// omits it.
#[derive(Debug, Clone, Copy)]
pub enum FilterRule {
  /// Every record survives.
  None,
  /// Owner equality, applied only when the caller passes an owner.
  OwnerOptional { field: &'static str },
  /// Date must match, and the entry must belong to the caller or to the
  /// admin-designated address.
  DateAndOwnerOrAdmin {
    date_field:  &'static str,
    email_field: &'static str,
  },
  /// Date and email must both match.
  DateAndEmail {
    date_field:  &'static str,
    email_field: &'static str,
  },
  /// Recipient email must match.
  Recipient { field: &'static str },
  /// Email must match and the record must still be in `status`.
  EmailAndStatus {
    email_field:  &'static str,
    status_field: &'static str,
    status:       &'static str,
  },
}

impl FilterRule {
  pub fn matches(&self, record: &Record, args: &ListArgs, ctx: &FilterCtx) -> bool {
    match *self {
      Self::None => true,

      Self::OwnerOptional { field } => match args.uid.as_deref() {
        Some(uid) => record.str_field(field) == Some(uid),
        None => true,
      },

      Self::DateAndOwnerOrAdmin { date_field, email_field } => {
        let Some(date) = args.date.as_deref() else { return false };
        if record.str_field(date_field) != Some(date) {
          return false;
        }
        let email = record.str_field(email_field);
        let admin_entry = ctx
          .admin_address
          .as_deref()
          .is_some_and(|admin| email == Some(admin));
        let own_entry = args
          .email
          .as_deref()
          .is_some_and(|caller| email == Some(caller));
        admin_entry || own_entry
      }

      Self::DateAndEmail { date_field, email_field } => {
        let (Some(date), Some(email)) = (args.date.as_deref(), args.email.as_deref())
        else {
          return false;
        };
        record.str_field(date_field) == Some(date)
          && record.str_field(email_field) == Some(email)
      }

      Self::Recipient { field } => {
        let Some(email) = args.email.as_deref() else { return false };
        record.str_field(field) == Some(email)
      }

      Self::EmailAndStatus { email_field, status_field, status } => {
        let Some(email) = args.email.as_deref() else { return false };
        record.str_field(email_field) == Some(email)
          && record.str_field(status_field) == Some(status)
      }
    }
  }
}

// ─── Policy ──────────────────────────────────────────────────────────────────

/// The full rule set for one collection kind.
#[derive(Debug, Clone, Copy)]
pub struct Policy {
  /// Name of the record's key field; its value is the storage path segment.
  pub key_field:   &'static str,
  pub key_rule:    KeyRule,
  /// Field stamped with [`creation_stamp`] at insert, never mutated after.
  pub stamp_field: Option<&'static str>,
  /// Fields injected at insert. Defaults override caller input.
  pub defaults:    &'static [(&'static str, DefaultValue)],
  /// Sort keys in precedence order — the first entry dominates.
  pub sort:        &'static [SortKey],
  pub filter:      FilterRule,
}

// ─── Policy table ────────────────────────────────────────────────────────────

pub(crate) static USER_INFO: Policy = Policy {
  key_field:   "uid",
  key_rule:    KeyRule::CallerProvided,
  stamp_field: Some("registeredAt"),
  defaults:    &[
    ("role", DefaultValue::Str("User")),
    ("status", DefaultValue::Str("active")),
    ("isVerified", DefaultValue::Bool(false)),
  ],
  sort:        &[SortKey { field: "registeredAt", direction: Direction::Desc }],
  filter:      FilterRule::None,
};

pub(crate) static PRODUCTS: Policy = Policy {
  key_field:   "id",
  key_rule:    KeyRule::Generated,
  stamp_field: Some("releasedAt"),
  defaults:    &[],
  sort:        &[SortKey { field: "releasedAt", direction: Direction::Desc }],
  filter:      FilterRule::None,
};

pub(crate) static CARTS: Policy = Policy {
  key_field:   "id",
  key_rule:    KeyRule::CallerProvided,
  stamp_field: None,
  defaults:    &[],
  sort:        &[],
  filter:      FilterRule::None,
};

pub(crate) static ORDERS: Policy = Policy {
  key_field:   "oid",
  key_rule:    KeyRule::Generated,
  stamp_field: Some("orderedAt"),
  defaults:    &[("status", DefaultValue::Str(ORDER_PLACED))],
  sort:        &[SortKey { field: "orderedAt", direction: Direction::Desc }],
  filter:      FilterRule::OwnerOptional { field: "uid" },
};

pub(crate) static BLOGS: Policy = Policy {
  key_field:   "id",
  key_rule:    KeyRule::Generated,
  stamp_field: Some("createdAt"),
  defaults:    &[
    ("view", DefaultValue::Int(0)),
    ("favorite", DefaultValue::Int(0)),
    ("comment", DefaultValue::Int(0)),
    ("share", DefaultValue::Int(0)),
  ],
  sort:        &[SortKey { field: "createdAt", direction: Direction::Desc }],
  filter:      FilterRule::None,
};

pub(crate) static ANNIVERSARY: Policy = Policy {
  key_field:   "id",
  key_rule:    KeyRule::Generated,
  stamp_field: None,
  defaults:    &[],
  sort:        &[],
  filter:      FilterRule::DateAndOwnerOrAdmin {
    date_field:  "adate",
    email_field: "email",
  },
};

pub(crate) static SCHEDULE: Policy = Policy {
  key_field:   "id",
  key_rule:    KeyRule::Generated,
  stamp_field: None,
  defaults:    &[],
  sort:        &[SortKey { field: "startTime", direction: Direction::Asc }],
  filter:      FilterRule::DateAndEmail {
    date_field:  "sdate",
    email_field: "email",
  },
};

pub(crate) static MESSAGE: Policy = Policy {
  key_field:   "mid",
  key_rule:    KeyRule::Generated,
  stamp_field: Some("sentAt"),
  defaults:    &[("status", DefaultValue::Str(STATUS_NEW))],
  // Status dominates: unreplied messages surface first, newest within each
  // status band.
  sort:        &[
    SortKey { field: "status", direction: Direction::Asc },
    SortKey { field: "sentAt", direction: Direction::Desc },
  ],
  filter:      FilterRule::Recipient { field: "dstEmail" },
};

pub(crate) static NOTIFICATION: Policy = Policy {
  key_field:   "nid",
  key_rule:    KeyRule::Generated,
  stamp_field: Some("createdAt"),
  defaults:    &[("status", DefaultValue::Str(STATUS_NEW))],
  sort:        &[SortKey { field: "createdAt", direction: Direction::Desc }],
  filter:      FilterRule::EmailAndStatus {
    email_field:  "email",
    status_field: "status",
    status:       STATUS_NEW,
  },
};

pub(crate) static USERS: Policy = Policy {
  key_field:   "id",
  key_rule:    KeyRule::CallerProvided,
  stamp_field: Some("registeredAt"),
  defaults:    &[
    ("status", DefaultValue::Str("active")),
    ("isVerified", DefaultValue::Bool(false)),
  ],
  sort:        &[],
  filter:      FilterRule::None,
};
