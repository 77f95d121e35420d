//! View materialization — snapshot in, ordered filtered sequence out.

use crate::{
  policy::{FilterCtx, ListArgs, Policy},
  record::Record,
  store::Snapshot,
};

/// Convert a snapshot into the list a policy presents: flatten, filter, then
/// sort.
///
/// Sort keys are applied in reverse precedence with a stable sort — the
/// least-dominant key first, the primary key last — so records equal under
/// the primary key keep their secondary ordering. An empty snapshot or an
/// empty survivor set yields an empty `Vec`, never an error.
pub fn materialize(
  snapshot: Snapshot,
  policy: &Policy,
  args: &ListArgs,
  ctx: &FilterCtx,
) -> Vec<Record> {
  let mut records: Vec<Record> = snapshot
    .into_values()
    .filter(|record| policy.filter.matches(record, args, ctx))
    .collect();

  for key in policy.sort.iter().rev() {
    records.sort_by(|a, b| key.compare(a, b));
  }

  records
}
