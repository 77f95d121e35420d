//! Accessor and ledger tests against the in-memory backend.

use std::sync::Arc;

use serde_json::json;
use strum::IntoEnumIterator;
use till_core::{
  Error, Record,
  kind::CollectionKind,
  policy::{KeyRule, ListArgs, ORDER_PLACED},
  store::RecordStore,
};
use till_store_mem::MemStore;

use crate::{Dashboard, DashboardConfig};

fn record(value: serde_json::Value) -> Record {
  Record::from_value(value).expect("object")
}

fn dashboard() -> (Arc<MemStore>, Dashboard<MemStore>) {
  let store = Arc::new(MemStore::new());
  let dashboard = Dashboard::new(
    Arc::clone(&store),
    DashboardConfig { admin_address: Some("admin@example.com".into()) },
  );
  (store, dashboard)
}

// ─── Insert defaults ─────────────────────────────────────────────────────────

#[tokio::test]
async fn policy_defaults_win_over_caller_input() {
  let (_, dash) = dashboard();
  let accounts = dash.user_info();

  let key = accounts
    .insert(record(json!({
      "uid": "u1",
      "email": "u1@example.com",
      "displayName": "Yuna",
      "status": "banned",
      "role": "Root"
    })))
    .await
    .unwrap();
  assert_eq!(key, "u1");

  let stored = accounts.get("u1").await.unwrap().unwrap();
  assert_eq!(stored.str_field("status"), Some("active"));
  assert_eq!(stored.str_field("role"), Some("User"));
  assert_eq!(stored.get("isVerified"), Some(&json!(false)));
  assert!(!stored.str_field("registeredAt").unwrap().is_empty());
  // Caller fields outside the defaulted names survive.
  assert_eq!(stored.str_field("displayName"), Some("Yuna"));
}

#[tokio::test]
async fn blog_counters_start_at_zero() {
  let (_, dash) = dashboard();
  let key = dash
    .blogs()
    .insert(record(json!({ "title": "Hello", "author": "Yuna", "view": 99 })))
    .await
    .unwrap();

  let stored = dash.blogs().get(&key).await.unwrap().unwrap();
  for counter in ["view", "favorite", "comment", "share"] {
    assert_eq!(stored.get(counter), Some(&json!(0)), "{counter}");
  }
  assert!(!stored.str_field("createdAt").unwrap().is_empty());
}

#[tokio::test]
async fn product_insert_stamps_but_injects_no_defaults() {
  let (_, dash) = dashboard();
  let key = dash
    .products()
    .insert(record(json!({ "name": "Lamp", "price": 42 })))
    .await
    .unwrap();

  let stored = dash.products().get(&key).await.unwrap().unwrap();
  assert_eq!(stored.str_field("id"), Some(key.as_str()));
  assert!(!stored.str_field("releasedAt").unwrap().is_empty());
  assert!(!stored.contains("status"));
}

#[tokio::test]
async fn cart_reuses_caller_key_and_stays_unstamped() {
  let (_, dash) = dashboard();
  let key = dash
    .carts()
    .insert(record(json!({ "id": "u1", "items": [{ "id": "p1", "count": 2 }] })))
    .await
    .unwrap();
  assert_eq!(key, "u1");

  let stored = dash.carts().get("u1").await.unwrap().unwrap();
  assert!(!stored.contains("createdAt"));

  let missing = dash.carts().insert(record(json!({ "items": [] }))).await;
  assert!(matches!(missing, Err(Error::MissingKey { field: "id", .. })));
}

#[tokio::test]
async fn insert_then_get_applies_defaults_for_every_kind() {
  let (_, dash) = dashboard();

  for kind in CollectionKind::iter() {
    let policy = kind.policy();
    let mut seed = record(json!({ "email": "me@example.com" }));
    if policy.key_rule == KeyRule::CallerProvided {
      seed.set(policy.key_field, "k1");
    }
    // Conflicting caller input for every defaulted field must be discarded.
    for (field, _) in policy.defaults {
      seed.set(field, "CONFLICT");
    }

    let accessor = dash.collection(kind);
    let key = accessor.insert(seed).await.unwrap();
    let stored = accessor.get(&key).await.unwrap().unwrap();

    assert_eq!(stored.str_field(policy.key_field), Some(key.as_str()), "{kind}");
    for (field, default) in policy.defaults {
      assert_eq!(stored.get(field), Some(&default.to_value()), "{kind}.{field}");
    }
    if let Some(stamp) = policy.stamp_field {
      assert!(!stored.str_field(stamp).unwrap().is_empty(), "{kind} stamp");
    }
  }
}

#[tokio::test]
async fn generated_keys_are_distinct() {
  let (_, dash) = dashboard();
  let first = dash.products().insert(record(json!({ "name": "A" }))).await.unwrap();
  let second = dash.products().insert(record(json!({ "name": "B" }))).await.unwrap();
  assert_ne!(first, second);
}

// ─── Order flow ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn order_insert_returns_key_for_payment() {
  let (_, dash) = dashboard();
  let orders = dash.orders();

  let oid = orders
    .insert(record(json!({ "uid": "u1", "items": [{ "id": "p1", "count": 1 }] })))
    .await
    .unwrap();

  let stored = orders.get(&oid).await.unwrap().unwrap();
  assert_eq!(stored.str_field("status"), Some(ORDER_PLACED));
  assert!(!stored.str_field("orderedAt").unwrap().is_empty());

  let mine = orders.list(&ListArgs::owner("u1")).await.unwrap();
  assert!(mine.iter().any(|r| r.str_field("oid") == Some(oid.as_str())));

  let theirs = orders.list(&ListArgs::owner("u2")).await.unwrap();
  assert!(theirs.iter().all(|r| r.str_field("oid") != Some(oid.as_str())));
}

#[tokio::test]
async fn orders_list_newest_first() {
  let (store, dash) = dashboard();
  for (oid, at) in [
    ("o1", "2024-03-01T10:00:00.000Z"),
    ("o2", "2024-03-03T10:00:00.000Z"),
    ("o3", "2024-03-02T10:00:00.000Z"),
  ] {
    store
      .put("orders", oid, record(json!({ "oid": oid, "orderedAt": at })))
      .await
      .unwrap();
  }

  let listed = dash.orders().list(&ListArgs::default()).await.unwrap();
  for pair in listed.windows(2) {
    assert!(
      pair[0].str_field("orderedAt") >= pair[1].str_field("orderedAt"),
      "orders out of order"
    );
  }
}

// ─── List edges ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_on_empty_collection_is_empty() {
  let (_, dash) = dashboard();
  let listed = dash.users().list(&ListArgs::default()).await.unwrap();
  assert!(listed.is_empty());
}

// ─── Update and delete ───────────────────────────────────────────────────────

#[tokio::test]
async fn update_without_key_is_rejected() {
  let (_, dash) = dashboard();
  let result = dash.products().update(record(json!({ "name": "Lamp" }))).await;
  assert!(matches!(result, Err(Error::MissingKey { field: "id", .. })));
}

#[tokio::test]
async fn update_overwrites_omitted_fields() {
  let (_, dash) = dashboard();
  let products = dash.products();
  let key = products
    .insert(record(json!({ "name": "Lamp", "price": 42, "priceSale": 30 })))
    .await
    .unwrap();

  // A partial record silently erases what it omits — full-overwrite
  // semantics, by contract.
  products
    .update(record(json!({ "id": key, "name": "Lamp", "price": 42 })))
    .await
    .unwrap();

  let stored = products.get(&key).await.unwrap().unwrap();
  assert!(!stored.contains("priceSale"));
}

#[tokio::test]
async fn delete_twice_succeeds() {
  let (_, dash) = dashboard();
  let key = dash.blogs().insert(record(json!({ "title": "T" }))).await.unwrap();

  dash.blogs().delete(&key).await.unwrap();
  dash.blogs().delete(&key).await.unwrap();
  assert!(dash.blogs().get(&key).await.unwrap().is_none());
}

// ─── Messages ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn message_insert_starts_new_and_stamped() {
  let (_, dash) = dashboard();
  let mid = dash
    .messages()
    .insert(record(json!({
      "srcEmail": "you@example.com",
      "dstEmail": "me@example.com",
      "content": "hi"
    })))
    .await
    .unwrap();

  let listed = dash
    .messages()
    .list(&ListArgs::email("me@example.com"))
    .await
    .unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].str_field("mid"), Some(mid.as_str()));
  assert_eq!(listed[0].str_field("status"), Some("new"));
}

#[tokio::test]
async fn message_list_orders_status_then_recency() {
  let (store, dash) = dashboard();
  for (mid, status, at) in [
    ("m1", "replied", "2024-05-09T00:00:00.000Z"),
    ("m2", "new", "2024-05-01T00:00:00.000Z"),
    ("m3", "read", "2024-05-08T00:00:00.000Z"),
    ("m4", "new", "2024-05-07T00:00:00.000Z"),
  ] {
    store
      .put(
        "message",
        mid,
        record(json!({
          "mid": mid, "dstEmail": "me@example.com", "status": status, "sentAt": at
        })),
      )
      .await
      .unwrap();
  }

  let listed = dash
    .messages()
    .list(&ListArgs::email("me@example.com"))
    .await
    .unwrap();
  let mids: Vec<_> = listed.iter().map(|r| r.str_field("mid").unwrap()).collect();
  assert_eq!(mids, ["m4", "m2", "m3", "m1"]);
}

// ─── Notifications ───────────────────────────────────────────────────────────

#[tokio::test]
async fn unread_count_tracks_mark_all_read() {
  let (_, dash) = dashboard();
  let ledger = dash.notifications();

  for content in ["first", "second", "third"] {
    ledger
      .collection()
      .insert(record(json!({ "email": "me@example.com", "content": content })))
      .await
      .unwrap();
  }
  ledger
    .collection()
    .insert(record(json!({ "email": "you@example.com", "content": "other" })))
    .await
    .unwrap();

  assert_eq!(ledger.count_unread("me@example.com").await.unwrap(), 3);

  let unread = ledger.list("me@example.com").await.unwrap();
  let outcomes = ledger.mark_all_read(unread).await;
  assert_eq!(outcomes.len(), 3);
  assert!(outcomes.iter().all(|o| o.result.is_ok()));

  assert_eq!(ledger.count_unread("me@example.com").await.unwrap(), 0);
  // The other recipient's notification is untouched.
  assert_eq!(ledger.count_unread("you@example.com").await.unwrap(), 1);
}

#[tokio::test]
async fn count_unread_on_empty_collection_is_zero() {
  let (_, dash) = dashboard();
  assert_eq!(dash.notifications().count_unread("me@example.com").await.unwrap(), 0);
}

#[tokio::test]
async fn mark_all_read_reports_failures_per_record() {
  let (store, dash) = dashboard();
  let ledger = dash.notifications();

  let mut keys = Vec::new();
  for content in ["a", "b", "c"] {
    keys.push(
      ledger
        .collection()
        .insert(record(json!({ "email": "me@example.com", "content": content })))
        .await
        .unwrap(),
    );
  }

  let unread = ledger.list("me@example.com").await.unwrap();
  let victim = unread[1].str_field("nid").unwrap().to_owned();
  store.fail_put("notification", &victim);

  let outcomes = ledger.mark_all_read(unread).await;
  assert_eq!(outcomes.len(), 3);

  let failed: Vec<_> = outcomes
    .iter()
    .filter(|o| o.result.is_err())
    .map(|o| o.key.as_str())
    .collect();
  assert_eq!(failed, [victim.as_str()]);

  // The failed record is still unread; the other writes landed anyway.
  assert_eq!(ledger.count_unread("me@example.com").await.unwrap(), 1);
}

// ─── Anniversary ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn anniversary_merges_admin_calendar_with_own() {
  let (store, dash) = dashboard();
  for (id, email, name) in [
    ("a1", "admin@example.com", "Foundation day"),
    ("a2", "me@example.com", "First contract"),
    ("a3", "you@example.com", "Private"),
  ] {
    store
      .put(
        "anniversary",
        id,
        record(json!({
          "id": id, "adate": "2024-01-01", "email": email,
          "aname": name, "isHoliday": false
        })),
      )
      .await
      .unwrap();
  }

  let listed = dash
    .anniversary()
    .list(&ListArgs::day("2024-01-01", "me@example.com"))
    .await
    .unwrap();
  let ids: Vec<_> = listed.iter().map(|r| r.str_field("id").unwrap()).collect();
  assert_eq!(ids, ["a1", "a2"]);
}

// ─── Kind dispatch ───────────────────────────────────────────────────────────

#[tokio::test]
async fn accessors_address_their_own_partition() {
  let (store, dash) = dashboard();
  dash
    .schedule()
    .insert(record(json!({
      "email": "me@example.com", "sdate": "2024-06-10",
      "startTime": "09:00", "endTime": "10:00", "content": "standup"
    })))
    .await
    .unwrap();

  assert_eq!(store.get_all("schedule").await.unwrap().len(), 1);
  assert!(store.get_all("anniversary").await.unwrap().is_empty());
  assert_eq!(dash.collection(CollectionKind::Schedule).kind(), CollectionKind::Schedule);
}
