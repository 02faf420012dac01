//! Typed document collections over a `KVStore`, with live queries.
//!
//! - `Collection<T>`: get/list/create/update/delete plus batched writes.
//! - `Query<T>`: filter, order and limit applied to a collection snapshot.
//! - `Collection::watch`: callback on the initial snapshot and every change.
//! - `Collection::subscribe`: the same as a `(Subscription, stream)` pair.
//!
//! Every write to a collection re-runs the queries watching it and delivers
//! full snapshots, in write order, on the writing thread.

pub mod collection;
pub mod document;
pub mod feed;
pub mod live;
pub mod query;

pub use collection::{Collection, DocumentStore};
pub use document::Document;
pub use feed::Subscription;
pub use live::LiveQuery;
pub use query::Query;
