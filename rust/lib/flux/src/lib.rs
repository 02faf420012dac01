//! Flux: path-addressed view state with pub/sub and request routing.
//!
//! Rust owns the state and the logic; a renderer only reads paths and
//! emits requests.
//!
//! - `get(path)`: read state at a path (Arc, no copy)
//! - `emit(path, payload)`: run every handler whose pattern matches
//! - `subscribe(pattern, f)`: observe `set` calls on matching paths
//!
//! Paths use `/` as separator (`gallery/state`, `admin/dashboard`).
//! Patterns accept `+` for one level and a trailing `#` for any depth.

pub mod app;
pub mod pattern;
pub mod router;
pub mod store;
pub mod value;

pub use app::Flux;
pub use pattern::Pattern;
pub use router::{BoxFuture, Router};
pub use store::{ChangeHandler, StateStore};
pub use value::{StateValue, SubscriptionId};
