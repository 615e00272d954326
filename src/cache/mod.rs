//! Per-project artifact cache
//!
//! Each project gets a deterministic cache root derived from its path,
//! holding three subdirectories:
//!
//! | Directory    | Contents                                    |
//! |--------------|---------------------------------------------|
//! | `downloaded` | connector and project archives, by identifier |
//! | `extracted`  | unpacked connector directories               |
//! | `drivers`    | staged driver jars pending repository install |
//!
//! The root persists across invocations and is never implicitly deleted;
//! only `downloaded/` is reconciled against the declared dependency set.

pub mod layout;
pub mod sync;

pub use layout::CacheLayout;
pub use sync::reconcile;
