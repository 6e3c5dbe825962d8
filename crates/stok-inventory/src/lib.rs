//! # stok-inventory
//!
//! The view reconciliation cycle: acquire credential → call remote API →
//! normalize response → replace local view state → surface errors, and
//! the mutate → refetch loop layered on top of it.
//!
//! Each data screen owns a [`state::ViewState`] updated only through
//! [`state::reduce`], plus the pure normalization and derived-view
//! computations for its record kind. Nothing here caches across fetches:
//! the local copy is transient and fully replaced per fetch, and derived
//! values (filters, aggregates) are recomputed from current state on
//! every render.

pub mod licenses;
pub mod peripherals;
pub mod screen;
pub mod state;

pub use screen::{LicenseScreen, PeripheralScreen};
pub use state::{Phase, ViewAction, ViewState, reduce};
