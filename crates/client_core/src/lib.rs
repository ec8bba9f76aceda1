//! Client-side core for the wedding organizer site and back office.
//!
//! The reusable piece is the remote list view controller: debounced
//! search/sort/filter/paginate state ([`ListController`]) over a paged REST
//! endpoint ([`PagedQueryClient`]), guarded against out-of-order responses,
//! plus a mutation-and-reload bridge ([`MutationBridge`]) for single-item
//! writes. One instance per managed entity replaces the per-screen
//! duplication the pattern grew out of.

use shared::{
    domain::{ContactSort, ContactStatus, NoFilter, OrderSort, OrderStatus, PackageSort},
    protocol::{ContactRecord, OrderRecord, PackageRecord},
};

pub mod controller;
pub mod debounce;
pub mod endpoints;
pub mod error;
pub mod forms;
pub mod lookup;
pub mod mutation;
pub mod paged;
pub mod reports;
pub mod session;
pub mod transport;

pub use controller::{FetchTicket, ListController, LoadPhase};
pub use debounce::{Debouncer, QUIET_PERIOD};
pub use error::ClientError;
pub use lookup::OrderStatusView;
pub use mutation::{MutationBridge, MutationOutcome, Notice, NoticeKind};
pub use paged::{ListQuery, PageFetcher, PagedQueryClient, DEFAULT_LIMIT, LIMIT_CHOICES};
pub use session::{SessionContext, SessionEvent};
pub use transport::{ApiTransport, CsvDownload, DEFAULT_BASE_URL};

/// Catalog screens (public and admin) paginate packages without a status
/// filter column.
pub type PackageListController = ListController<PackageRecord, PackageSort, NoFilter>;
pub type OrderListController = ListController<OrderRecord, OrderSort, OrderStatus>;
pub type ContactListController = ListController<ContactRecord, ContactSort, ContactStatus>;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
