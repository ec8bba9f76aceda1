//! Events pushed from the backend worker to the UI thread. List results
//! carry their [`FetchTicket`] so the owning controller can discard stale
//! responses.

use std::path::PathBuf;

use client_core::{ClientError, FetchTicket, OrderStatusView};
use shared::{
    domain::{
        ContactId, ContactSort, ContactStatus, NoFilter, OrderId, OrderSort, OrderStatus,
        PackageId, PackageSort,
    },
    protocol::{
        ContactRecord, OrderRecord, OrderSummary, PackageRecord, PageEnvelope, RevenueSummary,
        SessionUser, TopPackage,
    },
};

#[derive(Debug, Clone)]
pub struct DashboardData {
    pub summary: OrderSummary,
    pub revenue: RevenueSummary,
    pub top_packages: Vec<TopPackage>,
}

pub enum UiEvent {
    WorkerFailed(String),
    LoggedIn(SessionUser),
    LoginFailed(String),
    /// Explicit logout or a 401 that cleared the session.
    SessionEnded,
    CatalogPage {
        ticket: FetchTicket<PackageSort, NoFilter>,
        outcome: Result<PageEnvelope<PackageRecord>, ClientError>,
    },
    PickerPage {
        ticket: FetchTicket<PackageSort, NoFilter>,
        outcome: Result<PageEnvelope<PackageRecord>, ClientError>,
    },
    PackagesPage {
        ticket: FetchTicket<PackageSort, NoFilter>,
        outcome: Result<PageEnvelope<PackageRecord>, ClientError>,
    },
    OrdersPage {
        ticket: FetchTicket<OrderSort, OrderStatus>,
        outcome: Result<PageEnvelope<OrderRecord>, ClientError>,
    },
    ContactsPage {
        ticket: FetchTicket<ContactSort, ContactStatus>,
        outcome: Result<PageEnvelope<ContactRecord>, ClientError>,
    },
    PackageSaved {
        created: bool,
        result: Result<PackageRecord, ClientError>,
    },
    PackageDeleted {
        id: PackageId,
        result: Result<(), ClientError>,
    },
    OrderStatusUpdated {
        id: OrderId,
        result: Result<(), ClientError>,
    },
    ContactStatusUpdated {
        id: ContactId,
        result: Result<(), ClientError>,
    },
    BookingSubmitted(Result<OrderRecord, ClientError>),
    ContactSubmitted(Result<ContactRecord, ClientError>),
    OrderChecked(Result<Option<OrderStatusView>, ClientError>),
    OrdersByEmailChecked(Result<Vec<OrderStatusView>, ClientError>),
    DashboardLoaded(Result<DashboardData, ClientError>),
    CsvExported(Result<PathBuf, String>),
}
