//! Commands queued from the UI thread to the backend worker.

use client_core::FetchTicket;
use shared::{
    domain::{
        ContactId, ContactSort, ContactStatus, NoFilter, OrderId, OrderSort, OrderStatus,
        PackageId, PackageSort,
    },
    protocol::{CreateContactRequest, CreateOrderRequest, CreatePackageRequest},
};

pub enum BackendCommand {
    Login {
        email: String,
        password: String,
    },
    Logout,
    LoadCatalog(FetchTicket<PackageSort, NoFilter>),
    /// Package typeahead in the booking form; same public endpoint as the
    /// catalog but its own slot, so narrowing a pick never cancels the
    /// catalog view.
    LoadPicker(FetchTicket<PackageSort, NoFilter>),
    LoadPackages(FetchTicket<PackageSort, NoFilter>),
    LoadOrders(FetchTicket<OrderSort, OrderStatus>),
    LoadContacts(FetchTicket<ContactSort, ContactStatus>),
    /// `id` absent means create, present means update.
    SavePackage {
        id: Option<PackageId>,
        request: CreatePackageRequest,
    },
    DeletePackage {
        id: PackageId,
    },
    SetOrderStatus {
        id: OrderId,
        status: OrderStatus,
    },
    SetContactStatus {
        id: ContactId,
        status: ContactStatus,
    },
    SubmitBooking(CreateOrderRequest),
    SubmitContact(CreateContactRequest),
    CheckOrderByCode {
        code: String,
    },
    CheckOrdersByEmail {
        email: String,
    },
    LoadDashboard,
    ExportOrdersCsv,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Login { .. } => "login",
            BackendCommand::Logout => "logout",
            BackendCommand::LoadCatalog(_) => "load_catalog",
            BackendCommand::LoadPicker(_) => "load_picker",
            BackendCommand::LoadPackages(_) => "load_packages",
            BackendCommand::LoadOrders(_) => "load_orders",
            BackendCommand::LoadContacts(_) => "load_contacts",
            BackendCommand::SavePackage { .. } => "save_package",
            BackendCommand::DeletePackage { .. } => "delete_package",
            BackendCommand::SetOrderStatus { .. } => "set_order_status",
            BackendCommand::SetContactStatus { .. } => "set_contact_status",
            BackendCommand::SubmitBooking(_) => "submit_booking",
            BackendCommand::SubmitContact(_) => "submit_contact",
            BackendCommand::CheckOrderByCode { .. } => "check_order_by_code",
            BackendCommand::CheckOrdersByEmail { .. } => "check_orders_by_email",
            BackendCommand::LoadDashboard => "load_dashboard",
            BackendCommand::ExportOrdersCsv => "export_orders_csv",
        }
    }
}
