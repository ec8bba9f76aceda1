//! Backend worker: a dedicated thread with its own tokio runtime, consuming
//! [`BackendCommand`]s and pushing [`UiEvent`]s back to the UI thread.

use std::{collections::HashMap, thread};

use client_core::{ApiTransport, SessionContext, SessionEvent};
use crossbeam_channel::{Receiver, Sender};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::{
    backend_bridge::commands::BackendCommand,
    config::Settings,
    controller::events::{DashboardData, UiEvent},
};

/// One slot per list view. Issuing a new fetch for a slot aborts the
/// previous in-flight one; the controller's ticket check catches anything
/// that still slips through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ListSlot {
    Catalog,
    Picker,
    Packages,
    Orders,
    Contacts,
}

fn replace_task(tasks: &mut HashMap<ListSlot, JoinHandle<()>>, slot: ListSlot, task: JoinHandle<()>) {
    if let Some(previous) = tasks.insert(slot, task) {
        previous.abort();
    }
}

pub fn spawn_backend_thread(
    settings: Settings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!(%err, "failed to build backend runtime");
                let _ = ui_tx.try_send(UiEvent::WorkerFailed(format!(
                    "Gagal menyiapkan proses latar belakang: {err}"
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let session = SessionContext::new();
            let transport = ApiTransport::new(&settings.api_url, session.clone());
            info!(api_url = %settings.api_url, "backend worker ready");

            // Forced logouts (e.g. a 401 mid-request) reach the UI through
            // the session broadcast, not through a command round-trip.
            {
                let mut events = session.subscribe();
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    while let Ok(event) = events.recv().await {
                        if let SessionEvent::LoggedOut = event {
                            let _ = ui_tx.try_send(UiEvent::SessionEnded);
                        }
                    }
                });
            }

            let mut list_tasks: HashMap<ListSlot, JoinHandle<()>> = HashMap::new();

            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "processing backend command");
                match cmd {
                    BackendCommand::Login { email, password } => {
                        let event = match transport.login(&email, &password).await {
                            Ok(user) => UiEvent::LoggedIn(user),
                            Err(err) => UiEvent::LoginFailed(
                                err.human_message("Email atau kata sandi salah."),
                            ),
                        };
                        let _ = ui_tx.try_send(event);
                    }
                    BackendCommand::Logout => {
                        transport.logout();
                    }
                    BackendCommand::LoadCatalog(ticket) => {
                        let client = transport.public_packages();
                        let ui_tx = ui_tx.clone();
                        let task = tokio::spawn(async move {
                            let outcome = client.fetch(&ticket.query).await;
                            let _ = ui_tx.try_send(UiEvent::CatalogPage { ticket, outcome });
                        });
                        replace_task(&mut list_tasks, ListSlot::Catalog, task);
                    }
                    BackendCommand::LoadPicker(ticket) => {
                        let client = transport.public_packages();
                        let ui_tx = ui_tx.clone();
                        let task = tokio::spawn(async move {
                            let outcome = client.fetch(&ticket.query).await;
                            let _ = ui_tx.try_send(UiEvent::PickerPage { ticket, outcome });
                        });
                        replace_task(&mut list_tasks, ListSlot::Picker, task);
                    }
                    BackendCommand::LoadPackages(ticket) => {
                        let client = transport.admin_packages();
                        let ui_tx = ui_tx.clone();
                        let task = tokio::spawn(async move {
                            let outcome = client.fetch(&ticket.query).await;
                            let _ = ui_tx.try_send(UiEvent::PackagesPage { ticket, outcome });
                        });
                        replace_task(&mut list_tasks, ListSlot::Packages, task);
                    }
                    BackendCommand::LoadOrders(ticket) => {
                        let client = transport.orders();
                        let ui_tx = ui_tx.clone();
                        let task = tokio::spawn(async move {
                            let outcome = client.fetch(&ticket.query).await;
                            let _ = ui_tx.try_send(UiEvent::OrdersPage { ticket, outcome });
                        });
                        replace_task(&mut list_tasks, ListSlot::Orders, task);
                    }
                    BackendCommand::LoadContacts(ticket) => {
                        let client = transport.contacts();
                        let ui_tx = ui_tx.clone();
                        let task = tokio::spawn(async move {
                            let outcome = client.fetch(&ticket.query).await;
                            let _ = ui_tx.try_send(UiEvent::ContactsPage { ticket, outcome });
                        });
                        replace_task(&mut list_tasks, ListSlot::Contacts, task);
                    }
                    BackendCommand::SavePackage { id, request } => {
                        let result = match &id {
                            Some(id) => transport.update_package(id, &request).await,
                            None => transport.create_package(&request).await,
                        };
                        let _ = ui_tx.try_send(UiEvent::PackageSaved {
                            created: id.is_none(),
                            result,
                        });
                    }
                    BackendCommand::DeletePackage { id } => {
                        let result = transport.delete_package(&id).await;
                        let _ = ui_tx.try_send(UiEvent::PackageDeleted { id, result });
                    }
                    BackendCommand::SetOrderStatus { id, status } => {
                        let result = transport.set_order_status(&id, status).await;
                        let _ = ui_tx.try_send(UiEvent::OrderStatusUpdated { id, result });
                    }
                    BackendCommand::SetContactStatus { id, status } => {
                        let result = transport.set_contact_status(&id, status).await;
                        let _ = ui_tx.try_send(UiEvent::ContactStatusUpdated { id, result });
                    }
                    BackendCommand::SubmitBooking(request) => {
                        let result = transport.create_order(&request).await;
                        let _ = ui_tx.try_send(UiEvent::BookingSubmitted(result));
                    }
                    BackendCommand::SubmitContact(request) => {
                        let result = transport.create_contact(&request).await;
                        let _ = ui_tx.try_send(UiEvent::ContactSubmitted(result));
                    }
                    BackendCommand::CheckOrderByCode { code } => {
                        let result = transport.check_order_by_code(&code).await;
                        let _ = ui_tx.try_send(UiEvent::OrderChecked(result));
                    }
                    BackendCommand::CheckOrdersByEmail { email } => {
                        let result = transport.check_orders_by_email(&email).await;
                        let _ = ui_tx.try_send(UiEvent::OrdersByEmailChecked(result));
                    }
                    BackendCommand::LoadDashboard => {
                        let result = async {
                            let summary = transport.order_summary().await?;
                            let revenue = transport.revenue_summary().await?;
                            let top_packages = transport.top_packages(3).await?;
                            Ok(DashboardData {
                                summary,
                                revenue,
                                top_packages,
                            })
                        }
                        .await;
                        let _ = ui_tx.try_send(UiEvent::DashboardLoaded(result));
                    }
                    BackendCommand::ExportOrdersCsv => {
                        let result = match transport.export_orders_csv().await {
                            Ok(download) => {
                                let path = settings.export_dir.join(&download.filename);
                                match std::fs::write(&path, &download.bytes) {
                                    Ok(()) => Ok(path),
                                    Err(err) => {
                                        Err(format!("Gagal menyimpan berkas laporan: {err}"))
                                    }
                                }
                            }
                            Err(err) => Err(err.human_message("Gagal mengunduh laporan.")),
                        };
                        let _ = ui_tx.try_send(UiEvent::CsvExported(result));
                    }
                }
            }
        });
    });
}
