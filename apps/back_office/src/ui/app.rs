//! The egui app shell: public screens (katalog, booking, cek status,
//! kontak) and the login-gated admin dashboard.

use std::time::{Duration, Instant};

use client_core::{
    forms::{field_messages, BookingForm, ContactForm, LoginForm, PackageForm},
    ContactListController, ListController, LoadPhase, MutationBridge, Notice, NoticeKind,
    OrderListController, OrderStatusView, PackageListController, LIMIT_CHOICES,
};
use chrono::NaiveDate;
use crossbeam_channel::{Receiver, Sender};
use shared::{
    domain::{
        format_idr, ContactSort, ContactStatus, FilterParam, OrderSort, OrderStatus, PackageId,
        PackageSort, SortParam,
    },
    protocol::{PackageRecord, SessionUser},
};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::{DashboardData, UiEvent},
        orchestration::dispatch_backend_command,
    },
};

const TOAST_LIFETIME: Duration = Duration::from_secs(5);

const PACKAGE_SORTS: [PackageSort; 4] = [
    PackageSort::NameAsc,
    PackageSort::NameDesc,
    PackageSort::Cheapest,
    PackageSort::MostExpensive,
];

const ORDER_SORTS: [OrderSort; 8] = [
    OrderSort::Newest,
    OrderSort::Oldest,
    OrderSort::EventAsc,
    OrderSort::EventDesc,
    OrderSort::PriceAsc,
    OrderSort::PriceDesc,
    OrderSort::NameAsc,
    OrderSort::NameDesc,
];

const CONTACT_SORTS: [ContactSort; 6] = [
    ContactSort::Newest,
    ContactSort::Oldest,
    ContactSort::NameAsc,
    ContactSort::NameDesc,
    ContactSort::EmailAsc,
    ContactSort::EmailDesc,
];

fn package_sort_label(sort: PackageSort) -> &'static str {
    match sort {
        PackageSort::NameAsc => "Nama A-Z",
        PackageSort::NameDesc => "Nama Z-A",
        PackageSort::Cheapest => "Termurah",
        PackageSort::MostExpensive => "Termahal",
    }
}

fn order_sort_label(sort: OrderSort) -> &'static str {
    match sort {
        OrderSort::Newest => "Terbaru",
        OrderSort::Oldest => "Terlama",
        OrderSort::EventAsc => "Acara terdekat",
        OrderSort::EventDesc => "Acara terjauh",
        OrderSort::PriceAsc => "Harga terendah",
        OrderSort::PriceDesc => "Harga tertinggi",
        OrderSort::NameAsc => "Nama A-Z",
        OrderSort::NameDesc => "Nama Z-A",
    }
}

fn contact_sort_label(sort: ContactSort) -> &'static str {
    match sort {
        ContactSort::Newest => "Terbaru",
        ContactSort::Oldest => "Terlama",
        ContactSort::NameAsc => "Nama A-Z",
        ContactSort::NameDesc => "Nama Z-A",
        ContactSort::EmailAsc => "Email A-Z",
        ContactSort::EmailDesc => "Email Z-A",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Public,
    Login,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PublicTab {
    Katalog,
    Booking,
    CekStatus,
    Kontak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminTab {
    Ringkasan,
    Katalog,
    Pesanan,
    Kontak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckMode {
    ByCode,
    ByEmail,
}

/// Create-or-edit state for one package, shown in a window.
struct PackageEditor {
    id: Option<PackageId>,
    form: PackageForm,
    field_errors: Vec<(String, String)>,
    error: Option<String>,
    busy: bool,
}

impl PackageEditor {
    fn create() -> Self {
        Self {
            id: None,
            form: PackageForm::default(),
            field_errors: Vec::new(),
            error: None,
            busy: false,
        }
    }

    fn edit(record: &PackageRecord) -> Self {
        Self {
            id: Some(record.id.clone()),
            form: PackageForm::from_record(record),
            field_errors: Vec::new(),
            error: None,
            busy: false,
        }
    }
}

struct Toast {
    notice: Notice,
    shown_at: Instant,
}

enum PagerAction {
    Prev,
    Next,
    Limit(u32),
}

pub struct BackOfficeApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    screen: Screen,
    public_tab: PublicTab,
    admin_tab: AdminTab,
    session_user: Option<SessionUser>,

    status: String,
    toasts: Vec<Toast>,

    login_form: LoginForm,
    login_errors: Vec<(String, String)>,
    login_error: Option<String>,
    login_busy: bool,

    catalog: PackageListController,
    catalog_loaded: bool,
    picker: PackageListController,
    picker_loaded: bool,
    packages: PackageListController,
    packages_loaded: bool,
    orders: OrderListController,
    orders_loaded: bool,
    contacts: ContactListController,
    contacts_loaded: bool,

    mutations: MutationBridge,
    package_editor: Option<PackageEditor>,

    booking_form: BookingForm,
    booking_date_input: String,
    booking_errors: Vec<(String, String)>,
    booking_busy: bool,
    booking_code: Option<String>,

    contact_form: ContactForm,
    contact_errors: Vec<(String, String)>,
    contact_busy: bool,

    check_mode: CheckMode,
    check_input: String,
    check_busy: bool,
    check_results: Vec<OrderStatusView>,
    check_error: Option<String>,
    check_done: bool,

    dashboard: Option<DashboardData>,
    dashboard_error: Option<String>,
    dashboard_busy: bool,
    export_busy: bool,
}

impl BackOfficeApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            screen: Screen::Public,
            public_tab: PublicTab::Katalog,
            admin_tab: AdminTab::Ringkasan,
            session_user: None,
            status: String::new(),
            toasts: Vec::new(),
            login_form: LoginForm::default(),
            login_errors: Vec::new(),
            login_error: None,
            login_busy: false,
            catalog: PackageListController::new("Gagal memuat katalog paket."),
            catalog_loaded: false,
            picker: PackageListController::new("Gagal memuat pilihan paket."),
            picker_loaded: false,
            packages: PackageListController::new("Gagal memuat daftar paket."),
            packages_loaded: false,
            orders: OrderListController::new("Gagal memuat daftar pesanan."),
            orders_loaded: false,
            contacts: ContactListController::new("Gagal memuat pesan masuk."),
            contacts_loaded: false,
            mutations: MutationBridge::new(),
            package_editor: None,
            booking_form: BookingForm::default(),
            booking_date_input: String::new(),
            booking_errors: Vec::new(),
            booking_busy: false,
            booking_code: None,
            contact_form: ContactForm::default(),
            contact_errors: Vec::new(),
            contact_busy: false,
            check_mode: CheckMode::ByCode,
            check_input: String::new(),
            check_busy: false,
            check_results: Vec::new(),
            check_error: None,
            check_done: false,
            dashboard: None,
            dashboard_error: None,
            dashboard_busy: false,
            export_busy: false,
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn notify(&mut self, notice: Notice) {
        self.toasts.push(Toast {
            notice,
            shown_at: Instant::now(),
        });
    }

    fn reload_catalog(&mut self) {
        let ticket = self.catalog.begin_load();
        self.catalog_loaded = true;
        self.dispatch(BackendCommand::LoadCatalog(ticket));
    }

    fn reload_picker(&mut self) {
        let ticket = self.picker.begin_load();
        self.picker_loaded = true;
        self.dispatch(BackendCommand::LoadPicker(ticket));
    }

    fn reload_packages(&mut self) {
        let ticket = self.packages.begin_load();
        self.packages_loaded = true;
        self.dispatch(BackendCommand::LoadPackages(ticket));
    }

    fn reload_orders(&mut self) {
        let ticket = self.orders.begin_load();
        self.orders_loaded = true;
        self.dispatch(BackendCommand::LoadOrders(ticket));
    }

    fn reload_contacts(&mut self) {
        let ticket = self.contacts.begin_load();
        self.contacts_loaded = true;
        self.dispatch(BackendCommand::LoadContacts(ticket));
    }

    fn reload_dashboard(&mut self) {
        self.dashboard_busy = true;
        self.dashboard_error = None;
        self.dispatch(BackendCommand::LoadDashboard);
    }

    fn end_admin_session(&mut self) {
        self.session_user = None;
        self.screen = Screen::Login;
        self.packages.reset();
        self.packages_loaded = false;
        self.orders.reset();
        self.orders_loaded = false;
        self.contacts.reset();
        self.contacts_loaded = false;
        self.dashboard = None;
        self.dashboard_busy = false;
        self.package_editor = None;
        self.export_busy = false;
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::WorkerFailed(message) => {
                    self.status = message;
                }
                UiEvent::LoggedIn(user) => {
                    self.login_busy = false;
                    self.login_error = None;
                    self.login_form = LoginForm::default();
                    self.status = format!("Masuk sebagai {}", user.name);
                    self.session_user = Some(user);
                    self.screen = Screen::Admin;
                    self.admin_tab = AdminTab::Ringkasan;
                    self.reload_dashboard();
                }
                UiEvent::LoginFailed(message) => {
                    self.login_busy = false;
                    self.login_error = Some(message);
                }
                UiEvent::SessionEnded => {
                    if self.session_user.is_some() {
                        self.end_admin_session();
                        self.login_error =
                            Some("Sesi berakhir. Silakan masuk kembali.".to_string());
                    }
                }
                UiEvent::CatalogPage { ticket, outcome } => {
                    self.catalog.apply(&ticket, outcome);
                }
                UiEvent::PickerPage { ticket, outcome } => {
                    self.picker.apply(&ticket, outcome);
                }
                UiEvent::PackagesPage { ticket, outcome } => {
                    self.packages.apply(&ticket, outcome);
                }
                UiEvent::OrdersPage { ticket, outcome } => {
                    self.orders.apply(&ticket, outcome);
                }
                UiEvent::ContactsPage { ticket, outcome } => {
                    self.contacts.apply(&ticket, outcome);
                }
                UiEvent::PackageSaved { created, result } => {
                    if let Some(editor) = self.package_editor.as_mut() {
                        editor.busy = false;
                    }
                    match result {
                        Ok(_) => {
                            self.package_editor = None;
                            let message = if created {
                                "Paket berhasil dibuat."
                            } else {
                                "Paket berhasil diperbarui."
                            };
                            self.notify(Notice::success(message));
                            self.reload_packages();
                        }
                        Err(err) => {
                            let message = err.human_message("Gagal menyimpan paket.");
                            if let Some(editor) = self.package_editor.as_mut() {
                                editor.error = Some(message);
                            } else {
                                self.notify(Notice::error(message));
                            }
                        }
                    }
                }
                UiEvent::PackageDeleted { id, result } => {
                    let outcome = self.mutations.settle(
                        id.as_str(),
                        result,
                        "Paket berhasil dihapus.",
                        "Gagal menghapus paket.",
                    );
                    self.notify(outcome.notice);
                    if outcome.reload {
                        self.reload_packages();
                    }
                }
                UiEvent::OrderStatusUpdated { id, result } => {
                    let outcome = self.mutations.settle(
                        id.as_str(),
                        result,
                        "Status pesanan diperbarui.",
                        "Gagal memperbarui status pesanan.",
                    );
                    self.notify(outcome.notice);
                    if outcome.reload {
                        self.reload_orders();
                    }
                }
                UiEvent::ContactStatusUpdated { id, result } => {
                    let outcome = self.mutations.settle(
                        id.as_str(),
                        result,
                        "Status pesan diperbarui.",
                        "Gagal memperbarui status pesan.",
                    );
                    self.notify(outcome.notice);
                    if outcome.reload {
                        self.reload_contacts();
                    }
                }
                UiEvent::BookingSubmitted(result) => {
                    self.booking_busy = false;
                    match result {
                        Ok(order) => {
                            self.booking_code = Some(order.order_code.clone());
                            self.booking_form = BookingForm::default();
                            self.booking_date_input.clear();
                            self.notify(Notice::success(format!(
                                "Pesanan dibuat. Kode pesanan: {}",
                                order.order_code
                            )));
                        }
                        Err(err) => {
                            self.notify(Notice::error(
                                err.human_message("Gagal mengirim pesanan."),
                            ));
                        }
                    }
                }
                UiEvent::ContactSubmitted(result) => {
                    self.contact_busy = false;
                    match result {
                        Ok(_) => {
                            self.contact_form = ContactForm::default();
                            self.notify(Notice::success(
                                "Pesan terkirim. Kami akan segera menghubungi Anda.",
                            ));
                        }
                        Err(err) => {
                            self.notify(Notice::error(err.human_message("Gagal mengirim pesan.")));
                        }
                    }
                }
                UiEvent::OrderChecked(result) => {
                    self.check_busy = false;
                    self.check_done = true;
                    match result {
                        Ok(Some(view)) => {
                            self.check_results = vec![view];
                            self.check_error = None;
                        }
                        Ok(None) => {
                            self.check_results.clear();
                            self.check_error = Some("Pesanan tidak ditemukan.".to_string());
                        }
                        Err(err) => {
                            self.check_results.clear();
                            self.check_error =
                                Some(err.human_message("Gagal memeriksa status pesanan."));
                        }
                    }
                }
                UiEvent::OrdersByEmailChecked(result) => {
                    self.check_busy = false;
                    self.check_done = true;
                    match result {
                        Ok(views) if views.is_empty() => {
                            self.check_results.clear();
                            self.check_error =
                                Some("Tidak ada pesanan untuk email tersebut.".to_string());
                        }
                        Ok(views) => {
                            self.check_results = views;
                            self.check_error = None;
                        }
                        Err(err) => {
                            self.check_results.clear();
                            self.check_error =
                                Some(err.human_message("Gagal memeriksa status pesanan."));
                        }
                    }
                }
                UiEvent::DashboardLoaded(result) => {
                    self.dashboard_busy = false;
                    match result {
                        Ok(data) => {
                            self.dashboard = Some(data);
                            self.dashboard_error = None;
                        }
                        Err(err) => {
                            self.dashboard_error =
                                Some(err.human_message("Gagal memuat ringkasan."));
                        }
                    }
                }
                UiEvent::CsvExported(result) => {
                    self.export_busy = false;
                    match result {
                        Ok(path) => {
                            self.notify(Notice::success(format!(
                                "Laporan tersimpan di {}",
                                path.display()
                            )));
                        }
                        Err(message) => {
                            self.notify(Notice::error(message));
                        }
                    }
                }
            }
        }
    }

    /// Advances the debounce clocks; a committed search triggers a reload.
    fn tick_controllers(&mut self) {
        let now = Instant::now();
        if self.catalog.tick(now) {
            self.reload_catalog();
        }
        if self.picker.tick(now) {
            self.reload_picker();
        }
        if self.packages.tick(now) {
            self.reload_packages();
        }
        if self.orders.tick(now) {
            self.reload_orders();
        }
        if self.contacts.tick(now) {
            self.reload_contacts();
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Wedding Organizer");
                ui.separator();
                match self.screen {
                    Screen::Public => {
                        for (tab, label) in [
                            (PublicTab::Katalog, "Katalog"),
                            (PublicTab::Booking, "Booking"),
                            (PublicTab::CekStatus, "Cek Status"),
                            (PublicTab::Kontak, "Kontak"),
                        ] {
                            if ui
                                .selectable_label(self.public_tab == tab, label)
                                .clicked()
                            {
                                self.public_tab = tab;
                            }
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Admin").clicked() {
                                self.screen = Screen::Login;
                            }
                        });
                    }
                    Screen::Login => {
                        ui.label("Masuk Admin");
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Kembali").clicked() {
                                self.screen = Screen::Public;
                            }
                        });
                    }
                    Screen::Admin => {
                        for (tab, label) in [
                            (AdminTab::Ringkasan, "Ringkasan"),
                            (AdminTab::Katalog, "Katalog Paket"),
                            (AdminTab::Pesanan, "Pesanan"),
                            (AdminTab::Kontak, "Pesan Masuk"),
                        ] {
                            if ui.selectable_label(self.admin_tab == tab, label).clicked() {
                                self.admin_tab = tab;
                            }
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Keluar").clicked() {
                                self.dispatch(BackendCommand::Logout);
                                self.end_admin_session();
                                self.screen = Screen::Public;
                                self.login_error = None;
                            }
                            if let Some(user) = &self.session_user {
                                ui.label(user.name.clone());
                            }
                        });
                    }
                }
            });
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        self.toasts
            .retain(|toast| toast.shown_at.elapsed() < TOAST_LIFETIME);
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if !self.status.is_empty() {
                    ui.label(&self.status);
                }
                for toast in &self.toasts {
                    let color = match toast.notice.kind {
                        NoticeKind::Success => egui::Color32::from_rgb(82, 158, 92),
                        NoticeKind::Error => egui::Color32::from_rgb(196, 92, 92),
                    };
                    ui.colored_label(color, &toast.notice.message);
                }
            });
        });
    }

    fn show_login_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(48.0);
            ui.vertical_centered(|ui| {
                ui.set_width(360.0);
                ui.heading("Masuk ke Back Office");
                ui.add_space(12.0);
                if let Some(error) = &self.login_error {
                    ui.colored_label(egui::Color32::from_rgb(196, 92, 92), error);
                    ui.add_space(6.0);
                }
                ui.label("Email");
                ui.text_edit_singleline(&mut self.login_form.email);
                ui.label("Kata sandi");
                ui.add(egui::TextEdit::singleline(&mut self.login_form.password).password(true));
                for (field, message) in &self.login_errors {
                    ui.small(format!("{field}: {message}"));
                }
                ui.add_space(10.0);
                let submit = ui
                    .add_enabled(!self.login_busy, egui::Button::new("Masuk"))
                    .clicked()
                    || ui.input(|i| i.key_pressed(egui::Key::Enter));
                if self.login_busy {
                    ui.spinner();
                }
                if submit && !self.login_busy {
                    match self.login_form.clone().into_request() {
                        Ok(request) => {
                            self.login_errors.clear();
                            self.login_error = None;
                            self.login_busy = true;
                            self.dispatch(BackendCommand::Login {
                                email: request.email,
                                password: request.password,
                            });
                        }
                        Err(errors) => {
                            self.login_errors = field_messages(&errors);
                        }
                    }
                }
            });
        });
    }

    fn show_public_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| match self.public_tab {
            PublicTab::Katalog => self.show_catalog_tab(ui),
            PublicTab::Booking => self.show_booking_tab(ui),
            PublicTab::CekStatus => self.show_check_tab(ui),
            PublicTab::Kontak => self.show_contact_tab(ui),
        });
    }

    fn show_catalog_tab(&mut self, ui: &mut egui::Ui) {
        if !self.catalog_loaded {
            self.reload_catalog();
        }
        ui.heading("Katalog Paket");
        ui.add_space(6.0);

        let mut reload = false;
        ui.horizontal(|ui| {
            ui.label("Cari:");
            let mut text = self.catalog.search_input().to_string();
            if ui.text_edit_singleline(&mut text).changed() {
                self.catalog.set_search_input(text, Instant::now());
            }
            ui.label("Urutkan:");
            let mut sort = self.catalog.query().sort;
            egui::ComboBox::from_id_salt("catalog_sort")
                .selected_text(package_sort_label(sort))
                .show_ui(ui, |ui| {
                    for option in PACKAGE_SORTS {
                        ui.selectable_value(&mut sort, option, package_sort_label(option));
                    }
                });
            if self.catalog.set_sort(sort) {
                reload = true;
            }
        });
        if reload {
            self.reload_catalog();
        }

        show_list_feedback(ui, &self.catalog);
        ui.add_space(6.0);
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for package in self.catalog.items() {
                    ui.group(|ui| {
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.strong(&package.name);
                                if let Some(description) = &package.description {
                                    ui.label(description);
                                }
                            });
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    ui.strong(format_idr(package.price));
                                },
                            );
                        });
                    });
                }
            });

        if let Some(pager) = pager_ui(ui, "catalog_pager", &self.catalog) {
            let changed = match pager {
                PagerAction::Prev => self.catalog.prev(),
                PagerAction::Next => self.catalog.next(),
                PagerAction::Limit(limit) => self.catalog.set_limit(limit),
            };
            if changed {
                self.reload_catalog();
            }
        }
    }

    fn show_booking_tab(&mut self, ui: &mut egui::Ui) {
        if !self.picker_loaded {
            self.reload_picker();
        }
        ui.heading("Booking Paket Pernikahan");
        ui.add_space(6.0);
        if let Some(code) = &self.booking_code {
            ui.group(|ui| {
                ui.label("Pesanan Anda sudah kami terima.");
                ui.horizontal(|ui| {
                    ui.label("Kode pesanan:");
                    ui.strong(code);
                });
                ui.small("Simpan kode ini untuk memeriksa status pesanan.");
            });
            ui.add_space(6.0);
        }

        egui::Grid::new("booking_form")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("Nama lengkap");
                ui.text_edit_singleline(&mut self.booking_form.name);
                ui.end_row();

                ui.label("Email");
                ui.text_edit_singleline(&mut self.booking_form.email);
                ui.end_row();

                ui.label("No. HP");
                ui.text_edit_singleline(&mut self.booking_form.phone);
                ui.end_row();

                ui.label("Paket");
                self.show_package_picker(ui);
                ui.end_row();

                ui.label("Lokasi acara");
                ui.text_edit_singleline(&mut self.booking_form.venue);
                ui.end_row();

                ui.label("Tanggal acara");
                if ui
                    .add(
                        egui::TextEdit::singleline(&mut self.booking_date_input)
                            .hint_text("2026-11-21"),
                    )
                    .changed()
                {
                    self.booking_form.event_date =
                        NaiveDate::parse_from_str(self.booking_date_input.trim(), "%Y-%m-%d").ok();
                }
                ui.end_row();

                ui.label("Catatan");
                ui.text_edit_multiline(&mut self.booking_form.notes);
                ui.end_row();
            });

        for (field, message) in &self.booking_errors {
            ui.small(format!("{field}: {message}"));
        }
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.booking_busy, egui::Button::new("Kirim Pesanan"))
                .clicked()
            {
                match self.booking_form.clone().into_request() {
                    Ok(request) => {
                        self.booking_errors.clear();
                        self.booking_busy = true;
                        self.booking_code = None;
                        self.dispatch(BackendCommand::SubmitBooking(request));
                    }
                    Err(errors) => {
                        self.booking_errors = field_messages(&errors);
                    }
                }
            }
            if self.booking_busy {
                ui.spinner();
            }
        });
    }

    /// Package typeahead with its own controller: search narrows, "muat
    /// lebih banyak" appends the next page. Independent from the catalog
    /// tab, so narrowing a pick leaves that view untouched.
    fn show_package_picker(&mut self, ui: &mut egui::Ui) {
        ui.vertical(|ui| {
            let mut text = self.picker.search_input().to_string();
            if ui
                .add(egui::TextEdit::singleline(&mut text).hint_text("Cari paket"))
                .changed()
            {
                self.picker.set_search_input(text, Instant::now());
            }
            let selected_name = self
                .picker
                .items()
                .iter()
                .find(|package| package.id.as_str() == self.booking_form.package_id)
                .map(|package| package.name.clone())
                .unwrap_or_else(|| "Pilih paket".to_string());
            let mut load_more = false;
            egui::ComboBox::from_id_salt("booking_package")
                .selected_text(selected_name)
                .show_ui(ui, |ui| {
                    for package in self.picker.items() {
                        let label =
                            format!("{} - {}", package.name, format_idr(package.price));
                        ui.selectable_value(
                            &mut self.booking_form.package_id,
                            package.id.as_str().to_string(),
                            label,
                        );
                    }
                    if self.picker.meta().is_some_and(|meta| meta.has_next) {
                        load_more = ui.button("Muat lebih banyak").clicked();
                    }
                });
            if load_more {
                if let Some(ticket) = self.picker.begin_load_more() {
                    self.dispatch(BackendCommand::LoadPicker(ticket));
                }
            }
        });
    }

    fn show_check_tab(&mut self, ui: &mut egui::Ui) {
        ui.heading("Cek Status Pesanan");
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.radio_value(&mut self.check_mode, CheckMode::ByCode, "Kode pesanan");
            ui.radio_value(&mut self.check_mode, CheckMode::ByEmail, "Email");
        });
        ui.horizontal(|ui| {
            let hint = match self.check_mode {
                CheckMode::ByCode => "WO-2025-0001",
                CheckMode::ByEmail => "nama@contoh.com",
            };
            ui.add(egui::TextEdit::singleline(&mut self.check_input).hint_text(hint));
            let input_ready = !self.check_input.trim().is_empty();
            if ui
                .add_enabled(input_ready && !self.check_busy, egui::Button::new("Cek"))
                .clicked()
            {
                self.check_busy = true;
                self.check_done = false;
                let value = self.check_input.trim().to_string();
                let cmd = match self.check_mode {
                    CheckMode::ByCode => BackendCommand::CheckOrderByCode { code: value },
                    CheckMode::ByEmail => BackendCommand::CheckOrdersByEmail { email: value },
                };
                self.dispatch(cmd);
            }
            if self.check_busy {
                ui.spinner();
            }
        });

        ui.add_space(8.0);
        if let Some(error) = &self.check_error {
            ui.colored_label(egui::Color32::from_rgb(196, 92, 92), error);
        }
        let results = std::mem::take(&mut self.check_results);
        for view in &results {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.strong(&view.order_code);
                    ui.label(&view.package_name);
                });
                egui::Grid::new(format!("check_{}", view.order_code))
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("Atas nama");
                        ui.label(&view.customer_name);
                        ui.end_row();
                        ui.label("Tanggal acara");
                        ui.label(
                            view.event_date
                                .map(|date| date.format("%d %B %Y").to_string())
                                .unwrap_or_else(|| "-".to_string()),
                        );
                        ui.end_row();
                        ui.label("Total");
                        ui.label(format_idr(view.total_price));
                        ui.end_row();
                    });
                let fraction = f32::from(view.progress.step_percent()) / 100.0;
                ui.add(
                    egui::ProgressBar::new(fraction).text(view.progress.label_id()),
                );
            });
            ui.add_space(4.0);
        }
        self.check_results = results;
    }

    fn show_contact_tab(&mut self, ui: &mut egui::Ui) {
        ui.heading("Hubungi Kami");
        ui.add_space(6.0);
        egui::Grid::new("contact_form")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("Nama");
                ui.text_edit_singleline(&mut self.contact_form.name);
                ui.end_row();
                ui.label("Email");
                ui.text_edit_singleline(&mut self.contact_form.email);
                ui.end_row();
                ui.label("Pesan");
                ui.text_edit_multiline(&mut self.contact_form.message);
                ui.end_row();
            });
        for (field, message) in &self.contact_errors {
            ui.small(format!("{field}: {message}"));
        }
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.contact_busy, egui::Button::new("Kirim"))
                .clicked()
            {
                match self.contact_form.clone().into_request() {
                    Ok(request) => {
                        self.contact_errors.clear();
                        self.contact_busy = true;
                        self.dispatch(BackendCommand::SubmitContact(request));
                    }
                    Err(errors) => {
                        self.contact_errors = field_messages(&errors);
                    }
                }
            }
            if self.contact_busy {
                ui.spinner();
            }
        });
    }

    fn show_admin_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| match self.admin_tab {
            AdminTab::Ringkasan => self.show_dashboard_tab(ui),
            AdminTab::Katalog => self.show_packages_tab(ui),
            AdminTab::Pesanan => self.show_orders_tab(ui),
            AdminTab::Kontak => self.show_contacts_tab(ui),
        });
        self.show_package_editor(ctx);
    }

    fn show_dashboard_tab(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Ringkasan");
            if ui
                .add_enabled(!self.dashboard_busy, egui::Button::new("Segarkan"))
                .clicked()
            {
                self.reload_dashboard();
            }
            if ui
                .add_enabled(!self.export_busy, egui::Button::new("Ekspor CSV Pesanan"))
                .clicked()
            {
                self.export_busy = true;
                self.dispatch(BackendCommand::ExportOrdersCsv);
            }
            if self.dashboard_busy || self.export_busy {
                ui.spinner();
            }
        });
        if let Some(error) = &self.dashboard_error {
            ui.colored_label(egui::Color32::from_rgb(196, 92, 92), error);
        }
        let Some(data) = &self.dashboard else {
            return;
        };
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            for (label, value) in [
                ("Total pesanan", data.summary.total),
                ("Disetujui", data.summary.approved),
                ("Menunggu", data.summary.pending),
                ("Ditolak", data.summary.rejected),
            ] {
                ui.group(|ui| {
                    ui.vertical(|ui| {
                        ui.small(label);
                        ui.heading(value.to_string());
                    });
                });
            }
        });
        ui.add_space(8.0);
        ui.group(|ui| {
            ui.strong("Bulan ini");
            egui::Grid::new("revenue_grid").num_columns(2).show(ui, |ui| {
                ui.label("Pendapatan");
                ui.label(format_idr(data.revenue.revenue_this_month));
                ui.end_row();
                ui.label("Rata-rata nilai pesanan");
                ui.label(format_idr(data.revenue.avg_order_value_this_month));
                ui.end_row();
                ui.label("Jumlah pesanan");
                ui.label(data.revenue.orders_this_month.to_string());
                ui.end_row();
            });
        });
        ui.add_space(8.0);
        ui.group(|ui| {
            ui.strong("Paket terlaris");
            egui::Grid::new("top_packages").num_columns(3).show(ui, |ui| {
                for top in &data.top_packages {
                    ui.label(top.name.clone().unwrap_or_else(|| top.package_id.to_string()));
                    ui.label(format!("{} pesanan", top.count));
                    ui.label(format_idr(top.revenue));
                    ui.end_row();
                }
            });
        });
    }

    fn show_packages_tab(&mut self, ui: &mut egui::Ui) {
        if !self.packages_loaded {
            self.reload_packages();
        }
        ui.horizontal(|ui| {
            ui.heading("Katalog Paket");
            if ui.button("Paket Baru").clicked() {
                self.package_editor = Some(PackageEditor::create());
            }
        });
        ui.add_space(6.0);

        let mut reload = false;
        ui.horizontal(|ui| {
            ui.label("Cari:");
            let mut text = self.packages.search_input().to_string();
            if ui.text_edit_singleline(&mut text).changed() {
                self.packages.set_search_input(text, Instant::now());
            }
            ui.label("Urutkan:");
            let mut sort = self.packages.query().sort;
            egui::ComboBox::from_id_salt("packages_sort")
                .selected_text(package_sort_label(sort))
                .show_ui(ui, |ui| {
                    for option in PACKAGE_SORTS {
                        ui.selectable_value(&mut sort, option, package_sort_label(option));
                    }
                });
            if self.packages.set_sort(sort) {
                reload = true;
            }
        });
        if reload {
            self.reload_packages();
        }

        show_list_feedback(ui, &self.packages);
        ui.add_space(6.0);

        enum RowAction {
            Edit(PackageRecord),
            Delete(PackageId),
        }
        let mut action = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("packages_table")
                    .num_columns(5)
                    .striped(true)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        ui.strong("Nama");
                        ui.strong("Harga");
                        ui.strong("Status");
                        ui.strong("");
                        ui.strong("");
                        ui.end_row();
                        for package in self.packages.items() {
                            ui.label(&package.name);
                            ui.label(format_idr(package.price));
                            ui.label(if package.is_active { "Aktif" } else { "Nonaktif" });
                            let busy = self.mutations.is_busy(package.id.as_str());
                            if ui.add_enabled(!busy, egui::Button::new("Ubah")).clicked() {
                                action = Some(RowAction::Edit(package.clone()));
                            }
                            if ui.add_enabled(!busy, egui::Button::new("Hapus")).clicked() {
                                action = Some(RowAction::Delete(package.id.clone()));
                            }
                            ui.end_row();
                        }
                    });
            });
        match action {
            Some(RowAction::Edit(record)) => {
                self.package_editor = Some(PackageEditor::edit(&record));
            }
            Some(RowAction::Delete(id)) => {
                if self.mutations.begin(id.as_str()) {
                    self.dispatch(BackendCommand::DeletePackage { id });
                }
            }
            None => {}
        }

        if let Some(pager) = pager_ui(ui, "packages_pager", &self.packages) {
            self.apply_pager_packages(pager);
        }
    }

    fn apply_pager_packages(&mut self, action: PagerAction) {
        let changed = match action {
            PagerAction::Prev => self.packages.prev(),
            PagerAction::Next => self.packages.next(),
            PagerAction::Limit(limit) => self.packages.set_limit(limit),
        };
        if changed {
            self.reload_packages();
        }
    }

    fn show_package_editor(&mut self, ctx: &egui::Context) {
        let Some(mut editor) = self.package_editor.take() else {
            return;
        };
        let mut open = true;
        let mut submitted = false;
        let mut cancelled = false;
        let title = if editor.id.is_some() {
            "Ubah Paket"
        } else {
            "Paket Baru"
        };
        egui::Window::new(title)
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                if let Some(error) = &editor.error {
                    ui.colored_label(egui::Color32::from_rgb(196, 92, 92), error);
                }
                egui::Grid::new("package_editor_form")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Nama");
                        ui.text_edit_singleline(&mut editor.form.name);
                        ui.end_row();
                        ui.label("Deskripsi");
                        ui.text_edit_multiline(&mut editor.form.description);
                        ui.end_row();
                        ui.label("Harga (Rp)");
                        ui.add(egui::DragValue::new(&mut editor.form.price).range(0..=i64::MAX));
                        ui.end_row();
                        ui.label("Aktif");
                        ui.checkbox(&mut editor.form.is_active, "");
                        ui.end_row();
                        ui.label("URL gambar");
                        ui.text_edit_singleline(&mut editor.form.image_url);
                        ui.end_row();
                    });
                for (field, message) in &editor.field_errors {
                    ui.small(format!("{field}: {message}"));
                }
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!editor.busy, egui::Button::new("Simpan"))
                        .clicked()
                    {
                        submitted = true;
                    }
                    if ui.button("Batal").clicked() {
                        cancelled = true;
                    }
                    if editor.busy {
                        ui.spinner();
                    }
                });
            });

        if submitted {
            match editor.form.clone().into_request() {
                Ok(request) => {
                    editor.field_errors.clear();
                    editor.busy = true;
                    let id = editor.id.clone();
                    self.dispatch(BackendCommand::SavePackage { id, request });
                }
                Err(errors) => {
                    editor.field_errors = field_messages(&errors);
                }
            }
        }
        if open && !cancelled {
            self.package_editor = Some(editor);
        }
    }

    fn show_orders_tab(&mut self, ui: &mut egui::Ui) {
        if !self.orders_loaded {
            self.reload_orders();
        }
        ui.heading("Pesanan");
        ui.add_space(6.0);

        let mut reload = false;
        ui.horizontal(|ui| {
            ui.label("Cari:");
            let mut text = self.orders.search_input().to_string();
            if ui.text_edit_singleline(&mut text).changed() {
                self.orders.set_search_input(text, Instant::now());
            }
            ui.label("Status:");
            let mut status = self.orders.query().status;
            egui::ComboBox::from_id_salt("orders_status")
                .selected_text(status.map(OrderStatus::label_id).unwrap_or("Semua"))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut status, None, "Semua");
                    for option in [
                        OrderStatus::Pending,
                        OrderStatus::Approved,
                        OrderStatus::Rejected,
                    ] {
                        ui.selectable_value(&mut status, Some(option), option.label_id());
                    }
                });
            if self.orders.set_status_filter(status) {
                reload = true;
            }
            ui.label("Urutkan:");
            let mut sort = self.orders.query().sort;
            egui::ComboBox::from_id_salt("orders_sort")
                .selected_text(order_sort_label(sort))
                .show_ui(ui, |ui| {
                    for option in ORDER_SORTS {
                        ui.selectable_value(&mut sort, option, order_sort_label(option));
                    }
                });
            if self.orders.set_sort(sort) {
                reload = true;
            }
        });
        if reload {
            self.reload_orders();
        }

        show_list_feedback(ui, &self.orders);
        ui.add_space(6.0);

        let mut status_change = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("orders_table")
                    .num_columns(7)
                    .striped(true)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        ui.strong("Kode");
                        ui.strong("Pelanggan");
                        ui.strong("Tanggal acara");
                        ui.strong("Total");
                        ui.strong("Status");
                        ui.strong("");
                        ui.strong("");
                        ui.end_row();
                        for order in self.orders.items() {
                            ui.label(&order.order_code);
                            ui.vertical(|ui| {
                                ui.label(&order.customer_name);
                                ui.small(&order.customer_email);
                            });
                            ui.label(
                                order
                                    .event_date
                                    .map(|date| date.format("%d-%m-%Y").to_string())
                                    .unwrap_or_else(|| "-".to_string()),
                            );
                            ui.label(format_idr(order.total_price));
                            ui.label(order.status.label_id());
                            let busy = self.mutations.is_busy(order.id.as_str());
                            let can_approve = !busy && order.status != OrderStatus::Approved;
                            if ui
                                .add_enabled(can_approve, egui::Button::new("Setujui"))
                                .clicked()
                            {
                                status_change =
                                    Some((order.id.clone(), OrderStatus::Approved));
                            }
                            let can_reject = !busy && order.status != OrderStatus::Rejected;
                            if ui
                                .add_enabled(can_reject, egui::Button::new("Tolak"))
                                .clicked()
                            {
                                status_change =
                                    Some((order.id.clone(), OrderStatus::Rejected));
                            }
                            ui.end_row();
                        }
                    });
            });
        if let Some((id, status)) = status_change {
            if self.mutations.begin(id.as_str()) {
                self.dispatch(BackendCommand::SetOrderStatus { id, status });
            }
        }

        if let Some(pager) = pager_ui(ui, "orders_pager", &self.orders) {
            let changed = match pager {
                PagerAction::Prev => self.orders.prev(),
                PagerAction::Next => self.orders.next(),
                PagerAction::Limit(limit) => self.orders.set_limit(limit),
            };
            if changed {
                self.reload_orders();
            }
        }
    }

    fn show_contacts_tab(&mut self, ui: &mut egui::Ui) {
        if !self.contacts_loaded {
            self.reload_contacts();
        }
        ui.heading("Pesan Masuk");
        ui.add_space(6.0);

        let mut reload = false;
        ui.horizontal(|ui| {
            ui.label("Cari:");
            let mut text = self.contacts.search_input().to_string();
            if ui.text_edit_singleline(&mut text).changed() {
                self.contacts.set_search_input(text, Instant::now());
            }
            ui.label("Status:");
            let mut status = self.contacts.query().status;
            egui::ComboBox::from_id_salt("contacts_status")
                .selected_text(status.map(ContactStatus::label_id).unwrap_or("Semua"))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut status, None, "Semua");
                    for option in [ContactStatus::New, ContactStatus::Read] {
                        ui.selectable_value(&mut status, Some(option), option.label_id());
                    }
                });
            if self.contacts.set_status_filter(status) {
                reload = true;
            }
            ui.label("Urutkan:");
            let mut sort = self.contacts.query().sort;
            egui::ComboBox::from_id_salt("contacts_sort")
                .selected_text(contact_sort_label(sort))
                .show_ui(ui, |ui| {
                    for option in CONTACT_SORTS {
                        ui.selectable_value(&mut sort, option, contact_sort_label(option));
                    }
                });
            if self.contacts.set_sort(sort) {
                reload = true;
            }
        });
        if reload {
            self.reload_contacts();
        }

        show_list_feedback(ui, &self.contacts);
        ui.add_space(6.0);

        let mut status_change = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for contact in self.contacts.items() {
                    ui.group(|ui| {
                        ui.horizontal(|ui| {
                            ui.strong(&contact.name);
                            ui.small(&contact.email);
                            ui.label(contact.status.label_id());
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    let busy = self.mutations.is_busy(contact.id.as_str());
                                    let (next, label) = match contact.status {
                                        ContactStatus::New => {
                                            (ContactStatus::Read, "Tandai dibaca")
                                        }
                                        ContactStatus::Read => {
                                            (ContactStatus::New, "Tandai belum dibaca")
                                        }
                                    };
                                    if ui
                                        .add_enabled(!busy, egui::Button::new(label))
                                        .clicked()
                                    {
                                        status_change = Some((contact.id.clone(), next));
                                    }
                                    ui.small(
                                        contact
                                            .created_at
                                            .format("%d-%m-%Y %H:%M")
                                            .to_string(),
                                    );
                                },
                            );
                        });
                        ui.label(&contact.message);
                    });
                    ui.add_space(4.0);
                }
            });
        if let Some((id, status)) = status_change {
            if self.mutations.begin(id.as_str()) {
                self.dispatch(BackendCommand::SetContactStatus { id, status });
            }
        }

        if let Some(pager) = pager_ui(ui, "contacts_pager", &self.contacts) {
            let changed = match pager {
                PagerAction::Prev => self.contacts.prev(),
                PagerAction::Next => self.contacts.next(),
                PagerAction::Limit(limit) => self.contacts.set_limit(limit),
            };
            if changed {
                self.reload_contacts();
            }
        }
    }
}

fn show_list_feedback<T, S: SortParam, F: FilterParam>(
    ui: &mut egui::Ui,
    controller: &ListController<T, S, F>,
) {
    if controller.is_loading() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.small("Memuat...");
        });
    }
    if let Some(error) = controller.error() {
        ui.colored_label(egui::Color32::from_rgb(196, 92, 92), error);
    }
    if controller.phase() == LoadPhase::Loaded && controller.items().is_empty() {
        ui.label("Tidak ada data.");
    }
}

fn pager_ui<T, S: SortParam, F: FilterParam>(
    ui: &mut egui::Ui,
    id: &str,
    controller: &ListController<T, S, F>,
) -> Option<PagerAction> {
    let meta = controller.meta().copied()?;
    let mut action = None;
    ui.horizontal(|ui| {
        if ui
            .add_enabled(meta.has_prev, egui::Button::new("Sebelumnya"))
            .clicked()
        {
            action = Some(PagerAction::Prev);
        }
        ui.label(format!(
            "Hal. {} dari {} ({} data)",
            meta.page,
            meta.page_count.max(1),
            meta.total
        ));
        if ui
            .add_enabled(meta.has_next, egui::Button::new("Berikutnya"))
            .clicked()
        {
            action = Some(PagerAction::Next);
        }
        ui.separator();
        ui.label("Per halaman:");
        let mut limit = controller.query().limit;
        egui::ComboBox::from_id_salt(id)
            .selected_text(limit.to_string())
            .show_ui(ui, |ui| {
                for choice in LIMIT_CHOICES {
                    ui.selectable_value(&mut limit, choice, choice.to_string());
                }
            });
        if limit != controller.query().limit {
            action = Some(PagerAction::Limit(limit));
        }
    });
    action
}

impl eframe::App for BackOfficeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.tick_controllers();

        self.show_top_bar(ctx);
        self.show_status_bar(ctx);
        match self.screen {
            Screen::Public => self.show_public_screen(ctx),
            Screen::Login => self.show_login_screen(ctx),
            Screen::Admin => self.show_admin_screen(ctx),
        }

        // Debounce commits and worker events arrive between frames.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
