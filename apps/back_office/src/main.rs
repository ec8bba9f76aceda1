//! Desktop front end for the wedding organizer: public catalog, booking
//! and contact forms, order status checks, and the admin back office.

mod backend_bridge;
mod config;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use backend_bridge::runtime::spawn_backend_thread;
use clap::Parser;
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use ui::BackOfficeApp;

#[derive(Parser, Debug)]
struct Cli {
    /// Overrides the API base URL from settings and environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Overrides the directory CSV reports are written to.
    #[arg(long)]
    export_dir: Option<std::path::PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();
    let mut settings = config::load_settings();
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }
    if let Some(export_dir) = cli.export_dir {
        settings.export_dir = export_dir;
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    spawn_backend_thread(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Wedding Organizer")
            .with_inner_size([1180.0, 760.0])
            .with_min_inner_size([920.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Wedding Organizer",
        options,
        Box::new(|_cc| Ok(Box::new(BackOfficeApp::new(cmd_tx, ui_rx)))),
    )
}
