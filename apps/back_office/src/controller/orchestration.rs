//! Dispatch from UI actions to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "Antrean perintah penuh; coba lagi.".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Proses latar belakang terputus; mulai ulang aplikasi.".to_string();
        }
    }
}
