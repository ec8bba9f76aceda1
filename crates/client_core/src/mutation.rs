//! Mutation-and-reload bridge: per-target busy flags around single-item
//! writes, with notifications and a reload signal for the owning list.

use std::collections::HashSet;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Toast-style message for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub notice: Notice,
    /// The owning list must reload when this is set.
    pub reload: bool,
}

/// Tracks which targets have a mutation in flight. A second mutation on a
/// busy target is rejected; the UI disables the control while the flag is
/// set. Mutations on distinct targets are independent.
#[derive(Debug, Default)]
pub struct MutationBridge {
    busy: HashSet<String>,
}

impl MutationBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the target. `false` means a mutation is already in flight and
    /// the new one must not be issued.
    pub fn begin(&mut self, target: &str) -> bool {
        self.busy.insert(target.to_string())
    }

    pub fn is_busy(&self, target: &str) -> bool {
        self.busy.contains(target)
    }

    pub fn any_busy(&self) -> bool {
        !self.busy.is_empty()
    }

    /// Clears the busy flag and folds the request outcome into a
    /// notification plus reload signal.
    pub fn settle(
        &mut self,
        target: &str,
        outcome: Result<(), ClientError>,
        success_message: &str,
        error_fallback: &str,
    ) -> MutationOutcome {
        self.busy.remove(target);
        match outcome {
            Ok(()) => MutationOutcome {
                notice: Notice::success(success_message),
                reload: true,
            },
            Err(err) => MutationOutcome {
                notice: Notice::error(err.human_message(error_fallback)),
                reload: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_mutation_on_same_target_is_rejected() {
        let mut bridge = MutationBridge::new();
        assert!(bridge.begin("ord_1"));
        assert!(!bridge.begin("ord_1"));
        // A different target is independent.
        assert!(bridge.begin("ord_2"));
    }

    #[test]
    fn success_clears_busy_and_requests_reload() {
        let mut bridge = MutationBridge::new();
        bridge.begin("ord_1");
        let outcome = bridge.settle(
            "ord_1",
            Ok(()),
            "Status pesanan diperbarui.",
            "Gagal memperbarui status.",
        );
        assert!(outcome.reload);
        assert_eq!(outcome.notice, Notice::success("Status pesanan diperbarui."));
        assert!(!bridge.is_busy("ord_1"));
    }

    #[test]
    fn failure_shows_server_message_verbatim_and_clears_busy() {
        let mut bridge = MutationBridge::new();
        bridge.begin("pkg_1");
        let outcome = bridge.settle(
            "pkg_1",
            Err(ClientError::Server {
                status: 409,
                message: "Paket ini masih digunakan.".to_string(),
            }),
            "Paket berhasil dihapus.",
            "Gagal menghapus paket.",
        );
        assert!(!outcome.reload);
        assert_eq!(outcome.notice, Notice::error("Paket ini masih digunakan."));
        assert!(!bridge.is_busy("pkg_1"));
    }
}
