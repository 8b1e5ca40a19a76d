//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::Connect { .. } => "connect",
        BackendCommand::StartGame => "start_game",
        BackendCommand::RefreshNow => "refresh_now",
        BackendCommand::Disconnect => "disconnect",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn queues_commands_while_capacity_remains() {
        let (tx, rx) = bounded(1);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::StartGame, &mut status);
        assert!(status.is_empty());
        assert!(matches!(rx.try_recv(), Ok(BackendCommand::StartGame)));
    }

    #[test]
    fn reports_a_full_queue_without_dropping_status_silently() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::RefreshNow, &mut status);
        dispatch_backend_command(&tx, BackendCommand::RefreshNow, &mut status);
        assert!(status.contains("queue is full"));
    }

    #[test]
    fn reports_a_disconnected_backend() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::Disconnect, &mut status);
        assert!(status.contains("disconnected"));
    }
}
