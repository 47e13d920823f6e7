//! Background task that materializes expired reservations
//!
//! Reserved tickets past their deadline already read as Expired at
//! query time; this sweep writes the transition down so the stored
//! status agrees with what readers see.

use std::sync::Arc;

use tokio::time::Duration;
use tracing::{info, warn};

use super::ticketing::TicketingService;
use crate::shared::shutdown::ShutdownSignal;

/// Start the ticket expiry background task.
///
/// Checks every `check_interval_secs` for Reserved tickets with
/// `expires_at` in the past and transitions them to Expired.
pub fn start_ticket_expiry_task(
    service: Arc<TicketingService>,
    shutdown: ShutdownSignal,
    check_interval_secs: u64,
) {
    tokio::spawn(async move {
        info!(
            check_interval = check_interval_secs,
            "Ticket expiry task started"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(check_interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match service.expire_due_reservations().await {
                        Ok(0) => {}
                        Ok(count) => info!(count, "Expired overdue reservations"),
                        Err(e) => warn!(error = %e, "Ticket expiry check error"),
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("Ticket expiry task shutting down");
                    break;
                }
            }
        }

        info!("Ticket expiry task stopped");
    });
}
