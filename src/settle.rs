//! Deferred Measurement
//! `open` only shows the modal. Measuring the content panel has to wait until
//! the host has laid it out, so the measurement runs `settle_delay` later.
//! Frame-driven hosts poll a [`PendingMeasurement`]; async hosts can await
//! [`measure_after_settle`] on a current-thread runtime.

use crate::gate::{ConsentGate, MeasureOutcome, MeasureTicket};
use crate::handles::{CheckboxHandle, ContentHandle, GateView};
use log::warn;
use std::cell::RefCell;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct PendingMeasurement {
    ticket: MeasureTicket,
    due: Instant,
}

impl PendingMeasurement {
    pub fn new(ticket: MeasureTicket, now: Instant) -> Self {
        Self {
            ticket,
            due: now + ticket.settle_delay(),
        }
    }

    pub fn ticket(&self) -> MeasureTicket {
        self.ticket
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }

    /// Empties `slot` and returns its ticket once the delay has elapsed.
    pub fn take_due(slot: &mut Option<Self>, now: Instant) -> Option<MeasureTicket> {
        if slot.as_ref().is_some_and(|p| p.is_due(now)) {
            slot.take().map(|p| p.ticket)
        } else {
            None
        }
    }
}

/// Sleep out the settle delay, then run the measurement.
///
/// The gate is only borrowed after the sleep. A `close` or re-`open` in the
/// meantime makes the outcome [`MeasureOutcome::Stale`], as does a gate that is
/// still borrowed by the host when the delay elapses.
pub async fn measure_after_settle<C, S, V>(
    gate: &RefCell<ConsentGate<C, S, V>>,
    ticket: MeasureTicket,
) -> MeasureOutcome
where
    C: CheckboxHandle,
    S: ContentHandle,
    V: GateView,
{
    tokio::time::sleep(ticket.settle_delay()).await;
    match gate.try_borrow_mut() {
        Ok(mut gate) => gate.measure(ticket),
        Err(_) => {
            warn!(
                "[Gate] Gate busy when settle delay elapsed; dropping measurement (session {})",
                ticket.session()
            );
            MeasureOutcome::Stale
        }
    }
}
