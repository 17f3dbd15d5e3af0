//! Startup Gate
//!
//! One-shot WAITING → RUNNING latch shared between the start button handler
//! and the control loop.
//!
//! The gate is the only state written from the edge handler. Writing is
//! restricted to a [`StartTrigger`] handle; the control loop only observes
//! the state. A single atomic word is enough: there is one writer, one
//! transition, and no way back.

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal_async::delay::DelayNs;

use crate::types::SystemState;

/// Startup gate
#[derive(Debug, Default)]
pub struct StartupGate {
    running: AtomicBool,
}

impl StartupGate {
    /// Create a gate in the WAITING state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
        }
    }

    /// Write-capable handle for the edge handler
    #[must_use]
    pub const fn trigger(&self) -> StartTrigger<'_> {
        StartTrigger { gate: self }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> SystemState {
        if self.running.load(Ordering::Acquire) {
            SystemState::Running
        } else {
            SystemState::Waiting
        }
    }

    /// Check if the gate has opened
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    /// Poll the gate until it opens, pausing `poll_us` between polls
    ///
    /// Returns the number of polls that observed WAITING. Never returns if
    /// the gate never opens.
    pub async fn wait_until_running<D: DelayNs>(&self, delay: &mut D, poll_us: u32) -> u32 {
        let mut polls: u32 = 0;
        while !self.is_running() {
            polls = polls.saturating_add(1);
            delay.delay_us(poll_us).await;
        }
        polls
    }
}

/// Write-only handle to a [`StartupGate`]
///
/// Handed to the start button handler at configuration time.
#[derive(Clone, Copy, Debug)]
pub struct StartTrigger<'g> {
    gate: &'g StartupGate,
}

impl StartTrigger<'_> {
    /// Open the gate
    ///
    /// Idempotent. Returns `true` only for the call that performed the
    /// WAITING → RUNNING transition.
    pub fn fire(&self) -> bool {
        let was_running = self.gate.running.swap(true, Ordering::AcqRel);
        if !was_running {
            info!("startup gate: WAITING -> RUNNING");
        }
        !was_running
    }
}
