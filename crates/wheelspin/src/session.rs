use crate::animator::{SpinAnimator, SpinId, SpinTicket};
use crate::duration::SpinDuration;
use crate::history::{HistoryEntry, HistoryLedger};
use crate::prize::{Prize, PrizeColor, PrizeList};
use rand::Rng;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct SpinOutcome {
    pub id: SpinId,
    pub winner: Prize,
    /// Cumulative rotation the wheel rests at.
    pub rotation: f64,
    pub distributed: u64,
}

impl SpinOutcome {
    pub fn celebration_color(&self) -> PrizeColor {
        self.winner.color
    }
}

/// Everything a wheel remembers between spins: the cumulative rotation, the prize counter, the
/// history and the last winner.
///
/// Only [`Session::request_spin`] and [`Session::complete_spin`] change it. Everything else is
/// read-only for displays.
#[derive(Debug, Default)]
pub struct Session {
    rotation: f64,
    distributed: u64,
    history: HistoryLedger,
    winner: Option<Prize>,
    animator: SpinAnimator,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the prize counter at `count` instead of zero.
    pub fn with_distributed(mut self, count: u64) -> Self {
        self.distributed = count;
        self
    }

    /// Starts a spin against this snapshot of `prizes`. Returns `None` while a spin is running.
    pub fn request_spin<R: Rng>(
        &mut self,
        prizes: &PrizeList,
        duration: SpinDuration,
        now: Instant,
        rng: &mut R,
    ) -> Option<SpinTicket> {
        let ticket = self
            .animator
            .begin(prizes, self.rotation, duration, now, rng)?;
        self.winner = None;
        log::info!("Started {} ({}ms)", ticket.id, duration.as_millis());
        Some(ticket)
    }

    /// Settles the spin named by `id`, exactly once.
    pub fn complete_spin(&mut self, id: SpinId) -> Option<SpinOutcome> {
        let spin = self.animator.finish(id)?;

        self.rotation = spin.plan.target;
        self.distributed += 1;
        self.history
            .append(HistoryEntry::new(spin.winner.name.clone()));
        self.winner = Some(spin.winner.clone());

        log::info!("{} landed on '{}'", spin.id, spin.winner.name);

        Some(SpinOutcome {
            id: spin.id,
            winner: spin.winner,
            rotation: self.rotation,
            distributed: self.distributed,
        })
    }

    pub fn is_spinning(&self) -> bool {
        self.animator.is_spinning()
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Where the wheel should be drawn at `now`.
    pub fn visible_angle(&self, now: Instant) -> f64 {
        self.animator.visible_angle(now).unwrap_or(self.rotation)
    }

    pub fn progress(&self, now: Instant) -> Option<f64> {
        self.animator.progress(now)
    }

    pub fn distributed(&self) -> u64 {
        self.distributed
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    pub fn winner(&self) -> Option<&Prize> {
        self.winner.as_ref()
    }

    pub fn animator(&self) -> &SpinAnimator {
        &self.animator
    }
}
