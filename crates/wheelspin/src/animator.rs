use crate::duration::SpinDuration;
use crate::easing::{CubicBezier, SPIN_EASING};
use crate::layout::layout;
use crate::planner::{self, RotationPlan};
use crate::prize::{Prize, PrizeList};
use crate::select;
use derive_more::Display;
use rand::Rng;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("spin #{_0}")]
pub struct SpinId(u64);

/// Handed to the host when a spin starts; the host completes the spin with `id` once
/// `duration` has passed.
#[derive(Debug, Clone)]
pub struct SpinTicket {
    pub id: SpinId,
    pub duration: SpinDuration,
    pub target: f64,
    pub winner: Prize,
}

#[derive(Debug, Clone)]
pub struct ActiveSpin {
    pub id: SpinId,
    pub winner_index: usize,
    pub winner: Prize,
    pub start_rotation: f64,
    pub plan: RotationPlan,
    pub started_at: Instant,
    pub duration: SpinDuration,
}

impl ActiveSpin {
    pub fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_duration().as_secs_f64()).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Default)]
pub enum SpinState {
    #[default]
    Idle,
    Spinning(ActiveSpin),
}

/// Drives a single spin from request to completion.
///
/// The winner, target rotation and duration are all fixed when the spin begins. Requests while a
/// spin is running are dropped, and a spin completes only through its own ticket, once.
#[derive(Debug)]
pub struct SpinAnimator {
    state: SpinState,
    next_id: u64,
    easing: CubicBezier,
}

impl Default for SpinAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinAnimator {
    pub fn new() -> Self {
        Self::with_easing(SPIN_EASING)
    }

    pub fn with_easing(easing: CubicBezier) -> Self {
        Self {
            state: SpinState::Idle,
            next_id: 0,
            easing,
        }
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn active(&self) -> Option<&ActiveSpin> {
        match &self.state {
            SpinState::Spinning(active) => Some(active),
            SpinState::Idle => None,
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.active().is_some()
    }

    pub fn begin<R: Rng>(
        &mut self,
        prizes: &PrizeList,
        rotation: f64,
        duration: SpinDuration,
        now: Instant,
        rng: &mut R,
    ) -> Option<SpinTicket> {
        if let Some(active) = self.active() {
            log::debug!("Spin request ignored, {} still running", active.id);
            return None;
        }

        let winner_index = select::draw(prizes, rng);
        let winner = prizes.get(winner_index)?.clone();
        let sector = *layout(prizes).get(winner_index)?;
        let plan = planner::plan(sector, rotation, duration, rng);

        self.next_id += 1;
        let id = SpinId(self.next_id);

        log::debug!(
            "{} picked '{}', {:.1}° -> {:.1}° over {}ms",
            id,
            winner.name,
            rotation,
            plan.target,
            duration.as_millis()
        );

        self.state = SpinState::Spinning(ActiveSpin {
            id,
            winner_index,
            winner: winner.clone(),
            start_rotation: rotation,
            plan,
            started_at: now,
            duration,
        });

        Some(SpinTicket {
            id,
            duration,
            target: plan.target,
            winner,
        })
    }

    /// Completes the running spin if `id` is its ticket. Any other call is a no-op.
    pub fn finish(&mut self, id: SpinId) -> Option<ActiveSpin> {
        if self.active().is_none_or(|active| active.id != id) {
            log::debug!("Ignoring completion for {}, not the running spin", id);
            return None;
        }
        match std::mem::take(&mut self.state) {
            SpinState::Spinning(active) => Some(active),
            SpinState::Idle => None,
        }
    }

    pub fn progress(&self, now: Instant) -> Option<f64> {
        self.active().map(|active| active.progress(now))
    }

    /// Eased rotation of the running spin at `now`, resting on the target once its time is up.
    pub fn visible_angle(&self, now: Instant) -> Option<f64> {
        self.active().map(|active| {
            let progress = active.progress(now);
            if progress >= 1.0 {
                return active.plan.target;
            }
            let eased = self.easing.ease(progress);
            active.start_rotation + (active.plan.target - active.start_rotation) * eased
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prize::PrizeColor;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn prizes() -> PrizeList {
        PrizeList::new(vec![
            Prize::new("1", "Study", 1.0, PrizeColor::from_palette(0)),
            Prize::new("2", "Sleep", 1.0, PrizeColor::from_palette(1)),
            Prize::new("3", "Exercise", 2.0, PrizeColor::from_palette(2)),
        ])
        .unwrap()
    }

    #[test]
    fn test_second_request_is_dropped() {
        let mut animator = SpinAnimator::new();
        let mut rng = StdRng::seed_from_u64(1);
        let now = Instant::now();

        let ticket = animator
            .begin(&prizes(), 0.0, SpinDuration::from_millis(1000), now, &mut rng)
            .unwrap();
        let before = animator.active().unwrap().clone();

        let again = animator.begin(&prizes(), 0.0, SpinDuration::from_millis(4000), now, &mut rng);
        assert!(again.is_none());

        let active = animator.active().unwrap();
        assert_eq!(active.id, ticket.id);
        assert_eq!(active.duration, before.duration);
        assert_eq!(active.plan, before.plan);
        assert_eq!(active.winner, before.winner);
    }

    #[test]
    fn test_finish_fires_once_for_its_own_ticket() {
        let mut animator = SpinAnimator::new();
        let mut rng = StdRng::seed_from_u64(2);
        let ticket = animator
            .begin(&prizes(), 0.0, SpinDuration::default(), Instant::now(), &mut rng)
            .unwrap();

        assert!(animator.finish(SpinId(ticket.id.0 + 1)).is_none());
        assert!(animator.is_spinning());

        let finished = animator.finish(ticket.id).unwrap();
        assert_eq!(finished.winner, ticket.winner);
        assert!(!animator.is_spinning());
        assert!(animator.finish(ticket.id).is_none());
    }

    #[test]
    fn test_ids_increase_across_spins() {
        let mut animator = SpinAnimator::new();
        let mut rng = StdRng::seed_from_u64(3);
        let first = animator
            .begin(&prizes(), 0.0, SpinDuration::default(), Instant::now(), &mut rng)
            .unwrap();
        animator.finish(first.id);
        let second = animator
            .begin(&prizes(), first.target, SpinDuration::default(), Instant::now(), &mut rng)
            .unwrap();

        assert!(second.id > first.id);
        assert!(second.target > first.target);
        // A stale ticket cannot complete the newer spin.
        assert!(animator.finish(first.id).is_none());
        assert!(animator.is_spinning());
    }

    #[test]
    fn test_visible_angle_eases_to_target() {
        let mut animator = SpinAnimator::new();
        let mut rng = StdRng::seed_from_u64(4);
        let start = Instant::now();
        let ticket = animator
            .begin(&prizes(), 90.0, SpinDuration::from_millis(2000), start, &mut rng)
            .unwrap();

        assert_eq!(animator.visible_angle(start), Some(90.0));
        assert_eq!(animator.progress(start + Duration::from_millis(500)), Some(0.25));

        let halfway = animator.visible_angle(start + Duration::from_millis(1000)).unwrap();
        let linear_halfway = 90.0 + (ticket.target - 90.0) / 2.0;
        assert!(halfway > linear_halfway);

        assert_eq!(
            animator.visible_angle(start + Duration::from_millis(2000)),
            Some(ticket.target)
        );
        assert_eq!(
            animator.visible_angle(start + Duration::from_secs(60)),
            Some(ticket.target)
        );
    }

    #[test]
    fn test_idle_has_no_visible_angle() {
        let animator = SpinAnimator::new();
        assert!(animator.visible_angle(Instant::now()).is_none());
        assert!(matches!(animator.state(), SpinState::Idle));
    }
}
