use super::CELEBRATION;
use rand::Rng;
use std::time::Instant;
use wheelspin::{PrizeColor, PrizeList, Session, SpinDuration, SpinId, SpinOutcome, SpinTicket};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Celebration {
    pub color: PrizeColor,
    pub until: Instant,
}

/// What the window shows: the session, the prize list on the wheel and the spin setting.
pub struct WheelState {
    pub session: Session,
    pub prizes: PrizeList,
    pub duration: SpinDuration,
    pending_prizes: Option<PrizeList>,
    celebration: Option<Celebration>,
}

impl WheelState {
    pub fn new(prizes: PrizeList, duration: SpinDuration, distributed_start: u64) -> Self {
        Self {
            session: Session::new().with_distributed(distributed_start),
            prizes,
            duration,
            pending_prizes: None,
            celebration: None,
        }
    }

    pub fn spin<R: Rng>(&mut self, now: Instant, rng: &mut R) -> Option<SpinTicket> {
        self.session
            .request_spin(&self.prizes, self.duration, now, rng)
    }

    /// Settles the spin and swaps in a prize list that arrived while it was running.
    pub fn finish(&mut self, id: SpinId) -> Option<SpinOutcome> {
        let outcome = self.session.complete_spin(id)?;
        if let Some(prizes) = self.pending_prizes.take() {
            log::info!("Applying prize list received during the spin");
            self.prizes = prizes;
        }
        Some(outcome)
    }

    /// Returns `true` if the wheel changed now, `false` if the list waits for the spin to end.
    pub fn replace_prizes(&mut self, prizes: PrizeList) -> bool {
        if self.session.is_spinning() {
            self.pending_prizes = Some(prizes);
            false
        } else {
            self.prizes = prizes;
            true
        }
    }

    pub fn set_duration(&mut self, duration: SpinDuration) {
        self.duration = duration;
    }

    pub fn celebrate(&mut self, color: PrizeColor, now: Instant) {
        self.celebration = Some(Celebration {
            color,
            until: now + CELEBRATION,
        });
    }

    pub fn end_celebration(&mut self, now: Instant) {
        if self.celebration.is_some_and(|c| c.until <= now) {
            self.celebration = None;
        }
    }

    pub fn celebration_color(&self, now: Instant) -> Option<PrizeColor> {
        self.celebration
            .filter(|c| c.until > now)
            .map(|c| c.color)
    }

    /// Elapsed share of the running spin, `0.0` when idle.
    pub fn progress(&self, now: Instant) -> f64 {
        self.session.progress(now).unwrap_or(0.0)
    }

    pub fn winner_text(&self) -> String {
        match (self.session.winner(), self.session.is_spinning()) {
            (_, true) => "Good luck...".to_string(),
            (Some(winner), false) => format!("Congratulations: {}", winner.name),
            (None, false) => "Press Spin or Space".to_string(),
        }
    }

    pub fn counter_text(&self) -> String {
        format!("Prizes handed out: {}", self.session.distributed())
    }

    pub fn duration_text(&self) -> String {
        format!(
            "Spin time: {}ms ({})",
            self.duration.as_millis(),
            self.duration.speed_label()
        )
    }

    pub fn history_text(&self) -> String {
        self.session
            .history()
            .iter()
            .map(|entry| format!("● {}", entry))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;
    use wheelspin::Prize;

    fn list(names: &[&str]) -> PrizeList {
        PrizeList::new(
            names
                .iter()
                .enumerate()
                .map(|(i, n)| Prize::new(*n, *n, 1.0, PrizeColor::from_palette(i)))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_prize_change_during_spin_waits_for_completion() {
        let mut state = WheelState::new(list(&["A", "B"]), SpinDuration::default(), 0);
        let mut rng = StdRng::seed_from_u64(1);

        let ticket = state.spin(Instant::now(), &mut rng).unwrap();
        assert!(!state.replace_prizes(list(&["C", "D", "E"])));
        assert_eq!(state.prizes.len(), 2);

        let outcome = state.finish(ticket.id).unwrap();
        assert!(["A", "B"].contains(&outcome.winner.name.as_str()));
        assert_eq!(state.prizes.len(), 3);

        assert!(state.replace_prizes(list(&["F", "G"])));
        assert_eq!(state.prizes.get(0).unwrap().name.as_str(), "F");
    }

    #[test]
    fn test_duration_change_does_not_affect_running_spin() {
        let mut state = WheelState::new(list(&["A", "B"]), SpinDuration::from_millis(800), 0);
        let mut rng = StdRng::seed_from_u64(2);

        let ticket = state.spin(Instant::now(), &mut rng).unwrap();
        state.set_duration(SpinDuration::from_millis(4000));

        let active = state.session.animator().active().unwrap();
        assert_eq!(active.duration, ticket.duration);
        assert_eq!(ticket.duration.as_millis(), 800);
        assert!(state.spin(Instant::now(), &mut rng).is_none());
    }

    #[test]
    fn test_celebration_expires() {
        let mut state = WheelState::new(list(&["A", "B"]), SpinDuration::default(), 0);
        let now = Instant::now();
        let color = PrizeColor::from_palette(3);

        state.celebrate(color, now);
        assert_eq!(state.celebration_color(now), Some(color));

        state.end_celebration(now);
        assert_eq!(state.celebration_color(now), Some(color));

        let later = now + CELEBRATION + Duration::from_millis(1);
        assert_eq!(state.celebration_color(later), None);
        state.end_celebration(later);
        assert_eq!(state.celebration_color(now), None);
    }

    #[test]
    fn test_progress_strip_tracks_running_spin() {
        let mut state = WheelState::new(list(&["A", "B"]), SpinDuration::from_millis(2000), 0);
        let mut rng = StdRng::seed_from_u64(4);
        let start = Instant::now();
        assert_eq!(state.progress(start), 0.0);

        let ticket = state.spin(start, &mut rng).unwrap();
        assert_eq!(state.progress(start + Duration::from_millis(500)), 0.25);
        assert_eq!(state.progress(start + Duration::from_secs(9)), 1.0);

        state.finish(ticket.id);
        assert_eq!(state.progress(start + Duration::from_millis(500)), 0.0);
    }

    #[test]
    fn test_display_texts() {
        let mut state = WheelState::new(list(&["A", "B"]), SpinDuration::from_millis(3000), 41);
        assert_eq!(state.counter_text(), "Prizes handed out: 41");
        assert_eq!(state.duration_text(), "Spin time: 3000ms (Standard)");
        assert!(state.history_text().is_empty());

        let mut rng = StdRng::seed_from_u64(3);
        let ticket = state.spin(Instant::now(), &mut rng).unwrap();
        assert_eq!(state.winner_text(), "Good luck...");
        state.finish(ticket.id);

        assert_eq!(state.counter_text(), "Prizes handed out: 42");
        assert_eq!(
            state.winner_text(),
            format!("Congratulations: {}", ticket.winner.name)
        );
        assert_eq!(
            state.history_text(),
            format!("● Congratulations! You won {}", ticket.winner.name)
        );
    }
}
