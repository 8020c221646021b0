use crate::animator::SpinTicket;
use crate::duration::SpinDuration;
use crate::prize::PrizeList;
use crate::session::{Session, SpinOutcome};
use parking_lot::Mutex;
use rand::Rng;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

pub type SharedSession = Arc<Mutex<Session>>;

pub fn shared(session: Session) -> SharedSession {
    Arc::new(Mutex::new(session))
}

/// Waits out the duration latched in `ticket`, then settles the spin.
pub async fn complete_after(session: SharedSession, ticket: SpinTicket) -> Option<SpinOutcome> {
    tokio::time::sleep(ticket.duration.as_duration()).await;
    session.lock().complete_spin(ticket.id)
}

/// Starts a spin and schedules its completion on the tokio runtime.
///
/// Returns `None` without scheduling anything if a spin is already running.
pub fn start_spin<R: Rng>(
    session: &SharedSession,
    prizes: &PrizeList,
    duration: SpinDuration,
    rng: &mut R,
) -> Option<JoinHandle<Option<SpinOutcome>>> {
    let ticket = session
        .lock()
        .request_spin(prizes, duration, Instant::now(), rng)?;
    Some(tokio::spawn(complete_after(session.clone(), ticket)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prize::{Prize, PrizeColor};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn prizes() -> PrizeList {
        PrizeList::new(vec![
            Prize::new("a", "A", 1.0, PrizeColor::from_palette(0)),
            Prize::new("b", "B", 2.0, PrizeColor::from_palette(1)),
        ])
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_waits_for_latched_duration() {
        let session = shared(Session::new());
        let mut rng = StdRng::seed_from_u64(21);

        let handle = start_spin(&session, &prizes(), SpinDuration::from_millis(1000), &mut rng)
            .unwrap();

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(session.lock().is_spinning());
        assert!(session.lock().history().is_empty());

        let outcome = handle.await.unwrap().unwrap();
        assert!(!session.lock().is_spinning());
        assert_eq!(session.lock().history().len(), 1);
        assert_eq!(session.lock().rotation(), outcome.rotation);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_request_is_dropped() {
        let session = shared(Session::new());
        let mut rng = StdRng::seed_from_u64(22);
        let list = prizes();

        let first = start_spin(&session, &list, SpinDuration::from_millis(800), &mut rng).unwrap();
        assert!(start_spin(&session, &list, SpinDuration::from_millis(500), &mut rng).is_none());

        let outcome = first.await.unwrap().unwrap();
        assert_eq!(outcome.distributed, 1);

        let second = start_spin(&session, &list, SpinDuration::from_millis(500), &mut rng).unwrap();
        let next = second.await.unwrap().unwrap();
        assert!(next.rotation > outcome.rotation);
        assert_eq!(session.lock().distributed(), 2);
    }
}
