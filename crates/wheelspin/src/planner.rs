use crate::duration::SpinDuration;
use crate::layout::{FULL_TURN, Sector, normalize};
use rand::Rng;

/// Layout angle of the fixed pointer at the top of the wheel.
pub const POINTER_ANGLE: f64 = 270.0;
/// Fraction of a sector kept clear on each side of the landing band.
pub const LANDING_MARGIN: f64 = 0.15;
/// Fraction of a sector the pointer may land in.
pub const LANDING_BAND: f64 = 0.70;
pub const MIN_FULL_TURNS: u32 = 10;
pub const MAX_EXTRA_TURNS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationPlan {
    /// Cumulative rotation once the spin settles.
    pub target: f64,
    /// Layout angle that ends up under the pointer.
    pub landing_angle: f64,
    pub full_turns: u32,
}

/// Full turns every spin makes; longer spins turn more so the wheel looks equally fast.
pub fn base_turns(duration: SpinDuration) -> u32 {
    let turns = (duration.as_millis() / 100 * 2).min(u64::from(u32::MAX)) as u32;
    turns.max(MIN_FULL_TURNS)
}

/// Layout angle under the pointer when the wheel is turned clockwise by `rotation` degrees.
pub fn angle_under_pointer(rotation: f64) -> f64 {
    normalize(POINTER_ANGLE - rotation)
}

pub fn plan<R: Rng>(
    sector: Sector,
    current: f64,
    duration: SpinDuration,
    rng: &mut R,
) -> RotationPlan {
    let offset_fraction = rng.gen_range(0.0..1.0);
    let extra_turns = rng.gen_range(0..=MAX_EXTRA_TURNS);
    plan_with(sector, current, duration, offset_fraction, extra_turns)
}

/// Plans the rotation that lands the pointer `offset_fraction` of the way through the landing
/// band of `sector`, moving forward from `current` by whole turns plus the smallest alignment.
pub fn plan_with(
    sector: Sector,
    current: f64,
    duration: SpinDuration,
    offset_fraction: f64,
    extra_turns: u32,
) -> RotationPlan {
    let offset = sector.sweep * LANDING_MARGIN
        + offset_fraction.clamp(0.0, 1.0) * sector.sweep * LANDING_BAND;
    let landing_angle = sector.start + offset;

    let goal = normalize(POINTER_ANGLE - landing_angle);
    let delta = normalize(goal - normalize(current));
    let full_turns = base_turns(duration) + extra_turns;

    RotationPlan {
        target: current + f64::from(full_turns) * FULL_TURN + delta,
        landing_angle,
        full_turns,
    }
}
