use crate::prize::PrizeList;

pub const FULL_TURN: f64 = 360.0;

/// Reduces `angle` to `[0, 360)`.
///
/// `rem_euclid` rounds angles a hair below a whole number of turns up to exactly 360, which no
/// sector contains. Those land on the largest angle below a full turn instead.
pub fn normalize(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(FULL_TURN);
    if reduced >= FULL_TURN {
        f64::from_bits(FULL_TURN.to_bits() - 1)
    } else {
        reduced
    }
}

/// Angular slice of the wheel in degrees. Angles grow clockwise from the 3 o'clock position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub start: f64,
    pub sweep: f64,
}

impl Sector {
    pub fn end(&self) -> f64 {
        self.start + self.sweep
    }

    pub fn mid(&self) -> f64 {
        self.start + self.sweep / 2.0
    }

    /// Whether `angle` (any number of turns) falls in `[start, end)`.
    pub fn contains(&self, angle: f64) -> bool {
        let angle = normalize(angle);
        angle >= self.start && angle < self.end()
    }
}

/// Lays the prizes out contiguously from 0°, each sweep proportional to its weight.
///
/// Boundaries come from running weight totals rather than from summing rounded sweeps, and the
/// last sector always closes at exactly 360°.
pub fn layout(prizes: &PrizeList) -> Vec<Sector> {
    let total = prizes.total_weight();
    let last = prizes.len() - 1;
    let mut cumulative = 0.0;

    prizes
        .iter()
        .enumerate()
        .map(|(index, prize)| {
            let start = FULL_TURN * cumulative / total;
            cumulative += prize.weight;
            let end = if index == last {
                FULL_TURN
            } else {
                FULL_TURN * cumulative / total
            };
            Sector {
                start,
                sweep: end - start,
            }
        })
        .collect()
}

pub fn sector_at(sectors: &[Sector], angle: f64) -> Option<usize> {
    sectors.iter().position(|s| s.contains(angle))
}
