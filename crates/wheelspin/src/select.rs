use crate::prize::PrizeList;
use rand::Rng;

/// Picks the prize whose slice of `[0, total_weight)` contains `r`.
///
/// Weights are accumulated in list order and the first prize whose running total reaches `r`
/// wins. Should rounding leave `r` past the final running total, the last prize wins.
pub fn select(prizes: &PrizeList, r: f64) -> usize {
    let mut cumulative = 0.0;
    for (index, prize) in prizes.iter().enumerate() {
        cumulative += prize.weight;
        if cumulative >= r {
            return index;
        }
    }
    prizes.len() - 1
}

/// Draws a winner with probability proportional to its weight.
pub fn draw<R: Rng>(prizes: &PrizeList, rng: &mut R) -> usize {
    select(prizes, rng.gen_range(0.0..prizes.total_weight()))
}

/// Wins per prize over `draws` independent draws.
pub fn tally<R: Rng>(prizes: &PrizeList, draws: u64, rng: &mut R) -> Vec<u64> {
    let mut counts = vec![0; prizes.len()];
    for _ in 0..draws {
        counts[draw(prizes, rng)] += 1;
    }
    counts
}

/// Pearson's chi-squared statistic of `counts` against the weights of `prizes`.
pub fn chi_squared(prizes: &PrizeList, counts: &[u64]) -> f64 {
    let draws: u64 = counts.iter().sum();
    prizes
        .iter()
        .zip(counts)
        .map(|(prize, &observed)| {
            let expected = draws as f64 * prize.weight / prizes.total_weight();
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prize::{Prize, PrizeColor};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn prizes(weights: &[(&str, f64)]) -> PrizeList {
        PrizeList::new(
            weights
                .iter()
                .enumerate()
                .map(|(i, (id, w))| Prize::new(*id, *id, *w, PrizeColor::from_palette(i)))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_merged_scenario_draws() {
        let list = prizes(&[("A", 1.0), ("B", 1.0), ("B", 1.0)]);

        assert_eq!(select(&list, 0.5), 0);
        assert_eq!(select(&list, 1.0), 0);
        assert_eq!(select(&list, 1.0001), 1);
        assert_eq!(select(&list, 2.9), 1);
    }

    #[test]
    fn test_overshoot_falls_back_to_last() {
        let list = prizes(&[("A", 0.1), ("B", 0.2), ("C", 0.3)]);
        assert_eq!(select(&list, list.total_weight() + 1e-9), 2);
    }

    #[test]
    fn test_stratified_sweep_matches_weights_exactly() {
        let list = prizes(&[("A", 1.0), ("B", 3.0), ("C", 6.0)]);
        let steps = 10_000;
        let mut counts = [0u32; 3];

        for i in 0..steps {
            let r = (i as f64 + 0.5) / steps as f64 * list.total_weight();
            counts[select(&list, r)] += 1;
        }

        assert_eq!(counts, [1_000, 3_000, 6_000]);
    }

    #[test]
    fn test_equal_weights_are_uniform() {
        let list = prizes(&[("A", 2.0), ("B", 2.0), ("C", 2.0), ("D", 2.0)]);
        let mut rng = StdRng::seed_from_u64(11);
        let counts = tally(&list, 100_000, &mut rng);

        for count in &counts {
            assert!((23_500..=26_500).contains(count), "count {count} not near 25000");
        }
    }

    #[test]
    fn test_weighted_fairness_chi_squared() {
        let list = prizes(&[("A", 1.0), ("B", 2.0), ("C", 3.5), ("D", 0.5), ("E", 3.0)]);
        let mut rng = StdRng::seed_from_u64(2024);
        let counts = tally(&list, 200_000, &mut rng);

        // 95% critical value for 4 degrees of freedom
        let statistic = chi_squared(&list, &counts);
        assert!(statistic < 9.488, "chi-squared {statistic} too large: {counts:?}");

        for (i, &count) in counts.iter().enumerate() {
            let observed = count as f64 / 200_000.0;
            let expected = list.share(i).unwrap();
            assert!((observed - expected).abs() < 0.01);
        }
    }

    #[test]
    fn test_chi_squared_of_perfect_counts_is_zero() {
        let list = prizes(&[("A", 1.0), ("B", 3.0)]);
        assert_eq!(chi_squared(&list, &[250, 750]), 0.0);
    }
}
