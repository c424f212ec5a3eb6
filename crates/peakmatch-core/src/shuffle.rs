//! Right-column ordering.
//!
//! The right column is a permutation of the left one. It is produced here,
//! away from the engine and the renderer, so that a seed fully determines a
//! board and tests can rebuild the same layout.

/// Produce a permutation of `0..len` to use as the right-column order.
///
/// With `seed` the result is reproducible; without it the thread-local
/// generator is used. For `len >= 2` the permutation is never the identity,
/// so the right column never lines up with the left one.
pub fn right_order(len: usize, seed: Option<u64>) -> Vec<usize> {
    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    shuffled(len, &mut rng)
}

/// Same as [`right_order`] but drawing from a caller-owned generator.
pub fn shuffled(len: usize, rng: &mut fastrand::Rng) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    rng.shuffle(&mut order);

    if len >= 2 && order.iter().enumerate().all(|(i, &p)| i == p) {
        order.rotate_left(1);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_permutation(order: &[usize]) -> bool {
        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        sorted.iter().enumerate().all(|(i, &p)| i == p)
    }

    #[test]
    fn seeded_order_is_reproducible() {
        assert_eq!(right_order(10, Some(42)), right_order(10, Some(42)));
    }

    #[test]
    fn order_is_a_permutation() {
        for seed in 0..50 {
            let order = right_order(10, Some(seed));
            assert_eq!(order.len(), 10);
            assert!(is_permutation(&order), "seed {seed}: {order:?}");
        }
    }

    #[test]
    fn order_never_matches_left_column() {
        for seed in 0..200 {
            let order = right_order(2, Some(seed));
            assert_eq!(order, vec![1, 0], "seed {seed}");
        }
        for seed in 0..200 {
            let order = right_order(3, Some(seed));
            assert_ne!(order, vec![0, 1, 2], "seed {seed}");
        }
    }

    #[test]
    fn degenerate_lengths() {
        assert!(right_order(0, None).is_empty());
        assert_eq!(right_order(1, None), vec![0]);
    }
}
