//! Fisher-Yates shuffling over an injected random source.
//!
//! Production callers pass an OS-seeded generator; tests and `--seed` runs pass
//! a seeded one so a whole generation or reveal is reproducible.

use rand::Rng;

/// Uniform in-place permutation of `items`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffled copy of `items`; the input is left untouched.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copied = items.to_vec();
    shuffle(&mut copied, rng);
    copied
}
