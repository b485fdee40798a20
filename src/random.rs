//! Uniform random draws for the chaos game.

use rand::rngs::StdRng;
use rand::Rng;

/// Source of uniform reals in `[0, 1)`
pub trait UniformSource {
    fn next_unit(&mut self) -> f64;
}

impl UniformSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, wrapping around at the end.
#[cfg(test)]
#[derive(Clone, Debug)]
pub struct Scripted {
    values: Vec<f64>,
    pos: usize,
}

#[cfg(test)]
impl Scripted {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, pos: 0 }
    }
}

#[cfg(test)]
impl UniformSource for Scripted {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn std_rng_stays_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let r = rng.next_unit();
            assert!((0.0..1.0).contains(&r));
        }
    }

    #[test]
    fn seeded_draws_repeat() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..16 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
    }

    #[test]
    fn scripted_wraps() {
        let mut s = Scripted::new(vec![0.1, 0.9]);
        assert_eq!(s.next_unit(), 0.1);
        assert_eq!(s.next_unit(), 0.9);
        assert_eq!(s.next_unit(), 0.1);
    }

    #[test]
    fn empty_script_yields_zero() {
        let mut s = Scripted::new(Vec::new());
        assert_eq!(s.next_unit(), 0.0);
    }
}
