use num::Float;

use super::ZeroSpVec;

impl<N> ZeroSpVec<N>
where
    N: Float + Default,
{
    /// sparse · dense; entries beyond `dense.len()` contribute nothing
    #[inline]
    pub fn dot_dense(&self, dense: &[N]) -> N {
        self.raw_iter()
            .filter_map(|(i, v)| dense.get(i).map(|d| *v * *d))
            .fold(N::zero(), |acc, x| acc + x)
    }

    /// dense += self
    #[inline]
    pub fn add_into(&self, dense: &mut [N]) {
        for (i, v) in self.raw_iter() {
            if let Some(slot) = dense.get_mut(i) {
                *slot = *slot + *v;
            }
        }
    }

    #[inline]
    pub fn norm(&self) -> N {
        self.vals.iter().fold(N::zero(), |acc, v| acc + *v * *v).sqrt()
    }

    /// Scale to unit L2 norm. The zero vector stays zero.
    #[inline]
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm.is_zero() || !norm.is_finite() {
            return;
        }
        for v in self.vals.iter_mut() {
            *v = *v / norm;
        }
    }
}
