pub mod math;

use std::fmt::Debug;

use num::Float;
use serde::{Deserialize, Serialize};

use crate::utils::sort::radix_sort_u32_soa;

/// ZeroSpVec is a sparse vector that treats zero elements as absent.
/// It keeps `inds` (element indices) and `vals` (element values) side by side.
///
/// `inds` is guaranteed to be strictly ascending, so every index occurs once.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroSpVec<N = f64>
where
    N: Float,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    /// logical dimension
    len: usize,
}

impl<N> ZeroSpVec<N>
where
    N: Float + Default,
{
    /// all-zero vector of dimension `len`
    #[inline]
    pub fn new(len: usize) -> Self {
        ZeroSpVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
        }
    }

    /// Build from (index, value) pairs in any order.
    /// Duplicate indices are summed, zeros are dropped, indices `>= len` are ignored.
    pub fn from_unsorted<I>(len: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, N)>,
    {
        let (mut inds, mut vals): (Vec<u32>, Vec<N>) = pairs
            .into_iter()
            .filter(|(i, _)| (*i as usize) < len)
            .unzip();
        radix_sort_u32_soa(&mut inds, &mut vals);

        let mut out_inds: Vec<u32> = Vec::with_capacity(inds.len());
        let mut out_vals: Vec<N> = Vec::with_capacity(vals.len());
        for (i, v) in inds.into_iter().zip(vals) {
            match out_inds.last() {
                Some(&last) if last == i => {
                    if let Some(acc) = out_vals.last_mut() {
                        *acc = *acc + v;
                    }
                }
                _ => {
                    out_inds.push(i);
                    out_vals.push(v);
                }
            }
        }
        let mut vec = ZeroSpVec { inds: out_inds, vals: out_vals, len };
        vec.drop_zeros();
        vec
    }

    #[inline]
    fn drop_zeros(&mut self) {
        if self.vals.iter().all(|v| !v.is_zero()) {
            return;
        }
        let (inds, vals) = self
            .inds
            .iter()
            .zip(self.vals.iter())
            .filter(|(_, v)| !v.is_zero())
            .map(|(i, v)| (*i, *v))
            .unzip();
        self.inds = inds;
        self.vals = vals;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// number of stored (non-zero) entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> N {
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => self.vals[pos],
            Err(_) => N::zero(),
        }
    }

    /// iterate stored entries as (index, value), ascending index
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, &N)> + '_ {
        self.inds.iter().map(|i| *i as usize).zip(self.vals.iter())
    }
}

impl<N> Debug for ZeroSpVec<N>
where
    N: Float + Default + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            write!(f, "ZeroSpVec {{ len: {}, nnz: {}, entries: [", self.len, self.nnz())?;
            for (i, v) in self.raw_iter() {
                write!(f, " {i}: {v:?},")?;
            }
            write!(f, " ] }}")
        } else {
            f.debug_map().entries(self.raw_iter()).finish()
        }
    }
}
