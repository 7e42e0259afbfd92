use crate::alphabet::tuple_code;
use crate::error::{CoreError, CoreResult};
use tracing::debug;

/// Bucketed index of every non-poisoned k-tuple position in a sequence.
///
/// `positions(code)` is O(1): `D[C[code]..C[code + 1]]`. Both passes
/// over the sequence are linear and no sort is required, because each
/// tuple's final bucket slot is known ahead of time from the first
/// pass's counts, avoiding a `HashMap<u64, Vec<u32>>` per k-mer.
#[derive(Debug, Clone)]
pub struct KTupleIndex {
    k: u32,
    alphabet_len: u64,
    tuple_count: u64,
    c: Vec<u32>,
    d: Vec<u32>,
}

impl KTupleIndex {
    /// Build the index over `codes` for tuple length `k` in the given
    /// alphabet size. Positions carrying the sentinel poison any tuple
    /// window that overlaps them.
    pub fn build(codes: &[u8], alphabet_len: u64, k: u32) -> CoreResult<Self> {
        if k == 0 {
            return Err(CoreError::Parameter("k must be >= 1".into()));
        }
        let tuple_count = alphabet_len
            .checked_pow(k)
            .ok_or_else(|| CoreError::Parameter(format!("|alphabet|^{k} overflows a u64")))?;
        if (codes.len() as u64) < k as u64 {
            return Ok(KTupleIndex {
                k,
                alphabet_len,
                tuple_count,
                c: vec![0; tuple_count as usize + 1],
                d: Vec::new(),
            });
        }

        let n_windows = codes.len() - k as usize + 1;
        let mut counts = vec![0u32; tuple_count as usize + 1];

        // Pass 1: count occurrences of each non-poisoned tuple code.
        for start in 0..n_windows {
            if let Some(code) = tuple_code(&codes[start..start + k as usize], alphabet_len) {
                counts[code as usize + 1] += 1;
            }
        }

        // Prefix-sum counts into bucket offsets.
        for i in 1..counts.len() {
            counts[i] += counts[i - 1];
        }
        let c = counts;
        let mut cursor = c.clone();
        let mut d = vec![0u32; c[tuple_count as usize] as usize];

        // Pass 2: place each position's index into its bucket.
        for start in 0..n_windows {
            if let Some(code) = tuple_code(&codes[start..start + k as usize], alphabet_len) {
                let slot = &mut cursor[code as usize];
                d[*slot as usize] = start as u32;
                *slot += 1;
            }
        }

        debug!(
            seq_len = codes.len(),
            k, tuple_count, matches = d.len(), "built k-tuple index"
        );

        Ok(KTupleIndex {
            k,
            alphabet_len,
            tuple_count,
            c,
            d,
        })
    }

    pub fn k(&self) -> u32 {
        self.k
    }

    pub fn alphabet_len(&self) -> u64 {
        self.alphabet_len
    }

    pub fn tuple_count(&self) -> u64 {
        self.tuple_count
    }

    /// All start positions whose k-tuple equals `code`.
    pub fn positions(&self, code: u64) -> &[u32] {
        let start = self.c[code as usize] as usize;
        let end = self.c[code as usize + 1] as usize;
        &self.d[start..end]
    }

    /// Positions sharing the same tuple as the one starting at
    /// `codes[start..start+k]`, or `None` if that window is poisoned.
    pub fn positions_for_window(&self, codes: &[u8], start: usize) -> Option<&[u32]> {
        let code = tuple_code(&codes[start..start + self.k as usize], self.alphabet_len)?;
        Some(self.positions(code))
    }
}
