use crate::alphabet::{tuple_code, Alphabet};
use crate::error::{CoreError, CoreResult};
use crate::ktuple_index::KTupleIndex;
use crate::match_store::MatchStore;
use std::collections::VecDeque;
use tracing::debug;

/// Seed/extension parameters.
#[derive(Debug, Clone, Copy)]
pub struct ExtendParams {
    pub k: u32,
    pub window: u32,
    pub mismatch: u32,
    pub min_match: u32,
}

impl ExtendParams {
    /// Validates before any allocation happens, rejecting a bad `k`
    /// fail-fast before touching the sequence.
    pub fn new(k: u32, window: u32, mismatch: u32, min_match: u32) -> CoreResult<Self> {
        if k < 4 {
            return Err(CoreError::Parameter(format!("k must be >= 4, got {k}")));
        }
        if window < k {
            return Err(CoreError::Parameter(format!(
                "window ({window}) must be >= k ({k})"
            )));
        }
        if min_match < k {
            return Err(CoreError::Parameter(format!(
                "min_match ({min_match}) must be >= k ({k})"
            )));
        }
        if mismatch > window {
            return Err(CoreError::Parameter(format!(
                "mismatch budget ({mismatch}) cannot exceed window ({window})"
            )));
        }
        Ok(ExtendParams {
            k,
            window,
            mismatch,
            min_match,
        })
    }
}

/// Extends a k-tuple seed outward from `seed_x`/`seed_y` in one
/// direction under a sliding mismatch window.
///
/// The window only applies once `window` positions have actually been
/// walked past the seed; before that, any mismatch halts extension
/// immediately. `buffer` tracks
/// mismatch (`true`) vs match (`false`) for the last `window`
/// positions walked, pre-seeded with the seed's own (all-match)
/// positions so the transition into the full-window regime is
/// continuous rather than resetting the count.
fn extend_one_direction(
    codes_x: &[u8],
    codes_y: &[u8],
    seed_x: usize,
    seed_y: usize,
    k: u32,
    window: u32,
    mismatch_budget: u32,
    sentinel: u8,
    forward: bool,
) -> usize {
    let window = window as usize;
    let mismatch_budget = mismatch_budget as usize;
    let mut buffer: VecDeque<bool> = VecDeque::with_capacity(window);
    for _ in 0..k.min(window as u32) {
        buffer.push_back(false);
    }
    let mut mismatch_count = 0usize;
    let mut extended = 0usize;

    loop {
        let step = extended + 1;
        let (x, y) = if forward {
            let x = seed_x + k as usize - 1 + step;
            let y = seed_y + k as usize - 1 + step;
            if x >= codes_x.len() || y >= codes_y.len() {
                break;
            }
            (x, y)
        } else {
            if step > seed_x || step > seed_y {
                break;
            }
            (seed_x - step, seed_y - step)
        };

        let is_match = codes_x[x] != sentinel && codes_x[x] == codes_y[y];

        if buffer.len() < window {
            if !is_match {
                break;
            }
            buffer.push_back(false);
            extended += 1;
            continue;
        }

        let oldest = buffer.pop_front().expect("buffer at capacity `window`");
        if oldest {
            mismatch_count -= 1;
        }
        let bit = !is_match;
        if bit {
            mismatch_count += 1;
        }
        if mismatch_count <= mismatch_budget {
            buffer.push_back(bit);
            extended += 1;
        } else {
            if oldest {
                mismatch_count += 1;
            }
            buffer.push_front(oldest);
            break;
        }
    }

    extended
}

/// Generates seeds from every non-poisoned k-tuple window of `codes_x`
/// against a pre-built index over `codes_y`, coalesces seeds on the
/// same diagonal via a last-emitted-extent tracker, and extends each
/// surviving seed symmetrically.
///
/// Use this kernel when `y_index` is already available and will be
/// reused across several `codes_x` inputs (e.g. an orchestrator cache
/// keyed by region).
pub fn extend_indexed(
    codes_x: &[u8],
    codes_y: &[u8],
    y_index: &KTupleIndex,
    alphabet_len: u64,
    params: &ExtendParams,
) -> CoreResult<MatchStore> {
    let k = params.k;
    if (codes_x.len() as u64) < k as u64 {
        let mut store = MatchStore::new();
        store.set_max_x(codes_x.len() as i32);
        store.set_max_y(codes_y.len() as i32);
        return Ok(store);
    }

    let sentinel = alphabet_len as u8;
    let mut store = MatchStore::new();
    store.set_max_x(codes_x.len() as i32);
    store.set_max_y(codes_y.len() as i32);

    // Tracks, per diagonal (x - y), the x-coordinate through which a
    // match has already been emitted, so a seed fully inside a
    // previously extended match is skipped rather than re-emitted.
    let mut diag_last_end: fxhash::FxHashMap<i32, i32> = fxhash::FxHashMap::default();

    let n_windows = codes_x.len() - k as usize + 1;
    for start_x in 0..n_windows {
        let code = match tuple_code(&codes_x[start_x..start_x + k as usize], alphabet_len) {
            Some(c) => c,
            None => continue,
        };
        for &start_y in y_index.positions(code) {
            let start_y = start_y as usize;
            let diagonal = start_x as i32 - start_y as i32;
            if start_x as i32 <= *diag_last_end.get(&diagonal).unwrap_or(&-1) {
                continue;
            }

            let back = extend_one_direction(
                codes_x, codes_y, start_x, start_y, k, params.window, params.mismatch, sentinel,
                false,
            );
            let fwd = extend_one_direction(
                codes_x, codes_y, start_x, start_y, k, params.window, params.mismatch, sentinel,
                true,
            );

            let length = (k as usize + back + fwd) as i32;
            if length >= params.min_match as i32 {
                let match_x = start_x as i32 - back as i32;
                let match_y = start_y as i32 - back as i32;
                store.append(match_x, match_y, length);
                diag_last_end.insert(diagonal, match_x + length);
            }
        }
    }

    debug!(
        x_len = codes_x.len(),
        y_len = codes_y.len(),
        k,
        matches = store.len(),
        "extended seeds to ungapped matches"
    );

    Ok(store)
}

/// Convenience kernel that builds its own transient index over
/// `codes_y` (forward and reverse-strand orientations) instead of
/// requiring a pre-built [`KTupleIndex`] from the caller, returning
/// the forward-strand and reverse-strand match stores. The reverse
/// view is `alphabet`'s reverse-complement when available (canonical
/// DNA) and a literal reversal otherwise; its Y coordinates are
/// flipped back into `codes_y`'s own coordinate space before being
/// returned.
pub fn extend_fast(
    codes_x: &[u8],
    codes_y: &[u8],
    alphabet: &Alphabet,
    params: &ExtendParams,
) -> CoreResult<(MatchStore, MatchStore)> {
    let alphabet_len = alphabet.len() as u64;
    let y_index = KTupleIndex::build(codes_y, alphabet_len, params.k)?;
    let forward = extend_indexed(codes_x, codes_y, &y_index, alphabet_len, params)?;

    let codes_y_rev = alphabet.reverse_view(codes_y);
    let y_rev_index = KTupleIndex::build(&codes_y_rev, alphabet_len, params.k)?;
    let reverse_raw = extend_indexed(codes_x, &codes_y_rev, &y_rev_index, alphabet_len, params)?;
    let reverse = reverse_raw.flip_y(codes_y.len() as i32);

    Ok((forward, reverse))
}
