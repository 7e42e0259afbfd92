//! Conserved-region sweep: per-diagonal edge events across any number
//! of MatchStores sharing a coordinate frame, so a region only
//! survives when every input covers it simultaneously.
//!
//! Edge events per interval are sorted so a closing event at a
//! position ties ahead of an opening event at the same position (a
//! trailing edge is processed before a leading edge at an equal
//! coordinate), and a segment is open exactly while every input is
//! simultaneously active.

use crate::match_store::{Match, MatchStore};
use fxhash::FxHashMap;

/// A half-open interval `[start, start + length)` on the shared
/// coordinate axis the inputs are projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: i32,
    pub length: i32,
}

#[derive(Clone, Copy)]
struct Event {
    pos: i32,
    opening: bool,
    src: usize,
}

/// Returns every maximal interval simultaneously covered by at least
/// one interval from each of `groups`.
pub fn intersect_many(groups: &[&[Interval]]) -> Vec<Interval> {
    let needed = groups.len();
    let mut events = Vec::with_capacity(2 * groups.iter().map(|g| g.len()).sum::<usize>());
    for (src, group) in groups.iter().enumerate() {
        for iv in group.iter() {
            if iv.length <= 0 {
                continue;
            }
            events.push(Event {
                pos: iv.start,
                opening: true,
                src,
            });
            events.push(Event {
                pos: iv.start + iv.length,
                opening: false,
                src,
            });
        }
    }

    // Closing (opening = false) sorts ahead of opening at an equal
    // position, so an interval that ends exactly where another begins
    // doesn't register a one-point overlap.
    events.sort_by(|a, b| a.pos.cmp(&b.pos).then(a.opening.cmp(&b.opening)));

    let mut counts = vec![0i32; needed];
    let mut segment_start: Option<i32> = None;
    let mut result = Vec::new();

    for ev in events {
        let was_all_active = counts.iter().all(|&c| c > 0);
        if ev.opening {
            counts[ev.src] += 1;
        } else {
            counts[ev.src] -= 1;
        }
        let is_all_active = counts.iter().all(|&c| c > 0);

        if !was_all_active && is_all_active {
            segment_start = Some(ev.pos);
        } else if was_all_active && !is_all_active {
            if let Some(start) = segment_start.take() {
                if ev.pos > start {
                    result.push(Interval {
                        start,
                        length: ev.pos - start,
                    });
                }
            }
        }
    }

    result
}

/// Three-input convenience wrapper over [`intersect_many`].
pub fn intersect_three(a: &[Interval], b: &[Interval], c: &[Interval]) -> Vec<Interval> {
    intersect_many(&[a, b, c])
}

/// Buckets a store's matches by diagonal `d = x - y`, each expressed
/// as the interval `[min(x, y), min(x, y) + length)` along that
/// diagonal.
fn diagonal_buckets(store: &MatchStore) -> FxHashMap<i32, Vec<Interval>> {
    let mut buckets: FxHashMap<i32, Vec<Interval>> = FxHashMap::default();
    for m in store.iter() {
        buckets.entry(m.diagonal()).or_default().push(Interval {
            start: m.x.min(m.y),
            length: m.length,
        });
    }
    buckets
}

/// Per-diagonal intersection of `stores`, each sharing the same (x, y)
/// coordinate frame: for every diagonal present in any store, the
/// per-store coverage intervals are intersected and every resulting
/// segment is projected back to `(x, y, length)` — `d >= 0` gives
/// `start_x = d + start_along, start_y = start_along`; `d < 0` gives
/// `start_x = start_along, start_y = start_along - d`. A diagonal with
/// no matches in some input store contributes no coverage there, so a
/// segment only survives when every store covers it.
pub fn intersect_stores(stores: &[&MatchStore]) -> Vec<Match> {
    let per_store: Vec<FxHashMap<i32, Vec<Interval>>> =
        stores.iter().map(|s| diagonal_buckets(s)).collect();

    let mut diagonals: Vec<i32> = per_store.iter().flat_map(|b| b.keys().copied()).collect();
    diagonals.sort_unstable();
    diagonals.dedup();

    let empty: Vec<Interval> = Vec::new();
    let mut out = Vec::new();
    for d in diagonals {
        let groups: Vec<&[Interval]> = per_store
            .iter()
            .map(|b| b.get(&d).map(|v| v.as_slice()).unwrap_or(&empty))
            .collect();
        for seg in intersect_many(&groups) {
            let (x, y) = if d >= 0 {
                (d + seg.start, seg.start)
            } else {
                (seg.start, seg.start - d)
            };
            out.push(Match {
                x,
                y,
                length: seg.length,
            });
        }
    }
    out
}
