//! Plot orchestrator: sequence-offset bookkeeping, cached index/store
//! lookups keyed by region, and the full persisted-plot container.

use crate::alphabet::{Alphabet, EncodedSequence};
use crate::container;
use crate::conserved;
use crate::error::{CoreError, CoreResult};
use crate::extender::{self, ExtendParams};
use crate::match_store::MatchStore;
use fxhash::FxHashMap;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{Read, Write};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

/// One FASTA record's placement inside an [`Axis`]'s concatenated
/// coordinate space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisMeta {
    pub id: String,
    pub start: i32,
    pub length: i32,
}

/// A plot axis: one or more FASTA records concatenated into a single
/// coordinate space, with a prefix-sum table of per-record bounds.
#[derive(Debug, Clone)]
pub struct Axis {
    pub records: Vec<AxisMeta>,
    pub codes: EncodedSequence,
}

impl Axis {
    /// Builds an axis from FASTA records `(id, raw sequence)` in file
    /// order, concatenating them and recording each record's global
    /// start via a running prefix sum.
    pub fn from_records(records: &[(String, Vec<u8>)], alphabet: &Alphabet) -> CoreResult<Axis> {
        if records.is_empty() {
            return Err(CoreError::Parameter("axis needs at least one record".into()));
        }
        let mut metas = Vec::with_capacity(records.len());
        let mut concatenated = Vec::new();
        let mut cursor = 0i32;
        for (id, seq) in records {
            let enc = alphabet.encode(seq);
            metas.push(AxisMeta {
                id: id.clone(),
                start: cursor,
                length: enc.len() as i32,
            });
            cursor += enc.len() as i32;
            concatenated.extend_from_slice(enc.codes());
        }
        Ok(Axis {
            records: metas,
            codes: EncodedSequence::from_codes(concatenated),
        })
    }

    pub fn len(&self) -> i32 {
        self.codes.len() as i32
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Slice of the encoded sequence covering `[start, end)`.
    pub fn slice(&self, start: i32, end: i32) -> CoreResult<&[u8]> {
        if start < 0 || end > self.len() || start > end {
            return Err(CoreError::Bounds(format!(
                "region [{start},{end}) out of bounds for axis of length {}",
                self.len()
            )));
        }
        Ok(&self.codes.codes()[start as usize..end as usize])
    }
}

/// Cache key for a cross-region comparison: the `x` and `y` sub-ranges
/// being compared. Plain value key — no back-pointers into the plot,
/// so the cache can be dropped or replaced without touching anything
/// it once pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionKey {
    pub x_start: i32,
    pub x_end: i32,
    pub y_start: i32,
    pub y_end: i32,
}

/// Orchestrates comparisons between an `x` and a `y` axis: builds and
/// caches match stores per region, and drives whole-plot persistence.
pub struct Plot {
    pub alphabet: Alphabet,
    pub params: ExtendParams,
    pub x: Axis,
    pub y: Axis,
    store_cache: FxHashMap<RegionKey, (MatchStore, MatchStore)>,
}

impl Plot {
    pub fn new(alphabet: Alphabet, params: ExtendParams, x: Axis, y: Axis) -> Plot {
        Plot {
            alphabet,
            params,
            x,
            y,
            store_cache: FxHashMap::default(),
        }
    }

    pub fn full_region(&self) -> RegionKey {
        RegionKey {
            x_start: 0,
            x_end: self.x.len(),
            y_start: 0,
            y_end: self.y.len(),
        }
    }

    /// Number of regions currently cached.
    pub fn cached_region_count(&self) -> usize {
        self.store_cache.len()
    }

    /// Every cached region and its `(forward, reverse)` stores.
    pub fn store_entries(&self) -> impl Iterator<Item = (&RegionKey, &(MatchStore, MatchStore))> {
        self.store_cache.iter()
    }

    /// Computes and caches every per-record `x`-axis-record ×
    /// `y`-axis-record comparison in parallel, one independent job per
    /// record pair, with a shared `ProgressBar` tracking overall
    /// progress across the fan-out.
    pub fn calculate_all_record_pairs(&mut self) -> CoreResult<()> {
        use rayon::prelude::*;

        let regions: Vec<RegionKey> = self
            .x
            .records
            .iter()
            .flat_map(|xr| {
                self.y.records.iter().map(move |yr| RegionKey {
                    x_start: xr.start,
                    x_end: xr.start + xr.length,
                    y_start: yr.start,
                    y_end: yr.start + yr.length,
                })
            })
            .collect();

        let alphabet = self.alphabet.clone();
        let params = self.params;
        let x_codes = self.x.codes.codes();
        let y_codes = self.y.codes.codes();

        let pb = Arc::new(ProgressBar::new(regions.len() as u64));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("       {bar:40} {pos}/{len} [{elapsed_precise}] {msg}")
                .unwrap(),
        );

        let computed: Vec<CoreResult<(RegionKey, MatchStore, MatchStore)>> = regions
            .par_iter()
            .map(|&region| {
                let x_slice = &x_codes[region.x_start as usize..region.x_end as usize];
                let y_slice = &y_codes[region.y_start as usize..region.y_end as usize];
                let (mut fwd, mut rev) =
                    extender::extend_fast(x_slice, y_slice, &alphabet, &params)?;
                offset_store(&mut fwd, region.x_start, region.y_start);
                offset_store(&mut rev, region.x_start, region.y_start);
                pb.inc(1);
                Ok((region, fwd, rev))
            })
            .collect();
        pb.finish_and_clear();

        for result in computed {
            let (region, fwd, rev) = result?;
            self.store_cache.insert(region, (fwd, rev));
        }
        Ok(())
    }

    /// Returns the `(forward, reverse)` match stores for `region`,
    /// computing and caching them on first use.
    pub fn calculate_dot_store(
        &mut self,
        region: RegionKey,
    ) -> CoreResult<&(MatchStore, MatchStore)> {
        if !self.store_cache.contains_key(&region) {
            let x_slice = self.x.slice(region.x_start, region.x_end)?;
            let y_slice = self.y.slice(region.y_start, region.y_end)?;
            info!(
                x_len = x_slice.len(),
                y_len = y_slice.len(),
                "calculating dot store for region"
            );
            let (mut fwd, mut rev) =
                extender::extend_fast(x_slice, y_slice, &self.alphabet, &self.params)?;
            // Offset back into the axis's global coordinate space.
            offset_store(&mut fwd, region.x_start, region.y_start);
            offset_store(&mut rev, region.x_start, region.y_start);
            self.store_cache.insert(region, (fwd, rev));
        }
        Ok(self.store_cache.get(&region).expect("just inserted"))
    }

    /// Replaces the cached stores for `region` with their `filter`ed
    /// forms.
    pub fn filter(&mut self, region: RegionKey, min_length: i32) -> CoreResult<()> {
        self.calculate_dot_store(region)?;
        let (fwd, rev) = self.store_cache.get(&region).expect("present");
        let filtered = (fwd.filter(min_length), rev.filter(min_length));
        self.store_cache.insert(region, filtered);
        Ok(())
    }

    /// Replaces the cached stores for `region` with their
    /// `interpolate`d forms.
    pub fn interpolate(&mut self, region: RegionKey, window: i32) -> CoreResult<()> {
        self.calculate_dot_store(region)?;
        let (fwd, rev) = self.store_cache.get(&region).expect("present");
        let interpolated = (fwd.interpolate(window), rev.interpolate(window));
        self.store_cache.insert(region, interpolated);
        Ok(())
    }

    /// Conserved-region detection: compares `self.x` against both
    /// `self.y` and `extra`, then runs the per-diagonal sweep over
    /// both comparisons' real matches — diagonal and position are
    /// both preserved, not flattened onto a single axis.
    ///
    /// A region is forward-conserved when `y` and `extra` both hit `x`
    /// in the same strand orientation, and reverse-conserved when they
    /// hit it in opposite orientations; the two same-sign-product
    /// combinations for each are unioned together.
    pub fn conserved_regions(
        &mut self,
        extra: &Axis,
        extra_params: &ExtendParams,
    ) -> CoreResult<(MatchStore, MatchStore)> {
        let region_y = self.full_region();
        self.calculate_dot_store(region_y)?;
        let (y_fwd, y_rev) = self.store_cache.get(&region_y).expect("present").clone();

        let (extra_fwd, extra_rev) = extender::extend_fast(
            self.x.slice(0, self.x.len())?,
            extra.slice(0, extra.len())?,
            &self.alphabet,
            extra_params,
        )?;

        let mut forward = MatchStore::new();
        forward.set_max_x(self.x.len());
        forward.set_max_y(self.x.len());
        for m in conserved::intersect_stores(&[&y_fwd, &extra_fwd])
            .into_iter()
            .chain(conserved::intersect_stores(&[&y_rev, &extra_rev]))
        {
            forward.append(m.x, m.y, m.length);
        }

        let mut reverse = MatchStore::new();
        reverse.set_max_x(self.x.len());
        reverse.set_max_y(self.x.len());
        for m in conserved::intersect_stores(&[&y_fwd, &extra_rev])
            .into_iter()
            .chain(conserved::intersect_stores(&[&y_rev, &extra_fwd]))
        {
            reverse.append(m.x, m.y, m.length);
        }

        Ok((forward, reverse))
    }

    /// Persists the whole plot (parameters, both axes' record tables,
    /// and every cached region's forward/reverse match stores) to `w`,
    /// wrapped in the `_FDP` container.
    pub fn save_to<W: Write>(&self, w: &mut W) -> CoreResult<()> {
        container::write_header(w)?;

        container::write_u32(w, self.params.k)?;
        container::write_u32(w, self.params.window)?;
        container::write_u32(w, self.params.min_match)?;
        container::write_u32(w, self.params.mismatch)?;

        write_axis(w, &self.x)?;
        write_axis(w, &self.y)?;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        container::write_i64(w, timestamp)?;

        container::write_u32(w, self.store_cache.len() as u32)?;
        for (key, (fwd, rev)) in &self.store_cache {
            // `dimension` distinguishes which axis pairing a region key
            // belongs to; a Plot only ever caches its single x-vs-y
            // comparison, so it is always 0 here.
            container::write_i32(w, 0)?;
            container::write_i32(w, key.x_start)?;
            container::write_i32(w, key.x_end)?;
            container::write_i32(w, key.y_start)?;
            container::write_i32(w, key.y_end)?;
            container::write_i32_array(w, &fwd.to_ints())?;
            container::write_i32_array(w, &rev.to_ints())?;
        }

        Ok(())
    }

    /// Loads a plot previously written by [`Plot::save_to`]. The
    /// axes' sequence data itself is not part of the container (only
    /// their id/length bookkeeping is); callers that need the raw
    /// sequences back must re-load the original FASTA inputs.
    pub fn load_from<R: Read>(r: &mut R, alphabet: Alphabet) -> CoreResult<PersistedPlot> {
        container::read_header(r)?;

        let k = container::read_u32(r)?;
        let window = container::read_u32(r)?;
        let min_match = container::read_u32(r)?;
        let mismatch = container::read_u32(r)?;
        let params = ExtendParams::new(k, window, mismatch, min_match)?;

        let x = read_axis(r)?;
        let y = read_axis(r)?;

        let timestamp = container::read_i64(r)?;

        let count = container::read_u32(r)?;
        let mut stores = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let _dimension = container::read_i32(r)?;
            let x_start = container::read_i32(r)?;
            let x_end = container::read_i32(r)?;
            let y_start = container::read_i32(r)?;
            let y_end = container::read_i32(r)?;
            let fwd = MatchStore::from_ints(&container::read_i32_array(r)?)?;
            let rev = MatchStore::from_ints(&container::read_i32_array(r)?)?;
            stores.push((
                RegionKey {
                    x_start,
                    x_end,
                    y_start,
                    y_end,
                },
                fwd,
                rev,
            ));
        }

        Ok(PersistedPlot {
            alphabet,
            params,
            x_records: x,
            y_records: y,
            timestamp,
            stores,
        })
    }
}

/// What [`Plot::load_from`] can recover without re-reading the
/// original FASTA files: parameters, axis bookkeeping, and every
/// persisted region's match stores.
pub struct PersistedPlot {
    pub alphabet: Alphabet,
    pub params: ExtendParams,
    pub x_records: Vec<AxisMeta>,
    pub y_records: Vec<AxisMeta>,
    pub timestamp: i64,
    pub stores: Vec<(RegionKey, MatchStore, MatchStore)>,
}

fn offset_store(store: &mut MatchStore, x_offset: i32, y_offset: i32) {
    let max_x = store.max_x() + x_offset;
    let max_y = store.max_y() + y_offset;
    let shifted: Vec<_> = store
        .iter()
        .map(|m| (m.x + x_offset, m.y + y_offset, m.length))
        .collect();
    *store = MatchStore::new();
    store.set_max_x(max_x);
    store.set_max_y(max_y);
    for (x, y, length) in shifted {
        store.append(x, y, length);
    }
}

fn write_axis<W: Write>(w: &mut W, axis: &Axis) -> CoreResult<()> {
    container::write_u32(w, axis.records.len() as u32)?;
    for rec in &axis.records {
        container::write_str_lp(w, &rec.id)?;
        container::write_i32(w, rec.start)?;
        container::write_i32(w, rec.length)?;
    }
    Ok(())
}

fn read_axis<R: Read>(r: &mut R) -> CoreResult<Vec<AxisMeta>> {
    let count = container::read_u32(r)? as usize;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let id = container::read_str_lp(r)?;
        let start = container::read_i32(r)?;
        let length = container::read_i32(r)?;
        out.push(AxisMeta { id, start, length });
    }
    Ok(out)
}
