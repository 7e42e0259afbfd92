use crate::container;
use crate::error::{CoreError, CoreResult};
use fxhash::FxHashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// One ungapped diagonal match: `y..y+length` aligns to `x..x+length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub x: i32,
    pub y: i32,
    pub length: i32,
}

impl Match {
    pub fn diagonal(&self) -> i32 {
        self.x - self.y
    }
}

/// Growable container of diagonal matches plus the bounding extents of
/// the two sequences it was built against.
#[derive(Debug, Clone, Default)]
pub struct MatchStore {
    matches: Vec<Match>,
    max_x: i32,
    max_y: i32,
}

impl MatchStore {
    pub fn new() -> Self {
        MatchStore::default()
    }

    pub fn append(&mut self, x: i32, y: i32, length: i32) {
        self.matches.push(Match { x, y, length });
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<Match> {
        self.matches.get(i).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter()
    }

    pub fn set_max_x(&mut self, v: i32) {
        self.max_x = v;
    }

    pub fn set_max_y(&mut self, v: i32) {
        self.max_y = v;
    }

    pub fn max_x(&self) -> i32 {
        self.max_x
    }

    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    /// Groups match indices by diagonal `x - y`, the index the
    /// conserved-region sweep and `interpolate` both walk over. Each
    /// bucket's indices are sorted by `x` ascending.
    pub fn build_anti_diagonal_index(&self) -> FxHashMap<i32, Vec<usize>> {
        let mut index: FxHashMap<i32, Vec<usize>> = FxHashMap::default();
        for (i, m) in self.matches.iter().enumerate() {
            index.entry(m.diagonal()).or_default().push(i);
        }
        for bucket in index.values_mut() {
            bucket.sort_by_key(|&i| self.matches[i].x);
        }
        index
    }

    /// Drops every match shorter than `min_length`.
    pub fn filter(&self, min_length: i32) -> MatchStore {
        MatchStore {
            matches: self
                .matches
                .iter()
                .filter(|m| m.length >= min_length)
                .copied()
                .collect(),
            max_x: self.max_x,
            max_y: self.max_y,
        }
    }

    /// Merges matches on the same diagonal separated by a gap of at
    /// most `window` positions into one longer match.
    pub fn interpolate(&self, window: i32) -> MatchStore {
        let diag_index = self.build_anti_diagonal_index();
        let mut merged = Vec::with_capacity(self.matches.len());

        let mut diagonals: Vec<&i32> = diag_index.keys().collect();
        diagonals.sort_unstable();

        for diag in diagonals {
            let members: Vec<Match> = diag_index[diag].iter().map(|&i| self.matches[i]).collect();

            let mut current = members[0];
            for next in members.into_iter().skip(1) {
                let gap = next.x - (current.x + current.length);
                if gap <= window {
                    let end = (current.x + current.length).max(next.x + next.length);
                    current.length = end - current.x;
                } else {
                    merged.push(current);
                    current = next;
                }
            }
            merged.push(current);
        }

        MatchStore {
            matches: merged,
            max_x: self.max_x,
            max_y: self.max_y,
        }
    }

    /// Flips every match's Y coordinate against a sequence of length
    /// `height`, the reverse-strand projection used when routing
    /// conserved-region sign combinations.
    pub fn flip_y(&self, height: i32) -> MatchStore {
        MatchStore {
            matches: self
                .matches
                .iter()
                .map(|m| Match {
                    x: m.x,
                    y: height - (m.y + m.length),
                    length: m.length,
                })
                .collect(),
            max_x: self.max_x,
            max_y: height,
        }
    }

    /// Serializes to the flat integer buffer layout
    /// `[max_x, max_y, count, (x,y,length)*count]`.
    pub fn to_ints(&self) -> Vec<i32> {
        let mut out = Vec::with_capacity(3 + 3 * self.matches.len());
        out.push(self.max_x);
        out.push(self.max_y);
        out.push(self.matches.len() as i32);
        for m in &self.matches {
            out.push(m.x);
            out.push(m.y);
            out.push(m.length);
        }
        out
    }

    pub fn from_ints(buf: &[i32]) -> CoreResult<MatchStore> {
        if buf.len() < 3 {
            return Err(CoreError::Format(
                "match-store buffer shorter than its 3-word header".into(),
            ));
        }
        let max_x = buf[0];
        let max_y = buf[1];
        let count = buf[2];
        if count < 0 {
            return Err(CoreError::Format("negative match count".into()));
        }
        let count = count as usize;
        if buf.len() != 3 + 3 * count {
            return Err(CoreError::Format(format!(
                "match-store buffer length {} does not match header count {}",
                buf.len(),
                count
            )));
        }
        let mut matches = Vec::with_capacity(count);
        for i in 0..count {
            let base = 3 + 3 * i;
            matches.push(Match {
                x: buf[base],
                y: buf[base + 1],
                length: buf[base + 2],
            });
        }
        Ok(MatchStore {
            matches,
            max_x,
            max_y,
        })
    }

    /// Writes this store, wrapped in the `_FDP` container header, to
    /// `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> CoreResult<()> {
        let file = File::create(path.as_ref())?;
        let mut w = BufWriter::new(file);
        self.write_to(&mut w)
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> CoreResult<()> {
        container::write_header(w)?;
        container::write_i32_array(w, &self.to_ints())?;
        Ok(())
    }

    /// Loads a store previously written by [`MatchStore::save`].
    pub fn load(path: impl AsRef<Path>) -> CoreResult<MatchStore> {
        let file = File::open(path.as_ref())?;
        let mut r = BufReader::new(file);
        Self::read_from(&mut r)
    }

    pub fn read_from<R: Read>(r: &mut R) -> CoreResult<MatchStore> {
        container::read_header(r)?;
        let buf = container::read_i32_array(r)?;
        MatchStore::from_ints(&buf)
    }
}
