//! The `_FDP` persisted-container format shared by a standalone
//! [`crate::match_store::MatchStore`] save/load and the full
//! [`crate::orchestrator::Plot`] save/load.
//!
//! Packs a `"_FDP"` magic and a `(major, minor)` version pair ahead of
//! an explicit length-prefixed metadata block, rather than an opaque
//! serialized blob, so the format stays readable without pulling in a
//! general-purpose serialization crate.

use crate::error::{CoreError, CoreResult};
use std::io::{Read, Write};

pub const MAGIC: &[u8; 4] = b"_FDP";
pub const MAJOR: i32 = 0;
pub const MINOR: i32 = 1;

pub fn write_header<W: Write>(w: &mut W) -> CoreResult<()> {
    w.write_all(MAGIC)?;
    write_i32(w, MAJOR)?;
    write_i32(w, MINOR)?;
    Ok(())
}

/// Reads and validates the magic, returning `(major, minor)`.
pub fn read_header<R: Read>(r: &mut R) -> CoreResult<(i32, i32)> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)
        .map_err(|e| CoreError::Format(format!("truncated container header: {e}")))?;
    if &magic != MAGIC {
        return Err(CoreError::Format(format!(
            "bad magic: expected {:?}, found {:?}",
            MAGIC, magic
        )));
    }
    let major = read_i32(r)?;
    let minor = read_i32(r)?;
    if major != MAJOR {
        return Err(CoreError::Format(format!(
            "unsupported major version {major} (expected {MAJOR})"
        )));
    }
    Ok((major, minor))
}

pub fn write_i32<W: Write>(w: &mut W, v: i32) -> CoreResult<()> {
    w.write_all(&v.to_ne_bytes())?;
    Ok(())
}

pub fn read_i32<R: Read>(r: &mut R) -> CoreResult<i32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)
        .map_err(|e| CoreError::Format(format!("truncated i32: {e}")))?;
    Ok(i32::from_ne_bytes(buf))
}

pub fn write_u32<W: Write>(w: &mut W, v: u32) -> CoreResult<()> {
    w.write_all(&v.to_ne_bytes())?;
    Ok(())
}

pub fn read_u32<R: Read>(r: &mut R) -> CoreResult<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)
        .map_err(|e| CoreError::Format(format!("truncated u32: {e}")))?;
    Ok(u32::from_ne_bytes(buf))
}

pub fn write_i64<W: Write>(w: &mut W, v: i64) -> CoreResult<()> {
    w.write_all(&v.to_ne_bytes())?;
    Ok(())
}

pub fn read_i64<R: Read>(r: &mut R) -> CoreResult<i64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)
        .map_err(|e| CoreError::Format(format!("truncated i64: {e}")))?;
    Ok(i64::from_ne_bytes(buf))
}

/// Length-prefixed (u32 byte count) string, the metadata-block
/// primitive replacing pickled Python strings.
pub fn write_str_lp<W: Write>(w: &mut W, s: &str) -> CoreResult<()> {
    write_u32(w, s.len() as u32)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

pub fn read_str_lp<R: Read>(r: &mut R) -> CoreResult<String> {
    let len = read_u32(r)? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)
        .map_err(|e| CoreError::Format(format!("truncated string: {e}")))?;
    String::from_utf8(buf).map_err(|e| CoreError::Format(format!("non-utf8 string: {e}")))
}

/// Length-prefixed `i32` array, the primitive the match-store integer
/// buffer (`[max_x, max_y, count, (x,y,length)*count]`) is built from.
pub fn write_i32_array<W: Write>(w: &mut W, values: &[i32]) -> CoreResult<()> {
    write_u32(w, values.len() as u32)?;
    for &v in values {
        write_i32(w, v)?;
    }
    Ok(())
}

pub fn read_i32_array<R: Read>(r: &mut R) -> CoreResult<Vec<i32>> {
    let len = read_u32(r)? as usize;
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        out.push(read_i32(r)?);
    }
    Ok(out)
}
