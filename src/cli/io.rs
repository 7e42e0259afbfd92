use anyhow::{Context, Result};
use bio::io::fasta;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads every record out of a FASTA file as `(id, sequence)` pairs,
/// the way `pa-pairwise-aligner`'s `cli::input` module reads its own
/// alignment inputs via `bio::io::fasta::Reader`.
pub fn read_fasta_records(path: &Path) -> Result<Vec<(String, Vec<u8>)>> {
    let reader = fasta::Reader::new(BufReader::new(
        File::open(path).context(format!("opening FASTA file {path:?}"))?,
    ));
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.context(format!("reading FASTA record from {path:?}"))?;
        records.push((record.id().to_string(), record.seq().to_vec()));
    }
    if records.is_empty() {
        anyhow::bail!("{path:?} contains no FASTA records");
    }
    Ok(records)
}

/// Reads every record from each of `paths`, in file order, preserving
/// the order records appear within each file.
pub fn read_fasta_files(paths: &[std::path::PathBuf]) -> Result<Vec<(String, Vec<u8>)>> {
    let mut all = Vec::new();
    for path in paths {
        all.extend(read_fasta_records(path)?);
    }
    Ok(all)
}

/// Writes a row-major byte buffer as a raw (binary) PGM `P5` image —
/// the minimal image format this workspace can write without pulling
/// in an image-encoding crate.
pub fn write_pgm(path: &Path, width: u32, height: u32, pixels: &[u8]) -> Result<()> {
    use std::io::Write;
    let mut f = File::create(path).context(format!("creating image file {path:?}"))?;
    write!(f, "P5\n{width} {height}\n255\n")?;
    f.write_all(pixels)?;
    Ok(())
}
