use anyhow::{Context, Result};
use clap::Parser;
use dotplot::cli::{io as cli_io, Cli};
use dotplot::{Alphabet, Axis, CoreError, ExtendParams, Grid, MatchStore, Plot};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use tracing::info;

/// Concatenates every per-record-pair `(forward, reverse)` store pair
/// into one combined forward store and one combined reverse store for
/// whole-plot image rendering.
fn merge_stores(
    pairs: impl Iterator<Item = (MatchStore, MatchStore)>,
    x_len: i32,
    y_len: i32,
) -> (MatchStore, MatchStore) {
    let mut fwd = MatchStore::new();
    let mut rev = MatchStore::new();
    fwd.set_max_x(x_len);
    fwd.set_max_y(y_len);
    rev.set_max_x(x_len);
    rev.set_max_y(y_len);
    for (f, r) in pairs {
        for m in f.iter() {
            fwd.append(m.x, m.y, m.length);
        }
        for m in r.iter() {
            rev.append(m.x, m.y, m.length);
        }
    }
    (fwd, rev)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run() {
        eprintln!("{e:?}");
        std::process::exit(exit_code_for(&e));
    }
    std::process::exit(0);
}

/// Maps a failure to an exit code: `1` parameter errors, `2`
/// format/bounds errors, `3` I/O errors, `1` as the fallback for
/// anything clap or the CLI layer itself rejected before reaching the
/// core.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(core) = cause.downcast_ref::<CoreError>() {
            return match core {
                CoreError::Parameter(_) => 1,
                CoreError::Format(_) | CoreError::Bounds(_) => 2,
                CoreError::Io(_) => 3,
            };
        }
        if cause.downcast_ref::<std::io::Error>().is_some() {
            return 3;
        }
    }
    1
}

fn run() -> Result<()> {
    let opt = Cli::parse();
    let alphabet = Alphabet::dna();

    let (store_fwd, store_rev, x_len, y_len) = if let Some(load_path) = &opt.load {
        info!(path = ?load_path, "loading plot from container");
        let file = File::open(load_path).context(format!("opening plot container {load_path:?}"))?;
        let mut reader = BufReader::new(file);
        let persisted = Plot::load_from(&mut reader, alphabet)?;
        let x_len = persisted.x_records.iter().map(|r| r.start + r.length).max().unwrap_or(0);
        let y_len = persisted.y_records.iter().map(|r| r.start + r.length).max().unwrap_or(0);
        let (fwd, rev) = merge_stores(persisted.stores.into_iter().map(|(_, f, r)| (f, r)), x_len, y_len);
        (fwd, rev, x_len, y_len)
    } else {
        let params = ExtendParams::new(opt.k, opt.window, opt.mismatch, opt.min_match)?;

        info!(files = ?opt.x_fasta, "reading X axis FASTA input");
        let x_records = cli_io::read_fasta_files(&opt.x_fasta)?;
        info!(files = ?opt.y_fasta, "reading Y axis FASTA input");
        let y_records = cli_io::read_fasta_files(&opt.y_fasta)?;

        let x = Axis::from_records(&x_records, &alphabet)?;
        let y = Axis::from_records(&y_records, &alphabet)?;
        let (x_len, y_len) = (x.len(), y.len());

        let mut plot = Plot::new(alphabet, params, x, y);
        plot.calculate_all_record_pairs()?;

        if let Some(save_path) = &opt.save {
            info!(path = ?save_path, "saving plot to container");
            let file = File::create(save_path).context(format!("creating plot container {save_path:?}"))?;
            let mut writer = BufWriter::new(file);
            plot.save_to(&mut writer)?;
        }

        let (fwd, rev) = merge_stores(
            plot.store_entries().map(|(_, pair)| pair.clone()),
            x_len,
            y_len,
        );
        (fwd, rev, x_len, y_len)
    };

    if let Some(output_path) = &opt.output {
        let (x1, y1, x2, y2) = crop_rectangle(&opt, x_len, y_len)?;
        let longest = (x2 - x1).max(y2 - y1).max(1) as u32;
        let scale = longest.div_ceil(opt.size.max(1));

        let mut grid = Grid::calculate(&store_fwd, x1, y1, x2, y2, scale, opt.window)?;
        let rev_grid = Grid::calculate(&store_rev, x1, y1, x2, y2, scale, opt.window)?;
        grid.add_inplace(&rev_grid)?;

        let (width, height) = (grid.width(), grid.height());
        let luminance = grid.to_luminance();
        cli_io::write_pgm(output_path, width, height, &luminance)?;
        info!(path = ?output_path, width, height, "wrote dot-plot image");
    }

    Ok(())
}

/// Resolves the rendered sub-rectangle from `--crop-x1`/`--crop-y1`/
/// `--crop-x2`/`--crop-y2`, defaulting to the whole `[0, x_len) x [0,
/// y_len)` plot when none are given. All four must be given together.
fn crop_rectangle(opt: &Cli, x_len: i32, y_len: i32) -> Result<(i32, i32, i32, i32), CoreError> {
    let corners = (opt.crop_x1, opt.crop_y1, opt.crop_x2, opt.crop_y2);
    match corners {
        (None, None, None, None) => Ok((0, 0, x_len, y_len)),
        (Some(x1), Some(y1), Some(x2), Some(y2)) => Ok((x1, y1, x2, y2)),
        _ => Err(CoreError::Parameter(
            "--crop-x1, --crop-y1, --crop-x2, and --crop-y2 must all be given together".into(),
        )),
    }
}
