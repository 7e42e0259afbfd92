use dotplot::alphabet::Alphabet;
use dotplot::extender::ExtendParams;
use dotplot::orchestrator::{Axis, Plot};

fn axis(seqs: &[(&str, &str)], alphabet: &Alphabet) -> Axis {
    let records: Vec<(String, Vec<u8>)> = seqs
        .iter()
        .map(|(id, s)| (id.to_string(), s.as_bytes().to_vec()))
        .collect();
    Axis::from_records(&records, alphabet).unwrap()
}

#[test]
fn axis_records_prefix_sum_their_starts() {
    let a = Alphabet::dna();
    let axis = axis(&[("r1", "ACGT"), ("r2", "ACGTACGT")], &a);
    assert_eq!(axis.records[0].start, 0);
    assert_eq!(axis.records[1].start, 4);
    assert_eq!(axis.len(), 12);
}

#[test]
fn calculate_dot_store_is_cached() {
    let a = Alphabet::dna();
    let x = axis(&[("x", "ACGTACGTACGT")], &a);
    let y = axis(&[("y", "ACGTACGTACGT")], &a);
    let params = ExtendParams::new(4, 4, 0, 4).unwrap();
    let mut plot = Plot::new(a, params, x, y);
    let region = plot.full_region();
    let (fwd, _) = plot.calculate_dot_store(region).unwrap().clone();
    assert!(!fwd.is_empty());
    assert_eq!(plot.cached_region_count(), 1);
    plot.calculate_dot_store(region).unwrap();
    assert_eq!(plot.cached_region_count(), 1, "second call reuses the cache entry");
}

#[test]
fn plot_round_trips_through_fdp_container() {
    let a = Alphabet::dna();
    let x = axis(&[("x", "ACGTACGTACGT")], &a);
    let y = axis(&[("y", "ACGTACGTACGT")], &a);
    let params = ExtendParams::new(4, 4, 0, 4).unwrap();
    let mut plot = Plot::new(a, params, x, y);
    let region = plot.full_region();
    plot.calculate_dot_store(region).unwrap();

    let mut buf = Vec::new();
    plot.save_to(&mut buf).unwrap();

    let loaded = Plot::load_from(&mut &buf[..], Alphabet::dna()).unwrap();
    assert_eq!(loaded.stores.len(), 1);
    assert_eq!(loaded.x_records[0].id, "x");
    assert_eq!(loaded.params.k, 4);
}

#[test]
fn conserved_regions_preserves_off_main_diagonal_matches() {
    // y and extra both carry the same "TTTT" prefix before the repeat
    // shared with x, so their matches against x sit on diagonal -4,
    // not the main diagonal; a real three-way sweep must still find
    // them there instead of collapsing the result onto x == y.
    let a = Alphabet::dna();
    let x = axis(&[("x", "ACGTACGTACGTACGT")], &a);
    let y = axis(&[("y", "TTTTACGTACGTACGTACGT")], &a);
    let extra = axis(&[("e", "TTTTACGTACGTACGTACGT")], &Alphabet::dna());
    let params = ExtendParams::new(4, 4, 0, 8).unwrap();
    let extra_params = ExtendParams::new(4, 4, 0, 8).unwrap();
    let mut plot = Plot::new(a, params, x, y);

    let (forward, _reverse) = plot.conserved_regions(&extra, &extra_params).unwrap();
    let off_diagonal = forward.iter().find(|m| m.x != m.y);
    assert!(
        off_diagonal.is_some(),
        "conserved region should surface on its true diagonal, not be forced onto x == y"
    );
    assert_eq!(off_diagonal.unwrap().diagonal(), -4);
}

#[test]
fn filter_and_interpolate_replace_the_cached_region() {
    let a = Alphabet::dna();
    let x = axis(&[("x", "ACGTACGTACGTACGTACGT")], &a);
    let y = axis(&[("y", "ACGTACGTACGTACGTACGT")], &a);
    let params = ExtendParams::new(4, 4, 0, 4).unwrap();
    let mut plot = Plot::new(a, params, x, y);
    let region = plot.full_region();
    plot.calculate_dot_store(region).unwrap();
    plot.filter(region, 1000).unwrap();
    let (fwd, _) = plot.calculate_dot_store(region).unwrap().clone();
    assert!(fwd.is_empty(), "filtering with an unreachable min length empties the store");
}
