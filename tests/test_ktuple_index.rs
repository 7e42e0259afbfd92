use dotplot::alphabet::{tuple_code, Alphabet};
use dotplot::ktuple_index::KTupleIndex;

#[test]
fn finds_repeated_tuples() {
    let a = Alphabet::dna();
    let enc = a.encode(b"ACGTACGT");
    let idx = KTupleIndex::build(enc.codes(), a.len() as u64, 4).unwrap();
    let code = tuple_code(&enc.codes()[0..4], a.len() as u64).unwrap();
    assert_eq!(idx.positions(code), &[0, 4]);
}

#[test]
fn sentinel_poisons_overlapping_windows() {
    let a = Alphabet::dna();
    let enc = a.encode(b"ACGNACGT");
    let idx = KTupleIndex::build(enc.codes(), a.len() as u64, 4).unwrap();
    // Windows [0,4) and [1,5) overlap the N at position 3, so they
    // contribute no entries; only [4,8) is present.
    assert!(idx.positions_for_window(enc.codes(), 0).is_none());
    assert!(idx.positions_for_window(enc.codes(), 1).is_none());
    let pos = idx.positions_for_window(enc.codes(), 4).unwrap();
    assert_eq!(pos, &[4]);
}

#[test]
fn short_sequence_yields_empty_index() {
    let a = Alphabet::dna();
    let enc = a.encode(b"AC");
    let idx = KTupleIndex::build(enc.codes(), a.len() as u64, 4).unwrap();
    assert_eq!(idx.tuple_count(), 256);
    for code in 0..256u64 {
        assert!(idx.positions(code).is_empty());
    }
}

#[test]
fn k_zero_is_rejected() {
    let a = Alphabet::dna();
    let enc = a.encode(b"ACGT");
    assert!(KTupleIndex::build(enc.codes(), a.len() as u64, 0).is_err());
}
