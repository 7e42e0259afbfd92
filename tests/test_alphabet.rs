use dotplot::alphabet::{tuple_code, Alphabet};

#[test]
fn encodes_dna_and_normalizes_unknowns() {
    let a = Alphabet::dna();
    let enc = a.encode(b"ACGTacgtN-x");
    assert_eq!(enc.codes(), &[0, 1, 2, 3, 0, 1, 2, 3, 4, 4, 4]);
    assert_eq!(a.sentinel(), 4);
}

#[test]
fn tuple_count_matches_power() {
    let a = Alphabet::dna();
    assert_eq!(a.tuple_count(4).unwrap(), 256);
    assert_eq!(a.tuple_count(1).unwrap(), 4);
}

#[test]
fn tuple_code_detects_poison() {
    assert_eq!(tuple_code(&[0, 1, 2], 4), Some(0 * 16 + 1 * 4 + 2));
    assert_eq!(tuple_code(&[0, 4, 2], 4), None);
}

#[test]
fn reverse_is_literal_not_complemented() {
    let a = Alphabet::dna();
    let enc = a.encode(b"ACGT");
    assert_eq!(enc.reverse().codes(), &[3, 2, 1, 0]);
}

#[test]
fn reverse_complement_of_acgt_is_acgt() {
    let a = Alphabet::dna();
    let enc = a.encode(b"ACGT");
    let rc = enc.reverse_complement(&a).unwrap();
    assert_eq!(rc.codes(), &[0, 1, 2, 3]); // revcomp("ACGT") == "ACGT"
}

#[test]
fn duplicate_symbol_is_rejected() {
    assert!(Alphabet::new(b"AACG").is_err());
}

#[test]
fn oversized_alphabet_is_rejected() {
    let symbols: Vec<u8> = (0u8..33).map(|i| b'A' + i).collect();
    assert!(Alphabet::new(&symbols).is_err());
}
