use dotplot::container::{
    read_header, read_i32_array, read_str_lp, write_header, write_i32_array, write_str_lp, MAJOR,
    MINOR,
};

#[test]
fn header_round_trips() {
    let mut buf = Vec::new();
    write_header(&mut buf).unwrap();
    let (major, minor) = read_header(&mut &buf[..]).unwrap();
    assert_eq!((major, minor), (MAJOR, MINOR));
}

#[test]
fn rejects_bad_magic() {
    let buf = b"XXXX\x00\x00\x00\x00\x01\x00\x00\x00".to_vec();
    assert!(read_header(&mut &buf[..]).is_err());
}

#[test]
fn string_and_array_round_trip() {
    let mut buf = Vec::new();
    write_str_lp(&mut buf, "hello").unwrap();
    write_i32_array(&mut buf, &[1, -2, 3]).unwrap();
    let mut cursor = &buf[..];
    assert_eq!(read_str_lp(&mut cursor).unwrap(), "hello");
    assert_eq!(read_i32_array(&mut cursor).unwrap(), vec![1, -2, 3]);
}
