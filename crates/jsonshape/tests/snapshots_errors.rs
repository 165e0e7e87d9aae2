#![allow(missing_docs)]
#![allow(clippy::needless_raw_string_hashes)]

use std::io;

use jsonshape::{DecodeError, Scanner, ScannerOptions, Value, from_reader, from_str, unmarshal};

fn render(err: &DecodeError) -> String {
    match err {
        DecodeError::InvalidDestination => format!("destination: {err}"),
        DecodeError::TypeMismatch(_) => format!("mismatch: {err}"),
        DecodeError::Source(_) => format!("source: {err}"),
        DecodeError::Io(_) => format!("io: {err}"),
    }
}

#[test]
fn snapshot_type_mismatches() {
    insta::assert_snapshot!(render(&from_str::<u32>(r#""7""#).unwrap_err()), @"mismatch: cannot decode string into value of type u32");
    insta::assert_snapshot!(render(&from_str::<bool>("[true]").unwrap_err()), @"mismatch: cannot decode array into value of type bool");
    insta::assert_snapshot!(render(&from_str::<Vec<u8>>(r#"{"a": 1}"#).unwrap_err()), @"mismatch: cannot decode object into value of type alloc::vec::Vec<u8>");
    insta::assert_snapshot!(render(&from_str::<i8>("128").unwrap_err()), @"mismatch: cannot decode number into value of type i8");
    insta::assert_snapshot!(render(&from_str::<Value>("1e999").unwrap_err()), @"mismatch: cannot decode number into value of type jsonshape::value::Value");
}

#[test]
fn snapshot_source_errors() {
    insta::assert_snapshot!(render(&from_str::<Vec<u8>>("[1, 2,]").unwrap_err()), @"source: invalid character ']' at 1:7");
    insta::assert_snapshot!(render(&from_str::<Value>(r#"{"a" 1}"#).unwrap_err()), @"source: expected ':' at 1:6");
    insta::assert_snapshot!(render(&from_str::<Value>("tru").unwrap_err()), @"source: unexpected end of input at 1:4");
    insta::assert_snapshot!(render(&from_str::<i32>("1 2").unwrap_err()), @"source: unexpected trailing input at 1:3");
    insta::assert_snapshot!(render(&from_str::<Value>("\n  [\n  x]").unwrap_err()), @"source: invalid character 'x' at 3:3");
}

#[test]
fn snapshot_source_error_wins() {
    // the mismatch on "x" comes first, the missing comma after 2 wins
    let err = from_str::<Vec<u8>>(r#"["x", 2 3]"#).unwrap_err();
    insta::assert_snapshot!(render(&err), @"source: expected ',' or ']' at 1:9");
}

#[test]
fn snapshot_nesting_limit() {
    let options = ScannerOptions {
        max_depth: 2,
        ..Default::default()
    };
    let mut value = Value::Null;
    let err = unmarshal(&mut Scanner::with_options("[[[]]]", options), &mut value).unwrap_err();
    insta::assert_snapshot!(render(&err), @"source: nesting limit of 2 exceeded at 1:3");
}

#[test]
fn snapshot_destination_and_io() {
    let err = unmarshal(&mut Scanner::new("1"), None::<&mut u8>).unwrap_err();
    insta::assert_snapshot!(render(&err), @"destination: destination must not be nil");

    struct Broken;

    impl io::Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("pipe closed"))
        }
    }

    let err = from_reader::<Value, _>(Broken).unwrap_err();
    insta::assert_snapshot!(render(&err), @"io: pipe closed");
}
