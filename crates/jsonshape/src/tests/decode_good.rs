use std::collections::{BTreeMap, HashMap};

use rstest::rstest;

use crate::{
    Bytes, DecodeError, Decoder, Kind, Map, ScanError, Scanner, ScannerOptions, TokenSource,
    Value, from_reader, from_slice, from_str, record, unmarshal,
};

fn decode<T: crate::Decode + Default>(input: &str) -> T {
    from_str(input).unwrap_or_else(|err| panic!("decoding {input:?}: {err}"))
}

fn decode_into<T: crate::Decode>(input: &str, mut into: T) -> T {
    unmarshal(&mut Scanner::new(input), &mut into)
        .unwrap_or_else(|err| panic!("decoding {input:?}: {err}"));
    into
}

fn array(items: impl IntoIterator<Item = Value>) -> Value {
    Value::Array(items.into_iter().collect())
}

fn object<'a>(members: impl IntoIterator<Item = (&'a str, Value)>) -> Value {
    Value::Object(
        members
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect(),
    )
}

record! {
    #[derive(Debug, Default, PartialEq)]
    struct Atype {
        int: i64,
        string: String,
        #[json(skip)]
        ignore: String,
        float: f64,
        #[json(rename = "bool")]
        boolean: bool,
        #[json(rename = "Exported")]
        exported: String,
        interface: Value,
    }
}

record! {
    #[derive(Debug, Default, PartialEq)]
    struct Base {
        id: u32,
        name: String,
    }
}

record! {
    #[derive(Debug, Default, PartialEq)]
    struct Derived {
        #[json(embed)]
        base: Base,
        name: String,
        #[json(rename = "Été")]
        summer: u8,
    }
}

record! {
    #[derive(Debug, Default, PartialEq)]
    struct Siblings {
        a: [i64; 1],
        b: i64,
        c: Vec<u8>,
    }
}

record! {
    #[derive(Debug, Default, PartialEq)]
    struct Node {
        value: i32,
        next: Option<Box<Node>>,
    }
}

// ------------------------------------------------------------------------------------------------
// Scalars
// ------------------------------------------------------------------------------------------------

#[rstest]
#[case(r#""hello""#, "hello")]
#[case(r#""""#, "")]
#[case(r#""tab\there""#, "tab\there")]
#[case(r#""été""#, "été")]
#[case(r#""😀""#, "\u{1F600}")]
fn strings(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(decode::<String>(input), expected);
}

#[rstest]
#[case("123", 123)]
#[case("-0", 0)]
#[case("-9223372036854775808", i64::MIN)]
#[case(" \n 7 \t", 7)]
fn signed(#[case] input: &str, #[case] expected: i64) {
    assert_eq!(decode::<i64>(input), expected);
}

#[test]
fn unsigned_and_narrow_widths() {
    assert_eq!(decode::<u64>("123"), 123);
    assert_eq!(decode::<u8>("255"), 255);
    assert_eq!(decode::<i8>("-128"), -128);
    assert_eq!(decode::<usize>("18446744073709551615"), usize::MAX);
}

#[rstest]
#[case("456.789", 456.789)]
#[case("1e3", 1000.0)]
#[case("-2.5E-1", -0.25)]
#[case("123", 123.0)]
fn floats(#[case] input: &str, #[case] expected: f64) {
    assert!((decode::<f64>(input) - expected).abs() < f64::EPSILON);
}

#[test]
fn booleans() {
    assert!(decode::<bool>("true"));
    assert!(!decode_into("false", true));
}

#[test]
fn null_zeroes_any_destination() {
    assert_eq!(decode_into("null", 5u8), 0);
    assert_eq!(decode_into("null", String::from("x")), "");
    assert!(!decode_into("null", true));
    assert_eq!(decode_into("null", vec![1, 2]), Vec::<i32>::new());
    assert_eq!(decode_into("null", [1, 2]), [0, 0]);
    assert_eq!(decode_into("null", Some(3)), None);
    assert_eq!(decode_into("null", Box::new(3)), Box::new(0));
    assert_eq!(decode_into("null", Value::Number(1.0)), Value::Null);
    assert_eq!(decode_into("null", 'x'), '\0');
}

// ------------------------------------------------------------------------------------------------
// Dynamic values
// ------------------------------------------------------------------------------------------------

#[rstest]
#[case(r#""hello""#, Value::String("hello".into()))]
#[case("987.654", Value::Number(987.654))]
#[case("[321]", array([Value::Number(321.0)]))]
#[case("true", Value::Boolean(true))]
#[case("null", Value::Null)]
#[case(r#"{"T":[]}"#, object([("T", array([]))]))]
#[case(r#"{"T":null}"#, object([("T", Value::Null)]))]
#[case(
    r#"{"a": [1, {"b": false}], "c": "d"}"#,
    object([
        ("a", array([Value::Number(1.0), object([("b", Value::Boolean(false))])])),
        ("c", Value::from("d")),
    ])
)]
#[case(r#"{"a": 1, "a": 2}"#, object([("a", Value::Number(2.0))]))]
fn dynamic(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(decode::<Value>(input), expected);
}

#[test]
fn held_values_keep_their_type() {
    assert_eq!(decode_into("2", Value::Number(1.0)), Value::Number(2.0));
    assert_eq!(
        decode_into(r#""new""#, Value::from("old")),
        Value::from("new")
    );

    let held = object([("keep", Value::Boolean(true))]);
    let decoded = decode_into(r#"{"add": 1}"#, held);
    assert_eq!(
        decoded,
        object([("add", Value::Number(1.0)), ("keep", Value::Boolean(true))])
    );
}

#[test]
fn dynamic_map_collects_members() {
    let map: Map = decode(r#"{"x": [1, "y"], "z": null}"#);
    assert_eq!(map.len(), 2);
    assert_eq!(map["x"], array([Value::Number(1.0), Value::from("y")]));
    assert!(map["z"].is_null());
}

// ------------------------------------------------------------------------------------------------
// Sequences
// ------------------------------------------------------------------------------------------------

#[test]
fn fixed_arrays_take_what_fits() {
    assert_eq!(decode::<[i64; 3]>("[1,2,3]"), [1, 2, 3]);
    assert_eq!(decode::<[i64; 1]>("[1,2,3]"), [1]);
    assert_eq!(decode::<[i64; 5]>("[1,2,3]"), [1, 2, 3, 0, 0]);
    assert_eq!(decode_into("[1,2,3]", [9i64; 5]), [1, 2, 3, 9, 9]);
    assert_eq!(decode::<[i64; 0]>("[1, [2], {}]"), [0i64; 0]);
}

#[test]
fn fixed_array_surplus_leaves_siblings_intact() {
    let decoded: Siblings = decode(r#"{"a":[1,[2,[3]],{"x":[4]}],"b":5,"c":[1,2]}"#);
    assert_eq!(
        decoded,
        Siblings {
            a: [1],
            b: 5,
            c: vec![1, 2],
        }
    );

    let nested: Vec<[u8; 1]> = decode("[[1, [9, 9]], [2, {}], [3]]");
    assert_eq!(nested, [[1], [2], [3]]);
}

#[test]
fn lists_match_the_array_length() {
    assert_eq!(decode::<Vec<i64>>("[1,2,3]"), [1, 2, 3]);
    assert_eq!(decode::<Vec<Value>>("[]"), Vec::<Value>::new());
    assert_eq!(decode_into("[1,2]", vec![7u8; 5]), [1, 2]);
    assert_eq!(decode_into("[]", vec![7u8; 5]), Vec::<u8>::new());
    assert_eq!(
        decode::<Vec<Vec<u8>>>("[[1], [], [2, 3]]"),
        [vec![1], vec![], vec![2, 3]]
    );
}

#[test]
fn lists_grow_by_half() {
    let list: Vec<u16> = decode("[1,2,3,4,5]");
    assert_eq!(list, [1, 2, 3, 4, 5]);
    assert!(list.capacity() >= 6);
}

#[test]
fn list_elements_decode_in_place() {
    let existing = vec![
        Base {
            id: 1,
            name: "kept".into(),
        },
        Base::default(),
    ];
    let decoded = decode_into(r#"[{"id": 5}]"#, existing);
    assert_eq!(
        decoded,
        [Base {
            id: 5,
            name: "kept".into(),
        }]
    );
}

#[test]
fn optional_lists_distinguish_null_and_empty() {
    assert_eq!(decode::<Option<Vec<Value>>>("null"), None);
    assert_eq!(decode::<Option<Vec<Value>>>("[]"), Some(vec![]));
}

#[test]
fn bytes_are_base64() {
    assert_eq!(*decode::<Bytes>(r#""aGVsbG8=""#), b"hello");
    assert_eq!(*decode::<Bytes>(r#""""#), b"");
    assert!(decode_into("null", Bytes::from(vec![1])).is_empty());
    // a plain byte vector is a list of numbers
    assert_eq!(decode::<Vec<u8>>("[104, 105]"), b"hi");
}

// ------------------------------------------------------------------------------------------------
// Maps
// ------------------------------------------------------------------------------------------------

#[test]
fn maps_with_text_keys() {
    let scores: BTreeMap<String, i32> = decode(r#"{"b": -2, "a": 1}"#);
    assert_eq!(scores.into_iter().collect::<Vec<_>>(), [
        ("a".to_owned(), 1),
        ("b".to_owned(), -2)
    ]);

    let lists: HashMap<String, Vec<u8>> = decode(r#"{"x": [1], "y": []}"#);
    assert_eq!(lists.len(), 2);
    assert_eq!(lists["x"], [1]);
    assert!(lists["y"].is_empty());
}

#[test]
fn maps_merge_into_existing_entries() {
    let existing = BTreeMap::from([("a".to_owned(), 1u8)]);
    let merged = decode_into(r#"{"b": 2}"#, existing);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged["a"], 1);
    assert_eq!(merged["b"], 2);
}

// ------------------------------------------------------------------------------------------------
// Records
// ------------------------------------------------------------------------------------------------

#[rstest]
#[case(r#"{"int": 123}"#, Atype { int: 123, ..Atype::default() })]
#[case(r#"{"string": "hello"}"#, Atype { string: "hello".into(), ..Atype::default() })]
#[case(r#"{"ignore": "hello"}"#, Atype::default())]
#[case(r#"{"float": 123}"#, Atype { float: 123.0, ..Atype::default() })]
#[case(r#"{"bool": true}"#, Atype { boolean: true, ..Atype::default() })]
#[case(r#"{"bool": false}"#, Atype::default())]
#[case(r#"{"exported": "foo"}"#, Atype { exported: "foo".into(), ..Atype::default() })]
#[case(r#"{"interface": "bar"}"#, Atype { interface: Value::from("bar"), ..Atype::default() })]
#[case(r#"{"interface": [1]}"#, Atype { interface: array([Value::Number(1.0)]), ..Atype::default() })]
#[case(r#"{"INT": 1, "unknown": {"deep": [true]}}"#, Atype { int: 1, ..Atype::default() })]
#[case("{}", Atype::default())]
fn records(#[case] input: &str, #[case] expected: Atype) {
    assert_eq!(decode::<Atype>(input), expected);
}

#[test]
fn records_keep_fields_missing_from_input() {
    let existing = Atype {
        int: 4,
        string: "old".into(),
        ..Atype::default()
    };
    let decoded = decode_into(r#"{"string": "new"}"#, existing);
    assert_eq!(decoded.int, 4);
    assert_eq!(decoded.string, "new");
}

#[test]
fn embedded_fields_are_lifted() {
    let derived: Derived = decode(r#"{"ID": 1, "name": "outer", "ÉTÉ": 3}"#);
    assert_eq!(
        derived,
        Derived {
            base: Base {
                id: 1,
                name: String::new(),
            },
            name: "outer".into(),
            summer: 3,
        }
    );
}

#[test]
fn recursive_records_through_options() {
    let node: Node = decode(r#"{"value": 1, "next": {"value": 2, "next": null}}"#);
    assert_eq!(node.value, 1);
    let Some(next) = node.next else {
        panic!("next was not allocated");
    };
    assert_eq!(next.value, 2);
    assert!(next.next.is_none());
}

#[test]
fn options_allocate_on_demand() {
    assert_eq!(decode::<Option<u8>>("4"), Some(4));
    assert_eq!(decode::<Option<Option<String>>>(r#""s""#), Some(Some("s".into())));
    assert_eq!(decode_into("5", Some(1u8)), Some(5));
    assert_eq!(*decode::<Box<i32>>("-3"), -3);
}

// ------------------------------------------------------------------------------------------------
// Entry points
// ------------------------------------------------------------------------------------------------

#[test]
fn byte_and_reader_inputs() {
    assert_eq!(from_slice::<Vec<u8>>(b"[1, 2]").unwrap(), [1, 2]);
    assert_eq!(
        from_reader::<String, _>(&b"\"read\""[..]).unwrap(),
        "read"
    );
}

#[test]
fn decoder_reads_consecutive_roots() {
    let options = ScannerOptions {
        allow_multiple_json_values: true,
        ..Default::default()
    };
    let mut scanner = Scanner::with_options(r#"{"id": 1} {"id": 2} null"#, options);
    let mut seen = Vec::new();
    while scanner.advance() {
        let mut base = Some(Base::default());
        Decoder::new(&mut scanner).decode(&mut base).unwrap();
        seen.push(base.map(|b| b.id));
    }
    assert_eq!(seen, [Some(1), Some(2), None]);
    assert!(scanner.last_error().is_none());
}

/// A source that never has anything to offer.
struct Exhausted;

impl TokenSource for Exhausted {
    fn advance(&mut self) -> bool {
        false
    }

    fn kind(&self) -> Kind {
        Kind::Null
    }

    fn raw_value(&self) -> &str {
        ""
    }

    fn bool_value(&self) -> bool {
        false
    }

    fn last_error(&self) -> Option<&ScanError> {
        None
    }

    fn depth(&self) -> usize {
        0
    }

    fn next_element(&mut self, _depth: usize) -> bool {
        false
    }

    fn next_member(&mut self, _depth: usize) -> Option<String> {
        None
    }
}

#[test]
fn exhausted_source_leaves_destination_alone() {
    let mut n = 9u8;
    let result: Result<(), DecodeError> = unmarshal(&mut Exhausted, &mut n);
    assert!(result.is_ok());
    assert_eq!(n, 9);
}
