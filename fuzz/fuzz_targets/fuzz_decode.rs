#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsonshape::{Decoder, Scanner, ScannerOptions, TokenSource, record};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng; // faster than StdRng
use rand::{Rng, RngCore, SeedableRng};
use serde_json::Map;

const HEADER: usize = 5; // 1 flag byte + 4 bytes picking the nesting limit

thread_local! {
    // One SmallRng per thread, seeded once from the host OS
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r", // JSON core
    "\u{1680}".as_bytes(),
    "\u{2000}".as_bytes(),
    "\u{2001}".as_bytes(),
    "\u{2002}".as_bytes(),
    "\u{2003}".as_bytes(),
    "\u{2004}".as_bytes(),
    "\u{2005}".as_bytes(),
    "\u{2006}".as_bytes(),
    "\u{2007}".as_bytes(),
    "\u{2008}".as_bytes(),
    "\u{2009}".as_bytes(),
    "\u{200A}".as_bytes(),
    "\u{2028}".as_bytes(),
    "\u{2029}".as_bytes(),
    "\u{202F}".as_bytes(),
    "\u{205F}".as_bytes(),
    "\u{3000}".as_bytes(),
];

/// Helper: borrow the thread-local RNG and run a closure with it.
fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x1F); // 5 bits

        // 2) nesting limit
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let mut prefix = HEADER;

        while prefix < size {
            let limit = max_size - prefix;

            prefix += append_whitespace(&mut data[prefix..], limit);
            prefix += append_value(&mut data[prefix..], size, limit);
            prefix += append_whitespace(&mut data[prefix..], limit);
        }

        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Append 1‒N whitespace code-points (N chosen randomly) to `buf`,
/// but never exceed `limit`.  Returns the number of bytes written.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }

        let n_codepoints = rng.random_range(1..=limit.min(8));
        let mut written = 0;

        for _ in 0..n_codepoints {
            let w = WS_TABLE[rng.random_range(0..WS_TABLE.len())];

            // Stop if this whitespace would overflow the caller’s slice.
            if written + w.len() > limit {
                break;
            }

            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        match ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            Ok(value) => break value,
            Err(_) => continue,
        };
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);

    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(serde_json::Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let node_type = u.choose_index(21)?;
        let value = match node_type {
            0 => serde_json::Value::Null,
            1 => serde_json::Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                serde_json::Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => serde_json::Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                serde_json::Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                serde_json::Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

record! {
    #[derive(Debug, Default)]
    struct Probe {
        id: u64,
        name: String,
        tags: Vec<String>,
        score: Option<f32>,
        raw: jsonshape::Bytes,
        extra: jsonshape::Map,
        #[json(embed)]
        nested: Nested,
    }
}

record! {
    #[derive(Debug, Default)]
    struct Nested {
        flag: bool,
        items: Vec<Option<Box<Nested>>>,
        any: jsonshape::Value,
    }
}

fn decode(data: &[u8]) {
    if data.len() < 5 {
        return;
    }

    let flags = data[0];
    let max_depth = 1 + u32::from_le_bytes([data[1], data[2], data[3], data[4]]) as usize % 256;
    let data = &data[5..];

    let options = ScannerOptions {
        allow_multiple_json_values: flags & 1 != 0,
        allow_unicode_whitespace: flags & 4 != 0,
        max_depth,
    };

    // Every root, into a dynamic value and into a typed record.
    let mut scanner = Scanner::from_slice_with_options(data, options);
    while scanner.advance() {
        let mut value = jsonshape::Value::Null;
        let _ = Decoder::new(&mut scanner).decode(&mut value);
    }
    let mut probe = Probe::default();
    let _ = jsonshape::unmarshal(&mut Scanner::from_slice_with_options(data, options), &mut probe);

    // A strict document both sides accept must decode to the same tree.
    if flags & 5 != 0 {
        return;
    }
    let (Ok(ours), Ok(theirs)) = (
        jsonshape::from_slice::<jsonshape::Value>(data),
        serde_json::from_slice::<serde_json::Value>(data),
    ) else {
        return;
    };
    assert!(agrees(&ours, &theirs), "{ours} != {theirs}");
}

fn agrees(ours: &jsonshape::Value, theirs: &serde_json::Value) -> bool {
    use jsonshape::Value as V;
    use serde_json::Value as J;

    match (ours, theirs) {
        (V::Null, J::Null) => true,
        (V::Boolean(a), J::Bool(b)) => a == b,
        (V::Number(a), J::Number(b)) => b
            .as_f64()
            .is_some_and(|b| (a - b).abs() <= 1e-9 * a.abs().max(b.abs())),
        (V::String(a), J::String(b)) => a == b,
        (V::Array(a), J::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| agrees(a, b))
        }
        (V::Object(a), J::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(k, a)| b.get(k).is_some_and(|b| agrees(a, b)))
        }
        _ => false,
    }
}

fuzz_target!(|data: &[u8]| decode(data));
