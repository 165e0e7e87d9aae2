#![allow(missing_docs)]
#![allow(clippy::needless_raw_string_hashes)]

/// A structured tool-call response with nested objects and arrays.
pub const ORIGINAL: &str = r#"
{
    "moderation": {
        "decision": "allow",
        "reason": null
    },
    "request": {
        "filename": "example.rs",
        "language": "rust",
        "options": {
            "opt_level": "2",
            "features": [
                "serde",
                "tokio"
            ]
        }
    },
    "snippets": [
        "fn main() {}",
        "println!(\"hi\")"
    ],
    "entities": [
        {
            "type": "function",
            "name": "main"
        },
        {
            "type": "macro",
            "name": "println"
        }
    ],
    "matrix": [
        [
            "a"
        ]
    ],
    "mixed": [
        "s",
        {
            "k": "v"
        },
        "t",
        [
            "u"
        ],
        "end"
    ],
    "trailing": {
        "status": "ok"
    },
    "object_in_array_last": [
        {
            "a": 1
        }
    ],
    "nested_objects": {
        "outer": {
            "inner": 1
        }
    }
}"#;

#[test]
fn fixture_agrees_with_serde_json() {
    let ours: jsonshape::Value = jsonshape::from_str(ORIGINAL).unwrap();
    let theirs: serde_json::Value = serde_json::from_str(ORIGINAL).unwrap();

    let ours: serde_json::Value = serde_json::from_str(&ours.to_string()).unwrap();
    assert_eq!(ours, theirs);
}
