//! NDN-TLV Interest vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use ndnkit_core::Interest;

use vector_loader::TestVector;

fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

#[test]
fn interest_vectors() {
    let files = [
        "interest_minimal.json",
        "interest_selectors.json",
        "interest_full.json",
        "interest_truncated.json",
        "interest_missing_nonce.json",
        "interest_wrong_outer_type.json",
        "interest_trailing_bytes.json",
        "interest_bad_integer_len.json",
    ];

    for f in files {
        let v = load(f);
        let raw = v.wire.decode();
        let mut interest = Interest::new("/untouched");
        let res = interest.wire_decode(&raw, None);

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.code().as_str(), err.code, "vector={}", v.description);
            assert_eq!(interest.to_uri(), "/untouched", "vector={}", v.description);
            continue;
        }

        res.expect("expected ok interest");
        let ex = v.expect.expect("missing expect block");

        assert_eq!(interest.name().to_uri(), ex["name"].as_str().unwrap(), "vector={}", v.description);
        assert_eq!(interest.get_nonce().size() as u64, ex["nonce_len"].as_u64().unwrap(), "vector={}", v.description);
        assert_eq!(interest.to_uri(), ex["uri"].as_str().unwrap(), "vector={}", v.description);
    }
}

#[test]
fn encoding_reproduces_vector_bytes() {
    for f in ["interest_minimal.json", "interest_selectors.json", "interest_full.json"] {
        let v = load(f);
        let raw = v.wire.decode();
        let mut interest = Interest::default();
        interest.wire_decode(&raw, None).unwrap();

        let encoded = interest.wire_encode(None).unwrap();
        assert_eq!(encoded.buf(), raw.as_slice(), "vector={}", v.description);
    }
}
