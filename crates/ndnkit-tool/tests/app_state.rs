#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use ndnkit_tool::app_state::AppState;
use ndnkit_tool::config;

fn state(yaml: &str) -> AppState {
    AppState::new(config::load_from_str(yaml).unwrap()).unwrap()
}

#[test]
fn unknown_wire_format_fails_at_startup() {
    let cfg = config::load_from_str("version: 1\nencoding:\n  wire_format: binary-xml\n").unwrap();
    let err = AppState::new(cfg).err().expect("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_FORMAT");
}

#[test]
fn built_interest_carries_config_defaults() {
    let state = state(
        r#"
version: 1
interest:
  lifetime_ms: 2000
  must_be_fresh: true
  scope: 1
"#,
    );
    let interest = state.build_interest("/a/b");
    assert_eq!(
        interest.to_uri(),
        "/a/b?ndn.MustBeFresh=true&ndn.Scope=1&ndn.InterestLifetime=2000.0"
    );
}

#[test]
fn encode_then_decode_through_state() {
    let state = state("version: 1\n");
    let (interest, wire) = state.encode("/hello/world").unwrap();
    assert_eq!(wire.buf().first(), Some(&5));

    let decoded = state.decode(wire.buf()).unwrap();
    assert_eq!(decoded.name(), interest.name());
    assert_eq!(decoded.interest_lifetime_milliseconds(), Some(4000.0));
    assert_eq!(decoded.get_nonce().size(), 4);
}

#[test]
fn decode_rejects_garbage() {
    let state = state("version: 1\n");
    let err = state.decode(&[0x05, 0x10, 0x07]).unwrap_err();
    assert_eq!(err.code().as_str(), "DECODING_ERROR");
}
