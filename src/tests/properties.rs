//! Property-based checks of bounds safety and recovery totality.

use super::fixtures::*;
use crate::common::DecodeError;
use crate::project::{Property, decode};
use crate::text::{RecoveryConfig, TextSource, heuristics::scan_payload, recover_text};
use bytes::Bytes;
use proptest::prelude::*;

fn fixture() -> Vec<u8> {
    ProjectFixture::new()
        .folder(1, "Assets", &[comp_item(2, "Nested", &[plain_layer("BG", 0)])])
        .composition(
            3,
            "Main",
            &[text_layer("Title", &utf16z("Opening")), plain_layer("BG", 2)],
        )
        .build()
}

fn text_tree(payloads: Vec<Vec<u8>>) -> Property {
    let mut root = Property::new("ADBE Text Properties");
    for (i, payload) in payloads.into_iter().enumerate() {
        let mut child = Property::new(format!("ADBE Text Child {}", i));
        child.raw = Some(Bytes::from(payload));
        root.children.push(child);
    }
    root
}

const RESERVED: [&str; 5] = ["ADBE", "tdbs", "pard", "-_", "@@"];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn truncation_is_always_reported(cut in 1usize..200) {
        let data = fixture();
        let cut = cut.min(data.len() - 12);
        let result = decode(&data[..data.len() - cut]);
        prop_assert!(result.as_ref().err().is_some_and(DecodeError::is_truncated));
    }

    #[test]
    fn mutations_never_panic(
        edits in proptest::collection::vec((any::<prop::sample::Index>(), any::<u8>()), 1..16)
    ) {
        let mut data = fixture();
        for (index, byte) in edits {
            let at = index.index(data.len());
            data[at] = byte;
        }
        let _ = decode(&data);
    }

    #[test]
    fn random_buffers_never_panic(body in proptest::collection::vec(any::<u8>(), 0..512)) {
        let mut data = b"RIFX".to_vec();
        data.extend_from_slice(&((body.len() + 4) as u32).to_be_bytes());
        data.extend_from_slice(b"Egg!");
        data.extend_from_slice(&body);
        let _ = decode(&data);
    }

    #[test]
    fn recovered_text_is_never_empty(
        payloads in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..256), 0..4)
    ) {
        let doc = recover_text(&text_tree(payloads));
        prop_assert!(!doc.text.is_empty());
    }

    #[test]
    fn reserved_prefixes_are_never_returned(
        prefix in prop::sample::select(RESERVED.to_vec()),
        word in "[A-Za-z ]{0,24}",
        noise in proptest::collection::vec(any::<u8>(), 0..32),
    ) {
        let mut payload = noise;
        payload.extend_from_slice(prefix.as_bytes());
        payload.extend_from_slice(word.as_bytes());
        payload.push(0);
        let doc = recover_text(&text_tree(vec![payload]));
        if doc.source.is_recovered() {
            prop_assert!(RESERVED.iter().all(|p| !doc.text.starts_with(p)), "{:?}", doc.text);
            prop_assert!(!doc.text.contains("::"));
        }
    }

    #[test]
    fn utf16_wins_over_utf8(
        wide in "[b-z][a-z ]{3,20}[a-z]",
        narrow in "[a-z]{8,20}",
    ) {
        prop_assume!(!wide.starts_with("tdbs") && !wide.starts_with("pard"));
        let mut payload = utf16z(&wide);
        payload.extend_from_slice(narrow.as_bytes());
        let found = scan_payload(&payload, &RecoveryConfig::default());
        prop_assert_eq!(found, Some((wide.trim().to_string(), TextSource::Utf16)));
    }
}
