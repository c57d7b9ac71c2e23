#![cfg(feature = "global-translator")]

//! Integration tests for the `global-translator` feature.
//!
//! The translator is process-wide, so everything that changes the active
//! locale lives in a single test.

use tongue::global::{self, with_translator, with_translator_mut};
use tongue::{Args, Language, SourceKey};

// =========================================================================
// Global translator API
// =========================================================================

#[test]
fn global_translation_round_trip() {
    let pl = Language::parse("pl").unwrap();
    with_translator_mut(|tr| {
        tr.set_translation("%d global file", Some(pl), ["%d plik", "%d pliki", "%d plików"])
    })
    .unwrap();

    global::set_active("pl-PL").unwrap();
    assert_eq!(global::active().to_string(), "pl-PL");
    assert_eq!(
        global::translate("%d global file", Some(22), Args::None).unwrap(),
        "22 pliki"
    );

    assert!(global::set_active("ba").is_err());
    assert_eq!(global::active().to_string(), "pl-PL");
    global::set_active("en").unwrap();
}

#[test]
fn global_misses_are_recorded() {
    let key = "global key nobody translated";
    assert_eq!(global::t(key), key);
    let recorded = with_translator(|tr| {
        tr.repository()
            .misses()
            .any(|(missed, _)| *missed == SourceKey::new(key))
    });
    assert!(recorded);
}
