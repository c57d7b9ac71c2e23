//! Integration tests for plural category selection

use proptest::prelude::*;
use tongue::{Language, PluralCategory, PluralRule};

fn cldr(code: &str) -> PluralRule {
    PluralRule::Cldr(Language::parse(code).unwrap())
}

// =============================================================================
// Built-in Families
// =============================================================================

#[test]
fn test_english_family() {
    let rule = PluralRule::ZeroOneOther;
    assert_eq!(rule.category(Some(0)), PluralCategory::Zero);
    assert_eq!(rule.category(Some(1)), PluralCategory::One);
    assert_eq!(rule.category(Some(2)), PluralCategory::Other);
    assert_eq!(rule.category(Some(1000)), PluralCategory::Other);
}

#[test]
fn test_italian_family_has_no_zero() {
    let rule = PluralRule::OneOther;
    assert_eq!(rule.category(Some(0)), PluralCategory::Other);
    assert_eq!(rule.category(Some(1)), PluralCategory::One);
    assert_eq!(rule.category(Some(100)), PluralCategory::Other);
    assert_eq!(rule.category(Some(1000)), PluralCategory::Other);
}

#[test]
fn test_polish_family() {
    let rule = PluralRule::Polish;
    let expected = [
        (0, PluralCategory::Many),
        (1, PluralCategory::One),
        (2, PluralCategory::Few),
        (3, PluralCategory::Few),
        (4, PluralCategory::Few),
        (5, PluralCategory::Many),
        (12, PluralCategory::Many),
        (13, PluralCategory::Many),
        (14, PluralCategory::Many),
        (21, PluralCategory::Many),
        (22, PluralCategory::Few),
        (25, PluralCategory::Many),
        (101, PluralCategory::Many),
        (112, PluralCategory::Many),
        (122, PluralCategory::Few),
    ];
    for (n, category) in expected {
        assert_eq!(rule.category(Some(n)), category, "count {n}");
    }
}

#[test]
fn test_missing_count_uses_general_category() {
    assert_eq!(PluralRule::ZeroOneOther.category(None), PluralCategory::Other);
    assert_eq!(PluralRule::OneOther.category(None), PluralCategory::Other);
    assert_eq!(PluralRule::Polish.category(None), PluralCategory::Many);
    assert_eq!(cldr("ru").category(None), PluralCategory::Other);
}

// =============================================================================
// CLDR Rules
// =============================================================================

#[test]
fn test_cldr_russian() {
    let rule = cldr("ru");
    assert_eq!(rule.category(Some(1)), PluralCategory::One);
    assert_eq!(rule.category(Some(3)), PluralCategory::Few);
    assert_eq!(rule.category(Some(5)), PluralCategory::Many);
    assert_eq!(rule.category(Some(21)), PluralCategory::One);
}

#[test]
fn test_cldr_japanese_has_single_category() {
    let rule = cldr("ja");
    assert_eq!(rule.categories(), vec![PluralCategory::Other]);
    assert_eq!(rule.category(Some(1)), PluralCategory::Other);
}

// =============================================================================
// Indices
// =============================================================================

#[test]
fn test_zero_index_is_always_zero() {
    for rule in [PluralRule::ZeroOneOther, PluralRule::OneOther, PluralRule::Polish] {
        assert_eq!(rule.index(PluralCategory::Zero), Some(0));
        assert_eq!(rule.index(rule.form_categories()[0]), Some(1));
    }
}

#[test]
fn test_form_categories_skip_zero() {
    assert_eq!(
        PluralRule::ZeroOneOther.form_categories(),
        vec![PluralCategory::One, PluralCategory::Other]
    );
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn test_every_count_lands_in_a_declared_category(n in 0i64..1_000_000) {
        for rule in [PluralRule::ZeroOneOther, PluralRule::OneOther, PluralRule::Polish] {
            prop_assert!(rule.categories().contains(&rule.category(Some(n))));
        }
    }

    #[test]
    fn test_polish_depends_only_on_last_two_digits(n in 2i64..1_000_000) {
        let rule = PluralRule::Polish;
        prop_assert_eq!(rule.category(Some(n)), rule.category(Some(n % 100 + 100)));
    }

    #[test]
    fn test_negative_counts_use_general_category(n in i64::MIN..0) {
        prop_assert_eq!(PluralRule::Polish.category(Some(n)), PluralCategory::Many);
        prop_assert_eq!(PluralRule::ZeroOneOther.category(Some(n)), PluralCategory::Other);
    }
}
