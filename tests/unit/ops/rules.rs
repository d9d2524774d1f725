use super::*;

#[test]
fn identifiers_follow_declaration_order() {
    assert_eq!(CombinationRule::ALL.len(), 42);
    for (i, rule) in CombinationRule::ALL.iter().enumerate() {
        assert_eq!(rule.id() as usize, i);
    }
    assert_eq!(CombinationRule::AddWord.id(), 18);
    assert_eq!(CombinationRule::RgbComponentAlpha.id(), 41);
    assert_eq!(MatchRule::NotAMatchB.id(), 2);
}

#[test]
fn names_round_trip_through_from_str() {
    for rule in CombinationRule::ALL {
        assert_eq!(rule.name().parse::<CombinationRule>().unwrap(), *rule);
    }
    for rule in MatchRule::ALL {
        assert_eq!(rule.to_string().parse::<MatchRule>().unwrap(), *rule);
    }
}

#[test]
fn unknown_names_are_configuration_errors() {
    let err = "bitNand".parse::<CombinationRule>().unwrap_err();
    assert!(matches!(err, BlitError::Config(_)));
    assert!(err.to_string().contains("bitNand"));
    assert!("pixelmatch".parse::<MatchRule>().is_err());
}

#[test]
fn truth_tables_match_the_rule_names() {
    let eval = |rule: CombinationRule, s: u8, d: u8| {
        (rule.truth_table().unwrap() >> ((s << 1) | d)) & 1
    };
    for s in 0..2u8 {
        for d in 0..2u8 {
            assert_eq!(eval(CombinationRule::ClearWord, s, d), 0);
            assert_eq!(eval(CombinationRule::BitAnd, s, d), s & d);
            assert_eq!(eval(CombinationRule::BitAndInvert, s, d), s & (1 - d));
            assert_eq!(eval(CombinationRule::SourceWord, s, d), s);
            assert_eq!(eval(CombinationRule::BitInvertAnd, s, d), (1 - s) & d);
            assert_eq!(eval(CombinationRule::DestinationWord, s, d), d);
            assert_eq!(eval(CombinationRule::BitXor, s, d), s ^ d);
            assert_eq!(eval(CombinationRule::BitOr, s, d), s | d);
            assert_eq!(eval(CombinationRule::BitInvertAndInvert, s, d), (1 - s) & (1 - d));
            assert_eq!(eval(CombinationRule::BitInvertXor, s, d), (1 - s) ^ d);
            assert_eq!(eval(CombinationRule::BitInvertDestination, s, d), 1 - d);
            assert_eq!(eval(CombinationRule::BitOrInvert, s, d), s | (1 - d));
            assert_eq!(eval(CombinationRule::BitInvertSource, s, d), 1 - s);
            assert_eq!(eval(CombinationRule::BitInvertOr, s, d), (1 - s) | d);
            assert_eq!(eval(CombinationRule::BitInvertOrInvert, s, d), (1 - s) | (1 - d));
            assert_eq!(eval(CombinationRule::DestinationWordAlt2, s, d), d);
        }
    }
    assert_eq!(CombinationRule::AlphaBlend.truth_table(), None);
}

#[test]
fn halftone_is_ignored_by_source_free_rules() {
    let ignoring: Vec<_> = CombinationRule::ALL
        .iter()
        .filter(|r| r.ignores_halftone())
        .collect();
    assert_eq!(ignoring.len(), 3);
}

#[test]
fn only_the_tally_rules_write_the_lookup_table() {
    let writers: Vec<_> = CombinationRule::ALL
        .iter()
        .copied()
        .filter(|r| r.writes_lookup_table())
        .collect();
    assert_eq!(
        writers,
        [CombinationRule::OldTallyIntoMap, CombinationRule::TallyIntoMap]
    );
}
