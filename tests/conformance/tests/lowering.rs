//! Conformance tests for lowering raw filters onto the schema.

use ds_protocol_ldap::{decode, FilterError, ResultCode};
use ds_schema::{AttributeDescription, MatchingRule, Schema, SearchFilter};

fn attr(s: &str) -> AttributeDescription {
    AttributeDescription::parse(s).unwrap()
}

#[test]
fn lowering_parses_attribute_descriptions() {
    let schema = Schema::core();
    let lowered = decode("(cn;lang-fr=Jeanne)")
        .unwrap()
        .to_search_filter(&schema)
        .unwrap();
    assert_eq!(
        lowered,
        SearchFilter::Equality {
            attribute: attr("cn;lang-fr"),
            value: b"Jeanne".to_vec(),
        }
    );
}

#[test]
fn lowering_simplifies_single_component_compounds() {
    let schema = Schema::core();
    let lowered = decode("(&(|(cn=a)))")
        .unwrap()
        .to_search_filter(&schema)
        .unwrap();
    assert_eq!(
        lowered,
        SearchFilter::Equality {
            attribute: attr("cn"),
            value: b"a".to_vec(),
        }
    );
}

#[test]
fn empty_compounds_stay_compound() {
    let schema = Schema::core();
    assert_eq!(
        decode("(&)").unwrap().to_search_filter(&schema).unwrap(),
        SearchFilter::And(Vec::new())
    );
    assert_eq!(
        decode("(|)").unwrap().to_search_filter(&schema).unwrap(),
        SearchFilter::Or(Vec::new())
    );
}

#[test]
fn attribute_descriptions_the_decoder_tolerates_can_still_fail_lowering() {
    let schema = Schema::core();

    // The decoder's charset admits these; RFC 4512 does not.
    for source in ["(9cn=a)", "(cn;=a)", "(>=x)"] {
        let raw = decode(source).unwrap();
        let err = raw.to_search_filter(&schema).unwrap_err();
        assert!(
            matches!(err, FilterError::InvalidAttributeDescription(_)),
            "{source}: unexpected error {err:?}"
        );
        assert_eq!(err.result_code(), ResultCode::ProtocolError);
    }
}

#[test]
fn unknown_matching_rules_map_to_inappropriate_matching() {
    let schema = Schema::core();
    let err = decode("(:dn:noSuchRule:=v)")
        .unwrap()
        .to_search_filter(&schema)
        .unwrap_err();
    assert_eq!(err, FilterError::UnknownMatchingRule("noSuchRule".to_string()));
    assert_eq!(err.result_code(), ResultCode::InappropriateMatching);
    assert_eq!(err.result_code().code(), 18);
}

#[test]
fn matching_rules_resolve_by_name_or_oid_case_insensitively() {
    let schema = Schema::core();
    for source in [
        "(:caseExactMatch:=v)",
        "(:CASEEXACTMATCH:=v)",
        "(:2.5.13.5:=v)",
        "(:dn:caseIgnoreMatch:=v)",
    ] {
        assert!(
            decode(source).unwrap().to_search_filter(&schema).is_ok(),
            "{source} should lower against the core schema"
        );
    }
}

#[test]
fn registered_rules_extend_the_schema() {
    let mut schema = Schema::core();
    assert!(decode("(:wordMatch:=v)")
        .unwrap()
        .to_search_filter(&schema)
        .is_err());

    schema.register(MatchingRule::new(
        "2.5.13.32",
        "wordMatch",
        "1.3.6.1.4.1.1466.115.121.1.15",
    ));
    assert!(decode("(:wordMatch:=v)")
        .unwrap()
        .to_search_filter(&schema)
        .is_ok());
}

#[test]
fn rule_with_attribute_present_is_not_resolved() {
    // Preserved source behaviour: the rule is validated only when the
    // filter names no attribute description.
    let schema = Schema::core();
    let lowered = decode("(cn:stillUnknownRule:=v)")
        .unwrap()
        .to_search_filter(&schema)
        .unwrap();
    assert_eq!(
        lowered,
        SearchFilter::ExtensibleMatch {
            attribute: Some(attr("cn")),
            matching_rule_id: Some("stillUnknownRule".to_string()),
            dn_attributes: false,
            value: b"v".to_vec(),
        }
    );
}

#[test]
fn lowered_filters_serialize() {
    let schema = Schema::core();
    let lowered = decode("(&(cn=a)(sn=*))")
        .unwrap()
        .to_search_filter(&schema)
        .unwrap();
    let json = serde_json::to_string(&lowered).unwrap();
    let back: SearchFilter = serde_json::from_str(&json).unwrap();
    assert_eq!(lowered, back);
}
