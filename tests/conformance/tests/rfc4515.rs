//! RFC 4515 conformance tests for the search-filter codec.
//!
//! Exercises the public decode/print surface end to end: the standard
//! grammar, the deliberate extensions, and the codec laws (round
//! trip, idempotent printing, determinism, escape completeness).

use ds_protocol_ldap::{decode, decode_bytes, Filter, FilterError, FilterKind, ResultCode};

/// Filters whose printed form is identical to their source form.
const CANONICAL_FILTERS: &[&str] = &[
    "(cn=Jane Doe)",
    "(objectclass=*)",
    "(&(cn=a)(sn=b))",
    "(|(cn=a)(sn=b))",
    "(!(cn=a))",
    "(&)",
    "(|)",
    "(&(|(cn=a)(cn=b))(!(sn=c)))",
    "(cn=Jo*n*)",
    "(cn=*son)",
    "(cn=a**b)",
    "(cn=*a*b*c*)",
    "(uidNumber>=1000)",
    "(uidNumber<=2000)",
    "(sn~=Smith)",
    "(cn;lang-fr=Jeanne)",
    "(cn=)",
    "(cn:caseExactMatch:=Foo)",
    "(:dn:2.5.13.5:=Foo)",
    "(cn:dn:=Foo)",
    "(o:dn:caseIgnoreMatch:=Acme)",
];

#[test]
fn canonical_filters_round_trip_byte_for_byte() {
    for source in CANONICAL_FILTERS {
        let filter = decode(source).unwrap_or_else(|e| panic!("{source}: {e}"));
        assert_eq!(
            filter.to_filter_bytes(),
            source.as_bytes(),
            "printing {source} changed its form"
        );
    }
}

#[test]
fn decode_print_decode_preserves_structure() {
    let sources = [
        "(cn=Jane Doe)",
        "(cn=Jo*n*)",
        "(cn=a\\2a\\28\\29\\5c\\00b)",
        "(cn=\\ff)",
        "(&(objectclass=person)(|(cn=a*)(sn=*b)))",
        "(o:DN:caseIgnoreMatch:=Acme)",
    ];
    for source in sources {
        let first = decode(source).unwrap();
        let printed = first.to_filter_bytes();
        let second = decode_bytes(&printed).unwrap();
        assert_eq!(first, second, "round trip of {source} changed the filter");
    }
}

#[test]
fn printing_is_idempotent() {
    for source in CANONICAL_FILTERS {
        let printed = decode(source).unwrap().to_filter_bytes();
        let reprinted = decode_bytes(&printed).unwrap().to_filter_bytes();
        assert_eq!(printed, reprinted);
    }
}

#[test]
fn decoding_is_a_pure_function() {
    for source in CANONICAL_FILTERS {
        assert_eq!(decode(source).unwrap(), decode(source).unwrap());
    }
}

#[test]
fn every_octet_survives_an_escape_round_trip() {
    for b in 0..=u8::MAX {
        let source = format!("(a=\\{b:02x})");
        let filter = decode(&source).unwrap_or_else(|e| panic!("{source}: {e}"));
        assert_eq!(filter, Filter::equality("a", vec![b]), "octet {b:#04x}");

        let upper = format!("(a=\\{b:02X})");
        assert_eq!(decode(&upper).unwrap(), filter, "octet {b:#04x} uppercase");
    }
}

#[test]
fn printed_escapes_reparse_to_the_same_octet() {
    for b in 0..=u8::MAX {
        let filter = Filter::equality("a", vec![b]);
        let printed = filter.to_filter_bytes();
        assert_eq!(decode_bytes(&printed).unwrap(), filter, "octet {b:#04x}");
    }
}

#[test]
fn attribute_alphabet_is_accepted() {
    // Every allowed byte class, including the underscore extension
    // and the option separator.
    let filter = decode("(ABCxyz0189-_;opt=v)").unwrap();
    assert_eq!(filter, Filter::equality("ABCxyz0189-_;opt", b"v"));
}

#[test]
fn bytes_outside_the_attribute_alphabet_are_rejected() {
    for source in ["(c n=v)", "(cn?=v)", "(cn.=v)", "(c@n=v)", "(cn[0]=v)"] {
        let err = decode(source).unwrap_err();
        assert!(
            matches!(err, FilterError::InvalidCharInAttrType { .. }),
            "{source}: unexpected error {err:?}"
        );
        assert_eq!(err.result_code(), ResultCode::ProtocolError);
    }
}

#[test]
fn not_filters_take_exactly_one_component() {
    assert!(matches!(
        decode("(!(cn=a)(sn=b))").unwrap_err(),
        FilterError::NotRequiresExactlyOne { .. }
    ));
    assert!(matches!(
        decode("(!)").unwrap_err(),
        FilterError::NotRequiresExactlyOne { .. }
    ));
}

#[test]
fn empty_compounds_are_absolute_filters() {
    assert_eq!(decode("(&)").unwrap(), Filter::and(Vec::new()));
    assert_eq!(decode("(|)").unwrap(), Filter::or(Vec::new()));
}

#[test]
fn scenario_table() {
    // The concrete scenarios of the codec contract, one assertion per
    // row.
    assert_eq!(
        decode("(cn=Jane Doe)").unwrap(),
        Filter::equality("cn", b"Jane Doe")
    );
    assert_eq!(decode("(objectclass=*)").unwrap(), Filter::present("objectclass"));
    assert_eq!(
        decode("(&(cn=a)(sn=b))").unwrap(),
        Filter::and(vec![Filter::equality("cn", b"a"), Filter::equality("sn", b"b")])
    );
    assert_eq!(
        decode("(!(cn=a))").unwrap(),
        Filter::not(Filter::equality("cn", b"a"))
    );
    assert_eq!(
        decode("(cn=Jo*n*)").unwrap(),
        Filter::substring("cn", Some(b"Jo".to_vec()), vec![b"n".to_vec()], None)
    );
    assert_eq!(
        decode("(cn:caseExactMatch:=Foo)").unwrap(),
        Filter::extensible(
            Some("cn".to_string()),
            Some("caseExactMatch".to_string()),
            false,
            b"Foo"
        )
    );
    assert_eq!(
        decode("(:dn:2.5.13.5:=Foo)").unwrap(),
        Filter::extensible(None, Some("2.5.13.5".to_string()), true, b"Foo")
    );
    assert_eq!(
        decode("(cn=a\\2ab)").unwrap(),
        Filter::equality("cn", vec![0x61, 0x2A, 0x62])
    );
    assert_eq!(
        decode("(cn=a\\zz)").unwrap_err(),
        FilterError::InvalidEscapedByte {
            filter: "(cn=a\\zz)".to_string(),
            position: 6,
        }
    );
}

#[test]
fn quoting_mistakes_get_a_dedicated_error() {
    assert!(matches!(
        decode("'(cn=a)'").unwrap_err(),
        FilterError::EnclosedInApostrophes(_)
    ));
}

#[test]
fn relational_lone_asterisk_collapses_to_presence() {
    // Preserved source behaviour: the presence check runs after the
    // operator is chosen.
    for source in ["(cn=*)", "(cn>=*)", "(cn<=*)", "(cn~=*)"] {
        assert_eq!(decode(source).unwrap(), Filter::present("cn"), "{source}");
    }
}

#[test]
fn objectclass_present_helper_matches_the_decoded_form() {
    assert_eq!(
        Filter::objectclass_present(),
        &decode("(objectclass=*)").unwrap()
    );
}

#[test]
fn kinds_are_reported_per_variant() {
    assert_eq!(decode("(&)").unwrap().kind(), FilterKind::And);
    assert_eq!(decode("(cn=*)").unwrap().kind(), FilterKind::Present);
    assert_eq!(decode("(cn=a*)").unwrap().kind(), FilterKind::Substring);
    assert_eq!(
        decode("(cn:=v)").unwrap().kind(),
        FilterKind::ExtensibleMatch
    );
}

#[test]
fn filters_serialize_and_deserialize() {
    let filter = decode("(&(cn=Jo*n*)(:dn:2.5.13.5:=Foo))").unwrap();
    let json = serde_json::to_string(&filter).unwrap();
    let back: Filter = serde_json::from_str(&json).unwrap();
    assert_eq!(filter, back);
}
