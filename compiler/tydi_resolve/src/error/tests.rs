use super::*;
use pretty_assertions::assert_eq;

#[test]
fn key_error_converts_to_malformed_key() {
    let err = tydi_ir::key::parse("package__x").unwrap_err();
    let err = ResolveError::from(err);
    assert_eq!(err.code(), "R0001");
    assert_eq!(err.key(), "package__x");
    assert!(matches!(err, ResolveError::MalformedKey { .. }));
}

#[test]
fn display_names_key_and_condition() {
    let err = ResolveError::UnknownReference {
        key: "package_p__S1".to_owned(),
        target: "package_p__Gone".to_owned(),
    };
    assert_eq!(
        err.to_string(),
        "`package_p__S1` references unknown logic type `package_p__Gone`"
    );

    let err = ResolveError::kind_mismatch("streamlet_s__std_in", "Stream", LogicKind::Bit);
    assert_eq!(err.to_string(), "`streamlet_s__std_in`: expected Stream, found Bit");
    assert_eq!(err.code(), "R0008");
}

#[test]
fn codes_are_distinct() {
    let errors = [
        ResolveError::MalformedKey {
            key: String::new(),
            reason: "",
        },
        ResolveError::UnknownReference {
            key: String::new(),
            target: String::new(),
        },
        ResolveError::CycleDetected { key: String::new() },
        ResolveError::UnknownStreamlet {
            key: String::new(),
            streamlet: String::new(),
        },
        ResolveError::UnknownImplementation {
            key: String::new(),
            implementation: String::new(),
        },
        ResolveError::UnknownInstance {
            key: String::new(),
            owner: String::new(),
        },
        ResolveError::UnknownPort {
            key: String::new(),
            owner: String::new(),
            port: String::new(),
        },
        ResolveError::kind_mismatch("", "Stream", LogicKind::Null),
    ];
    let mut codes: Vec<_> = errors.iter().map(ResolveError::code).collect();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}
