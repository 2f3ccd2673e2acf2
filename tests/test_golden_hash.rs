//! Integration tests: golden IR digests for the regression fixtures
//!
//! Any change to compilation, canonical encoding or hashing that alters
//! these digests is a contract change and must be made deliberately.

mod common;

use precision_field::fixtures;
use precision_field::prelude::*;

const MIRROR_SIBLINGS: &str = "e28d969362419568b06295093ac2b9c596c56f862257898c70641f5e0e819295";
const REORDER_SIBLINGS: &str = "01dde8bee8d430fefd3f7a231129481273b3d4ad49594a61084a1eacee3db798";
const NO_DOMAIN: &str = "c5f7066fd0f5c3deedcff0c3112d517be1ad4f8520176cfa5ba2198192287073";
const DEEP_NESTING: &str = "86bb509a996e81d64de5e3e19a110998afbcf3a70ad2e232bb0a3bd8232b35ed";

#[test]
fn golden_gate_passes_for_all_fixtures() {
    let cases = [
        ("Mirror Inheritance", fixtures::mirror_siblings(), MIRROR_SIBLINGS),
        ("Order Determinism", fixtures::reorder_siblings(), REORDER_SIBLINGS),
        ("Domain Toggle", fixtures::no_domain(), NO_DOMAIN),
        ("Deep Tree", fixtures::deep_nesting(), DEEP_NESTING),
    ];
    for (name, tree, expected) in cases {
        match check_golden(name, Some(&tree), expected) {
            Ok(digest) => assert_eq!(digest, expected),
            Err(e) => panic!("{e}"),
        }
    }
}

#[test]
fn mirror_siblings_canonical_text() {
    let text = serialize(&compile(Some(&fixtures::mirror_siblings())));
    assert_eq!(
        text,
        concat!(
            r#"{"rootId":"mirror-root","evaluationOrder":["c1","c2","mirror-root"],"nodes":{"#,
            r#""c1":{"type":"circle","params":{"position":[0.2,0.0],"radius":0.1,"rotation":0.0,"scale":[1.0,1.0]},"domainStack":["mirror-root"],"children":[]},"#,
            r#""c2":{"type":"box","params":{"position":[-0.2,0.2],"rotation":0.0,"scale":[1.0,1.0],"size":[0.1,0.1]},"domainStack":["mirror-root"],"children":[]},"#,
            r#""mirror-root":{"type":"mirror","params":{"axis":"x","blend":0.0,"offset":-0.5},"domainStack":[],"children":["c1","c2"]}}}"#,
        )
    );
    assert_eq!(hash(&text), MIRROR_SIBLINGS);
}

#[test]
fn deep_nesting_domain_stacks() {
    let ir = compile(Some(&fixtures::deep_nesting()));
    assert_eq!(ir.evaluation_order, vec!["leaf", "inner-bend", "mid-mirror", "deep-root"]);
    assert_eq!(ir.nodes["leaf"].domain_stack, vec!["deep-root", "mid-mirror", "inner-bend"]);
    assert_eq!(ir.nodes["inner-bend"].domain_stack, vec!["deep-root", "mid-mirror"]);
    assert!(ir.nodes["deep-root"].domain_stack.is_empty());
}

#[test]
fn sibling_order_changes_digest() {
    assert_ne!(
        fingerprint(Some(&fixtures::mirror_siblings())),
        fingerprint(Some(&fixtures::reorder_siblings()))
    );
}

#[test]
fn domain_removal_changes_stacks() {
    let with = compile(Some(&fixtures::mirror_siblings()));
    let without = compile(Some(&fixtures::no_domain()));
    assert_eq!(with.nodes["c1"].domain_stack, vec!["mirror-root"]);
    assert!(without.nodes["c1"].domain_stack.is_empty());
}

#[test]
fn mismatch_reports_expected_actual_and_snapshot() {
    let tree = fixtures::mirror_siblings();
    let err = check_golden("Mirror Inheritance", Some(&tree), NO_DOMAIN).unwrap_err();
    assert_eq!(err.expected, NO_DOMAIN);
    assert_eq!(err.actual, MIRROR_SIBLINGS);
    assert_eq!(err.snapshot.chars().count(), 300);
    assert!(err.snapshot.starts_with(r#"{"rootId":"mirror-root""#));

    let report = err.to_string();
    assert!(report.contains("Mirror Inheritance"));
    assert!(report.contains(&format!("Expected: {NO_DOMAIN}")));
    assert!(report.contains(&format!("Actual:   {MIRROR_SIBLINGS}")));
}

#[test]
fn digest_is_stable_across_runs() {
    let tree = fixtures::demo_scene();
    let first = fingerprint(Some(&tree));
    for _ in 0..10 {
        assert_eq!(fingerprint(Some(&fixtures::demo_scene())), first);
    }
}
