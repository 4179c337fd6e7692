// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use pretty_assertions::assert_eq;
use std::time::Duration;
use xunit_report::{decode, Assembly, DecodeError, TestCase, TestGroup, TestResult, TestRun};

static COMPLEX_XML: &str = include_str!("fixtures/complex.xml");

fn case(name: &str, result: TestResult, time: Duration) -> TestCase {
    TestCase {
        name: name.to_owned(),
        result,
        time,
    }
}

fn group(name: &str, tests: Vec<TestCase>, groups: Vec<TestGroup>) -> TestGroup {
    TestGroup {
        name: name.to_owned(),
        tests,
        groups,
    }
}

fn scenario(name: &str) -> TestGroup {
    group(
        name,
        vec![],
        vec![group(
            "Sub scenario",
            vec![case("Result", TestResult::Pass, Duration::ZERO)],
            vec![],
        )],
    )
}

fn complex_report() -> TestRun {
    let untraited = group(
        "",
        vec![
            case(
                "A test with a display name.",
                TestResult::Pass,
                Duration::from_millis(10),
            ),
            case("Test method", TestResult::Fail, Duration::from_millis(500)),
            case("Parameterized test method", TestResult::Fail, Duration::ZERO),
        ],
        vec![group(
            "Test class",
            vec![],
            vec![group(
                "Method",
                vec![],
                vec![scenario("Scenario"), scenario("Scenario 2")],
            )],
        )],
    );

    let unit = group(
        "Category - Unit",
        vec![
            case(
                "A test with a display name (with a trait).",
                TestResult::Pass,
                Duration::ZERO,
            ),
            case(
                "A test with a display name (with multiple traits).",
                TestResult::Skip,
                Duration::ZERO,
            ),
        ],
        vec![],
    );

    let slow = group(
        "Timing - Slow",
        vec![case(
            "A test with a display name (with multiple traits).",
            TestResult::Skip,
            Duration::ZERO,
        )],
        vec![],
    );

    TestRun {
        computer: "WIN11".to_owned(),
        user: "Kevin".to_owned(),
        start_rtf: "2000-12-01".to_owned(),
        finish_rtf: "2001-12-01".to_owned(),
        timestamp: "2001-12-02".to_owned(),
        assemblies: vec![
            Assembly {
                name: "app.dll".to_owned(),
                errors: 1,
                passed: 3,
                failed: 2,
                not_run: 4,
                total: 5,
                run_date: "07/10/2023".to_owned(),
                run_time: "20:53:19".to_owned(),
                time: Duration::from_millis(250),
                time_rtf: "2000-12-01".to_owned(),
                test_groups: vec![untraited, unit, slow],
            },
            Assembly {
                name: "Empty.dll".to_owned(),
                ..Default::default()
            },
        ],
    }
}

#[test]
fn complex_document() {
    let report = decode(COMPLEX_XML.as_bytes()).expect("fixture decodes");
    assert_eq!(report, complex_report());
    assert!(report.has_failures());
}

#[test]
fn decoding_is_idempotent() {
    let first = TestRun::from_reader(COMPLEX_XML.as_bytes()).expect("fixture decodes");
    let second = TestRun::from_reader(COMPLEX_XML.as_bytes()).expect("fixture decodes");
    assert_eq!(first, second);
}

#[test]
fn empty_document() {
    let report = TestRun::from_xml_str("<assemblies />").expect("empty document decodes");
    assert_eq!(report, TestRun::default());
    assert!(report.assemblies.is_empty());
    assert!(!report.has_failures());
}

#[test]
fn assembly_without_tests() {
    let report = TestRun::from_xml_str(
        r#"<assemblies><assembly name="/bin/Tests.dll"><collection /></assembly></assemblies>"#,
    )
    .expect("document decodes");
    assert_eq!(report.assemblies.len(), 1);
    assert_eq!(report.assemblies[0].name, "Tests.dll");
    assert!(report.assemblies[0].test_groups.is_empty());
}

#[test]
fn invalid_documents() {
    assert!(matches!(decode(&b""[..]), Err(DecodeError::MissingRoot)));
    assert!(matches!(decode(&b"{}"[..]), Err(DecodeError::MissingRoot)));
    assert!(matches!(
        decode(&b"<testsuites></testsuites>"[..]),
        Err(DecodeError::UnexpectedRoot { .. })
    ));
    assert!(matches!(
        decode(&b"<assemblies><assembly></assemblies>"[..]),
        Err(DecodeError::Xml { .. })
    ));
    assert!(matches!(
        decode(&b"<assemblies name=\"\xff\" />"[..]),
        Err(DecodeError::Xml { .. })
    ));
}

#[test]
fn serializes_to_json() {
    let report = TestRun::from_xml_str(
        r#"<assemblies computer="ci">
             <assembly name="a.dll" passed="1" total="1" time="0.5">
               <collection>
                 <test name="Ns.Type.ReturnsTrue" type="Ns.Type" result="Pass" time="0.25" />
               </collection>
             </assembly>
           </assemblies>"#,
    )
    .expect("document decodes");

    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["computer"], "ci");
    assert_eq!(json["assemblies"][0]["not-run"], 0);
    assert_eq!(json["assemblies"][0]["time"], 0.5);

    let test = &json["assemblies"][0]["test-groups"][0]["tests"][0];
    assert_eq!(test["name"], "Returns true");
    assert_eq!(test["result"], "Pass");
    assert_eq!(test["time"], 0.25);
}
