use extkit_core::{
    determine_line_endings, normalize_line_endings, normalize_line_endings_legacy, ExtError,
    LineEndingStyle,
};

const CONCRETE_STYLES: [LineEndingStyle; 4] = [
    LineEndingStyle::None,
    LineEndingStyle::Unix,
    LineEndingStyle::Windows,
    LineEndingStyle::Mac,
];

#[test]
fn classification_matches_reference_samples() {
    let cases = [
        ("a\nb\nc\n", LineEndingStyle::Unix),
        ("a\r\nb\r\nc\r\n", LineEndingStyle::Windows),
        ("a\rb\rc\r", LineEndingStyle::Mac),
        ("a\nb\r\nc\r", LineEndingStyle::Mixed),
        ("abc", LineEndingStyle::None),
        ("", LineEndingStyle::None),
    ];
    for (input, expected) in cases {
        assert_eq!(determine_line_endings(input), expected, "input {input:?}");
    }
}

#[test]
fn normalizes_mixed_input_to_unix() {
    let normalized =
        normalize_line_endings("a\r\nb\rc\n", LineEndingStyle::Unix).expect("unix is a target");
    assert_eq!(normalized, "a\nb\nc\n");
}

#[test]
fn normalization_is_idempotent_for_every_target() {
    let inputs = ["", "plain", "a\r\nb\rc\n", "\r\r\n\n\r", "x\n\ny\r\n"];
    for input in inputs {
        for style in CONCRETE_STYLES {
            let once = normalize_line_endings(input, style).expect("concrete target");
            let twice = normalize_line_endings(&once, style).expect("concrete target");
            assert_eq!(once, twice, "input {input:?} style {style}");
        }
    }
}

#[test]
fn normalized_text_classifies_as_its_target() {
    let input = "one\r\ntwo\rthree\nfour";
    for style in [
        LineEndingStyle::Unix,
        LineEndingStyle::Windows,
        LineEndingStyle::Mac,
        LineEndingStyle::None,
    ] {
        let normalized = normalize_line_endings(input, style).expect("concrete target");
        assert_eq!(determine_line_endings(&normalized), style);
    }
}

#[test]
fn mixed_is_rejected_as_target_but_kept_by_legacy_shim() {
    let err = normalize_line_endings("a\rb", LineEndingStyle::Mixed)
        .expect_err("mixed target must fail");
    assert!(matches!(err, ExtError::InvalidArgument { .. }));

    assert_eq!(
        normalize_line_endings_legacy("a\rb", LineEndingStyle::Mixed),
        "a\nb"
    );
}

#[test]
fn unknown_style_values_are_not_implemented() {
    assert!(matches!(
        "dos".parse::<LineEndingStyle>(),
        Err(ExtError::NotImplemented(_))
    ));
    assert!(matches!(
        LineEndingStyle::try_from(-1),
        Err(ExtError::NotImplemented(_))
    ));
}
