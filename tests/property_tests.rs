//! Property-based tests for the parser and renderer.
//!
//! Random expressions are generated from a small grammar and checked for:
//! 1. Parse-ability: generated expressions always parse
//! 2. Round trip: the rendered form parses back to the same tree
//! 3. Fixed point: rendering the re-parsed tree gives the same text
//! 4. Robustness: any truncation either parses or fails cleanly

use cexpr::parser::config::BUILTIN_TYPE_NAMES;
use cexpr::parse;
use proptest::prelude::*;

// -- Expression Generation Strategies --

/// Identifiers that are neither `sizeof` nor a cast type word.
fn identifier_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_][a-z0-9_]{0,6}")
        .expect("valid regex")
        .prop_filter("not a keyword", |s| {
            s != "sizeof" && !BUILTIN_TYPE_NAMES.contains(&s.as_str())
        })
}

fn type_name_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "int",
        "char *",
        "unsigned long",
        "size_t",
        "signed short",
        "double * *",
    ])
}

fn binary_operator() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "||", "&&", "|", "^", "&", "==", "!=", "<", ">", "<=", ">=", "<<", ">>", "+", "-", "*",
        "/", "%",
    ])
}

fn assignment_operator() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=",
    ])
}

fn prefix_operator() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["&", "*", "+", "-", "!", "~", "++", "--"])
}

/// Valid expressions, tokens separated by spaces.
fn expression_strategy() -> impl Strategy<Value = String> {
    identifier_strategy().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            (inner.clone(), binary_operator(), inner.clone())
                .prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
            (prefix_operator(), inner.clone()).prop_map(|(op, e)| format!("{} {}", op, e)),
            inner.clone().prop_map(|e| format!("( {} )", e)),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, t, e)| format!("( {} ) ? ( {} ) : ( {} )", c, t, e)),
            (inner.clone(), assignment_operator(), inner.clone())
                .prop_map(|(l, op, r)| format!("( {} ) {} ( {} )", l, op, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("( {} , {} )", l, r)),
            (inner.clone(), inner.clone()).prop_map(|(f, a)| format!("( {} ) ( {} )", f, a)),
            (inner.clone(), inner.clone()).prop_map(|(a, i)| format!("( {} ) [ {} ]", a, i)),
            (inner.clone(), identifier_strategy(), any::<bool>()).prop_map(|(e, m, arrow)| {
                format!("( {} ) {} {}", e, if arrow { "->" } else { "." }, m)
            }),
            (inner.clone(), any::<bool>())
                .prop_map(|(e, inc)| format!("( {} ) {}", e, if inc { "++" } else { "--" })),
            (type_name_strategy(), inner.clone())
                .prop_map(|(t, e)| format!("( {} ) {}", t, e)),
            type_name_strategy().prop_map(|t| format!("sizeof ( {} )", t)),
            identifier_strategy().prop_map(|v| format!("sizeof {}", v)),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn rendered_form_is_a_fixed_point(text in expression_strategy()) {
        let tree = parse(&text)
            .map_err(|err| TestCaseError::fail(format!("{:?} failed: {}", text, err)))?;
        let rendered = tree.to_string();

        let reparsed = parse(&rendered)
            .map_err(|err| TestCaseError::fail(format!("{:?} failed: {}", rendered, err)))?;
        prop_assert_eq!(&reparsed, &tree);
        prop_assert_eq!(reparsed.to_string(), rendered);
    }

    #[test]
    fn truncated_input_never_panics(text in expression_strategy(), cut in any::<prop::sample::Index>()) {
        let end = cut.index(text.len() + 1);
        // Either outcome is fine; reaching here without a panic is the point.
        let _ = parse(&text[..end]);
    }
}
