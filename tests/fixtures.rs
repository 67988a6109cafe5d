mod common;

use paste::paste;
use pretty_assertions::assert_str_eq;

use treeclass::dump::dump_to_string;

fn run_fixture_test(script: &'static str, expected: &'static str) {
    let actual = match common::run_script(script) {
        Ok(classifier) => dump_to_string(&classifier),
        Err(err) => format!("ERR {}\n", err),
    };

    assert_str_eq!(actual, expected);
}

macro_rules! run_fixture_tests {
    { $( $filename:ident ),+ $(,)? } => {
        $(
            paste! {
                #[test]
                fn [< test_ $filename >]() {
                    run_fixture_test(
                        include_str!(concat!("fixtures/", stringify!($filename), ".ron")),
                        include_str!(concat!("fixtures/", stringify!($filename), ".dump")),
                    );
                }
            }
        )+
    };
}

run_fixture_tests! {
    pass_empty,
    pass_derived_relation,
    pass_forward_relation,
    pass_duplicate_edges,
    pass_shared_symbol_name,
    pass_shadowing,
    fail_undeclared_target_variable,
    fail_undeclared_superclass,
    fail_duplicate_variable,
    fail_duplicate_constant,
    fail_duplicate_class,
    fail_undeclared_class,
    fail_inherited_variable,
    fail_inverse_first_target_variable,
    fail_inverse_second_target_variable,
    fail_own_variable_before_target,
    fail_complex_first_own_variable,
    fail_complex_target_variable,
    fail_malformed_constraint,
}
