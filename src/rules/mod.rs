//! The built-in rule set, declared through the fluent builder.
//!
//! Each module contributes one rule family; rules sharing a name form a
//! first-match group. Registration order follows the source rule file:
//! within a family, more specific variants come first.

use crate::rule::{RuleBuilder, RuleCompileError, RuleSet, RuleSetBuilder};

pub(crate) mod append_combine;
pub(crate) mod assign_op;
pub(crate) mod bad_call;
pub(crate) mod bool_simplify;
pub(crate) mod dup_arg;
pub(crate) mod dup_map_key;
pub(crate) mod dup_sub_expr;
pub(crate) mod off_by_one;
pub(crate) mod regexp_must;
pub(crate) mod sloppy_len;
pub(crate) mod string_x_bytes;
pub(crate) mod switch_true;
pub(crate) mod underef;
pub(crate) mod unslice;
pub(crate) mod val_swap;
pub(crate) mod wrapper_func;
pub(crate) mod yoda_expr;

/// All built-in rule builders, in registration order.
pub fn builtin_rules() -> Vec<RuleBuilder> {
    let mut rules = Vec::new();
    rules.extend(wrapper_func::rules());
    rules.extend(bool_simplify::rules());
    rules.extend(off_by_one::rules());
    rules.extend(string_x_bytes::rules());
    rules.extend(bad_call::rules());
    rules.extend(dup_arg::rules());
    rules.extend(dup_sub_expr::rules());
    rules.extend(val_swap::rules());
    rules.extend(assign_op::rules());
    rules.extend(regexp_must::rules());
    rules.extend(dup_map_key::rules());
    rules.extend(append_combine::rules());
    rules.extend(yoda_expr::rules());
    rules.extend(underef::rules());
    rules.extend(empty_string_test::rules());
    rules.extend(unslice::rules());
    rules.extend(switch_true::rules());
    rules.extend(sloppy_len::rules());
    rules
}

/// Compile the whole built-in set. Panics on a compile error: the
/// built-in rules are fixtures of this crate, so an error here is a bug,
/// not user input.
pub fn builtin_rule_set() -> RuleSet {
    let (set, errors) = compile_builtin();
    assert!(
        errors.is_empty(),
        "built-in rules failed to compile: {errors:?}"
    );
    set
}

/// Compile the built-in set collect-and-continue, as an embedder would
/// compile user-supplied rules.
pub fn compile_builtin() -> (RuleSet, Vec<RuleCompileError>) {
    let mut builder = RuleSetBuilder::new();
    builder.extend(builtin_rules());
    builder.compile()
}
