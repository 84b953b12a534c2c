//! Scope restriction: validate a subtree, with failure paths requalified.

use crate::failure::{FailureReason, ValidationFailure};
use crate::validated::Validated;
use cv_tree::ConfigTree;

/// Run `inner` against the subtree rooted at `path`, rewriting every failure
/// it produces to carry the fully-qualified path from this tree's root.
///
/// Nested calls compose: a failure at local path `"a.b"` inside
/// `via(tree, "x", |t| via(t, "y", …))` surfaces as `"x.y.a.b"`. The
/// `Invalid` list is already flat by construction (an inner `via` has
/// qualified its own failures before returning), so one prefixing pass over
/// the list rewrites every leaf.
///
/// A missing or non-object subtree is a config-shape error, not an ordinary
/// field failure: it surfaces as a single [`FailureReason::MissingValue`] at
/// the subtree path, the structural variant no ordinary field read produces
/// on a well-formed tree.
pub fn via<R, F>(tree: &ConfigTree, path: &str, inner: F) -> Validated<R>
where
    F: FnOnce(&ConfigTree) -> Validated<R>,
{
    match tree.subtree(path) {
        Ok(subtree) => inner(&subtree).map_failures(|failure| failure.qualified(path)),
        Err(_) => Validated::fail(ValidationFailure::new(path, FailureReason::MissingValue)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathSpec;
    use crate::read::unchecked;
    use proptest::prelude::*;

    fn tree() -> ConfigTree {
        ConfigTree::from_json_str(
            r#"{
                "x": { "y": { "present": 1 } },
                "leaf": "scalar"
            }"#,
        )
        .unwrap()
    }

    fn fail_at(path: &'static str) -> impl FnOnce(&ConfigTree) -> Validated<u8> {
        move |t| unchecked::<u8>(t, &PathSpec::optional(path))
    }

    #[test]
    fn test_via_prefixes_inner_failure() {
        let result = via(&tree(), "x", fail_at("a.b"));
        assert_eq!(
            result,
            Validated::Invalid(vec![ValidationFailure::new(
                "x.a.b",
                FailureReason::NullValue
            )])
        );
    }

    #[test]
    fn test_nested_via_composes_prefixes() {
        let result = via(&tree(), "x", |t| via(t, "y", fail_at("a.b")));
        assert_eq!(
            result,
            Validated::Invalid(vec![ValidationFailure::new(
                "x.y.a.b",
                FailureReason::NullValue
            )])
        );
    }

    #[test]
    fn test_via_leaves_valid_results_alone() {
        let result = via(&tree(), "x.y", |t| unchecked::<u8>(t, &PathSpec::optional("present")));
        assert_eq!(result, Validated::Valid(1));
    }

    #[test]
    fn test_via_missing_subtree_is_structural() {
        let result: Validated<u8> = via(&tree(), "absent", fail_at("a"));
        assert_eq!(
            result,
            Validated::Invalid(vec![ValidationFailure::new(
                "absent",
                FailureReason::MissingValue
            )])
        );
    }

    #[test]
    fn test_via_over_leaf_is_structural() {
        let result: Validated<u8> = via(&tree(), "leaf", fail_at("a"));
        assert_eq!(
            result,
            Validated::Invalid(vec![ValidationFailure::new(
                "leaf",
                FailureReason::MissingValue
            )])
        );
    }

    #[test]
    fn test_via_prefixes_every_failure_in_the_list() {
        let result: Validated<()> = via(&tree(), "x", |_| {
            Validated::Invalid(vec![
                ValidationFailure::new("a", FailureReason::NullValue),
                ValidationFailure::new("b.c", FailureReason::RequiredValueNotSet),
            ])
        });
        assert_eq!(
            result,
            Validated::Invalid(vec![
                ValidationFailure::new("x.a", FailureReason::NullValue),
                ValidationFailure::new("x.b.c", FailureReason::RequiredValueNotSet),
            ])
        );
    }

    proptest! {
        #[test]
        fn prop_nested_prefixes_compose(
            p1 in "[a-z][a-z0-9_]{0,8}",
            p2 in "[a-z][a-z0-9_]{0,8}",
        ) {
            let json = format!(r#"{{ "{p1}": {{ "{p2}": {{}} }} }}"#);
            let t = ConfigTree::from_json_str(&json).unwrap();
            let result: Validated<u8> = via(&t, &p1, |t| via(t, &p2, fail_at("a.b")));
            prop_assert_eq!(
                result,
                Validated::Invalid(vec![ValidationFailure::new(
                    format!("{p1}.{p2}.a.b"),
                    FailureReason::NullValue
                )])
            );
        }
    }
}
