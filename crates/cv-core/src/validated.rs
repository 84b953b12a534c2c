//! The accumulating result type and the record builder.
//!
//! `Validated` is deliberately not monadic: combining fields through
//! [`build`] evaluates every input and concatenates failures instead of
//! stopping at the first, so a caller sees the complete report at once.

use crate::failure::{ConfigError, ValidationFailure};

/// Result of validating one field or a whole record.
///
/// `Invalid` holds a non-empty list, ordered left to right in the order
/// fields were supplied.
#[derive(Debug, PartialEq)]
pub enum Validated<T> {
    /// The value passed resolution, coercion, and any predicate.
    Valid(T),
    /// Everything that went wrong, in field order.
    Invalid(Vec<ValidationFailure>),
}

impl<T> Validated<T> {
    /// A single-failure invalid result.
    pub fn fail(failure: ValidationFailure) -> Self {
        Validated::Invalid(vec![failure])
    }

    /// Whether this result is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, Validated::Valid(_))
    }

    /// Map the valid value, keeping failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validated<U> {
        match self {
            Validated::Valid(value) => Validated::Valid(f(value)),
            Validated::Invalid(failures) => Validated::Invalid(failures),
        }
    }

    /// Rewrite every failure, keeping a valid value untouched.
    pub fn map_failures(
        self,
        f: impl FnMut(ValidationFailure) -> ValidationFailure,
    ) -> Validated<T> {
        match self {
            Validated::Valid(value) => Validated::Valid(value),
            Validated::Invalid(failures) => {
                Validated::Invalid(failures.into_iter().map(f).collect())
            }
        }
    }

    /// Convert into the terminal result shape.
    pub fn into_result(self) -> Result<T, ConfigError> {
        match self {
            Validated::Valid(value) => Ok(value),
            Validated::Invalid(failures) => Err(ConfigError::Failures(failures)),
        }
    }
}

/// A tuple of independently validated fields, combinable into one record.
///
/// Implemented for tuples of `Validated` values up to twelve fields. Field
/// count and order are checked by the tuple type itself, so an arity mismatch
/// against the record constructor is a compile error.
pub trait Fields {
    /// The tuple of unwrapped field values.
    type Values;

    /// Partition into failures and successes without short-circuiting.
    fn collect(self) -> Validated<Self::Values>;
}

macro_rules! impl_fields {
    ($($T:ident $t:ident),+) => {
        impl<$($T),+> Fields for ($(Validated<$T>,)+) {
            type Values = ($($T,)+);

            fn collect(self) -> Validated<Self::Values> {
                let ($($t,)+) = self;
                let mut failures = Vec::new();
                $(
                    let $t = match $t {
                        Validated::Valid(value) => Some(value),
                        Validated::Invalid(f) => {
                            failures.extend(f);
                            None
                        }
                    };
                )+
                match ($($t,)+) {
                    ($(Some($t),)+) if failures.is_empty() => Validated::Valid(($($t,)+)),
                    _ => Validated::Invalid(failures),
                }
            }
        }
    };
}

impl_fields!(A a);
impl_fields!(A a, B b);
impl_fields!(A a, B b, C c);
impl_fields!(A a, B b, C c, D d);
impl_fields!(A a, B b, C c, D d, E e);
impl_fields!(A a, B b, C c, D d, E e, F f);
impl_fields!(A a, B b, C c, D d, E e, F f, G g);
impl_fields!(A a, B b, C c, D d, E e, F f, G g, H h);
impl_fields!(A a, B b, C c, D d, E e, F f, G g, H h, I i);
impl_fields!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j);
impl_fields!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k);
impl_fields!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k, L l);

/// Combine the ordered field results into a record.
///
/// Every field is already evaluated by the time it reaches this call, so no
/// failure can suppress another: either `make` runs on the complete tuple of
/// values, or every accumulated failure is returned in field order.
pub fn build<F, R>(fields: F, make: impl FnOnce(F::Values) -> R) -> Validated<R>
where
    F: Fields,
{
    fields.collect().map(make)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::FailureReason;

    fn failure(path: &str) -> ValidationFailure {
        ValidationFailure::new(path, FailureReason::RequiredValueNotSet)
    }

    #[derive(Debug, PartialEq)]
    struct Record {
        name: String,
        port: u16,
        debug: bool,
    }

    #[test]
    fn test_build_all_valid() {
        let record = build(
            (
                Validated::Valid("svc".to_string()),
                Validated::Valid(80u16),
                Validated::Valid(true),
            ),
            |(name, port, debug)| Record { name, port, debug },
        );
        assert_eq!(
            record,
            Validated::Valid(Record {
                name: "svc".to_string(),
                port: 80,
                debug: true,
            })
        );
    }

    #[test]
    fn test_build_collects_failures_in_field_order() {
        let record = build(
            (
                Validated::<String>::fail(failure("name")),
                Validated::Valid(80u16),
                Validated::<bool>::fail(failure("debug")),
            ),
            |(name, port, debug)| Record { name, port, debug },
        );
        assert_eq!(
            record,
            Validated::Invalid(vec![failure("name"), failure("debug")])
        );
    }

    #[test]
    fn test_build_flattens_nested_failure_lists() {
        let multi = Validated::<u16>::Invalid(vec![failure("a"), failure("b")]);
        let record = build(
            (multi, Validated::<String>::fail(failure("c"))),
            |(_, _): (u16, String)| unreachable!("both fields failed"),
        );
        assert_eq!(
            record,
            Validated::<()>::Invalid(vec![failure("a"), failure("b"), failure("c")])
        );
    }

    #[test]
    fn test_build_single_field() {
        let one = build((Validated::Valid(5u32),), |(n,)| n + 1);
        assert_eq!(one, Validated::Valid(6));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Validated::Valid(1).into_result().unwrap(), 1);
        let err = Validated::<u8>::fail(failure("x")).into_result().unwrap_err();
        assert_eq!(err.failures().unwrap().len(), 1);
    }

    #[test]
    fn test_map_failures_rewrites_each() {
        let rewritten = Validated::<u8>::Invalid(vec![failure("a"), failure("b")])
            .map_failures(|f| ValidationFailure::new(format!("outer.{}", f.path), f.reason));
        match rewritten {
            Validated::Invalid(failures) => {
                assert_eq!(failures[0].path, "outer.a");
                assert_eq!(failures[1].path, "outer.b");
            }
            Validated::Valid(_) => panic!("expected invalid"),
        }
    }
}
