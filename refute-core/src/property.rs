//! Property construction for property-based testing.
//!
//! `for_all` turns a generator plus a predicate into a `Property`: a
//! generator of candidate trees of test results. A predicate may return a
//! plain boolean or another property, so quantifiers nest to any depth
//! through the same `bind` machinery with no special casing.

use std::fmt;

use crate::gen::Gen;

/// The outcome of one predicate evaluation against one drawn input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    /// Whether the predicate held.
    pub is_success: bool,
    /// The captured quantifier arguments, rendered with `Debug`,
    /// ordered outermost-first.
    pub arguments: Vec<String>,
}

impl TestResult {
    /// Render the captured arguments as a tuple, e.g. `([3, 0], 1)`.
    pub fn render_arguments(&self) -> String {
        render_arguments(&self.arguments)
    }
}

pub(crate) fn render_arguments(arguments: &[String]) -> String {
    format!("({})", arguments.join(", "))
}

/// A property is a generator of test-result trees: one `run` yields one
/// random trial bundled with its entire shrink tree.
pub type Property = Gen<TestResult>;

/// What a predicate handed to [`for_all`] may evaluate to: a verdict, or a
/// nested property quantifying over a further variable.
pub enum Outcome {
    Check(bool),
    Nested(Property),
}

impl From<bool> for Outcome {
    fn from(value: bool) -> Self {
        Outcome::Check(value)
    }
}

impl From<Property> for Outcome {
    fn from(value: Property) -> Self {
        Outcome::Nested(value)
    }
}

/// Quantify a predicate over a generator.
///
/// For each drawn value `v`, a boolean outcome becomes a constant result
/// capturing `v`; a nested property gets `v` prepended to its eventual
/// argument list, keeping arguments ordered outermost-first at any nesting
/// depth. The whole construct is `gen.bind(..)`, so nested quantifiers
/// shrink through exactly the same tree machinery as everything else.
pub fn for_all<T, O, F>(gen: Gen<T>, predicate: F) -> Property
where
    T: fmt::Debug + 'static,
    O: Into<Outcome>,
    F: Fn(&T) -> O + 'static,
{
    gen.bind(move |value| {
        let rendered = format!("{value:?}");
        match predicate(value).into() {
            Outcome::Check(is_success) => Gen::constant(TestResult {
                is_success,
                arguments: vec![rendered],
            }),
            Outcome::Nested(inner) => inner.map(move |result: &TestResult| {
                let mut arguments = Vec::with_capacity(result.arguments.len() + 1);
                arguments.push(rendered.clone());
                arguments.extend(result.arguments.iter().cloned());
                TestResult {
                    is_success: result.is_success,
                    arguments,
                }
            }),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Seed;
    use crate::gen::always;

    #[test]
    fn test_boolean_outcome_captures_argument() {
        let property = for_all(always(5), |&v| v < 4);
        let result = property.run(Seed::from_u64(1)).value().clone();
        assert!(!result.is_success);
        assert_eq!(result.arguments, vec!["5".to_string()]);
    }

    #[test]
    fn test_nested_arguments_are_outermost_first() {
        let property = for_all(always(1), |&a| {
            for_all(always(2), move |&b| a + b == 3)
        });
        let result = property.run(Seed::from_u64(1)).value().clone();
        assert!(result.is_success);
        assert_eq!(result.arguments, vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_three_deep_nesting_preserves_order() {
        let property = for_all(always("a"), |&a| {
            let a = a.to_string();
            for_all(always("b"), move |&b| {
                let a = a.clone();
                let b = b.to_string();
                for_all(always("c"), move |&_c| {
                    let _ = (&a, &b);
                    false
                })
            })
        });
        let result = property.run(Seed::from_u64(1)).value().clone();
        assert!(!result.is_success);
        assert_eq!(
            result.arguments,
            vec!["\"a\"".to_string(), "\"b\"".to_string(), "\"c\"".to_string()]
        );
    }

    #[test]
    fn test_render_arguments_is_a_tuple() {
        let result = TestResult {
            is_success: false,
            arguments: vec!["[3, 0]".to_string(), "1".to_string()],
        };
        assert_eq!(result.render_arguments(), "([3, 0], 1)");
    }
}
