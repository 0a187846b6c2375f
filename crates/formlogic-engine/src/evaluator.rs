//! Rule evaluator
//!
//! Pure comparison of an observed answer against a rule value. Same inputs
//! always give the same answer, so everything here is table-tested.

use formlogic_common::{AnswerValue, Condition};
use serde::{Deserialize, Serialize};

/// How operators this version does not know are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationPolicy {
    /// Unknown operators match (stored forms keep behaving as before)
    #[default]
    FailOpen,
    /// Unknown operators never match
    FailClosed,
}

/// Evaluate `condition` with the permissive default policy
///
/// `actual` is the observed answer; `None` (or `Null`) means unanswered and
/// never equals anything.
#[inline]
pub fn evaluate(condition: Condition, expected: &AnswerValue, actual: Option<&AnswerValue>) -> bool {
    evaluate_with(EvaluationPolicy::FailOpen, condition, expected, actual)
}

/// Evaluate `condition` under an explicit policy for unknown operators
pub fn evaluate_with(
    policy: EvaluationPolicy,
    condition: Condition,
    expected: &AnswerValue,
    actual: Option<&AnswerValue>,
) -> bool {
    let actual = actual.filter(|v| !matches!(v, AnswerValue::Null));

    match condition {
        Condition::Equals => equals(expected, actual),
        Condition::NotEquals => !equals(expected, actual),
        Condition::Contains => actual
            .map(|a| a.to_string().contains(&expected.to_string()))
            .unwrap_or(false),
        Condition::GreaterThan => numeric_pair(expected, actual)
            .map(|(a, e)| a > e)
            .unwrap_or(false),
        Condition::LessThan => numeric_pair(expected, actual)
            .map(|(a, e)| a < e)
            .unwrap_or(false),
        Condition::In => match (expected, actual) {
            (AnswerValue::List(items), Some(a)) => {
                let observed = a.to_string();
                items.iter().any(|item| *item == observed)
            }
            _ => false,
        },
        Condition::Unknown => policy == EvaluationPolicy::FailOpen,
    }
}

/// Numeric comparison when either side is a number, string form otherwise
fn equals(expected: &AnswerValue, actual: Option<&AnswerValue>) -> bool {
    let Some(actual) = actual else {
        return false;
    };

    let numeric = matches!(expected, AnswerValue::Number(_)) || matches!(actual, AnswerValue::Number(_));
    if numeric {
        if let Some((a, e)) = numeric_pair(expected, Some(actual)) {
            return a == e;
        }
    }

    actual.to_string() == expected.to_string()
}

/// (actual, expected) as numbers, when both cast
#[inline]
fn numeric_pair(expected: &AnswerValue, actual: Option<&AnswerValue>) -> Option<(f64, f64)> {
    Some((actual?.as_number()?, expected.as_number()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn text(s: &str) -> AnswerValue {
        AnswerValue::from(s)
    }

    #[test]
    fn test_condition_table() {
        let list = AnswerValue::List(vec!["BR".into(), "PT".into()]);
        let cases: Vec<(Condition, AnswerValue, Option<AnswerValue>, bool)> = vec![
            (Condition::Equals, text("Sim"), Some(text("Sim")), true),
            (Condition::Equals, text("Sim"), Some(text("Não")), false),
            (Condition::Equals, text("Sim"), None, false),
            (Condition::Equals, text("Sim"), Some(AnswerValue::Null), false),
            (Condition::Equals, text("5"), Some(AnswerValue::Number(5.0)), true),
            (Condition::Equals, AnswerValue::Number(5.0), Some(text("5.0")), true),
            (Condition::Equals, text("1"), Some(text("1.0")), false),
            (Condition::Equals, text("true"), Some(AnswerValue::Bool(true)), true),
            (Condition::NotEquals, text("Sim"), Some(text("Não")), true),
            (Condition::NotEquals, text("Sim"), None, true),
            (Condition::Contains, text("ana"), Some(text("banana")), true),
            (Condition::Contains, text("x"), Some(text("banana")), false),
            (Condition::Contains, text("b"), Some(AnswerValue::List(vec!["a".into(), "b".into()])), true),
            (Condition::Contains, text("und"), None, false),
            (Condition::GreaterThan, text("10"), Some(text("11")), true),
            (Condition::GreaterThan, text("10"), Some(text("10")), false),
            (Condition::GreaterThan, text("10"), Some(text("abc")), false),
            (Condition::LessThan, text("10"), Some(AnswerValue::Number(9.5)), true),
            (Condition::LessThan, text("ten"), Some(text("9")), false),
            (Condition::In, list.clone(), Some(text("PT")), true),
            (Condition::In, list, Some(text("ES")), false),
            (Condition::In, text("PT"), Some(text("PT")), false),
            (Condition::Unknown, text("anything"), None, true),
        ];

        for (condition, expected, actual, want) in cases {
            assert_eq!(
                evaluate(condition, &expected, actual.as_ref()),
                want,
                "{:?} {:?} {:?}",
                condition,
                expected,
                actual
            );
        }
    }

    #[test]
    fn test_fail_closed_policy() {
        let v = text("x");
        assert!(!evaluate_with(EvaluationPolicy::FailClosed, Condition::Unknown, &v, Some(&v)));
        assert!(evaluate_with(EvaluationPolicy::FailClosed, Condition::Equals, &v, Some(&v)));
    }

    proptest! {
        #[test]
        fn prop_equals_is_reflexive_for_text(s in ".*") {
            let v = AnswerValue::Text(s);
            prop_assert!(evaluate(Condition::Equals, &v, Some(&v)));
        }

        #[test]
        fn prop_equals_is_reflexive_for_numbers(n in -1.0e12f64..1.0e12) {
            let v = AnswerValue::Number(n);
            prop_assert!(evaluate(Condition::Equals, &v, Some(&v)));
        }

        #[test]
        fn prop_distinct_text_is_unequal(a in ".*", b in ".*") {
            prop_assume!(a != b);
            prop_assert!(!evaluate(Condition::Equals, &AnswerValue::Text(a), Some(&AnswerValue::Text(b))));
        }

        #[test]
        fn prop_distinct_numbers_are_unequal(a in -1.0e9f64..1.0e9, b in -1.0e9f64..1.0e9) {
            prop_assume!(a != b);
            prop_assert!(!evaluate(Condition::Equals, &AnswerValue::Number(a), Some(&AnswerValue::Number(b))));
        }

        #[test]
        fn prop_not_equals_negates_equals(a in "[a-c0-9]{0,3}", b in proptest::option::of("[a-c0-9]{0,3}")) {
            let expected = AnswerValue::Text(a);
            let actual = b.map(AnswerValue::Text);
            prop_assert_eq!(
                evaluate(Condition::NotEquals, &expected, actual.as_ref()),
                !evaluate(Condition::Equals, &expected, actual.as_ref())
            );
        }
    }
}
