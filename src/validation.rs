//! Field-level form validation.
//!
//! Every validator is a total function from a string value to either `None`
//! (pass) or `Some(message)`. Validators never touch the network or the DOM,
//! so submitting a form with client-side errors issues no request at all.

use std::collections::HashMap;

/// One validation rule. Boxed so rules with captured bounds (lengths, ranges)
/// and plain functions mix in the same list.
pub type Rule = Box<dyn Fn(&str) -> Option<String>>;

/// A named field plus the rules to run against its value. The first failing
/// rule wins; later rules for the same field are skipped.
pub struct FieldRules<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub rules: Vec<Rule>,
}

/// Result of validating a whole form. `errors` only contains failing fields.
#[derive(Debug, Default, PartialEq)]
pub struct FormValidation {
    pub is_valid: bool,
    pub errors: HashMap<String, String>,
}

pub fn validate_form(fields: &[FieldRules]) -> FormValidation {
    let mut errors = HashMap::new();
    for field in fields {
        for rule in &field.rules {
            if let Some(message) = rule(field.value) {
                errors.insert(field.name.to_string(), message);
                break;
            }
        }
    }
    FormValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

// ---------------------------------------------------------------------------
// Individual validators
// ---------------------------------------------------------------------------

/// Fails on empty or whitespace-only input.
pub fn required(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some("This field is required".to_string())
    } else {
        None
    }
}

/// Conventional `local@domain.tld` shape. Empty input passes; compose with
/// [`required`] for mandatory fields.
pub fn email(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !value.contains(char::is_whitespace)
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains("@")
        }
        None => false,
    };
    if valid {
        None
    } else {
        Some("Please enter a valid email".to_string())
    }
}

/// At least `n` characters (chars, not bytes). Empty input passes.
pub fn min_length(n: usize) -> Rule {
    Box::new(move |value: &str| {
        if !value.is_empty() && value.chars().count() < n {
            Some(format!("Must be at least {} characters", n))
        } else {
            None
        }
    })
}

/// At most `n` characters.
pub fn max_length(n: usize) -> Rule {
    Box::new(move |value: &str| {
        if value.chars().count() > n {
            Some(format!("Must be at most {} characters", n))
        } else {
            None
        }
    })
}

/// Numeric lower bound. Non-numeric input fails with a parse message.
pub fn min_value(bound: f64) -> Rule {
    Box::new(move |value: &str| match value.trim().parse::<f64>() {
        Ok(n) if n >= bound => None,
        Ok(_) => Some(format!("Must be at least {}", bound)),
        Err(_) => Some("Must be a number".to_string()),
    })
}

/// Numeric upper bound. Non-numeric input fails with a parse message.
pub fn max_value(bound: f64) -> Rule {
    Box::new(move |value: &str| match value.trim().parse::<f64>() {
        Ok(n) if n <= bound => None,
        Ok(_) => Some(format!("Must be at most {}", bound)),
        Err(_) => Some("Must be a number".to_string()),
    })
}

/// Custom pattern check. Empty input passes.
pub fn matches<F>(pred: F, message: &str) -> Rule
where
    F: Fn(&str) -> bool + 'static,
{
    let message = message.to_string();
    Box::new(move |value: &str| {
        if value.is_empty() || pred(value) {
            None
        } else {
            Some(message.clone())
        }
    })
}

/// Equality against another captured value (password confirmation).
pub fn equals(other: &str, message: &str) -> Rule {
    let other = other.to_string();
    let message = message.to_string();
    Box::new(move |value: &str| {
        if value == other {
            None
        } else {
            Some(message.clone())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn required_rejects_blank_input() {
        assert!(required("").is_some());
        assert!(required("   ").is_some());
        assert!(required("\t\n").is_some());
        assert!(required("x").is_none());
        assert!(required(" x ").is_none());
    }

    #[test]
    fn email_accepts_conventional_addresses() {
        assert!(email("user@example.com").is_none());
        assert!(email("first.last@sub.domain.io").is_none());
        assert!(email("").is_none()); // optional until combined with required
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        let msg = Some("Please enter a valid email".to_string());
        assert_eq!(email("not-an-email"), msg);
        assert_eq!(email("missing-domain@"), msg);
        assert_eq!(email("@example.com"), msg);
        assert_eq!(email("user@nodot"), msg);
        assert_eq!(email("user@trailing."), msg);
        assert_eq!(email("user name@example.com"), msg);
    }

    #[test]
    fn length_bounds_count_chars() {
        assert!(min_length(3)("ab").is_some());
        assert!(min_length(3)("abc").is_none());
        assert!(min_length(3)("äöü").is_none()); // 3 chars, 6 bytes
        assert!(max_length(3)("abcd").is_some());
        assert!(max_length(3)("abc").is_none());
    }

    #[test]
    fn numeric_bounds_parse_then_compare() {
        assert!(min_value(0.0)("-1").is_some());
        assert!(min_value(0.0)("0").is_none());
        assert!(max_value(2.0)("2.5").is_some());
        assert!(max_value(2.0)("1.9").is_none());
        assert!(min_value(0.0)("abc").is_some());
    }

    #[test]
    fn form_reports_first_failure_per_field() {
        let result = validate_form(&[
            FieldRules {
                name: "email",
                value: "nope",
                rules: vec![Box::new(required), Box::new(email)],
            },
            FieldRules {
                name: "name",
                value: "ok",
                rules: vec![Box::new(required), max_length(10)],
            },
        ]);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors.get("email").map(String::as_str),
            Some("Please enter a valid email")
        );
    }

    #[test]
    fn empty_rule_set_is_valid() {
        let result = validate_form(&[]);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    proptest! {
        #[test]
        fn required_errors_iff_trimmed_empty(s in ".*") {
            let failed = required(&s).is_some();
            prop_assert_eq!(failed, s.trim().is_empty());
        }

        #[test]
        fn email_never_panics(s in ".*") {
            let _ = email(&s);
        }

        #[test]
        fn accepted_emails_have_at_and_dotted_domain(
            local in "[a-z][a-z0-9.]{0,10}",
            host in "[a-z]{1,8}",
            tld in "[a-z]{2,4}",
        ) {
            let addr = format!("{}@{}.{}", local, host, tld);
            prop_assert!(email(&addr).is_none());
        }
    }
}
