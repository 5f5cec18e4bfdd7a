// ============================
// userdir-lib/src/auth/policy.rs
// ============================
//! Password policy: an injected list of predicates a candidate secret
//! must all satisfy.
use crate::config::PasswordRequirements;

/// A pure, side-effect-free check over a candidate password.
pub type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// An ordered set of password predicates combined with logical AND.
///
/// The list is supplied at construction; the registry never hardcodes
/// policy, so requirements can change without touching registry logic.
pub struct PasswordPolicy {
    predicates: Vec<Predicate>,
}

impl PasswordPolicy {
    /// Build a policy from an explicit predicate list.
    pub fn new(predicates: Vec<Predicate>) -> Self {
        PasswordPolicy { predicates }
    }

    /// Build the predicate list from configured requirements, in the
    /// order: length, digit, uppercase, lowercase.
    pub fn from_requirements(requirements: &PasswordRequirements) -> Self {
        let mut predicates: Vec<Predicate> = Vec::new();

        let min_length = requirements.min_length;
        predicates.push(Box::new(move |pwd: &str| pwd.len() >= min_length));

        if requirements.require_digit {
            predicates.push(Box::new(|pwd: &str| {
                pwd.chars().any(|c| c.is_ascii_digit())
            }));
        }
        if requirements.require_uppercase {
            predicates.push(Box::new(|pwd: &str| pwd.chars().any(char::is_uppercase)));
        }
        if requirements.require_lowercase {
            predicates.push(Box::new(|pwd: &str| pwd.chars().any(char::is_lowercase)));
        }

        PasswordPolicy { predicates }
    }

    /// True only if every predicate accepts the password. Evaluation is in
    /// supplied order and short-circuits on the first failure.
    pub fn check(&self, password: &str) -> bool {
        self.predicates.iter().all(|p| p(password))
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        PasswordPolicy::from_requirements(&PasswordRequirements::default())
    }
}
