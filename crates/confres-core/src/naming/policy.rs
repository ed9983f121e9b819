//! Pluggable name matching policies.

use std::fmt;

/// Turns a literal name into its match-ready form.
///
/// Two names match when their normalized forms are equal. Implementations
/// must be deterministic.
pub trait MatchingPolicy: Send + Sync {
    /// Stable policy name (e.g., "uppercase").
    fn name(&self) -> &'static str;

    fn normalize(&self, name: &str) -> String;
}

/// Default policy: trims and uppercases, so `Bob` and `bOB` match.
#[derive(Debug, Clone, Copy, Default)]
pub struct UppercasePolicy;

impl MatchingPolicy for UppercasePolicy {
    fn name(&self) -> &'static str {
        "uppercase"
    }

    fn normalize(&self, name: &str) -> String {
        name.trim().to_uppercase()
    }
}

/// Uppercases and treats `.` and `-` as `_`, so `server.port` matches the
/// environment-style `SERVER_PORT`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelaxedPolicy;

impl MatchingPolicy for RelaxedPolicy {
    fn name(&self) -> &'static str {
        "relaxed"
    }

    fn normalize(&self, name: &str) -> String {
        name.trim()
            .chars()
            .map(|c| match c {
                '.' | '-' => '_',
                other => other,
            })
            .collect::<String>()
            .to_uppercase()
    }
}

/// Look up a built-in policy by name (case-insensitive).
pub fn policy_by_name(name: &str) -> Option<Box<dyn MatchingPolicy>> {
    match name.to_lowercase().as_str() {
        "uppercase" => Some(Box::new(UppercasePolicy)),
        "relaxed" => Some(Box::new(RelaxedPolicy)),
        _ => None,
    }
}

impl fmt::Debug for dyn MatchingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchingPolicy({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercase_policy() {
        let policy = UppercasePolicy;
        assert_eq!(policy.normalize("Bob"), policy.normalize("bOB"));
        assert_eq!(policy.normalize(" server.port "), "SERVER.PORT");
        assert_ne!(policy.normalize("server.port"), policy.normalize("SERVER_PORT"));
    }

    #[test]
    fn test_relaxed_policy() {
        let policy = RelaxedPolicy;
        assert_eq!(policy.normalize("server.port"), "SERVER_PORT");
        assert_eq!(policy.normalize("max-connections"), "MAX_CONNECTIONS");
        assert_eq!(policy.normalize("server.port"), policy.normalize("SERVER_PORT"));
    }

    #[test]
    fn test_policy_by_name() {
        assert_eq!(policy_by_name("Relaxed").unwrap().name(), "relaxed");
        assert_eq!(policy_by_name("uppercase").unwrap().name(), "uppercase");
        assert!(policy_by_name("soundex").is_none());
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let policy = RelaxedPolicy;
        let first = policy.normalize("a.B-c");
        for _ in 0..10 {
            assert_eq!(policy.normalize("a.B-c"), first);
        }
    }
}
