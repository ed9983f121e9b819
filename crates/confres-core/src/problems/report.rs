//! Human-readable rendering of an aggregated problem list.

use super::types::Problem;

/// Render all problems as one numbered report.
pub fn render_report(problems: &[Problem]) -> String {
    let mut out = format!(
        "Configuration resolution failed with {} problem{}:\n",
        problems.len(),
        if problems.len() == 1 { "" } else { "s" }
    );
    for (i, problem) in problems.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, problem));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::PropertyId;

    #[test]
    fn test_render_single_problem() {
        let problems = vec![Problem::missing_required(
            &PropertyId::from("SERVICE_URL"),
            &["SERVICE_URL".to_string()],
        )];
        let report = render_report(&problems);

        assert!(report.starts_with("Configuration resolution failed with 1 problem:\n"));
        assert!(report.contains(
            "  1. [MISSING_REQUIRED_VALUE] Required property 'SERVICE_URL' has no value"
        ));
    }

    #[test]
    fn test_render_numbers_every_problem() {
        let problems = vec![
            Problem::loader_access_failure("properties-file(/nope)", "not found"),
            Problem::missing_required(&PropertyId::from("A"), &["A".to_string()]),
        ];
        let report = render_report(&problems);

        assert!(report.contains("with 2 problems:"));
        assert!(report.contains("  1. [LOADER_ACCESS_FAILURE]"));
        assert!(report.contains("  2. [MISSING_REQUIRED_VALUE]"));
    }
}
