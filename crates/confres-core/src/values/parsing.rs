//! Converters for the built-in value types.
//!
//! Each converter receives non-blank text. Numeric and flag converters
//! ignore surrounding whitespace; the string converter keeps text verbatim.

use std::path::PathBuf;
use std::time::Duration;

use super::types::Value;

pub fn parse_text(text: &str) -> Result<Value, String> {
    Ok(Value::Text(text.to_string()))
}

pub fn parse_integer(text: &str) -> Result<Value, String> {
    text.trim()
        .parse::<i64>()
        .map(Value::Integer)
        .map_err(|e| e.to_string())
}

/// Accepts `true` / `false` in any letter case.
pub fn parse_flag(text: &str) -> Result<Value, String> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(Value::Flag(true))
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(Value::Flag(false))
    } else {
        Err("expected 'true' or 'false'".to_string())
    }
}

pub fn parse_float(text: &str) -> Result<Value, String> {
    let parsed = text.trim().parse::<f64>().map_err(|e| e.to_string())?;
    if !parsed.is_finite() {
        return Err("value must be finite".to_string());
    }
    Ok(Value::Float(parsed))
}

/// Parse `250ms`, `30s`, `5m`, `2h`, or a bare integer meaning seconds.
pub fn parse_duration(text: &str) -> Result<Value, String> {
    let trimmed = text.trim();
    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, unit) = trimmed.split_at(split);

    if digits.is_empty() {
        return Err("expected a number followed by ms, s, m or h".to_string());
    }
    let amount: u64 = digits.parse().map_err(|e: std::num::ParseIntError| e.to_string())?;

    let duration = match unit.trim().to_lowercase().as_str() {
        "ms" => Duration::from_millis(amount),
        "" | "s" => Duration::from_secs(amount),
        "m" => Duration::from_secs(
            amount
                .checked_mul(60)
                .ok_or_else(|| "duration overflow".to_string())?,
        ),
        "h" => Duration::from_secs(
            amount
                .checked_mul(3600)
                .ok_or_else(|| "duration overflow".to_string())?,
        ),
        other => return Err(format!("unknown duration unit '{}'", other)),
    };
    Ok(Value::Duration(duration))
}

pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis % 1000 != 0 {
        return format!("{}ms", millis);
    }
    let secs = duration.as_secs();
    if secs != 0 && secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else if secs != 0 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

/// Paths expand a leading `~` to the home directory.
pub fn parse_path(text: &str) -> Result<Value, String> {
    let trimmed = text.trim();
    Ok(Value::Path(expand_home(trimmed)))
}

pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer(" 60 ").unwrap(), Value::Integer(60));
        assert_eq!(parse_integer("-3").unwrap(), Value::Integer(-3));
        assert!(parse_integer("6O").is_err());
        assert!(parse_integer("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_flag_vocabulary() {
        assert_eq!(parse_flag("true").unwrap(), Value::Flag(true));
        assert_eq!(parse_flag("False").unwrap(), Value::Flag(false));
        assert_eq!(parse_flag("tRuE").unwrap(), Value::Flag(true));
        assert!(parse_flag("yes").is_err());
        assert!(parse_flag("1").is_err());
    }

    #[test]
    fn test_parse_float_rejects_non_finite() {
        assert_eq!(parse_float("0.5").unwrap(), Value::Float(0.5));
        assert!(parse_float("NaN").is_err());
        assert!(parse_float("inf").is_err());
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(
            parse_duration("30").unwrap(),
            Value::Duration(Duration::from_secs(30))
        );
        assert_eq!(
            parse_duration("5m").unwrap(),
            Value::Duration(Duration::from_secs(300))
        );
        assert_eq!(
            parse_duration("2H").unwrap(),
            Value::Duration(Duration::from_secs(7200))
        );
        assert_eq!(
            parse_duration("250ms").unwrap(),
            Value::Duration(Duration::from_millis(250))
        );
        assert!(parse_duration("ms").is_err());
        assert!(parse_duration("10 fortnights").is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_secs(45)), "45s");
        assert_eq!(format_duration(Duration::from_secs(300)), "5m");
        assert_eq!(format_duration(Duration::from_secs(7200)), "2h");
        assert_eq!(format_duration(Duration::ZERO), "0s");
    }

    #[test]
    fn test_parse_path_expands_home() {
        let Value::Path(path) = parse_path("/etc/app.properties").unwrap() else {
            panic!("expected a path value");
        };
        assert_eq!(path, PathBuf::from("/etc/app.properties"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/app.properties"), home.join("app.properties"));
        }
    }

    #[test]
    fn test_parse_text_is_verbatim() {
        assert_eq!(parse_text(" padded ").unwrap(), Value::Text(" padded ".to_string()));
    }
}
