use confres_core::ValueSnapshot;

pub struct TableFormatter {
    property_width: usize,
    value_width: usize,
    origin_width: usize,
}

impl TableFormatter {
    pub fn new(snapshot: &ValueSnapshot) -> Self {
        let property_width = snapshot
            .iter()
            .map(|(id, _)| id.as_str().chars().count())
            .max()
            .unwrap_or(16)
            .clamp(8, 50);
        let value_width = snapshot
            .iter()
            .map(|(_, entry)| entry.display_value().chars().count())
            .max()
            .unwrap_or(5)
            .clamp(5, 60);
        let origin_width = snapshot
            .iter()
            .map(|(_, entry)| entry.origin.to_string().chars().count())
            .max()
            .unwrap_or(6)
            .clamp(6, 40);

        Self {
            property_width,
            value_width,
            origin_width,
        }
    }

    pub fn render(&self, snapshot: &ValueSnapshot) -> String {
        let mut lines = vec![
            self.border('┌', '┬', '┐'),
            self.row("Property", "Value", "Origin"),
            self.border('├', '┼', '┤'),
        ];
        for (id, entry) in snapshot.iter() {
            lines.push(self.row(id.as_str(), &entry.display_value(), &entry.origin.to_string()));
        }
        lines.push(self.border('└', '┴', '┘'));
        lines.join("\n")
    }

    fn row(&self, property: &str, value: &str, origin: &str) -> String {
        format!(
            "│ {} │ {} │ {} │",
            truncate(property, self.property_width),
            truncate(value, self.value_width),
            truncate(origin, self.origin_width),
        )
    }

    fn border(&self, left: char, middle: char, right: char) -> String {
        format!(
            "{left}{}{middle}{}{middle}{}{right}",
            "─".repeat(self.property_width + 2),
            "─".repeat(self.value_width + 2),
            "─".repeat(self.origin_width + 2),
        )
    }
}

/// Pad or cut `s` to exactly `max_len` characters.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
