/// Value used for any attribute cell that is missing or unreadable.
pub const DEFAULT_ATTRIBUTE_VALUE: u32 = 1;

/// Fallbacks for the descriptive measure columns. Zero reads as "unknown".
pub const AGE_FALLBACK: u32 = 0;
pub const HEIGHT_FALLBACK: u32 = 0;
pub const WEIGHT_FALLBACK: u32 = 0;

/// A player-table column.
///
/// The metadata columns are a closed set; every other header is a role attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Age,
    Position,
    Club,
    Division,
    Nationality,
    Height,
    Weight,
    PreferredFoot,
    /// "Inf" (status icons), accepted and ignored
    Info,
    /// "Rec" (scout recommendation), accepted and ignored
    Recommendation,
    Attribute(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Int(u32),
}

impl CellValue {
    pub fn as_int(&self) -> Option<u32> {
        match self {
            CellValue::Int(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            CellValue::Text(s) => s,
            CellValue::Int(n) => n.to_string(),
        }
    }
}

impl Column {
    pub fn classify(header: &str) -> Self {
        match header.trim() {
            "Name" => Column::Name,
            "Age" => Column::Age,
            "Position" => Column::Position,
            "Club" => Column::Club,
            "Division" => Column::Division,
            "Nat" => Column::Nationality,
            "Height" => Column::Height,
            "Weight" => Column::Weight,
            "Preferred Foot" => Column::PreferredFoot,
            "Inf" => Column::Info,
            "Rec" => Column::Recommendation,
            other => Column::Attribute(other.to_string()),
        }
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self, Column::Attribute(_))
    }

    /// Normalize one raw cell of this column. `None` is an absent cell.
    pub fn normalize(&self, raw: Option<&str>) -> CellValue {
        match self {
            Column::Attribute(_) => CellValue::Int(normalize_attribute(raw)),
            Column::Age => CellValue::Int(normalize_measure(raw, AGE_FALLBACK)),
            Column::Height => CellValue::Int(normalize_measure(raw, HEIGHT_FALLBACK)),
            Column::Weight => CellValue::Int(normalize_measure(raw, WEIGHT_FALLBACK)),
            _ => CellValue::Text(raw.map(str::trim).unwrap_or_default().to_string()),
        }
    }
}

/// Normalize a cell by its column header.
pub fn normalize(column: &str, raw: Option<&str>) -> CellValue {
    Column::classify(column).normalize(raw)
}

/// Attribute cells: ranges keep their lower bound, anything unreadable becomes 1.
///
/// "10-15" -> 10, "-" -> 1, "12.7" -> 12, "" -> 1
pub fn normalize_attribute(raw: Option<&str>) -> u32 {
    let Some(raw) = raw.map(str::trim) else {
        return DEFAULT_ATTRIBUTE_VALUE;
    };

    let candidate = match raw.split_once('-') {
        Some((lower, _)) => lower.trim(),
        None => raw,
    };

    parse_truncated(candidate)
        .filter(|n| *n >= 1)
        .unwrap_or(DEFAULT_ATTRIBUTE_VALUE)
}

/// Age/height/weight cells: the leading number of the first token, else `fallback`.
///
/// "23 yrs" -> 23, "180 cm" -> 180, "75kg" -> 75
pub fn normalize_measure(raw: Option<&str>, fallback: u32) -> u32 {
    let Some(token) = raw.and_then(|s| s.split_whitespace().next()) else {
        return fallback;
    };

    let end = token
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(token.len());

    parse_truncated(&token[..end]).unwrap_or(fallback)
}

fn parse_truncated(s: &str) -> Option<u32> {
    let value: f64 = s.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value.trunc() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_takes_lower_bound() {
        assert_eq!(normalize("Attr", Some("10-15")), CellValue::Int(10));
        assert_eq!(normalize("Pac", Some(" 7 - 9 ")), CellValue::Int(7));
    }

    #[test]
    fn test_dash_placeholder_defaults_to_one() {
        assert_eq!(normalize("Attr", Some("-")), CellValue::Int(1));
        assert_eq!(normalize("Attr", Some("-12")), CellValue::Int(1));
    }

    #[test]
    fn test_missing_attribute_defaults_to_one() {
        assert_eq!(normalize("Fin", None), CellValue::Int(1));
        assert_eq!(normalize("Fin", Some("")), CellValue::Int(1));
        assert_eq!(normalize("Fin", Some("n/a")), CellValue::Int(1));
        assert_eq!(normalize("Fin", Some("NaN")), CellValue::Int(1));
    }

    #[test]
    fn test_attribute_truncates() {
        assert_eq!(normalize("Fin", Some("12.7")), CellValue::Int(12));
        assert_eq!(normalize("Fin", Some("20")), CellValue::Int(20));
    }

    #[test]
    fn test_attribute_is_always_positive() {
        assert_eq!(normalize("Fin", Some("0")), CellValue::Int(1));
        assert_eq!(normalize("Fin", Some("0.4")), CellValue::Int(1));
    }

    #[test]
    fn test_measure_takes_leading_token() {
        assert_eq!(normalize("Age", Some("23 yrs")), CellValue::Int(23));
        assert_eq!(normalize("Height", Some("180 cm")), CellValue::Int(180));
        assert_eq!(normalize("Weight", Some("75kg")), CellValue::Int(75));
        assert_eq!(normalize("Age", Some("31")), CellValue::Int(31));
    }

    #[test]
    fn test_measure_uses_own_fallback() {
        assert_eq!(normalize("Age", None), CellValue::Int(AGE_FALLBACK));
        assert_eq!(normalize("Height", Some("unknown")), CellValue::Int(HEIGHT_FALLBACK));
        assert_eq!(normalize_measure(Some("-"), 42), 42);
    }

    #[test]
    fn test_metadata_passes_through() {
        assert_eq!(
            normalize("Club", Some(" AFC Wimbledon ")),
            CellValue::Text("AFC Wimbledon".to_string())
        );
        assert_eq!(
            normalize("Position", Some("D/WB (R)")),
            CellValue::Text("D/WB (R)".to_string())
        );
        // Ranges in text columns are left alone
        assert_eq!(
            normalize("Division", Some("Sky Bet League 1-2")),
            CellValue::Text("Sky Bet League 1-2".to_string())
        );
    }

    #[test]
    fn test_classify() {
        assert_eq!(Column::classify("Nat"), Column::Nationality);
        assert_eq!(Column::classify("Preferred Foot"), Column::PreferredFoot);
        assert_eq!(Column::classify("Rec"), Column::Recommendation);
        assert_eq!(Column::classify("Str"), Column::Attribute("Str".to_string()));
        assert!(Column::classify("Jum").is_attribute());
        assert!(!Column::classify("Age").is_attribute());
    }

    #[test]
    fn test_deterministic() {
        for _ in 0..3 {
            assert_eq!(normalize("Attr", Some("14-16")), CellValue::Int(14));
        }
    }
}
