//! Connector code resolution.
//!
//! A connector code is `"<label>-<count>"`, e.g. `"lvl2dc-2"`. Unknown labels
//! still resolve, with blank display fields, so a typo in the feed hides one
//! row's description rather than the whole charger.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    Lvl1Dc,
    Lvl2Dc,
    NormalAc,
}

impl ConnectorKind {
    /// Match a code label exactly (case-sensitive).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "lvl1dc" => Some(Self::Lvl1Dc),
            "lvl2dc" => Some(Self::Lvl2Dc),
            "normalac" => Some(Self::NormalAc),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Lvl1Dc => "lvl1dc",
            Self::Lvl2Dc => "lvl2dc",
            Self::NormalAc => "normalac",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Lvl1Dc => "Level 1 DC",
            Self::Lvl2Dc => "Level 2 DC",
            Self::NormalAc => "Normal AC",
        }
    }

    #[must_use]
    pub fn power_rating(self) -> &'static str {
        match self {
            Self::Lvl1Dc => "15kW Fast Charging",
            Self::Lvl2Dc => "50kW Fast Charging",
            Self::NormalAc => "3kW Charging",
        }
    }
}

impl std::fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Human-readable form of one raw connector code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorDescriptor {
    /// The code exactly as it appeared in the catalog.
    pub code: String,
    pub label: String,
    /// `None` for labels outside the known set.
    pub kind: Option<ConnectorKind>,
    /// Empty when `kind` is `None`.
    pub display_name: String,
    /// Empty when `kind` is `None`.
    pub power: String,
    /// Text after the first `-`, verbatim.
    pub count_text: String,
    /// `count_text` as a positive integer, if it is one.
    pub count: Option<u32>,
}

impl ConnectorDescriptor {
    /// `"x2"` style unit count. Falls back to the raw count text when it is
    /// not a positive integer.
    #[must_use]
    pub fn count_label(&self) -> String {
        match self.count {
            Some(count) => format!("x{count}"),
            None => format!("x{}", self.count_text),
        }
    }

    #[must_use]
    pub fn is_recognized(&self) -> bool {
        self.kind.is_some()
    }
}

/// Resolve a raw connector code, splitting on the first `-`.
#[must_use]
pub fn resolve_connector(code: &str) -> ConnectorDescriptor {
    let (label, count_text) = code.split_once('-').unwrap_or((code, ""));
    let kind = ConnectorKind::from_label(label);
    if kind.is_none() {
        tracing::debug!(code, label, "unrecognized connector label");
    }

    let count = count_text
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|&n| n > 0);

    ConnectorDescriptor {
        code: code.to_string(),
        label: label.to_string(),
        kind,
        display_name: kind.map(ConnectorKind::display_name).unwrap_or_default().to_string(),
        power: kind.map(ConnectorKind::power_rating).unwrap_or_default().to_string(),
        count_text: count_text.to_string(),
        count,
    }
}

/// Resolve every code of a record, keeping order.
#[must_use]
pub fn resolve_connectors<S: AsRef<str>>(codes: &[S]) -> Vec<ConnectorDescriptor> {
    codes.iter().map(|c| resolve_connector(c.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_level_two_dc() {
        let d = resolve_connector("lvl2dc-2");
        assert_eq!(d.kind, Some(ConnectorKind::Lvl2Dc));
        assert_eq!(d.display_name, "Level 2 DC");
        assert_eq!(d.power, "50kW Fast Charging");
        assert_eq!(d.count, Some(2));
        assert_eq!(d.count_label(), "x2");
    }

    #[test]
    fn resolves_every_known_label() {
        let cases = [
            ("lvl1dc-1", "Level 1 DC", "15kW Fast Charging"),
            ("lvl2dc-3", "Level 2 DC", "50kW Fast Charging"),
            ("normalac-4", "Normal AC", "3kW Charging"),
        ];
        for (code, name, power) in cases {
            let d = resolve_connector(code);
            assert_eq!(d.display_name, name, "{code}");
            assert_eq!(d.power, power, "{code}");
            assert!(d.is_recognized());
        }
    }

    #[test]
    fn unknown_label_keeps_count_and_blanks_text() {
        let d = resolve_connector("fastdc-1");
        assert_eq!(d.kind, None);
        assert_eq!(d.label, "fastdc");
        assert!(d.display_name.is_empty());
        assert!(d.power.is_empty());
        assert_eq!(d.count, Some(1));
        assert!(!d.is_recognized());
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert_eq!(resolve_connector("LVL2DC-1").kind, None);
    }

    #[test]
    fn splits_on_first_separator_only() {
        let d = resolve_connector("normalac-2-b");
        assert_eq!(d.kind, Some(ConnectorKind::NormalAc));
        assert_eq!(d.count_text, "2-b");
        assert_eq!(d.count, None);
        assert_eq!(d.count_label(), "x2-b");
    }

    #[test]
    fn code_without_separator_has_no_count() {
        let d = resolve_connector("lvl1dc");
        assert_eq!(d.kind, Some(ConnectorKind::Lvl1Dc));
        assert_eq!(d.count_text, "");
        assert_eq!(d.count, None);
    }

    #[test]
    fn zero_count_is_not_positive() {
        let d = resolve_connector("lvl2dc-0");
        assert_eq!(d.count, None);
        assert_eq!(d.count_label(), "x0");
    }

    #[test]
    fn resolve_connectors_preserves_order() {
        let codes = vec!["normalac-1".to_string(), "lvl1dc-2".to_string()];
        let labels: Vec<_> = resolve_connectors(&codes)
            .into_iter()
            .map(|d| d.label)
            .collect();
        assert_eq!(labels, ["normalac", "lvl1dc"]);
    }

    #[test]
    fn kind_display_is_code_label() {
        assert_eq!(ConnectorKind::NormalAc.to_string(), "normalac");
    }
}
