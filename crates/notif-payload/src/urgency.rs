//! Urgency tier resolution.

/// Notification urgency tier, the notification daemon's native priority
/// concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrgencyTier {
    Low,
    Normal,
    Critical,
}

impl UrgencyTier {
    /// Resolve the tier from the wire fields.
    ///
    /// An explicit urgency string always takes precedence over the numeric
    /// importance level, even when unrecognized. With neither present the
    /// tier is Normal.
    pub fn resolve(urgency: Option<&str>, importance: Option<i64>) -> Self {
        if let Some(s) = urgency {
            return Self::from_urgency_str(s);
        }
        if let Some(level) = importance {
            return Self::from_importance(level);
        }
        Self::Normal
    }

    fn from_urgency_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "critical" | "high" => Self::Critical,
            "normal" => Self::Normal,
            "low" | "minimal" => Self::Low,
            _ => Self::Normal,
        }
    }

    fn from_importance(level: i64) -> Self {
        match level {
            4 | 5 => Self::Critical,
            3 => Self::Normal,
            0..=2 => Self::Low,
            _ => Self::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UrgencyTier;

    #[test]
    fn importance_table_matches() {
        let expected = [
            (0, UrgencyTier::Low),
            (1, UrgencyTier::Low),
            (2, UrgencyTier::Low),
            (3, UrgencyTier::Normal),
            (4, UrgencyTier::Critical),
            (5, UrgencyTier::Critical),
        ];
        for (level, tier) in expected {
            assert_eq!(
                UrgencyTier::resolve(None, Some(level)),
                tier,
                "importance {level}"
            );
        }
    }

    #[test]
    fn urgency_string_table_matches() {
        let expected = [
            ("critical", UrgencyTier::Critical),
            ("high", UrgencyTier::Critical),
            ("normal", UrgencyTier::Normal),
            ("low", UrgencyTier::Low),
            ("minimal", UrgencyTier::Low),
        ];
        for (s, tier) in expected {
            assert_eq!(UrgencyTier::resolve(Some(s), None), tier, "urgency {s}");
        }
    }

    #[test]
    fn urgency_string_overrides_importance() {
        assert_eq!(
            UrgencyTier::resolve(Some("low"), Some(5)),
            UrgencyTier::Low
        );
        assert_eq!(
            UrgencyTier::resolve(Some("critical"), Some(0)),
            UrgencyTier::Critical
        );
        // Even an unrecognized string wins and maps to Normal.
        assert_eq!(
            UrgencyTier::resolve(Some("whatever"), Some(5)),
            UrgencyTier::Normal
        );
    }

    #[test]
    fn urgency_string_is_case_insensitive() {
        assert_eq!(
            UrgencyTier::resolve(Some("HIGH"), None),
            UrgencyTier::Critical
        );
    }

    #[test]
    fn absent_or_out_of_range_defaults_to_normal() {
        assert_eq!(UrgencyTier::resolve(None, None), UrgencyTier::Normal);
        assert_eq!(UrgencyTier::resolve(None, Some(42)), UrgencyTier::Normal);
        assert_eq!(UrgencyTier::resolve(None, Some(-1)), UrgencyTier::Normal);
    }
}
