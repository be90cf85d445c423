//! Category display hints.

/// Category display hint attached to a notification.
///
/// A fixed set of values is recognized; anything else passes through
/// untouched as an opaque hint rather than erroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Message,
    Email,
    Call,
    Alarm,
    Social,
    Promo,
    Event,
    Transport,
    Other(String),
}

impl Category {
    pub fn from_wire(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "message" => Self::Message,
            "email" => Self::Email,
            "call" => Self::Call,
            "alarm" => Self::Alarm,
            "social" => Self::Social,
            "promo" => Self::Promo,
            "event" => Self::Event,
            "transport" => Self::Transport,
            _ => Self::Other(s.to_owned()),
        }
    }

    /// Freedesktop category string for the notification daemon, where one
    /// exists. Recognized hints without an equivalent are omitted from the
    /// presented notification; opaque hints pass through as-is.
    pub fn xdg_hint(&self) -> Option<&str> {
        match self {
            Self::Message => Some("im.received"),
            Self::Email => Some("email.arrived"),
            Self::Call => Some("call.incoming"),
            Self::Alarm | Self::Social | Self::Promo | Self::Event | Self::Transport => None,
            Self::Other(raw) => Some(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Category;

    #[test]
    fn recognized_set_parses() {
        assert_eq!(Category::from_wire("email"), Category::Email);
        assert_eq!(Category::from_wire("Message"), Category::Message);
        assert_eq!(Category::from_wire("TRANSPORT"), Category::Transport);
    }

    #[test]
    fn unrecognized_passes_through_unmodified() {
        let c = Category::from_wire("com.example.custom");
        assert_eq!(c, Category::Other("com.example.custom".into()));
        assert_eq!(c.xdg_hint(), Some("com.example.custom"));
    }

    #[test]
    fn xdg_mapping_is_best_effort() {
        assert_eq!(Category::Email.xdg_hint(), Some("email.arrived"));
        assert_eq!(Category::Call.xdg_hint(), Some("call.incoming"));
        assert_eq!(Category::Message.xdg_hint(), Some("im.received"));
        assert_eq!(Category::Alarm.xdg_hint(), None);
        assert_eq!(Category::Promo.xdg_hint(), None);
    }
}
