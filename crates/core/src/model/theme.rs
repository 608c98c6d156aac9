use std::fmt;

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Interpret a stored preference. Only `"dark"` selects the dark theme;
    /// anything else, including a missing value, means light.
    #[must_use]
    pub fn from_persisted(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_dark_reads_as_dark() {
        assert_eq!(Theme::from_persisted(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_persisted(Some("light")), Theme::Light);
        assert_eq!(Theme::from_persisted(Some("DARK")), Theme::Light);
        assert_eq!(Theme::from_persisted(None), Theme::Light);
    }

    #[test]
    fn toggled_round_trips() {
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        assert!(Theme::Light.toggled().is_dark());
    }
}
