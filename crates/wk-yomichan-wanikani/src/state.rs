//! Enumerations shared across pipeline stages

/// Whether subjects the service has hidden end up in the dictionary
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IncludeHidden {
    /// Drop every hidden subject
    #[default]
    No,
    /// Keep hidden subjects unconditionally
    Yes,
    /// Keep hidden subjects the user has passed
    Learned,
}

impl IncludeHidden {
    pub fn name(self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Yes => "yes",
            Self::Learned => "learned",
        }
    }
}

impl std::fmt::Display for IncludeHidden {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Subject `object` types the transformer understands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubjectKind {
    Kanji,
    Vocabulary,
}

impl SubjectKind {
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "kanji" => Some(Self::Kanji),
            "vocabulary" => Some(Self::Vocabulary),
            _ => None,
        }
    }

    pub fn api_name(self) -> &'static str {
        match self {
            Self::Kanji => "kanji",
            Self::Vocabulary => "vocabulary",
        }
    }
}

impl std::fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_hidden_defaults_to_no() {
        assert_eq!(IncludeHidden::default(), IncludeHidden::No);
    }

    #[test]
    fn include_hidden_display_matches_name() {
        assert_eq!(IncludeHidden::No.to_string(), "no");
        assert_eq!(IncludeHidden::Yes.to_string(), "yes");
        assert_eq!(IncludeHidden::Learned.to_string(), "learned");
    }

    #[test]
    fn subject_kind_from_name() {
        assert_eq!(SubjectKind::from_name("kanji"), Some(SubjectKind::Kanji));
        assert_eq!(
            SubjectKind::from_name("vocabulary"),
            Some(SubjectKind::Vocabulary)
        );
        assert_eq!(SubjectKind::from_name("radical"), None);
        assert_eq!(SubjectKind::from_name("kana_vocabulary"), None);
    }
}
