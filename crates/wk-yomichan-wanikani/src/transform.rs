//! Subject → Yomichan meta entries

use std::ops::{BitOr, BitOrAssign};
use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;
use wk_yomichan_core::{Frequency, FrequencyData, MetaEntry};

use crate::schema::Subject;
use crate::state::SubjectKind;

const SURU: &str = "する";
const TILDE: char = '〜';

/// Two or more CJK ideographs followed by する (a suru-verb headword)
static SURU_VERB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\x{4e00}-\x{9fff}]{2,}する$").expect("invalid suru regex"));

/// Independent cleanup rules, detected once per subject
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cleanup(u8);

impl Cleanup {
    pub const NONE: Self = Self(0);
    /// Strip a trailing する
    pub const SURU: Self = Self(1);
    /// Remove every 〜 marker
    pub const TILDE: Self = Self(1 << 1);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Rules that apply to `characters`
    pub fn detect(characters: &str) -> Self {
        let mut flags = Self::NONE;
        if SURU_VERB.is_match(characters) {
            flags |= Self::SURU;
        }
        if characters.contains(TILDE) {
            flags |= Self::TILDE;
        }
        flags
    }

    /// Apply the rules to `text`: する first, then 〜
    pub fn apply(self, text: &str) -> String {
        let mut out = text;
        if self.contains(Self::SURU) {
            out = out.strip_suffix(SURU).unwrap_or(out);
        }
        if self.contains(Self::TILDE) {
            return out.replace(TILDE, "");
        }
        out.to_string()
    }
}

impl BitOr for Cleanup {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Cleanup {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Level-derived frequency, shown as `L<level>`
pub fn level_frequency(level: u32) -> Frequency {
    Frequency {
        value: level,
        display_value: format!("L{level}"),
    }
}

/// Meta entries for one subject, tagged with the bank they belong to.
///
/// Kanji yield one entry; vocabulary one per reading, all sharing the
/// cleaned headword.
pub fn subject_to_entries(subject: &Subject) -> anyhow::Result<(SubjectKind, Vec<MetaEntry>)> {
    let kind = SubjectKind::from_name(&subject.object).with_context(|| {
        format!(
            "Cannot handle subject type {:?} (subject {})",
            subject.object, subject.id
        )
    })?;
    let characters = subject
        .data
        .characters
        .as_deref()
        .with_context(|| format!("Subject {} has no characters", subject.id))?;
    let level = subject.data.level;

    let entries = match kind {
        SubjectKind::Kanji => vec![MetaEntry::freq(
            characters,
            FrequencyData::Simple(level_frequency(level)),
        )],
        SubjectKind::Vocabulary => {
            let cleanup = Cleanup::detect(characters);
            let headword = cleanup.apply(characters);
            subject
                .data
                .readings
                .iter()
                .map(|r| {
                    MetaEntry::freq(
                        headword.clone(),
                        FrequencyData::Nested {
                            reading: cleanup.apply(&r.reading),
                            frequency: level_frequency(level),
                        },
                    )
                })
                .collect()
        }
    };
    Ok((kind, entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Reading, SubjectData};

    fn subject(object: &str, characters: &str, level: u32, readings: &[&str]) -> Subject {
        Subject {
            id: 42,
            object: object.to_string(),
            data: SubjectData {
                characters: Some(characters.to_string()),
                level,
                hidden_at: None,
                readings: readings
                    .iter()
                    .map(|r| Reading {
                        reading: r.to_string(),
                    })
                    .collect(),
            },
        }
    }

    fn json(entry: &MetaEntry) -> String {
        serde_json::to_string(entry).unwrap()
    }

    #[test]
    fn detect_suru_verb() {
        assert_eq!(Cleanup::detect("勉強する"), Cleanup::SURU);
        // one ideograph is not enough
        assert_eq!(Cleanup::detect("愛する"), Cleanup::NONE);
        // kana before する
        assert_eq!(Cleanup::detect("べんきょうする"), Cleanup::NONE);
        assert_eq!(Cleanup::detect("勉強"), Cleanup::NONE);
    }

    #[test]
    fn detect_tilde() {
        assert_eq!(Cleanup::detect("〜について"), Cleanup::TILDE);
        assert_eq!(Cleanup::detect("〜中〜"), Cleanup::TILDE);
    }

    #[test]
    fn detect_both() {
        let flags = Cleanup::detect("〜勉強する");
        assert!(!flags.contains(Cleanup::SURU), "anchored at start");

        let flags = Cleanup::SURU | Cleanup::TILDE;
        assert_eq!(flags.apply("〜勉強する"), "勉強");
    }

    #[test]
    fn apply_is_noop_on_clean_text() {
        let all = Cleanup::SURU | Cleanup::TILDE;
        for clean in ["勉強", "について", "日本語", ""] {
            assert_eq!(all.apply(clean), clean);
            assert_eq!(all.apply(&all.apply(clean)), clean);
        }
    }

    #[test]
    fn apply_strips_suru_once() {
        assert_eq!(Cleanup::SURU.apply("するする"), "する");
    }

    #[test]
    fn empty_flags_copy_text() {
        assert!(Cleanup::NONE.is_empty());
        assert_eq!(Cleanup::NONE.apply("〜する"), "〜する");
    }

    #[test]
    fn kanji_entry() {
        let (kind, entries) = subject_to_entries(&subject("kanji", "日", 3, &["にち"])).unwrap();
        assert_eq!(kind, SubjectKind::Kanji);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            json(&entries[0]),
            r#"["日","freq",{"value":3,"displayValue":"L3"}]"#
        );
    }

    #[test]
    fn suru_vocabulary_entry() {
        let (kind, entries) =
            subject_to_entries(&subject("vocabulary", "勉強する", 5, &["べんきょうする"])).unwrap();
        assert_eq!(kind, SubjectKind::Vocabulary);
        assert_eq!(
            json(&entries[0]),
            r#"["勉強","freq",{"reading":"べんきょう","frequency":{"value":5,"displayValue":"L5"}}]"#
        );
    }

    #[test]
    fn tilde_vocabulary_entry() {
        let (_, entries) =
            subject_to_entries(&subject("vocabulary", "〜について", 12, &["〜について"])).unwrap();
        assert_eq!(entries[0].headword(), "について");
        assert_eq!(
            entries[0].data(),
            &FrequencyData::Nested {
                reading: "について".to_string(),
                frequency: level_frequency(12),
            }
        );
    }

    #[test]
    fn one_entry_per_reading_with_shared_headword() {
        let (_, entries) = subject_to_entries(&subject(
            "vocabulary",
            "上手",
            4,
            &["じょうず", "うわて", "かみて"],
        ))
        .unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.headword() == "上手"));
    }

    #[test]
    fn flags_come_from_characters_not_reading() {
        // reading ends in する but characters do not qualify
        let (_, entries) =
            subject_to_entries(&subject("vocabulary", "愛する", 9, &["あいする"])).unwrap();
        assert_eq!(entries[0].headword(), "愛する");
        assert!(matches!(
            entries[0].data(),
            FrequencyData::Nested { reading, .. } if reading == "あいする"
        ));
    }

    #[test]
    fn vocabulary_without_readings_yields_nothing() {
        let (_, entries) = subject_to_entries(&subject("vocabulary", "上", 1, &[])).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn unknown_type_is_fatal() {
        let err = subject_to_entries(&subject("radical", "一", 1, &[])).unwrap_err();
        assert!(err.to_string().contains("radical"));
    }

    #[test]
    fn missing_characters_is_fatal() {
        let mut s = subject("kanji", "日", 1, &[]);
        s.data.characters = None;
        assert!(subject_to_entries(&s).is_err());
    }
}
