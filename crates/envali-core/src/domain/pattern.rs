//! Pattern-match parameters: presets, match methods and modifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── Presets ──────────────────────────────────────────────────────────────────

/// Named, ready-made patterns.
///
/// [`RegexPreset::None`] means "no preset": the directive's own expression
/// (or the content row) supplies the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegexPreset {
    #[default]
    None,
    EmailAddress,
    DomainName,
    WebUrl,
    UserId,
    Password,
    FixedLinePhoneJp,
    FixedLinePhoneWithHyphenJp,
    CellPhoneJp,
    CellPhoneWithHyphenJp,
    Date,
    DateWithHyphen,
    DateWithSlash,
    PostCodeJp,
    XmlFile,
    IpAddress,
    IpAddressWithPort,
    Numeric,
    Alphanumeric,
    Alphabet,
    AlphabetUpperCase,
    AlphabetLowerCase,
    FtpUrl,
    JavaFile,
    TextFile,
    JsonFile,
    JapaneseKanji,
    Hiragana,
    HiraganaUpperCase,
    HiraganaLowerCase,
    Katakana,
    KatakanaUpperCase,
    KatakanaLowerCase,
    JapaneseAlphabet,
    JapaneseAlphanumeric,
}

const IPV4: &str = r"(?:(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])";

impl RegexPreset {
    /// Every preset except [`RegexPreset::None`], in declaration order.
    pub const ALL: &'static [RegexPreset] = &[
        Self::EmailAddress,
        Self::DomainName,
        Self::WebUrl,
        Self::UserId,
        Self::Password,
        Self::FixedLinePhoneJp,
        Self::FixedLinePhoneWithHyphenJp,
        Self::CellPhoneJp,
        Self::CellPhoneWithHyphenJp,
        Self::Date,
        Self::DateWithHyphen,
        Self::DateWithSlash,
        Self::PostCodeJp,
        Self::XmlFile,
        Self::IpAddress,
        Self::IpAddressWithPort,
        Self::Numeric,
        Self::Alphanumeric,
        Self::Alphabet,
        Self::AlphabetUpperCase,
        Self::AlphabetLowerCase,
        Self::FtpUrl,
        Self::JavaFile,
        Self::TextFile,
        Self::JsonFile,
        Self::JapaneseKanji,
        Self::Hiragana,
        Self::HiraganaUpperCase,
        Self::HiraganaLowerCase,
        Self::Katakana,
        Self::KatakanaUpperCase,
        Self::KatakanaLowerCase,
        Self::JapaneseAlphabet,
        Self::JapaneseAlphanumeric,
    ];

    /// The preset's pattern, or `None` for [`RegexPreset::None`].
    pub fn pattern(self) -> Option<String> {
        let pattern = match self {
            Self::None => return None,
            Self::EmailAddress => {
                r"[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}"
                    .to_owned()
            }
            Self::DomainName => {
                r"(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,}".to_owned()
            }
            Self::WebUrl => r"https?://[\w/:%#$&?()~.=+\-]+".to_owned(),
            Self::UserId => r"[A-Za-z][A-Za-z0-9_-]{2,31}".to_owned(),
            Self::Password => r"[\x21-\x7E]{8,32}".to_owned(),
            Self::FixedLinePhoneJp => r"0[0-9]{9}".to_owned(),
            Self::FixedLinePhoneWithHyphenJp => r"0[0-9]{1,4}-[0-9]{1,4}-[0-9]{4}".to_owned(),
            Self::CellPhoneJp => r"0[789]0[0-9]{8}".to_owned(),
            Self::CellPhoneWithHyphenJp => r"0[789]0-[0-9]{4}-[0-9]{4}".to_owned(),
            Self::Date => r"[0-9]{4}(?:0[1-9]|1[0-2])(?:0[1-9]|[12][0-9]|3[01])".to_owned(),
            Self::DateWithHyphen => {
                r"[0-9]{4}-(?:0[1-9]|1[0-2])-(?:0[1-9]|[12][0-9]|3[01])".to_owned()
            }
            Self::DateWithSlash => {
                r"[0-9]{4}/(?:0[1-9]|1[0-2])/(?:0[1-9]|[12][0-9]|3[01])".to_owned()
            }
            Self::PostCodeJp => r"[0-9]{3}-[0-9]{4}".to_owned(),
            Self::XmlFile => r#"[^\\/:*?"<>|]+\.xml"#.to_owned(),
            Self::IpAddress => IPV4.to_owned(),
            Self::IpAddressWithPort => format!("{IPV4}:[0-9]{{1,5}}"),
            Self::Numeric => r"[0-9]+".to_owned(),
            Self::Alphanumeric => r"[A-Za-z0-9]+".to_owned(),
            Self::Alphabet => r"[A-Za-z]+".to_owned(),
            Self::AlphabetUpperCase => r"[A-Z]+".to_owned(),
            Self::AlphabetLowerCase => r"[a-z]+".to_owned(),
            Self::FtpUrl => r"ftps?://[\w/:%#$&?()~.=+\-]+".to_owned(),
            Self::JavaFile => r#"[^\\/:*?"<>|]+\.java"#.to_owned(),
            Self::TextFile => r#"[^\\/:*?"<>|]+\.txt"#.to_owned(),
            Self::JsonFile => r#"[^\\/:*?"<>|]+\.json"#.to_owned(),
            Self::JapaneseKanji => r"\p{Han}+".to_owned(),
            Self::Hiragana => r"\p{Hiragana}+".to_owned(),
            Self::HiraganaUpperCase => r"[\p{Hiragana}&&[^ぁぃぅぇぉっゃゅょゎゕゖ]]+".to_owned(),
            Self::HiraganaLowerCase => r"[ぁぃぅぇぉっゃゅょゎゕゖ]+".to_owned(),
            Self::Katakana => r"\p{Katakana}+".to_owned(),
            Self::KatakanaUpperCase => r"[\p{Katakana}&&[^ァィゥェォッャュョヮヵヶ]]+".to_owned(),
            Self::KatakanaLowerCase => r"[ァィゥェォッャュョヮヵヶ]+".to_owned(),
            Self::JapaneseAlphabet => r"[Ａ-Ｚａ-ｚ]+".to_owned(),
            Self::JapaneseAlphanumeric => r"[０-９Ａ-Ｚａ-ｚ]+".to_owned(),
        };
        Some(pattern)
    }

    /// Character classes the value must also contain somewhere, on top of
    /// matching [`Self::pattern`].
    ///
    /// `PASSWORD` needs one lowercase letter, one uppercase letter and one
    /// digit; every other preset is a single pattern.
    pub fn required_classes(self) -> &'static [&'static str] {
        match self {
            Self::Password => &["[a-z]", "[A-Z]", "[0-9]"],
            _ => &[],
        }
    }

    /// Upper snake case name, e.g. `EMAIL_ADDRESS`.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::EmailAddress => "EMAIL_ADDRESS",
            Self::DomainName => "DOMAIN_NAME",
            Self::WebUrl => "WEB_URL",
            Self::UserId => "USER_ID",
            Self::Password => "PASSWORD",
            Self::FixedLinePhoneJp => "FIXED_LINE_PHONE_JP",
            Self::FixedLinePhoneWithHyphenJp => "FIXED_LINE_PHONE_WITH_HYPHEN_JP",
            Self::CellPhoneJp => "CELL_PHONE_JP",
            Self::CellPhoneWithHyphenJp => "CELL_PHONE_WITH_HYPHEN_JP",
            Self::Date => "DATE",
            Self::DateWithHyphen => "DATE_WITH_HYPHEN",
            Self::DateWithSlash => "DATE_WITH_SLASH",
            Self::PostCodeJp => "POST_CODE_JP",
            Self::XmlFile => "XML_FILE",
            Self::IpAddress => "IP_ADDRESS",
            Self::IpAddressWithPort => "IP_ADDRESS_WITH_PORT",
            Self::Numeric => "NUMERIC",
            Self::Alphanumeric => "ALPHANUMERIC",
            Self::Alphabet => "ALPHABET",
            Self::AlphabetUpperCase => "ALPHABET_UPPER_CASE",
            Self::AlphabetLowerCase => "ALPHABET_LOWER_CASE",
            Self::FtpUrl => "FTP_URL",
            Self::JavaFile => "JAVA_FILE",
            Self::TextFile => "TEXT_FILE",
            Self::JsonFile => "JSON_FILE",
            Self::JapaneseKanji => "JAPANESE_KANJI",
            Self::Hiragana => "HIRAGANA",
            Self::HiraganaUpperCase => "HIRAGANA_UPPER_CASE",
            Self::HiraganaLowerCase => "HIRAGANA_LOWER_CASE",
            Self::Katakana => "KATAKANA",
            Self::KatakanaUpperCase => "KATAKANA_UPPER_CASE",
            Self::KatakanaLowerCase => "KATAKANA_LOWER_CASE",
            Self::JapaneseAlphabet => "JAPANESE_ALPHABET",
            Self::JapaneseAlphanumeric => "JAPANESE_ALPHANUMERIC",
        }
    }
}

impl fmt::Display for RegexPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RegexPreset {
    type Err = String;

    /// Accepts `EMAIL_ADDRESS`, `email_address` and `email-address`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        if normalized == "NONE" {
            return Ok(Self::None);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|preset| preset.name() == normalized)
            .ok_or_else(|| format!("unknown regex preset '{s}'"))
    }
}

// ── Methods and modifiers ────────────────────────────────────────────────────

/// How a compiled pattern is applied to the field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegexMethod {
    /// The whole value must match.
    #[default]
    Matches,
    /// A match must start at the beginning of the value.
    LookingAt,
    /// A match may occur anywhere in the value.
    Find,
}

/// Flags applied when compiling a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegexModifier {
    CaseInsensitive,
    Multiline,
    DotMatchesAll,
    /// Whitespace and `#` comments in the pattern are ignored.
    Comments,
    /// The pattern is matched as literal text.
    Literal,
}

// ── Pattern spec ─────────────────────────────────────────────────────────────

/// Parameters of a `RequireMatch` directive.
///
/// The pattern source is chosen in this order: a preset other than
/// [`RegexPreset::None`], then a non-empty expression, then the `regex`
/// attribute of the entity's content row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatternSpec {
    preset: RegexPreset,
    expression: Option<String>,
    modifiers: Vec<RegexModifier>,
    method: RegexMethod,
}

impl PatternSpec {
    /// Match against a literal expression.
    pub fn expression(expression: impl Into<String>) -> Self {
        Self {
            expression: Some(expression.into()),
            ..Self::default()
        }
    }

    /// Match against a named preset.
    pub fn preset(preset: RegexPreset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }

    /// Take the pattern from the entity's content row.
    pub fn from_content() -> Self {
        Self::default()
    }

    pub fn with_modifier(mut self, modifier: RegexModifier) -> Self {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
        self
    }

    pub fn with_method(mut self, method: RegexMethod) -> Self {
        self.method = method;
        self
    }

    pub fn preset_value(&self) -> RegexPreset {
        self.preset
    }

    /// The literal expression, ignoring empty strings.
    pub fn expression_value(&self) -> Option<&str> {
        self.expression.as_deref().filter(|e| !e.is_empty())
    }

    pub fn modifiers(&self) -> &[RegexModifier] {
        &self.modifiers
    }

    pub fn has_modifier(&self, modifier: RegexModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn method(&self) -> RegexMethod {
        self.method
    }
}
