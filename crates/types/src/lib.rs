//! Validated text primitives shared across the clinote crates.
//!
//! - [`NonEmptyText`]: trimmed text guaranteed to hold at least one non-whitespace character.
//! - [`TokenKey`]: a `#shortcut` or `@macro` key as typed into a note.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The key did not start with `#` or `@`
    #[error("token key must start with '#' or '@': {0}")]
    MissingSigil(String),
    /// The key had a sigil but no usable name after it
    #[error("token key has an invalid name: {0}")]
    InvalidName(String),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the input is empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Which catalog a token key belongs to, decided by its sigil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// `#name`: expands to a full templated note block.
    Template,
    /// `@name`: expands to a short inline value.
    Macro,
}

impl TokenKind {
    /// The sigil character that introduces keys of this kind.
    pub fn sigil(self) -> char {
        match self {
            TokenKind::Template => '#',
            TokenKind::Macro => '@',
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Template => f.write_str("template"),
            TokenKind::Macro => f.write_str("macro"),
        }
    }
}

/// A validated shortcut or macro key, e.g. `#diabetes` or `@bp`.
///
/// The name after the sigil must be made of ASCII alphanumerics, `_` or `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenKey {
    raw: String,
    kind: TokenKind,
}

impl TokenKey {
    /// Parse a key, including its sigil.
    ///
    /// # Errors
    ///
    /// Returns [`TextError`] if the sigil is missing or the name is empty or malformed.
    pub fn parse(input: &str) -> Result<Self, TextError> {
        let input = input.trim();
        let mut chars = input.chars();
        let kind = match chars.next() {
            Some('#') => TokenKind::Template,
            Some('@') => TokenKind::Macro,
            None => return Err(TextError::Empty),
            Some(_) => return Err(TextError::MissingSigil(input.to_string())),
        };

        let name = chars.as_str();
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(TextError::InvalidName(input.to_string()));
        }

        Ok(Self {
            raw: input.to_string(),
            kind,
        })
    }

    /// The full key including its sigil.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The key without its sigil.
    pub fn name(&self) -> &str {
        &self.raw[1..]
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }
}

impl std::fmt::Display for TokenKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for TokenKey {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl std::str::FromStr for TokenKey {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenKey::parse(s)
    }
}

impl serde::Serialize for TokenKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> serde::Deserialize<'de> for TokenKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TokenKey::parse(&s).map_err(serde::de::Error::custom)
    }
}
