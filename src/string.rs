// Copyright (c) 2025 the streamzip authors
// MIT License (see the LICENSE file)

/// A string encoding supported by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEncoding {
    Utf8,
    Raw,
}

/// An archive name or text field with an explicit encoding.
///
/// ZIP names are byte sequences; whether they are UTF-8 decides the value
/// of general-purpose bit 11. Callers supplying `String`/`&str` values get
/// [`StringEncoding::Utf8`], callers supplying raw bytes get
/// [`StringEncoding::Raw`] and the bytes pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipString {
    encoding: StringEncoding,
    raw: Vec<u8>,
}

impl ZipString {
    /// Constructs a new encoded string from its raw bytes and its encoding type.
    ///
    /// # Note
    /// If the provided encoding is [`StringEncoding::Utf8`] but the raw bytes are not valid UTF-8
    /// (ie. a call to `std::str::from_utf8()` fails), the encoding is defaulted back to
    /// [`StringEncoding::Raw`].
    pub fn new(raw: Vec<u8>, mut encoding: StringEncoding) -> Self {
        if let StringEncoding::Utf8 = encoding {
            if std::str::from_utf8(&raw).is_err() {
                encoding = StringEncoding::Raw;
            }
        }

        Self { encoding, raw }
    }

    /// Returns the raw bytes for this string.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Returns the encoding type for this string.
    pub fn encoding(&self) -> StringEncoding {
        self.encoding
    }

    /// Whether this string was supplied as (valid) UTF-8 text.
    pub fn is_utf8(&self) -> bool {
        matches!(self.encoding, StringEncoding::Utf8)
    }

    /// Returns the bytes rendered as text, replacing any invalid sequences.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.raw).into_owned()
    }

    /// Consumes this string and returns the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.raw
    }

    pub(crate) fn len(&self) -> usize {
        self.raw.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub(crate) fn ends_with(&self, byte: u8) -> bool {
        self.raw.last() == Some(&byte)
    }

    pub(crate) fn push_byte(&mut self, byte: u8) {
        self.raw.push(byte);
    }
}

impl From<String> for ZipString {
    fn from(value: String) -> Self {
        Self { encoding: StringEncoding::Utf8, raw: value.into_bytes() }
    }
}

impl From<&str> for ZipString {
    fn from(value: &str) -> Self {
        Self { encoding: StringEncoding::Utf8, raw: value.as_bytes().to_vec() }
    }
}

impl From<Vec<u8>> for ZipString {
    fn from(value: Vec<u8>) -> Self {
        Self { encoding: StringEncoding::Raw, raw: value }
    }
}

impl From<&[u8]> for ZipString {
    fn from(value: &[u8]) -> Self {
        Self { encoding: StringEncoding::Raw, raw: value.to_vec() }
    }
}
