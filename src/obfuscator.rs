//! Obfuscation of database IDs for use in URLs.
//!
//! An [`IdObfuscator`] turns an integer ID into an opaque string and back.
//! Every call carries a label naming the ID domain (usually the column the
//! ID lives in); the label used to decode must match the label used to
//! encode.

use std::collections::HashMap;
use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::cast::Cast;

/// Errors raised by an [`IdObfuscator`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObfuscatorError {
    /// No key is configured for the label.
    #[error("unknown obfuscation label '{0}'")]
    UnknownLabel(String),
    /// The encoded text is not well formed.
    #[error("malformed obfuscated ID")]
    Malformed,
    /// The encoded text is well formed but its tag does not verify under
    /// this label: it was produced for another label or altered.
    #[error("obfuscated ID does not belong to label '{0}'")]
    LabelMismatch(String),
    /// The ID cannot be represented under the label's configuration.
    #[error("ID {id} is out of range for label '{label}'")]
    OutOfRange {
        /// The rejected ID
        id: i64,
        /// The label it was encoded under
        label: String,
    },
    /// A [`KeyedObfuscator`] was built without a secret.
    #[error("obfuscation secret must not be empty")]
    EmptySecret,
}

/// Encodes and decodes database IDs under a label.
///
/// Implementations must be safe to share between request handlers; all
/// implementations in this crate are immutable after construction.
pub trait IdObfuscator {
    /// Encodes `id` for the ID domain `label`.
    ///
    /// # Errors
    ///
    /// Returns `ObfuscatorError` if the label is unknown or the ID cannot be
    /// represented.
    fn encode(&self, id: i64, label: &str) -> Result<String, ObfuscatorError>;

    /// Decodes an obfuscated ID that was encoded under `label`.
    ///
    /// `None` and the empty string decode to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `ObfuscatorError` on malformed input or a label mismatch.
    fn decode(&self, code: Option<&str>, label: &str) -> Result<Option<i64>, ObfuscatorError>;
}

impl<T: IdObfuscator + ?Sized> IdObfuscator for &T {
    fn encode(&self, id: i64, label: &str) -> Result<String, ObfuscatorError> {
        (**self).encode(id, label)
    }

    fn decode(&self, code: Option<&str>, label: &str) -> Result<Option<i64>, ObfuscatorError> {
        (**self).decode(code, label)
    }
}

/// Development obfuscator: IDs travel in plain decimal.
///
/// Labels are accepted but ignored. Use it in development and tests where
/// readable URLs matter more than hiding sequential IDs.
///
/// # Examples
///
/// ```
/// use cgi_core::{IdObfuscator, PlainObfuscator};
///
/// let codec = PlainObfuscator;
/// assert_eq!(codec.encode(42, "usr_id").unwrap(), "42");
/// assert_eq!(codec.decode(Some("42"), "usr_id").unwrap(), Some(42));
/// assert_eq!(codec.decode(None, "usr_id").unwrap(), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainObfuscator;

impl IdObfuscator for PlainObfuscator {
    fn encode(&self, id: i64, _label: &str) -> Result<String, ObfuscatorError> {
        Ok(id.to_string())
    }

    fn decode(&self, code: Option<&str>, _label: &str) -> Result<Option<i64>, ObfuscatorError> {
        match code {
            None | Some("") => Ok(None),
            Some(code) => <i64 as Cast>::cast(code)
                .map(Some)
                .map_err(|_| ObfuscatorError::Malformed),
        }
    }
}

/// Key material for one label of a [`KeyedObfuscator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelKey {
    /// Number of payload bytes, 1 through 8. IDs must fit in this many bytes.
    pub length: u8,
    /// Mixed with the codec secret into the label's MAC key
    pub key: u32,
    /// XOR-ed into the ID before sealing
    pub mask: u64,
}

type HmacSha256 = Hmac<Sha256>;

/// Bytes of the truncated HMAC-SHA256 tag carried by every code.
const TAG_LEN: usize = 4;

/// Label-keyed reference obfuscator.
///
/// Every label gets its own HMAC-SHA256 key, derived from the codec secret,
/// the label and its [`LabelKey`]. An ID is masked and written big-endian
/// into `length` bytes. The code is a truncated tag over the label and
/// those bytes, followed by the bytes XOR-ed with a pad derived from the
/// tag, rendered as lowercase hex.
///
/// [`decode`] recomputes the tag, so a code produced for another label (or
/// altered in transit) is rejected unless it hits a 32-bit tag by chance.
///
/// Whoever holds the secret can decode every code.
///
/// [`decode`]: IdObfuscator::decode
///
/// # Examples
///
/// ```
/// use cgi_core::{IdObfuscator, KeyedObfuscator, LabelKey};
///
/// let codec = KeyedObfuscator::builder(b"site secret")
///     .label("usr", LabelKey { length: 4, key: 0x5eed, mask: 0x1234_5678 })
///     .build()
///     .unwrap();
///
/// let code = codec.encode(42, "usr").unwrap();
/// assert_eq!(code.len(), 16);
/// assert_eq!(codec.decode(Some(&code), "usr").unwrap(), Some(42));
/// ```
#[derive(Clone)]
pub struct KeyedObfuscator {
    labels: HashMap<String, LabelCodec>,
}

impl KeyedObfuscator {
    /// Starts building an obfuscator keyed by `secret`.
    pub fn builder(secret: impl AsRef<[u8]>) -> KeyedObfuscatorBuilder {
        KeyedObfuscatorBuilder {
            secret: secret.as_ref().to_vec(),
            labels: HashMap::new(),
        }
    }

    fn label_codec(&self, label: &str) -> Result<&LabelCodec, ObfuscatorError> {
        self.labels
            .get(label)
            .ok_or_else(|| ObfuscatorError::UnknownLabel(label.to_string()))
    }
}

impl fmt::Debug for KeyedObfuscator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut labels: Vec<_> = self.labels.keys().collect();
        labels.sort();
        f.debug_struct("KeyedObfuscator")
            .field("labels", &labels)
            .finish_non_exhaustive()
    }
}

/// Builder for [`KeyedObfuscator`].
pub struct KeyedObfuscatorBuilder {
    secret: Vec<u8>,
    labels: HashMap<String, LabelKey>,
}

impl KeyedObfuscatorBuilder {
    /// Registers key material for a label, replacing any earlier entry.
    ///
    /// `length` is clamped to 1 through 8.
    pub fn label(mut self, label: impl Into<String>, key: LabelKey) -> Self {
        let key = LabelKey {
            length: key.length.clamp(1, 8),
            ..key
        };
        self.labels.insert(label.into(), key);
        self
    }

    /// Derives the per-label keys and finishes the obfuscator.
    ///
    /// # Errors
    ///
    /// Returns `ObfuscatorError::EmptySecret` if the secret is empty.
    pub fn build(self) -> Result<KeyedObfuscator, ObfuscatorError> {
        if self.secret.is_empty() {
            return Err(ObfuscatorError::EmptySecret);
        }
        let master = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| ObfuscatorError::EmptySecret)?;

        let labels: HashMap<String, LabelCodec> = self
            .labels
            .into_iter()
            .map(|(label, key)| {
                let codec = LabelCodec::derive(&master, &label, key)?;
                Ok((label, codec))
            })
            .collect::<Result<_, ObfuscatorError>>()?;

        Ok(KeyedObfuscator { labels })
    }
}

impl fmt::Debug for KeyedObfuscatorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedObfuscatorBuilder")
            .field("secret", &"[REDACTED]")
            .field("labels", &self.labels)
            .finish()
    }
}

/// Key material of one label, ready for use.
#[derive(Clone)]
struct LabelCodec {
    key: LabelKey,
    mac: HmacSha256,
}

impl LabelCodec {
    fn derive(master: &HmacSha256, label: &str, key: LabelKey) -> Result<Self, ObfuscatorError> {
        let mut kdf = master.clone();
        kdf.update(b"label");
        kdf.update(label.as_bytes());
        kdf.update(&[0xff]);
        kdf.update(&key.key.to_be_bytes());
        kdf.update(&key.mask.to_be_bytes());
        let label_key = kdf.finalize().into_bytes();

        let mac = HmacSha256::new_from_slice(&label_key).map_err(|_| ObfuscatorError::EmptySecret)?;
        Ok(Self { key, mac })
    }

    fn len(&self) -> usize {
        usize::from(self.key.length)
    }

    /// MAC over the label and the masked payload; truncated to the tag.
    fn authenticator(&self, label: &str, payload: &[u8]) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(b"tag");
        mac.update(label.as_bytes());
        mac.update(&[0xff]);
        mac.update(payload);
        mac
    }

    /// Keystream that hides the payload, selected by its tag.
    fn pad(&self, tag: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(b"pad");
        mac.update(tag);
        mac.finalize().into_bytes().to_vec()
    }
}

impl IdObfuscator for KeyedObfuscator {
    fn encode(&self, id: i64, label: &str) -> Result<String, ObfuscatorError> {
        let codec = self.label_codec(label)?;
        let len = codec.len();

        let out_of_range = || ObfuscatorError::OutOfRange {
            id,
            label: label.to_string(),
        };
        let value = u64::try_from(id).map_err(|_| out_of_range())?;
        if len < 8 && value >> (8 * len) != 0 {
            return Err(out_of_range());
        }

        let masked = (value ^ codec.key.mask).to_be_bytes();
        let payload = &masked[8 - len..];
        let digest = codec.authenticator(label, payload).finalize().into_bytes();
        let tag = &digest[..TAG_LEN];

        let mut bytes = Vec::with_capacity(TAG_LEN + len);
        bytes.extend_from_slice(tag);
        bytes.extend(payload.iter().zip(codec.pad(tag)).map(|(b, p)| b ^ p));

        Ok(hex::encode(bytes))
    }

    fn decode(&self, code: Option<&str>, label: &str) -> Result<Option<i64>, ObfuscatorError> {
        let code = match code {
            None | Some("") => return Ok(None),
            Some(code) => code,
        };
        let codec = self.label_codec(label)?;
        let len = codec.len();

        let bytes = hex::decode(code).map_err(|_| ObfuscatorError::Malformed)?;
        if bytes.len() != TAG_LEN + len {
            return Err(ObfuscatorError::Malformed);
        }

        let (tag, sealed) = bytes.split_at(TAG_LEN);
        let payload: Vec<u8> = sealed.iter().zip(codec.pad(tag)).map(|(b, p)| b ^ p).collect();
        codec
            .authenticator(label, &payload)
            .verify_truncated_left(tag)
            .map_err(|_| ObfuscatorError::LabelMismatch(label.to_string()))?;

        let mut buf = [0u8; 8];
        buf[8 - len..].copy_from_slice(&payload);
        let window = if len == 8 { u64::MAX } else { (1u64 << (8 * len)) - 1 };
        let value = (u64::from_be_bytes(buf) ^ codec.key.mask) & window;

        i64::try_from(value)
            .map(Some)
            .map_err(|_| ObfuscatorError::Malformed)
    }
}
