use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use constant_time_eq::constant_time_eq;
use hmac::Hmac;
use hmac::Mac;
use sha2::Sha512;

use super::claims::Claims;
use super::errors::ConfigError;
use super::errors::TokenError;

type HmacSha512 = Hmac<Sha512>;

/// Header segment of every token, signed byte for byte as written here.
pub const HEADER: &str = r#"{"alg":"HS512","typ":"JWT"}"#;

/// Shortest accepted shared secret (256 bits).
pub const MIN_SECRET_LENGTH: usize = 32;

/// Borrowed view of the three segments of a compact token.
#[derive(Debug, Clone, Copy)]
pub struct TokenParts<'a> {
    signing_input: &'a str,
    payload: &'a str,
    signature: &'a str,
}

impl<'a> TokenParts<'a> {
    /// Split a compact token into its segments.
    ///
    /// # Errors
    /// * `Format` - Not exactly three non-empty dot-separated segments
    pub fn split(token: &'a str) -> Result<Self, TokenError> {
        let mut segments = token.split('.');
        match (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) {
            (Some(header), Some(payload), Some(signature), None)
                if !header.is_empty() && !payload.is_empty() && !signature.is_empty() =>
            {
                Ok(Self {
                    signing_input: &token[..header.len() + 1 + payload.len()],
                    payload,
                    signature,
                })
            }
            _ => Err(TokenError::Format(
                "expected three non-empty segments".to_string(),
            )),
        }
    }
}

/// Compact token encoder/decoder signing with HMAC-SHA512.
///
/// Knows nothing about users or sessions: it turns claims into a signed
/// string and back.
#[derive(Clone)]
pub struct TokenCodec {
    mac: HmacSha512,
}

impl TokenCodec {
    /// Create a codec keyed with the shared secret.
    ///
    /// # Arguments
    /// * `secret` - Shared HMAC secret, at least 32 bytes
    ///
    /// # Errors
    /// * `SecretTooShort` - Secret shorter than 32 bytes
    pub fn new(secret: &[u8]) -> Result<Self, ConfigError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::SecretTooShort {
                min: MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        let mac = HmacSha512::new_from_slice(secret)
            .map_err(|e| ConfigError::InvalidSecret(e.to_string()))?;

        Ok(Self { mac })
    }

    /// Encode claims into a signed compact token.
    ///
    /// # Returns
    /// `header.payload.signature`, each segment base64url without padding
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let payload =
            serde_json::to_vec(claims).map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(HEADER),
            URL_SAFE_NO_PAD.encode(payload)
        );
        let signature = self.sign(signing_input.as_bytes());

        Ok(format!(
            "{}.{}",
            signing_input,
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Decode the claims of a token without checking its signature.
    ///
    /// Never use the result for authorization on its own; pair it with
    /// [`TokenCodec::verify_signature`].
    ///
    /// # Errors
    /// * `Format` - Bad segment layout, bad base64, or bad claims
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let parts = TokenParts::split(token)?;
        self.decode_parts(&parts)
    }

    /// Recompute the signature of a token and compare it in constant time.
    pub fn verify_signature(&self, token: &str) -> bool {
        match TokenParts::split(token) {
            Ok(parts) => self.verify_parts(&parts),
            Err(_) => false,
        }
    }

    pub(crate) fn decode_parts(&self, parts: &TokenParts<'_>) -> Result<Claims, TokenError> {
        let payload = URL_SAFE_NO_PAD
            .decode(parts.payload)
            .map_err(|e| TokenError::Format(format!("invalid payload encoding: {}", e)))?;

        Claims::from_json(&payload)
    }

    pub(crate) fn verify_parts(&self, parts: &TokenParts<'_>) -> bool {
        let provided = match URL_SAFE_NO_PAD.decode(parts.signature) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        let expected = self.sign(parts.signing_input.as_bytes());

        constant_time_eq(&expected, &provided)
    }

    fn sign(&self, input: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(input);
        mac.finalize().into_bytes().to_vec()
    }
}
