use base64::{STANDARD, URL_SAFE, decode_config, encode_config};
use thiserror::Error;

use crate::types::push::PushSubscription;
use crate::types::sync::SyncForm;

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("invalid base64 key material: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("key material is empty")]
    Empty,
}

/// Decodes a URL-safe base64 key (such as a VAPID public key) into raw bytes.
///
/// The input is padded to a multiple of four with `=`, `-` and `_` are mapped
/// back to `+` and `/`, and the result goes through the standard decoder. Push
/// key strings are routinely published without padding, so the padding step is
/// not optional.
pub fn url_base64_to_bytes(input: &str) -> Result<Vec<u8>, EncodingError> {
    let padding = (4 - input.len() % 4) % 4;
    let mut base64 = String::with_capacity(input.len() + padding);
    base64.push_str(input);
    base64.extend(std::iter::repeat_n('=', padding));
    let base64 = base64.replace('-', "+").replace('_', "/");

    let bytes = decode_config(base64, STANDARD)?;
    if bytes.is_empty() {
        return Err(EncodingError::Empty);
    }
    Ok(bytes)
}

/// Standard (padded) base64, the text form `/subscribe` expects for keys.
pub fn encode_key(bytes: &[u8]) -> String {
    encode_config(bytes, STANDARD)
}

/// Validates a standard base64 key received from a client.
pub fn decode_key(text: &str) -> Result<Vec<u8>, EncodingError> {
    let bytes = decode_config(text.trim(), STANDARD)?;
    if bytes.is_empty() {
        return Err(EncodingError::Empty);
    }
    Ok(bytes)
}

/// Re-encodes a standard base64 key into the URL-safe alphabet used by the
/// web-push encryption layer.
pub fn standard_to_url_safe(text: &str) -> Result<String, EncodingError> {
    let bytes = decode_key(text)?;
    Ok(encode_config(bytes, URL_SAFE))
}

pub fn sync_form(subscription: &PushSubscription) -> SyncForm {
    SyncForm {
        endpoint: subscription.endpoint.clone(),
        key: encode_key(&subscription.p256dh),
        auth: encode_key(&subscription.auth),
    }
}
