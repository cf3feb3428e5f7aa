use base64::{URL_SAFE_NO_PAD, encode_config};
use jwt_simple::prelude::ES256KeyPair;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::config;
use crate::encoding;
use crate::types::push::VapidConfig;

/// Uncompressed P-256 point, the only application server key format browsers
/// accept.
const PUBLIC_KEY_LEN: usize = 65;

#[derive(Debug, Clone)]
pub struct VapidCredentials {
    pub private_key: String,
    pub public_key: String,
}

#[derive(Debug, Clone)]
pub(crate) enum VapidConfigStatus {
    Missing,
    Incomplete,
    Invalid(String),
    Ready(VapidConfig),
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|value| value.trim()).filter(|value| !value.is_empty())
}

pub(crate) fn load_vapid_config(config: &config::AppConfig) -> VapidConfigStatus {
    let private_key = non_blank(config.vapid_private_key.as_ref());
    let public_key = non_blank(config.vapid_public_key.as_ref());
    let subject = non_blank(config.vapid_subject.as_ref());

    let (private_key, public_key, subject) = match (private_key, public_key, subject) {
        (Some(private_key), Some(public_key), Some(subject)) => {
            (private_key, public_key, subject)
        }
        (None, None, None) => return VapidConfigStatus::Missing,
        _ => return VapidConfigStatus::Incomplete,
    };

    match encoding::url_base64_to_bytes(public_key) {
        Ok(bytes) if bytes.len() == PUBLIC_KEY_LEN => {}
        Ok(bytes) => {
            return VapidConfigStatus::Invalid(format!(
                "public key decodes to {} bytes, expected {PUBLIC_KEY_LEN}",
                bytes.len()
            ));
        }
        Err(err) => return VapidConfigStatus::Invalid(err.to_string()),
    }

    VapidConfigStatus::Ready(VapidConfig {
        private_key: private_key.to_string(),
        public_key: public_key.to_string(),
        subject: subject.to_string(),
    })
}

pub fn generate_vapid_credentials() -> Result<VapidCredentials, web_push::WebPushError> {
    let mut rng = OsRng;
    generate_vapid_credentials_with_rng(&mut rng)
}

pub(crate) fn generate_vapid_credentials_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<VapidCredentials, web_push::WebPushError> {
    let key_pair = generate_es256_keypair_with_rng(rng);
    let private_key = encode_config(key_pair.to_bytes(), URL_SAFE_NO_PAD);
    let public_key =
        web_push::VapidSignatureBuilder::from_base64_no_sub(&private_key, URL_SAFE_NO_PAD)?
            .get_public_key();
    let public_key = encode_config(public_key, URL_SAFE_NO_PAD);

    Ok(VapidCredentials {
        private_key,
        public_key,
    })
}

fn generate_es256_keypair_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> ES256KeyPair {
    let mut key_bytes = [0u8; 32];
    loop {
        rng.fill_bytes(&mut key_bytes);
        if let Ok(key_pair) = ES256KeyPair::from_bytes(&key_bytes) {
            return key_pair;
        }
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn vapid_app_config(
        private_key: Option<&str>,
        public_key: Option<&str>,
        subject: Option<&str>,
    ) -> config::AppConfig {
        config::AppConfig {
            vapid_private_key: private_key.map(str::to_string),
            vapid_public_key: public_key.map(str::to_string),
            vapid_subject: subject.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn generate_vapid_credentials_with_rng__should_pair_public_key_with_private_key() {
        // Given
        let mut rng = StdRng::from_seed([7u8; 32]);

        // When
        let credentials =
            generate_vapid_credentials_with_rng(&mut rng).expect("credentials should generate");

        // Then
        let public_key =
            encoding::url_base64_to_bytes(&credentials.public_key).expect("decode public key");
        assert_eq!(public_key.len(), PUBLIC_KEY_LEN);
        assert_eq!(public_key[0], 0x04);
        let derived = web_push::VapidSignatureBuilder::from_base64_no_sub(
            &credentials.private_key,
            URL_SAFE_NO_PAD,
        )
        .expect("private key should load")
        .get_public_key();
        assert_eq!(public_key, derived);
    }

    #[test]
    fn generate_vapid_credentials_with_rng__should_follow_the_seed() {
        // When
        let first = generate_vapid_credentials_with_rng(&mut StdRng::from_seed([7u8; 32]))
            .expect("first");
        let again = generate_vapid_credentials_with_rng(&mut StdRng::from_seed([7u8; 32]))
            .expect("again");
        let other = generate_vapid_credentials_with_rng(&mut StdRng::from_seed([8u8; 32]))
            .expect("other");

        // Then
        assert_eq!(first.private_key, again.private_key);
        assert_eq!(first.public_key, again.public_key);
        assert_ne!(first.public_key, other.public_key);
    }

    #[test]
    fn load_vapid_config__should_be_ready_with_all_values() {
        // Given
        let config = vapid_app_config(
            Some("private"),
            Some(config::DEFAULT_APPLICATION_SERVER_KEY),
            Some("mailto:ops@example.com"),
        );

        // When
        let status = load_vapid_config(&config);

        // Then
        match status {
            VapidConfigStatus::Ready(vapid) => {
                assert_eq!(vapid.subject, "mailto:ops@example.com");
                assert_eq!(vapid.public_key, config::DEFAULT_APPLICATION_SERVER_KEY);
            }
            other => panic!("expected ready config, got {other:?}"),
        }
    }

    #[test]
    fn load_vapid_config__should_treat_blank_values_as_missing() {
        assert!(matches!(
            load_vapid_config(&vapid_app_config(None, None, None)),
            VapidConfigStatus::Missing
        ));
        assert!(matches!(
            load_vapid_config(&vapid_app_config(Some(" "), None, None)),
            VapidConfigStatus::Missing
        ));
        assert!(matches!(
            load_vapid_config(&vapid_app_config(Some("private"), None, Some("mailto:x"))),
            VapidConfigStatus::Incomplete
        ));
    }

    #[test]
    fn load_vapid_config__should_reject_short_public_key() {
        // Given
        let config = vapid_app_config(Some("private"), Some("AAAA"), Some("mailto:x"));

        // When
        let status = load_vapid_config(&config);

        // Then
        assert!(matches!(status, VapidConfigStatus::Invalid(_)));
    }
}
