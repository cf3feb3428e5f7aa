use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;

use crate::encoding::{self, EncodingError};
use crate::ports;
use crate::types::push::{SubscriptionRecord, VapidConfig};
use crate::types::sync::{SyncAck, SyncAction, SyncForm};

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSpawner;

impl ports::TaskSpawner for TokioSpawner {
    type Handle = tokio::task::JoinHandle<()>;

    fn spawn(&self, task: ports::BackgroundTask) -> Self::Handle {
        tokio::spawn(task)
    }
}

/// Posts subscription changes to the server as form data.
#[derive(Clone)]
pub struct HttpRemoteSync {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemoteSync {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn url_for(&self, action: SyncAction) -> String {
        format!("{}{}", self.base_url, action.path())
    }
}

impl ports::RemoteSync for HttpRemoteSync {
    type Error = reqwest::Error;
    type Fut = Pin<Box<dyn Future<Output = Result<SyncAck, Self::Error>> + Send + 'static>>;

    fn sync(&self, action: SyncAction, form: SyncForm) -> Self::Fut {
        let request = self.client.post(self.url_for(action)).form(&form);
        Box::pin(async move {
            request
                .send()
                .await?
                .error_for_status()?
                .json::<SyncAck>()
                .await
        })
    }
}

#[derive(Debug, Error)]
pub enum WebPushSendError {
    #[error(transparent)]
    Push(#[from] web_push::WebPushError),
    #[error("stored key material is unusable: {0}")]
    Keys(#[from] EncodingError),
}

#[derive(Clone)]
pub struct WebPushSender {
    vapid: VapidConfig,
    ttl: u32,
    client: Arc<web_push::WebPushClient>,
}

impl WebPushSender {
    pub fn new(vapid: VapidConfig, ttl: u32) -> Result<Self, web_push::WebPushError> {
        let client = web_push::WebPushClient::new()?;
        Ok(Self {
            vapid,
            ttl,
            client: Arc::new(client),
        })
    }
}

impl ports::PushSender for WebPushSender {
    type Error = WebPushSendError;
    type Fut<'a>
        = Pin<Box<dyn Future<Output = Result<(), Self::Error>> + Send + 'a>>
    where
        Self: 'a;

    fn send<'a>(
        &'a self,
        subscription: &'a SubscriptionRecord,
        payload: &'a str,
    ) -> Self::Fut<'a> {
        Box::pin(async move {
            // Browsers hand us standard base64; the encryption layer wants the
            // URL-safe alphabet.
            let subscription_info = web_push::SubscriptionInfo::new(
                subscription.endpoint.clone(),
                encoding::standard_to_url_safe(&subscription.key)?,
                encoding::standard_to_url_safe(&subscription.auth)?,
            );
            let mut builder = web_push::WebPushMessageBuilder::new(&subscription_info)?;
            builder.set_payload(web_push::ContentEncoding::Aes128Gcm, payload.as_bytes());
            builder.set_ttl(self.ttl);
            let mut signature_builder = web_push::VapidSignatureBuilder::from_base64(
                &self.vapid.private_key,
                web_push::URL_SAFE_NO_PAD,
                &subscription_info,
            )?;
            signature_builder.add_claim("sub", self.vapid.subject.as_str());
            builder.set_vapid_signature(signature_builder.build()?);
            self.client.send(builder.build()?).await?;
            Ok::<(), WebPushSendError>(())
        })
    }

    /// Only 404 and 410 prove the endpoint is gone. A 403 lands in the same
    /// `BadRequest` bucket as malformed requests, so it is kept.
    fn is_expired(&self, error: &Self::Error) -> bool {
        matches!(
            error,
            WebPushSendError::Push(
                web_push::WebPushError::EndpointNotValid | web_push::WebPushError::EndpointNotFound
            )
        )
    }
}
