use crate::types::push::SubscriptionRecord;

pub trait PushSender: Clone + Send + Sync + 'static {
    type Error: std::fmt::Display + Send + Sync + 'static;
    type Fut<'a>: Future<Output = Result<(), Self::Error>> + Send + 'a
    where
        Self: 'a;

    fn send<'a>(&'a self, subscription: &'a SubscriptionRecord, payload: &'a str)
    -> Self::Fut<'a>;

    /// True when the push service reports the subscription as permanently gone.
    fn is_expired(&self, error: &Self::Error) -> bool;
}
