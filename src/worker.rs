pub mod context;
pub mod handler;

pub use context::{CLICK_URL_KEY, WorkerContext};
pub use handler::{
    NotificationClickEvent, PushDeliveryHandler, PushEvent, WaitUntil, WorkerError,
};
