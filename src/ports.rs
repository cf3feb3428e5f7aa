pub mod platform;
pub mod push;
pub mod remote;
pub mod spawn;
pub mod worker;

pub use platform::{Capabilities, PlatformFuture, PushPlatform};
pub use push::PushSender;
pub use remote::RemoteSync;
pub use spawn::{BackgroundTask, TaskSpawner};
pub use worker::{HostFuture, NotificationId, WorkerHost};
