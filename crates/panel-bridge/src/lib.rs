pub mod dispatch;
pub mod messages;
pub mod session;

pub use dispatch::{dispatch, dispatch_json};
pub use session::{BridgeError, PanelSession};
