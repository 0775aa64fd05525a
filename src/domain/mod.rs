pub mod user;
pub mod lead;
pub mod notification;

pub use user::*;
pub use lead::*;
pub use notification::*;
