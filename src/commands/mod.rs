pub mod config;
pub mod dispatch;
pub mod list;
pub mod select;
pub mod session;
pub mod visibility;

pub use config::*;
pub use dispatch::*;
pub use list::*;
pub use select::*;
pub use visibility::*;
