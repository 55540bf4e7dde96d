//! API 处理器

pub mod cache;
pub mod health;
pub mod languages;
pub mod preferences;
pub mod translation;

pub use cache::*;
pub use health::*;
pub use languages::*;
pub use preferences::*;
pub use translation::*;
