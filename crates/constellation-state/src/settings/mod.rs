//! Type-safe settings stored on top of a [`Repository`](crate::Repository).
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use constellation_state::{InMemoryRepository, Setting, SettingItem, register_setting_key};
//!
//! register_setting_key!(const ORDER: Vec<String> = "sortableList");
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let setting = Setting::new(Arc::new(InMemoryRepository::<SettingItem>::new()), ORDER);
//!
//! setting.update(vec!["b".to_string(), "a".to_string()]).await.unwrap();
//! assert_eq!(setting.get().await.unwrap().unwrap().len(), 2);
//!
//! setting.delete().await.unwrap();
//! assert!(setting.get().await.unwrap().is_none());
//! # }
//! ```

mod key;
mod setting;

pub use key::Key;
pub use setting::{Setting, SettingItem, SettingsError};
