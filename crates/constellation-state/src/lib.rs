#![doc = include_str!("../README.md")]

/// This module provides a generic repository interface for storing and retrieving items.
pub mod repository;

mod file;
mod memory;

/// Type-safe settings repository for storing application configuration and state.
pub mod settings;

pub use file::JsonFileRepository;
pub use memory::InMemoryRepository;
pub use repository::{Repository, RepositoryError, RepositoryItem};
pub use settings::{Key, Setting, SettingItem, SettingsError};
