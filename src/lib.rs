// src/lib.rs

pub mod api;
pub mod config;
pub mod confirm;
pub mod error;
pub mod manager;
pub mod mock_test;
pub mod models;
pub mod picker;
pub mod reorder;
pub mod resources;
pub mod view;

pub use error::AdminError;
pub use manager::{CollectionManager, Modal};
