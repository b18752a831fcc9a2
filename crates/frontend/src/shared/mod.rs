pub mod collection;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod http;
pub mod icons;
pub mod list_utils;
pub mod modal;
pub mod notifications;
pub mod page_frame;
pub mod state;
