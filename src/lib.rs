pub mod catalog;
pub mod credentials;
pub mod downloader;
pub mod error;
mod fs_utils;
pub mod html;
pub mod portal;
pub mod session;
