pub mod authors;
pub mod config;
pub mod news;
pub mod status;
pub mod sync;
pub mod topics;
