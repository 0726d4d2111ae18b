pub mod cli;
pub mod events;
pub mod extract;
pub mod listeners;
pub mod processors;
pub mod shutdown;

pub use extract::{extract_domain, try_extract_domain};
