mod client;
mod constants;

pub use client::{CatboxClient, CatboxClientConfig};
pub use constants::{CATBOX_API_URL, LITTERBOX_API_URL};
