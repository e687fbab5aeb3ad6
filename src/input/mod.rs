//! Content file discovery and the load-once content store.
pub mod content;
mod error;
pub mod store;

pub use error::ContentError;
pub use store::{
    ContentStore,
    global,
    install_global,
};
