pub mod response;

pub use response::{FallbackDocument, ResponseDocument};
