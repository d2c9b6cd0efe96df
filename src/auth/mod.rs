pub mod digest;

pub use digest::{digest_secret, verify_secret};
