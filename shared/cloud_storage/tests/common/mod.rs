// Not every utils is used in every test, so we allow dead code
#![allow(unused_imports, dead_code)]

mod aws_setup;
pub use aws_setup::*;
mod bucket_utils;
pub use bucket_utils::*;
mod queue_utils;
pub use queue_utils::*;
