pub mod bars;
pub mod binner;
pub mod table;

pub use bars::{allocate, bucket_length};
pub use binner::{Bins, Bucket, Histogram};
pub use table::render;
