pub mod push;
pub mod sync;
