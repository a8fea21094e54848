#![allow(unused_imports)]
pub mod calendar_helpers;
pub mod mock_store;

pub use calendar_helpers::*;
pub use mock_store::*;
