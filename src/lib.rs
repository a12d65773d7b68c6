#![no_std]

extern crate alloc;

pub mod jsf;
pub mod limbs;
pub mod mcg;

pub use jsf::*;
pub use mcg::*;
pub use rand_core::*;
