#![no_std]

pub mod class;
pub mod descriptor;
pub mod setup;
pub mod writer;
