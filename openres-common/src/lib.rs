/*
This code is part of the OpenRES hydrogeomorphic analysis library.
Authors: OpenRES developers
Created: 02/06/2025
Last Modified: 16/10/2026
License: MIT
*/

pub mod algorithms;
pub mod configs;
pub mod error;
pub mod structures;
pub mod utils;

pub use error::{Error, Result};
