//! HTTP access to overlay assets.
//!
//! Client-side only: real requests via `gloo-net`.

pub mod assets;
