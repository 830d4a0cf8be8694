//! umlgen Core Types and Definitions
//!
//! This crate provides the foundational types shared by the umlgen layout
//! engine and its front ends:
//!
//! - **Geometry**: grid points, box sizes and placed class boxes ([`geometry`] module)
//! - **Colors**: CSS color parsing for style configuration ([`color::Color`])
//! - **Semantic**: the class diagram model consumed by the engine ([`semantic`] module)

pub mod color;
pub mod geometry;
pub mod semantic;
