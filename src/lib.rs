//! # qrsmith
//!
//! A Rust library for generating byte-mode QR codes with Reed-Solomon error
//! correction, automatic version selection and penalty-scored masking.
//!
//! ## Features
//!
//! - **QR Code Generation**: Byte mode symbols across all 40 versions
//! - **Reed-Solomon Error Correction**: Configurable levels (L, M, Q, H), with
//!   the strongest level that fits chosen automatically
//! - **Masking**: All 8 mask patterns scored by the standard penalty rules
//! - **Rendering**: Grayscale images or terminal-friendly strings
//!
//! ## Quick Start
//!
//! ```rust
//! use qrsmith::QrBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Simplest usage: the smallest version and strongest error correction
//! // level that fit the data are chosen automatically
//! let symbol = QrBuilder::new(b"Hello, World!").build()?;
//!
//! println!("{}", symbol.to_str(1));
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust,no_run
//! use qrsmith::{QrBuilder, ECLevel, MaskPattern, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = QrBuilder::new(b"Hello, World!")
//!     .ec_level(ECLevel::Q)          // pin the error correction level
//!     .max_version(Version::new(10)) // cap the version search
//!     .mask(MaskPattern::new(3))     // pin the mask, skipping evaluation
//!     .build()?;
//!
//! let img = symbol.render(4); // 4 pixels per module
//! img.save("hello.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

#![allow(clippy::items_after_test_module, dead_code)]

pub mod builder;
pub(crate) mod common;

pub use builder::{Module, QrBuilder, Symbol};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Version};
pub use common::{QrError, QrResult};
