//! # qrgrid
//!
//! A QR Code Model 2 encoder that produces an immutable module grid with
//! per-module classification metadata.
//!
//! `qrgrid` encodes Unicode text or arbitrary bytes into QR codes
//! conforming to ISO/IEC 18004: versions 1 to 40, all four error
//! correction levels (Low, Medium, Quartile, High), and the numeric,
//! alphanumeric, byte, and ECI segment modes. Kanji mode is representable
//! but never auto-selected. Beyond the dark/light grid, every module
//! reports what it was drawn as (finder, alignment, timing, format,
//! version, data), so downstream renderers can style function and data
//! modules independently.
//!
//! ## Features
//!
//! - **Encoding modes**: numeric, alphanumeric, byte, and ECI designators,
//!   with automatic selection of the tightest applicable mode.
//! - **Error correction**: four levels, with optional boosting to the
//!   highest level that still fits the chosen version.
//! - **Masking**: all eight patterns, selected automatically by the
//!   standard penalty score or pinned by the caller.
//! - **Module metadata**: a [`ModuleType`] per module, stable under
//!   masking.
//! - **Rendering helpers**: console art, SVG strings, and in-memory
//!   [`image`] buffers; no file I/O.
//! - **Safety**: pure Rust, `#![forbid(unsafe_code)]`, no panics on bad
//!   input (errors are returned; assertions guard internal invariants
//!   only).
//!
//! ## Example
//!
//! ```rust
//! use qrgrid::{QrCode, QrCodeEcc};
//!
//! let qr = QrCode::encode_text("Hello, World!", QrCodeEcc::Medium)?;
//! assert_eq!(qr.size(), i32::from(qr.version().value()) * 4 + 17);
//! let svg = qrgrid::helper::to_svg_string(&qr, 4);
//! assert!(svg.starts_with("<?xml"));
//! # Ok::<(), qrgrid::Error>(())
//! ```
//!
//! Encoding with full control over version range, mask, and boosting:
//!
//! ```rust
//! use qrgrid::{Mask, QrCode, QrCodeEcc, QrSegment, Version};
//!
//! let segs = QrSegment::make_segments("314159265358979323846")?;
//! let qr = QrCode::encode_segments(
//!     &segs,
//!     QrCodeEcc::Quartile,
//!     Version::new(2),
//!     Version::new(10),
//!     Some(Mask::new(3)),
//!     false,
//! )?;
//! assert!(qr.version() >= Version::new(2));
//! assert_eq!(qr.mask(), Mask::new(3));
//! # Ok::<(), qrgrid::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`qrcode`]: the encoder pipeline and grid builder.
//! - [`segment`]: segment factories and capacity arithmetic.
//! - [`bits`]: the bit buffer shared by all producers.
//! - [`reed_solomon`]: GF(2^8) arithmetic and ECC generation.
//! - [`tables`]: version capacity tables and layout schedules.
//! - [`helper`]: rendering utilities over the public surface.
//!
//! ## Error handling
//!
//! Fallible operations return [`Error`]: unencodable characters, values
//! outside their legal ranges, data that fits no allowed version
//! ([`Error::DataTooLong`] carries the bit counts), contradictory
//! parameters, and out-of-bounds reads.

#![forbid(unsafe_code)]

pub mod bits;
pub mod error;
pub mod helper;
pub mod qrcode;
pub mod reed_solomon;
pub mod segment;
pub mod tables;

pub use bits::BitBuffer;
pub use error::{DataTooLong, Error};
pub use qrcode::{Mask, ModuleType, QrCode, QrCodeEcc, Version};
pub use segment::{QrSegment, QrSegmentMode};
