//! Application services for the portal's permission handling.

#![forbid(unsafe_code)]

mod codec_config;
mod permission_codec_service;

pub use codec_config::{CodecConfig, DECODE_MODE_ENV, DecodeMode};
pub use permission_codec_service::{DecodeReport, PermissionCodec};
