//! Infrastructure layer for the input relay client.
//!
//! Contains the adapters around the application layer: where captured input
//! comes from, how encoded events reach the remote device, and where the
//! configuration file lives.
//!
//! **Dependency rule**: this layer may depend on `application` and `vdm_core`.
//! The application layer only imports [`input_capture::CapturedInput`], the
//! command type the capture layer hands it.

pub mod input_capture;
pub mod storage;
pub mod transport;
