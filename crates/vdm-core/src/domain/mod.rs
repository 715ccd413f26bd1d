//! Domain identifiers for the VDM input relay.
//!
//! Nothing in here touches the OS, the network, or the UI.  Both the client
//! and anything that decodes its wire messages agree on these types.

/// Remote display identifiers.
///
/// See [`display::DisplayId`] for the main type.
pub mod display;
