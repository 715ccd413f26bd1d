//! Application layer of the input relay client.
//!
//! Everything here is synchronous and free of I/O.  The infrastructure layer
//! feeds captured input in and carries encoded events out; these modules
//! decide where each event goes.
//!
//! # Sub-modules
//!
//! - **`focus`** – The `FocusRegistry`: which remote display currently
//!   receives untargeted input, the set of displays eligible for focus, and
//!   the listeners told about changes.
//!
//! - **`settings`** – The user's `InputPolicy` (which focus-dependent device
//!   types are enabled) and the shared holder the router reads it from.
//!
//! - **`route_input`** – The `InputRouter`: translates raw key, touch and
//!   mouse events into wire messages and sends them to an explicit or the
//!   focused display.  Also synthesizes back and home navigation.
//!
//! - **`session`** – Wires one registry, policy and router together and keeps
//!   focus tracking in step with policy changes.

pub mod focus;
pub mod route_input;
pub mod session;
pub mod settings;
