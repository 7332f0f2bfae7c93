//! Visit-slot index space.
//!
//! Separates logical route positions from physical locations so that
//! several vehicles can share a depot without aliasing each other's
//! start and end points.

mod space;

pub use space::RouteIndexSpace;
