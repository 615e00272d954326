//! Driver coordinate resolution
//!
//! Resolves a full (group, artifact, version) triple for a JDBC driver
//! from whatever partial information the caller has: explicit
//! coordinates, a driver jar file name, or a connector name plus
//! connection type.

pub mod lookup;
pub mod resolve;

pub use lookup::{group_id_for_artifact, UNKNOWN_GROUP_ID};
pub use resolve::{
    resolve_from_descriptor, CoordinateRequest, CoordinateResolver, DriverCoordinate,
};
