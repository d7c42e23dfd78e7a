//! Shared error marker trait for the `netcode-*` workspace crates.
//!
//! Every crate-local error enum implements this trait so that call
//! sites which are generic over "some coder error" can bound on it
//! without depending on a specific crate's concrete error type.

/// Marker trait implemented by every error type in this workspace.
///
/// Carries no methods beyond `std::error::Error` itself; it exists to
/// give generic code a single bound to depend on.
pub trait NetCodeFault: std::error::Error {}
