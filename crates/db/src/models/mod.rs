//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` entity structs matching the database rows
//! - `Deserialize` request payloads as sent by clients
//! - Validated insert/update DTOs consumed by the repositories

pub mod template;
