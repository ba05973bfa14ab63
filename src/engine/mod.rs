/*!
 * File Engine
 * Path-scoped filesystem operations over a sandbox root
 *
 * Every operation validates its inputs, resolves paths through the sandbox,
 * checks live state through the raw adapter, and maps failures to `FsError`.
 */

mod executor;
mod mutate;
mod query;
mod transfer;

pub use executor::{CrossDevicePolicy, FileEngine, FileEngineBuilder};
