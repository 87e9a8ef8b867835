/// Support module copied verbatim into the build output
///
/// Loads `source-map-support` from the consumer's `node_modules` and is a
/// no-op when that package is not installed.
pub const SUPPORT_PAYLOAD: &str = include_str!("../support/source-map-support-register.js");
