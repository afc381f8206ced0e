//! cdnscope infrastructure: DNS wire adapters, geo table and file I/O.
pub mod dns;
pub mod files;
pub mod geo;
