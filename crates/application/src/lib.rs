//! cdnscope application layer: ports and the CDN classification engine.
pub mod ports;
pub mod services;
pub mod use_cases;
