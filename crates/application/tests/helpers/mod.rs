#![allow(dead_code)]

pub mod mock_ports;

pub use mock_ports::{
    build_classifier, endpoint, endpoints, ip, loc, MockDnsLookup, MockGeoLocator,
};
