pub mod cidr_table;

pub use cidr_table::CidrGeoTable;
