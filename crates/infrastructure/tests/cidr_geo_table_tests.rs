use cdnscope_application::ports::GeoLocator;
use cdnscope_domain::{DomainError, GeoLocation};
use cdnscope_infrastructure::geo::CidrGeoTable;
use std::io::Write;
use std::net::Ipv4Addr;

const TABLE: &str = "\
# cidr,country,region,city
203.0.113.0/24, US, California, San Jose
203.0.113.128/25, US, Virginia, Ashburn
198.51.100.0/24,DE,Hesse,Frankfurt
192.0.2.0/24,JP,Tokyo,Tokyo
";

#[test]
fn test_parse_skips_comments() {
    let table = CidrGeoTable::parse(TABLE);

    assert_eq!(table.len(), 4);
}

#[test]
fn test_locate_exact_block() {
    let table = CidrGeoTable::parse(TABLE);

    let location = table.locate(Ipv4Addr::new(198, 51, 100, 20));

    assert_eq!(location, GeoLocation::new("DE", "Hesse", "Frankfurt"));
}

#[test]
fn test_locate_prefers_longest_prefix() {
    let table = CidrGeoTable::parse(TABLE);

    assert_eq!(&*table.locate(Ipv4Addr::new(203, 0, 113, 200)).city, "Ashburn");
    assert_eq!(&*table.locate(Ipv4Addr::new(203, 0, 113, 10)).city, "San Jose");
}

#[test]
fn test_locate_outside_any_block_is_unknown() {
    let table = CidrGeoTable::parse(TABLE);

    assert!(table.locate(Ipv4Addr::new(10, 0, 0, 1)).is_unknown());
}

#[test]
fn test_empty_table_locates_nothing() {
    let table = CidrGeoTable::empty();

    assert!(table.is_empty());
    assert!(table.locate(Ipv4Addr::new(203, 0, 113, 10)).is_unknown());
}

#[test]
fn test_parse_skips_malformed_lines() {
    let table = CidrGeoTable::parse(
        "not-a-cidr,US,CA,LA\n\
         203.0.113.0/24,US\n\
         192.0.2.0/24,JP,Tokyo,Tokyo\n",
    );

    assert_eq!(table.len(), 1);
    assert_eq!(&*table.locate(Ipv4Addr::new(192, 0, 2, 1)).country, "JP");
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TABLE.as_bytes()).unwrap();

    let table = CidrGeoTable::load(file.path()).unwrap();

    assert_eq!(table.len(), 4);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = CidrGeoTable::load(dir.path().join("missing.csv"));

    assert!(matches!(result, Err(DomainError::IoError(_))));
}
