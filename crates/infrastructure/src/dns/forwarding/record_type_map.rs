use hickory_proto::rr::RecordType as HickoryRecordType;
use std::fmt;

/// Record types the classifier ever asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    A,
    Cname,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::Cname => f.write_str("CNAME"),
        }
    }
}

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert QueryKind → hickory RecordType (for building queries)
    pub fn to_hickory(kind: QueryKind) -> HickoryRecordType {
        match kind {
            QueryKind::A => HickoryRecordType::A,
            QueryKind::Cname => HickoryRecordType::CNAME,
        }
    }
}
