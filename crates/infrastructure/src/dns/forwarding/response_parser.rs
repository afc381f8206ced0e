use cdnscope_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use smallvec::SmallVec;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub addresses: Vec<Ipv4Addr>,

    /// CNAME targets in answer order, without the trailing root dot.
    pub cname_chain: SmallVec<[Arc<str>; 2]>,

    pub rcode: ResponseCode,

    pub truncated: bool,
}

impl DnsResponse {
    pub fn is_nodata(&self) -> bool {
        self.rcode == ResponseCode::NoError
            && self.addresses.is_empty()
            && self.cname_chain.is_empty()
    }

    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code;
        let truncated = message.truncation;

        let mut addresses = Vec::with_capacity(message.answers.len().min(8));
        let mut cname_chain: SmallVec<[Arc<str>; 2]> = SmallVec::new();

        for record in &message.answers {
            match &record.data {
                RData::A(a) => {
                    addresses.push(a.0);
                }
                RData::CNAME(canonical) => {
                    let name = canonical.to_utf8();
                    let name = name.strip_suffix('.').unwrap_or(&name);
                    debug!(cname = %name, "CNAME record found");
                    cname_chain.push(Arc::from(name));
                }
                _ => {}
            }
        }

        debug!(
            rcode = ?rcode,
            addresses = addresses.len(),
            cname_hops = cname_chain.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id: message.id,
            addresses,
            cname_chain,
            rcode,
            truncated,
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
