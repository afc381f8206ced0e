#![allow(dead_code)]
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

const TYPE_A: u16 = 1;
const TYPE_CNAME: u16 = 5;

/// What the mock server answers for a given name.
#[derive(Debug, Clone)]
pub enum MockAnswer {
    A(Vec<Ipv4Addr>),
    Cname(String),
    NxDomain,
    ServFail,
    /// Never answers.
    Silent,
    /// Answers with a different transaction ID.
    WrongId,
    /// UDP answer has the TC bit and no records; TCP carries the addresses.
    Truncated(Vec<Ipv4Addr>),
}

/// Mock DNS server for tests.
///
/// Listens on UDP and TCP on the same loopback port and answers from a
/// fixed table with hand-built wire-format messages. Unknown names get an
/// empty NOERROR answer.
pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(answers: HashMap<String, MockAnswer>) -> std::io::Result<Self> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;
        let answers = Arc::new(answers);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = respond(&answers, &buf[..len], false) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((stream, _)) = accepted {
                            let answers = Arc::clone(&answers);
                            tokio::spawn(serve_tcp(stream, answers));
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub async fn single(name: &str, answer: MockAnswer) -> std::io::Result<Self> {
        Self::start(HashMap::from([(name.to_string(), answer)])).await
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn serve_tcp(mut stream: tokio::net::TcpStream, answers: Arc<HashMap<String, MockAnswer>>) {
    let mut len_buf = [0u8; 2];
    if stream.read_exact(&mut len_buf).await.is_err() {
        return;
    }
    let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    if stream.read_exact(&mut query).await.is_err() {
        return;
    }
    if let Some(response) = respond(&answers, &query, true) {
        let mut framed = (response.len() as u16).to_be_bytes().to_vec();
        framed.extend_from_slice(&response);
        let _ = stream.write_all(&framed).await;
    }
}

/// Parses the question and returns (name, qtype, end offset of question).
fn parse_question(query: &[u8]) -> Option<(String, u16, usize)> {
    let mut pos = 12;
    let mut labels = Vec::new();
    loop {
        let len = *query.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        labels.push(String::from_utf8_lossy(query.get(pos..pos + len)?).to_lowercase());
        pos += len;
    }
    let qtype = u16::from_be_bytes([*query.get(pos)?, *query.get(pos + 1)?]);
    Some((labels.join("."), qtype, pos + 4))
}

fn respond(answers: &HashMap<String, MockAnswer>, query: &[u8], over_tcp: bool) -> Option<Vec<u8>> {
    let (name, qtype, question_end) = parse_question(query)?;
    let answer = answers.get(&name);
    let id = u16::from_be_bytes([query[0], query[1]]);

    let (id, rcode, truncated, records) = match answer {
        None => (id, 0, false, Vec::new()),
        Some(MockAnswer::Silent) => return None,
        Some(MockAnswer::NxDomain) => (id, 3, false, Vec::new()),
        Some(MockAnswer::ServFail) => (id, 2, false, Vec::new()),
        Some(MockAnswer::WrongId) => (id.wrapping_add(1), 0, false, Vec::new()),
        Some(MockAnswer::A(ips)) if qtype == TYPE_A => {
            (id, 0, false, ips.iter().map(|ip| a_record(*ip)).collect())
        }
        Some(MockAnswer::A(_)) => (id, 0, false, Vec::new()),
        Some(MockAnswer::Cname(target)) => (id, 0, false, vec![cname_record(target)]),
        Some(MockAnswer::Truncated(ips)) if over_tcp && qtype == TYPE_A => {
            (id, 0, false, ips.iter().map(|ip| a_record(*ip)).collect())
        }
        Some(MockAnswer::Truncated(_)) => (id, 0, true, Vec::new()),
    };

    Some(build_response(id, rcode, truncated, &query[12..question_end], &records))
}

fn a_record(ip: Ipv4Addr) -> Vec<u8> {
    let mut rr = vec![
        0xc0, 0x0c, // Name pointer to question
        0x00, 0x01, // Type A
        0x00, 0x01, // Class IN
        0x00, 0x00, 0x00, 0x3c, // TTL: 60 seconds
        0x00, 0x04, // Data length: 4 bytes
    ];
    rr.extend_from_slice(&ip.octets());
    rr
}

fn cname_record(target: &str) -> Vec<u8> {
    let mut rdata = Vec::new();
    for label in target.trim_end_matches('.').split('.') {
        rdata.push(label.len() as u8);
        rdata.extend_from_slice(label.as_bytes());
    }
    rdata.push(0);

    let mut rr = vec![
        0xc0, 0x0c, // Name pointer to question
        0x00, 0x05, // Type CNAME
        0x00, 0x01, // Class IN
        0x00, 0x00, 0x00, 0x3c, // TTL
    ];
    rr.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
    rr.extend_from_slice(&rdata);
    rr
}

/// Assembles a response: header, the original question, then `records`.
pub fn build_response(
    id: u16,
    rcode: u8,
    truncated: bool,
    question: &[u8],
    records: &[Vec<u8>],
) -> Vec<u8> {
    let mut response = Vec::with_capacity(512);
    response.extend_from_slice(&id.to_be_bytes());
    // QR=1, Opcode=0, AA=0, TC, RD=1
    response.push(if truncated { 0x83 } else { 0x81 });
    // RA=1, Z=0, RCODE
    response.push(0x80 | (rcode & 0x0f));
    response.extend_from_slice(&[0x00, 0x01]); // Questions
    response.extend_from_slice(&(records.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00]); // Authority
    response.extend_from_slice(&[0x00, 0x00]); // Additional
    response.extend_from_slice(question);
    for rr in records {
        response.extend_from_slice(rr);
    }
    response
}

/// Encodes a bare question section for `name`.
pub fn question(name: &str, qtype: u16) -> Vec<u8> {
    let mut q = Vec::new();
    for label in name.split('.') {
        q.push(label.len() as u8);
        q.extend_from_slice(label.as_bytes());
    }
    q.push(0);
    q.extend_from_slice(&qtype.to_be_bytes());
    q.extend_from_slice(&[0x00, 0x01]);
    q
}

pub fn a_answer(ip: Ipv4Addr) -> Vec<u8> {
    a_record(ip)
}

pub fn cname_answer(target: &str) -> Vec<u8> {
    cname_record(target)
}

pub const QTYPE_A: u16 = TYPE_A;
pub const QTYPE_CNAME: u16 = TYPE_CNAME;
