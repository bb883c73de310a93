#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::Record;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// Canned answer served by [`MockDnsServer`].
#[derive(Clone, Default)]
pub struct MockAnswer {
    pub rcode: Option<ResponseCode>,
    pub answers: Vec<Record>,
    pub authority: Vec<Record>,
    /// UDP replies carry TC and no records; TCP replies are complete.
    pub truncate_udp: bool,
    /// Reply with a transaction id that does not match the query.
    pub wrong_id: bool,
}

/// UDP and TCP DNS server on one loopback port.
pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<(&'static str, Message)>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(answer: MockAnswer) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let received = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let log = received.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = respond(&buf[..len], &answer, "UDP", &log) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((mut stream, _)) = accepted {
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                continue;
                            }
                            let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut query).await.is_err() {
                                continue;
                            }
                            if let Some(response) = respond(&query, &answer, "TCP", &log) {
                                let _ = stream.write_all(&(response.len() as u16).to_be_bytes()).await;
                                let _ = stream.write_all(&response).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Queries seen so far, tagged with the protocol they arrived on.
    pub fn received(&self) -> Vec<(&'static str, Message)> {
        self.received.lock().unwrap().clone()
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn respond(
    query_bytes: &[u8],
    answer: &MockAnswer,
    protocol: &'static str,
    log: &Mutex<Vec<(&'static str, Message)>>,
) -> Option<Vec<u8>> {
    let query = Message::from_vec(query_bytes).ok()?;
    log.lock().unwrap().push((protocol, query.clone()));

    let id = if answer.wrong_id {
        query.id().wrapping_add(1)
    } else {
        query.id()
    };
    let mut response = Message::new(id, MessageType::Response, OpCode::Query);
    response.set_recursion_desired(query.recursion_desired());
    response.set_response_code(answer.rcode.unwrap_or(ResponseCode::NoError));
    for question in query.queries() {
        response.add_query(question.clone());
    }

    if answer.truncate_udp && protocol == "UDP" {
        response.set_truncated(true);
    } else {
        for record in &answer.answers {
            response.add_answer(record.clone());
        }
        for record in &answer.authority {
            response.add_name_server(record.clone());
        }
    }

    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    response.emit(&mut encoder).ok()?;
    Some(buf)
}
