#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use futures::channel::oneshot;
use shelf_commerce::search::CanonicalQuery;
use shelf_data::{CatalogTransport, NetworkError, TransportResponse};

pub type Reply = Result<TransportResponse, NetworkError>;

/// One catalog record as the service sends it.
pub fn record(id: u64, name: &str, price: &str) -> serde_json::Value {
    serde_json::json!({
        "product_id": id,
        "name": name,
        "color": "Black",
        "gender": "Unisex",
        "first_image": format!("https://img.test/{}.jpg", id),
        "price": price,
        "status": "new",
        "brand": "Venroy",
    })
}

pub fn body(records: &[serde_json::Value]) -> String {
    serde_json::Value::Array(records.to_vec()).to_string()
}

/// `count` generic products named `Item 1..=count`.
pub fn numbered(count: u64) -> String {
    let records: Vec<_> = (1..=count)
        .map(|i| record(i, &format!("Item {}", i), "10.00"))
        .collect();
    body(&records)
}

pub fn ok(body: impl Into<String>) -> Reply {
    Ok(TransportResponse::ok("http://shop.test/api/products", body.into()))
}

/// Replies immediately from a fixed queue and records every query.
#[derive(Default)]
pub struct CannedTransport {
    replies: Mutex<VecDeque<Reply>>,
    seen: Mutex<Vec<String>>,
}

impl CannedTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Query strings received so far, in order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogTransport for CannedTransport {
    async fn get(&self, query: &CanonicalQuery) -> Result<TransportResponse, NetworkError> {
        self.seen.lock().unwrap().push(query.to_query_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(NetworkError::Transport("no scripted reply".into())))
    }
}

/// Each request waits on its own oneshot, so tests decide completion order.
pub struct ScriptedTransport {
    pending: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    /// A transport for `requests` calls, plus the senders that complete them
    /// in request order.
    pub fn new(requests: usize) -> (Self, Vec<oneshot::Sender<Reply>>) {
        let (senders, receivers): (Vec<_>, VecDeque<_>) =
            (0..requests).map(|_| oneshot::channel()).unzip();
        let transport = Self {
            pending: Mutex::new(receivers),
            seen: Mutex::new(Vec::new()),
        };
        (transport, senders)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogTransport for ScriptedTransport {
    async fn get(&self, query: &CanonicalQuery) -> Result<TransportResponse, NetworkError> {
        self.seen.lock().unwrap().push(query.to_query_string());
        let next = self.pending.lock().unwrap().pop_front();
        match next {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(NetworkError::Transport("reply dropped".into()))),
            None => Err(NetworkError::Transport("unexpected request".into())),
        }
    }
}
