use serde::Serialize;
use tokio::sync::broadcast;

/// Change notifications published by a search session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SearchEvent {
    /// The token collection changed; carries its serialized form.
    #[serde(rename_all = "camelCase")]
    TokensChanged { search_tokens: Vec<String> },
    /// A search completed and its page was applied.
    #[serde(rename_all = "camelCase")]
    ResultsChanged {
        version: u64,
        count: usize,
        has_next: bool,
        has_prev: bool,
    },
    /// The store failed; tokens are unchanged and the search can be retried.
    #[serde(rename_all = "camelCase")]
    SearchFailed { version: u64, message: String },
}

#[derive(Clone)]
pub struct SearchBus {
    sender: broadcast::Sender<SearchEvent>,
}

impl SearchBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SearchEvent> {
        self.sender.subscribe()
    }

    /// Publishes to current subscribers. Having none is not an error.
    pub fn publish(&self, event: SearchEvent) {
        let _ = self.sender.send(event);
    }
}
