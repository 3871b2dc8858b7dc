//! Backend commands queued from UI to backend worker.

use shared::protocol::OrderRequest;

#[derive(Debug, PartialEq)]
pub enum BackendCommand {
    FetchCatalog,
    SubmitOrder(OrderRequest),
}
