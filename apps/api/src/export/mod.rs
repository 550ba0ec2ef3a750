// Export hand-off: packages rendered LaTeX for the external editor's
// document-import endpoint. Payload construction is the contract here;
// the actual submission is fire-and-forget and never awaited by a session.

pub mod gateway;
pub mod handlers;
