//! Canonical type definitions shared by every provider adapter.

pub mod message;
pub mod options;
pub mod response;
pub mod tool;

pub use message::{Message, MessageRole};
pub use options::ChatOptions;
pub use response::{ChatResponse, EmbeddingResponse, ResponseMessage};
pub use tool::{FunctionDefinition, ToolDefinition};
