#![cfg_attr(feature = "strict", deny(warnings))]

pub use error::{Result, TransportError};
pub use file_handle::FileHandle;
pub use http_client::{Api, ResponseErrorLogger, build_http_client};
pub use interface::{UploadResponse, UploadTransport};
pub use memory_transport::{MemoryTransport, ScriptedUpload};
pub use progress_tracked_streams::{ProgressCallback, StreamProgressReporter, UploadProgressStream};
pub use remote_transport::{RemoteTransport, join_url};

mod error;
mod file_handle;
mod http_client;
mod interface;
mod memory_transport;
pub mod progress_tracked_streams;
mod remote_transport;

pub mod exports {
    pub use reqwest;
    pub use reqwest_middleware::ClientWithMiddleware;
}
