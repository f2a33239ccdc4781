pub mod helpers;
pub mod mock_upstream;

pub use helpers::*;
pub use mock_upstream::{MockResponse, MockUpstream, RecordedRequest};
