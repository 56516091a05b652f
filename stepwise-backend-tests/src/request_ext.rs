use hyper::{body, Request};

pub const MODE_HEADER: &str = "X-Stepwise-Mode";

/// Marks which terminal call a fixture request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionModeHeader {
    Blocking,
    Callback,
}

impl ExecutionModeHeader {
    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionModeHeader::Blocking => "blocking",
            ExecutionModeHeader::Callback => "callback",
        }
    }
}

pub trait RequestExt {
    fn mode(&self) -> Option<ExecutionModeHeader>;
    fn header_str(&self, name: &str) -> Option<&str>;
}

impl RequestExt for Request<body::Incoming> {
    fn mode(&self) -> Option<ExecutionModeHeader> {
        match self.header_str(MODE_HEADER)? {
            "blocking" => Some(ExecutionModeHeader::Blocking),
            "callback" => Some(ExecutionModeHeader::Callback),
            _ => None,
        }
    }

    fn header_str(&self, name: &str) -> Option<&str> {
        self.headers().get(name).and_then(|v| v.to_str().ok())
    }
}
