mod summary;
mod text;

pub use summary::{
    DnsEntry, Failures, HttpEntry, Summary, TcpEntry, TcpState, UNKNOWN_RESOLVER,
};
