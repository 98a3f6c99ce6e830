use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "LINKCHECK_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "LINKCHECK_STORAGE_BACKEND";
pub const DATA_PATH_ENV: &str = "LINKCHECK_DATA_PATH";
pub const PROBE_TIMEOUT_ENV: &str = "LINKCHECK_PROBE_TIMEOUT_SECS";
pub const REQUEST_TIMEOUT_ENV: &str = "LINKCHECK_REQUEST_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "LINKCHECK_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DATA_PATH: &str = "data.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "file")]
    File,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::File => write!(f, "file"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "linkcheck", about = "Checks link availability and renders reports")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::File
    )]
    pub storage: StorageBackendArg,

    /// Snapshot file used by the file storage backend.
    #[arg(long, env = DATA_PATH_ENV, default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,

    /// Timeout for each HEAD or GET probe.
    #[arg(long, env = PROBE_TIMEOUT_ENV, default_value_t = 5)]
    pub probe_timeout_secs: u64,

    /// Upper bound for a whole HTTP request, probes included.
    #[arg(long, env = REQUEST_TIMEOUT_ENV, default_value_t = 120)]
    pub request_timeout_secs: u64,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = CLI::try_parse_from(["linkcheck"]).unwrap();

        assert_eq!(cli.listen_addr, DEFAULT_LISTEN_ADDR.parse().unwrap());
        assert_eq!(cli.storage, StorageBackendArg::File);
        assert_eq!(cli.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(cli.probe_timeout_secs, 5);
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn explicit_flags() {
        let cli = CLI::try_parse_from([
            "linkcheck",
            "--storage",
            "in-memory",
            "--listen-addr",
            "127.0.0.1:9000",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.storage, StorageBackendArg::InMemory);
        assert_eq!(cli.listen_addr.port(), 9000);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(CLI::try_parse_from(["linkcheck", "--storage", "mysql"]).is_err());
    }
}
