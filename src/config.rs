use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Vitalpoint";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version reported for the prediction model when no artifact is loaded.
pub const FALLBACK_MODEL_VERSION: &str = "1.0.0";

pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8000);

const DEFAULT_PATIENTS_FILE: &str = "patients.json";
const DEFAULT_MODEL_FILE: &str = "model/premium_model.json";

/// Address the HTTP server binds, `VITALPOINT_ADDR` overrides.
///
/// An unparsable override falls back to the default rather than refusing
/// to start.
pub fn bind_addr() -> SocketAddr {
    match std::env::var("VITALPOINT_ADDR") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(%raw, "unparsable VITALPOINT_ADDR, using default");
            DEFAULT_BIND_ADDR
        }),
        Err(_) => DEFAULT_BIND_ADDR,
    }
}

/// Path of the patient store file, `VITALPOINT_PATIENTS_FILE` overrides.
pub fn patients_file() -> PathBuf {
    std::env::var("VITALPOINT_PATIENTS_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_PATIENTS_FILE))
}

/// Path of the model artifact, `VITALPOINT_MODEL_PATH` overrides.
pub fn model_file() -> PathBuf {
    std::env::var("VITALPOINT_MODEL_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_FILE))
}

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_addr_is_local_port_8000() {
        let addr = bind_addr();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn default_paths() {
        assert_eq!(patients_file(), PathBuf::from("patients.json"));
        assert_eq!(model_file(), PathBuf::from("model/premium_model.json"));
    }

    #[test]
    fn app_name_is_vitalpoint() {
        assert_eq!(APP_NAME, "Vitalpoint");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "1.0.0");
    }
}
