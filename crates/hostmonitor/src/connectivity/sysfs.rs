use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{ConnectivityQuery, NetworkKind};

/// Route flag marking a usable route
const RTF_UP: u32 = 0x1;

/// Link types of point-to-point mobile modems
const ARPHRD_PPP: u32 = 512;
const ARPHRD_RAWIP: u32 = 519;

/// Linux connectivity lookup.
///
/// The active network is the interface carrying the default route in
/// `/proc/net/route`; its kind comes from `/sys/class/net/<iface>`.
#[derive(Debug, Clone)]
pub struct SysfsConnectivity {
    root: PathBuf,
}

#[derive(Debug, PartialEq, Eq)]
struct DefaultRoute {
    iface: String,
    metric: u32,
}

impl SysfsConnectivity {
    pub fn new() -> Self {
        Self::with_root("/")
    }

    /// Read `proc` and `sys` below `root` instead of `/`
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    fn default_route_iface(&self) -> Option<String> {
        let table = fs::read_to_string(self.root.join("proc/net/route")).ok()?;
        parse_default_route(&table).map(|route| route.iface)
    }

    fn iface_dir(&self, iface: &str) -> PathBuf {
        self.root.join("sys/class/net").join(iface)
    }

    fn read_attr(&self, iface: &str, attr: &str) -> Option<String> {
        fs::read_to_string(self.iface_dir(iface).join(attr)).ok().map(|s| s.trim().to_string())
    }

    fn is_operational(&self, iface: &str) -> bool {
        // PPP links usually report "unknown" while carrying traffic
        matches!(self.read_attr(iface, "operstate").as_deref(), Some("up") | Some("unknown"))
    }

    fn classify(&self, iface: &str) -> NetworkKind {
        let devtype = self.read_attr(iface, "uevent").and_then(|uevent| {
            uevent
                .lines()
                .find_map(|line| line.strip_prefix("DEVTYPE=").map(str::to_string))
        });

        match devtype.as_deref() {
            Some("wlan") => return NetworkKind::Wifi,
            Some("wwan") => return NetworkKind::Mobile,
            _ => {}
        }

        if self.iface_dir(iface).join("wireless").is_dir() {
            return NetworkKind::Wifi;
        }

        let link_type = self.read_attr(iface, "type").and_then(|t| t.parse::<u32>().ok());
        match link_type {
            Some(ARPHRD_PPP) | Some(ARPHRD_RAWIP) => NetworkKind::Mobile,
            Some(link_type) => NetworkKind::Other(format!("{iface} (link type {link_type})")),
            None => NetworkKind::Other(iface.to_string()),
        }
    }
}

impl Default for SysfsConnectivity {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivityQuery for SysfsConnectivity {
    fn active_network(&self) -> Option<NetworkKind> {
        let Some(iface) = self.default_route_iface() else {
            debug!("No default route");
            return None;
        };

        if !self.is_operational(&iface) {
            debug!(iface = %iface, "Default route interface is not up");
            return None;
        }

        let kind = self.classify(&iface);
        debug!(iface = %iface, ?kind, "Active network");
        Some(kind)
    }
}

/// Pick the up default route with the lowest metric
fn parse_default_route(table: &str) -> Option<DefaultRoute> {
    table
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 8 {
                return None;
            }

            let flags = u32::from_str_radix(fields[3], 16).ok()?;
            let is_default = fields[1] == "00000000" && fields[7] == "00000000";
            if !is_default || flags & RTF_UP == 0 {
                return None;
            }

            Some(DefaultRoute { iface: fields[0].to_string(), metric: fields[6].parse().ok()? })
        })
        .min_by_key(|route| route.metric)
}
