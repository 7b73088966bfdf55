//! # Liveness Stage
//!
//! Decides whether a resolved address still answers. One ICMP echo with
//! a one-second deadline, issued through the system `ping` binary.
//!
//! The bias here is deliberate and must be preserved: if the probe cannot
//! run at all (binary missing, permission denied, timeout), the address
//! is treated as **dead**. For takeover triage a missed dangling record
//! costs more than a false positive, so every failure path leans toward
//! reporting.

use std::net::IpAddr;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Reachability seam; swapped for a scripted mock in pipeline tests.
#[async_trait]
pub trait LivenessProbe: Send + Sync {
    async fn is_alive(&self, ip: IpAddr) -> bool;
}

/// Probes by spawning `ping -c 1 -W 1 <addr>` and counting reply packets
/// in its output.
pub struct PingProbe;

#[async_trait]
impl LivenessProbe for PingProbe {
    async fn is_alive(&self, ip: IpAddr) -> bool {
        let output = match Command::new("ping")
            .arg("-c")
            .arg("1")
            .arg("-W")
            .arg("1")
            .arg(ip.to_string())
            .output()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                debug!("ping {ip} failed to execute, treating as dead: {err}");
                return false;
            }
        };

        if !output.status.success() {
            return false;
        }

        received_one_reply(&String::from_utf8_lossy(&output.stdout))
    }
}

/// iputils prints `1 received`, BSD ping prints `1 packets received`.
fn received_one_reply(stdout: &str) -> bool {
    stdout.contains("1 packets received") || stdout.contains("1 received")
}
