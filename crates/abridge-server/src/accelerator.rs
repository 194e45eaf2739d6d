//! Accelerator detection for the health report.

use std::path::PathBuf;

use abridge_core::provider::AcceleratorProbe;

/// Device nodes whose presence means an NVIDIA driver is loaded.
const NVIDIA_NODES: [&str; 2] = ["/proc/driver/nvidia/version", "/dev/nvidia0"];

/// Looks for GPU driver nodes on the local filesystem, unless overridden.
#[derive(Debug, Clone)]
pub struct DeviceProbe {
  forced: Option<bool>,
  nodes:  Vec<PathBuf>,
}

impl DeviceProbe {
  /// Probe the standard NVIDIA nodes. `forced` short-circuits detection.
  pub fn new(forced: Option<bool>) -> Self {
    Self::with_nodes(forced, NVIDIA_NODES.iter().map(PathBuf::from).collect())
  }

  pub fn with_nodes(forced: Option<bool>, nodes: Vec<PathBuf>) -> Self { Self { forced, nodes } }
}

impl AcceleratorProbe for DeviceProbe {
  fn available(&self) -> bool {
    self
      .forced
      .unwrap_or_else(|| self.nodes.iter().any(|node| node.exists()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn override_wins() {
    let missing = vec![PathBuf::from("/definitely/not/here")];
    assert!(DeviceProbe::with_nodes(Some(true), missing.clone()).available());
    assert!(!DeviceProbe::with_nodes(Some(false), vec![std::env::temp_dir()]).available());
  }

  #[test]
  fn detects_present_node() {
    assert!(DeviceProbe::with_nodes(None, vec![std::env::temp_dir()]).available());
    assert!(!DeviceProbe::with_nodes(None, vec![PathBuf::from("/definitely/not/here")]).available());
    assert!(!DeviceProbe::with_nodes(None, vec![]).available());
  }
}
