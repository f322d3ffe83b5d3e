//! Optional framework registration and capability detection.

use cpscan_api::{
    BundleFramework, Capability, CapabilityProbe, VirtualFileSystemV2, VirtualFileSystemV3,
};
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Optional frameworks available to the scanner.
#[derive(Clone, Default)]
pub struct Frameworks {
    pub vfs_v2: Option<Arc<dyn VirtualFileSystemV2>>,
    pub vfs_v3: Option<Arc<dyn VirtualFileSystemV3>>,
    pub bundles: Option<Arc<dyn BundleFramework>>,
}

impl Frameworks {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_vfs_v2(mut self, vfs: Arc<dyn VirtualFileSystemV2>) -> Self {
        self.vfs_v2 = Some(vfs);
        self
    }

    pub fn with_vfs_v3(mut self, vfs: Arc<dyn VirtualFileSystemV3>) -> Self {
        self.vfs_v3 = Some(vfs);
        self
    }

    pub fn with_bundles(mut self, bundles: Arc<dyn BundleFramework>) -> Self {
        self.bundles = Some(bundles);
        self
    }
}

impl std::fmt::Debug for Frameworks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frameworks")
            .field("vfs_v2", &self.vfs_v2.is_some())
            .field("vfs_v3", &self.vfs_v3.is_some())
            .field("bundles", &self.bundles.is_some())
            .finish()
    }
}

/// A capability is present when its framework is registered.
impl CapabilityProbe for Frameworks {
    fn is_present(&self, marker: &str) -> bool {
        if marker == Capability::VirtualFsV2.marker() {
            self.vfs_v2.is_some()
        } else if marker == Capability::VirtualFsV3.marker() {
            self.vfs_v3.is_some()
        } else if marker == Capability::Bundles.marker() {
            self.bundles.is_some()
        } else {
            false
        }
    }
}

/// Detects which optional capabilities exist.
///
/// Every probe runs at most once per instance. Later changes in the
/// environment are not observed.
pub struct EnvironmentDetection {
    probe: Arc<dyn CapabilityProbe>,
    vfs_v2: OnceLock<bool>,
    vfs_v3: OnceLock<bool>,
    bundles: OnceLock<bool>,
}

impl EnvironmentDetection {
    pub fn new(probe: Arc<dyn CapabilityProbe>) -> Self {
        Self {
            probe,
            vfs_v2: OnceLock::new(),
            vfs_v3: OnceLock::new(),
            bundles: OnceLock::new(),
        }
    }

    pub fn is_present(&self, capability: Capability) -> bool {
        let cell = match capability {
            Capability::VirtualFsV2 => &self.vfs_v2,
            Capability::VirtualFsV3 => &self.vfs_v3,
            Capability::Bundles => &self.bundles,
        };
        *cell.get_or_init(|| {
            let present = self.probe.is_present(capability.marker());
            debug!("capability {:?} present: {}", capability, present);
            present
        })
    }

    pub fn is_vfs_v2(&self) -> bool {
        self.is_present(Capability::VirtualFsV2)
    }

    pub fn is_vfs_v3(&self) -> bool {
        self.is_present(Capability::VirtualFsV3)
    }

    pub fn is_bundles(&self) -> bool {
        self.is_present(Capability::Bundles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct CountingProbe {
        calls: AtomicUsize,
        present: AtomicBool,
    }

    impl CapabilityProbe for CountingProbe {
        fn is_present(&self, _marker: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.present.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn test_probe_is_memoized_and_never_refreshed() {
        let probe = Arc::new(CountingProbe {
            calls: AtomicUsize::new(0),
            present: AtomicBool::new(false),
        });
        let detection = EnvironmentDetection::new(probe.clone());

        assert!(!detection.is_bundles());
        probe.present.store(true, Ordering::SeqCst);
        assert!(!detection.is_bundles());
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);

        // Each capability is probed independently.
        assert!(detection.is_vfs_v3());
        assert_eq!(probe.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_frameworks_probe() {
        let frameworks = Frameworks::none();
        assert!(!frameworks.is_present(Capability::Bundles.marker()));
        assert!(!frameworks.is_present("something.Else"));
    }
}
