use crate::dataset::DatasetSpec;
use fwd_core::{ModuleKind, Sample};
use tracing::info;

const TEAL: &str = "rgba(75,192,192,1)";
const RED:  &str = "rgba(192,75,75,1)";

/// Everything that differs between module kinds: which config fields the
/// form shows and which counters the chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleProfile {
    pub kind:          ModuleKind,
    pub config_fields: &'static [&'static str],
    pub datasets:      &'static [DatasetSpec],
}

const DISPATCHER: ModuleProfile = ModuleProfile {
    kind: ModuleKind::Dispatcher,
    config_fields: &["DestinationHost", "DestinationPort", "Verbose"],
    datasets: &[
        DatasetSpec::new("Incoming bytes/s", TEAL, "CompressedNetBytes"),
        DatasetSpec::new("Outgoing bytes/s", RED, "RawNetBytes"),
    ],
};

const COLLECTOR: ModuleProfile = ModuleProfile {
    kind: ModuleKind::Collector,
    config_fields: &[
        "Destination",
        "ForwardPriorityThreshold",
        "DumpPriorityThreshold",
        "SyslogPort",
        "BufferSizeThreshold",
        "BufferTimeoutMS",
        "Verbose",
    ],
    datasets: &[
        DatasetSpec::new("Outgoing bytes/s", TEAL, "CompressedNetBytes"),
        DatasetSpec::new("Incoming bytes/s", RED, "RawDiskBytes"),
    ],
};

impl ModuleProfile {
    /// Profile for a classified module; `None` while still unknown.
    pub fn for_kind(kind: ModuleKind) -> Option<Self> {
        match kind {
            ModuleKind::Dispatcher => Some(DISPATCHER),
            ModuleKind::Collector  => Some(COLLECTOR),
            ModuleKind::Unknown    => None,
        }
    }
}

/// One-shot module classification.
///
/// The first observed sample fixes the kind for the rest of the session;
/// later samples are ignored even if their shape changes.
#[derive(Debug, Default)]
pub struct ModuleDetector {
    kind: ModuleKind,
}

impl ModuleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    /// Classify from `sample` unless already classified.  Returns the kind.
    pub fn observe(&mut self, sample: &Sample) -> ModuleKind {
        if self.kind == ModuleKind::Unknown {
            self.kind = ModuleKind::classify(sample);
            info!(kind = ?self.kind, "backend module classified");
        }
        self.kind
    }

    pub fn profile(&self) -> Option<ModuleProfile> {
        ModuleProfile::for_kind(self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_has_no_profile() {
        assert!(ModuleDetector::new().profile().is_none());
    }

    #[test]
    fn dispatcher_payload_selects_dispatcher_profile() {
        let mut detector = ModuleDetector::new();
        let sample = Sample::from_iter([("CompressedNetBytes", 10.0), ("RawNetBytes", 5.0)]);
        assert_eq!(detector.observe(&sample), ModuleKind::Dispatcher);
        let profile = detector.profile().unwrap();
        assert_eq!(profile.config_fields, &["DestinationHost", "DestinationPort", "Verbose"]);
        assert_eq!(profile.datasets[1].key, "RawNetBytes");
    }

    #[test]
    fn collector_payload_selects_collector_profile() {
        let mut detector = ModuleDetector::new();
        let sample = Sample::from_iter([("RawDiskBytes", 7.0), ("CompressedNetBytes", 3.0)]);
        assert_eq!(detector.observe(&sample), ModuleKind::Collector);
        let profile = detector.profile().unwrap();
        assert_eq!(profile.config_fields.len(), 7);
        assert_eq!(profile.datasets[1].label, "Incoming bytes/s");
    }

    #[test]
    fn classification_is_never_revisited() {
        let mut detector = ModuleDetector::new();
        detector.observe(&Sample::from_iter([("RawNetBytes", 1.0)]));
        let later = detector.observe(&Sample::from_iter([("RawDiskBytes", 1.0)]));
        assert_eq!(later, ModuleKind::Dispatcher);
    }
}
