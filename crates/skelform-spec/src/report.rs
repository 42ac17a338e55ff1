//! Build report types.
//!
//! A report summarizes one assembly run: what was built, how big it is,
//! and the pose digest that identifies the resulting skeleton.

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::zone::Zone;

/// Current report format version.
pub const REPORT_VERSION: u32 = 1;

/// Summary of one assembled character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    /// Report format version.
    pub report_version: u32,
    /// The character this report describes.
    pub character_id: String,
    /// Canonical hash of the input spec.
    pub spec_hash: String,
    /// Whether the build completed.
    pub ok: bool,
    /// Total scene nodes created.
    pub node_count: usize,
    /// Digest of every bind joint's world pose, in build order.
    pub pose_digest: String,
    /// Per-module summaries, in build order.
    pub modules: Vec<ModuleReport>,
}

impl BuildReport {
    /// Serializes the report to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a report from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Total bind joints across all modules.
    pub fn total_bind_joints(&self) -> usize {
        self.modules.iter().map(|m| m.bind_joints).sum()
    }
}

/// Summary of one assembled module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleReport {
    /// Zone-qualified module identifier.
    pub ident: String,
    /// Body zone.
    pub zone: Zone,
    /// Module kind tag.
    pub kind: String,
    /// Final lifecycle state, e.g. `finished`.
    pub state: String,
    /// Number of bind joints.
    pub bind_joints: usize,
    /// Number of animator controls.
    pub controls: usize,
    /// Number of input sockets.
    pub space_ins: usize,
    /// Number of output sockets.
    pub space_outs: usize,
    /// Whether chain dynamics were added.
    pub dynamics: bool,
}

/// Builder for [`BuildReport`].
pub struct ReportBuilder {
    character_id: String,
    spec_hash: String,
    ok: bool,
    node_count: usize,
    pose_digest: String,
    modules: Vec<ModuleReport>,
}

impl ReportBuilder {
    /// Creates a report builder.
    pub fn new(character_id: impl Into<String>, spec_hash: impl Into<String>) -> Self {
        Self {
            character_id: character_id.into(),
            spec_hash: spec_hash.into(),
            ok: true,
            node_count: 0,
            pose_digest: String::new(),
            modules: Vec::new(),
        }
    }

    /// Sets the ok status.
    pub fn ok(mut self, ok: bool) -> Self {
        self.ok = ok;
        self
    }

    /// Sets the total node count.
    pub fn node_count(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }

    /// Sets the pose digest.
    pub fn pose_digest(mut self, pose_digest: impl Into<String>) -> Self {
        self.pose_digest = pose_digest.into();
        self
    }

    /// Adds a module summary.
    pub fn module(mut self, module: ModuleReport) -> Self {
        self.modules.push(module);
        self
    }

    /// Builds the report.
    pub fn build(self) -> BuildReport {
        BuildReport {
            report_version: REPORT_VERSION,
            character_id: self.character_id,
            spec_hash: self.spec_hash,
            ok: self.ok,
            node_count: self.node_count,
            pose_digest: self.pose_digest,
            modules: self.modules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_module() -> ModuleReport {
        ModuleReport {
            ident: "Tail".to_string(),
            zone: Zone::Center,
            kind: "chain".to_string(),
            state: "finished".to_string(),
            bind_joints: 8,
            controls: 3,
            space_ins: 1,
            space_outs: 1,
            dynamics: true,
        }
    }

    #[test]
    fn test_report_builder() {
        let report = ReportBuilder::new("dragon-01", "abc123")
            .node_count(42)
            .pose_digest("def456")
            .module(sample_module())
            .build();

        assert_eq!(report.report_version, REPORT_VERSION);
        assert!(report.ok);
        assert_eq!(report.node_count, 42);
        assert_eq!(report.total_bind_joints(), 8);
    }

    #[test]
    fn test_report_json_roundtrip() {
        let report = ReportBuilder::new("dragon-01", "abc123")
            .module(sample_module())
            .build();
        let json = report.to_json_pretty().unwrap();
        let parsed = BuildReport::from_json(&json).unwrap();
        assert_eq!(report, parsed);
    }
}
