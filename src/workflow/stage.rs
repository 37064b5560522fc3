//! Progress markers for the create-repository workflow.

use std::fmt;

/// Furthest point the workflow has reached.
///
/// Stages only move forward: `Start`, `RemoteCreated`, `LocalMaterialized`,
/// then `Done`. A failure leaves the stage at the last one completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorkflowStage {
    /// Nothing has been created yet.
    #[default]
    Start,
    /// The remote repository exists.
    RemoteCreated,
    /// The local working copy is populated.
    LocalMaterialized,
    /// The workflow finished.
    Done,
}

impl WorkflowStage {
    /// Returns a short, stable label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::RemoteCreated => "remote-created",
            Self::LocalMaterialized => "local-materialized",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::WorkflowStage;

    #[rstest]
    #[case(WorkflowStage::Start, "start")]
    #[case(WorkflowStage::RemoteCreated, "remote-created")]
    #[case(WorkflowStage::LocalMaterialized, "local-materialized")]
    #[case(WorkflowStage::Done, "done")]
    fn renders_stable_labels(#[case] stage: WorkflowStage, #[case] expected: &str) {
        assert_eq!(stage.to_string(), expected, "label for {stage:?}");
    }

    #[test]
    fn stages_are_ordered() {
        assert!(WorkflowStage::Start < WorkflowStage::RemoteCreated);
        assert!(WorkflowStage::RemoteCreated < WorkflowStage::LocalMaterialized);
        assert!(WorkflowStage::LocalMaterialized < WorkflowStage::Done);
    }
}
