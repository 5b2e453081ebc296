//! Per-stage results of a pipeline run.

use std::fmt;

/// A recoverable pipeline stage, in execution order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    UnpackRuntime,
    InstallPackageManager,
    InstallDependencies,
    CopyProjects,
    Compile,
    CopyAuxiliary,
    EmitBootstrap,
    CustomHook,
    FinalVerification,
}

impl Stage {
    /// Every reported stage, in execution order.
    pub const ALL: [Stage; 9] = [
        Stage::UnpackRuntime,
        Stage::InstallPackageManager,
        Stage::InstallDependencies,
        Stage::CopyProjects,
        Stage::Compile,
        Stage::CopyAuxiliary,
        Stage::EmitBootstrap,
        Stage::CustomHook,
        Stage::FinalVerification,
    ];

    /// Human-readable label used in the summary.
    pub fn label(self) -> &'static str {
        match self {
            Stage::UnpackRuntime => "Unpack Python",
            Stage::InstallPackageManager => "Install pip",
            Stage::InstallDependencies => "Install dependencies",
            Stage::CopyProjects => "Copy project(s)",
            Stage::Compile => "Compile",
            Stage::CopyAuxiliary => "Copy other files",
            Stage::EmitBootstrap => "Make bootstrap script",
            Stage::CustomHook => "Custom action",
            Stage::FinalVerification => "Final pip freeze",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of every recoverable stage.
///
/// Each field is written once, by its own stage; a failing stage never
/// changes another stage's result.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Serialize)]
pub struct StageReport {
    pub unpack_runtime: bool,
    pub install_package_manager: bool,
    pub install_dependencies: bool,
    pub copy_projects: bool,
    pub compile: bool,
    pub copy_auxiliary: bool,
    pub emit_bootstrap: bool,
    pub custom_hook: bool,
    pub final_verification: bool,
}

impl StageReport {
    /// Result of one stage.
    pub fn get(&self, stage: Stage) -> bool {
        match stage {
            Stage::UnpackRuntime => self.unpack_runtime,
            Stage::InstallPackageManager => self.install_package_manager,
            Stage::InstallDependencies => self.install_dependencies,
            Stage::CopyProjects => self.copy_projects,
            Stage::Compile => self.compile,
            Stage::CopyAuxiliary => self.copy_auxiliary,
            Stage::EmitBootstrap => self.emit_bootstrap,
            Stage::CustomHook => self.custom_hook,
            Stage::FinalVerification => self.final_verification,
        }
    }

    pub(crate) fn record(&mut self, stage: Stage, passed: bool) {
        let slot = match stage {
            Stage::UnpackRuntime => &mut self.unpack_runtime,
            Stage::InstallPackageManager => &mut self.install_package_manager,
            Stage::InstallDependencies => &mut self.install_dependencies,
            Stage::CopyProjects => &mut self.copy_projects,
            Stage::Compile => &mut self.compile,
            Stage::CopyAuxiliary => &mut self.copy_auxiliary,
            Stage::EmitBootstrap => &mut self.emit_bootstrap,
            Stage::CustomHook => &mut self.custom_hook,
            Stage::FinalVerification => &mut self.final_verification,
        };
        *slot = passed;
    }

    /// `(stage, passed)` pairs in execution order.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, bool)> + '_ {
        Stage::ALL.iter().map(move |&s| (s, self.get(s)))
    }

    /// True if every stage passed.
    pub fn all_passed(&self) -> bool {
        self.iter().all(|(_, passed)| passed)
    }

    /// Stages that failed, in execution order.
    pub fn failed(&self) -> Vec<Stage> {
        self.iter()
            .filter(|(_, passed)| !passed)
            .map(|(s, _)| s)
            .collect()
    }
}

/// Renders the per-stage `ok`/`ERROR` table.
impl fmt::Display for StageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (stage, passed) in self.iter() {
            writeln!(
                f,
                "  {:.<23} {}",
                format!("{} ", stage.label()),
                if passed { "ok" } else { "ERROR" }
            )?;
        }
        Ok(())
    }
}
