//! The eight toolkit invocations of the fluctuation pipeline.
//!
//! Each [`Step`] knows how to render its command line and scripted answers
//! from a [`PipelineConfig`], and which files it consumes and produces. The
//! ordering in [`Step::ALL`] satisfies every input/output dependency: no step
//! reads a file that a later step writes.

use super::config::PipelineConfig;
use crate::core::command::{CommandSpec, InputScript, ScriptError};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `make_ndx` on the minimized structure, creating the centering group.
    CenterIndex,
    /// `trjconv -pbc whole` on the structure snapshot.
    WholeStructure,
    /// `trjconv -pbc mol -center` on the unwrapped snapshot.
    CenterStructure,
    /// `trjconv -pbc whole` on the trajectory.
    WholeTrajectory,
    /// `trjconv -pbc mol -center` on the unwrapped trajectory.
    CenterTrajectory,
    /// `trjconv -fit` against the centered snapshot.
    FitTrajectory,
    /// `make_ndx` on the snapshot, creating the fluctuation group.
    RmsfIndex,
    /// `rmsf` over the fitted trajectory.
    Rmsf,
}

impl Step {
    pub const ALL: [Step; 8] = [
        Step::CenterIndex,
        Step::WholeStructure,
        Step::CenterStructure,
        Step::WholeTrajectory,
        Step::CenterTrajectory,
        Step::FitTrajectory,
        Step::RmsfIndex,
        Step::Rmsf,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// 1-based position in the pipeline.
    pub fn number(self) -> usize {
        match self {
            Step::CenterIndex => 1,
            Step::WholeStructure => 2,
            Step::CenterStructure => 3,
            Step::WholeTrajectory => 4,
            Step::CenterTrajectory => 5,
            Step::FitTrajectory => 6,
            Step::RmsfIndex => 7,
            Step::Rmsf => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Step::CenterIndex => "build centering index",
            Step::WholeStructure => "unwrap structure",
            Step::CenterStructure => "center structure",
            Step::WholeTrajectory => "unwrap trajectory",
            Step::CenterTrajectory => "center trajectory",
            Step::FitTrajectory => "fit trajectory",
            Step::RmsfIndex => "build fluctuation index",
            Step::Rmsf => "compute fluctuations",
        }
    }

    pub fn builds_index(self) -> bool {
        matches!(self, Step::CenterIndex | Step::RmsfIndex)
    }

    /// Files that must exist before this step is issued.
    pub fn inputs(self, config: &PipelineConfig) -> Vec<PathBuf> {
        let f = &config.files;
        let paths = match self {
            Step::CenterIndex => vec![&f.index_structure],
            Step::WholeStructure => vec![&f.structure, &f.run_input],
            Step::CenterStructure => vec![&f.whole_structure, &f.run_input, &f.center_index],
            Step::WholeTrajectory => vec![&f.trajectory, &f.run_input],
            Step::CenterTrajectory => vec![&f.whole_trajectory, &f.run_input, &f.center_index],
            Step::FitTrajectory => vec![&f.centered_trajectory, &f.centered_structure],
            Step::RmsfIndex => vec![&f.structure],
            Step::Rmsf => vec![&f.fitted_trajectory, &f.centered_structure, &f.rmsf_index],
        };
        paths.into_iter().cloned().collect()
    }

    /// Files this step creates.
    pub fn outputs(self, config: &PipelineConfig) -> Vec<PathBuf> {
        let f = &config.files;
        let path = match self {
            Step::CenterIndex => &f.center_index,
            Step::WholeStructure => &f.whole_structure,
            Step::CenterStructure => &f.centered_structure,
            Step::WholeTrajectory => &f.whole_trajectory,
            Step::CenterTrajectory => &f.centered_trajectory,
            Step::FitTrajectory => &f.fitted_trajectory,
            Step::RmsfIndex => &f.rmsf_index,
            Step::Rmsf => &f.report,
        };
        vec![path.clone()]
    }

    /// Answers for the step's interactive prompts, in prompt order.
    pub fn input_script(self, config: &PipelineConfig) -> Result<InputScript, ScriptError> {
        let g = &config.groups;
        match self {
            Step::CenterIndex => InputScript::index_selection(&config.selections.center),
            Step::RmsfIndex => InputScript::index_selection(&config.selections.rmsf),
            Step::WholeStructure | Step::WholeTrajectory => InputScript::new([&g.system]),
            Step::CenterStructure | Step::CenterTrajectory => {
                InputScript::new([&g.center, &g.system])
            }
            Step::FitTrajectory => InputScript::new([&g.fit, &g.system]),
            Step::Rmsf => InputScript::new([&g.rmsf]),
        }
    }

    /// Builds the full invocation, including scripted answers.
    pub fn command(self, config: &PipelineConfig) -> Result<CommandSpec, ScriptError> {
        let f = &config.files;
        let path = |p: &PathBuf| p.to_string_lossy().into_owned();
        let base = CommandSpec::new(&config.executable);

        let spec = match self {
            Step::CenterIndex => base
                .arg("make_ndx")
                .args(["-f".to_string(), path(&f.index_structure)])
                .args(["-o".to_string(), path(&f.center_index)]),
            Step::WholeStructure => base
                .arg("trjconv")
                .args(["-f".to_string(), path(&f.structure)])
                .args(["-s".to_string(), path(&f.run_input)])
                .args(["-pbc", "whole"])
                .args(["-o".to_string(), path(&f.whole_structure)]),
            Step::CenterStructure => base
                .arg("trjconv")
                .args(["-f".to_string(), path(&f.whole_structure)])
                .args(["-s".to_string(), path(&f.run_input)])
                .args(["-pbc", "mol", "-center"])
                .args(["-o".to_string(), path(&f.centered_structure)])
                .args(["-n".to_string(), path(&f.center_index)]),
            Step::WholeTrajectory => base
                .arg("trjconv")
                .args(["-f".to_string(), path(&f.trajectory)])
                .args(["-s".to_string(), path(&f.run_input)])
                .args(["-pbc", "whole"])
                .args(["-o".to_string(), path(&f.whole_trajectory)]),
            Step::CenterTrajectory => base
                .arg("trjconv")
                .args(["-f".to_string(), path(&f.whole_trajectory)])
                .args(["-s".to_string(), path(&f.run_input)])
                .args(["-pbc", "mol", "-center"])
                .args(["-o".to_string(), path(&f.centered_trajectory)])
                .args(["-n".to_string(), path(&f.center_index)]),
            Step::FitTrajectory => base
                .arg("trjconv")
                .args(["-f".to_string(), path(&f.centered_trajectory)])
                .args(["-s".to_string(), path(&f.centered_structure)])
                .args(["-o".to_string(), path(&f.fitted_trajectory)])
                .args(["-fit".to_string(), config.fit_mode.clone()]),
            Step::RmsfIndex => base
                .arg("make_ndx")
                .args(["-f".to_string(), path(&f.structure)])
                .args(["-o".to_string(), path(&f.rmsf_index)]),
            Step::Rmsf => base
                .arg("rmsf")
                .args(["-f".to_string(), path(&f.fitted_trajectory)])
                .args(["-s".to_string(), path(&f.centered_structure)])
                .args(["-n".to_string(), path(&f.rmsf_index)])
                .args(["-od".to_string(), path(&f.report)]),
        };

        Ok(spec.input(self.input_script(config)?))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.number(), Self::COUNT, self.name())
    }
}

/// A step resolved against a configuration, ready to be issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub step: Step,
    pub command: CommandSpec,
    pub inputs: Vec<PathBuf>,
    pub outputs: Vec<PathBuf>,
}

pub type Plan = Vec<PlannedStep>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn config() -> PipelineConfig {
        PipelineConfig::builder()
            .executable("gmx_mpi")
            .build()
            .unwrap()
    }

    #[test]
    fn numbers_follow_declaration_order() {
        for (i, step) in Step::ALL.iter().enumerate() {
            assert_eq!(step.number(), i + 1);
        }
    }

    #[test]
    fn default_commands_match_reference_invocations() {
        let cfg = config();
        let lines: Vec<String> = Step::ALL
            .iter()
            .map(|s| s.command(&cfg).unwrap().to_string())
            .collect();

        assert_eq!(
            lines,
            vec![
                "gmx_mpi make_ndx -f em.gro -o center.ndx",
                "gmx_mpi trjconv -f md-250ns.gro -s md-250ns.tpr -pbc whole -o md-250ns_pbc.gro",
                "gmx_mpi trjconv -f md-250ns_pbc.gro -s md-250ns.tpr -pbc mol -center -o md-250ns_pbc_center.gro -n center.ndx",
                "gmx_mpi trjconv -f md-250ns.xtc -s md-250ns.tpr -pbc whole -o md-250ns_pbc.xtc",
                "gmx_mpi trjconv -f md-250ns_pbc.xtc -s md-250ns.tpr -pbc mol -center -o md-250ns_pbc_center.xtc -n center.ndx",
                "gmx_mpi trjconv -f md-250ns_pbc_center.xtc -s md-250ns_pbc_center.gro -o md-250ns_aligned_for_RMSF.xtc -fit rot+trans",
                "gmx_mpi make_ndx -f md-250ns.gro -o rmsf_cal.ndx",
                "gmx_mpi rmsf -f md-250ns_aligned_for_RMSF.xtc -s md-250ns_pbc_center.gro -n rmsf_cal.ndx -od rmsf_deviations.xvg",
            ]
        );
    }

    #[test]
    fn default_scripts_select_configured_groups() {
        let cfg = config();
        let scripts: Vec<String> = Step::ALL
            .iter()
            .map(|s| s.input_script(&cfg).unwrap().render())
            .collect();

        assert_eq!(
            scripts,
            vec![
                "a 6391\nq\n",
                "0\n",
                "17\n0\n",
                "0\n",
                "17\n0\n",
                "4\n0\n",
                "r 333-337 & a CA\nq\n",
                "17\n",
            ]
        );
    }

    #[test]
    fn index_steps_terminate_with_quit() {
        let cfg = config();
        for step in Step::ALL.into_iter().filter(|s| s.builds_index()) {
            let script = step.input_script(&cfg).unwrap();
            assert!(script.render().ends_with("\nq\n"), "{step} must end with q");
        }
    }

    #[test]
    fn every_input_is_static_or_produced_earlier() {
        let cfg = config();
        let produced_later: Vec<HashSet<PathBuf>> = (0..Step::COUNT)
            .map(|i| {
                Step::ALL[i..]
                    .iter()
                    .flat_map(|s| s.outputs(&cfg))
                    .collect()
            })
            .collect();

        for (i, step) in Step::ALL.iter().enumerate() {
            for input in step.inputs(&cfg) {
                assert!(
                    !produced_later[i].contains(&input),
                    "{step} reads {input:?} before it is produced"
                );
            }
        }
    }

    #[test]
    fn each_artifact_has_exactly_one_producer() {
        let cfg = config();
        let outputs: Vec<PathBuf> = Step::ALL.iter().flat_map(|s| s.outputs(&cfg)).collect();
        let unique: HashSet<_> = outputs.iter().collect();
        assert_eq!(outputs.len(), unique.len());
    }

    #[test]
    fn center_structure_depends_on_steps_one_and_two() {
        let cfg = config();
        let inputs = Step::CenterStructure.inputs(&cfg);
        assert!(inputs.contains(&Step::CenterIndex.outputs(&cfg)[0]));
        assert!(inputs.contains(&Step::WholeStructure.outputs(&cfg)[0]));
    }

    #[test]
    fn custom_groups_flow_into_scripts() {
        let cfg = PipelineConfig::builder()
            .executable("gmx")
            .groups(crate::engine::config::GroupIds {
                center: "18".into(),
                rmsf: "19".into(),
                fit: "Backbone".into(),
                system: "System".into(),
            })
            .build()
            .unwrap();

        assert_eq!(
            Step::FitTrajectory.input_script(&cfg).unwrap().render(),
            "Backbone\nSystem\n"
        );
        assert_eq!(Step::Rmsf.input_script(&cfg).unwrap().render(), "19\n");
    }
}
