pub struct DefaultsConfig {
    pub executable: String,
    pub working_dir: String,
    pub center_group: String,
    pub rmsf_group: String,
    pub fit_group: String,
    pub system_group: String,
    pub center_selection: String,
    pub rmsf_selection: String,
    pub index_structure: String,
    pub prefix: String,
    pub center_index: String,
    pub rmsf_index: String,
    pub report: String,
    pub fit_mode: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            executable: "gmx_mpi".to_string(),
            working_dir: ".".to_string(),
            center_group: "17".to_string(),
            rmsf_group: "17".to_string(),
            fit_group: "4".to_string(),
            system_group: "0".to_string(),
            center_selection: "a 6391".to_string(),
            rmsf_selection: "r 333-337 & a CA".to_string(),
            index_structure: "em.gro".to_string(),
            prefix: "md-250ns".to_string(),
            center_index: "center.ndx".to_string(),
            rmsf_index: "rmsf_cal.ndx".to_string(),
            report: "rmsf_deviations.xvg".to_string(),
            fit_mode: "rot+trans".to_string(),
        }
    }
}
