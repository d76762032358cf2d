/// Built-in defaults applied when neither a CLI flag nor the config file sets
/// a value.
#[derive(Debug, Clone)]
pub struct DefaultsConfig {
    pub supercell: (usize, usize, usize),
    pub scale_displacements: bool,
    pub max_amplitude: f64,
    pub modulation_steps: usize,
    pub output_prefix: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            supercell: (1, 1, 1),
            scale_displacements: true,
            max_amplitude: 0.25,
            modulation_steps: 32,
            output_prefix: "Crystal".to_string(),
        }
    }
}
