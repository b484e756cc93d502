// Single source of truth for all default values.

// --- Discovery ---
pub const DEFAULT_ALPHA: f64 = 0.05;
pub const DEFAULT_CHI_SQUARE_BINS: usize = 3;

// --- ANM ---
pub const DEFAULT_ANM_ALPHA: f64 = 0.05;
pub const DEFAULT_MAX_SAMPLES: usize = 500;
pub const DEFAULT_LENGTH_SCALES: [f64; 3] = [0.3, 1.0, 3.0];
pub const DEFAULT_NOISE_LEVELS: [f64; 3] = [0.01, 0.1, 1.0];
pub const DEFAULT_PARALLEL_EDGES: bool = false;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
