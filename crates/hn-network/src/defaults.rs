//! Default physical values for assets.

/// Pipe length [m].
pub const DEFAULT_PIPE_LENGTH: f64 = 1.0;
/// Pipe inner diameter [m].
pub const DEFAULT_PIPE_DIAMETER: f64 = 0.2;
/// Pipe wall roughness [m].
pub const DEFAULT_PIPE_ROUGHNESS: f64 = 1.0e-3;
/// Pipe heat loss coefficient [W/(m2 K)]; zero means a perfectly
/// insulated pipe.
pub const DEFAULT_ALPHA_VALUE: f64 = 0.0;
/// Temperature of the pipe surroundings [K].
pub const DEFAULT_EXTERNAL_TEMPERATURE: f64 = 273.15 + 20.0;
/// Number of internal grid cells for pipe heat transport.
pub const DEFAULT_GRID_SIZE: usize = 10;

/// Production supply pressure [Pa] (10 bar).
pub const DEFAULT_PRESSURE: f64 = 1.0e6;
/// Boundary prescribed pressure [Pa].
pub const DEFAULT_BOUNDARY_PRESSURE: f64 = 1.0e5;
/// Supply / fallback temperature [K].
pub const DEFAULT_TEMPERATURE: f64 = 300.0;
/// Production mass flow rate [kg/s].
pub const DEFAULT_MASS_FLOW_RATE: f64 = 1.0;

/// Discharges below this magnitude [kg/s] are treated as stagnant when
/// picking upwind directions and thermal mixing weights.
pub const FLOW_EPS: f64 = 1.0e-9;
