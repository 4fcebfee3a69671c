//! International Standard Atmosphere (1976) temperature and speed of sound,
//! used to turn a Mach number into a true airspeed.
//!
//! Only the first three layers (up to 32 km) are tabulated.
//! Above that the last layer's lapse rate is simply continued,
//! which is well outside anything a subsonic lifting-surface analysis needs.

/// Sea-level standard temperature in kelvin.
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.15;
/// Ratio of specific heats of air.
pub const HEAT_CAPACITY_RATIO: f64 = 1.4;
/// Specific gas constant of dry air in J/(kg K).
pub const GAS_CONSTANT_AIR: f64 = 287.05287;

/// Geopotential altitude of each layer's base (m) and the lapse rate
/// within it (K/m, positive when temperature decreases with height).
const LAYERS: [(f64, f64); 3] = [(0., 0.0065), (11_000., 0.0), (20_000., -0.001)];

/// Standard temperature in kelvin at the given altitude in metres.
///
/// Altitudes below sea level use the tropospheric lapse rate.
pub fn temperature(altitude: f64) -> f64 {
    let mut temp = SEA_LEVEL_TEMPERATURE;
    for (i, &(base, lapse)) in LAYERS.iter().enumerate() {
        let top = LAYERS.get(i + 1).map_or(f64::INFINITY, |&(next_base, _)| next_base);
        if altitude < top {
            return temp - lapse * (altitude - base);
        }
        temp -= lapse * (top - base);
    }
    temp
}

/// Speed of sound in m/s at the given altitude in metres.
pub fn speed_of_sound(altitude: f64) -> f64 {
    f64::sqrt(HEAT_CAPACITY_RATIO * GAS_CONSTANT_AIR * temperature(altitude))
}

/// True airspeed in m/s for a flight Mach number at the given altitude in metres.
#[inline]
pub fn true_airspeed(mach: f64, altitude: f64) -> f64 {
    mach * speed_of_sound(altitude)
}
