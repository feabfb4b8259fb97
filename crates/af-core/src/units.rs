// af-core/src/units.rs

use uom::si::f64::{
    Acceleration as UomAcceleration, Angle as UomAngle, Area as UomArea,
    DynamicViscosity as UomDynamicViscosity, Frequency as UomFrequency,
    KinematicViscosity as UomKinematicViscosity, Length as UomLength,
    MassDensity as UomMassDensity, MolarMass as UomMolarMass, Pressure as UomPressure,
    Ratio as UomRatio, ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
    Velocity as UomVelocity, Volume as UomVolume, VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type Angle = UomAngle;
pub type Area = UomArea;
pub type Density = UomMassDensity;
pub type DynVisc = UomDynamicViscosity;
pub type Flow = UomVolumeRate;
pub type Frequency = UomFrequency;
pub type KinVisc = UomKinematicViscosity;
pub type Length = UomLength;
pub type MolarMass = UomMolarMass;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;
pub type Velocity = UomVelocity;
pub type Volume = UomVolume;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn cm(v: f64) -> Length {
    use uom::si::length::centimeter;
    Length::new::<centimeter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn inch(v: f64) -> Length {
    use uom::si::length::inch;
    Length::new::<inch>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

#[inline]
pub fn m3ps(v: f64) -> Flow {
    use uom::si::volume_rate::cubic_meter_per_second;
    Flow::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn lps(v: f64) -> Flow {
    use uom::si::volume_rate::liter_per_second;
    Flow::new::<liter_per_second>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn pas(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

#[inline]
pub fn m2ps(v: f64) -> KinVisc {
    use uom::si::kinematic_viscosity::square_meter_per_second;
    KinVisc::new::<square_meter_per_second>(v)
}

#[inline]
pub fn kgpmol(v: f64) -> MolarMass {
    use uom::si::molar_mass::kilogram_per_mole;
    MolarMass::new::<kilogram_per_mole>(v)
}

#[inline]
pub fn hz(v: f64) -> Frequency {
    use uom::si::frequency::hertz;
    Frequency::new::<hertz>(v)
}

#[inline]
pub fn rad(v: f64) -> Angle {
    use uom::si::angle::radian;
    Angle::new::<radian>(v)
}

#[inline]
pub fn deg(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

pub mod constants {
    use super::*;

    pub const G0_MPS2: f64 = 9.806_65;

    /// Universal gas constant [J/(mol·K)]
    pub const R_UNIVERSAL_J_PER_MOL_K: f64 = 8.314_462_618;

    #[inline]
    pub fn g0() -> Accel {
        use uom::si::acceleration::meter_per_second_squared;
        Accel::new::<meter_per_second_squared>(G0_MPS2)
    }
}
