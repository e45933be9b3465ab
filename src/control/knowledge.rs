//! Room climate knowledge base.
//!
//! Three antecedents partition the sensor ranges into overlapping
//! trapezoids; two consequents describe heater and chiller duty in `[0, 1)`.
//! The 75 rules are generated from [`action`], one per
//! temperature × humidity × pressure combination.
//!
//! Pressure only matters for cold, dry air (where a falling or low
//! barometer runs the chiller fan instead of heating). Every other
//! combination ignores it.

use crate::error::ConfigError;
use crate::fuzzy::{InferenceEngine, MembershipFunction, RuleBase, Universe, VariableRegistry};

pub const TEMPERATURE: &str = "Temperature";
pub const PRESSURE: &str = "Pressure";
pub const HUMIDITY: &str = "Humidity";
pub const HEATER: &str = "Heater";
pub const CHILLER: &str = "Chiller";

/// Temperature bands, °C over `[0, 35)` sampled every 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureBand {
    Freezy,
    Cold,
    Normal,
    Warm,
    Hot,
}

impl TemperatureBand {
    pub const ALL: [Self; 5] = [Self::Freezy, Self::Cold, Self::Normal, Self::Warm, Self::Hot];

    pub fn name(self) -> &'static str {
        match self {
            Self::Freezy => "Freezy",
            Self::Cold => "Cold",
            Self::Normal => "Normal",
            Self::Warm => "Warm",
            Self::Hot => "Hot",
        }
    }

    fn breakpoints(self) -> [f64; 4] {
        match self {
            Self::Freezy => [0.0, 0.0, 9.0, 10.0],
            Self::Cold => [9.0, 10.0, 13.5, 15.0],
            Self::Normal => [13.5, 15.0, 18.5, 20.0],
            Self::Warm => [18.5, 20.0, 23.5, 25.0],
            Self::Hot => [23.5, 25.0, 35.0, 35.0],
        }
    }
}

/// Barometric bands, hPa over `[500, 1500)` sampled every 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PressureBand {
    Fall,
    Low,
    Amicable,
    Elevated,
    High,
}

impl PressureBand {
    pub const ALL: [Self; 5] = [Self::Fall, Self::Low, Self::Amicable, Self::Elevated, Self::High];

    pub fn name(self) -> &'static str {
        match self {
            Self::Fall => "Fall",
            Self::Low => "Low",
            Self::Amicable => "Amicable",
            Self::Elevated => "Elevated",
            Self::High => "High",
        }
    }

    fn breakpoints(self) -> [f64; 4] {
        match self {
            Self::Fall => [500.0, 500.0, 680.0, 700.0],
            Self::Low => [680.0, 700.0, 880.0, 900.0],
            Self::Amicable => [880.0, 900.0, 1080.0, 1100.0],
            Self::Elevated => [1080.0, 1100.0, 1280.0, 1300.0],
            Self::High => [1280.0, 1300.0, 1500.0, 1500.0],
        }
    }
}

/// Relative humidity bands, % over `[0, 100)` sampled every 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HumidityBand {
    Dry,
    Comfortable,
    Wet,
}

impl HumidityBand {
    pub const ALL: [Self; 3] = [Self::Dry, Self::Comfortable, Self::Wet];

    pub fn name(self) -> &'static str {
        match self {
            Self::Dry => "Dry",
            Self::Comfortable => "Comfortable",
            Self::Wet => "Wet",
        }
    }

    fn breakpoints(self) -> [f64; 4] {
        match self {
            Self::Dry => [0.0, 0.0, 25.0, 30.0],
            Self::Comfortable => [25.0, 30.0, 55.0, 60.0],
            Self::Wet => [55.0, 60.0, 100.0, 100.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaterLevel {
    Off,
    Heat,
    QuickHeat,
}

impl HeaterLevel {
    pub const ALL: [Self; 3] = [Self::Off, Self::Heat, Self::QuickHeat];

    pub fn name(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Heat => "Heat",
            Self::QuickHeat => "Quick-Heat",
        }
    }

    fn shape(self) -> Result<MembershipFunction, ConfigError> {
        match self {
            Self::Off => MembershipFunction::triangular(0.0, 0.0, 0.0),
            Self::Heat => MembershipFunction::trapezoidal(0.0, 0.0, 0.45, 0.55),
            Self::QuickHeat => MembershipFunction::trapezoidal(0.45, 0.55, 1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChillerLevel {
    Off,
    ChillerFan,
    Cool,
    QuickCool,
}

impl ChillerLevel {
    pub const ALL: [Self; 4] = [Self::Off, Self::ChillerFan, Self::Cool, Self::QuickCool];

    pub fn name(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::ChillerFan => "Chiller-Fan",
            Self::Cool => "Cool",
            Self::QuickCool => "Quick-Cool",
        }
    }

    fn shape(self) -> Result<MembershipFunction, ConfigError> {
        match self {
            Self::Off => MembershipFunction::triangular(0.0, 0.0, 0.0),
            Self::ChillerFan => MembershipFunction::trapezoidal(0.0, 0.0, 0.35, 0.45),
            Self::Cool => MembershipFunction::trapezoidal(0.35, 0.45, 0.65, 0.75),
            Self::QuickCool => MembershipFunction::trapezoidal(0.65, 0.75, 1.0, 1.0),
        }
    }
}

/// Heater and chiller levels asserted for one input combination.
pub fn action(t: TemperatureBand, p: PressureBand, h: HumidityBand) -> (HeaterLevel, ChillerLevel) {
    use ChillerLevel as C;
    use HeaterLevel as H;

    match t {
        TemperatureBand::Freezy => (H::QuickHeat, C::Off),
        TemperatureBand::Cold => match (p, h) {
            (PressureBand::Fall | PressureBand::Low, HumidityBand::Dry) => (H::Off, C::ChillerFan),
            _ => (H::Heat, C::Off),
        },
        TemperatureBand::Normal => (H::Heat, C::Off),
        TemperatureBand::Warm => match h {
            HumidityBand::Wet => (H::Off, C::QuickCool),
            _ => (H::Off, C::Cool),
        },
        TemperatureBand::Hot => (H::Off, C::QuickCool),
    }
}

/// Every combination in rule order: temperature, then humidity, then pressure.
pub fn combinations() -> impl Iterator<Item = (TemperatureBand, PressureBand, HumidityBand)> {
    TemperatureBand::ALL.into_iter().flat_map(|t| {
        HumidityBand::ALL
            .into_iter()
            .flat_map(move |h| PressureBand::ALL.into_iter().map(move |p| (t, p, h)))
    })
}

fn trapezoid([a, b, c, d]: [f64; 4]) -> Result<MembershipFunction, ConfigError> {
    MembershipFunction::trapezoidal(a, b, c, d)
}

pub fn build_registry() -> Result<VariableRegistry, ConfigError> {
    let mut reg = VariableRegistry::new();

    let temperature = reg.antecedent(TEMPERATURE, Universe::new(0.0, 35.0, 0.5)?)?;
    let pressure = reg.antecedent(PRESSURE, Universe::new(500.0, 1500.0, 1.0)?)?;
    let humidity = reg.antecedent(HUMIDITY, Universe::new(0.0, 100.0, 0.5)?)?;

    for band in TemperatureBand::ALL {
        reg.add_term(temperature, band.name(), trapezoid(band.breakpoints())?)?;
    }
    for band in PressureBand::ALL {
        reg.add_term(pressure, band.name(), trapezoid(band.breakpoints())?)?;
    }
    for band in HumidityBand::ALL {
        reg.add_term(humidity, band.name(), trapezoid(band.breakpoints())?)?;
    }

    let control = Universe::new(0.0, 1.0, 0.01)?;
    let heater = reg.consequent(HEATER, control.clone())?;
    let chiller = reg.consequent(CHILLER, control)?;

    for level in HeaterLevel::ALL {
        reg.add_term(heater, level.name(), level.shape()?)?;
    }
    for level in ChillerLevel::ALL {
        reg.add_term(chiller, level.name(), level.shape()?)?;
    }

    Ok(reg)
}

pub fn build_rules(registry: &VariableRegistry) -> Result<RuleBase, ConfigError> {
    let mut rules = RuleBase::with_capacity(75);

    for (t, p, h) in combinations() {
        let (heater, chiller) = action(t, p, h);
        rules.add(
            registry,
            &[
                (TEMPERATURE, t.name()),
                (PRESSURE, p.name()),
                (HUMIDITY, h.name()),
            ],
            &[(HEATER, heater.name()), (CHILLER, chiller.name())],
        )?;
    }

    Ok(rules)
}

/// Registry plus rule base, ready for inference.
pub fn build_engine() -> Result<InferenceEngine, ConfigError> {
    let registry = build_registry()?;
    let rules = build_rules(&registry)?;
    InferenceEngine::new(registry, rules)
}
