//! Parameter model: temperature, brightness and gamma
//!
//! The model is owned by the interaction thread. Edits notify registered
//! listeners with a snapshot of all three values; writes made while the
//! suppression flag is set (reset restoring defaults) notify nobody.

use tracing::debug;

use crate::constants::params::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Temperature,
    Brightness,
    Gamma,
}

impl ParamKind {
    /// Display order in the settings panel
    pub const PANEL_ORDER: [ParamKind; 3] =
        [ParamKind::Brightness, ParamKind::Temperature, ParamKind::Gamma];

    pub fn spec(self) -> &'static ParamSpec {
        match self {
            ParamKind::Temperature => &TEMPERATURE,
            ParamKind::Brightness => &BRIGHTNESS,
            ParamKind::Gamma => &GAMMA,
        }
    }

    fn index(self) -> usize {
        match self {
            ParamKind::Temperature => 0,
            ParamKind::Brightness => 1,
            ParamKind::Gamma => 2,
        }
    }
}

/// Static description of one adjustable setting
#[derive(Debug)]
pub struct ParamSpec {
    pub title: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    pub decimals: usize,
    pub unit: &'static str,
}

impl ParamSpec {
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default;
        }
        value.clamp(self.min, self.max)
    }

    /// Value text as shown next to the slider, e.g. "6500 K" or "0.85"
    pub fn format(&self, value: f64) -> String {
        let text = format!("{:.*}", self.decimals, value);
        if self.unit.is_empty() {
            text
        } else {
            format!("{text} {}", self.unit)
        }
    }
}

pub static TEMPERATURE: ParamSpec = ParamSpec {
    title: "Temperature (K)",
    min: TEMPERATURE_MIN,
    max: TEMPERATURE_MAX,
    step: TEMPERATURE_STEP,
    default: TEMPERATURE_DEFAULT,
    decimals: 0,
    unit: "K",
};

pub static BRIGHTNESS: ParamSpec = ParamSpec {
    title: "Brightness",
    min: BRIGHTNESS_MIN,
    max: BRIGHTNESS_MAX,
    step: BRIGHTNESS_STEP,
    default: BRIGHTNESS_DEFAULT,
    decimals: 2,
    unit: "",
};

pub static GAMMA: ParamSpec = ParamSpec {
    title: "Gamma",
    min: GAMMA_MIN,
    max: GAMMA_MAX,
    step: GAMMA_STEP,
    default: GAMMA_DEFAULT,
    decimals: 2,
    unit: "",
};

/// Values of all three parameters captured at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub temperature: u32,
    pub brightness: f64,
    pub gamma: f64,
}

impl Snapshot {
    pub fn new(temperature: f64, brightness: f64, gamma: f64) -> Self {
        Self {
            temperature: TEMPERATURE.clamp(temperature).round() as u32,
            brightness: BRIGHTNESS.clamp(brightness),
            gamma: GAMMA.clamp(gamma),
        }
    }

    pub fn defaults() -> Self {
        Self::new(TEMPERATURE.default, BRIGHTNESS.default, GAMMA.default)
    }
}

/// One user edit as seen by listeners
#[derive(Debug, Clone, Copy)]
pub struct ParamChange {
    pub kind: ParamKind,
    pub value: f64,
    pub snapshot: Snapshot,
}

pub type Listener = Box<dyn FnMut(&ParamChange) + Send>;

pub struct ParameterModel {
    values: [f64; 3],
    /// Set only while reset writes defaults back
    suppressed: bool,
    listeners: Vec<Listener>,
}

impl ParameterModel {
    pub fn new() -> Self {
        Self {
            values: [TEMPERATURE.default, BRIGHTNESS.default, GAMMA.default],
            suppressed: false,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn value(&self, kind: ParamKind) -> f64 {
        self.values[kind.index()]
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.value(ParamKind::Temperature),
            self.value(ParamKind::Brightness),
            self.value(ParamKind::Gamma),
        )
    }

    /// Store a new value, clamped to the parameter range. Listeners hear about it
    /// only when the value actually changed and suppression is off.
    pub fn set(&mut self, kind: ParamKind, value: f64) -> bool {
        let value = kind.spec().clamp(value);
        let slot = &mut self.values[kind.index()];
        if *slot == value {
            return false;
        }
        *slot = value;

        if self.suppressed {
            debug!(?kind, value, "Suppressed parameter change notification");
            return true;
        }

        let change = ParamChange {
            kind,
            value,
            snapshot: self.snapshot(),
        };
        for listener in self.listeners.iter_mut() {
            listener(&change);
        }
        true
    }

    /// Write every parameter back to its default with notifications suppressed
    pub fn restore_defaults(&mut self) {
        self.suppressed = true;
        for kind in ParamKind::PANEL_ORDER {
            self.set(kind, kind.spec().default);
        }
        self.suppressed = false;
    }
}

impl Default for ParameterModel {
    fn default() -> Self {
        Self::new()
    }
}
