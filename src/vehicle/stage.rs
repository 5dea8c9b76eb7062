// ---------------------------------------------------------------------------
// Stage definition (one separable segment of the launch vehicle)
// ---------------------------------------------------------------------------

/// Thrust is carried in kilonewtons and specific impulse as effective
/// exhaust velocity in m/s; mass flow is `thrust / isp * 1000`.
/// Vacuum-only stages carry their vacuum figures in the sea-level slots.
#[derive(Debug, Clone)]
pub struct Stage {
    pub name: String,
    pub dry_mass: f64,   // kg
    pub total_mass: f64, // kg, wet
    pub thrust_sl: f64,  // kN at sea level
    pub thrust_vac: f64, // kN in vacuum
    pub isp_sl: f64,     // m/s at sea level
    pub isp_vac: f64,    // m/s in vacuum
}

impl Stage {
    /// Propellant load: total minus dry, by construction.
    pub fn propellant_mass(&self) -> f64 {
        self.total_mass - self.dry_mass
    }

    /// Vacuum mass flow, kg/s.
    pub fn mass_flow(&self) -> f64 {
        if self.isp_vac > 0.0 {
            self.thrust_vac * 1_000.0 / self.isp_vac
        } else {
            0.0
        }
    }

    /// Self-consistent vacuum burn time from propellant and mass flow.
    pub fn burn_time(&self) -> f64 {
        let flow = self.mass_flow();
        if flow > 0.0 {
            self.propellant_mass() / flow
        } else {
            0.0
        }
    }

    /// Ideal vacuum delta-v with `payload_mass` stacked on top.
    pub fn delta_v(&self, payload_mass: f64) -> f64 {
        let m0 = self.total_mass + payload_mass;
        let mf = self.dry_mass + payload_mass;
        self.isp_vac * (m0 / mf).ln()
    }
}

/// Total ideal delta-v of a stack (each stage carries the ones above it).
pub fn stack_delta_v(stages: &[Stage]) -> f64 {
    let mut dv = 0.0;
    for i in 0..stages.len() {
        let payload: f64 = stages[i + 1..].iter().map(|s| s.total_mass).sum();
        dv += stages[i].delta_v(payload);
    }
    dv
}

// ---------------------------------------------------------------------------
// Stage builder
// ---------------------------------------------------------------------------

pub struct StageBuilder {
    name: String,
    dry_mass: f64,
    total_mass: f64,
    thrust_sl: f64,
    thrust_vac: f64,
    isp_sl: f64,
    isp_vac: f64,
}

impl StageBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dry_mass: 100.0,
            total_mass: 1_000.0,
            thrust_sl: 100.0,
            thrust_vac: 120.0,
            isp_sl: 2_500.0,
            isp_vac: 3_000.0,
        }
    }

    pub fn dry_mass(mut self, v: f64) -> Self { self.dry_mass = v; self }
    pub fn total_mass(mut self, v: f64) -> Self { self.total_mass = v; self }
    pub fn thrust_sl(mut self, v: f64) -> Self { self.thrust_sl = v; self }
    pub fn thrust_vac(mut self, v: f64) -> Self { self.thrust_vac = v; self }
    pub fn isp_sl(mut self, v: f64) -> Self { self.isp_sl = v; self }
    pub fn isp_vac(mut self, v: f64) -> Self { self.isp_vac = v; self }

    /// Vacuum-only stage: one thrust/impulse pair for every altitude.
    pub fn vacuum_only(mut self, thrust: f64, isp: f64) -> Self {
        self.thrust_sl = thrust;
        self.thrust_vac = thrust;
        self.isp_sl = isp;
        self.isp_vac = isp;
        self
    }

    pub fn build(self) -> Stage {
        Stage {
            name: self.name,
            dry_mass: self.dry_mass,
            total_mass: self.total_mass,
            thrust_sl: self.thrust_sl,
            thrust_vac: self.thrust_vac,
            isp_sl: self.isp_sl,
            isp_vac: self.isp_vac,
        }
    }
}
