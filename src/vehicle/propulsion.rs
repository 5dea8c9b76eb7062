use super::stage::Stage;

// ---------------------------------------------------------------------------
// Active-stage engine state
// ---------------------------------------------------------------------------

/// Engine and propellant state for the currently burning stage.
/// Stages are consumed strictly in order and never revisited; once the last
/// stage runs dry the engine is locked off.
#[derive(Debug, Clone)]
pub struct Propulsion {
    stages: Vec<Stage>,
    stage_idx: usize,
    thrust_sl: f64,
    thrust_vac: f64,
    isp_sl: f64,
    isp_vac: f64,
    /// Propellant remaining in the active stage, kg.
    pub propellant: f64,
}

/// Result of a staging transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Staging {
    pub from: usize,
    pub to: usize,
    /// Vehicle total mass after jettison: sum of the stages still attached.
    pub vehicle_mass: f64,
}

impl Propulsion {
    pub fn new(stages: Vec<Stage>) -> Self {
        assert!(!stages.is_empty(), "a vehicle needs at least one stage");
        let first = &stages[0];
        Propulsion {
            propellant: first.propellant_mass(),
            thrust_sl: first.thrust_sl,
            thrust_vac: first.thrust_vac,
            isp_sl: first.isp_sl,
            isp_vac: first.isp_vac,
            stages,
            stage_idx: 0,
        }
    }

    pub fn stage_idx(&self) -> usize {
        self.stage_idx
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Liftoff mass: every stage stacked.
    pub fn initial_mass(&self) -> f64 {
        self.stages.iter().map(|s| s.total_mass).sum()
    }

    /// True once the final stage has burned dry; thrust stays zero then.
    pub fn exhausted(&self) -> bool {
        self.stage_idx + 1 >= self.stages.len() && self.propellant <= 0.0
    }

    /// Effective thrust (kN) and specific impulse (m/s) at a density ratio
    /// rho/rho0: 1 at sea level, 0 in vacuum.
    pub fn effective(&self, density_ratio: f64) -> (f64, f64) {
        let thrust = self.thrust_vac - (self.thrust_vac - self.thrust_sl) * density_ratio;
        let isp = self.isp_vac - (self.isp_vac - self.isp_sl) * density_ratio;
        (thrust, isp)
    }

    /// Burn propellant for one step at the given effective thrust/impulse.
    /// Returns the mass consumed; the caller removes it from the vehicle.
    pub fn consume(&mut self, thrust_kn: f64, isp: f64, dt: f64) -> f64 {
        if thrust_kn <= 0.0 || isp <= 0.0 {
            return 0.0;
        }
        let burned = thrust_kn / isp * 1_000.0 * dt;
        self.propellant -= burned;
        burned
    }

    /// Advance to the next stage if the active one is spent. The next
    /// stage's propellant and performance replace the active figures; any
    /// overdraft on the spent stage is discarded.
    pub fn check_staging(&mut self) -> Option<Staging> {
        if self.propellant > 0.0 || self.stage_idx + 1 >= self.stages.len() {
            return None;
        }
        let from = self.stage_idx;
        self.stage_idx += 1;
        let next = &self.stages[self.stage_idx];
        self.propellant = next.propellant_mass();
        self.thrust_sl = next.thrust_sl;
        self.thrust_vac = next.thrust_vac;
        self.isp_sl = next.isp_sl;
        self.isp_vac = next.isp_vac;
        let vehicle_mass = self.stages[self.stage_idx..].iter().map(|s| s.total_mass).sum();
        Some(Staging { from, to: self.stage_idx, vehicle_mass })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::stage::StageBuilder;
    use approx::assert_relative_eq;

    fn three_stage() -> Vec<Stage> {
        vec![
            StageBuilder::new("S1")
                .dry_mass(1_000.0)
                .total_mass(11_000.0)
                .thrust_sl(300.0)
                .thrust_vac(360.0)
                .isp_sl(2_500.0)
                .isp_vac(3_000.0)
                .build(),
            StageBuilder::new("S2")
                .dry_mass(200.0)
                .total_mass(2_200.0)
                .vacuum_only(50.0, 3_200.0)
                .build(),
            StageBuilder::new("S3")
                .dry_mass(50.0)
                .total_mass(150.0)
                .vacuum_only(5.0, 3_100.0)
                .build(),
        ]
    }

    #[test]
    fn interpolation_hits_both_endpoints() {
        let p = Propulsion::new(three_stage());
        let (t_sl, i_sl) = p.effective(1.0);
        let (t_vac, i_vac) = p.effective(0.0);
        assert_relative_eq!(t_sl, 300.0);
        assert_relative_eq!(i_sl, 2_500.0);
        assert_relative_eq!(t_vac, 360.0);
        assert_relative_eq!(i_vac, 3_000.0);
    }

    #[test]
    fn propellant_non_increasing_under_thrust() {
        let mut p = Propulsion::new(three_stage());
        let mut last = p.propellant;
        for _ in 0..100 {
            p.consume(360.0, 3_000.0, 0.25);
            assert!(p.propellant < last);
            last = p.propellant;
        }
    }

    #[test]
    fn staging_reloads_literal_propellant() {
        let mut p = Propulsion::new(three_stage());
        p.propellant = -5.0; // overdraft from the last burn tick
        let staging = p.check_staging().unwrap();
        assert_eq!((staging.from, staging.to), (0, 1));
        assert_relative_eq!(p.propellant, 2_000.0);
        assert_relative_eq!(staging.vehicle_mass, 2_350.0);
    }

    #[test]
    fn mass_after_final_staging_is_payload_total() {
        let stages = three_stage();
        let payload_total = stages[2].total_mass;
        let mut p = Propulsion::new(stages);
        let mut last_mass = p.initial_mass();
        let mut transitions = 0;
        while !p.exhausted() {
            p.consume(100.0, 3_000.0, 1.0);
            if let Some(s) = p.check_staging() {
                last_mass = s.vehicle_mass;
                transitions += 1;
            }
        }
        assert_eq!(transitions, 2);
        assert_relative_eq!(last_mass, payload_total);
    }

    #[test]
    fn final_stage_exhaustion_locks_engine() {
        let mut p = Propulsion::new(vec![StageBuilder::new("only")
            .dry_mass(10.0)
            .total_mass(20.0)
            .vacuum_only(1.0, 1_000.0)
            .build()]);
        while p.propellant > 0.0 {
            p.consume(1.0, 1_000.0, 1.0);
        }
        assert!(p.check_staging().is_none());
        assert!(p.exhausted());
    }
}
