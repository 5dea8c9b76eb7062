use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector2;

use crate::bodies::{Body, GravityPull};
use crate::config::MissionConfig;
use crate::guidance::{self, Phase};
use crate::orbital::maneuvers;
use crate::physics::{atmosphere, geometry, gravity};
use crate::sim::event::{EventKind, SimEvent};
use crate::sim::state::{BodySnapshot, FlightState, Snapshot, TrackSample, VehicleSnapshot};

// ---------------------------------------------------------------------------
// The simulation owns every record; the outside world sees snapshots
// ---------------------------------------------------------------------------

pub struct Simulation {
    pub bodies: Vec<Body>,
    pub flight: Option<FlightState>,
    pub time: f64,
    pub events: Vec<SimEvent>,
    pub track: Vec<TrackSample>,
    dt: f64,
    sample_every: usize,
    tick: u64,
    halted: bool,
}

impl Simulation {
    pub fn new(config: MissionConfig) -> Self {
        let mut bodies: Vec<Body> = Vec::with_capacity(config.bodies.len() + 1);
        for bc in &config.bodies {
            let (parent_pos, parent_vel) = match bc.parent {
                Some(name) => {
                    let p = bodies
                        .iter()
                        .find(|b| b.name == name)
                        .unwrap_or_else(|| panic!("parent body {name} not defined yet"));
                    (p.pos, p.vel)
                }
                None => (Vector2::zeros(), Vector2::zeros()),
            };
            bodies.push(Body {
                name: bc.name.to_string(),
                mass: bc.mass,
                radius: bc.radius,
                periapsis: bc.periapsis,
                apoapsis: bc.apoapsis,
                pos: parent_pos + Vector2::new(0.0, bc.periapsis),
                vel: parent_vel + Vector2::new(bc.periapsis_speed, 0.0),
                accel: Vector2::zeros(),
                pulls: Vec::new(),
            });
        }
        let resolved: Vec<Vec<GravityPull>> = config
            .bodies
            .iter()
            .map(|bc| resolve_attractors(&bodies, &bc.attractors))
            .collect();
        for (b, pulls) in bodies.iter_mut().zip(resolved) {
            b.pulls = pulls;
        }

        let mut flight = None;
        if let Some(vc) = config.vehicle {
            let launch_ref = index_of(&bodies, vc.launch_body);
            let target_ref = index_of(&bodies, vc.target_body);
            let pulls = resolve_attractors(&bodies, &vc.attractors);
            let site = &bodies[launch_ref];
            let (site_pos, site_vel, site_radius) = (site.pos, site.vel, site.radius);
            let state = FlightState::new(vc, bodies.len(), launch_ref, target_ref);
            bodies.push(Body {
                name: state.config.name.to_string(),
                mass: state.propulsion.initial_mass(),
                radius: 0.0,
                periapsis: 0.0,
                apoapsis: 0.0,
                pos: site_pos + Vector2::new(0.0, site_radius),
                vel: site_vel + Vector2::new(state.config.launch_speed, 0.0),
                accel: Vector2::zeros(),
                pulls,
            });
            flight = Some(state);
        }

        Simulation {
            bodies,
            flight,
            time: 0.0,
            events: Vec::new(),
            track: Vec::new(),
            dt: config.dt,
            sample_every: config.sample_every,
            tick: 0,
            halted: false,
        }
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// True once the vehicle has reached the target body's surface.
    pub fn halted(&self) -> bool {
        self.halted
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Run `steps` fixed ticks (0 is allowed). Stops early at touchdown.
    pub fn advance(&mut self, steps: u32) {
        for _ in 0..steps {
            if self.halted {
                break;
            }
            self.step();
        }
    }

    /// Step until mission time reaches `t` or the run halts.
    pub fn run_until(&mut self, t: f64) {
        while !self.halted && self.time < t {
            self.step();
        }
    }

    /// One fixed tick. No-op after touchdown.
    pub fn step(&mut self) {
        if self.halted {
            return;
        }
        let dt = self.dt;
        let prev_t = self.time;
        self.time += dt;
        let t = self.time;
        self.tick += 1;

        self.refresh_pulls();

        let mut flight = self.flight.take();

        // Engine output for this tick, from pre-integration state
        let mut thrust_kn = 0.0;
        let mut isp = 0.0;
        let mut thrust_accel = 0.0;
        if let Some(f) = flight.as_mut() {
            (thrust_kn, isp, thrust_accel) = self.engine_output(f);
            f.thrust_accel = thrust_accel;
        }

        // Net accelerations: gravity for everyone, thrust for the vehicle
        for b in &mut self.bodies {
            let mut a = Vector2::zeros();
            for p in &b.pulls {
                a -= p.accel * geometry::radial(p.bearing);
            }
            b.accel = a;
        }
        if let Some(f) = flight.as_ref() {
            let (bearing, throttle) = self.thrust_command(f, t);
            self.bodies[f.body].accel += throttle * thrust_accel * geometry::radial(bearing);
        }

        // Semi-implicit Euler: velocity first, then position with the new
        // velocity
        for b in &mut self.bodies {
            b.vel += b.accel * dt;
            b.pos += b.vel * dt;
        }

        if let Some(f) = flight.as_mut() {
            // Propellant and vehicle mass
            let burned = f.propulsion.consume(thrust_kn, isp, dt);
            self.bodies[f.body].mass -= burned;

            if let Some(staging) = f.propulsion.check_staging() {
                self.bodies[f.body].mass = staging.vehicle_mass;
                self.events.push(SimEvent {
                    time: t,
                    kind: EventKind::Staging { from: staging.from, to: staging.to },
                });
            }

            self.run_planner(f, prev_t, t, thrust_accel);
            f.phase = guidance::phase_at(t, &f.config.schedule);

            if self.sample_every > 0 && self.tick % self.sample_every as u64 == 0 {
                let sample = self.sample(f);
                self.track.push(sample);
            }
        }

        self.flight = flight;
    }

    /// Copy-on-read state for the presentation layer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time: self.time,
            bodies: self
                .bodies
                .iter()
                .map(|b| BodySnapshot {
                    name: b.name.clone(),
                    pos: b.pos,
                    vel: b.vel,
                    radius: b.radius,
                })
                .collect(),
            vehicle: self.flight.as_ref().map(|f| VehicleSnapshot {
                mass: self.bodies[f.body].mass,
                propellant: f.propulsion.propellant,
                stage: f.propulsion.stage_idx(),
                phase: f.phase,
                velocity_matched: f.velocity_matched,
                descent_achieved: f.descent_achieved,
                burn_dv: f.burn_dv,
                touchdown: f.touchdown,
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Per-tick pieces
    // -----------------------------------------------------------------------

    /// Refresh every body's gravity magnitudes and bearings from the current
    /// positions. Runs before anything else reads a pull.
    fn refresh_pulls(&mut self) {
        let sources: Vec<(Vector2<f64>, f64)> =
            self.bodies.iter().map(|b| (b.pos, b.mass)).collect();
        for b in &mut self.bodies {
            for p in &mut b.pulls {
                let (src_pos, src_mass) = sources[p.attractor];
                let r = geometry::separation(&b.pos, &src_pos);
                p.accel = gravity::point_accel(src_mass, r);
                p.bearing = geometry::bearing(&(b.pos - src_pos));
            }
        }
    }

    /// Effective thrust (kN), specific impulse (m/s), and propulsive
    /// acceleration (m/s^2) for this tick. Zero while the velocity-match
    /// latch, the descent latch, or final-stage exhaustion holds.
    fn engine_output(&self, f: &FlightState) -> (f64, f64, f64) {
        let vehicle = &self.bodies[f.body];
        let site = &self.bodies[f.launch_ref];
        let altitude = vehicle.altitude_above(site);

        let (mut thrust, isp) = if altitude < atmosphere::CEILING {
            let g_local = vehicle.pull_from(f.launch_ref).map_or(0.0, |p| p.accel);
            let ratio = atmosphere::density(altitude.max(0.0), g_local)
                / atmosphere::sea_level_density();
            f.propulsion.effective(ratio)
        } else {
            f.propulsion.effective(0.0)
        };

        if f.velocity_matched || f.descent_achieved || f.propulsion.exhausted() {
            thrust = 0.0;
        }
        let accel = if thrust > 0.0 {
            thrust / vehicle.mass * 1_000.0
        } else {
            0.0
        };
        (thrust, isp, accel)
    }

    /// Thrust bearing and throttle for the current phase.
    fn thrust_command(&self, f: &FlightState, t: f64) -> (f64, f64) {
        let s = &f.config.schedule;
        let g = &f.config.guidance;
        let vehicle = &self.bodies[f.body];
        let site = &self.bodies[f.launch_ref];
        let target = &self.bodies[f.target_ref];
        let phi_site = vehicle.pull_from(f.launch_ref).map_or(0.0, |p| p.bearing);
        let phi_target = vehicle.pull_from(f.target_ref).map_or(0.0, |p| p.bearing);

        if t < s.injection_start {
            let altitude = vehicle.altitude_above(site);
            (phi_site + guidance::ascent_pitch(altitude, g), 1.0)
        } else if t < s.capture_start {
            let rel = vehicle.vel - site.vel;
            (guidance::prograde_bearing(&rel, vehicle.pos.y >= site.pos.y), 1.0)
        } else if t < s.lowering_start {
            let rel = vehicle.vel - target.vel;
            (guidance::retrograde_bearing(&rel, vehicle.pos.y >= target.pos.y), 1.0)
        } else if !f.descent_achieved {
            let throttle = if t >= s.braking_start { g.braking_throttle } else { 1.0 };
            (phi_target - FRAC_PI_2, throttle)
        } else {
            (phi_target, 1.0)
        }
    }

    /// The time-gated maneuver blocks, in the order they are evaluated each
    /// tick. `accel` is this tick's propulsive acceleration, already zero
    /// when any engine-off latch held at tick start.
    fn run_planner(&mut self, f: &mut FlightState, prev_t: f64, t: f64, accel: f64) {
        let s = f.config.schedule;
        let g = f.config.guidance;
        let dt = self.dt;
        let crossed = |threshold: f64| prev_t < threshold && t >= threshold;

        // Parking-orbit insertion about the launch body
        {
            let vehicle = &self.bodies[f.body];
            let site = &self.bodies[f.launch_ref];
            if !f.velocity_matched
                && vehicle.altitude_above(site) >= g.parking_altitude
                && t <= g.parking_deadline
            {
                let phi = vehicle.pull_from(f.launch_ref).map_or(0.0, |p| p.bearing);
                let vel = site.vel + g.parking_speed * geometry::tangential(phi);
                self.bodies[f.body].vel = vel;
                f.velocity_matched = true;
                self.events.push(SimEvent { time: t, kind: EventKind::ParkingOrbit });
            }
        }

        // Trans-lunar injection
        if crossed(s.injection_start) {
            f.velocity_matched = false;
            let vehicle = &self.bodies[f.body];
            let site = &self.bodies[f.launch_ref];
            let target = &self.bodies[f.target_ref];
            let rel_speed = (vehicle.vel - site.vel).norm();
            let r = vehicle.distance_to(site);
            let apogee = vehicle.distance_to(target) + target.radius + s.injection_clearance;
            f.injection_target = maneuvers::injection_dv(rel_speed, r, apogee);
            self.events.push(SimEvent {
                time: t,
                kind: EventKind::BurnPlanned { phase: Phase::Injection, dv: f.injection_target },
            });
        }
        if t >= s.injection_start && t < s.capture_start {
            f.burn_dv += accel * dt;
            if f.burn_dv >= f.injection_target * s.injection_margin {
                f.velocity_matched = true;
                self.events.push(SimEvent {
                    time: t,
                    kind: EventKind::Cutoff { phase: Phase::Injection, dv: f.burn_dv },
                });
                f.burn_dv = 0.0;
            }
        }

        // Capture at the target body
        if crossed(s.capture_start) {
            f.velocity_matched = false;
            let vehicle = &self.bodies[f.body];
            let target = &self.bodies[f.target_ref];
            let r = vehicle.distance_to(target);
            let rel_speed = (vehicle.vel - target.vel).norm();
            f.capture_target = maneuvers::capture_dv(
                gravity::mu(target.mass),
                r,
                target.radius + s.capture_altitude,
                rel_speed,
            );
            self.events.push(SimEvent {
                time: t,
                kind: EventKind::BurnPlanned { phase: Phase::Capture, dv: f.capture_target },
            });
        }
        if t >= s.capture_start && t < s.capture_burn_end {
            f.burn_dv += accel * dt;
            if f.burn_dv >= f.capture_target {
                f.velocity_matched = true;
                self.events.push(SimEvent {
                    time: t,
                    kind: EventKind::Cutoff { phase: Phase::Capture, dv: f.burn_dv },
                });
                f.burn_dv = 0.0;
            }
        }

        // Circular capture orbit imposed inside the capture window
        {
            let vehicle = &self.bodies[f.body];
            let target = &self.bodies[f.target_ref];
            if vehicle.altitude_above(target) <= s.capture_altitude && t <= s.capture_deadline {
                let phi = vehicle.pull_from(f.target_ref).map_or(0.0, |p| p.bearing);
                let vel = target.vel + g.capture_speed * geometry::tangential(phi);
                self.bodies[f.body].vel = vel;
                f.velocity_matched = true;
                if !f.capture_announced {
                    f.capture_announced = true;
                    self.events.push(SimEvent { time: t, kind: EventKind::CaptureOrbit });
                }
            }
        }

        // Periapsis lowering
        if crossed(s.lowering_start) {
            f.velocity_matched = false;
            let vehicle = &self.bodies[f.body];
            let target = &self.bodies[f.target_ref];
            let rel_speed = (vehicle.vel - target.vel).norm();
            let r = vehicle.distance_to(target);
            f.lowering_target =
                maneuvers::lowering_dv(rel_speed, r, target.radius + s.lowering_altitude);
            self.events.push(SimEvent {
                time: t,
                kind: EventKind::BurnPlanned { phase: Phase::Lowering, dv: f.lowering_target },
            });
        }
        if t >= s.lowering_start && t < s.lowering_burn_end {
            f.burn_dv += accel * dt;
            if f.burn_dv >= f.lowering_target {
                f.velocity_matched = true;
                self.events.push(SimEvent {
                    time: t,
                    kind: EventKind::Cutoff { phase: Phase::Lowering, dv: f.burn_dv },
                });
                f.burn_dv = 0.0;
            }
        }

        // Braking and the descent gates
        if crossed(s.braking_start) {
            f.velocity_matched = false;
        }
        if t >= s.braking_start && !f.descent_achieved {
            let vehicle = &self.bodies[f.body];
            let target = &self.bodies[f.target_ref];
            let altitude = vehicle.altitude_above(target);
            let phi = vehicle.pull_from(f.target_ref).map_or(0.0, |p| p.bearing);
            let rel = vehicle.vel - target.vel;
            if altitude > g.descent_gate_altitude {
                if guidance::closing_rate(&rel, phi) <= g.descent_contact_rate {
                    f.descent_achieved = true;
                    f.velocity_matched = true;
                    self.events.push(SimEvent { time: t, kind: EventKind::DescentAchieved });
                }
            } else {
                f.velocity_matched =
                    guidance::transverse_rate(&rel, phi).abs() < g.descent_min_transverse;
            }
        }

        // Surface contact halts the run
        {
            let vehicle = &self.bodies[f.body];
            let target = &self.bodies[f.target_ref];
            if vehicle.altitude_above(target) <= 0.0 {
                self.halted = true;
                let braking_time = t - s.braking_start;
                f.touchdown = Some(braking_time);
                self.events.push(SimEvent { time: t, kind: EventKind::Touchdown { braking_time } });
            }
        }
    }

    fn sample(&self, f: &FlightState) -> TrackSample {
        let vehicle = &self.bodies[f.body];
        let site = &self.bodies[f.launch_ref];
        let target = &self.bodies[f.target_ref];
        TrackSample {
            time: self.time,
            launch_altitude: vehicle.altitude_above(site),
            launch_rel_speed: (vehicle.vel - site.vel).norm(),
            target_altitude: vehicle.altitude_above(target),
            target_rel_speed: (vehicle.vel - target.vel).norm(),
            mass: vehicle.mass,
            stage: f.propulsion.stage_idx(),
            phase: f.phase,
            thrust_accel: f.thrust_accel,
        }
    }
}

fn index_of(bodies: &[Body], name: &str) -> usize {
    bodies
        .iter()
        .position(|b| b.name == name)
        .unwrap_or_else(|| panic!("body {name} is not part of the system"))
}

fn resolve_attractors(bodies: &[Body], names: &[&str]) -> Vec<GravityPull> {
    names.iter().map(|&n| GravityPull::new(index_of(bodies, n))).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
