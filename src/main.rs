use translunar_sim::config::presets;
use translunar_sim::io::{csv, MissionSummary};
use translunar_sim::sim::runner::Simulation;
use translunar_sim::vehicle::stack_delta_v;

/// Give up if the vehicle is still flying after this much mission time, s.
const MAX_MISSION_TIME: f64 = 420_000.0;

fn main() {
    let config = presets::translunar();
    let mut sim = Simulation::new(config);

    // -----------------------------------------------------------------------
    // Vehicle report
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  TRANS-LUNAR MISSION SIMULATION");
    println!("====================================================================");
    println!();
    println!("  Stage Stack");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:<10} {:>10} {:>10} {:>10} {:>9} {:>10}",
        "stage", "dry (kg)", "wet (kg)", "vac (kN)", "burn (s)", "dv (m/s)"
    );
    {
        let stages = sim.flight.as_ref().expect("preset carries a vehicle").propulsion.stages();
        for (i, s) in stages.iter().enumerate() {
            let payload: f64 = stages[i + 1..].iter().map(|u| u.total_mass).sum();
            println!(
                "  {:<10} {:>10.0} {:>10.0} {:>10.1} {:>9.0} {:>10.0}",
                s.name,
                s.dry_mass,
                s.total_mass,
                s.thrust_vac,
                s.burn_time(),
                s.delta_v(payload),
            );
        }
        println!();
        println!("  Stack ideal delta-v: {:.0} m/s", stack_delta_v(stages));
    }
    println!();

    // -----------------------------------------------------------------------
    // Run the mission
    // -----------------------------------------------------------------------
    while !sim.halted() && sim.time < MAX_MISSION_TIME {
        sim.advance(200_000);
    }

    println!("  Mission Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for e in &sim.events {
        println!("  {e}");
    }
    println!();

    // -----------------------------------------------------------------------
    // Sampled track
    // -----------------------------------------------------------------------
    println!("  Vehicle Track");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>9}  {:>11}  {:>9}  {:>11}  {:>9}  {:>9}  {:>9}",
        "t (s)", "earth (km)", "v_e (m/s)", "moon (km)", "v_m (m/s)", "mass (kg)", "phase"
    );
    let stride = (sim.track.len() / 30).max(1);
    for (i, s) in sim.track.iter().enumerate() {
        if i % stride != 0 && i != sim.track.len() - 1 {
            continue;
        }
        println!(
            "  {:>9.0}  {:>11.1}  {:>9.1}  {:>11.1}  {:>9.1}  {:>9.0}  {:>9}",
            s.time,
            s.launch_altitude / 1_000.0,
            s.launch_rel_speed,
            s.target_altitude / 1_000.0,
            s.target_rel_speed,
            s.mass,
            s.phase,
        );
    }
    println!();

    // -----------------------------------------------------------------------
    // Summary
    // -----------------------------------------------------------------------
    let snapshot = sim.snapshot();
    let summary = MissionSummary::from_run(&sim.events, &sim.track, &snapshot);

    println!("  Mission Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    if let Some(t) = summary.parking_orbit_time {
        println!("  Parking orbit:    t = {:.0} s", t);
    }
    if let Some(dv) = summary.injection_dv {
        println!("  Injection dv:     {:.1} m/s", dv);
    }
    if let Some(dv) = summary.capture_dv {
        println!("  Capture dv:       {:.1} m/s", dv);
    }
    if let Some(t) = summary.capture_orbit_time {
        println!("  Capture orbit:    t = {:.0} s ({:.2} d)", t, t / 86_400.0);
    }
    if let Some(dv) = summary.lowering_dv {
        println!("  Lowering dv:      {:.1} m/s", dv);
    }
    if let Some(t) = summary.descent_time {
        println!("  Descent achieved: t = {:.0} s", t);
    }
    match summary.braking_time {
        Some(bt) => println!("  Touchdown:        {:.1} s after braking start", bt),
        None => println!("  No touchdown before t = {:.0} s", sim.time),
    }
    println!("  Stagings:         {}", summary.stagings);
    if let Some(m) = summary.final_mass {
        println!("  Final mass:       {:.0} kg", m);
    }
    println!(
        "  Elapsed:          {:.0} s ({:.2} d), dt = {} s",
        summary.elapsed,
        summary.elapsed / 86_400.0,
        sim.dt()
    );
    println!("====================================================================");
    println!();

    // Optional CSV export of the recorded track
    if let Some(path) = std::env::args().nth(1) {
        csv::write_track_file(&path, &sim.track).expect("failed to write track CSV");
        println!("  track written to {path}");
    }
}
