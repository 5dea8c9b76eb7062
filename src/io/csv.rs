use std::io::{self, Write};

use crate::sim::state::TrackSample;

/// Write the recorded vehicle track as CSV.
///
/// Columns: time, launch_alt, launch_speed, target_alt, target_speed,
///          mass, stage, phase, thrust_accel
pub fn write_track<W: Write>(writer: &mut W, track: &[TrackSample]) -> io::Result<()> {
    writeln!(
        writer,
        "time,launch_alt,launch_speed,target_alt,target_speed,mass,stage,phase,thrust_accel"
    )?;

    for s in track {
        writeln!(
            writer,
            "{:.2},{:.1},{:.3},{:.1},{:.3},{:.2},{},{},{:.5}",
            s.time,
            s.launch_altitude,
            s.launch_rel_speed,
            s.target_altitude,
            s.target_rel_speed,
            s.mass,
            s.stage,
            s.phase,
            s.thrust_accel,
        )?;
    }

    Ok(())
}

/// Write the track to a CSV file at the given path.
pub fn write_track_file(path: &str, track: &[TrackSample]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_track(&mut file, track)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidance::Phase;

    #[test]
    fn csv_output_has_header_and_rows() {
        let track = vec![
            TrackSample {
                time: 10.0,
                launch_altitude: 1_200.0,
                launch_rel_speed: 310.5,
                target_altitude: 3.8e8,
                target_rel_speed: 900.0,
                mass: 250_000.0,
                stage: 0,
                phase: Phase::Ascent,
                thrust_accel: 12.5,
            },
            TrackSample {
                time: 20.0,
                launch_altitude: 5_000.0,
                launch_rel_speed: 600.0,
                target_altitude: 3.8e8,
                target_rel_speed: 905.0,
                mass: 237_000.0,
                stage: 0,
                phase: Phase::Ascent,
                thrust_accel: 14.0,
            },
        ];

        let mut buf = Vec::new();
        write_track(&mut buf, &track).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("time,"));
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert!(lines[1].starts_with("10.00,"));
        assert!(lines[1].contains("ascent"));
    }
}
