use std::io::{self, Write};

use crate::gnc::{ControlOutput, DroneStatus, SweepPhase};

/// Write a replayed tick log in CSV format.
///
/// Columns: tick, status, yaw, throttle, pitch, desired_x, desired_z,
///          inited, center_yaw_deg, side, phase, timer
pub fn write_ticks<W: Write>(writer: &mut W, ticks: &[ControlOutput]) -> io::Result<()> {
    writeln!(
        writer,
        "tick,status,yaw,throttle,pitch,desired_x,desired_z,\
         inited,center_yaw_deg,side,phase,timer"
    )?;

    for (i, t) in ticks.iter().enumerate() {
        let status = match t.status {
            DroneStatus::Hunting => "HUNTING",
            DroneStatus::Searching => "SEARCHING",
        };
        let phase = match t.search.phase {
            SweepPhase::Hold => "hold",
            SweepPhase::Transit => "transit",
        };
        writeln!(
            writer,
            "{},{},{:.5},{:.5},{:.5},{:.5},{:.5},\
             {},{:.2},{},{},{:.3}",
            i,
            status,
            t.command.yaw, t.command.throttle, t.command.pitch,
            t.desired_dir.x, t.desired_dir.y,
            t.search.initialized,
            t.search.center_yaw.to_degrees(),
            t.search.side.sign() as i8,
            phase,
            t.search.timer,
        )?;
    }

    Ok(())
}

/// Write a tick log to a CSV file at the given path.
pub fn write_ticks_file(path: &str, ticks: &[ControlOutput]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_ticks(&mut file, ticks)
}
