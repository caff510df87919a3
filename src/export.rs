//! Plain-text CSV output of trajectories and storyboards.

use std::io::Write;

use crate::storyboard::Storyboard;
use crate::{Result, Trajectory};

pub fn write_trajectory_csv<W: Write>(trajectory: &Trajectory, mut out: W) -> Result<()> {
    let req = trajectory.request();

    // Metadata header
    writeln!(out, "# blochvis magnetization trajectory")?;
    writeln!(out, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "# model: {}", trajectory.model_name())?;
    writeln!(
        out,
        "# start: {:.6},{:.6},{:.6}",
        req.start.x, req.start.y, req.start.z
    )?;
    writeln!(out, "# end: {:.6},{:.6},{:.6}", req.end.x, req.end.y, req.end.z)?;
    writeln!(
        out,
        "# total_duration_s: {}, step_s: {}",
        req.total_duration, req.step_size
    )?;
    writeln!(out, "#")?;

    writeln!(out, "t_s,mx,my,mz")?;
    for s in trajectory.samples() {
        writeln!(out, "{:.6},{:.6},{:.6},{:.6}", s.t, s.mx(), s.my(), s.mz())?;
    }
    Ok(())
}

pub fn write_storyboard_csv<W: Write>(storyboard: &Storyboard, mut out: W) -> Result<()> {
    writeln!(out, "# blochvis storyboard")?;
    writeln!(out, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "# duration_s: {:.3}", storyboard.duration())?;
    writeln!(out, "#")?;

    writeln!(
        out,
        "start_s,run_time_s,stage,status,phi_deg,theta_deg,rf_field,mx,my,mz,readout"
    )?;
    for (start, k) in storyboard.timeline() {
        let s = &k.state;
        let status = s.status.map(|st| st.text()).unwrap_or("");
        let (mx, my, mz) = match s.magnetization {
            Some(m) => (format!("{:.6}", m.x), format!("{:.6}", m.y), format!("{:.6}", m.z)),
            None => Default::default(),
        };
        let readout = s.readout.map(|r| r.to_string()).unwrap_or_default();
        writeln!(
            out,
            "{:.3},{:.3},{:?},{},{:.1},{:.1},{},{},{},{},{}",
            start,
            k.run_time,
            k.stage,
            status,
            s.camera.phi.to_degrees(),
            s.camera.theta.to_degrees(),
            s.rf_field,
            mx,
            my,
            mz,
            readout
        )?;
    }
    Ok(())
}
