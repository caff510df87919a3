use blochvis::{ModelKind, PhysicsParameters};

fn main() {
    let physics = PhysicsParameters {
        equilibrium_transverse_scale: 0.2,
        ..Default::default()
    };
    let trajectory = blochvis::relaxation(&physics, 0.3, 0.05, ModelKind::Linear).unwrap();

    println!(
        "Larmor frequency: {:.3e} rad/s, {} samples",
        physics.larmor_frequency(),
        trajectory.request().len()
    );
    for sample in trajectory.samples() {
        let factors = physics.relaxation_at(sample.t);
        println!(
            "{sample}   [exp(-t/T2) = {:.3}, 1 - exp(-t/T1) = {:.3}]",
            factors.transverse_decay, factors.longitudinal_recovery
        );
    }
}
