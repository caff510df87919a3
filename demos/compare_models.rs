use blochvis::config::load_config;
use blochvis::ModelKind;

fn main() {
    let mut config =
        load_config(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/bloch.toml")).unwrap();

    config.model = ModelKind::Linear;
    let linear = config.trajectory().unwrap().sample_vec();
    config.model = ModelKind::Exponential;
    let exponential = config.trajectory().unwrap().sample_vec();

    println!("     t |  linear My  Mz | exponential My  Mz");
    for i in 0..linear.len() {
        println!(
            "{:6.2} | {:10.3} {:4.3} | {:15.3} {:4.3}",
            linear.t[i], linear.my[i], linear.mz[i], exponential.my[i], exponential.mz[i]
        );
    }
}
