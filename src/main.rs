use anyhow::Context;
use cgmath::EuclideanSpace;
use thrust_sim::{Mesh, ThrustBody, ThrustBodyConfig};

const TICK_RATE: u32 = 60;
const DEFAULT_FRAMES: u32 = 600;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => ThrustBodyConfig::from_json_file(&path)
            .with_context(|| format!("loading config from {path}"))?,
        None => ThrustBodyConfig::default(),
    };
    let frames = match args.next() {
        Some(frames) => frames
            .parse()
            .with_context(|| format!("invalid frame count {frames:?}"))?,
        None => DEFAULT_FRAMES,
    };

    // The attachment point is authored against the hull model, so anchor it on the hull centroid.
    let hull = Mesh::cuboid(config.length, config.height, config.width);
    let center_of_mass = hull.centroid().context("computing hull centroid")?;
    log::info!("hull center of mass: {:?}", center_of_mass);

    let mut ship = ThrustBody::new(config.with_center_of_mass(center_of_mass));
    let state = ship.state();
    log::info!(
        "accel {:?}, angular accel {:?}, torque {:?}",
        state.acceleration,
        state.angular_acceleration,
        state.torque
    );

    let dt = 1.0 / TICK_RATE as f32;
    for frame in 1..=frames {
        ship.tick(dt);

        if frame % TICK_RATE == 0 {
            let pose = ship.pose();
            log::info!(
                "t={:>5.1}s thrust {:.2} position {:?} angles {:?}",
                frame as f32 * dt,
                ship.thrust_factor(),
                pose.position.to_vec(),
                pose.angles
            );
        }
    }

    let pose = ship.pose();
    println!("final position: {:?}", pose.position);
    println!("final orientation: {:?}", pose.orientation);
    Ok(())
}
