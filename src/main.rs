use std::f64::consts::PI;

use slam_sim::math::Point2d;
use slam_sim::{clusterize, Action, ClosestPointFitter, Pose, ShapeFitter, Simulation, World, WorldItem};

fn main() -> slam_sim::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let world = World::with_items(
        100.0,
        100.0,
        [
            WorldItem::segment(Point2d::new(0.0, 0.0), Point2d::new(0.0, 100.0)),
            WorldItem::segment(Point2d::new(0.0, 100.0), Point2d::new(100.0, 100.0)),
            WorldItem::segment(Point2d::new(100.0, 100.0), Point2d::new(100.0, 0.0)),
            WorldItem::segment(Point2d::new(100.0, 0.0), Point2d::new(0.0, 0.0)),
            WorldItem::circle(Point2d::new(50.0, 50.0), 10.0),
        ],
    )?;

    let mut sim = Simulation::new(world);
    let robot_id = sim.add_robot(Pose::new(Point2d::new(12.0, 12.0), 0.0), &Default::default())?;

    let actions = [
        Action::turn_by(Some(1.5), PI / 3.0),
        Action::Sense,
        Action::move_by(Some(10.0), 10.0),
        Action::Sense,
        Action::turn_by(Some(1.5), PI / 6.0),
        Action::move_by(Some(10.0), 30.0),
        Action::Sense,
        Action::move_by(Some(10.0), 30.0),
        Action::Sense,
    ];
    let elapsed = sim.apply_actions(robot_id, &actions)?;
    println!("Simulated {:.2}s in {} actions", elapsed, sim.frame());

    let fitter = ClosestPointFitter { radius: 10.0 };
    let Some(robot) = sim.get_robot(robot_id) else {
        return Ok(());
    };
    for snapshot in robot.perception_history() {
        let pose = snapshot.pose();
        println!(
            "t={:.2}s at ({:.1}, {:.1}): {}/{} hits",
            snapshot.timestamp(),
            pose.position.x,
            pose.position.y,
            snapshot.hit_count(),
            snapshot.len()
        );
        let clusters = clusterize(snapshot, &Default::default());
        for (idx, cluster) in clusters.iter().enumerate() {
            if let Some(centroid) = cluster.centroid() {
                println!(
                    "  cluster {}: {} points around ({:.1}, {:.1})",
                    idx,
                    cluster.len(),
                    centroid.x,
                    centroid.y
                );
            }
        }
        for beacon in fitter.fit_all(&clusters) {
            println!(
                "  beacon candidate from cluster {}: ({:.1}, {:.1})",
                beacon.index, beacon.centre.x, beacon.centre.y
            );
        }
    }

    Ok(())
}
