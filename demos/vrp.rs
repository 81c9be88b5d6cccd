use mipform::data;
use mipform::prelude::*;
use mipform::problems::vrp::VrpInstance;

const SAMPLE: &str = r#"{
    "C": 4,
    "V": 2,
    "CityDemand": [0, 4, 3, 5],
    "VehicleCapacity": 8,
    "CityDistances": [
        [0, 3, 5, 4],
        [3, 0, 4, 5],
        [5, 4, 0, 3],
        [4, 5, 3, 0]
    ]
}"#;

fn main() -> Result<(), mipform::Error> {
    env_logger::init();

    let instance: VrpInstance = match std::env::args().nth(1) {
        Some(path) => data::from_json_file(path)?,
        None => data::from_json_str(SAMPLE)?,
    };

    let encoded = instance.encode()?;
    let report = encoded
        .model
        .solve(&MicrolpSolver, &SolveOptions::default());
    print!("{}", mipform::render_to_string(&report));

    if let Some(solution) = encoded.extract(&report) {
        for (vehicle, route) in solution.routes.iter().enumerate() {
            println!("Vehicle {}: {:?}", vehicle, route);
        }
        println!("Total cost: {}", solution.total_cost);
    }
    Ok(())
}
