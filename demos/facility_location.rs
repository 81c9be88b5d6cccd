use mipform::data;
use mipform::prelude::*;
use mipform::problems::facility_location::CflpInstance;

const SAMPLE: &str = r#"{
    "L": 3,
    "C": 4,
    "OpeningCost": [12, 10, 30],
    "Capacity": [20, 15, 40],
    "Demand": [6, 7, 4, 9],
    "TransportCost": [
        [2, 3, 4, 5],
        [3, 2, 5, 4],
        [1, 1, 1, 1]
    ]
}"#;

fn main() -> Result<(), mipform::Error> {
    env_logger::init();

    let instance: CflpInstance = match std::env::args().nth(1) {
        Some(path) => data::from_json_file(path)?,
        None => data::from_json_str(SAMPLE)?,
    };

    let encoded = instance.encode()?;
    let report = encoded
        .model
        .solve(&MicrolpSolver, &SolveOptions::default());
    print!("{}", mipform::render_to_string(&report));

    if let Some(solution) = encoded.extract(&report) {
        println!("Opened facilities: {:?}", solution.open_facilities);
        for (facility, customer, units) in &solution.shipments {
            println!("Facility {} -> customer {}: {} units", facility, customer, units);
        }
        println!("Total cost: {}", solution.cost);
    }
    Ok(())
}
