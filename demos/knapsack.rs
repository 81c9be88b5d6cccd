use mipform::data;
use mipform::prelude::*;
use mipform::problems::knapsack::KnapsackInstance;

const SAMPLE: &str = r#"{
    "N": 4,
    "Weights": [2, 3, 4, 5],
    "Values": [3, 4, 5, 6],
    "MaxCapacity": 6
}"#;

fn main() -> Result<(), mipform::Error> {
    env_logger::init();

    let instance: KnapsackInstance = match std::env::args().nth(1) {
        Some(path) => data::from_json_file(path)?,
        None => data::from_json_str(SAMPLE)?,
    };

    let encoded = instance.encode()?;
    let report = encoded
        .model
        .solve(&MicrolpSolver, &SolveOptions::default());
    print!("{}", mipform::render_to_string(&report));

    if let Some(solution) = encoded.extract(&report) {
        println!("Selected items: {:?}", solution.items);
        println!("Total value: {}", solution.value);
    }
    Ok(())
}
