use mipform::data;
use mipform::prelude::*;
use mipform::problems::tsp::TspInstance;

const SAMPLE: &str = r#"{
    "N": 5,
    "Distance": [
        [0, 2, 9, 10, 7],
        [2, 0, 6, 4, 3],
        [9, 6, 0, 8, 5],
        [10, 4, 8, 0, 6],
        [7, 3, 5, 6, 0]
    ]
}"#;

fn main() -> Result<(), mipform::Error> {
    env_logger::init();

    let instance: TspInstance = match std::env::args().nth(1) {
        Some(path) => data::from_json_file(path)?,
        None => data::from_json_str(SAMPLE)?,
    };

    let encoded = instance.encode()?;
    let report = encoded
        .model
        .solve(&MicrolpSolver, &SolveOptions::default());
    print!("{}", mipform::render_to_string(&report));

    if let Some(solution) = encoded.extract(&report) {
        println!("Tour arcs: {:?}", solution.arcs);
        println!("Tour length: {}", solution.length);
    }
    Ok(())
}
