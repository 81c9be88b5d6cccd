use mipform::data;
use mipform::prelude::*;
use mipform::problems::cutting_stock::CuttingStockInstance;

const SAMPLE: &str = r#"{
    "P": 4,
    "T": 3,
    "Pattern": [
        [2, 0, 1, 0],
        [0, 2, 1, 1],
        [0, 0, 0, 2]
    ],
    "Demand": [4, 3, 2],
    "MaterialUsedForPattern": [1, 1, 1, 1]
}"#;

fn main() -> Result<(), mipform::Error> {
    env_logger::init();

    let instance: CuttingStockInstance = match std::env::args().nth(1) {
        Some(path) => data::from_json_file(path)?,
        None => data::from_json_str(SAMPLE)?,
    };

    let encoded = instance.encode()?;
    let report = encoded
        .model
        .solve(&MicrolpSolver, &SolveOptions::default());
    print!("{}", mipform::render_to_string(&report));

    if let Some(solution) = encoded.extract(&report) {
        for (pattern, &count) in solution.usage.iter().enumerate() {
            if count > 0 {
                println!("Pattern {} used {} times", pattern, count);
            }
        }
        println!("Material consumed: {}", solution.material);
    }
    Ok(())
}
