use mipform::data;
use mipform::prelude::*;
use mipform::problems::bin_packing::BppInstance;

const SAMPLE: &str = r#"{
    "N": 4,
    "ItemSizes": [6, 5, 4, 2],
    "BinCapacity": 10
}"#;

fn main() -> Result<(), mipform::Error> {
    env_logger::init();

    let instance: BppInstance = match std::env::args().nth(1) {
        Some(path) => data::from_json_file(path)?,
        None => data::from_json_str(SAMPLE)?,
    };

    let encoded = instance.encode()?;
    let report = encoded
        .model
        .solve(&MicrolpSolver, &SolveOptions::default());
    print!("{}", mipform::render_to_string(&report));

    if let Some(solution) = encoded.extract(&report) {
        for (bin, contents) in solution.bins.iter().enumerate() {
            println!("Bin {}: items {:?}", bin, contents);
        }
        println!("Bins used: {}", solution.bins_used);
    }
    Ok(())
}
