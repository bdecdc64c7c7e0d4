use std::env;

use recipe_clipper::{import_recipe, DegradedReason, ImportOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let url = args.get(1).ok_or("Please provide a recipe URL as an argument")?;

    let imported = import_recipe(url).await?;
    println!("{}", serde_json::to_string_pretty(&imported.recipe)?);

    match imported.outcome {
        ImportOutcome::Full => {
            eprintln!("Recipe extracted successfully. Review the ingredients and instructions before saving.");
        }
        ImportOutcome::Partial {
            reason: DegradedReason::QuotaExceeded,
        } => {
            eprintln!(
                "Recipe saved with basic information only. Ingredients and instructions \
                 could not be extracted due to temporary service limitations."
            );
        }
        ImportOutcome::Partial { .. } => {
            eprintln!(
                "Recipe partially extracted. Could not extract ingredients and \
                 instructions; you may need to add them manually."
            );
        }
    }

    Ok(())
}
