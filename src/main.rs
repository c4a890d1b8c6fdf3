use log::error;
use recipe_resolver::{resolve_recipe, ResolveRequest};
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let description_path = args
        .get(1)
        .ok_or("Usage: recipe-resolver <description-file> [transcript-file]")?;

    let description = fs::read_to_string(description_path)?;
    let transcript = match args.get(2) {
        Some(path) => fs::read_to_string(path)?,
        None => String::new(),
    };

    let request = ResolveRequest {
        title: env::var("VIDEO_TITLE").unwrap_or_default(),
        channel: env::var("VIDEO_CHANNEL").unwrap_or_default(),
        description,
        transcript,
    };

    match resolve_recipe(&request).await {
        Ok(recipe) => {
            println!("{}", serde_json::to_string_pretty(&recipe)?);
            Ok(())
        }
        Err(e) => {
            error!("Resolution failed: {}", e);
            Err(e.into())
        }
    }
}
