use std::error::Error;

use autocat::{load_categorizer, visible_candidates, Categorizer, Category, CategoryMatch};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const SAMPLE_MERCHANTS: &[&str] = &[
    "STARBUCKS",
    "TESCO STORES 1234",
    "Shell Garage M4",
    "uber *trip-4411",
    "Kwik Fit Autocentre",
];

#[derive(Serialize)]
struct Outcome<'a> {
    merchant: &'a str,
    #[serde(rename = "match")]
    best: Option<&'a CategoryMatch>,
}

fn sample_categories() -> Vec<Category> {
    vec![
        Category::new("dining", "Dining").with_keywords(["starbucks", "costa coffee", "pret"]),
        Category::new("groceries", "Groceries").with_keywords(["tesco", "asda", "sainsburys"]),
        Category::new("fuel", "Fuel").with_keywords(["shell", "esso", "bp"]),
        Category::new("transport", "Transport").with_keywords(["uber", "tfl", "trainline"]),
        Category::new("retired", "Retired").with_active(false),
        Category::new("car", "Car Maintenance")
            .with_keywords(["kwik fit", "halfords"])
            .owned_by("demo-user"),
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let mut config_path = None;
    let mut user_id = String::from("demo-user");
    let mut merchants = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_path = Some(args.next().ok_or("--config needs a path")?),
            "--user" => user_id = args.next().ok_or("--user needs an id")?,
            _ => merchants.push(arg),
        }
    }
    if merchants.is_empty() {
        merchants = SAMPLE_MERCHANTS.iter().map(|m| m.to_string()).collect();
    }

    let categorizer = match config_path {
        Some(path) => load_categorizer(path)?,
        None => Categorizer::ensemble(),
    };

    let all = sample_categories();
    let candidates: Vec<Category> = visible_candidates(&all, &user_id)
        .into_iter()
        .cloned()
        .collect();

    let results = categorizer.categorize_batch(&merchants, &candidates);
    let outcomes: Vec<Outcome<'_>> = merchants
        .iter()
        .map(|merchant| Outcome {
            merchant,
            best: results.get(merchant).and_then(Option::as_ref),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&outcomes)?);
    Ok(())
}
