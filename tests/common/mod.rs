#![allow(dead_code)]

use autocat::Category;

pub fn retail_categories() -> Vec<Category> {
    vec![
        Category::new("dining", "Dining").with_keywords(["starbucks", "costa coffee", "pret"]),
        Category::new("groceries", "Groceries").with_keywords(["tesco", "asda", "sainsburys"]),
        Category::new("fuel", "Fuel").with_keywords(["shell", "esso", "bp"]),
        Category::new("transport", "Transport").with_keywords(["uber", "tfl", "trainline"]),
        Category::new("retired", "Retired")
            .with_keywords(["blockbuster"])
            .with_active(false),
        Category::new("car", "Car Maintenance")
            .with_keywords(["kwik fit", "halfords"])
            .owned_by("user-7"),
    ]
}

pub fn merchant_feed(count: usize) -> Vec<String> {
    let stems = [
        "STARBUCKS",
        "TESCO STORES",
        "Shell Garage",
        "uber *trip",
        "SAINSBURYS S/MKTS",
        "costa coffee",
        "Amazon Marketplace",
        "TFL TRAVEL CH",
    ];
    (0..count)
        .map(|i| format!("{} {}", stems[i % stems.len()], 1000 + i))
        .collect()
}
