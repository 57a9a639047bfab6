//! Example: resolving lazy references explicitly
//!
//! Records decoded from JSON refer to each other by ID. Nothing is fetched
//! until `load()` is called with a loader, and a loaded reference is never
//! fetched again.
//!
//! Run with:
//! ```bash
//! cargo run -p paperswithcode-core --example resource_example
//! ```

use paperswithcode_core::prelude::*;
use serde::Deserialize;
use std::cell::Cell;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
struct Dataset {
    id: String,
    name: String,
}

impl Identified for Dataset {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Deserialize)]
struct Leaderboard {
    id: String,
    dataset: LazyResource<Dataset>,
}

/// In-memory catalog counting how often it is asked.
struct Catalog {
    datasets: HashMap<String, Dataset>,
    lookups: Cell<u32>,
}

#[derive(Debug)]
struct Missing(String);

impl std::fmt::Display for Missing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no dataset with id {:?}", self.0)
    }
}

impl std::error::Error for Missing {}

impl Loader<Dataset> for Catalog {
    type Error = Missing;

    fn load(&self, id: &str) -> Result<Dataset, Missing> {
        self.lookups.set(self.lookups.get() + 1);
        self.datasets
            .get(id)
            .cloned()
            .ok_or_else(|| Missing(id.to_string()))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog {
        datasets: HashMap::from([(
            "imagenet".to_string(),
            Dataset {
                id: "imagenet".to_string(),
                name: "ImageNet".to_string(),
            },
        )]),
        lookups: Cell::new(0),
    };

    let json = r#"[
        {"id": "image-classification-on-imagenet", "dataset": "imagenet"},
        {"id": "few-shot-on-imagenet", "dataset": {"id": "imagenet", "name": "ImageNet"}},
        {"id": "broken", "dataset": "does-not-exist"}
    ]"#;
    let mut boards: Vec<Leaderboard> = serde_json::from_str(json)?;

    for board in &mut boards {
        let before = board.dataset.is_loaded();
        let dataset_id = board.dataset.id().to_string();
        match board.dataset.load(&catalog) {
            Ok(dataset) => println!(
                "{:<35} dataset={:<10} (was loaded: {before})",
                board.id, dataset.name
            ),
            Err(e) => println!("{:<35} {e}; still a stub for {dataset_id}", board.id),
        }
    }

    // The second board arrived loaded and the third failed: two lookups in total
    println!("catalog lookups: {}", catalog.lookups.get());
    Ok(())
}
