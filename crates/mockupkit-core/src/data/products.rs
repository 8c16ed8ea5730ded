//! Built-in product library.

use super::{PreviewDefinition, PrintDimensions, Product, Side};
use std::collections::BTreeMap;

fn side(key: &str, label: &str, dims: PrintDimensions) -> Side {
    Side {
        key: key.to_string(),
        label: label.to_string(),
        print_dimensions: dims,
    }
}

fn mockups(folder: &str, keys: &[&str]) -> BTreeMap<String, String> {
    keys.iter()
        .map(|k| (k.to_string(), format!("/mockups/{}/{}.png", folder, k)))
        .collect()
}

fn previews(folder: &str, entries: &[(&str, &str)]) -> BTreeMap<String, PreviewDefinition> {
    entries
        .iter()
        .map(|(key, file)| {
            (
                key.to_string(),
                PreviewDefinition::new(*file, format!("/previews/{}/{}.png", folder, file)),
            )
        })
        .collect()
}

fn sleeves() -> [Side; 2] {
    [
        side("sleeveLeft", "Sleeve left", PrintDimensions::new(80.0, 350.0)),
        side("sleeveRight", "Sleeve right", PrintDimensions::new(80.0, 350.0)),
    ]
}

/// Hooded sweatshirt with front, back, sleeves and inner neck label
pub fn hoodie() -> Product {
    let [left, right] = sleeves();
    Product {
        id: "hoodie-heavy-blend".to_string(),
        name: "Unisex Heavy Blend Hooded Sweatshirt".to_string(),
        sides: vec![
            side(
                "front",
                "Front side",
                PrintDimensions::new(150.0, 120.0).with_offset(0.0, -40.0),
            ),
            side("back", "Back side", PrintDimensions::new(160.0, 180.0)),
            left,
            right,
            side(
                "neck",
                "Neck label inner",
                PrintDimensions::new(100.0, 90.0).with_offset(0.0, -20.0),
            ),
        ],
        mockups: mockups(
            "hoodies",
            &["front", "back", "sleeveLeft", "sleeveRight", "neck"],
        ),
        preview_mockups: previews(
            "hoodie",
            &[
                ("front", "Front"),
                ("back", "Back"),
                ("folded", "Folded"),
                ("person1", "Person1"),
                ("person2", "Person2"),
                ("person3", "Person3"),
            ],
        ),
    }
}

/// Crewneck sweatshirt
pub fn crewneck() -> Product {
    let [left, right] = sleeves();
    Product {
        id: "crewneck-heavy-blend".to_string(),
        name: "Unisex Heavy Blend Crewneck Sweatshirt".to_string(),
        sides: vec![
            side(
                "front",
                "Front side",
                PrintDimensions::new(200.0, 260.0).with_offset(0.0, 15.0),
            ),
            side(
                "back",
                "Back side",
                PrintDimensions::new(200.0, 260.0).with_offset(0.0, 10.0),
            ),
            left,
            right,
            side(
                "neck",
                "Neck label inner",
                PrintDimensions::new(100.0, 90.0).with_offset(0.0, -170.0),
            ),
        ],
        mockups: mockups(
            "crewneck",
            &["front", "back", "sleeveLeft", "sleeveRight", "neck"],
        ),
        preview_mockups: previews(
            "crewneck",
            &[
                ("front", "Front"),
                ("back", "Back"),
                ("folded", "Folded"),
                ("person1", "Person1"),
                ("person2", "Person2"),
            ],
        ),
    }
}

/// Garment-dyed t-shirt
pub fn tshirt() -> Product {
    Product {
        id: "garment-dyed-tshirt".to_string(),
        name: "Unisex Garment-Dyed T-shirt".to_string(),
        sides: vec![
            side("front", "Front side", PrintDimensions::new(200.0, 250.0)),
            side(
                "back",
                "Back side",
                PrintDimensions::new(200.0, 250.0).with_offset(0.0, -10.0),
            ),
        ],
        mockups: mockups("t-shirt", &["front", "back"]),
        preview_mockups: previews(
            "t-shirt",
            &[
                ("front", "Front"),
                ("back", "Back"),
                ("folded", "Folded"),
                ("person1Front", "Person1Front"),
                ("person1Back", "Person1Back"),
                ("person2", "Person2"),
                ("person3Front", "Person3Front"),
                ("person3Back", "Person3Back"),
            ],
        ),
    }
}

/// Ceramic mug with a single wrap-around print area
pub fn mug() -> Product {
    let mut preview_mockups = BTreeMap::new();
    preview_mockups.insert(
        "mug".to_string(),
        PreviewDefinition::new("Mug", "/mockups/mug/mug.png").with_side("mug"),
    );
    Product {
        id: "ceramic-mug".to_string(),
        name: "Ceramic Mug (11oz, 15oz)".to_string(),
        sides: vec![side("mug", "", PrintDimensions::new(1160.0, 480.0))],
        mockups: mockups("mug", &["mug"]),
        preview_mockups,
    }
}

/// All built-in products in display order
pub fn builtin_products() -> Vec<Product> {
    vec![hoodie(), crewneck(), tshirt(), mug()]
}
