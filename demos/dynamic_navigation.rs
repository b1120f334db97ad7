//! Navigating documents whose shape is only known at runtime.
//!
//! Run with: cargo run --example dynamic_navigation

use serde_json::json;
use slurpers::{ConfigSlurper, JsonSlurper, SlurpOptions, Slurper, View};
use std::error::Error;

fn describe(name: &str, view: View<'_>, indent: usize) {
    let pad = " ".repeat(indent);
    match view.as_scalar() {
        Some(scalar) => println!("{}{}: {}", pad, name, scalar),
        None => {
            println!("{}{} ({}):", pad, name, view.kind());
            walk(view, indent + 2);
        }
    }
}

fn walk(view: View<'_>, indent: usize) {
    if let Ok(entries) = view.entries() {
        for (key, child) in entries {
            describe(key, child, indent);
        }
    } else if let Ok(items) = view.iter() {
        for (index, item) in items.enumerate() {
            describe(&index.to_string(), item, indent);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // A decoded JSON value, keys remapped by a function
    let value = json!({
        "host-name": "localhost",
        "port": 8080,
        "features": ["auth", "logging"],
        "limits": {"max-conn": 100, "debug": true}
    });
    let options = SlurpOptions::new().with_name_function(|key| key.replace('-', "_").to_uppercase());
    let doc = JsonSlurper::from_value(&value, &options)?;

    println!("JSON as canonical tree: {}\n", doc);
    println!("Port: {}", doc.get("PORT")?.as_i64().unwrap_or_default());
    println!("First feature: {}\n", doc.get("FEATURES")?.at(0)?);
    walk(doc.view(), 0);

    // The same walk over a config file
    let ini = "[DEFAULT]\nretries = 3\n\n[upstream api]\nurl = https://api.example.org\n";
    let doc = ConfigSlurper::from_str(ini, &SlurpOptions::default())?;
    println!();
    walk(doc.view(), 0);

    // Missing keys are errors, not panics
    if let Err(e) = doc.get("upstream_api")?.get("token") {
        println!("\nLookup failed: {}", e);
    }

    Ok(())
}
