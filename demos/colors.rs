//! Walking repeated XML elements.
//!
//! Run with: cargo run --example colors

use slurpers::{SlurpOptions, Slurper, XmlSlurper};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let xml = "<root>\
        <color><name>red</name><rgb>FF0000</rgb></color>\
        <color><name>green</name><rgb>00FF00</rgb></color>\
    </root>";

    let doc = XmlSlurper::from_str(xml, &SlurpOptions::default())?;

    for color in doc.get("color")?.iter()? {
        println!("name: {}, rgb: {}", color.get("name")?, color.get("rgb")?);
    }

    Ok(())
}
