//! Pretty-printed text and how it relates to compact text.
//!
//! Run with: cargo run --example pretty_text

use serde_duplex::{from_str, to_bytes_with_options, to_string, to_string_pretty, CodecOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let matrix = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![]];

    let compact = to_string(&matrix)?;
    let pretty = to_string_pretty(&matrix)?;
    println!("Compact:\n{}\n", compact);
    println!("Pretty:\n{}\n", pretty);

    let a: Vec<Vec<f64>> = from_str(&compact)?;
    let b: Vec<Vec<f64>> = from_str(&pretty)?;
    assert_eq!(a, b);
    println!("Both decode to {:?}", a);

    // Pretty output is plain text mode with the flag set.
    let options = CodecOptions::text().with_pretty(true);
    assert_eq!(to_bytes_with_options(&matrix, &options)?, pretty.as_bytes());

    Ok(())
}
