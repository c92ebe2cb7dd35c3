//! Basic encoding and decoding in both layouts.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_duplex::{from_bytes, from_str, to_bytes, to_string};
use std::error::Error;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
    active: bool,
    scores: Vec<f64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let user = User {
        id: 123,
        name: "Alice \"Al\" Smith".to_string(),
        active: true,
        scores: vec![9.5, 7.25],
    };

    let text = to_string(&user)?;
    println!("Text:   {}", text);
    let back: User = from_str(&text)?;
    assert_eq!(back, user);

    let bytes = to_bytes(&user)?;
    println!("Binary: {} bytes {:02x?}", bytes.len(), bytes);
    let back: User = from_bytes(&bytes)?;
    assert_eq!(back, user);

    match from_str::<User>("[123;\"Alice\"; x;[]]") {
        Ok(_) => println!("unexpectedly parsed"),
        Err(e) => println!("\nDecoding broken input fails with:\n{}", e),
    }

    Ok(())
}
