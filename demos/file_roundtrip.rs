//! Writing a nested value to a file and reading it back.
//!
//! Run with: cargo run --example file_roundtrip

use serde_duplex::{CodecOptions, Decoder, Encoder, FileTarget};
use std::error::Error;

type Grid = Vec<Vec<Vec<i32>>>;

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join("serde_duplex_demo.txt");
    let grid: Grid = vec![
        vec![(1..=10).collect(), vec![69, 69, 69], vec![-100]],
        vec![(1..=10).collect(), vec![12, 12, 12]],
    ];

    {
        let mut target = FileTarget::create(&path)?;
        Encoder::new(&mut target, CodecOptions::text()).write(&grid)?;
    }
    println!("Wrote {}:\n{}\n", path.display(), std::fs::read_to_string(&path)?);

    let mut target = FileTarget::open(&path)?;
    let mut decoder = Decoder::new(&mut target, CodecOptions::text());
    let back: Grid = decoder.read()?;
    decoder.end()?;
    println!("Read back: {:?}", back);
    assert_eq!(back, grid);

    std::fs::remove_file(&path)?;
    Ok(())
}
