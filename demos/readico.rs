use iconsynth::read_ico_directory;
use std::env;
use std::fs;

fn main() {
    env_logger::init();
    if env::args().count() != 2 {
        println!("Usage: readico <path>");
        return;
    }
    let path = env::args().nth(1).unwrap();
    let file = fs::read(path).expect("failed to read file");
    let directory = read_ico_directory(&file).expect("failed to read ICO file");
    println!("ICO file contains {} entr{}.",
             directory.len(),
             if directory.len() == 1 { "y" } else { "ies" });
    for (index, entry) in directory.iter().enumerate() {
        println!("Entry {}: {}x{} {}-bit {} ({} bytes at offset {})",
                 index,
                 entry.width,
                 entry.height,
                 entry.bit_depth,
                 if entry.is_png(&file) { "PNG" } else { "DIB" },
                 entry.size,
                 entry.offset);
    }
}
