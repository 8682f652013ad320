use iconsynth::read_icns;
use std::env;
use std::fs::File;
use std::io::BufReader;

fn main() {
    env_logger::init();
    if env::args().count() != 2 {
        println!("Usage: readicns <path>");
        return;
    }
    let path = env::args().nth(1).unwrap();
    let file = File::open(path).expect("failed to open file");
    let buffered = BufReader::new(file);
    let chunks = read_icns(buffered).expect("failed to read ICNS file");
    println!("ICNS file contains {} chunk(s).", chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        let size = chunk.ostype
            .icns_size()
            .map_or_else(|| "?".to_string(), |size| format!("{}px", size));
        println!("Chunk {}: {} {} ({} byte payload)",
                 index,
                 chunk.ostype,
                 size,
                 chunk.data.len());
    }
}
