use std::process;

fn main() {
    if let Err(err) = layerscene::run() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
