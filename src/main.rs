//! Binary entry point: build the engine from command-line flags, then run
//! its UCI command loop until `quit`.

use daydreamer::engine::defs::ErrFatal;
use daydreamer::engine::Engine;

fn main() {
    let mut engine = Engine::new();
    if engine.run().is_err() {
        eprintln!("{}", ErrFatal::NEW_GAME);
        std::process::exit(1);
    }
}
