//! Startup banner, in the spirit of the teacher's `engine::about`.

use super::Engine;
use crate::defs::ABOUT;
use crate::engine::defs::Settings;

#[cfg(debug_assertions)]
const NOTICE_DEBUG_MODE: &str = "Notice: running in debug mode";

impl Engine {
    pub fn print_ascii_logo(&self) {
        println!();
        println!(" _____                 _                                 ");
        println!("|  __ \\               | |                                ");
        println!("| |  | |__ _ _   _  __| |_ __ ___  __ _ _ __ ___   ___ _ __");
        println!("| |  | / _` | | | |/ _` | '__/ _ \\/ _` | '_ ` _ \\ / _ \\ '__|");
        println!("| |__| (_| | |_| | (_| | | |  __/ (_| | | | | | |  __/ |   ");
        println!("|_____/\\__,_|\\__, |\\__,_|_|  \\___|\\__,_|_| |_| |_|\\___|_|   ");
        println!("              __/ |                                       ");
        println!("             |___/                                        ");
        println!();
    }

    pub fn print_about(&self, s: &Settings) {
        let bits = std::mem::size_of::<usize>() * 8;
        let hash = if s.tt_size_mb == 0 {
            String::from("off")
        } else {
            format!("{} MB", s.tt_size_mb)
        };

        println!("{:<10} {} {}", "Engine:", ABOUT.engine, ABOUT.version);
        println!("{:<10} {}", "Author:", ABOUT.author);
        println!("{:<10} {bits}-bit", "Type:");
        println!("{:<10} {hash}", "Hash:");

        #[cfg(debug_assertions)]
        println!("{NOTICE_DEBUG_MODE}");
    }

    pub fn print_help(&self) {
        println!("Daydreamer supports the UCI protocol. Commands beyond UCI proper:");
        println!("  board    print the current position as FEN");
        println!("  history  print the position's Zobrist key history");
        println!("  eval     print the static evaluation of the current position");
        println!("  help     print this message");
    }
}
