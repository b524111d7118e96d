//! Command-line argument handling, mirroring the teacher's `misc::cmdline`.

use clap::{value_parser, Arg, ArgAction, Command};

struct CmdLineArgs {}

impl CmdLineArgs {
    const FEN_LONG: &'static str = "fen";
    const FEN_SHORT: &'static str = "f";
    const FEN_HELP: &'static str = "Set up the given position instead of the start position";

    const PERFT_LONG: &'static str = "perft";
    const PERFT_HELP: &'static str = "Run perft to the given depth and exit";

    const COMM_LONG: &'static str = "comm";
    const COMM_HELP: &'static str = "Select the communication protocol to use";
    const COMM_VALUES: [&'static str; 2] = ["uci", "xboard"];
    const COMM_DEFAULT: &'static str = "uci";

    const HASH_LONG: &'static str = "hash";
    const HASH_HELP: &'static str = "Transposition table size in MB";

    const THREADS_LONG: &'static str = "threads";
    const THREADS_HELP: &'static str = "Reserved for future use; the engine is single-threaded";

    const QUIET_LONG: &'static str = "quiet";
    const QUIET_HELP: &'static str = "Suppress the startup banner";

    const KIWIPETE_LONG: &'static str = "kiwipete";
    const KIWIPETE_HELP: &'static str = "Set up the Kiwipete test position";
}

pub struct CmdLine {
    fen: Option<String>,
    perft: u8,
    comm: String,
    hash: usize,
    threads: usize,
    quiet: bool,
    kiwipete: bool,
}

impl CmdLine {
    pub fn new() -> Self {
        let matches = Self::get();

        let fen = matches.get_one::<String>(CmdLineArgs::FEN_LONG).cloned();
        let perft = *matches
            .get_one::<u8>(CmdLineArgs::PERFT_LONG)
            .unwrap_or(&0);
        let comm = matches
            .get_one::<String>(CmdLineArgs::COMM_LONG)
            .cloned()
            .unwrap_or_else(|| CmdLineArgs::COMM_DEFAULT.to_string());
        let hash = *matches.get_one::<usize>(CmdLineArgs::HASH_LONG).unwrap_or(&32);
        let threads = *matches
            .get_one::<usize>(CmdLineArgs::THREADS_LONG)
            .unwrap_or(&1);
        let quiet = matches.get_flag(CmdLineArgs::QUIET_LONG);
        let kiwipete = matches.get_flag(CmdLineArgs::KIWIPETE_LONG);

        Self {
            fen,
            perft,
            comm,
            hash,
            threads,
            quiet,
            kiwipete,
        }
    }

    pub fn fen(&self) -> Option<&str> {
        self.fen.as_deref()
    }

    pub fn perft(&self) -> u8 {
        self.perft
    }

    pub fn comm(&self) -> &str {
        &self.comm
    }

    pub fn hash(&self) -> usize {
        self.hash
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn has_quiet(&self) -> bool {
        self.quiet
    }

    pub fn has_kiwipete(&self) -> bool {
        self.kiwipete
    }

    fn get() -> clap::ArgMatches {
        Command::new(crate::defs::ABOUT.engine)
            .version(crate::defs::ABOUT.version)
            .author(crate::defs::ABOUT.author)
            .arg(
                Arg::new(CmdLineArgs::FEN_LONG)
                    .short(CmdLineArgs::FEN_SHORT.chars().next().unwrap())
                    .long(CmdLineArgs::FEN_LONG)
                    .help(CmdLineArgs::FEN_HELP)
                    .num_args(1),
            )
            .arg(
                Arg::new(CmdLineArgs::PERFT_LONG)
                    .long(CmdLineArgs::PERFT_LONG)
                    .help(CmdLineArgs::PERFT_HELP)
                    .value_parser(value_parser!(u8))
                    .num_args(1),
            )
            .arg(
                Arg::new(CmdLineArgs::COMM_LONG)
                    .long(CmdLineArgs::COMM_LONG)
                    .help(CmdLineArgs::COMM_HELP)
                    .value_parser(CmdLineArgs::COMM_VALUES.to_vec())
                    .num_args(1),
            )
            .arg(
                Arg::new(CmdLineArgs::HASH_LONG)
                    .long(CmdLineArgs::HASH_LONG)
                    .help(CmdLineArgs::HASH_HELP)
                    .value_parser(value_parser!(usize))
                    .num_args(1),
            )
            .arg(
                Arg::new(CmdLineArgs::THREADS_LONG)
                    .long(CmdLineArgs::THREADS_LONG)
                    .help(CmdLineArgs::THREADS_HELP)
                    .value_parser(value_parser!(usize))
                    .num_args(1),
            )
            .arg(
                Arg::new(CmdLineArgs::QUIET_LONG)
                    .long(CmdLineArgs::QUIET_LONG)
                    .help(CmdLineArgs::QUIET_HELP)
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new(CmdLineArgs::KIWIPETE_LONG)
                    .long(CmdLineArgs::KIWIPETE_LONG)
                    .help(CmdLineArgs::KIWIPETE_HELP)
                    .action(ArgAction::SetTrue),
            )
            .get_matches()
    }
}

impl Default for CmdLine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl CmdLine {
    /// Builds a `CmdLine` directly rather than through `clap`, since parsing
    /// the test harness's own argv as engine flags would abort the process.
    pub(crate) fn for_test() -> Self {
        CmdLine {
            fen: None,
            perft: 0,
            comm: "uci".to_string(),
            hash: 1,
            threads: 1,
            quiet: true,
            kiwipete: false,
        }
    }
}
