use std::io::{self, Write};

const BANNER: [&str; 20] = [
    "",
    "  _____       _     _____                      _                 ",
    " |_   _|     | |   /  ___|                    | |                ",
    "   | |  _ __ | |_  \\ `--.  ___  ___ _ ____   _| | ___  _ __ ___  ",
    "   | | | '_ \\| __|  `--. \\/ _ \\/ __| '__\\ \\ / / |/ _ \\| '__/ _ \\ ",
    "  _| |_| | | | |_  /\\__/ /  __/ (__| |   \\ V /| | (_) | | |  __/ ",
    " |_____|_| |_|\\__| \\____/ \\___|\\___|_|    \\_/ |_|\\___/|_|  \\___| ",
    "                                                                  ",
    "                  JOB SEARCH SCRAPER - v1.0                       ",
    "",
    "Welcome to the Job Search Scraper",
    "------------------------------------------------------------",
    "Purpose: This application scrapes job listings from configured",
    "sources, normalizes and deduplicates results, and stores them",
    "for searching, analysis, and downstream automation.",
    "",
    "Usage: configure sources and run this scraper to build a",
    "searchable dataset of job postings for your workflows.",
    "------------------------------------------------------------",
    "",
];

/// The startup banner, one entry per output line, in print order.
pub fn banner_lines() -> &'static [&'static str] {
    &BANNER
}

pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    for line in banner_lines() {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

pub fn print_banner() -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_banner(&mut handle)
}
