use colored::Colorize;

const LOGO: &[&str] = &[
    r"    _   _           _                   _ ",
    r"   /_\ | |___ _ _| |_ __ ___ _ _  __| |",
    r"  / _ \| / -_) '_|  _/ _/ _ \ ' \/ _` |",
    r" /_/ \_\_\___|_|  \__\__\___/_||_\__,_|",
    r"      ░░ alert conditions as configuration ░░",
];

pub fn print_banner() {
    let colors = [
        colored::Color::Cyan,
        colored::Color::Cyan,
        colored::Color::BrightCyan,
        colored::Color::BrightWhite,
        colored::Color::BrightBlack,
    ];

    for (line, &color) in LOGO.iter().zip(colors.iter()) {
        println!("{}", line.color(color).bold());
    }
}

pub fn print_version_block(version: &str, api_url: &str) {
    print_banner();
    println!();
    println!("  {} {}", "Version".dimmed(), version.bright_cyan().bold());
    println!("  {} {}", "    API".dimmed(), api_url.bright_white());
    println!(
        "  {} {}",
        "   Arch".dimmed(),
        std::env::consts::ARCH.bright_white()
    );
    println!(
        "  {} {}",
        "     OS".dimmed(),
        std::env::consts::OS.bright_white()
    );
    println!();
}
